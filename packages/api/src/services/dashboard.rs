//! `/dashboard` endpoints.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{ChartDataPoint, DashboardSnapshot, DashboardStats, RecentActivity, SuratType, TrendPoint};

const RECENT_LIMIT: u32 = 5;
const TREND_MONTHS: u32 = 6;

pub struct DashboardService<'a> {
    pub(crate) client: &'a ApiClient,
}

#[derive(Serialize)]
struct LimitQuery {
    limit: u32,
}

#[derive(Serialize)]
struct MonthsQuery {
    months: u32,
}

#[derive(Serialize)]
struct JenisQuery {
    jenis: SuratType,
}

impl DashboardService<'_> {
    pub async fn stats(&self) -> Result<DashboardStats> {
        self.client.get("/dashboard/stats").await
    }

    pub async fn recent(&self, limit: u32) -> Result<Vec<RecentActivity>> {
        self.client
            .get_json("/dashboard/recent", &LimitQuery { limit })
            .await
    }

    pub async fn by_kategori(&self, jenis: SuratType) -> Result<Vec<ChartDataPoint>> {
        self.client
            .get_json("/dashboard/charts/by-kategori", &JenisQuery { jenis })
            .await
    }

    pub async fn by_month(&self, months: u32) -> Result<Vec<ChartDataPoint>> {
        self.client
            .get_json("/dashboard/charts/by-month", &MonthsQuery { months })
            .await
    }

    pub async fn trend(&self, months: u32) -> Result<Vec<TrendPoint>> {
        self.client
            .get_json("/dashboard/charts/trend", &MonthsQuery { months })
            .await
    }

    /// Fetch everything the dashboard shows concurrently. Fails as a whole
    /// when any request fails.
    pub async fn snapshot(&self) -> Result<DashboardSnapshot> {
        let (stats, trend, recent, by_kategori) = futures::try_join!(
            self.stats(),
            self.trend(TREND_MONTHS),
            self.recent(RECENT_LIMIT),
            self.by_kategori(SuratType::Masuk),
        )?;
        Ok(DashboardSnapshot {
            stats,
            trend,
            recent,
            by_kategori,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::test_support::client;
    use crate::error::ApiError;

    async fn mount_all(server: &MockServer, stats_status: u16) {
        Mock::given(method("GET"))
            .and(path("/dashboard/stats"))
            .respond_with(ResponseTemplate::new(stats_status).set_body_json(json!({
                "total_surat_masuk": 40,
                "total_surat_keluar": 12,
                "disposisi_pending": 3
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dashboard/charts/trend"))
            .and(query_param("months", "6"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"label": "Mei", "masuk": 8, "keluar": 3},
                {"label": "Jun", "masuk": 5, "keluar": 11}
            ])))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dashboard/recent"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "type": "surat_masuk", "title": "Dinas Pendidikan: Undangan", "created_at": "2024-06-01T08:00:00"}
            ])))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dashboard/charts/by-kategori"))
            .and(query_param("jenis", "masuk"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"label": "Undangan", "value": 7, "color": "#2563EB"}
            ])))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_snapshot_combines_all_requests() {
        let server = MockServer::start().await;
        mount_all(&server, 200).await;

        let (client, _) = client(&server, Some("tok"));
        let snapshot = client.dashboard().snapshot().await.unwrap();
        assert_eq!(snapshot.stats.total_surat_masuk, 40);
        assert_eq!(snapshot.stats.surat_masuk_bulan_ini, 0);
        assert_eq!(snapshot.trend_max(), 11);
        assert_eq!(snapshot.recent[0].display_name(), "Dinas Pendidikan");
        assert_eq!(snapshot.by_kategori[0].value, 7);
    }

    #[tokio::test]
    async fn test_snapshot_fails_when_one_request_fails() {
        let server = MockServer::start().await;
        mount_all(&server, 500).await;

        let (client, _) = client(&server, Some("tok"));
        let err = client.dashboard().snapshot().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(!matches!(err, ApiError::Unauthorized));
    }
}
