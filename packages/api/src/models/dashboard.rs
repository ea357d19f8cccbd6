use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_surat_masuk: u64,
    pub total_surat_keluar: u64,
    pub surat_masuk_bulan_ini: u64,
    pub surat_keluar_bulan_ini: u64,
    pub disposisi_pending: u64,
    pub disposisi_selesai: u64,
    pub notifikasi_unread: u64,
    pub total_kategori: u64,
}

/// One entry of the dashboard activity feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub link: Option<String>,
}

impl RecentActivity {
    /// The actor or subject shown next to the avatar: the title prefix before
    /// `:` when there is one, else the description, else the activity type.
    pub fn display_name(&self) -> &str {
        if let Some((prefix, _)) = self.title.split_once(':') {
            return prefix.trim();
        }
        if !self.description.is_empty() {
            &self.description
        } else {
            &self.kind
        }
    }

    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub label: String,
    pub value: u64,
    #[serde(default)]
    pub color: Option<String>,
}

/// Monthly incoming vs outgoing counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub label: String,
    #[serde(default)]
    pub masuk: u64,
    #[serde(default)]
    pub keluar: u64,
}

/// Everything the dashboard page renders, fetched in one fan-out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub trend: Vec<TrendPoint>,
    pub recent: Vec<RecentActivity>,
    pub by_kategori: Vec<ChartDataPoint>,
}

impl DashboardSnapshot {
    /// Largest single value in the trend, for scaling bar heights.
    pub fn trend_max(&self) -> u64 {
        self.trend
            .iter()
            .map(|p| p.masuk.max(p.keluar))
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(title: &str, description: &str) -> RecentActivity {
        RecentActivity {
            id: 1,
            kind: "surat_masuk".into(),
            title: title.into(),
            description: description.into(),
            created_at: String::new(),
            link: None,
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(activity("Surat Masuk: 001/A", "Undangan").display_name(), "Surat Masuk");
        assert_eq!(activity("Disposisi baru", "Rapat koordinasi").display_name(), "Rapat koordinasi");
        assert_eq!(activity("Disposisi baru", "").display_name(), "surat_masuk");
        assert_eq!(activity("Surat Keluar: SK/1", "").initials(), "SK");
    }

    #[test]
    fn test_stats_tolerates_missing_fields() {
        let stats: DashboardStats = serde_json::from_str(r#"{"total_surat_masuk": 12}"#).unwrap();
        assert_eq!(stats.total_surat_masuk, 12);
        assert_eq!(stats.disposisi_pending, 0);
    }

    #[test]
    fn test_trend_max() {
        let snapshot = DashboardSnapshot {
            trend: vec![
                TrendPoint { label: "Jan".into(), masuk: 3, keluar: 7 },
                TrendPoint { label: "Feb".into(), masuk: 5, keluar: 1 },
            ],
            ..Default::default()
        };
        assert_eq!(snapshot.trend_max(), 7);
        assert_eq!(DashboardSnapshot::default().trend_max(), 0);
    }
}
