//! `/disposisi` endpoints.

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{CompleteDisposisi, CreateDisposisi, Disposisi, DisposisiQuery, UpdateDisposisi};

pub struct DisposisiService<'a> {
    pub(crate) client: &'a ApiClient,
}

impl DisposisiService<'_> {
    pub async fn list(&self, query: &DisposisiQuery) -> Result<Vec<Disposisi>> {
        self.client.get_json("/disposisi", query).await
    }

    pub async fn get(&self, id: i64) -> Result<Disposisi> {
        self.client.get(&format!("/disposisi/{id}")).await
    }

    pub async fn create(&self, payload: &CreateDisposisi) -> Result<Disposisi> {
        self.client.send_json(Method::POST, "/disposisi", payload).await
    }

    pub async fn update(&self, id: i64, payload: &UpdateDisposisi) -> Result<Disposisi> {
        self.client
            .send_json(Method::PUT, &format!("/disposisi/{id}"), payload)
            .await
    }

    /// Mark done with a closing note.
    pub async fn complete(&self, id: i64, payload: &CompleteDisposisi) -> Result<Disposisi> {
        self.client
            .send_json(Method::PUT, &format!("/disposisi/{id}/complete"), payload)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("/disposisi/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::test_support::client;
    use crate::models::{DisposisiStatus, SuratType};

    #[tokio::test]
    async fn test_list_filters_and_complete() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/disposisi"))
            .and(query_param("status", "pending"))
            .and(query_param("surat_type", "masuk"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 4, "surat_type": "masuk", "surat_masuk_id": 9, "to_user_id": 3,
                "instruksi": "Hadiri rapat", "status": "pending", "created_at": "2024-05-01T09:00:00"
            }])))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/disposisi/4/complete"))
            .and(body_json(json!({"keterangan": "Sudah dihadiri"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 4, "surat_type": "masuk", "surat_masuk_id": 9, "to_user_id": 3,
                "instruksi": "Hadiri rapat", "status": "selesai",
                "keterangan_selesai": "Sudah dihadiri", "created_at": "2024-05-01T09:00:00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client(&server, Some("tok"));
        let list = client
            .disposisi()
            .list(&DisposisiQuery {
                status: Some(DisposisiStatus::Pending),
                surat_type: Some(SuratType::Masuk),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(list[0].surat_id(), Some(9));

        let done = client
            .disposisi()
            .complete(
                4,
                &CompleteDisposisi {
                    keterangan: "Sudah dihadiri".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(done.status, DisposisiStatus::Selesai);
    }
}
