//! `/kategori` endpoints.

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{CreateKategori, Kategori, KategoriQuery, UpdateKategori};

pub struct KategoriService<'a> {
    pub(crate) client: &'a ApiClient,
}

impl KategoriService<'_> {
    pub async fn list(&self, query: &KategoriQuery) -> Result<Vec<Kategori>> {
        self.client.get_json("/kategori", query).await
    }

    pub async fn get(&self, id: i64) -> Result<Kategori> {
        self.client.get(&format!("/kategori/{id}")).await
    }

    pub async fn create(&self, payload: &CreateKategori) -> Result<Kategori> {
        self.client.send_json(Method::POST, "/kategori", payload).await
    }

    pub async fn update(&self, id: i64, payload: &UpdateKategori) -> Result<Kategori> {
        self.client
            .send_json(Method::PUT, &format!("/kategori/{id}"), payload)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("/kategori/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::test_support::client;
    use crate::models::{CreateKategori, KategoriQuery};

    #[tokio::test]
    async fn test_active_list_and_create() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/kategori"))
            .and(query_param("is_active", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "nama": "Undangan", "slug": "undangan", "color": "#2563EB", "is_active": true, "created_at": "2024-01-01"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/kategori"))
            .and(body_json(json!({"nama": "Nota Dinas", "slug": "nota-dinas", "color": "#10B981"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!(
                {"id": 2, "nama": "Nota Dinas", "slug": "nota-dinas", "color": "#10B981", "is_active": true, "created_at": "2024-01-02"}
            )))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client(&server, Some("tok"));
        let list = client.kategori().list(&KategoriQuery::active()).await.unwrap();
        assert_eq!(list[0].nama, "Undangan");

        let created = client
            .kategori()
            .create(&CreateKategori {
                nama: "Nota Dinas".into(),
                slug: "nota-dinas".into(),
                deskripsi: None,
                color: "#10B981".into(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 2);
    }
}
