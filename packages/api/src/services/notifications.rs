//! `/notifications` endpoints for the signed-in user.

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{MessageResponse, Notification, NotificationQuery, NotificationStats};

pub struct NotificationService<'a> {
    pub(crate) client: &'a ApiClient,
}

impl NotificationService<'_> {
    pub async fn list(&self, query: &NotificationQuery) -> Result<Vec<Notification>> {
        self.client.get_json("/notifications", query).await
    }

    pub async fn stats(&self) -> Result<NotificationStats> {
        self.client.get("/notifications/stats").await
    }

    pub async fn get(&self, id: i64) -> Result<Notification> {
        self.client.get(&format!("/notifications/{id}")).await
    }

    pub async fn mark_read(&self, id: i64) -> Result<Notification> {
        self.client
            .send_empty(Method::PUT, &format!("/notifications/{id}/read"))
            .await
    }

    pub async fn mark_all_read(&self) -> Result<()> {
        let _: Option<MessageResponse> = self
            .client
            .send_empty(Method::PUT, "/notifications/read-all")
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("/notifications/{id}")).await
    }

    pub async fn unread_count(&self) -> Result<u64> {
        Ok(self.stats().await?.unread)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::test_support::client;
    use crate::models::NotificationKind;

    #[tokio::test]
    async fn test_list_and_unread_count() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/notifications"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 1, "tipe": "disposisi", "judul": "Disposisi baru",
                "pesan": "Anda menerima disposisi", "is_read": false,
                "created_at": "2024-05-01T09:00:00"
            }])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/notifications/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 5, "unread": 2, "by_type": {"disposisi": 2}
            })))
            .mount(&server)
            .await;

        let (client, _) = client(&server, Some("tok"));
        let list = client
            .notifications()
            .list(&NotificationQuery {
                limit: Some(20),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(list[0].tipe, NotificationKind::Disposisi);
        assert_eq!(client.notifications().unread_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_mark_all_read_accepts_message_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/notifications/read-all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Marked 2 notifications as read"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client(&server, Some("tok"));
        client.notifications().mark_all_read().await.unwrap();
    }
}
