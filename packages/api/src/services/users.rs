//! `/users` endpoints (admin only).

use reqwest::Method;
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{CreateUser, PasswordChangeResponse, ResetPassword, Role, UpdateUser, User, UserCount, UserQuery};

pub struct UserService<'a> {
    pub(crate) client: &'a ApiClient,
}

#[derive(Serialize)]
struct CountQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
}

impl UserService<'_> {
    pub async fn list(&self, query: &UserQuery) -> Result<Vec<User>> {
        self.client.get_json("/users", query).await
    }

    pub async fn get(&self, id: i64) -> Result<User> {
        self.client.get(&format!("/users/{id}")).await
    }

    pub async fn create(&self, payload: &CreateUser) -> Result<User> {
        self.client.send_json(Method::POST, "/users", payload).await
    }

    pub async fn update(&self, id: i64, payload: &UpdateUser) -> Result<User> {
        self.client
            .send_json(Method::PUT, &format!("/users/{id}"), payload)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("/users/{id}")).await
    }

    pub async fn toggle_active(&self, id: i64) -> Result<User> {
        self.client
            .send_empty(Method::PUT, &format!("/users/{id}/toggle-active"))
            .await
    }

    pub async fn reset_password(&self, id: i64, payload: &ResetPassword) -> Result<PasswordChangeResponse> {
        self.client
            .send_json(Method::POST, &format!("/users/{id}/reset-password"), payload)
            .await
    }

    pub async fn count(&self, role: Option<Role>, is_active: Option<bool>) -> Result<u64> {
        let count: UserCount = self
            .client
            .get_json("/users/count", &CountQuery { role, is_active })
            .await?;
        Ok(count.total)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::test_support::client;
    use crate::models::{Role, UserQuery};

    #[tokio::test]
    async fn test_list_with_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("role", "staff"))
            .and(query_param("is_active", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 2, "username": "staff1", "email": "s@arsip.go.id",
                "full_name": "Staff Satu", "role": "staff", "is_active": true
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client(&server, Some("tok"));
        let users = client
            .users()
            .list(&UserQuery {
                role: Some(Role::Staff),
                is_active: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].display_name(), "Staff Satu");
    }

    #[tokio::test]
    async fn test_count_and_toggle() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/count"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 7})))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/users/2/toggle-active"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 2, "username": "staff1", "email": "s@arsip.go.id",
                "full_name": "Staff Satu", "role": "staff", "is_active": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client(&server, Some("tok"));
        assert_eq!(client.users().count(None, None).await.unwrap(), 7);
        let toggled = client.users().toggle_active(2).await.unwrap();
        assert!(!toggled.is_active);
    }
}
