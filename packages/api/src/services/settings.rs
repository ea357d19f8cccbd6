//! `/settings` endpoints. `public` needs no admin role; the rest do.

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{AppSetting, MessageResponse, UpdateSetting};

pub struct SettingsService<'a> {
    pub(crate) client: &'a ApiClient,
}

impl SettingsService<'_> {
    pub async fn public(&self) -> Result<Vec<AppSetting>> {
        self.client.get("/settings/public").await
    }

    pub async fn list(&self) -> Result<Vec<AppSetting>> {
        self.client.get("/settings").await
    }

    pub async fn get(&self, key: &str) -> Result<AppSetting> {
        self.client.get(&format!("/settings/{key}")).await
    }

    pub async fn update(&self, key: &str, value: impl Into<String>) -> Result<AppSetting> {
        let body = UpdateSetting {
            setting_value: value.into(),
        };
        self.client
            .send_json(Method::PUT, &format!("/settings/{key}"), &body)
            .await
    }

    /// Restore every setting to its server default.
    pub async fn reset(&self) -> Result<String> {
        let response: Option<MessageResponse> = self
            .client
            .send_empty(Method::POST, "/settings/reset")
            .await?;
        Ok(response.map(|r| r.message).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::test_support::client;

    #[tokio::test]
    async fn test_update_sends_setting_value() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/settings/org_name"))
            .and(body_json(json!({"setting_value": "DINAS ARSIP"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "setting_key": "org_name", "setting_value": "DINAS ARSIP",
                "setting_type": "string", "is_public": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client(&server, Some("tok"));
        let updated = client.settings().update("org_name", "DINAS ARSIP").await.unwrap();
        assert_eq!(updated.setting_value, "DINAS ARSIP");
    }

    #[tokio::test]
    async fn test_reset_returns_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/settings/reset"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Settings reset to defaults"
            })))
            .mount(&server)
            .await;

        let (client, _) = client(&server, Some("tok"));
        assert_eq!(client.settings().reset().await.unwrap(), "Settings reset to defaults");
    }
}
