//! `/auth` endpoints.

use reqwest::Method;
use store::AuthSession;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{ChangePassword, FormFields, LoginResponse, PasswordChangeResponse, UpdateProfile, User};

pub struct AuthService<'a> {
    pub(crate) client: &'a ApiClient,
}

impl AuthService<'_> {
    /// `POST /auth/login` with the OAuth2 password form fields.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let form = FormFields::new()
            .text("username", username)
            .text("password", password)
            .into_form(None);
        self.client.send_multipart("/auth/login", form).await
    }

    pub async fn me(&self) -> Result<User> {
        self.client.get("/auth/me").await
    }

    /// Log in, then load the profile with the fresh token.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<AuthSession> {
        let tokens = self.login(username, password).await?;
        let response = self
            .client
            .execute_with_token(Method::GET, "/auth/me", Some(tokens.access_token.clone()), |r| r)
            .await?;
        let user: User = response.json().await?;
        tracing::info!("Signed in as {}", user.username);
        Ok(AuthSession::signed_in(user, tokens.access_token))
    }

    /// `POST /auth/logout`. A 401 here still expires the local session.
    pub async fn logout(&self) -> Result<()> {
        self.client.execute(Method::POST, "/auth/logout", |r| r).await?;
        Ok(())
    }

    pub async fn change_password(&self, payload: &ChangePassword) -> Result<PasswordChangeResponse> {
        self.client
            .send_json(Method::PUT, "/auth/change-password", payload)
            .await
    }

    pub async fn update_profile(&self, payload: &UpdateProfile) -> Result<User> {
        self.client.send_json(Method::PUT, "/auth/me", payload).await
    }
}
