//! # Account models
//!
//! The account record itself is [`store::AuthUser`], re-exported here as
//! [`User`], because the same shape is persisted with the session. This module
//! adds the request/response types around it:
//!
//! - [`LoginResponse`]: the token pair returned by `POST /auth/login`. The
//!   server may also embed the user; the console still calls `/auth/me`.
//! - [`UserQuery`]: filters for `GET /users` and `GET /users/count`.
//! - [`CreateUser`] / [`UpdateUser`]: admin payloads. Unset fields of
//!   [`UpdateUser`] are omitted from the JSON so the server leaves them alone.
//! - [`UpdateProfile`] / [`ChangePassword`]: self-service payloads.
//! - [`ResetPassword`] / [`PasswordChangeResponse`]: admin password reset;
//!   the server answers with a temporary password when none was supplied.

use serde::{Deserialize, Serialize};

pub use store::{AuthUser as User, Role};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub role: Role,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ResetPassword {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
    pub force_change_on_login: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PasswordChangeResponse {
    pub message: String,
    #[serde(default)]
    pub temporary_password: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UserCount {
    pub total: u64,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_user_omits_unset() {
        let payload = UpdateUser {
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&payload).unwrap(), r#"{"is_active":false}"#);
    }

    #[test]
    fn test_login_response_minimal() {
        let parsed: LoginResponse =
            serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(parsed.access_token, "abc");
        assert_eq!(parsed.token_type, "bearer");
        assert!(parsed.user.is_none());
    }
}
