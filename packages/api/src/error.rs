//! Error types for the REST client.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors surfaced by [`crate::ApiClient`] and the service handles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP 401. The session has already been expired when this is returned.
    #[error("Session expired")]
    Unauthorized,

    /// Any other non-success status.
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The response body did not have the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Text for a toast: the server's `detail` when it sent one, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { status, detail } if !is_status_text(*status, detail) => detail.clone(),
            ApiError::Unauthorized => "Sesi Anda telah berakhir. Silakan login kembali.".to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Build a `Status` error; `detail` falls back to the status text.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = extract_detail(body)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());
        ApiError::Status {
            status: status.as_u16(),
            detail,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

#[derive(Deserialize)]
struct ValidationItem {
    msg: String,
}

/// Pull a readable message out of a FastAPI error body.
///
/// `{"detail": "..."}` yields the string; `{"detail": [{"msg": ...}, ...]}`
/// yields the messages joined by `"; "`. Anything else yields `None`.
fn extract_detail(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value::<ValidationItem>(item).ok())
                .map(|item| item.msg)
                .collect::<Vec<_>>()
                .join("; "),
        ),
        _ => None,
    }
}

/// True when `detail` carries nothing beyond the HTTP status text.
fn is_status_text(status: u16, detail: &str) -> bool {
    detail.is_empty()
        || StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .is_some_and(|reason| reason == detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"detail":"Nomor surat sudah digunakan"}"#);
        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                detail: "Nomor surat sudah digunakan".to_string()
            }
        );
        assert_eq!(err.user_message("Gagal"), "Nomor surat sudah digunakan");
    }

    #[test]
    fn test_validation_list_detail() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error"},{"loc":["body","username"],"msg":"too short","type":"value_error"}]}"#;
        let err = ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(
            err.user_message("Gagal"),
            "value is not a valid email address; too short"
        );
    }

    #[test]
    fn test_unparsable_body_uses_fallback() {
        let err = ApiError::from_status(StatusCode::SERVICE_UNAVAILABLE, "<html>upstream down</html>");
        assert_eq!(
            err,
            ApiError::Status {
                status: 503,
                detail: "Service Unavailable".to_string()
            }
        );
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
        assert_eq!(err.user_message("Gagal menyimpan. Silakan coba lagi."), "Gagal menyimpan. Silakan coba lagi.");

        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
        assert_eq!(err.user_message("Gagal"), "Gagal");
        assert_eq!(
            ApiError::Network("connection refused".into()).user_message("Gagal"),
            "Gagal"
        );
    }

    #[test]
    fn test_not_found() {
        assert!(ApiError::from_status(StatusCode::NOT_FOUND, "").is_not_found());
        assert!(!ApiError::Unauthorized.is_not_found());
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
    }
}
