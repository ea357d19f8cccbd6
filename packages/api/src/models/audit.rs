use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Audited action. Values the console does not know are kept as [`AuditAction::Other`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    LoginSuccess,
    LoginFailed,
    #[serde(other)]
    Other,
}

impl AuditAction {
    pub const FILTERABLE: [AuditAction; 5] = [
        AuditAction::Create,
        AuditAction::Update,
        AuditAction::Delete,
        AuditAction::LoginSuccess,
        AuditAction::LoginFailed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
            AuditAction::LoginSuccess => "LOGIN_SUCCESS",
            AuditAction::LoginFailed => "LOGIN_FAILED",
            AuditAction::Other => "OTHER",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuditAction::Create => "Tambah",
            AuditAction::Update => "Ubah",
            AuditAction::Delete => "Hapus",
            AuditAction::LoginSuccess => "Login Berhasil",
            AuditAction::LoginFailed => "Login Gagal",
            AuditAction::Other => "Lainnya",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub action: AuditAction,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub record_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub old_data: Option<serde_json::Value>,
    #[serde(default)]
    pub new_data: Option<serde_json::Value>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditStats {
    pub total: u64,
    #[serde(default)]
    pub by_action: HashMap<String, u64>,
    #[serde(default)]
    pub by_table: HashMap<String, u64>,
    #[serde(default)]
    pub by_user: HashMap<String, u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AuditQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<AuditAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_format() {
        let log: AuditLog = serde_json::from_str(
            r#"{"id":1,"user_id":2,"action":"LOGIN_SUCCESS","table_name":"users","record_id":2,"description":"Login","created_at":"2024-01-01T00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(log.action, AuditAction::LoginSuccess);

        let other: AuditAction = serde_json::from_str(r#""EXPORT""#).unwrap();
        assert_eq!(other, AuditAction::Other);

        let query = AuditQuery {
            action: Some(AuditAction::Delete),
            days: Some(7),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({"action": "DELETE", "days": 7})
        );
    }
}
