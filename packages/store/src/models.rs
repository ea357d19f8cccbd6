//! # Account models persisted with the session
//!
//! The console keeps exactly one entity on the client beyond component state:
//! the signed-in account. [`AuthUser`] mirrors the `/auth/me` response and is
//! stored inside [`crate::AuthSession`] so a page reload does not need a round
//! trip before the shell can render the user's name and role-gated navigation.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Role`] | Account role. Unknown role strings from the server deserialize to [`Role::Unknown`] instead of failing the whole session. |
//! | [`AuthUser`] | The authenticated account: identity, contact fields, role and activation flag. |

use serde::{Deserialize, Serialize};

/// Role assigned to an account by the administrator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Staff,
    Pimpinan,
    #[default]
    User,
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Roles an administrator can assign from the user management screen.
    pub const ASSIGNABLE: [Role; 4] = [Role::Admin, Role::Staff, Role::Pimpinan, Role::User];

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Wire value, as sent in payloads and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Pimpinan => "pimpinan",
            Role::User => "user",
            Role::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Staff => "Staff",
            Role::Pimpinan => "Pimpinan",
            Role::User => "Pengguna",
            Role::Unknown => "Tidak diketahui",
        }
    }

    /// Parse a wire value; anything unrecognised maps to [`Role::Unknown`].
    pub fn from_wire(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            "staff" => Role::Staff,
            "pimpinan" => Role::Pimpinan,
            "user" => Role::User,
            _ => Role::Unknown,
        }
    }
}

/// The signed-in account as returned by `GET /auth/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

fn default_active() -> bool {
    true
}

impl AuthUser {
    /// Full name, falling back to the username when the profile has none.
    pub fn display_name(&self) -> &str {
        let name = self.full_name.trim();
        if name.is_empty() {
            &self.username
        } else {
            name
        }
    }

    /// Up to two uppercase initials for avatar placeholders.
    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(full_name: &str) -> AuthUser {
        AuthUser {
            id: 1,
            username: "tu.staff".to_string(),
            email: "staff@arsip.go.id".to_string(),
            full_name: full_name.to_string(),
            role: Role::Staff,
            is_active: true,
            created_at: None,
            avatar: None,
        }
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        assert_eq!(user("Staff Tata Usaha").display_name(), "Staff Tata Usaha");
        assert_eq!(user("   ").display_name(), "tu.staff");
    }

    #[test]
    fn test_initials() {
        assert_eq!(user("Staff Tata Usaha").initials(), "ST");
        assert_eq!(user("kepala").initials(), "K");
        assert_eq!(user("").initials(), "T");
    }

    #[test]
    fn test_unknown_role_does_not_fail() {
        let json = r#"{"id":3,"username":"x","email":"x@y.z","full_name":"X","role":"auditor","is_active":true}"#;
        let parsed: AuthUser = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.role, Role::Unknown);
        assert!(!parsed.role.is_admin());
    }

    #[test]
    fn test_role_wire_values() {
        for role in Role::ASSIGNABLE {
            assert_eq!(Role::from_wire(role.as_str()), role);
        }
        assert!(Role::Admin.is_admin());
        assert_eq!(Role::from_wire("root"), Role::Unknown);
    }
}
