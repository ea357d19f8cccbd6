use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// What a notification is about; drives the icon in the bell dropdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    SuratMasuk,
    SuratKeluar,
    Disposisi,
    Deadline,
    StatusUpdate,
    #[serde(other)]
    System,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub tipe: NotificationKind,
    pub judul: String,
    pub pesan: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub read_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationStats {
    pub total: u64,
    pub unread: u64,
    #[serde(default)]
    pub by_type: HashMap<String, u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NotificationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipe: Option<NotificationKind>,
}
