use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::surat::SuratType;

/// Progress of a routing instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisposisiStatus {
    #[default]
    #[serde(alias = "PENDING")]
    Pending,
    #[serde(rename = "ditindaklanjuti", alias = "DITINDAKLANJUTI", alias = "proses", alias = "PROSES")]
    Proses,
    #[serde(alias = "SELESAI")]
    Selesai,
    #[serde(alias = "DIBATALKAN")]
    Dibatalkan,
}

impl DisposisiStatus {
    pub const ALL: [DisposisiStatus; 4] = [
        DisposisiStatus::Pending,
        DisposisiStatus::Proses,
        DisposisiStatus::Selesai,
        DisposisiStatus::Dibatalkan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DisposisiStatus::Pending => "pending",
            DisposisiStatus::Proses => "ditindaklanjuti",
            DisposisiStatus::Selesai => "selesai",
            DisposisiStatus::Dibatalkan => "dibatalkan",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisposisiStatus::Pending => "Pending",
            DisposisiStatus::Proses => "Diproses",
            DisposisiStatus::Selesai => "Selesai",
            DisposisiStatus::Dibatalkan => "Dibatalkan",
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, DisposisiStatus::Pending | DisposisiStatus::Proses)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "proses" => Some(DisposisiStatus::Proses),
            v => Self::ALL.into_iter().find(|s| s.as_str() == v),
        }
    }
}

/// A routing instruction attached to one letter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Disposisi {
    pub id: i64,
    #[serde(default)]
    pub surat_type: Option<SuratType>,
    #[serde(default)]
    pub surat_masuk_id: Option<i64>,
    #[serde(default)]
    pub surat_keluar_id: Option<i64>,
    #[serde(default)]
    pub from_user_id: Option<i64>,
    pub to_user_id: i64,
    #[serde(default)]
    pub instruksi: String,
    #[serde(default, alias = "catatan")]
    pub keterangan: Option<String>,
    #[serde(default)]
    pub status: DisposisiStatus,
    #[serde(default, alias = "batas_waktu")]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub tanggal_selesai: Option<String>,
    #[serde(default)]
    pub keterangan_selesai: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl Disposisi {
    /// Register of the routed letter, inferred from the ids when not sent.
    pub fn surat_type(&self) -> SuratType {
        match self.surat_type {
            Some(t) => t,
            None if self.surat_keluar_id.is_some() && self.surat_masuk_id.is_none() => SuratType::Keluar,
            None => SuratType::Masuk,
        }
    }

    pub fn surat_id(&self) -> Option<i64> {
        match self.surat_type() {
            SuratType::Masuk => self.surat_masuk_id,
            SuratType::Keluar => self.surat_keluar_id,
        }
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status.is_open() && self.deadline.is_some_and(|d| d < today)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DisposisiQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DisposisiStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surat_type: Option<SuratType>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateDisposisi {
    pub surat_type: SuratType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surat_masuk_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surat_keluar_id: Option<i64>,
    pub to_user_id: i64,
    pub instruksi: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keterangan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateDisposisi {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruksi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keterangan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DisposisiStatus>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompleteDisposisi {
    pub keterangan: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_backend_shape() {
        let json = r#"{"id":5,"surat_masuk_id":12,"from_user_id":1,"to_user_id":4,"instruksi":"Tindak lanjuti",
            "catatan":"Segera","batas_waktu":"2024-04-10","status":"ditindaklanjuti","created_at":"2024-04-01T09:00:00"}"#;
        let d: Disposisi = serde_json::from_str(json).unwrap();
        assert_eq!(d.status, DisposisiStatus::Proses);
        assert_eq!(d.keterangan.as_deref(), Some("Segera"));
        assert_eq!(d.surat_type(), SuratType::Masuk);
        assert_eq!(d.surat_id(), Some(12));

        let before = NaiveDate::from_ymd_opt(2024, 4, 9).unwrap();
        let after = NaiveDate::from_ymd_opt(2024, 4, 11).unwrap();
        assert!(!d.is_overdue(before));
        assert!(d.is_overdue(after));
    }

    #[test]
    fn test_parses_uppercase_status_and_keluar() {
        let json = r#"{"id":6,"surat_type":"keluar","surat_keluar_id":3,"to_user_id":2,"instruksi":"Arsipkan","status":"SELESAI"}"#;
        let d: Disposisi = serde_json::from_str(json).unwrap();
        assert_eq!(d.status, DisposisiStatus::Selesai);
        assert_eq!(d.surat_id(), Some(3));
        assert!(!d.is_overdue(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()));
    }

    #[test]
    fn test_create_payload() {
        let payload = CreateDisposisi {
            surat_type: SuratType::Masuk,
            surat_masuk_id: Some(12),
            surat_keluar_id: None,
            to_user_id: 4,
            instruksi: "Pelajari".into(),
            keterangan: None,
            deadline: NaiveDate::from_ymd_opt(2024, 4, 10),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "surat_type": "masuk",
                "surat_masuk_id": 12,
                "to_user_id": 4,
                "instruksi": "Pelajari",
                "deadline": "2024-04-10"
            })
        );
    }

    #[test]
    fn test_in_progress_status_uses_backend_value() {
        let payload = UpdateDisposisi {
            status: Some(DisposisiStatus::Proses),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"status": "ditindaklanjuti"})
        );
        let query = DisposisiQuery {
            status: Some(DisposisiStatus::Proses),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({"status": "ditindaklanjuti"})
        );
        assert_eq!(DisposisiStatus::Proses.as_str(), "ditindaklanjuti");
        assert_eq!(DisposisiStatus::parse("proses"), Some(DisposisiStatus::Proses));
        assert_eq!(DisposisiStatus::parse("Ditindaklanjuti"), Some(DisposisiStatus::Proses));
    }
}
