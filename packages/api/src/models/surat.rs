//! Enumerations shared by incoming and outgoing letters.

use serde::{Deserialize, Serialize};

/// Processing status of a letter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuratStatus {
    #[default]
    #[serde(alias = "BARU")]
    Baru,
    #[serde(alias = "PENDING")]
    Pending,
    #[serde(alias = "PROSES")]
    Proses,
    #[serde(alias = "SELESAI")]
    Selesai,
    #[serde(alias = "ARSIP")]
    Arsip,
}

impl SuratStatus {
    pub const ALL: [SuratStatus; 5] = [
        SuratStatus::Baru,
        SuratStatus::Pending,
        SuratStatus::Proses,
        SuratStatus::Selesai,
        SuratStatus::Arsip,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SuratStatus::Baru => "baru",
            SuratStatus::Pending => "pending",
            SuratStatus::Proses => "proses",
            SuratStatus::Selesai => "selesai",
            SuratStatus::Arsip => "arsip",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SuratStatus::Baru => "Baru",
            SuratStatus::Pending => "Pending",
            SuratStatus::Proses => "Diproses",
            SuratStatus::Selesai => "Selesai",
            SuratStatus::Arsip => "Arsip",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str().eq_ignore_ascii_case(value))
    }
}

/// Urgency of a letter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Rendah,
    #[default]
    Sedang,
    Tinggi,
    #[serde(alias = "mendesak")]
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Rendah,
        Priority::Sedang,
        Priority::Tinggi,
        Priority::Urgent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Rendah => "rendah",
            Priority::Sedang => "sedang",
            Priority::Tinggi => "tinggi",
            Priority::Urgent => "urgent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Rendah => "Rendah",
            Priority::Sedang => "Sedang",
            Priority::Tinggi => "Tinggi",
            Priority::Urgent => "Urgent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "mendesak" => Some(Priority::Urgent),
            v => Self::ALL.into_iter().find(|p| p.as_str() == v),
        }
    }
}

/// Which register a letter belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuratType {
    Masuk,
    Keluar,
}

impl SuratType {
    pub fn as_str(self) -> &'static str {
        match self {
            SuratType::Masuk => "masuk",
            SuratType::Keluar => "keluar",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SuratType::Masuk => "Surat Masuk",
            SuratType::Keluar => "Surat Keluar",
        }
    }

    /// URL segment and file-name stem: `surat-masuk` / `surat_masuk`.
    pub fn slug(self) -> &'static str {
        match self {
            SuratType::Masuk => "surat-masuk",
            SuratType::Keluar => "surat-keluar",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accepts_uppercase() {
        let s: SuratStatus = serde_json::from_str(r#""SELESAI""#).unwrap();
        assert_eq!(s, SuratStatus::Selesai);
        assert_eq!(serde_json::to_string(&s).unwrap(), r#""selesai""#);
        assert_eq!(SuratStatus::parse("Proses"), Some(SuratStatus::Proses));
        assert_eq!(SuratStatus::parse(""), None);
    }

    #[test]
    fn test_priority_legacy_alias() {
        let p: Priority = serde_json::from_str(r#""mendesak""#).unwrap();
        assert_eq!(p, Priority::Urgent);
        assert_eq!(Priority::parse("MENDESAK"), Some(Priority::Urgent));
        assert_eq!(Priority::default(), Priority::Sedang);
        assert!(Priority::Urgent > Priority::Rendah);
    }
}
