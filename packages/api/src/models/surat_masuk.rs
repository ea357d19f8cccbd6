use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::file::FormFields;
use super::kategori::KategoriRef;
use super::surat::{Priority, SuratStatus};

/// Incoming letter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuratMasuk {
    pub id: i64,
    #[serde(default)]
    pub nomor_surat: String,
    pub tanggal_surat: NaiveDate,
    pub tanggal_terima: NaiveDate,
    pub pengirim: String,
    pub perihal: String,
    #[serde(default)]
    pub isi_singkat: Option<String>,
    #[serde(default)]
    pub kategori_id: Option<i64>,
    #[serde(default)]
    pub kategori: Option<KategoriRef>,
    #[serde(default)]
    pub status: SuratStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub original_filename: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub ocr_text: Option<String>,
    #[serde(default, alias = "confidence_score")]
    pub ocr_confidence: Option<f64>,
    #[serde(default, alias = "ocr_keywords")]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub created_at: String,
}

impl SuratMasuk {
    pub fn has_file(&self) -> bool {
        self.file_path.as_deref().is_some_and(|p| !p.is_empty())
            || self.original_filename.is_some()
    }

    /// File name to save a download under.
    pub fn download_name(&self) -> String {
        self.original_filename
            .clone()
            .unwrap_or_else(|| format!("surat_masuk_{}", self.id))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SuratMasukQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kategori_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SuratStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

/// Step two of intake: persist the reviewed fields against a detect `file_token`.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfirmSuratMasuk {
    pub file_token: String,
    pub nomor_surat: Option<String>,
    pub tanggal_surat: NaiveDate,
    pub tanggal_terima: NaiveDate,
    pub pengirim: String,
    pub perihal: String,
    pub isi_singkat: Option<String>,
    pub kategori_id: Option<i64>,
    pub priority: Priority,
    pub ocr_text: Option<String>,
    pub ocr_confidence: Option<f64>,
}

impl ConfirmSuratMasuk {
    pub fn fields(&self) -> FormFields {
        FormFields::new()
            .text("file_token", &self.file_token)
            .optional("nomor_surat", self.nomor_surat.as_deref())
            .text("tanggal_surat", self.tanggal_surat)
            .text("tanggal_terima", self.tanggal_terima)
            .text("pengirim", &self.pengirim)
            .text("perihal", &self.perihal)
            .optional("isi_singkat", self.isi_singkat.as_deref())
            .optional("kategori_id", self.kategori_id)
            .text("priority", self.priority.as_str())
            .optional("ocr_text", self.ocr_text.as_deref())
            .optional("ocr_confidence", self.ocr_confidence)
    }
}

/// Direct upload: the file travels with the fields in one request.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateSuratMasuk {
    pub nomor_surat: Option<String>,
    pub tanggal_surat: NaiveDate,
    pub tanggal_terima: NaiveDate,
    pub pengirim: String,
    pub perihal: String,
    pub isi_singkat: Option<String>,
    pub kategori_id: Option<i64>,
    pub status: Option<SuratStatus>,
    pub priority: Priority,
}

impl CreateSuratMasuk {
    pub fn fields(&self) -> FormFields {
        FormFields::new()
            .text("tanggal_surat", self.tanggal_surat)
            .text("tanggal_terima", self.tanggal_terima)
            .text("pengirim", &self.pengirim)
            .text("perihal", &self.perihal)
            .optional("nomor_surat", self.nomor_surat.as_deref())
            .optional("isi_singkat", self.isi_singkat.as_deref())
            .optional("kategori_id", self.kategori_id)
            .optional("status", self.status.map(SuratStatus::as_str))
            .text("priority", self.priority.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateSuratMasuk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nomor_surat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_surat: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_terima: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pengirim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perihal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isi_singkat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kategori_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SuratStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_confirm_fields_omit_empty_optionals() {
        let payload = ConfirmSuratMasuk {
            file_token: "tok-9".into(),
            nomor_surat: Some(String::new()),
            tanggal_surat: date("2024-05-02"),
            tanggal_terima: date("2024-05-03"),
            pengirim: "Dinas Kesehatan".into(),
            perihal: "Laporan Bulanan".into(),
            isi_singkat: None,
            kategori_id: Some(4),
            priority: Priority::Tinggi,
            ocr_text: Some("LAPORAN".into()),
            ocr_confidence: None,
        };
        let fields = payload.fields();
        assert_eq!(
            fields.names(),
            vec![
                "file_token",
                "tanggal_surat",
                "tanggal_terima",
                "pengirim",
                "perihal",
                "kategori_id",
                "priority",
                "ocr_text"
            ]
        );
        assert_eq!(fields.get("tanggal_surat"), Some("2024-05-02"));
        assert_eq!(fields.get("priority"), Some("tinggi"));
    }

    #[test]
    fn test_list_item_parses_minimal_shape() {
        let json = r#"{"id":1,"nomor_surat":"001/A","tanggal_surat":"2024-01-10","tanggal_terima":"2024-01-11",
            "pengirim":"BPS","perihal":"Data","kategori_id":null,"status":"baru","priority":"sedang","created_at":"2024-01-11T08:00:00"}"#;
        let surat: SuratMasuk = serde_json::from_str(json).unwrap();
        assert_eq!(surat.status, SuratStatus::Baru);
        assert!(!surat.has_file());
        assert_eq!(surat.download_name(), "surat_masuk_1");
    }

    #[test]
    fn test_update_serialises_only_set_fields() {
        let payload = UpdateSuratMasuk {
            status: Some(SuratStatus::Selesai),
            tanggal_surat: Some(date("2024-02-01")),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"tanggal_surat":"2024-02-01","status":"selesai"}"#
        );
    }
}
