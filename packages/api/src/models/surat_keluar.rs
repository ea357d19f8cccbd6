use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::file::FormFields;
use super::kategori::KategoriRef;
use super::surat::{Priority, SuratStatus};

/// Outgoing letter. The number is assigned by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuratKeluar {
    pub id: i64,
    #[serde(default)]
    pub nomor_surat_keluar: String,
    pub tanggal_surat: NaiveDate,
    pub penerima: String,
    #[serde(default)]
    pub tembusan: Option<String>,
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
    #[serde(default)]
    pub ocr_confidence: Option<f64>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub created_at: String,
}

impl SuratKeluar {
    pub fn has_file(&self) -> bool {
        self.file_path.as_deref().is_some_and(|p| !p.is_empty())
            || self.original_filename.is_some()
    }

    pub fn download_name(&self) -> String {
        self.original_filename
            .clone()
            .unwrap_or_else(|| format!("surat_keluar_{}", self.id))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SuratKeluarQuery {
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

#[derive(Clone, Debug, PartialEq)]
pub struct ConfirmSuratKeluar {
    pub file_token: String,
    pub tanggal_surat: NaiveDate,
    pub penerima: String,
    pub perihal: String,
    pub tembusan: Option<String>,
    pub isi_singkat: Option<String>,
    pub kategori_id: Option<i64>,
    pub priority: Priority,
    pub ocr_text: Option<String>,
    pub ocr_confidence: Option<f64>,
}

impl ConfirmSuratKeluar {
    pub fn fields(&self) -> FormFields {
        FormFields::new()
            .text("file_token", &self.file_token)
            .text("tanggal_surat", self.tanggal_surat)
            .text("penerima", &self.penerima)
            .text("perihal", &self.perihal)
            .optional("tembusan", self.tembusan.as_deref())
            .optional("isi_singkat", self.isi_singkat.as_deref())
            .optional("kategori_id", self.kategori_id)
            .text("priority", self.priority.as_str())
            .optional("ocr_text", self.ocr_text.as_deref())
            .optional("ocr_confidence", self.ocr_confidence)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CreateSuratKeluar {
    pub tanggal_surat: NaiveDate,
    pub penerima: String,
    pub perihal: String,
    pub tembusan: Option<String>,
    pub isi_singkat: Option<String>,
    pub kategori_id: Option<i64>,
    pub status: Option<SuratStatus>,
    pub priority: Priority,
}

impl CreateSuratKeluar {
    pub fn fields(&self) -> FormFields {
        FormFields::new()
            .text("tanggal_surat", self.tanggal_surat)
            .text("penerima", &self.penerima)
            .text("perihal", &self.perihal)
            .optional("tembusan", self.tembusan.as_deref())
            .optional("isi_singkat", self.isi_singkat.as_deref())
            .optional("kategori_id", self.kategori_id)
            .optional("status", self.status.map(SuratStatus::as_str))
            .text("priority", self.priority.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateSuratKeluar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_surat: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penerima: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tembusan: Option<String>,
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

    #[test]
    fn test_create_fields() {
        let payload = CreateSuratKeluar {
            tanggal_surat: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            penerima: "Gubernur".into(),
            perihal: "Permohonan".into(),
            tembusan: Some("Arsip".into()),
            isi_singkat: None,
            kategori_id: None,
            status: None,
            priority: Priority::Sedang,
        };
        let fields = payload.fields();
        assert_eq!(
            fields.names(),
            vec!["tanggal_surat", "penerima", "perihal", "tembusan", "priority"]
        );
        assert_eq!(fields.get("tanggal_surat"), Some("2024-06-01"));
    }

    #[test]
    fn test_parses_server_number() {
        let json = r#"{"id":3,"nomor_surat_keluar":"SK/2024/003","tanggal_surat":"2024-06-01","penerima":"Gubernur",
            "perihal":"Permohonan","status":"proses","priority":"mendesak"}"#;
        let surat: SuratKeluar = serde_json::from_str(json).unwrap();
        assert_eq!(surat.nomor_surat_keluar, "SK/2024/003");
        assert_eq!(surat.priority, Priority::Urgent);
        assert_eq!(surat.download_name(), "surat_keluar_3");
    }
}
