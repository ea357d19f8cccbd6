use chrono::NaiveDate;

use crate::models::{
    ConfirmSuratKeluar, ConfirmSuratMasuk, CreateSuratKeluar, CreateSuratMasuk, Priority, SuratKeluar, SuratMasuk,
    SuratStatus, UpdateSuratKeluar, UpdateSuratMasuk,
};

use super::{non_blank, require, require_date, FormErrors};

fn date_input(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Review step of incoming-letter intake. Also used as the body of the edit form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuratMasukReview {
    pub nomor_surat: String,
    pub tanggal_surat: String,
    pub tanggal_terima: String,
    pub pengirim: String,
    pub perihal: String,
    pub isi_singkat: String,
    pub kategori_id: Option<i64>,
    pub priority: Priority,
}

struct MasukFields {
    nomor_surat: Option<String>,
    tanggal_surat: NaiveDate,
    tanggal_terima: NaiveDate,
    pengirim: String,
    perihal: String,
    isi_singkat: Option<String>,
}

impl SuratMasukReview {
    /// Empty form with both dates set to `today`.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            tanggal_surat: date_input(today),
            tanggal_terima: date_input(today),
            ..Default::default()
        }
    }

    fn checked(&self) -> Result<MasukFields, FormErrors> {
        let mut errors = FormErrors::new();
        let tanggal_surat = require_date(
            &mut errors,
            "tanggal_surat",
            &self.tanggal_surat,
            "Tanggal surat wajib diisi",
            NaiveDate::default(),
        );
        let tanggal_terima = require_date(
            &mut errors,
            "tanggal_terima",
            &self.tanggal_terima,
            "Tanggal terima wajib diisi",
            NaiveDate::default(),
        );
        let pengirim = require(&mut errors, "pengirim", &self.pengirim, "Pengirim wajib diisi");
        let perihal = require(&mut errors, "perihal", &self.perihal, "Perihal wajib diisi");
        errors.finish(|| MasukFields {
            nomor_surat: non_blank(&self.nomor_surat),
            tanggal_surat,
            tanggal_terima,
            pengirim,
            perihal,
            isi_singkat: non_blank(&self.isi_singkat),
        })
    }

    pub fn to_confirm(
        &self,
        file_token: &str,
        ocr_text: Option<&str>,
        ocr_confidence: Option<f64>,
    ) -> Result<ConfirmSuratMasuk, FormErrors> {
        let f = self.checked()?;
        Ok(ConfirmSuratMasuk {
            file_token: file_token.to_string(),
            nomor_surat: f.nomor_surat,
            tanggal_surat: f.tanggal_surat,
            tanggal_terima: f.tanggal_terima,
            pengirim: f.pengirim,
            perihal: f.perihal,
            isi_singkat: f.isi_singkat,
            kategori_id: self.kategori_id,
            priority: self.priority,
            ocr_text: ocr_text.and_then(non_blank),
            ocr_confidence,
        })
    }

    pub fn to_create(&self) -> Result<CreateSuratMasuk, FormErrors> {
        let f = self.checked()?;
        Ok(CreateSuratMasuk {
            nomor_surat: f.nomor_surat,
            tanggal_surat: f.tanggal_surat,
            tanggal_terima: f.tanggal_terima,
            pengirim: f.pengirim,
            perihal: f.perihal,
            isi_singkat: f.isi_singkat,
            kategori_id: self.kategori_id,
            status: None,
            priority: self.priority,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuratMasukEdit {
    pub fields: SuratMasukReview,
    pub status: SuratStatus,
}

impl SuratMasukEdit {
    pub fn from_surat(surat: &SuratMasuk) -> Self {
        Self {
            fields: SuratMasukReview {
                nomor_surat: surat.nomor_surat.clone(),
                tanggal_surat: date_input(surat.tanggal_surat),
                tanggal_terima: date_input(surat.tanggal_terima),
                pengirim: surat.pengirim.clone(),
                perihal: surat.perihal.clone(),
                isi_singkat: surat.isi_singkat.clone().unwrap_or_default(),
                kategori_id: surat.kategori_id,
                priority: surat.priority,
            },
            status: surat.status,
        }
    }

    pub fn validate(&self) -> Result<UpdateSuratMasuk, FormErrors> {
        let f = self.fields.checked()?;
        Ok(UpdateSuratMasuk {
            nomor_surat: f.nomor_surat,
            tanggal_surat: Some(f.tanggal_surat),
            tanggal_terima: Some(f.tanggal_terima),
            pengirim: Some(f.pengirim),
            perihal: Some(f.perihal),
            isi_singkat: Some(f.isi_singkat.unwrap_or_default()),
            kategori_id: self.fields.kategori_id,
            status: Some(self.status),
            priority: Some(self.fields.priority),
        })
    }
}

/// Review step of outgoing-letter intake. Also used as the body of the edit form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuratKeluarReview {
    pub tanggal_surat: String,
    pub penerima: String,
    pub perihal: String,
    pub tembusan: String,
    pub isi_singkat: String,
    pub kategori_id: Option<i64>,
    pub priority: Priority,
}

struct KeluarFields {
    tanggal_surat: NaiveDate,
    penerima: String,
    perihal: String,
    tembusan: Option<String>,
    isi_singkat: Option<String>,
}

impl SuratKeluarReview {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            tanggal_surat: date_input(today),
            ..Default::default()
        }
    }

    fn checked(&self) -> Result<KeluarFields, FormErrors> {
        let mut errors = FormErrors::new();
        let tanggal_surat = require_date(
            &mut errors,
            "tanggal_surat",
            &self.tanggal_surat,
            "Tanggal surat wajib diisi",
            NaiveDate::default(),
        );
        let penerima = require(&mut errors, "penerima", &self.penerima, "Penerima wajib diisi");
        let perihal = require(&mut errors, "perihal", &self.perihal, "Perihal wajib diisi");
        errors.finish(|| KeluarFields {
            tanggal_surat,
            penerima,
            perihal,
            tembusan: non_blank(&self.tembusan),
            isi_singkat: non_blank(&self.isi_singkat),
        })
    }

    pub fn to_confirm(
        &self,
        file_token: &str,
        ocr_text: Option<&str>,
        ocr_confidence: Option<f64>,
    ) -> Result<ConfirmSuratKeluar, FormErrors> {
        let f = self.checked()?;
        Ok(ConfirmSuratKeluar {
            file_token: file_token.to_string(),
            tanggal_surat: f.tanggal_surat,
            penerima: f.penerima,
            perihal: f.perihal,
            tembusan: f.tembusan,
            isi_singkat: f.isi_singkat,
            kategori_id: self.kategori_id,
            priority: self.priority,
            ocr_text: ocr_text.and_then(non_blank),
            ocr_confidence,
        })
    }

    pub fn to_create(&self) -> Result<CreateSuratKeluar, FormErrors> {
        let f = self.checked()?;
        Ok(CreateSuratKeluar {
            tanggal_surat: f.tanggal_surat,
            penerima: f.penerima,
            perihal: f.perihal,
            tembusan: f.tembusan,
            isi_singkat: f.isi_singkat,
            kategori_id: self.kategori_id,
            status: None,
            priority: self.priority,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuratKeluarEdit {
    pub fields: SuratKeluarReview,
    pub status: SuratStatus,
}

impl SuratKeluarEdit {
    pub fn from_surat(surat: &SuratKeluar) -> Self {
        Self {
            fields: SuratKeluarReview {
                tanggal_surat: date_input(surat.tanggal_surat),
                penerima: surat.penerima.clone(),
                perihal: surat.perihal.clone(),
                tembusan: surat.tembusan.clone().unwrap_or_default(),
                isi_singkat: surat.isi_singkat.clone().unwrap_or_default(),
                kategori_id: surat.kategori_id,
                priority: surat.priority,
            },
            status: surat.status,
        }
    }

    pub fn validate(&self) -> Result<UpdateSuratKeluar, FormErrors> {
        let f = self.fields.checked()?;
        Ok(UpdateSuratKeluar {
            tanggal_surat: Some(f.tanggal_surat),
            penerima: Some(f.penerima),
            perihal: Some(f.perihal),
            tembusan: Some(f.tembusan.unwrap_or_default()),
            isi_singkat: Some(f.isi_singkat.unwrap_or_default()),
            kategori_id: self.fields.kategori_id,
            status: Some(self.status),
            priority: Some(self.fields.priority),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn test_masuk_required_fields() {
        let form = SuratMasukReview {
            tanggal_surat: String::new(),
            tanggal_terima: "kemarin".into(),
            ..Default::default()
        };
        let errors = form.to_create().unwrap_err();
        assert_eq!(errors.get("tanggal_surat"), Some("Tanggal surat wajib diisi"));
        assert_eq!(errors.get("tanggal_terima"), Some("Format tanggal tidak valid"));
        assert_eq!(errors.get("pengirim"), Some("Pengirim wajib diisi"));
        assert_eq!(errors.get("perihal"), Some("Perihal wajib diisi"));
        assert!(errors.get("nomor_surat").is_none());
    }

    #[test]
    fn test_masuk_confirm_payload() {
        let form = SuratMasukReview {
            nomor_surat: " ".into(),
            pengirim: "Dinas Sosial".into(),
            perihal: "Permohonan Data".into(),
            kategori_id: Some(2),
            priority: Priority::Urgent,
            ..SuratMasukReview::blank(today())
        };
        let payload = form.to_confirm("ft-7", Some(""), Some(72.5)).unwrap();
        assert_eq!(payload.file_token, "ft-7");
        assert_eq!(payload.nomor_surat, None);
        assert_eq!(payload.tanggal_terima, today());
        assert_eq!(payload.ocr_text, None);
        assert_eq!(payload.ocr_confidence, Some(72.5));
        assert_eq!(payload.priority, Priority::Urgent);
    }

    #[test]
    fn test_keluar_edit_round_trip_from_record() {
        let surat: SuratKeluar = serde_json::from_str(
            r#"{"id":3,"nomor_surat_keluar":"SK/3","tanggal_surat":"2024-06-01","penerima":"Bupati",
                "perihal":"Balasan","tembusan":"Arsip","status":"proses","priority":"tinggi","created_at":""}"#,
        )
        .unwrap();
        let mut edit = SuratKeluarEdit::from_surat(&surat);
        assert_eq!(edit.fields.tanggal_surat, "2024-06-01");

        edit.fields.tembusan.clear();
        edit.status = SuratStatus::Selesai;
        let update = edit.validate().unwrap();
        assert_eq!(update.tembusan.as_deref(), Some(""));
        assert_eq!(update.status, Some(SuratStatus::Selesai));
        assert_eq!(update.penerima.as_deref(), Some("Bupati"));
    }

    #[test]
    fn test_keluar_blank_needs_recipient() {
        let errors = SuratKeluarReview::blank(today()).to_create().unwrap_err();
        assert_eq!(errors.get("penerima"), Some("Penerima wajib diisi"));
        assert!(errors.get("tanggal_surat").is_none());
    }
}
