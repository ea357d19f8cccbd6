use chrono::NaiveDate;

use crate::models::{CompleteDisposisi, CreateDisposisi, SuratType};

use super::{non_blank, parse_date, require, FormErrors};

/// Routing dialog opened from a letter's detail page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisposisiForm {
    pub to_user_id: Option<i64>,
    pub instruksi: String,
    pub keterangan: String,
    /// ISO date, blank for no deadline.
    pub deadline: String,
}

impl DisposisiForm {
    pub fn validate(&self, surat_type: SuratType, surat_id: i64, today: NaiveDate) -> Result<CreateDisposisi, FormErrors> {
        let mut errors = FormErrors::new();
        if self.to_user_id.is_none() {
            errors.add("to_user_id", "Tujuan disposisi wajib diisi");
        }
        let instruksi = require(&mut errors, "instruksi", &self.instruksi, "Instruksi wajib diisi");
        let deadline = match non_blank(&self.deadline) {
            None => None,
            Some(raw) => match parse_date(&raw) {
                Some(date) if date < today => {
                    errors.add("deadline", "Batas waktu tidak boleh sebelum hari ini");
                    None
                }
                Some(date) => Some(date),
                None => {
                    errors.add("deadline", "Format tanggal tidak valid");
                    None
                }
            },
        };
        errors.finish(|| CreateDisposisi {
            surat_type,
            surat_masuk_id: (surat_type == SuratType::Masuk).then_some(surat_id),
            surat_keluar_id: (surat_type == SuratType::Keluar).then_some(surat_id),
            to_user_id: self.to_user_id.unwrap_or_default(),
            instruksi,
            keterangan: non_blank(&self.keterangan),
            deadline,
        })
    }
}

/// Closing note when marking a disposition done.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompleteDisposisiForm {
    pub keterangan: String,
}

impl CompleteDisposisiForm {
    pub fn validate(&self) -> Result<CompleteDisposisi, FormErrors> {
        let mut errors = FormErrors::new();
        let keterangan = require(
            &mut errors,
            "keterangan",
            &self.keterangan,
            "Catatan penyelesaian wajib diisi",
        );
        errors.finish(|| CompleteDisposisi { keterangan })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn test_requires_target_and_instruction() {
        let errors = DisposisiForm::default()
            .validate(SuratType::Masuk, 1, today())
            .unwrap_err();
        assert_eq!(errors.get("to_user_id"), Some("Tujuan disposisi wajib diisi"));
        assert_eq!(errors.get("instruksi"), Some("Instruksi wajib diisi"));
    }

    #[test]
    fn test_deadline_not_in_past() {
        let mut form = DisposisiForm {
            to_user_id: Some(3),
            instruksi: "Hadiri".into(),
            keterangan: " ".into(),
            deadline: "2024-05-09".into(),
        };
        assert_eq!(
            form.validate(SuratType::Masuk, 1, today()).unwrap_err().get("deadline"),
            Some("Batas waktu tidak boleh sebelum hari ini")
        );

        form.deadline = "2024-05-10".into();
        let payload = form.validate(SuratType::Keluar, 8, today()).unwrap();
        assert_eq!(payload.deadline, Some(today()));
        assert_eq!(payload.surat_keluar_id, Some(8));
        assert_eq!(payload.surat_masuk_id, None);
        assert_eq!(payload.keterangan, None);
    }

    #[test]
    fn test_complete_requires_note() {
        assert!(CompleteDisposisiForm::default().validate().is_err());
        let ok = CompleteDisposisiForm {
            keterangan: " Selesai dikerjakan ".into(),
        };
        assert_eq!(ok.validate().unwrap().keterangan, "Selesai dikerjakan");
    }
}
