//! # OCR detection results
//!
//! `POST /surat-masuk/detect` and `POST /surat-keluar/detect` accept a file and
//! a detection method, store the upload server-side under a `file_token`, and
//! return the extracted text plus one [`DetectedField`] per form field. The
//! field set differs per register ([`DetectedMasuk`], [`DetectedKeluar`]); the
//! envelope ([`DetectResult`]) is shared.

use serde::{Deserialize, Serialize};

/// One extracted value and whether the detector is confident it found it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedField {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub detected: bool,
}

impl DetectedField {
    /// The extracted value, if non-blank. Returned even when `detected` is
    /// false so the reviewer can see low-confidence guesses.
    pub fn text(&self) -> Option<&str> {
        self.value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}

/// Error reported by the AI extractor (e.g. quota or auth failures upstream).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiError {
    pub code: u16,
    pub message: String,
}

/// Field-set trait so the intake flow can count detections generically.
pub trait DetectedFields {
    fn fields(&self) -> Vec<&DetectedField>;

    fn summary(&self) -> (usize, usize) {
        let fields = self.fields();
        let detected = fields.iter().filter(|f| f.detected).count();
        (detected, fields.len())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectResult<F> {
    pub file_token: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub original_filename: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub ocr_text: String,
    #[serde(default)]
    pub ocr_confidence: Option<f64>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub detected: F,
    #[serde(default)]
    pub ai_error: Option<AiError>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedMasuk {
    #[serde(default)]
    pub nomor_surat: DetectedField,
    #[serde(default)]
    pub tanggal_surat: DetectedField,
    #[serde(default)]
    pub pengirim: DetectedField,
    #[serde(default)]
    pub perihal: DetectedField,
    #[serde(default)]
    pub isi_singkat: Option<DetectedField>,
}

impl DetectedFields for DetectedMasuk {
    fn fields(&self) -> Vec<&DetectedField> {
        let mut fields = vec![
            &self.nomor_surat,
            &self.tanggal_surat,
            &self.pengirim,
            &self.perihal,
        ];
        fields.extend(self.isi_singkat.as_ref());
        fields
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedKeluar {
    #[serde(default)]
    pub penerima: DetectedField,
    #[serde(default)]
    pub perihal: DetectedField,
    #[serde(default)]
    pub tanggal_surat: DetectedField,
    #[serde(default)]
    pub isi_singkat: Option<DetectedField>,
}

impl DetectedFields for DetectedKeluar {
    fn fields(&self) -> Vec<&DetectedField> {
        let mut fields = vec![&self.penerima, &self.perihal, &self.tanggal_surat];
        fields.extend(self.isi_singkat.as_ref());
        fields
    }
}

pub type DetectMasukResult = DetectResult<DetectedMasuk>;
pub type DetectKeluarResult = DetectResult<DetectedKeluar>;

/// Result of re-running OCR on a stored letter.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OcrResult {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub suggested_kategori_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_optional_field() {
        let json = r#"{
            "file_token": "tok-1",
            "ocr_text": "SURAT UNDANGAN",
            "ocr_confidence": 87.5,
            "keywords": ["undangan"],
            "detected": {
                "nomor_surat": {"value": "005/UND/2024", "detected": true},
                "tanggal_surat": {"value": null, "detected": false},
                "pengirim": {"value": "Dinas Pendidikan", "detected": true},
                "perihal": {"value": "Undangan Rapat", "detected": true},
                "isi_singkat": {"value": "", "detected": false}
            }
        }"#;
        let result: DetectMasukResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.detected.summary(), (3, 5));
        assert!(result.ai_error.is_none());
        assert_eq!(result.detected.nomor_surat.text(), Some("005/UND/2024"));
        assert_eq!(result.detected.tanggal_surat.text(), None);
    }

    #[test]
    fn test_keluar_without_isi_singkat() {
        let json = r#"{
            "file_token": "tok-2",
            "detected": {
                "penerima": {"value": "Bupati", "detected": true},
                "perihal": {"value": null, "detected": false},
                "tanggal_surat": {"value": "2024-03-01", "detected": true}
            },
            "ai_error": {"code": 429, "message": "rate limited"}
        }"#;
        let result: DetectKeluarResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.detected.summary(), (2, 3));
        assert_eq!(result.ai_error.unwrap().code, 429);
    }

    #[test]
    fn test_low_confidence_value_is_kept() {
        let field = DetectedField {
            value: Some(" maybe ".into()),
            detected: false,
        };
        assert_eq!(field.text(), Some("maybe"));
        assert_eq!(DetectedField::default().text(), None);
    }
}
