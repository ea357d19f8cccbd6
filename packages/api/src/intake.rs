//! # Letter intake
//!
//! Entering a letter is a three-step flow shared by both registers:
//!
//! ```text
//! Upload ──file──▶ Scanning ──detect ok──▶ Review ──confirm──▶ (saved)
//!    ▲                 │
//!    └───detect err────┘
//! ```
//!
//! [`Intake`] holds the state of that flow for one page. It does no I/O: the
//! page calls the service's `detect`, then reports the outcome back with
//! [`Intake::detection_succeeded`] or [`Intake::detection_failed`]. On submit,
//! [`Intake::submission`] says which endpoint to use.
//!
//! ## Methods
//!
//! | Method | Detect request | Prefill | Saved via |
//! |--------|----------------|---------|-----------|
//! | `hybrid`, `ai`, `regex` | yes | detected values | confirm (`file_token`) |
//! | `ocr_only` | yes | dates only | confirm (`file_token`) |
//! | `manual` | no | dates only | direct create, with the file if one was dropped |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::forms::{SuratKeluarReview, SuratMasukReview};
use crate::models::{
    DetectResult, DetectedField, DetectedFields, DetectedKeluar, DetectedMasuk, Priority, UploadFile,
};

/// How the backend should extract fields from an uploaded letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    Hybrid,
    Ai,
    Regex,
    OcrOnly,
    Manual,
}

impl DetectionMethod {
    /// Selector order.
    pub const ALL: [DetectionMethod; 5] = [
        DetectionMethod::Hybrid,
        DetectionMethod::Ai,
        DetectionMethod::Regex,
        DetectionMethod::OcrOnly,
        DetectionMethod::Manual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DetectionMethod::Hybrid => "hybrid",
            DetectionMethod::Ai => "ai",
            DetectionMethod::Regex => "regex",
            DetectionMethod::OcrOnly => "ocr_only",
            DetectionMethod::Manual => "manual",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            DetectionMethod::Hybrid => "⚡",
            DetectionMethod::Ai => "🤖",
            DetectionMethod::Regex => "🔍",
            DetectionMethod::OcrOnly => "📄",
            DetectionMethod::Manual => "✍️",
        }
    }

    /// Card title in the method selector.
    pub fn label(self) -> &'static str {
        match self {
            DetectionMethod::Hybrid => "AI + Regex",
            DetectionMethod::Ai => "AI (OpenRouter)",
            DetectionMethod::Regex => "Regex / Pattern",
            DetectionMethod::OcrOnly => "OCR Only",
            DetectionMethod::Manual => "Manual",
        }
    }

    /// Short badge shown next to the file name.
    pub fn badge(self) -> &'static str {
        match self {
            DetectionMethod::Hybrid => "⚡ AI + Regex",
            DetectionMethod::Ai => "🤖 AI",
            DetectionMethod::Regex => "🔍 Regex",
            DetectionMethod::OcrOnly => "📄 OCR Only",
            DetectionMethod::Manual => "✍️ Manual",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DetectionMethod::Hybrid => "AI sebagai primary, regex mengisi field yang masih kosong",
            DetectionMethod::Ai => "Paling akurat, LLM memahami konteks surat secara semantik",
            DetectionMethod::Regex => "Cepat & offline, berbasis pola teks terstruktur",
            DetectionMethod::OcrOnly => "Hanya ekstrak teks mentah, isi form secara manual",
            DetectionMethod::Manual => "Skip OCR & deteksi, langsung ke form kosong",
        }
    }

    pub fn is_recommended(self) -> bool {
        self == DetectionMethod::Hybrid
    }

    pub fn requires_ai(self) -> bool {
        matches!(self, DetectionMethod::Hybrid | DetectionMethod::Ai)
    }

    pub fn is_available(self, ai_available: bool) -> bool {
        ai_available || !self.requires_ai()
    }

    pub fn default_for(ai_available: bool) -> Self {
        if ai_available {
            DetectionMethod::Hybrid
        } else {
            DetectionMethod::Regex
        }
    }

    /// Progress text while the detect request runs.
    pub fn scanning_label(self) -> &'static str {
        match self {
            DetectionMethod::Ai => "Meminta AI menganalisis surat...",
            DetectionMethod::Hybrid => "Meminta AI & regex menganalisis surat...",
            DetectionMethod::Regex => "Menganalisis pola teks surat...",
            DetectionMethod::OcrOnly => "Mengekstrak teks dari dokumen...",
            DetectionMethod::Manual => "",
        }
    }

    fn fills_fields(self) -> bool {
        !matches!(self, DetectionMethod::OcrOnly | DetectionMethod::Manual)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntakeStep {
    #[default]
    Upload,
    Scanning,
    Review,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntakeError {
    #[error("Format file tidak didukung. Gunakan PDF, PNG atau JPG.")]
    UnsupportedFile(String),

    #[error("Hanya satu file yang dapat diunggah")]
    TooManyFiles,

    #[error("Tidak ada file yang dipilih")]
    NoFile,

    #[error("Tidak ada dokumen yang sedang dipindai")]
    NotScanning,
}

/// A detected field set that knows how to fill its review form.
pub trait Prefill: DetectedFields + Sized {
    type Form: Clone + PartialEq + std::fmt::Debug;

    /// Empty form with the dates set to `today`.
    fn blank(today: NaiveDate) -> Self::Form;

    fn prefill(&self, today: NaiveDate) -> Self::Form;
}

/// Detected date when it is a usable ISO date, else `today`.
fn date_or(field: &DetectedField, today: NaiveDate) -> String {
    field
        .text()
        .and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}

fn text_of(field: &DetectedField) -> String {
    field.text().unwrap_or_default().to_string()
}

impl Prefill for DetectedMasuk {
    type Form = SuratMasukReview;

    fn blank(today: NaiveDate) -> SuratMasukReview {
        SuratMasukReview::blank(today)
    }

    fn prefill(&self, today: NaiveDate) -> SuratMasukReview {
        SuratMasukReview {
            nomor_surat: text_of(&self.nomor_surat),
            tanggal_surat: date_or(&self.tanggal_surat, today),
            pengirim: text_of(&self.pengirim),
            perihal: text_of(&self.perihal),
            isi_singkat: self.isi_singkat.as_ref().map(text_of).unwrap_or_default(),
            kategori_id: None,
            priority: Priority::Sedang,
            ..SuratMasukReview::blank(today)
        }
    }
}

impl Prefill for DetectedKeluar {
    type Form = SuratKeluarReview;

    fn blank(today: NaiveDate) -> SuratKeluarReview {
        SuratKeluarReview::blank(today)
    }

    fn prefill(&self, today: NaiveDate) -> SuratKeluarReview {
        SuratKeluarReview {
            tanggal_surat: date_or(&self.tanggal_surat, today),
            penerima: text_of(&self.penerima),
            perihal: text_of(&self.perihal),
            tembusan: String::new(),
            isi_singkat: self.isi_singkat.as_ref().map(text_of).unwrap_or_default(),
            kategori_id: None,
            priority: Priority::Sedang,
        }
    }
}

/// What a file drop asks the page to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextAction {
    /// Call `detect` with the kept file and the current method.
    Detect,
    /// Go straight to the review form.
    Review,
}

/// How the reviewed form should be saved.
#[derive(Debug, PartialEq)]
pub enum Submission<'a> {
    Confirm {
        file_token: &'a str,
        ocr_text: Option<&'a str>,
        ocr_confidence: Option<f64>,
    },
    Create {
        file: Option<&'a UploadFile>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Intake<F: Prefill> {
    method: DetectionMethod,
    step: IntakeStep,
    file: Option<UploadFile>,
    result: Option<DetectResult<F>>,
    form: F::Form,
    today: NaiveDate,
}

impl<F: Prefill> Intake<F> {
    pub fn new(method: DetectionMethod, today: NaiveDate) -> Self {
        Self {
            method,
            step: IntakeStep::Upload,
            file: None,
            result: None,
            form: F::blank(today),
            today,
        }
    }

    pub fn method(&self) -> DetectionMethod {
        self.method
    }

    pub fn step(&self) -> IntakeStep {
        self.step
    }

    pub fn file(&self) -> Option<&UploadFile> {
        self.file.as_ref()
    }

    pub fn result(&self) -> Option<&DetectResult<F>> {
        self.result.as_ref()
    }

    pub fn form(&self) -> &F::Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F::Form {
        &mut self.form
    }

    /// Change the method. Only possible before a file is picked.
    pub fn set_method(&mut self, method: DetectionMethod) -> bool {
        if self.step != IntakeStep::Upload {
            return false;
        }
        self.method = method;
        true
    }

    /// Accept the dropped files. Exactly one PDF/PNG/JPG/JPEG is allowed.
    pub fn select_files(&mut self, mut files: Vec<UploadFile>) -> Result<NextAction, IntakeError> {
        if files.len() > 1 {
            return Err(IntakeError::TooManyFiles);
        }
        match files.pop() {
            Some(file) => self.select_file(file),
            None => Err(IntakeError::NoFile),
        }
    }

    pub fn select_file(&mut self, file: UploadFile) -> Result<NextAction, IntakeError> {
        if !file.is_accepted() {
            tracing::warn!("Rejected upload {}", file.name);
            return Err(IntakeError::UnsupportedFile(file.name));
        }
        self.file = Some(file);
        self.result = None;
        if self.method == DetectionMethod::Manual {
            self.form = F::blank(self.today);
            self.step = IntakeStep::Review;
            Ok(NextAction::Review)
        } else {
            self.step = IntakeStep::Scanning;
            Ok(NextAction::Detect)
        }
    }

    /// Manual entry without a document.
    pub fn open_blank(&mut self) {
        self.method = DetectionMethod::Manual;
        self.file = None;
        self.result = None;
        self.form = F::blank(self.today);
        self.step = IntakeStep::Review;
    }

    pub fn detection_succeeded(&mut self, result: DetectResult<F>) -> Result<(), IntakeError> {
        if self.step != IntakeStep::Scanning {
            return Err(IntakeError::NotScanning);
        }
        self.form = if self.method.fills_fields() {
            result.detected.prefill(self.today)
        } else {
            F::blank(self.today)
        };
        if let Some(err) = &result.ai_error {
            tracing::warn!("AI extraction failed ({}): {}", err.code, err.message);
        }
        self.result = Some(result);
        self.step = IntakeStep::Review;
        Ok(())
    }

    /// Back to the drop zone; the file is discarded.
    pub fn detection_failed(&mut self) {
        self.step = IntakeStep::Upload;
        self.file = None;
        self.result = None;
    }

    /// The "Ganti" button: start over with the same method.
    pub fn retry(&mut self) {
        self.step = IntakeStep::Upload;
        self.file = None;
        self.result = None;
        self.form = F::blank(self.today);
    }

    /// `(detected, total)` when fields were detected.
    pub fn summary(&self) -> Option<(usize, usize)> {
        self.result.as_ref().map(|r| r.detected.summary())
    }

    /// Whether to show detected/not-detected badges next to fields.
    pub fn shows_badges(&self) -> bool {
        self.result.is_some() && self.method.fills_fields()
    }

    pub fn summary_text(&self) -> String {
        match (self.method, self.summary()) {
            (DetectionMethod::Manual, _) | (_, None) => "Isi semua field secara manual".to_string(),
            (DetectionMethod::OcrOnly, _) => "Teks berhasil diekstrak, isi field secara manual".to_string(),
            (_, Some((detected, total))) => format!("{detected}/{total} field berhasil dideteksi otomatis"),
        }
    }

    pub fn all_detected(&self) -> bool {
        self.summary().is_some_and(|(d, t)| d == t)
    }

    /// The endpoint the reviewed form goes to. `None` outside the review step.
    pub fn submission(&self) -> Option<Submission<'_>> {
        if self.step != IntakeStep::Review {
            return None;
        }
        Some(match &self.result {
            Some(result) => Submission::Confirm {
                file_token: &result.file_token,
                ocr_text: Some(result.ocr_text.as_str()).filter(|t| !t.is_empty()),
                ocr_confidence: result.ocr_confidence,
            },
            None => Submission::Create {
                file: self.file.as_ref(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AiError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn field(value: Option<&str>, detected: bool) -> DetectedField {
        DetectedField {
            value: value.map(str::to_string),
            detected,
        }
    }

    fn masuk_result() -> DetectResult<DetectedMasuk> {
        DetectResult {
            file_token: "ft-1".into(),
            file_size: 10,
            original_filename: "scan.pdf".into(),
            mime_type: "application/pdf".into(),
            ocr_text: "UNDANGAN RAPAT".into(),
            ocr_confidence: Some(91.0),
            keywords: vec![],
            detected: DetectedMasuk {
                nomor_surat: field(Some("005/UND/2024"), true),
                tanggal_surat: field(Some("2024-05-02"), true),
                pengirim: field(Some("Dinas Pendidikan"), false),
                perihal: field(None, false),
                isi_singkat: None,
            },
            ai_error: None,
        }
    }

    fn pdf() -> UploadFile {
        UploadFile::new("scan.pdf", b"%PDF".to_vec())
    }

    #[test]
    fn test_default_method() {
        assert_eq!(DetectionMethod::default_for(true), DetectionMethod::Hybrid);
        assert_eq!(DetectionMethod::default_for(false), DetectionMethod::Regex);
        assert!(!DetectionMethod::Ai.is_available(false));
        assert!(DetectionMethod::OcrOnly.is_available(false));
        assert!(DetectionMethod::Hybrid.is_recommended());
        assert_eq!(DetectionMethod::OcrOnly.as_str(), "ocr_only");
    }

    #[test]
    fn test_detect_flow_prefills() {
        let mut intake: Intake<DetectedMasuk> = Intake::new(DetectionMethod::Regex, today());
        assert_eq!(intake.select_file(pdf()), Ok(NextAction::Detect));
        assert_eq!(intake.step(), IntakeStep::Scanning);
        assert!(!intake.set_method(DetectionMethod::Ai));

        intake.detection_succeeded(masuk_result()).unwrap();
        assert_eq!(intake.step(), IntakeStep::Review);

        let form = intake.form();
        assert_eq!(form.nomor_surat, "005/UND/2024");
        assert_eq!(form.tanggal_surat, "2024-05-02");
        assert_eq!(form.tanggal_terima, "2024-05-10");
        // Undetected but non-blank values are still offered for review.
        assert_eq!(form.pengirim, "Dinas Pendidikan");
        assert_eq!(form.perihal, "");
        assert_eq!(form.priority, Priority::Sedang);

        assert_eq!(intake.summary(), Some((2, 4)));
        assert_eq!(intake.summary_text(), "2/4 field berhasil dideteksi otomatis");
        assert!(!intake.all_detected());
        assert_eq!(
            intake.submission(),
            Some(Submission::Confirm {
                file_token: "ft-1",
                ocr_text: Some("UNDANGAN RAPAT"),
                ocr_confidence: Some(91.0),
            })
        );
    }

    #[test]
    fn test_ocr_only_fills_dates_only() {
        let mut intake: Intake<DetectedMasuk> = Intake::new(DetectionMethod::OcrOnly, today());
        intake.select_file(pdf()).unwrap();
        intake.detection_succeeded(masuk_result()).unwrap();
        assert_eq!(intake.form(), &SuratMasukReview::blank(today()));
        assert!(!intake.shows_badges());
        assert_eq!(
            intake.summary_text(),
            "Teks berhasil diekstrak, isi field secara manual"
        );
    }

    #[test]
    fn test_manual_keeps_file_and_creates() {
        let mut intake: Intake<DetectedKeluar> = Intake::new(DetectionMethod::Manual, today());
        assert_eq!(intake.select_file(pdf()), Ok(NextAction::Review));
        assert_eq!(intake.step(), IntakeStep::Review);
        match intake.submission() {
            Some(Submission::Create { file: Some(file) }) => assert_eq!(file.name, "scan.pdf"),
            other => panic!("unexpected submission {other:?}"),
        }

        intake.open_blank();
        assert_eq!(intake.submission(), Some(Submission::Create { file: None }));
    }

    #[test]
    fn test_rejects_unsupported_and_multiple_files() {
        let mut intake: Intake<DetectedMasuk> = Intake::new(DetectionMethod::Regex, today());
        assert_eq!(
            intake.select_file(UploadFile::new("surat.docx", vec![1])),
            Err(IntakeError::UnsupportedFile("surat.docx".into()))
        );
        assert_eq!(
            intake.select_files(vec![pdf(), pdf()]),
            Err(IntakeError::TooManyFiles)
        );
        assert_eq!(intake.select_files(vec![]), Err(IntakeError::NoFile));
        assert_eq!(intake.step(), IntakeStep::Upload);
        assert!(intake.file().is_none());
    }

    #[test]
    fn test_failure_and_retry_return_to_upload() {
        let mut intake: Intake<DetectedMasuk> = Intake::new(DetectionMethod::Regex, today());
        intake.select_file(pdf()).unwrap();
        intake.detection_failed();
        assert_eq!(intake.step(), IntakeStep::Upload);
        assert!(intake.file().is_none());
        assert_eq!(
            intake.detection_succeeded(masuk_result()),
            Err(IntakeError::NotScanning)
        );

        intake.select_file(pdf()).unwrap();
        intake.detection_succeeded(masuk_result()).unwrap();
        intake.form_mut().perihal = "Ubah".into();
        intake.retry();
        assert_eq!(intake.step(), IntakeStep::Upload);
        assert!(intake.result().is_none());
        assert_eq!(intake.form().perihal, "");
        assert!(intake.set_method(DetectionMethod::OcrOnly));
    }

    #[test]
    fn test_keluar_prefill_ignores_non_iso_date() {
        let detected = DetectedKeluar {
            penerima: field(Some("Bupati Lombok"), true),
            perihal: field(Some("Laporan"), true),
            tanggal_surat: field(Some("10 Mei 2024"), true),
            isi_singkat: Some(field(Some("Ringkas"), true)),
        };
        let form = detected.prefill(today());
        assert_eq!(form.tanggal_surat, "2024-05-10");
        assert_eq!(form.penerima, "Bupati Lombok");
        assert_eq!(form.isi_singkat, "Ringkas");
        assert_eq!(detected.summary(), (4, 4));
    }

    #[test]
    fn test_ai_error_still_reviews() {
        let mut intake: Intake<DetectedMasuk> = Intake::new(DetectionMethod::Hybrid, today());
        intake.select_file(pdf()).unwrap();
        let mut result = masuk_result();
        result.ai_error = Some(AiError {
            code: 402,
            message: "quota".into(),
        });
        intake.detection_succeeded(result).unwrap();
        assert_eq!(intake.step(), IntakeStep::Review);
        assert!(intake.result().unwrap().ai_error.is_some());
    }
}
