//! # File and multipart payloads
//!
//! [`UploadFile`] is a document picked by the user, held in memory until it is
//! sent as the `file` part of a multipart request. [`FormFields`] collects the
//! text parts of such a request; optional values that are absent or blank are
//! left out entirely, matching what the API expects from browser forms.
//! [`ExportedFile`] is what a report export hands back to the UI for download.

use reqwest::multipart::{Form, Part};

/// Extensions the intake drop zone accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["pdf", "png", "jpg", "jpeg"];

/// The `accept` attribute for file inputs.
pub const ACCEPT_ATTR: &str = ".pdf,.png,.jpg,.jpeg,application/pdf,image/png,image/jpeg";

#[derive(Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl UploadFile {
    /// Wrap file contents, inferring the MIME type from the extension.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = mime_for(&name).to_string();
        Self { name, mime, bytes }
    }

    pub fn extension(&self) -> String {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default()
    }

    pub fn is_accepted(&self) -> bool {
        ACCEPTED_EXTENSIONS.contains(&self.extension().as_str())
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub(crate) fn to_part(&self) -> Part {
        let part = Part::bytes(self.bytes.clone()).file_name(self.name.clone());
        match part.mime_str(&self.mime) {
            Ok(part) => part,
            Err(_) => Part::bytes(self.bytes.clone()).file_name(self.name.clone()),
        }
    }
}

fn mime_for(name: &str) -> &'static str {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".pdf") {
        "application/pdf"
    } else if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else {
        "application/octet-stream"
    }
}

/// Ordered text parts of a multipart request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormFields(Vec<(&'static str, String)>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &'static str, value: impl ToString) -> Self {
        self.0.push((name, value.to_string()));
        self
    }

    /// Add the field only when present and not blank.
    pub fn optional<T: ToString>(mut self, name: &'static str, value: Option<T>) -> Self {
        if let Some(value) = value.map(|v| v.to_string()) {
            if !value.trim().is_empty() {
                self.0.push((name, value));
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|(n, _)| *n).collect()
    }

    /// Build the multipart form, with `file` appended last when given.
    pub(crate) fn into_form(self, file: Option<&UploadFile>) -> Form {
        let form = self
            .0
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));
        match file {
            Some(file) => form.part("file", file.to_part()),
            None => form,
        }
    }
}

/// A downloaded file ready to be saved by the UI.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportedFile {
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Human-readable file size (`"512 B"`, `"1.5 KB"`, `"2.0 MB"`).
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_types() {
        assert!(UploadFile::new("surat.PDF", vec![]).is_accepted());
        assert!(UploadFile::new("scan.jpeg", vec![]).is_accepted());
        assert!(!UploadFile::new("notes.docx", vec![]).is_accepted());
        assert!(!UploadFile::new("README", vec![]).is_accepted());
    }

    #[test]
    fn test_mime_inference() {
        assert_eq!(UploadFile::new("a.pdf", vec![]).mime, "application/pdf");
        assert_eq!(UploadFile::new("a.JPG", vec![]).mime, "image/jpeg");
        assert_eq!(UploadFile::new("a.png", vec![]).mime, "image/png");
    }

    #[test]
    fn test_optional_fields_skip_blank() {
        let fields = FormFields::new()
            .text("perihal", "Undangan")
            .optional("nomor_surat", Some("  "))
            .optional("kategori_id", None::<i64>)
            .optional("ocr_confidence", Some(91.5));
        assert_eq!(fields.names(), vec!["perihal", "ocr_confidence"]);
        assert_eq!(fields.get("ocr_confidence"), Some("91.5"));
        assert_eq!(fields.get("nomor_surat"), None);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(2 * 1024 * 1024), "2.0 MB");
    }
}
