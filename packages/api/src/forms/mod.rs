//! # Form validation
//!
//! Each form is a plain struct of the raw input values a page binds to. Its
//! `validate` method either builds the request payload for the matching
//! service call or returns [`FormErrors`], one message per offending field.
//!
//! | Form | Payload |
//! |------|---------|
//! | [`LoginForm`] | [`Credentials`] |
//! | [`ChangePasswordForm`] | [`ChangePassword`](crate::models::ChangePassword) |
//! | [`ProfileForm`] | [`UpdateProfile`](crate::models::UpdateProfile) |
//! | [`UserForm`] | [`CreateUser`](crate::models::CreateUser) / [`UpdateUser`](crate::models::UpdateUser) |
//! | [`KategoriForm`] | [`CreateKategori`](crate::models::CreateKategori) / [`UpdateKategori`](crate::models::UpdateKategori) |
//! | [`SuratMasukReview`] / [`SuratKeluarReview`] | confirm or direct-create payloads |
//! | [`SuratMasukEdit`] / [`SuratKeluarEdit`] | update payloads |
//! | [`DisposisiForm`] / [`CompleteDisposisiForm`] | disposition payloads |
//! | [`AppSettingForm`] | normalised setting value |
//!
//! Messages are in Indonesian, the language of the console.

mod account;
mod disposisi;
mod kategori;
mod setting;
mod surat;

pub use account::{ChangePasswordForm, Credentials, LoginForm, ProfileForm, UserForm};
pub use disposisi::{CompleteDisposisiForm, DisposisiForm};
pub use kategori::{slugify, KategoriForm};
pub use setting::AppSettingForm;
pub use surat::{SuratKeluarEdit, SuratKeluarReview, SuratMasukEdit, SuratMasukReview};

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

/// Validation failures keyed by field name. Only the first message per field
/// is kept.
#[derive(Error, Debug, Clone, Default, PartialEq)]
#[error("Periksa kembali isian form")]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// `Ok(build())` when no errors were collected.
    pub(crate) fn finish<T>(self, build: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(build())
        } else {
            Err(self)
        }
    }
}

/// Trimmed value, or `None` when blank.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn require(errors: &mut FormErrors, field: &'static str, value: &str, message: &str) -> String {
    match non_blank(value) {
        Some(v) => v,
        None => {
            errors.add(field, message);
            String::new()
        }
    }
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// A required ISO date. Returns `fallback` when invalid so payload building can
/// proceed; the error makes sure it is never sent.
pub(crate) fn require_date(
    errors: &mut FormErrors,
    field: &'static str,
    value: &str,
    missing: &str,
    fallback: NaiveDate,
) -> NaiveDate {
    if value.trim().is_empty() {
        errors.add(field, missing);
        return fallback;
    }
    match parse_date(value) {
        Some(date) => date,
        None => {
            errors.add(field, "Format tanggal tidak valid");
            fallback
        }
    }
}

pub(crate) fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|part| !part.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_wins() {
        let mut errors = FormErrors::new();
        errors.add("email", "Email wajib diisi");
        errors.add("email", "Email tidak valid");
        assert_eq!(errors.get("email"), Some("Email wajib diisi"));
        assert_eq!(errors.len(), 1);
        assert!(errors.finish(|| ()).is_err());
    }

    #[test]
    fn test_email_check() {
        assert!(is_valid_email("admin@arsip.go.id"));
        assert!(is_valid_email("  a.b@c.id "));
        assert!(!is_valid_email("admin"));
        assert!(!is_valid_email("admin@local"));
        assert!(!is_valid_email("@arsip.go.id"));
        assert!(!is_valid_email("a@b..id"));
        assert!(!is_valid_email("a b@c.id"));
    }

    #[test]
    fn test_dates() {
        let fallback = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut errors = FormErrors::new();
        let parsed = require_date(&mut errors, "tanggal_surat", "2024-05-06", "wajib", fallback);
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
        assert!(errors.is_empty());

        require_date(&mut errors, "tanggal_surat", "06/05/2024", "wajib", fallback);
        require_date(&mut errors, "tanggal_terima", " ", "Tanggal terima wajib diisi", fallback);
        assert_eq!(errors.get("tanggal_surat"), Some("Format tanggal tidak valid"));
        assert_eq!(errors.get("tanggal_terima"), Some("Tanggal terima wajib diisi"));
    }
}
