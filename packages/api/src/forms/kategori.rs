use crate::models::{default_color, CreateKategori, Kategori, UpdateKategori};

use super::{non_blank, require, FormErrors};

/// Lowercase kebab-case slug from a display name: `"Surat Undangan"` → `"surat-undangan"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

fn is_kebab(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[derive(Clone, Debug, PartialEq)]
pub struct KategoriForm {
    pub nama: String,
    pub slug: String,
    pub deskripsi: String,
    pub color: String,
    pub is_active: bool,
}

impl Default for KategoriForm {
    fn default() -> Self {
        Self {
            nama: String::new(),
            slug: String::new(),
            deskripsi: String::new(),
            color: default_color(),
            is_active: true,
        }
    }
}

impl KategoriForm {
    pub fn from_kategori(kategori: &Kategori) -> Self {
        Self {
            nama: kategori.nama.clone(),
            slug: kategori.slug.clone(),
            deskripsi: kategori.deskripsi.clone().unwrap_or_default(),
            color: kategori.color.clone(),
            is_active: kategori.is_active,
        }
    }

    fn checked(&self) -> Result<(String, String, String), FormErrors> {
        let mut errors = FormErrors::new();
        let nama = require(&mut errors, "nama", &self.nama, "Nama kategori wajib diisi");
        let slug = non_blank(&self.slug).unwrap_or_else(|| slugify(&nama));
        if !nama.is_empty() && !is_kebab(&slug) {
            errors.add("slug", "Slug hanya boleh huruf kecil, angka dan tanda hubung");
        }
        let color = self.color.trim().to_uppercase();
        if !is_hex_color(&color) {
            errors.add("color", "Warna harus berformat #RRGGBB");
        }
        errors.finish(|| (nama, slug, color))
    }

    pub fn validate_create(&self) -> Result<CreateKategori, FormErrors> {
        let (nama, slug, color) = self.checked()?;
        Ok(CreateKategori {
            nama,
            slug,
            deskripsi: non_blank(&self.deskripsi),
            color,
        })
    }

    pub fn validate_update(&self) -> Result<UpdateKategori, FormErrors> {
        let (nama, slug, color) = self.checked()?;
        Ok(UpdateKategori {
            nama: Some(nama),
            slug: Some(slug),
            deskripsi: Some(self.deskripsi.trim().to_string()),
            color: Some(color),
            is_active: Some(self.is_active),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Surat Undangan"), "surat-undangan");
        assert_eq!(slugify("  Nota / Dinas  "), "nota-dinas");
        assert_eq!(slugify("SK 2024!"), "sk-2024");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_slug_derived_when_blank() {
        let form = KategoriForm {
            nama: "Surat Edaran".into(),
            color: "#2563eb".into(),
            ..Default::default()
        };
        let payload = form.validate_create().unwrap();
        assert_eq!(payload.slug, "surat-edaran");
        assert_eq!(payload.color, "#2563EB");
        assert_eq!(payload.deskripsi, None);
    }

    #[test]
    fn test_rejects_bad_slug_and_color() {
        let form = KategoriForm {
            nama: "Undangan".into(),
            slug: "Undangan Rapat".into(),
            color: "blue".into(),
            ..Default::default()
        };
        let errors = form.validate_create().unwrap_err();
        assert!(errors.get("slug").is_some());
        assert_eq!(errors.get("color"), Some("Warna harus berformat #RRGGBB"));

        let missing = KategoriForm::default().validate_update().unwrap_err();
        assert_eq!(missing.get("nama"), Some("Nama kategori wajib diisi"));
        assert!(missing.get("slug").is_none());
    }
}
