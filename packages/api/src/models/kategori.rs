use serde::{Deserialize, Serialize};

/// Letter category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Kategori {
    pub id: i64,
    pub nama: String,
    #[serde(default, alias = "kode")]
    pub slug: String,
    #[serde(default)]
    pub deskripsi: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
}

/// The short category reference embedded in letter responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KategoriRef {
    pub id: i64,
    pub nama: String,
    #[serde(default, alias = "kode")]
    pub slug: String,
    #[serde(default)]
    pub color: Option<String>,
}

pub(crate) fn default_color() -> String {
    "#6B7280".to_string()
}

fn default_active() -> bool {
    true
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct KategoriQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl KategoriQuery {
    pub fn active() -> Self {
        Self {
            is_active: Some(true),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateKategori {
    pub nama: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,
    pub color: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateKategori {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nama: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Name of the category with `id`, or `"-"` when unknown.
pub fn kategori_name(kategori: &[Kategori], id: Option<i64>) -> &str {
    id.and_then(|id| kategori.iter().find(|k| k.id == id))
        .map(|k| k.nama.as_str())
        .unwrap_or("-")
}
