//! Pieces shared by the incoming and outgoing letter pages.

use api::models::{
    Kategori, KategoriQuery, Priority, ReportFormat, ReportParams, SuratKeluarQuery, SuratMasukQuery, SuratStatus,
    SuratType, UploadFile,
};
use dioxus::prelude::*;

use crate::auth::use_api;
use crate::components::{Input, Select, SelectOption};
use crate::icons::{FaDownload, FaFileExcel, FaFilePdf, FaMagnifyingGlass};
use crate::platform::save_file;
use crate::toast::use_toast;
use crate::Icon;

/// Active categories for filters and form selects. A failed load leaves the
/// list empty; the page stays usable without categories.
pub fn use_active_kategori() -> Resource<Vec<Kategori>> {
    let api = use_api();
    use_resource(move || {
        let api = api.clone();
        async move {
            api.kategori()
                .list(&KategoriQuery::active())
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!("Failed to load categories: {}", e);
                    Vec::new()
                })
        }
    })
}

pub fn kategori_options(kategori: &[Kategori]) -> Vec<SelectOption> {
    kategori
        .iter()
        .map(|k| SelectOption::new(k.id.to_string(), k.nama.clone()))
        .collect()
}

pub fn status_options() -> Vec<SelectOption> {
    SuratStatus::ALL
        .into_iter()
        .map(|s| SelectOption::new(s.as_str(), s.label()))
        .collect()
}

pub fn priority_options() -> Vec<SelectOption> {
    Priority::ALL
        .into_iter()
        .map(|p| SelectOption::new(p.as_str(), p.label()))
        .collect()
}

/// Select value for an optional id: empty string for none.
pub fn id_value(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

pub fn parse_id(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Client-side filters of a letter list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuratFilter {
    pub search: String,
    pub kategori_id: Option<i64>,
    pub status: Option<SuratStatus>,
    pub priority: Option<Priority>,
}

impl SuratFilter {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.kategori_id.is_some() || self.status.is_some() || self.priority.is_some()
    }

    /// Whether a letter passes. `haystack` holds the searchable texts.
    pub fn matches(
        &self,
        haystack: &[&str],
        kategori_id: Option<i64>,
        status: SuratStatus,
        priority: Priority,
    ) -> bool {
        let needle = self.search.trim().to_lowercase();
        let text_ok = needle.is_empty() || haystack.iter().any(|h| h.to_lowercase().contains(&needle));
        text_ok
            && self.kategori_id.map_or(true, |id| kategori_id == Some(id))
            && self.status.map_or(true, |s| s == status)
            && self.priority.map_or(true, |p| p == priority)
    }

    /// Server-side part of the filter. Free-text search runs locally so
    /// typing does not trigger a request per keystroke.
    pub fn masuk_query(&self, limit: u32) -> SuratMasukQuery {
        SuratMasukQuery {
            limit: Some(limit),
            kategori_id: self.kategori_id,
            status: self.status,
            priority: self.priority,
            ..Default::default()
        }
    }

    pub fn keluar_query(&self, limit: u32) -> SuratKeluarQuery {
        SuratKeluarQuery {
            limit: Some(limit),
            kategori_id: self.kategori_id,
            status: self.status,
            priority: self.priority,
            ..Default::default()
        }
    }

    pub fn report_params(&self) -> ReportParams {
        ReportParams {
            kategori_id: self.kategori_id,
            ..Default::default()
        }
    }
}

/// Search box and the three select filters above a letter table.
#[component]
pub fn SuratFilterBar(
    filter: Signal<SuratFilter>,
    kategori: Vec<Kategori>,
    #[props(into)] placeholder: String,
    /// Called after any change so the table can go back to the first page.
    on_change: EventHandler<()>,
) -> Element {
    let mut filter = filter;
    let current = filter();
    rsx! {
        div {
            class: "filter-bar",
            div {
                class: "filter-search",
                Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                Input {
                    value: current.search.clone(),
                    placeholder,
                    oninput: move |v: String| {
                        filter.write().search = v;
                        on_change.call(());
                    },
                }
            }
            Select {
                value: id_value(current.kategori_id),
                options: kategori_options(&kategori),
                placeholder: "Semua Kategori",
                onchange: move |v: String| {
                    filter.write().kategori_id = parse_id(&v);
                    on_change.call(());
                },
            }
            Select {
                value: current.status.map(|s| s.as_str()).unwrap_or_default(),
                options: status_options(),
                placeholder: "Semua Status",
                onchange: move |v: String| {
                    filter.write().status = SuratStatus::parse(&v);
                    on_change.call(());
                },
            }
            Select {
                value: current.priority.map(|p| p.as_str()).unwrap_or_default(),
                options: priority_options(),
                placeholder: "Semua Prioritas",
                onchange: move |v: String| {
                    filter.write().priority = Priority::parse(&v);
                    on_change.call(());
                },
            }
            if current.is_active() {
                button {
                    class: "btn btn-ghost btn-sm",
                    onclick: move |_| {
                        filter.set(SuratFilter::default());
                        on_change.call(());
                    },
                    "Reset"
                }
            }
        }
    }
}

/// Excel and PDF export of a register.
#[component]
pub fn ExportButtons(kind: SuratType, params: ReportParams) -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut busy = use_signal(|| Option::<ReportFormat>::None);

    let export = use_callback(move |format: ReportFormat| {
        let api = api.clone();
        let params = params.clone();
        busy.set(Some(format));
        spawn(async move {
            match api.reports().export(kind, format, &params).await {
                Ok(file) => match save_file(&file.filename, &file.mime, &file.bytes) {
                    Ok(_) => toast.success(format!("Laporan {} berhasil diunduh", format.label())),
                    Err(e) => toast.error(format!("Gagal menyimpan laporan: {e}")),
                },
                Err(e) => toast.error(e.user_message("Gagal mengekspor laporan")),
            }
            busy.set(None);
        });
    });

    rsx! {
        button {
            class: "btn btn-outline",
            disabled: busy().is_some(),
            onclick: move |_| export.call(ReportFormat::Excel),
            Icon { icon: FaFileExcel, width: 14, height: 14 }
            if busy() == Some(ReportFormat::Excel) { "Mengekspor..." } else { "Excel" }
        }
        button {
            class: "btn btn-outline",
            disabled: busy().is_some(),
            onclick: move |_| export.call(ReportFormat::Pdf),
            Icon { icon: FaFilePdf, width: 14, height: 14 }
            if busy() == Some(ReportFormat::Pdf) { "Mengekspor..." } else { "PDF" }
        }
    }
}

/// Downloads the stored document of a letter.
#[component]
pub fn DownloadFileButton(kind: SuratType, id: i64, #[props(into)] filename: String) -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut busy = use_signal(|| false);

    let onclick = move |_| {
        let api = api.clone();
        let filename = filename.clone();
        async move {
            busy.set(true);
            let bytes = match kind {
                SuratType::Masuk => api.surat_masuk().download_file(id).await,
                SuratType::Keluar => api.surat_keluar().download_file(id).await,
            };
            busy.set(false);
            match bytes {
                Ok(bytes) => {
                    let mime = UploadFile::new(filename.clone(), Vec::new()).mime;
                    if let Err(e) = save_file(&filename, &mime, &bytes) {
                        toast.error(format!("Gagal menyimpan file: {e}"));
                    }
                }
                Err(e) => toast.error(e.user_message("Gagal mengunduh file")),
            }
        }
    };

    rsx! {
        button {
            class: "btn btn-outline",
            disabled: busy(),
            onclick: onclick,
            Icon { icon: FaDownload, width: 14, height: 14 }
            if busy() { "Mengunduh..." } else { "Unduh File" }
        }
    }
}
