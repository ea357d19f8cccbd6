use api::models::{format_size, SuratKeluar, SuratType};
use dioxus::prelude::*;

use crate::auth::use_api;
use crate::components::{
    Card, CardContent, CardHeader, ConfirmDialog, DetailRow, EmptyState, ErrorState, KategoriChip, PageHeader,
    PriorityBadge, Spinner, StatusBadge,
};
use crate::format::{format_date, format_timestamp};
use crate::icons::{FaArrowLeft, FaFileSignature, FaPen, FaTrash};
use crate::nav::Page;
use crate::toast::use_toast;
use crate::Icon;

use super::disposisi_dialog::DisposisiDialog;
use super::intake::OcrTextPanel;
use super::surat_common::DownloadFileButton;
use super::surat_masuk_detail::SuratDisposisiCard;

#[component]
pub fn SuratKeluarDetailView(id: i64, on_navigate: EventHandler<Page>) -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut show_dispo = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    let mut current_id = use_signal(|| id);
    if *current_id.peek() != id {
        current_id.set(id);
    }
    let mut surat = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let id = current_id();
            async move { api.surat_keluar().get(id).await }
        }
    });

    let body = match &*surat.read() {
        None => rsx! { Spinner { label: "Memuat surat..." } },
        Some(Err(e)) if e.is_not_found() => rsx! {
            EmptyState {
                title: "Surat tidak ditemukan",
                description: "Surat mungkin sudah dihapus",
                button {
                    class: "btn btn-outline",
                    onclick: move |_| on_navigate.call(Page::SuratKeluar),
                    "Kembali ke daftar"
                }
            }
        },
        Some(Err(e)) => rsx! {
            ErrorState {
                message: e.user_message("Gagal memuat surat keluar"),
                on_retry: move |_| surat.restart(),
            }
        },
        Some(Ok(s)) => {
            let s = s.clone();
            rsx! {
                PageHeader {
                    title: s.perihal.clone(),
                    subtitle: format!("No. {}", s.nomor_surat_keluar),
                    button {
                        class: "btn btn-ghost",
                        onclick: move |_| on_navigate.call(Page::SuratKeluar),
                        Icon { icon: FaArrowLeft, width: 14, height: 14 }
                        "Kembali"
                    }
                    button {
                        class: "btn btn-outline",
                        onclick: move |_| show_dispo.set(true),
                        Icon { icon: FaFileSignature, width: 14, height: 14 }
                        "Disposisi"
                    }
                    button {
                        class: "btn btn-outline",
                        onclick: move |_| on_navigate.call(Page::SuratKeluarEdit(id)),
                        Icon { icon: FaPen, width: 14, height: 14 }
                        "Edit"
                    }
                    button {
                        class: "btn btn-destructive",
                        onclick: move |_| confirm_delete.set(true),
                        Icon { icon: FaTrash, width: 14, height: 14 }
                        "Hapus"
                    }
                }
                div {
                    class: "detail-grid",
                    Card {
                        CardHeader { title: "Informasi Surat" }
                        CardContent { {keluar_fields(&s)} }
                    }
                    div {
                        class: "detail-side",
                        Card {
                            CardHeader { title: "Dokumen" }
                            CardContent {
                                if s.has_file() {
                                    div {
                                        class: "file-summary",
                                        div {
                                            div { class: "file-name", "{s.download_name()}" }
                                            div { class: "muted", "{format_size(s.file_size.unwrap_or(0))}" }
                                        }
                                        DownloadFileButton { kind: SuratType::Keluar, id, filename: s.download_name() }
                                    }
                                    OcrTextPanel {
                                        text: s.ocr_text.clone().unwrap_or_default(),
                                        confidence: s.ocr_confidence,
                                        keywords: s.keywords.clone().unwrap_or_default(),
                                    }
                                } else {
                                    p { class: "muted", "Tidak ada file terlampir" }
                                }
                            }
                        }
                        SuratDisposisiCard { surat_type: SuratType::Keluar, surat_id: id }
                    }
                }
                if show_dispo() {
                    DisposisiDialog {
                        surat_type: SuratType::Keluar,
                        surat_id: id,
                        nomor: s.nomor_surat_keluar.clone(),
                        on_close: move |_| show_dispo.set(false),
                        on_created: move |_| {
                            show_dispo.set(false);
                            on_navigate.call(Page::Disposisi);
                        },
                    }
                }
            }
        }
    };

    let delete = move |_| {
        let api = api.clone();
        spawn(async move {
            deleting.set(true);
            match api.surat_keluar().delete(id).await {
                Ok(()) => {
                    toast.success("Surat keluar berhasil dihapus");
                    on_navigate.call(Page::SuratKeluar);
                }
                Err(e) => toast.error(e.user_message("Gagal menghapus surat keluar")),
            }
            deleting.set(false);
            confirm_delete.set(false);
        });
    };

    rsx! {
        {body}
        if confirm_delete() {
            ConfirmDialog {
                title: "Hapus Surat Keluar",
                message: "Surat ini akan dihapus permanen beserta file lampirannya.",
                busy: deleting(),
                on_confirm: delete,
                on_cancel: move |_| confirm_delete.set(false),
            }
        }
    }
}

fn keluar_fields(s: &SuratKeluar) -> Element {
    let tembusan = s.tembusan.clone().filter(|t| !t.trim().is_empty()).unwrap_or_else(|| "-".to_string());
    let isi = s.isi_singkat.clone().unwrap_or_else(|| "-".to_string());
    rsx! {
        dl {
            class: "detail-list",
            DetailRow { label: "Nomor Surat", span { class: "mono", "{s.nomor_surat_keluar}" } }
            DetailRow { label: "Tanggal Surat", "{format_date(s.tanggal_surat)}" }
            DetailRow { label: "Penerima", "{s.penerima}" }
            DetailRow { label: "Tembusan", p { class: "prewrap", "{tembusan}" } }
            DetailRow { label: "Perihal", "{s.perihal}" }
            DetailRow {
                label: "Kategori",
                if let Some(k) = s.kategori.clone() {
                    KategoriChip { name: k.nama, color: k.color }
                } else {
                    span { class: "muted", "-" }
                }
            }
            DetailRow { label: "Status", StatusBadge { status: s.status } }
            DetailRow { label: "Prioritas", PriorityBadge { priority: s.priority } }
            DetailRow { label: "Isi Singkat", p { class: "prewrap", "{isi}" } }
            DetailRow { label: "Dicatat", "{format_timestamp(&s.created_at)}" }
        }
    }
}
