use api::models::{format_size, DisposisiQuery, SuratMasuk, SuratType};
use dioxus::prelude::*;

use crate::auth::use_api;
use crate::components::{
    Card, CardContent, CardHeader, ConfirmDialog, DetailRow, DisposisiStatusBadge, EmptyState, ErrorState,
    KategoriChip, PageHeader, PriorityBadge, Spinner, StatusBadge,
};
use crate::format::{format_confidence, format_date, format_optional_date, format_timestamp};
use crate::icons::{FaArrowLeft, FaFileSignature, FaPen, FaRotate, FaTrash};
use crate::nav::Page;
use crate::toast::use_toast;
use crate::Icon;

use super::disposisi::DisposisiPrint;
use super::disposisi_dialog::{use_user_directory, user_name, DisposisiDialog};
use super::intake::OcrTextPanel;
use super::surat_common::DownloadFileButton;

#[component]
pub fn SuratMasukDetailView(id: i64, on_navigate: EventHandler<Page>) -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut show_dispo = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);
    let mut deleting = use_signal(|| false);
    let mut reprocessing = use_signal(|| false);

    // Route params change without remounting; keep the id in a signal so the
    // resource refetches.
    let mut current_id = use_signal(|| id);
    if *current_id.peek() != id {
        current_id.set(id);
    }
    let mut surat = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let id = current_id();
            async move { api.surat_masuk().get(id).await }
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
                    onclick: move |_| on_navigate.call(Page::SuratMasuk),
                    "Kembali ke daftar"
                }
            }
        },
        Some(Err(e)) => rsx! {
            ErrorState {
                message: e.user_message("Gagal memuat surat masuk"),
                on_retry: move |_| surat.restart(),
            }
        },
        Some(Ok(s)) => {
            let s = s.clone();
            let reprocess = {
                let api = api.clone();
                move |_| {
                    let api = api.clone();
                    spawn(async move {
                        reprocessing.set(true);
                        match api.surat_masuk().reprocess_ocr(id).await {
                            Ok(result) => {
                                toast.success(format!(
                                    "OCR selesai diproses ulang (keyakinan {})",
                                    format_confidence(Some(result.confidence))
                                ));
                                surat.restart();
                            }
                            Err(e) => toast.error(e.user_message("Gagal memproses ulang OCR")),
                        }
                        reprocessing.set(false);
                    });
                }
            };
            rsx! {
                PageHeader {
                    title: s.perihal.clone(),
                    subtitle: format!("No. {}", s.nomor_surat),
                    button {
                        class: "btn btn-ghost",
                        onclick: move |_| on_navigate.call(Page::SuratMasuk),
                        Icon { icon: FaArrowLeft, width: 14, height: 14 }
                        "Kembali"
                    }
                    button {
                        class: "btn btn-outline",
                        onclick: move |_| show_dispo.set(true),
                        Icon { icon: FaFileSignature, width: 14, height: 14 }
                        "Disposisi"
                    }
                    DisposisiPrint { surat: s.clone() }
                    button {
                        class: "btn btn-outline",
                        onclick: move |_| on_navigate.call(Page::SuratMasukEdit(id)),
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
                        CardContent { {masuk_fields(&s)} }
                    }
                    div {
                        class: "detail-side",
                        Card {
                            CardHeader {
                                title: "Dokumen",
                                if s.has_file() {
                                    button {
                                        class: "btn btn-ghost btn-sm",
                                        disabled: reprocessing(),
                                        onclick: reprocess,
                                        Icon { icon: FaRotate, width: 12, height: 12 }
                                        if reprocessing() { "Memproses..." } else { "Proses Ulang OCR" }
                                    }
                                }
                            }
                            CardContent {
                                if s.has_file() {
                                    div {
                                        class: "file-summary",
                                        div {
                                            div { class: "file-name", "{s.download_name()}" }
                                            div { class: "muted", "{format_size(s.file_size.unwrap_or(0))}" }
                                        }
                                        DownloadFileButton { kind: SuratType::Masuk, id, filename: s.download_name() }
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
                        SuratDisposisiCard { surat_type: SuratType::Masuk, surat_id: id }
                    }
                }
                if show_dispo() {
                    DisposisiDialog {
                        surat_type: SuratType::Masuk,
                        surat_id: id,
                        nomor: s.nomor_surat.clone(),
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
            match api.surat_masuk().delete(id).await {
                Ok(()) => {
                    toast.success("Surat masuk berhasil dihapus");
                    on_navigate.call(Page::SuratMasuk);
                }
                Err(e) => toast.error(e.user_message("Gagal menghapus surat masuk")),
            }
            deleting.set(false);
            confirm_delete.set(false);
        });
    };

    rsx! {
        {body}
        if confirm_delete() {
            ConfirmDialog {
                title: "Hapus Surat Masuk",
                message: "Surat ini akan dihapus permanen beserta file lampirannya.",
                busy: deleting(),
                on_confirm: delete,
                on_cancel: move |_| confirm_delete.set(false),
            }
        }
    }
}

fn masuk_fields(s: &SuratMasuk) -> Element {
    let isi = s.isi_singkat.clone().unwrap_or_else(|| "-".to_string());
    rsx! {
        dl {
            class: "detail-list",
            DetailRow { label: "Nomor Surat", span { class: "mono", "{s.nomor_surat}" } }
            DetailRow { label: "Tanggal Surat", "{format_date(s.tanggal_surat)}" }
            DetailRow { label: "Tanggal Terima", "{format_date(s.tanggal_terima)}" }
            DetailRow { label: "Pengirim", "{s.pengirim}" }
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

/// Dispositions already made for one letter.
#[component]
pub fn SuratDisposisiCard(surat_type: SuratType, surat_id: i64) -> Element {
    let api = use_api();
    let users = use_user_directory();
    let mut current_id = use_signal(|| surat_id);
    if *current_id.peek() != surat_id {
        current_id.set(surat_id);
    }
    let dispositions = use_resource(move || {
        let api = api.clone();
        let surat_id = current_id();
        async move {
            let query = DisposisiQuery {
                surat_type: Some(surat_type),
                limit: Some(200),
                ..Default::default()
            };
            api.disposisi().list(&query).await.map(|list| {
                list.into_iter()
                    .filter(|d| d.surat_id() == Some(surat_id))
                    .collect::<Vec<_>>()
            })
        }
    });

    let user_list = users.read().clone().unwrap_or_default();
    let content = match &*dispositions.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => {
            let message = e.user_message("Gagal memuat disposisi");
            rsx! { p { class: "muted", "{message}" } }
        }
        Some(Ok(list)) if list.is_empty() => rsx! { p { class: "muted", "Belum ada disposisi" } },
        Some(Ok(list)) => rsx! {
            ul {
                class: "dispo-mini-list",
                for d in list.iter().cloned() {
                    li {
                        key: "{d.id}",
                        div {
                            class: "dispo-mini-head",
                            strong { "{user_name(&user_list, Some(d.to_user_id))}" }
                            DisposisiStatusBadge { status: d.status }
                        }
                        p { "{d.instruksi}" }
                        p { class: "muted", "Batas waktu: {format_optional_date(d.deadline)}" }
                    }
                }
            }
        },
    };

    rsx! {
        Card {
            CardHeader { title: "Riwayat Disposisi" }
            CardContent { {content} }
        }
    }
}
