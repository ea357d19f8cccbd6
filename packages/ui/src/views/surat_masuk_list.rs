use std::cmp::Ordering;

use api::models::{SuratMasuk, SuratType};
use dioxus::prelude::*;

use crate::auth::{use_api, use_config};
use crate::components::{
    Card, ConfirmDialog, EmptyState, ErrorState, KategoriChip, PageHeader, Pagination, PriorityBadge, SortHeader,
    Spinner, StatusBadge,
};
use crate::format::{format_date, truncate};
use crate::icons::{FaEye, FaPen, FaPlus, FaTrash};
use crate::nav::Page;
use crate::table::{compare_text, SortColumn, SortDirection, TableState};
use crate::toast::use_toast;
use crate::Icon;

use super::surat_common::{use_active_kategori, ExportButtons, SuratFilter, SuratFilterBar};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SuratMasukColumn {
    Nomor,
    TanggalTerima,
    Pengirim,
    Perihal,
    Status,
    Priority,
}

impl SortColumn<SuratMasuk> for SuratMasukColumn {
    fn compare(self, a: &SuratMasuk, b: &SuratMasuk) -> Ordering {
        match self {
            SuratMasukColumn::Nomor => compare_text(&a.nomor_surat, &b.nomor_surat),
            SuratMasukColumn::TanggalTerima => a.tanggal_terima.cmp(&b.tanggal_terima),
            SuratMasukColumn::Pengirim => compare_text(&a.pengirim, &b.pengirim),
            SuratMasukColumn::Perihal => compare_text(&a.perihal, &b.perihal),
            SuratMasukColumn::Status => a.status.as_str().cmp(b.status.as_str()),
            SuratMasukColumn::Priority => a.priority.cmp(&b.priority),
        }
    }
}

fn matches(filter: &SuratFilter, s: &SuratMasuk) -> bool {
    filter.matches(
        &[&s.nomor_surat, &s.pengirim, &s.perihal],
        s.kategori_id,
        s.status,
        s.priority,
    )
}

#[component]
pub fn SuratMasukListView(on_navigate: EventHandler<Page>) -> Element {
    let api = use_api();
    let config = use_config();
    let toast = use_toast();
    let kategori = use_active_kategori();
    let filter = use_signal(SuratFilter::default);
    let mut table = use_signal(|| {
        TableState::new(config.tables.page_size as usize).sorted_by(SuratMasukColumn::TanggalTerima, SortDirection::Desc)
    });
    let mut pending_delete = use_signal(|| Option::<SuratMasuk>::None);
    let mut deleting = use_signal(|| false);

    let fetch_limit = config.tables.fetch_limit;
    let mut letters = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let query = filter.read().masuk_query(fetch_limit);
            async move { api.surat_masuk().list(&query).await }
        }
    });

    let confirm_delete = move |_| {
        let api = api.clone();
        let Some(target) = pending_delete() else {
            return;
        };
        spawn(async move {
            deleting.set(true);
            match api.surat_masuk().delete(target.id).await {
                Ok(()) => {
                    toast.success("Surat masuk berhasil dihapus");
                    letters.restart();
                }
                Err(e) => toast.error(e.user_message("Gagal menghapus surat masuk")),
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    };

    let kategori_list = kategori.read().clone().unwrap_or_default();
    let current_filter = filter();

    let body = match &*letters.read() {
        None => rsx! { Spinner { label: "Memuat surat masuk..." } },
        Some(Err(e)) => rsx! {
            ErrorState {
                message: e.user_message("Gagal memuat surat masuk"),
                on_retry: move |_| letters.restart(),
            }
        },
        Some(Ok(rows)) => {
            let visible: Vec<SuratMasuk> = rows.iter().filter(|s| matches(&current_filter, s)).cloned().collect();
            let total = visible.len();
            let state = table();
            if total == 0 {
                rsx! {
                    EmptyState {
                        title: if current_filter.is_active() { "Tidak ada surat yang cocok" } else { "Belum ada surat masuk" },
                        description: "Tambahkan surat masuk baru atau ubah filter pencarian",
                    }
                }
            } else {
                let page_rows: Vec<SuratMasuk> = state.apply(&visible).into_iter().cloned().collect();
                rsx! {
                    div {
                        class: "table-wrap",
                        table {
                            class: "table",
                            thead {
                                tr {
                                    SortHeader { label: "No. Surat", direction: state.direction(SuratMasukColumn::Nomor), on_sort: move |_| table.write().toggle_sort(SuratMasukColumn::Nomor) }
                                    SortHeader { label: "Tgl Terima", direction: state.direction(SuratMasukColumn::TanggalTerima), on_sort: move |_| table.write().toggle_sort(SuratMasukColumn::TanggalTerima) }
                                    SortHeader { label: "Pengirim", direction: state.direction(SuratMasukColumn::Pengirim), on_sort: move |_| table.write().toggle_sort(SuratMasukColumn::Pengirim) }
                                    SortHeader { label: "Perihal", direction: state.direction(SuratMasukColumn::Perihal), on_sort: move |_| table.write().toggle_sort(SuratMasukColumn::Perihal) }
                                    th { "Kategori" }
                                    SortHeader { label: "Status", direction: state.direction(SuratMasukColumn::Status), on_sort: move |_| table.write().toggle_sort(SuratMasukColumn::Status) }
                                    SortHeader { label: "Prioritas", direction: state.direction(SuratMasukColumn::Priority), on_sort: move |_| table.write().toggle_sort(SuratMasukColumn::Priority) }
                                    th { class: "table-actions", "Aksi" }
                                }
                            }
                            tbody {
                                for surat in page_rows {
                                    tr {
                                        key: "{surat.id}",
                                        td { class: "mono", "{surat.nomor_surat}" }
                                        td { "{format_date(surat.tanggal_terima)}" }
                                        td { "{surat.pengirim}" }
                                        td { title: "{surat.perihal}", "{truncate(&surat.perihal, 48)}" }
                                        td {
                                            if let Some(k) = surat.kategori.clone() {
                                                KategoriChip { name: k.nama, color: k.color }
                                            } else {
                                                span { class: "muted", "-" }
                                            }
                                        }
                                        td { StatusBadge { status: surat.status } }
                                        td { PriorityBadge { priority: surat.priority } }
                                        td {
                                            class: "table-actions",
                                            button {
                                                class: "btn btn-ghost btn-icon",
                                                title: "Detail",
                                                onclick: move |_| on_navigate.call(Page::SuratMasukDetail(surat.id)),
                                                Icon { icon: FaEye, width: 14, height: 14 }
                                            }
                                            button {
                                                class: "btn btn-ghost btn-icon",
                                                title: "Edit",
                                                onclick: move |_| on_navigate.call(Page::SuratMasukEdit(surat.id)),
                                                Icon { icon: FaPen, width: 14, height: 14 }
                                            }
                                            button {
                                                class: "btn btn-ghost btn-icon btn-danger-text",
                                                title: "Hapus",
                                                onclick: {
                                                    let surat = surat.clone();
                                                    move |_| pending_delete.set(Some(surat.clone()))
                                                },
                                                Icon { icon: FaTrash, width: 14, height: 14 }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    Pagination {
                        summary: state.range_label(total),
                        page: state.page(),
                        page_count: state.page_count(total),
                        can_prev: state.can_prev(),
                        can_next: state.can_next(total),
                        on_page: move |page: usize| table.write().set_page(page, total),
                    }
                }
            }
        }
    };

    rsx! {
        PageHeader {
            title: "Surat Masuk",
            subtitle: "Kelola dan arsipkan surat yang diterima",
            ExportButtons { kind: SuratType::Masuk, params: current_filter.report_params() }
            button {
                class: "btn btn-primary",
                onclick: move |_| on_navigate.call(Page::SuratMasukNew),
                Icon { icon: FaPlus, width: 14, height: 14 }
                "Tambah Surat"
            }
        }
        Card {
            SuratFilterBar {
                filter,
                kategori: kategori_list,
                placeholder: "Cari nomor, pengirim atau perihal...",
                on_change: move |_| table.write().reset_page(),
            }
            {body}
        }
        if let Some(target) = pending_delete() {
            ConfirmDialog {
                title: "Hapus Surat Masuk",
                message: format!("Surat {} dari {} akan dihapus permanen beserta file lampirannya.", target.nomor_surat, target.pengirim),
                busy: deleting(),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::{Priority, SuratStatus};
    use chrono::NaiveDate;

    fn surat(id: i64, nomor: &str, pengirim: &str, day: u32, priority: Priority) -> SuratMasuk {
        SuratMasuk {
            id,
            nomor_surat: nomor.into(),
            tanggal_surat: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            tanggal_terima: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            pengirim: pengirim.into(),
            perihal: "Undangan".into(),
            isi_singkat: None,
            kategori_id: None,
            kategori: None,
            status: SuratStatus::Baru,
            priority,
            file_path: None,
            original_filename: None,
            file_type: None,
            file_size: None,
            ocr_text: None,
            ocr_confidence: None,
            keywords: None,
            created_by: None,
            created_at: "2024-05-01T08:00:00".into(),
        }
    }

    #[test]
    fn test_sort_by_received_date_and_priority() {
        let rows = vec![
            surat(1, "001/A", "Dinas PU", 3, Priority::Rendah),
            surat(2, "002/A", "bappeda", 9, Priority::Urgent),
            surat(3, "003/A", "Camat", 1, Priority::Sedang),
        ];
        let state = TableState::new(10).sorted_by(SuratMasukColumn::TanggalTerima, SortDirection::Desc);
        let ids: Vec<i64> = state.apply(&rows).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        let state = TableState::new(10).sorted_by(SuratMasukColumn::Priority, SortDirection::Desc);
        let ids: Vec<i64> = state.apply(&rows).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        let state = TableState::new(10).sorted_by(SuratMasukColumn::Pengirim, SortDirection::Asc);
        let ids: Vec<i64> = state.apply(&rows).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_search_covers_number_and_sender() {
        let s = surat(1, "005/UND/2024", "Dinas Kesehatan", 3, Priority::Sedang);
        let mut filter = SuratFilter {
            search: "und/2024".into(),
            ..Default::default()
        };
        assert!(matches(&filter, &s));
        filter.search = "kesehatan".into();
        assert!(matches(&filter, &s));
        filter.search = "pendidikan".into();
        assert!(!matches(&filter, &s));
    }
}
