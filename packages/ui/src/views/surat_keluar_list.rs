use std::cmp::Ordering;

use api::models::{SuratKeluar, SuratKeluarQuery, SuratType};
use api::ApiClient;
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
pub enum SuratKeluarColumn {
    Nomor,
    TanggalSurat,
    Penerima,
    Perihal,
    Status,
    Priority,
}

impl SortColumn<SuratKeluar> for SuratKeluarColumn {
    fn compare(self, a: &SuratKeluar, b: &SuratKeluar) -> Ordering {
        match self {
            SuratKeluarColumn::Nomor => compare_text(&a.nomor_surat_keluar, &b.nomor_surat_keluar),
            SuratKeluarColumn::TanggalSurat => a.tanggal_surat.cmp(&b.tanggal_surat),
            SuratKeluarColumn::Penerima => compare_text(&a.penerima, &b.penerima),
            SuratKeluarColumn::Perihal => compare_text(&a.perihal, &b.perihal),
            SuratKeluarColumn::Status => a.status.as_str().cmp(b.status.as_str()),
            SuratKeluarColumn::Priority => a.priority.cmp(&b.priority),
        }
    }
}

fn matches(filter: &SuratFilter, s: &SuratKeluar) -> bool {
    filter.matches(
        &[
            &s.nomor_surat_keluar,
            &s.penerima,
            &s.perihal,
            s.tembusan.as_deref().unwrap_or_default(),
        ],
        s.kategori_id,
        s.status,
        s.priority,
    )
}

async fn load_letters(api: &ApiClient, query: &SuratKeluarQuery) -> api::Result<Vec<SuratKeluar>> {
    api.surat_keluar().list(query).await
}

async fn delete_letter(api: &ApiClient, id: i64) -> api::Result<()> {
    api.surat_keluar().delete(id).await
}

#[component]
pub fn SuratKeluarListView(on_navigate: EventHandler<Page>) -> Element {
    let api = use_api();
    let config = use_config();
    let toast = use_toast();
    let kategori = use_active_kategori();
    let filter = use_signal(SuratFilter::default);
    let mut table = use_signal(|| {
        TableState::new(config.tables.page_size as usize).sorted_by(SuratKeluarColumn::TanggalSurat, SortDirection::Desc)
    });
    let mut pending_delete = use_signal(|| Option::<SuratKeluar>::None);
    let mut deleting = use_signal(|| false);

    let fetch_limit = config.tables.fetch_limit;
    let mut letters = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let query = filter.read().keluar_query(fetch_limit);
            async move { load_letters(&api, &query).await }
        }
    });

    let confirm_delete = move |_| {
        let api = api.clone();
        let Some(target) = pending_delete() else {
            return;
        };
        spawn(async move {
            deleting.set(true);
            match delete_letter(&api, target.id).await {
                Ok(()) => {
                    toast.success("Surat keluar berhasil dihapus");
                    letters.restart();
                }
                Err(e) => toast.error(e.user_message("Gagal menghapus surat keluar")),
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    };

    let kategori_list = kategori.read().clone().unwrap_or_default();
    let current_filter = filter();

    let body = match &*letters.read() {
        None => rsx! { Spinner { label: "Memuat surat keluar..." } },
        Some(Err(e)) => rsx! {
            ErrorState {
                message: e.user_message("Gagal memuat surat keluar"),
                on_retry: move |_| letters.restart(),
            }
        },
        Some(Ok(rows)) => {
            let visible: Vec<SuratKeluar> = rows.iter().filter(|s| matches(&current_filter, s)).cloned().collect();
            let total = visible.len();
            let state = table();
            if total == 0 {
                rsx! {
                    EmptyState {
                        title: if current_filter.is_active() { "Tidak ada surat yang cocok" } else { "Belum ada surat keluar" },
                        description: "Tambahkan surat keluar baru atau ubah filter pencarian",
                    }
                }
            } else {
                let page_rows: Vec<SuratKeluar> = state.apply(&visible).into_iter().cloned().collect();
                rsx! {
                    div {
                        class: "table-wrap",
                        table {
                            class: "table",
                            thead {
                                tr {
                                    SortHeader { label: "No. Surat", direction: state.direction(SuratKeluarColumn::Nomor), on_sort: move |_| table.write().toggle_sort(SuratKeluarColumn::Nomor) }
                                    SortHeader { label: "Tgl Surat", direction: state.direction(SuratKeluarColumn::TanggalSurat), on_sort: move |_| table.write().toggle_sort(SuratKeluarColumn::TanggalSurat) }
                                    SortHeader { label: "Penerima", direction: state.direction(SuratKeluarColumn::Penerima), on_sort: move |_| table.write().toggle_sort(SuratKeluarColumn::Penerima) }
                                    SortHeader { label: "Perihal", direction: state.direction(SuratKeluarColumn::Perihal), on_sort: move |_| table.write().toggle_sort(SuratKeluarColumn::Perihal) }
                                    th { "Kategori" }
                                    SortHeader { label: "Status", direction: state.direction(SuratKeluarColumn::Status), on_sort: move |_| table.write().toggle_sort(SuratKeluarColumn::Status) }
                                    SortHeader { label: "Prioritas", direction: state.direction(SuratKeluarColumn::Priority), on_sort: move |_| table.write().toggle_sort(SuratKeluarColumn::Priority) }
                                    th { class: "table-actions", "Aksi" }
                                }
                            }
                            tbody {
                                for surat in page_rows {
                                    tr {
                                        key: "{surat.id}",
                                        td { class: "mono", "{surat.nomor_surat_keluar}" }
                                        td { "{format_date(surat.tanggal_surat)}" }
                                        td { "{surat.penerima}" }
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
                                                onclick: move |_| on_navigate.call(Page::SuratKeluarDetail(surat.id)),
                                                Icon { icon: FaEye, width: 14, height: 14 }
                                            }
                                            button {
                                                class: "btn btn-ghost btn-icon",
                                                title: "Edit",
                                                onclick: move |_| on_navigate.call(Page::SuratKeluarEdit(surat.id)),
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
            title: "Surat Keluar",
            subtitle: "Kelola dan arsipkan surat yang dikirim",
            ExportButtons { kind: SuratType::Keluar, params: current_filter.report_params() }
            button {
                class: "btn btn-primary",
                onclick: move |_| on_navigate.call(Page::SuratKeluarNew),
                Icon { icon: FaPlus, width: 14, height: 14 }
                "Tambah Surat"
            }
        }
        Card {
            SuratFilterBar {
                filter,
                kategori: kategori_list,
                placeholder: "Cari nomor, penerima, perihal atau tembusan...",
                on_change: move |_| table.write().reset_page(),
            }
            {body}
        }
        if let Some(target) = pending_delete() {
            ConfirmDialog {
                title: "Hapus Surat Keluar",
                message: format!("Surat {} untuk {} akan dihapus permanen beserta file lampirannya.", target.nomor_surat_keluar, target.penerima),
                busy: deleting(),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use api::models::{Priority, SuratStatus};
    use api::StaticSession;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn surat(id: i64, nomor: &str, penerima: &str, tembusan: Option<&str>) -> SuratKeluar {
        SuratKeluar {
            id,
            nomor_surat_keluar: nomor.into(),
            tanggal_surat: NaiveDate::from_ymd_opt(2024, 6, id as u32).unwrap(),
            penerima: penerima.into(),
            tembusan: tembusan.map(String::from),
            perihal: "Pemberitahuan".into(),
            isi_singkat: None,
            kategori_id: None,
            kategori: None,
            status: SuratStatus::Baru,
            priority: Priority::Sedang,
            file_path: None,
            original_filename: None,
            file_type: None,
            file_size: None,
            ocr_text: None,
            ocr_confidence: None,
            keywords: None,
            created_by: None,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_search_includes_copies() {
        let s = surat(1, "SK/001/2024", "Bupati", Some("Inspektorat"));
        let filter = SuratFilter {
            search: "inspektorat".into(),
            ..Default::default()
        };
        assert!(matches(&filter, &s));
        assert!(!matches(&filter, &surat(2, "SK/002/2024", "Bupati", None)));
    }

    #[test]
    fn test_sort_by_number() {
        let rows = vec![
            surat(1, "SK/010/2024", "A", None),
            surat(2, "SK/002/2024", "B", None),
            surat(3, "sk/005/2024", "C", None),
        ];
        let state = TableState::new(10).sorted_by(SuratKeluarColumn::Nomor, SortDirection::Asc);
        let ids: Vec<i64> = state.apply(&rows).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        let state = TableState::new(10).sorted_by(SuratKeluarColumn::TanggalSurat, SortDirection::Desc);
        let ids: Vec<i64> = state.apply(&rows).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_list_and_delete_hit_outgoing_endpoints() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/surat-keluar"))
            .and(query_param("limit", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 7,
                "nomor_surat_keluar": "SK/007/2024",
                "tanggal_surat": "2024-06-07",
                "penerima": "Bupati",
                "perihal": "Laporan",
                "status": "baru",
                "priority": "sedang",
                "created_at": "2024-06-07T08:00:00"
            }])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/surat-keluar/7"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(path("/surat-masuk/7"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), Rc::new(StaticSession::new("tok")));
        let query = SuratFilter::default().keluar_query(50);
        let rows = load_letters(&client, &query).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].nomor_surat_keluar, "SK/007/2024");
        delete_letter(&client, rows[0].id).await.unwrap();
    }
}
