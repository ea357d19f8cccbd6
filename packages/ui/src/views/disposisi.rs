use std::cmp::Ordering;

use api::forms::CompleteDisposisiForm;
use api::models::{
    Disposisi, DisposisiQuery, DisposisiStatus, OrgProfile, SuratMasuk, SuratType, UpdateDisposisi, User,
};
use api::FormErrors;
use chrono::NaiveDate;
use dioxus::prelude::*;

use crate::auth::{use_api, use_config};
use crate::components::{
    Button, ButtonVariant, Card, Checkbox, ConfirmDialog, Dialog, DisposisiStatusBadge, EmptyState, ErrorState, Field,
    PageHeader, Pagination, Select, SelectOption, SortHeader, Spinner, Textarea,
};
use crate::format::{format_date_long, format_optional_date, format_timestamp, now, today, truncate};
use crate::icons::{FaCheck, FaPlay, FaPrint, FaTrash};
use crate::nav::Page;
use crate::platform::print_page;
use crate::table::{SortColumn, SortDirection, TableState};
use crate::toast::use_toast;
use crate::Icon;

use super::disposisi_dialog::{use_user_directory, user_name};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DisposisiColumn {
    Deadline,
    Status,
    Dibuat,
}

impl SortColumn<Disposisi> for DisposisiColumn {
    fn compare(self, a: &Disposisi, b: &Disposisi) -> Ordering {
        match self {
            // Entries without a deadline go last.
            DisposisiColumn::Deadline => match (a.deadline, b.deadline) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            DisposisiColumn::Status => a.status.as_str().cmp(b.status.as_str()),
            DisposisiColumn::Dibuat => a.created_at.cmp(&b.created_at),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisposisiFilter {
    pub status: Option<DisposisiStatus>,
    pub surat_type: Option<SuratType>,
    pub overdue_only: bool,
}

impl DisposisiFilter {
    pub fn query(&self, limit: u32) -> DisposisiQuery {
        DisposisiQuery {
            limit: Some(limit),
            status: self.status,
            surat_type: self.surat_type,
            ..Default::default()
        }
    }

    pub fn matches(&self, d: &Disposisi, today: NaiveDate) -> bool {
        !self.overdue_only || d.is_overdue(today)
    }
}

fn surat_page(d: &Disposisi) -> Option<Page> {
    let id = d.surat_id()?;
    Some(match d.surat_type() {
        SuratType::Masuk => Page::SuratMasukDetail(id),
        SuratType::Keluar => Page::SuratKeluarDetail(id),
    })
}

/// Routing instructions across both registers.
#[component]
pub fn DisposisiView(on_navigate: EventHandler<Page>) -> Element {
    let api = use_api();
    let config = use_config();
    let toast = use_toast();
    let users = use_user_directory();
    let mut filter = use_signal(DisposisiFilter::default);
    let mut table = use_signal(|| {
        TableState::new(config.tables.page_size as usize).sorted_by(DisposisiColumn::Dibuat, SortDirection::Desc)
    });
    let mut completing = use_signal(|| Option::<Disposisi>::None);
    let mut pending_delete = use_signal(|| Option::<Disposisi>::None);
    let mut deleting = use_signal(|| false);

    let fetch_limit = config.tables.fetch_limit;
    let mut list = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let query = filter.read().query(fetch_limit);
            async move { api.disposisi().list(&query).await }
        }
    });

    let start_work = use_callback({
        let api = api.clone();
        move |id: i64| {
            let api = api.clone();
            spawn(async move {
                let payload = UpdateDisposisi {
                    status: Some(DisposisiStatus::Proses),
                    ..Default::default()
                };
                match api.disposisi().update(id, &payload).await {
                    Ok(_) => {
                        toast.info("Disposisi sedang diproses");
                        list.restart();
                    }
                    Err(e) => toast.error(e.user_message("Gagal memperbarui disposisi")),
                }
            });
        }
    });

    let confirm_delete = move |_| {
        let api = api.clone();
        let Some(target) = pending_delete() else {
            return;
        };
        spawn(async move {
            deleting.set(true);
            match api.disposisi().delete(target.id).await {
                Ok(()) => {
                    toast.success("Disposisi berhasil dihapus");
                    list.restart();
                }
                Err(e) => toast.error(e.user_message("Gagal menghapus disposisi")),
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    };

    let today = today();
    let current_filter = filter();
    let user_list = users.read().clone().unwrap_or_default();

    let body = match &*list.read() {
        None => rsx! { Spinner { label: "Memuat disposisi..." } },
        Some(Err(e)) => rsx! {
            ErrorState {
                message: e.user_message("Gagal memuat disposisi"),
                on_retry: move |_| list.restart(),
            }
        },
        Some(Ok(rows)) => {
            let visible: Vec<Disposisi> = rows.iter().filter(|d| current_filter.matches(d, today)).cloned().collect();
            let total = visible.len();
            let state = table();
            if total == 0 {
                rsx! {
                    EmptyState {
                        title: "Belum ada disposisi",
                        description: "Disposisi dibuat dari halaman detail surat",
                    }
                }
            } else {
                let page_rows: Vec<Disposisi> = state.apply(&visible).into_iter().cloned().collect();
                rsx! {
                    div {
                        class: "table-wrap",
                        table {
                            class: "table",
                            thead {
                                tr {
                                    th { "Surat" }
                                    th { "Dari" }
                                    th { "Tujuan" }
                                    th { "Instruksi" }
                                    SortHeader { label: "Batas Waktu", direction: state.direction(DisposisiColumn::Deadline), on_sort: move |_| table.write().toggle_sort(DisposisiColumn::Deadline) }
                                    SortHeader { label: "Status", direction: state.direction(DisposisiColumn::Status), on_sort: move |_| table.write().toggle_sort(DisposisiColumn::Status) }
                                    SortHeader { label: "Dibuat", direction: state.direction(DisposisiColumn::Dibuat), on_sort: move |_| table.write().toggle_sort(DisposisiColumn::Dibuat) }
                                    th { class: "table-actions", "Aksi" }
                                }
                            }
                            tbody {
                                for d in page_rows {
                                    {disposisi_row(d, &user_list, today, on_navigate, start_work, completing, pending_delete)}
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

    let status_options: Vec<SelectOption> = DisposisiStatus::ALL
        .into_iter()
        .map(|s| SelectOption::new(s.as_str(), s.label()))
        .collect();
    let type_options: Vec<SelectOption> = [SuratType::Masuk, SuratType::Keluar]
        .into_iter()
        .map(|t| SelectOption::new(t.as_str(), t.label()))
        .collect();

    rsx! {
        PageHeader {
            title: "Disposisi",
            subtitle: "Daftar disposisi yang perlu ditindaklanjuti",
        }
        Card {
            div {
                class: "filter-bar",
                Select {
                    value: current_filter.status.map(|s| s.as_str()).unwrap_or_default(),
                    options: status_options,
                    placeholder: "Semua Status",
                    onchange: move |v: String| {
                        filter.write().status = DisposisiStatus::parse(&v);
                        table.write().reset_page();
                    },
                }
                Select {
                    value: current_filter.surat_type.map(|t| t.as_str()).unwrap_or_default(),
                    options: type_options,
                    placeholder: "Semua Jenis Surat",
                    onchange: move |v: String| {
                        filter.write().surat_type = [SuratType::Masuk, SuratType::Keluar].into_iter().find(|t| t.as_str() == v);
                        table.write().reset_page();
                    },
                }
                Checkbox {
                    id: "dispo-overdue",
                    checked: current_filter.overdue_only,
                    label: "Hanya yang terlambat",
                    onchange: move |checked: bool| {
                        filter.write().overdue_only = checked;
                        table.write().reset_page();
                    },
                }
            }
            {body}
        }
        if let Some(target) = completing() {
            CompleteDisposisiDialog {
                key: "{target.id}",
                disposisi: target,
                on_close: move |_| completing.set(None),
                on_done: move |_| {
                    completing.set(None);
                    list.restart();
                },
            }
        }
        if let Some(target) = pending_delete() {
            ConfirmDialog {
                title: "Hapus Disposisi",
                message: format!("Disposisi \"{}\" akan dihapus.", truncate(&target.instruksi, 60)),
                busy: deleting(),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

fn disposisi_row(
    d: Disposisi,
    users: &[User],
    today: NaiveDate,
    on_navigate: EventHandler<Page>,
    start_work: Callback<i64>,
    mut completing: Signal<Option<Disposisi>>,
    mut pending_delete: Signal<Option<Disposisi>>,
) -> Element {
    let overdue = d.is_overdue(today);
    let target = surat_page(&d);
    let surat_label = match d.surat_id() {
        Some(id) => format!("{} #{id}", d.surat_type().label()),
        None => d.surat_type().label().to_string(),
    };
    let from = user_name(users, d.from_user_id);
    let to = user_name(users, Some(d.to_user_id));
    let id = d.id;
    let open = d.status.is_open();
    let pending = d.status == DisposisiStatus::Pending;
    rsx! {
        tr {
            key: "{id}",
            class: if overdue { "row-overdue" } else { "" },
            td {
                if let Some(page) = target {
                    button {
                        class: "link-button",
                        onclick: move |_| on_navigate.call(page),
                        "{surat_label}"
                    }
                } else {
                    span { "{surat_label}" }
                }
            }
            td { "{from}" }
            td { "{to}" }
            td { title: "{d.instruksi}", "{truncate(&d.instruksi, 56)}" }
            td {
                "{format_optional_date(d.deadline)}"
                if overdue {
                    span { class: "badge badge-danger", "Terlambat" }
                }
            }
            td { DisposisiStatusBadge { status: d.status } }
            td { class: "muted", "{format_timestamp(&d.created_at)}" }
            td {
                class: "table-actions",
                if pending {
                    button {
                        class: "btn btn-ghost btn-icon",
                        title: "Proses",
                        onclick: move |_| start_work.call(id),
                        Icon { icon: FaPlay, width: 12, height: 12 }
                    }
                }
                if open {
                    button {
                        class: "btn btn-ghost btn-icon",
                        title: "Tandai selesai",
                        onclick: {
                            let d = d.clone();
                            move |_| completing.set(Some(d.clone()))
                        },
                        Icon { icon: FaCheck, width: 14, height: 14 }
                    }
                }
                button {
                    class: "btn btn-ghost btn-icon btn-danger-text",
                    title: "Hapus",
                    onclick: {
                        let d = d.clone();
                        move |_| pending_delete.set(Some(d.clone()))
                    },
                    Icon { icon: FaTrash, width: 14, height: 14 }
                }
            }
        }
    }
}

#[component]
fn CompleteDisposisiDialog(disposisi: Disposisi, on_close: EventHandler<()>, on_done: EventHandler<()>) -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut form = use_signal(CompleteDisposisiForm::default);
    let mut errors = use_signal(FormErrors::default);
    let mut saving = use_signal(|| false);
    let id = disposisi.id;

    let submit = move |_| {
        let api = api.clone();
        async move {
            let payload = match form.read().validate() {
                Ok(p) => p,
                Err(e) => {
                    errors.set(e);
                    return;
                }
            };
            saving.set(true);
            let result = api.disposisi().complete(id, &payload).await;
            saving.set(false);
            match result {
                Ok(_) => {
                    toast.success("Disposisi ditandai selesai");
                    on_done.call(());
                }
                Err(e) => toast.error(e.user_message("Gagal menyelesaikan disposisi")),
            }
        }
    };

    let error = errors.read().get("keterangan").map(String::from);
    rsx! {
        Dialog {
            title: "Selesaikan Disposisi",
            description: truncate(&disposisi.instruksi, 80),
            on_close: move |_| on_close.call(()),
            Field {
                label: "Catatan Penyelesaian",
                html_for: "complete-keterangan",
                required: true,
                error: error.clone(),
                Textarea {
                    id: "complete-keterangan",
                    value: form.read().keterangan.clone(),
                    placeholder: "Tindak lanjut yang sudah dilakukan",
                    invalid: error.is_some(),
                    oninput: move |v: String| form.write().keterangan = v,
                }
            }
            div {
                class: "modal-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: saving(),
                    onclick: move |_| on_close.call(()),
                    "Batal"
                }
                Button { loading: saving(), onclick: submit, "Tandai Selesai" }
            }
        }
    }
}

/// Printable disposition sheet of an incoming letter, with the letterhead
/// from the public settings.
#[component]
pub fn DisposisiPrint(surat: SuratMasuk) -> Element {
    let api = use_api();
    let users = use_user_directory();
    let mut current_id = use_signal(|| surat.id);
    if *current_id.peek() != surat.id {
        current_id.set(surat.id);
    }

    let org = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                match api.settings().public().await {
                    Ok(settings) => OrgProfile::from_settings(&settings),
                    Err(e) => {
                        tracing::debug!("Public settings unavailable, using default letterhead: {}", e);
                        OrgProfile::default()
                    }
                }
            }
        }
    });
    let dispositions = use_resource(move || {
        let api = api.clone();
        let surat_id = current_id();
        async move {
            let query = DisposisiQuery {
                surat_type: Some(SuratType::Masuk),
                limit: Some(200),
                ..Default::default()
            };
            api.disposisi()
                .list(&query)
                .await
                .map(|list| list.into_iter().filter(|d| d.surat_masuk_id == Some(surat_id)).collect::<Vec<_>>())
                .unwrap_or_default()
        }
    });

    let org = org.read().clone().unwrap_or_default();
    let list = dispositions.read().clone().unwrap_or_default();
    let user_list = users.read().clone().unwrap_or_default();
    let printed_at = now().format("%d/%m/%Y %H:%M").to_string();
    let total = list.len();

    rsx! {
        button {
            class: "btn btn-outline",
            onclick: move |_| print_page(),
            Icon { icon: FaPrint, width: 14, height: 14 }
            "Cetak Disposisi"
        }
        div {
            class: "print-sheet",
            div {
                class: "print-kop",
                div { class: "print-org", "{org.name}" }
                div { class: "print-unit", "{org.unit}" }
                div { class: "print-address", "{org.address}" }
            }
            h2 { class: "print-title", "LEMBAR DISPOSISI" }
            table {
                class: "print-info",
                tbody {
                    tr { th { "Nomor Surat" } td { "{surat.nomor_surat}" } }
                    tr { th { "Tanggal Terima" } td { "{format_date_long(surat.tanggal_terima)}" } }
                    tr { th { "Tanggal Surat" } td { "{format_date_long(surat.tanggal_surat)}" } }
                    tr { th { "Pengirim" } td { "{surat.pengirim}" } }
                    tr { th { "Perihal" } td { "{surat.perihal}" } }
                }
            }
            if list.is_empty() {
                p { class: "print-empty", "Belum ada disposisi untuk surat ini." }
            }
            for (idx, d) in list.into_iter().enumerate() {
                div {
                    key: "{d.id}",
                    class: "print-entry",
                    div {
                        class: "print-entry-head",
                        strong { "{idx + 1}. Kepada: {user_name(&user_list, Some(d.to_user_id))}" }
                        span { "Status: {d.status.label()}" }
                    }
                    p { "Dari: {user_name(&user_list, d.from_user_id)}" }
                    p { "Instruksi: {d.instruksi}" }
                    if let Some(note) = d.keterangan.clone() {
                        p { "Keterangan: {note}" }
                    }
                    if let Some(deadline) = d.deadline {
                        p { "Batas Waktu: {format_date_long(deadline)}" }
                    }
                }
            }
            div {
                class: "print-footer",
                span { "Total disposisi: {total}" }
                span { "Dicetak pada: {printed_at}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispo(id: i64, status: DisposisiStatus, deadline: Option<(i32, u32, u32)>) -> Disposisi {
        Disposisi {
            id,
            surat_type: None,
            surat_masuk_id: None,
            surat_keluar_id: Some(40 + id),
            from_user_id: Some(1),
            to_user_id: 2,
            instruksi: "Tindak lanjuti".into(),
            keterangan: None,
            status,
            deadline: deadline.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            tanggal_selesai: None,
            keterangan_selesai: None,
            created_at: format!("2024-05-0{id}T08:00:00"),
        }
    }

    #[test]
    fn test_overdue_filter() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let filter = DisposisiFilter {
            overdue_only: true,
            ..Default::default()
        };
        assert!(filter.matches(&dispo(1, DisposisiStatus::Pending, Some((2024, 5, 9))), today));
        assert!(!filter.matches(&dispo(2, DisposisiStatus::Selesai, Some((2024, 5, 9))), today));
        assert!(!filter.matches(&dispo(3, DisposisiStatus::Proses, None), today));
        assert!(DisposisiFilter::default().matches(&dispo(3, DisposisiStatus::Proses, None), today));
    }

    #[test]
    fn test_deadline_sort_puts_missing_last() {
        let rows = vec![
            dispo(1, DisposisiStatus::Pending, None),
            dispo(2, DisposisiStatus::Pending, Some((2024, 6, 1))),
            dispo(3, DisposisiStatus::Pending, Some((2024, 5, 20))),
        ];
        let state = TableState::new(10).sorted_by(DisposisiColumn::Deadline, SortDirection::Asc);
        let ids: Vec<i64> = state.apply(&rows).iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_link_follows_register() {
        let d = dispo(1, DisposisiStatus::Pending, None);
        assert_eq!(surat_page(&d), Some(Page::SuratKeluarDetail(41)));
        let query = DisposisiFilter {
            surat_type: Some(SuratType::Masuk),
            ..Default::default()
        }
        .query(50);
        assert_eq!(query.surat_type, Some(SuratType::Masuk));
        assert_eq!(query.limit, Some(50));
    }
}
