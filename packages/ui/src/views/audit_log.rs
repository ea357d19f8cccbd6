use std::cmp::Ordering;
use std::collections::HashMap;

use api::models::{AuditAction, AuditLog, AuditQuery, AuditStats};
use dioxus::prelude::*;

use crate::auth::{use_api, use_config};
use crate::components::{
    Badge, BadgeTone, Card, EmptyState, ErrorState, Input, Pagination, Select, SelectOption, SortHeader, Spinner,
};
use crate::format::format_timestamp;
use crate::table::{compare_text, SortColumn, SortDirection, TableState};

use super::disposisi_dialog::{use_user_directory, user_name};

const DAY_CHOICES: [u32; 4] = [1, 7, 30, 90];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AuditColumn {
    Waktu,
    Aksi,
    Tabel,
}

impl SortColumn<AuditLog> for AuditColumn {
    fn compare(self, a: &AuditLog, b: &AuditLog) -> Ordering {
        match self {
            // ISO timestamps order lexically.
            AuditColumn::Waktu => a.created_at.cmp(&b.created_at),
            AuditColumn::Aksi => a.action.label().cmp(b.action.label()),
            AuditColumn::Tabel => compare_text(
                a.table_name.as_deref().unwrap_or_default(),
                b.table_name.as_deref().unwrap_or_default(),
            ),
        }
    }
}

fn action_tone(action: AuditAction) -> BadgeTone {
    match action {
        AuditAction::Create => BadgeTone::Success,
        AuditAction::Update => BadgeTone::Info,
        AuditAction::Delete => BadgeTone::Danger,
        AuditAction::LoginSuccess => BadgeTone::Accent,
        AuditAction::LoginFailed => BadgeTone::Warning,
        AuditAction::Other => BadgeTone::Neutral,
    }
}

/// Counts sorted by descending value, at most `limit` entries.
fn top_counts(counts: &HashMap<String, u64>, limit: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(limit);
    entries
}

fn pretty_json(value: &Option<serde_json::Value>) -> Option<String> {
    value
        .as_ref()
        .filter(|v| !v.is_null())
        .map(|v| serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string()))
}

#[derive(Clone, Debug, PartialEq)]
struct AuditFilter {
    action: Option<AuditAction>,
    table_name: String,
    days: u32,
}

impl AuditFilter {
    fn query(&self, limit: u32) -> AuditQuery {
        let table = self.table_name.trim();
        AuditQuery {
            limit: Some(limit),
            action: self.action,
            table_name: (!table.is_empty()).then(|| table.to_string()),
            days: Some(self.days),
            ..Default::default()
        }
    }
}

#[component]
pub fn AuditLogView() -> Element {
    let api = use_api();
    let config = use_config();
    let users = use_user_directory();
    let mut filter = use_signal(|| AuditFilter {
        action: None,
        table_name: String::new(),
        days: 7,
    });
    let mut table = use_signal(|| {
        TableState::new(config.tables.page_size as usize).sorted_by(AuditColumn::Waktu, SortDirection::Desc)
    });
    let expanded = use_signal(|| Option::<i64>::None);

    let fetch_limit = config.tables.fetch_limit;
    let mut logs = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let query = filter.read().query(fetch_limit);
            async move { api.audit().list(&query).await }
        }
    });
    let stats = use_resource(move || {
        let api = api.clone();
        let days = filter.read().days;
        async move {
            api.audit().stats(days).await.unwrap_or_else(|e| {
                tracing::warn!("Failed to load audit stats: {}", e);
                AuditStats::default()
            })
        }
    });

    let current = filter();
    let user_list = users.read().clone().unwrap_or_default();

    let summary = stats.read().clone().map(|s| {
        let actions = top_counts(&s.by_action, 5);
        let tables = top_counts(&s.by_table, 5);
        rsx! {
            div {
                class: "stat-grid",
                div {
                    class: "stat-card",
                    div { class: "stat-label", "Total aktivitas" }
                    div { class: "stat-value", "{s.total}" }
                    div { class: "muted", "{current.days} hari terakhir" }
                }
                div {
                    class: "stat-card",
                    div { class: "stat-label", "Per aksi" }
                    ul {
                        class: "stat-breakdown",
                        for (name, count) in actions {
                            li { key: "{name}", span { "{name}" } strong { "{count}" } }
                        }
                    }
                }
                div {
                    class: "stat-card",
                    div { class: "stat-label", "Per tabel" }
                    ul {
                        class: "stat-breakdown",
                        for (name, count) in tables {
                            li { key: "{name}", span { class: "mono", "{name}" } strong { "{count}" } }
                        }
                    }
                }
            }
        }
    });

    let body = match &*logs.read() {
        None => rsx! { Spinner { label: "Memuat audit log..." } },
        Some(Err(e)) => rsx! {
            ErrorState {
                message: e.user_message("Gagal memuat audit log"),
                on_retry: move |_| logs.restart(),
            }
        },
        Some(Ok(rows)) if rows.is_empty() => rsx! {
            EmptyState { title: "Tidak ada aktivitas", description: "Belum ada aktivitas pada rentang waktu ini" }
        },
        Some(Ok(rows)) => {
            let total = rows.len();
            let state = table();
            let page_rows: Vec<AuditLog> = state.apply(rows).into_iter().cloned().collect();
            rsx! {
                div {
                    class: "table-wrap",
                    table {
                        class: "table",
                        thead {
                            tr {
                                SortHeader { label: "Waktu", direction: state.direction(AuditColumn::Waktu), on_sort: move |_| table.write().toggle_sort(AuditColumn::Waktu) }
                                th { "User" }
                                SortHeader { label: "Aksi", direction: state.direction(AuditColumn::Aksi), on_sort: move |_| table.write().toggle_sort(AuditColumn::Aksi) }
                                SortHeader { label: "Tabel", direction: state.direction(AuditColumn::Tabel), on_sort: move |_| table.write().toggle_sort(AuditColumn::Tabel) }
                                th { "Keterangan" }
                                th { "IP" }
                            }
                        }
                        tbody {
                            for log in page_rows {
                                {audit_row(log, &user_list, expanded)}
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
    };

    let action_options: Vec<SelectOption> = AuditAction::FILTERABLE
        .into_iter()
        .map(|a| SelectOption::new(a.as_str(), a.label()))
        .collect();
    let day_options: Vec<SelectOption> = DAY_CHOICES
        .into_iter()
        .map(|d| SelectOption::new(d.to_string(), format!("{d} hari terakhir")))
        .collect();

    rsx! {
        {summary}
        Card {
            div {
                class: "filter-bar",
                Select {
                    value: current.action.map(|a| a.as_str()).unwrap_or_default(),
                    options: action_options,
                    placeholder: "Semua Aksi",
                    onchange: move |v: String| {
                        filter.write().action = AuditAction::FILTERABLE.into_iter().find(|a| a.as_str() == v);
                        table.write().reset_page();
                    },
                }
                Input {
                    value: current.table_name.clone(),
                    placeholder: "Nama tabel, mis. surat_masuk",
                    oninput: move |v: String| {
                        filter.write().table_name = v;
                        table.write().reset_page();
                    },
                }
                Select {
                    value: current.days.to_string(),
                    options: day_options,
                    onchange: move |v: String| {
                        if let Ok(days) = v.parse() {
                            filter.write().days = days;
                            table.write().reset_page();
                        }
                    },
                }
            }
            {body}
        }
    }
}

fn audit_row(log: AuditLog, users: &[api::models::User], mut expanded: Signal<Option<i64>>) -> Element {
    let id = log.id;
    let open = expanded() == Some(id);
    let who = user_name(users, log.user_id);
    let table_name = log.table_name.clone().unwrap_or_else(|| "-".to_string());
    let record = log.record_id.map(|r| format!(" #{r}")).unwrap_or_default();
    let description = log.description.clone().unwrap_or_default();
    let ip = log.ip_address.clone().unwrap_or_else(|| "-".to_string());
    let old_data = pretty_json(&log.old_data);
    let new_data = pretty_json(&log.new_data);
    let has_detail = old_data.is_some() || new_data.is_some() || log.endpoint.is_some();
    let endpoint = match (&log.method, &log.endpoint) {
        (Some(m), Some(e)) => format!("{m} {e}"),
        (None, Some(e)) => e.clone(),
        _ => String::new(),
    };
    rsx! {
        tr {
            key: "{id}",
            class: if has_detail { "row-clickable" } else { "" },
            onclick: move |_| {
                if has_detail {
                    expanded.set(if open { None } else { Some(id) });
                }
            },
            td { class: "muted", "{format_timestamp(&log.created_at)}" }
            td { "{who}" }
            td { Badge { tone: action_tone(log.action), "{log.action.label()}" } }
            td { class: "mono", "{table_name}{record}" }
            td { "{description}" }
            td { class: "mono", "{ip}" }
        }
        if open {
            tr {
                key: "{id}-detail",
                class: "row-detail",
                td {
                    colspan: 6,
                    if !endpoint.is_empty() {
                        p { class: "mono", "{endpoint}" }
                    }
                    div {
                        class: "json-diff",
                        if let Some(old) = old_data {
                            div { h4 { "Sebelum" } pre { class: "json-block", "{old}" } }
                        }
                        if let Some(new) = new_data {
                            div { h4 { "Sesudah" } pre { class: "json-block", "{new}" } }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_counts_orders_by_count_then_name() {
        let counts: HashMap<String, u64> = [("UPDATE", 4), ("CREATE", 9), ("DELETE", 4), ("LOGIN_FAILED", 1)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let top = top_counts(&counts, 3);
        assert_eq!(
            top,
            vec![("CREATE".to_string(), 9), ("DELETE".to_string(), 4), ("UPDATE".to_string(), 4)]
        );
    }

    #[test]
    fn test_filter_query_skips_blank_table() {
        let filter = AuditFilter {
            action: Some(AuditAction::Delete),
            table_name: "  ".into(),
            days: 30,
        };
        let query = filter.query(200);
        assert_eq!(query.table_name, None);
        assert_eq!(query.days, Some(30));
        assert_eq!(query.action, Some(AuditAction::Delete));
    }

    #[test]
    fn test_pretty_json_ignores_null() {
        assert_eq!(pretty_json(&Some(serde_json::Value::Null)), None);
        assert_eq!(pretty_json(&None), None);
        let value = serde_json::json!({"status": "selesai"});
        assert!(pretty_json(&Some(value)).unwrap().contains("\"status\": \"selesai\""));
    }
}
