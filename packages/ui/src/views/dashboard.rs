use api::models::{ChartDataPoint, DashboardSnapshot, RecentActivity, TrendPoint};
use dioxus::prelude::*;

use crate::auth::{use_api, use_auth};
use crate::components::{Card, CardContent, CardHeader, EmptyState, ErrorState, PageHeader, Spinner};
use crate::format::{now, relative_time};
use crate::icons::{FaBell, FaFileSignature, FaInbox, FaPaperPlane, FaPlus};
use crate::nav::Page;
use crate::Icon;

/// Bar length as a percentage of `max`, never zero for a non-zero value.
pub fn bar_percent(value: u64, max: u64) -> u64 {
    if max == 0 || value == 0 {
        return 0;
    }
    (value * 100 / max).max(2)
}

/// Share of dispositions already finished, in whole percent.
pub fn completion_rate(pending: u64, done: u64) -> u64 {
    let total = pending + done;
    if total == 0 {
        return 0;
    }
    done * 100 / total
}

#[component]
pub fn DashboardView(on_navigate: EventHandler<Page>) -> Element {
    let api = use_api();
    let auth = use_auth();
    let mut snapshot = use_resource(move || {
        let api = api.clone();
        async move { api.dashboard().snapshot().await }
    });

    let greeting = auth()
        .user
        .as_ref()
        .map(|u| format!("Selamat datang, {}", u.display_name()))
        .unwrap_or_default();

    let body = match &*snapshot.read() {
        None => rsx! { Spinner { label: "Memuat dashboard..." } },
        Some(Err(e)) => rsx! {
            ErrorState {
                message: e.user_message("Gagal memuat data dashboard"),
                on_retry: move |_| snapshot.restart(),
            }
        },
        Some(Ok(data)) => dashboard_body(data.clone(), on_navigate),
    };

    rsx! {
        PageHeader {
            title: "Dashboard",
            subtitle: greeting,
            button {
                class: "btn btn-primary",
                onclick: move |_| on_navigate.call(Page::SuratMasukNew),
                Icon { icon: FaPlus, width: 14, height: 14 }
                "Surat Masuk"
            }
            button {
                class: "btn btn-outline",
                onclick: move |_| on_navigate.call(Page::SuratKeluarNew),
                Icon { icon: FaPlus, width: 14, height: 14 }
                "Surat Keluar"
            }
        }
        {body}
    }
}

fn dashboard_body(data: DashboardSnapshot, on_navigate: EventHandler<Page>) -> Element {
    let stats = data.stats.clone();
    let max = data.trend_max();
    let rate = completion_rate(stats.disposisi_pending, stats.disposisi_selesai);

    rsx! {
        div {
            class: "stat-grid",
            StatCard {
                title: "Surat Masuk",
                value: stats.total_surat_masuk,
                detail: format!("{} bulan ini", stats.surat_masuk_bulan_ini),
                tone: "blue",
                onclick: move |_| on_navigate.call(Page::SuratMasuk),
                Icon { icon: FaInbox, width: 20, height: 20 }
            }
            StatCard {
                title: "Surat Keluar",
                value: stats.total_surat_keluar,
                detail: format!("{} bulan ini", stats.surat_keluar_bulan_ini),
                tone: "green",
                onclick: move |_| on_navigate.call(Page::SuratKeluar),
                Icon { icon: FaPaperPlane, width: 20, height: 20 }
            }
            StatCard {
                title: "Disposisi Pending",
                value: stats.disposisi_pending,
                detail: format!("{} selesai", stats.disposisi_selesai),
                tone: "amber",
                onclick: move |_| on_navigate.call(Page::Disposisi),
                Icon { icon: FaFileSignature, width: 20, height: 20 }
            }
            StatCard {
                title: "Notifikasi",
                value: stats.notifikasi_unread,
                detail: "belum dibaca".to_string(),
                tone: "purple",
                Icon { icon: FaBell, width: 20, height: 20 }
            }
        }

        div {
            class: "dashboard-grid",
            Card {
                class: "dashboard-wide",
                CardHeader { title: "Tren Surat", description: "Surat masuk dan keluar per bulan" }
                CardContent { {trend_chart(&data.trend, max)} }
            }
            Card {
                CardHeader { title: "Per Kategori", description: "Distribusi surat masuk" }
                CardContent { {kategori_chart(&data.by_kategori)} }
            }
            Card {
                CardHeader { title: "Status Disposisi" }
                CardContent {
                    div {
                        class: "disposisi-summary",
                        div {
                            class: "summary-row",
                            span { "Pending" }
                            strong { "{stats.disposisi_pending}" }
                        }
                        div {
                            class: "summary-row",
                            span { "Selesai" }
                            strong { "{stats.disposisi_selesai}" }
                        }
                        div {
                            class: "progress",
                            div { class: "progress-fill", style: "width: {rate}%;" }
                        }
                        p { class: "muted", "{rate}% disposisi telah diselesaikan" }
                        button {
                            class: "btn btn-outline btn-sm",
                            onclick: move |_| on_navigate.call(Page::Disposisi),
                            "Lihat disposisi"
                        }
                    }
                }
            }
            Card {
                class: "dashboard-wide",
                CardHeader { title: "Aktivitas Terbaru" }
                CardContent { {recent_list(&data.recent, on_navigate)} }
            }
        }
    }
}

#[component]
fn StatCard(
    #[props(into)] title: String,
    value: u64,
    detail: String,
    tone: &'static str,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: if onclick.is_some() { "stat-card stat-card-link" } else { "stat-card" },
            onclick: move |evt| {
                if let Some(handler) = onclick {
                    handler.call(evt);
                }
            },
            div {
                div { class: "stat-title", "{title}" }
                div { class: "stat-value", "{value}" }
                div { class: "muted", "{detail}" }
            }
            div { class: "stat-icon stat-icon-{tone}", {children} }
        }
    }
}

fn trend_chart(trend: &[TrendPoint], max: u64) -> Element {
    if trend.is_empty() {
        return rsx! { EmptyState { title: "Belum ada data tren" } };
    }
    rsx! {
        div {
            class: "trend-chart",
            for point in trend.iter().cloned() {
                {
                    let masuk_height = bar_percent(point.masuk, max);
                    let keluar_height = bar_percent(point.keluar, max);
                    rsx! {
                        div {
                            key: "{point.label}",
                            class: "trend-column",
                            div {
                                class: "trend-bars",
                                div {
                                    class: "trend-bar trend-bar-masuk",
                                    style: "height: {masuk_height}%;",
                                    title: "Masuk: {point.masuk}",
                                }
                                div {
                                    class: "trend-bar trend-bar-keluar",
                                    style: "height: {keluar_height}%;",
                                    title: "Keluar: {point.keluar}",
                                }
                            }
                            span { class: "trend-label", "{point.label}" }
                        }
                    }
                }
            }
        }
        div {
            class: "chart-legend",
            span { span { class: "legend-dot legend-masuk" } "Surat Masuk" }
            span { span { class: "legend-dot legend-keluar" } "Surat Keluar" }
        }
    }
}

fn kategori_chart(points: &[ChartDataPoint]) -> Element {
    if points.is_empty() {
        return rsx! { EmptyState { title: "Belum ada data kategori" } };
    }
    let max = points.iter().map(|p| p.value).max().unwrap_or(0);
    let rows: Vec<(String, u64, u64, String)> = points
        .iter()
        .map(|p| {
            let color = p.color.clone().unwrap_or_else(|| "#3b82f6".to_string());
            (p.label.clone(), p.value, bar_percent(p.value, max), color)
        })
        .collect();
    rsx! {
        div {
            class: "hbar-chart",
            for (label, value, width, color) in rows {
                div {
                    key: "{label}",
                    class: "hbar-row",
                    span { class: "hbar-label", "{label}" }
                    div {
                        class: "hbar-track",
                        div {
                            class: "hbar-fill",
                            style: "width: {width}%; background: {color};",
                        }
                    }
                    span { class: "hbar-value", "{value}" }
                }
            }
        }
    }
}

fn recent_list(recent: &[RecentActivity], on_navigate: EventHandler<Page>) -> Element {
    if recent.is_empty() {
        return rsx! { EmptyState { title: "Belum ada aktivitas" } };
    }
    let now = now();
    rsx! {
        ul {
            class: "activity-list",
            for item in recent.iter().cloned() {
                li {
                    key: "{item.kind}-{item.id}",
                    class: "activity-item",
                    onclick: {
                        let link = item.link.clone();
                        move |_| {
                            if let Some(page) = link.as_deref().and_then(Page::from_link) {
                                on_navigate.call(page);
                            }
                        }
                    },
                    span { class: "avatar avatar-sm", "{item.initials()}" }
                    div {
                        class: "activity-body",
                        div { class: "activity-title", "{item.title}" }
                        if !item.description.is_empty() {
                            div { class: "muted", "{item.description}" }
                        }
                    }
                    span { class: "activity-time", "{relative_time(&item.created_at, now)}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_percent() {
        assert_eq!(bar_percent(0, 10), 0);
        assert_eq!(bar_percent(5, 0), 0);
        assert_eq!(bar_percent(10, 10), 100);
        assert_eq!(bar_percent(5, 10), 50);
        assert_eq!(bar_percent(1, 1000), 2);
    }

    #[test]
    fn test_completion_rate() {
        assert_eq!(completion_rate(0, 0), 0);
        assert_eq!(completion_rate(3, 1), 25);
        assert_eq!(completion_rate(0, 7), 100);
    }
}
