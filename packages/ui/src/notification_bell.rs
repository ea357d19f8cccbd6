//! Header bell with the latest notifications.
//!
//! The list and the unread count are fetched together on mount, whenever the
//! dropdown opens, and every `notifications.poll_interval_secs` while the bell
//! is mounted. The polling task belongs to the component scope, so it stops
//! when the shell unmounts. Refresh failures are logged and otherwise ignored;
//! only user actions raise toasts.
//!
//! Mark-read, mark-all and delete update the feed before the request goes
//! out. A failed request toasts and re-fetches to undo the optimistic change.

use std::time::Duration;

use api::models::{Notification, NotificationKind, NotificationQuery};
use api::ApiClient;
use dioxus::prelude::*;

use crate::auth::{use_api, use_config};
use crate::format::{now, relative_time};
use crate::platform::sleep;
use crate::toast::use_toast;
use crate::Icon;
use crate::icons::{FaBell, FaCheckDouble, FaTrash};

const BELL_CSS: Asset = asset!("/assets/styling/notification_bell.css");

/// The bell's view of the notification list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationFeed {
    pub items: Vec<Notification>,
    pub unread: u64,
}

impl NotificationFeed {
    pub fn replace(&mut self, items: Vec<Notification>, unread: u64) {
        self.items = items;
        self.unread = unread;
    }

    /// Returns false when the notification was already read or is unknown.
    pub fn mark_read(&mut self, id: i64) -> bool {
        match self.items.iter_mut().find(|n| n.id == id && !n.is_read) {
            Some(n) => {
                n.is_read = true;
                self.unread = self.unread.saturating_sub(1);
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.items {
            n.is_read = true;
        }
        self.unread = 0;
    }

    pub fn remove(&mut self, id: i64) -> Option<Notification> {
        let index = self.items.iter().position(|n| n.id == id)?;
        let removed = self.items.remove(index);
        if !removed.is_read {
            self.unread = self.unread.saturating_sub(1);
        }
        Some(removed)
    }

    /// Text for the red counter, capped at `99+`.
    pub fn badge(&self) -> Option<String> {
        match self.unread {
            0 => None,
            n if n > 99 => Some("99+".to_string()),
            n => Some(n.to_string()),
        }
    }
}

pub fn kind_icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::SuratMasuk => "📥",
        NotificationKind::SuratKeluar => "📤",
        NotificationKind::Disposisi => "📋",
        NotificationKind::Deadline => "⏰",
        NotificationKind::StatusUpdate => "🔄",
        NotificationKind::System => "🔔",
    }
}

async fn refresh(api: ApiClient, limit: u32, mut feed: Signal<NotificationFeed>, mut loading: Signal<bool>) {
    loading.set(true);
    let service = api.notifications();
    let query = NotificationQuery {
        limit: Some(limit),
        ..Default::default()
    };
    match futures::try_join!(service.list(&query), service.stats()) {
        Ok((items, stats)) => feed.write().replace(items, stats.unread),
        Err(e) => tracing::debug!("Notification refresh failed: {}", e),
    }
    loading.set(false);
}

#[component]
pub fn NotificationBell(on_open_link: EventHandler<String>) -> Element {
    let api = use_api();
    let config = use_config();
    let toast = use_toast();
    let feed = use_signal(NotificationFeed::default);
    let loading = use_signal(|| false);
    let mut open = use_signal(|| false);

    let limit = config.notifications.list_limit;
    let interval = config.notifications.poll_interval_secs;

    use_effect({
        let api = api.clone();
        move || {
            let api = api.clone();
            spawn(async move {
                refresh(api.clone(), limit, feed, loading).await;
                if interval == 0 {
                    return;
                }
                loop {
                    sleep(Duration::from_secs(u64::from(interval))).await;
                    refresh(api.clone(), limit, feed, loading).await;
                }
            });
        }
    });

    let toggle = {
        let api = api.clone();
        move |_| {
            let opening = !open();
            open.set(opening);
            if opening {
                spawn(refresh(api.clone(), limit, feed, loading));
            }
        }
    };

    let on_read = use_callback({
        let api = api.clone();
        move |id: i64| {
            let api = api.clone();
            let mut feed = feed;
            if !feed.write().mark_read(id) {
                return;
            }
            spawn(async move {
                if let Err(e) = api.notifications().mark_read(id).await {
                    toast.error(e.user_message("Gagal menandai notifikasi"));
                    refresh(api.clone(), limit, feed, loading).await;
                }
            });
        }
    });

    let on_delete = use_callback({
        let api = api.clone();
        move |id: i64| {
            let api = api.clone();
            let mut feed = feed;
            if feed.write().remove(id).is_none() {
                return;
            }
            spawn(async move {
                if let Err(e) = api.notifications().delete(id).await {
                    toast.error(e.user_message("Gagal menghapus notifikasi"));
                    refresh(api.clone(), limit, feed, loading).await;
                }
            });
        }
    });

    let mark_all = move |_| {
        let api = api.clone();
        let mut feed = feed;
        feed.write().mark_all_read();
        spawn(async move {
            match api.notifications().mark_all_read().await {
                Ok(()) => toast.success("Semua notifikasi ditandai sebagai dibaca"),
                Err(e) => {
                    toast.error(e.user_message("Gagal menandai semua notifikasi"));
                    refresh(api.clone(), limit, feed, loading).await;
                }
            }
        });
    };

    let on_select = use_callback(move |n: Notification| {
        on_read.call(n.id);
        if let Some(link) = n.link.filter(|l| !l.is_empty()) {
            open.set(false);
            on_open_link.call(link);
        }
    });

    let current = feed();
    let now = now();

    rsx! {
        document::Stylesheet { href: BELL_CSS }

        div {
            class: "notif-bell",
            button {
                class: "notif-trigger",
                title: "Notifikasi",
                onclick: toggle,
                Icon { icon: FaBell, width: 18, height: 18 }
                if let Some(badge) = current.badge() {
                    span { class: "notif-badge", "{badge}" }
                }
                span { class: "sr-only", "Notifikasi" }
            }

            if open() {
                div { class: "notif-backdrop", onclick: move |_| open.set(false) }
                div {
                    class: "notif-panel",
                    div {
                        class: "notif-panel-header",
                        div {
                            h4 { "Notifikasi" }
                            if current.unread > 0 {
                                p { class: "muted", "{current.unread} belum dibaca" }
                            }
                        }
                        if current.unread > 0 {
                            button {
                                class: "notif-mark-all",
                                onclick: mark_all,
                                Icon { icon: FaCheckDouble, width: 12, height: 12 }
                                "Tandai semua"
                            }
                        }
                    }

                    div {
                        class: "notif-list",
                        if loading() && current.items.is_empty() {
                            div { class: "notif-empty", "Memuat..." }
                        } else if current.items.is_empty() {
                            div {
                                class: "notif-empty",
                                Icon { icon: FaBell, width: 28, height: 28 }
                                span { "Tidak ada notifikasi" }
                            }
                        } else {
                            for n in current.items.iter().cloned() {
                                div {
                                    key: "{n.id}",
                                    class: if n.is_read { "notif-item" } else { "notif-item notif-item--unread" },
                                    onclick: {
                                        let n = n.clone();
                                        move |_| on_select.call(n.clone())
                                    },
                                    div { class: "notif-icon", "{kind_icon(n.tipe)}" }
                                    div {
                                        class: "notif-body",
                                        div { class: "notif-title", "{n.judul}" }
                                        div { class: "notif-message", "{n.pesan}" }
                                        div { class: "notif-time", "{relative_time(&n.created_at, now)}" }
                                    }
                                    div {
                                        class: "notif-actions",
                                        if !n.is_read {
                                            span { class: "notif-dot" }
                                        }
                                        button {
                                            class: "notif-delete",
                                            title: "Hapus",
                                            onclick: move |evt: Event<MouseData>| {
                                                evt.stop_propagation();
                                                on_delete.call(n.id);
                                            },
                                            Icon { icon: FaTrash, width: 12, height: 12 }
                                        }
                                    }
                                }
                            }
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

    fn notif(id: i64, is_read: bool) -> Notification {
        Notification {
            id,
            tipe: NotificationKind::Disposisi,
            judul: format!("Disposisi #{id}"),
            pesan: "Mohon ditindaklanjuti".into(),
            is_read,
            created_at: "2024-05-10T08:00:00".into(),
            link: Some("/disposisi".into()),
            read_at: None,
        }
    }

    fn feed() -> NotificationFeed {
        let mut feed = NotificationFeed::default();
        feed.replace(vec![notif(1, false), notif(2, true), notif(3, false)], 2);
        feed
    }

    #[test]
    fn test_mark_read_once() {
        let mut feed = feed();
        assert!(feed.mark_read(1));
        assert_eq!(feed.unread, 1);
        assert!(!feed.mark_read(1));
        assert!(!feed.mark_read(2));
        assert!(!feed.mark_read(99));
        assert_eq!(feed.unread, 1);
    }

    #[test]
    fn test_remove_adjusts_unread() {
        let mut feed = feed();
        assert_eq!(feed.remove(2).map(|n| n.id), Some(2));
        assert_eq!(feed.unread, 2);
        feed.remove(3);
        assert_eq!(feed.unread, 1);
        assert!(feed.remove(3).is_none());
        assert_eq!(feed.items.len(), 1);
    }

    #[test]
    fn test_mark_all_read() {
        let mut feed = feed();
        feed.mark_all_read();
        assert_eq!(feed.unread, 0);
        assert!(feed.items.iter().all(|n| n.is_read));
        assert_eq!(feed.badge(), None);
    }

    #[test]
    fn test_badge_caps_at_99() {
        let mut feed = NotificationFeed::default();
        feed.unread = 7;
        assert_eq!(feed.badge().as_deref(), Some("7"));
        feed.unread = 99;
        assert_eq!(feed.badge().as_deref(), Some("99"));
        feed.unread = 100;
        assert_eq!(feed.badge().as_deref(), Some("99+"));
    }
}
