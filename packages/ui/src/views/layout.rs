use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::components::COMPONENTS_CSS;
use crate::icons::{FaBars, FaFileSignature, FaGaugeHigh, FaGear, FaInbox, FaPaperPlane, FaUsers};
use crate::nav::{sidebar_items, NavTarget, Page};
use crate::notification_bell::NotificationBell;
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

fn nav_icon(target: NavTarget) -> Element {
    match target {
        NavTarget::Dashboard => rsx! { Icon { icon: FaGaugeHigh, width: 16, height: 16 } },
        NavTarget::SuratMasuk => rsx! { Icon { icon: FaInbox, width: 16, height: 16 } },
        NavTarget::SuratKeluar => rsx! { Icon { icon: FaPaperPlane, width: 16, height: 16 } },
        NavTarget::Disposisi => rsx! { Icon { icon: FaFileSignature, width: 16, height: 16 } },
        NavTarget::Users => rsx! { Icon { icon: FaUsers, width: 16, height: 16 } },
        NavTarget::Settings => rsx! { Icon { icon: FaGear, width: 16, height: 16 } },
    }
}

/// Shared sidebar layout for every signed-in page.
///
/// Platform packages translate [`Page`] values into router navigation and
/// pass the router outlet as children.
#[component]
pub fn AppLayoutView(
    /// Sidebar entry to highlight.
    active: Option<NavTarget>,
    on_navigate: EventHandler<Page>,
    /// Called after the session was cleared by the logout button.
    on_logout: EventHandler<()>,
    children: Element,
) -> Element {
    let auth = use_auth();
    let mut collapsed = use_signal(|| false);
    let mut menu_open = use_signal(|| false);

    let session = auth();
    let Some(user) = session.user.clone() else {
        return rsx! {};
    };
    let items = sidebar_items(user.role);

    rsx! {
        document::Stylesheet { href: COMPONENTS_CSS }
        document::Stylesheet { href: VIEWS_CSS }

        div {
            class: if collapsed() { "app-shell app-shell-collapsed" } else { "app-shell" },
            aside {
                class: "sidebar",
                div {
                    class: "sidebar-brand",
                    span { class: "sidebar-logo", "AS" }
                    if !collapsed() {
                        div {
                            div { class: "sidebar-title", "Arsip Surat" }
                            div { class: "sidebar-subtitle", "Sistem Administrasi" }
                        }
                    }
                }
                nav {
                    class: "sidebar-nav",
                    for item in items {
                        button {
                            key: "{item.label}",
                            class: if active == Some(item.target) { "sidebar-item sidebar-item-active" } else { "sidebar-item" },
                            title: "{item.label}",
                            onclick: move |_| on_navigate.call(item.target.page()),
                            {nav_icon(item.target)}
                            if !collapsed() {
                                span { "{item.label}" }
                            }
                        }
                    }
                }
            }

            div {
                class: "app-main",
                header {
                    class: "app-header",
                    button {
                        class: "btn btn-ghost btn-icon",
                        title: "Tampilkan/sembunyikan menu",
                        onclick: move |_| collapsed.toggle(),
                        Icon { icon: FaBars, width: 16, height: 16 }
                    }
                    div { class: "app-header-spacer" }
                    NotificationBell {
                        on_open_link: move |link: String| match Page::from_link(&link) {
                            Some(page) => on_navigate.call(page),
                            None => tracing::debug!("Ignoring notification link {}", link),
                        },
                    }
                    div {
                        class: "user-menu",
                        button {
                            class: "user-menu-trigger",
                            onclick: move |_| menu_open.toggle(),
                            span { class: "avatar", "{user.initials()}" }
                            span {
                                class: "user-menu-name",
                                span { "{user.display_name()}" }
                                span { class: "muted", "{user.role.label()}" }
                            }
                        }
                        if menu_open() {
                            div { class: "notif-backdrop", onclick: move |_| menu_open.set(false) }
                            div {
                                class: "user-menu-panel",
                                div {
                                    class: "user-menu-header",
                                    div { class: "user-menu-fullname", "{user.display_name()}" }
                                    div { class: "muted", "{user.email}" }
                                }
                                button {
                                    class: "user-menu-item",
                                    onclick: move |_| {
                                        menu_open.set(false);
                                        on_navigate.call(NavTarget::Settings.page());
                                    },
                                    "Profil & Pengaturan"
                                }
                                LogoutButton {
                                    class: "user-menu-item user-menu-logout",
                                    on_logout: move |_| {
                                        menu_open.set(false);
                                        on_logout.call(());
                                    },
                                }
                            }
                        }
                    }
                }
                main { class: "app-content", {children} }
            }
        }
    }
}
