use dioxus::prelude::*;
use ui::views::{AppSettingsView, AuditLogView, CategoriesView, ProfileView, SettingsLayoutView, UsersView};
use ui::{Page, SettingsTab};

use super::use_page_navigator;
use crate::Route;

/// Tab strip around the settings pages. Admin-only tabs are already guarded
/// by the outer layout.
#[component]
pub fn SettingsLayout() -> Element {
    let route = use_route::<Route>();
    let on_navigate = use_page_navigator();
    let active = match route.page() {
        Some(Page::Settings(tab)) => tab,
        _ => SettingsTab::Profile,
    };

    rsx! {
        SettingsLayoutView {
            active,
            on_navigate,
            Outlet::<Route> {}
        }
    }
}

#[component]
pub fn Profile() -> Element {
    rsx! { ProfileView {} }
}

#[component]
pub fn Users() -> Element {
    rsx! { UsersView {} }
}

#[component]
pub fn Categories() -> Element {
    rsx! { CategoriesView {} }
}

#[component]
pub fn AppSettings() -> Element {
    rsx! { AppSettingsView {} }
}

#[component]
pub fn AuditLog() -> Element {
    rsx! { AuditLogView {} }
}
