use dioxus::prelude::*;
use ui::views::{DashboardView, DisposisiView};

use super::use_page_navigator;

#[component]
pub fn Dashboard() -> Element {
    let on_navigate = use_page_navigator();
    rsx! {
        DashboardView { on_navigate }
    }
}

#[component]
pub fn Disposisi() -> Element {
    let on_navigate = use_page_navigator();
    rsx! {
        DisposisiView { on_navigate }
    }
}
