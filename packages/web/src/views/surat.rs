//! Letter routes. Each one forwards its path parameter to the shared view;
//! the views key their data on `id`, so moving between two letters of the
//! same kind reloads in place.

use dioxus::prelude::*;
use ui::views::{
    SuratKeluarCreateView, SuratKeluarDetailView, SuratKeluarEditView, SuratKeluarListView, SuratMasukCreateView,
    SuratMasukDetailView, SuratMasukEditView, SuratMasukListView,
};

use super::use_page_navigator;

#[component]
pub fn SuratMasuk() -> Element {
    let on_navigate = use_page_navigator();
    rsx! { SuratMasukListView { on_navigate } }
}

#[component]
pub fn SuratMasukNew() -> Element {
    let on_navigate = use_page_navigator();
    rsx! { SuratMasukCreateView { on_navigate } }
}

#[component]
pub fn SuratMasukDetail(id: i64) -> Element {
    let on_navigate = use_page_navigator();
    rsx! { SuratMasukDetailView { id, on_navigate } }
}

#[component]
pub fn SuratMasukEdit(id: i64) -> Element {
    let on_navigate = use_page_navigator();
    rsx! { SuratMasukEditView { id, on_navigate } }
}

#[component]
pub fn SuratKeluar() -> Element {
    let on_navigate = use_page_navigator();
    rsx! { SuratKeluarListView { on_navigate } }
}

#[component]
pub fn SuratKeluarNew() -> Element {
    let on_navigate = use_page_navigator();
    rsx! { SuratKeluarCreateView { on_navigate } }
}

#[component]
pub fn SuratKeluarDetail(id: i64) -> Element {
    let on_navigate = use_page_navigator();
    rsx! { SuratKeluarDetailView { id, on_navigate } }
}

#[component]
pub fn SuratKeluarEdit(id: i64) -> Element {
    let on_navigate = use_page_navigator();
    rsx! { SuratKeluarEditView { id, on_navigate } }
}
