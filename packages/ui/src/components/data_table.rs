use dioxus::prelude::*;

use crate::table::SortDirection;

/// Clickable column header showing the current sort direction.
#[component]
pub fn SortHeader(#[props(into)] label: String, direction: Option<SortDirection>, on_sort: EventHandler<()>) -> Element {
    let arrow = match direction {
        Some(SortDirection::Asc) => "▲",
        Some(SortDirection::Desc) => "▼",
        None => "↕",
    };
    rsx! {
        th {
            button {
                class: if direction.is_some() { "sort-header sort-header-active" } else { "sort-header" },
                onclick: move |_| on_sort.call(()),
                "{label}"
                span { class: "sort-arrow", "{arrow}" }
            }
        }
    }
}

/// Previous/next pager under a table.
#[component]
pub fn Pagination(
    #[props(into)] summary: String,
    page: usize,
    page_count: usize,
    can_prev: bool,
    can_next: bool,
    on_page: EventHandler<usize>,
) -> Element {
    let shown = page + 1;
    rsx! {
        div {
            class: "pagination",
            span { class: "muted", "{summary}" }
            div {
                class: "pagination-controls",
                button {
                    class: "btn btn-outline btn-sm",
                    disabled: !can_prev,
                    onclick: move |_| on_page.call(page.saturating_sub(1)),
                    "Sebelumnya"
                }
                span { class: "pagination-page", "Halaman {shown} dari {page_count}" }
                button {
                    class: "btn btn-outline btn-sm",
                    disabled: !can_next,
                    onclick: move |_| on_page.call(page + 1),
                    "Berikutnya"
                }
            }
        }
    }
}
