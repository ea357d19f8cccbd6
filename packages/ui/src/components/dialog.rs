use dioxus::prelude::*;

use super::{Button, ButtonVariant};

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(on_close: EventHandler<()>, #[props(default)] wide: bool, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: if wide { "modal-card modal-card-wide" } else { "modal-card" },
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// Modal with a title bar and a body.
#[component]
pub fn Dialog(
    #[props(into)] title: String,
    #[props(into)] description: Option<String>,
    on_close: EventHandler<()>,
    #[props(default)] wide: bool,
    children: Element,
) -> Element {
    rsx! {
        ModalOverlay {
            on_close,
            wide,
            div {
                class: "modal-body",
                h2 { class: "modal-title", "{title}" }
                if let Some(description) = description {
                    p { class: "modal-text", "{description}" }
                }
                {children}
            }
        }
    }
}

/// Yes/no confirmation for destructive actions.
#[component]
pub fn ConfirmDialog(
    #[props(into)] title: String,
    #[props(into)] message: String,
    #[props(into, default = "Hapus".to_string())] confirm_label: String,
    #[props(default)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        Dialog {
            title,
            on_close: move |_| on_cancel.call(()),
            p { class: "modal-text", "{message}" }
            div {
                class: "modal-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: busy,
                    onclick: move |_| on_cancel.call(()),
                    "Batal"
                }
                Button {
                    variant: ButtonVariant::Destructive,
                    loading: busy,
                    onclick: move |_| on_confirm.call(()),
                    "{confirm_label}"
                }
            }
        }
    }
}
