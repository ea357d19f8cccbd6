use dioxus::prelude::*;

#[component]
pub fn Spinner(#[props(into)] label: Option<String>) -> Element {
    rsx! {
        div {
            class: "spinner-block",
            span { class: "spinner" }
            if let Some(label) = label {
                span { class: "muted", "{label}" }
            }
        }
    }
}

#[component]
pub fn EmptyState(#[props(into)] title: String, #[props(into)] description: Option<String>, children: Element) -> Element {
    rsx! {
        div {
            class: "empty-state",
            p { class: "empty-title", "{title}" }
            if let Some(description) = description {
                p { class: "muted", "{description}" }
            }
            {children}
        }
    }
}

/// Inline banner for a failed load, with a retry hook.
#[component]
pub fn ErrorState(#[props(into)] message: String, on_retry: Option<EventHandler<()>>) -> Element {
    rsx! {
        div {
            class: "error-state",
            p { "{message}" }
            if let Some(on_retry) = on_retry {
                button {
                    class: "btn btn-outline btn-sm",
                    onclick: move |_| on_retry.call(()),
                    "Coba lagi"
                }
            }
        }
    }
}
