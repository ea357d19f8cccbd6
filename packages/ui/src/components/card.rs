use dioxus::prelude::*;

#[component]
pub fn Card(#[props(into, default)] class: String, children: Element) -> Element {
    rsx! {
        div { class: "card {class}", {children} }
    }
}

#[component]
pub fn CardHeader(#[props(into)] title: String, #[props(into)] description: Option<String>, children: Element) -> Element {
    rsx! {
        div {
            class: "card-header",
            div {
                h3 { class: "card-title", "{title}" }
                if let Some(description) = description {
                    p { class: "card-description", "{description}" }
                }
            }
            div { class: "card-actions", {children} }
        }
    }
}

#[component]
pub fn CardContent(children: Element) -> Element {
    rsx! {
        div { class: "card-content", {children} }
    }
}

/// Page title row with optional actions on the right.
#[component]
pub fn PageHeader(#[props(into)] title: String, #[props(into)] subtitle: Option<String>, children: Element) -> Element {
    rsx! {
        div {
            class: "page-header",
            div {
                h1 { class: "page-title", "{title}" }
                if let Some(subtitle) = subtitle {
                    p { class: "page-subtitle", "{subtitle}" }
                }
            }
            div { class: "page-actions", {children} }
        }
    }
}

/// Read-only label/value pair on detail pages.
#[component]
pub fn DetailRow(#[props(into)] label: String, children: Element) -> Element {
    rsx! {
        div {
            class: "detail-row",
            dt { "{label}" }
            dd { {children} }
        }
    }
}
