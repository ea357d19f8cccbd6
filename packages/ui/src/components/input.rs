//! Form controls. Every control is controlled: the caller owns the value and
//! receives the new text through `oninput`/`onchange`.

use dioxus::prelude::*;

#[component]
pub fn Label(#[props(into, default)] html_for: String, #[props(default)] required: bool, children: Element) -> Element {
    rsx! {
        label {
            class: "label",
            r#for: "{html_for}",
            {children}
            if required {
                span { class: "label-required", " *" }
            }
        }
    }
}

#[component]
pub fn Input(
    #[props(into, default)] id: String,
    /// HTML input type.
    #[props(into, default = "text".to_string())]
    kind: String,
    #[props(into)] value: String,
    #[props(into, default)] placeholder: String,
    #[props(default)] disabled: bool,
    #[props(default)] invalid: bool,
    #[props(into, default)] autocomplete: String,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        input {
            id: "{id}",
            class: if invalid { "input input-invalid" } else { "input" },
            r#type: "{kind}",
            value: "{value}",
            placeholder: "{placeholder}",
            autocomplete: "{autocomplete}",
            disabled,
            oninput: move |evt: FormEvent| oninput.call(evt.value()),
        }
    }
}

#[component]
pub fn Textarea(
    #[props(into, default)] id: String,
    #[props(into)] value: String,
    #[props(into, default)] placeholder: String,
    #[props(default = 3)] rows: u32,
    #[props(default)] disabled: bool,
    #[props(default)] invalid: bool,
    #[props(default)] monospace: bool,
    oninput: EventHandler<String>,
) -> Element {
    let mut class = String::from("input textarea");
    if invalid {
        class.push_str(" input-invalid");
    }
    if monospace {
        class.push_str(" textarea-mono");
    }
    rsx! {
        textarea {
            id: "{id}",
            class: "{class}",
            rows: "{rows}",
            placeholder: "{placeholder}",
            disabled,
            value: "{value}",
            oninput: move |evt: FormEvent| oninput.call(evt.value()),
        }
    }
}

/// One `<option>`: wire value and visible label.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[component]
pub fn Select(
    #[props(into, default)] id: String,
    #[props(into)] value: String,
    options: Vec<SelectOption>,
    /// Label of a leading empty option, e.g. "Semua Status".
    #[props(into)]
    placeholder: Option<String>,
    #[props(default)] disabled: bool,
    #[props(default)] invalid: bool,
    onchange: EventHandler<String>,
) -> Element {
    rsx! {
        select {
            id: "{id}",
            class: if invalid { "input select input-invalid" } else { "input select" },
            disabled,
            value: "{value}",
            onchange: move |evt: FormEvent| onchange.call(evt.value()),
            if let Some(placeholder) = placeholder {
                option { value: "", selected: value.is_empty(), "{placeholder}" }
            }
            for opt in options {
                option {
                    key: "{opt.value}",
                    value: "{opt.value}",
                    selected: opt.value == value,
                    "{opt.label}"
                }
            }
        }
    }
}

#[component]
pub fn Checkbox(#[props(into, default)] id: String, checked: bool, #[props(into)] label: String, onchange: EventHandler<bool>) -> Element {
    rsx! {
        label {
            class: "checkbox",
            r#for: "{id}",
            input {
                id: "{id}",
                r#type: "checkbox",
                checked,
                onchange: move |evt: FormEvent| onchange.call(evt.checked()),
            }
            span { "{label}" }
        }
    }
}

#[component]
pub fn FieldError(message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            p { class: "field-error", "{message}" }
        }
    }
}

/// Label, control and validation message stacked in one block.
#[component]
pub fn Field(
    #[props(into)] label: String,
    #[props(into, default)] html_for: String,
    #[props(default)] required: bool,
    #[props(into)] hint: Option<String>,
    error: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "field",
            Label { html_for, required, "{label}" }
            {children}
            if let Some(hint) = hint {
                p { class: "field-hint", "{hint}" }
            }
            FieldError { message: error }
        }
    }
}
