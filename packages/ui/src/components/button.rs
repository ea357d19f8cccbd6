use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Ghost,
    Destructive,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn btn-primary",
            ButtonVariant::Secondary => "btn btn-secondary",
            ButtonVariant::Outline => "btn btn-outline",
            ButtonVariant::Ghost => "btn btn-ghost",
            ButtonVariant::Destructive => "btn btn-destructive",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Icon,
}

impl ButtonSize {
    fn class(self) -> &'static str {
        match self {
            ButtonSize::Small => " btn-sm",
            ButtonSize::Medium => "",
            ButtonSize::Icon => " btn-icon",
        }
    }
}

/// A styled button. While `loading` is set it is disabled and shows a spinner.
#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] size: ButtonSize,
    #[props(default)] disabled: bool,
    #[props(default)] loading: bool,
    #[props(into, default)] title: String,
    #[props(into, default)] class: String,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let class = format!("{}{} {}", variant.class(), size.class(), class);
    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            title: "{title}",
            disabled: disabled || loading,
            onclick: move |evt| {
                if let Some(handler) = onclick {
                    handler.call(evt);
                }
            },
            if loading {
                span { class: "spinner spinner-inline" }
            }
            {children}
        }
    }
}
