use api::models::{DisposisiStatus, Priority, SuratStatus};
use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BadgeTone {
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
    Accent,
}

impl BadgeTone {
    fn class(self) -> &'static str {
        match self {
            BadgeTone::Neutral => "badge badge-neutral",
            BadgeTone::Info => "badge badge-info",
            BadgeTone::Success => "badge badge-success",
            BadgeTone::Warning => "badge badge-warning",
            BadgeTone::Danger => "badge badge-danger",
            BadgeTone::Accent => "badge badge-accent",
        }
    }
}

pub fn surat_status_tone(status: SuratStatus) -> BadgeTone {
    match status {
        SuratStatus::Baru => BadgeTone::Info,
        SuratStatus::Pending => BadgeTone::Warning,
        SuratStatus::Proses => BadgeTone::Accent,
        SuratStatus::Selesai => BadgeTone::Success,
        SuratStatus::Arsip => BadgeTone::Neutral,
    }
}

pub fn priority_tone(priority: Priority) -> BadgeTone {
    match priority {
        Priority::Rendah => BadgeTone::Neutral,
        Priority::Sedang => BadgeTone::Info,
        Priority::Tinggi => BadgeTone::Warning,
        Priority::Urgent => BadgeTone::Danger,
    }
}

pub fn disposisi_tone(status: DisposisiStatus) -> BadgeTone {
    match status {
        DisposisiStatus::Pending => BadgeTone::Warning,
        DisposisiStatus::Proses => BadgeTone::Info,
        DisposisiStatus::Selesai => BadgeTone::Success,
        DisposisiStatus::Dibatalkan => BadgeTone::Neutral,
    }
}

#[component]
pub fn Badge(#[props(default)] tone: BadgeTone, children: Element) -> Element {
    rsx! {
        span { class: tone.class(), {children} }
    }
}

#[component]
pub fn StatusBadge(status: SuratStatus) -> Element {
    rsx! {
        Badge { tone: surat_status_tone(status), "{status.label()}" }
    }
}

#[component]
pub fn PriorityBadge(priority: Priority) -> Element {
    rsx! {
        Badge { tone: priority_tone(priority), "{priority.label()}" }
    }
}

#[component]
pub fn DisposisiStatusBadge(status: DisposisiStatus) -> Element {
    rsx! {
        Badge { tone: disposisi_tone(status), "{status.label()}" }
    }
}

/// A category chip tinted with the category's colour.
#[component]
pub fn KategoriChip(#[props(into)] name: String, color: Option<String>) -> Element {
    let color = color.unwrap_or_else(|| "#6b7280".to_string());
    rsx! {
        span {
            class: "chip",
            style: "border-color: {color}; color: {color};",
            span { class: "chip-dot", style: "background: {color};" }
            "{name}"
        }
    }
}
