use api::forms::AppSettingForm;
use api::models::{AppSetting, SettingType};
use dioxus::prelude::*;

use crate::auth::use_api;
use crate::components::{
    Badge, BadgeTone, Button, ButtonSize, ButtonVariant, Card, Checkbox, ConfirmDialog, EmptyState, ErrorState, FieldError,
    Input, Spinner, Textarea,
};
use crate::format::format_timestamp;
use crate::icons::FaRotateLeft;
use crate::toast::use_toast;
use crate::Icon;

fn type_label(kind: SettingType) -> &'static str {
    match kind {
        SettingType::String => "teks",
        SettingType::Number => "angka",
        SettingType::Boolean => "boolean",
        SettingType::Json => "json",
    }
}

#[component]
pub fn AppSettingsView() -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut confirm_reset = use_signal(|| false);
    let mut resetting = use_signal(|| false);

    let mut settings = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.settings().list().await }
        }
    });

    let reset = move |_| {
        let api = api.clone();
        spawn(async move {
            resetting.set(true);
            match api.settings().reset().await {
                Ok(message) => {
                    toast.success(if message.is_empty() {
                        "Pengaturan dikembalikan ke default".to_string()
                    } else {
                        message
                    });
                    settings.restart();
                }
                Err(e) => toast.error(e.user_message("Gagal mereset pengaturan")),
            }
            resetting.set(false);
            confirm_reset.set(false);
        });
    };

    let body = match &*settings.read() {
        None => rsx! { Spinner { label: "Memuat pengaturan..." } },
        Some(Err(e)) => rsx! {
            ErrorState {
                message: e.user_message("Gagal memuat pengaturan"),
                on_retry: move |_| settings.restart(),
            }
        },
        Some(Ok(list)) if list.is_empty() => rsx! {
            EmptyState { title: "Belum ada pengaturan" }
        },
        Some(Ok(list)) => rsx! {
            div {
                class: "setting-list",
                for setting in list.iter().cloned() {
                    SettingRow { key: "{setting.setting_key}", setting }
                }
            }
        },
    };

    rsx! {
        Card {
            div {
                class: "filter-bar",
                p { class: "muted", "Pengaturan publik dipakai juga pada kop lembar disposisi" }
                div { class: "filter-spacer" }
                button {
                    class: "btn btn-outline",
                    onclick: move |_| confirm_reset.set(true),
                    Icon { icon: FaRotateLeft, width: 14, height: 14 }
                    "Reset ke Default"
                }
            }
            {body}
        }
        if confirm_reset() {
            ConfirmDialog {
                title: "Reset Pengaturan",
                message: "Semua pengaturan akan dikembalikan ke nilai default.",
                confirm_label: "Reset",
                busy: resetting(),
                on_confirm: reset,
                on_cancel: move |_| confirm_reset.set(false),
            }
        }
    }
}

/// One setting with an inline editor suited to its type.
#[component]
fn SettingRow(setting: AppSetting) -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut saved = use_signal(|| setting.clone());
    let mut form = use_signal(|| AppSettingForm::from_setting(&setting));
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);
    let key = setting.setting_key.clone();

    let save = move |_| {
        let api = api.clone();
        let key = key.clone();
        async move {
            let value = match form.read().validate() {
                Ok(v) => v,
                Err(e) => {
                    error.set(e.get("setting_value").map(String::from));
                    return;
                }
            };
            error.set(None);
            saving.set(true);
            let result = api.settings().update(&key, value).await;
            saving.set(false);
            match result {
                Ok(updated) => {
                    form.set(AppSettingForm::from_setting(&updated));
                    saved.set(updated);
                    toast.success(format!("{key} disimpan"));
                }
                Err(e) => toast.error(e.user_message("Gagal menyimpan pengaturan")),
            }
        }
    };

    let current = form();
    let stored = saved();
    let dirty = current.value != stored.setting_value;
    let input_id = format!("setting-{}", stored.setting_key);
    let editor = match current.setting_type {
        SettingType::Boolean => rsx! {
            Checkbox {
                id: input_id.clone(),
                checked: current.value.trim().eq_ignore_ascii_case("true"),
                label: "Aktif",
                onchange: move |checked: bool| form.write().value = checked.to_string(),
            }
        },
        SettingType::Json => rsx! {
            Textarea {
                id: input_id.clone(),
                value: current.value.clone(),
                rows: 4,
                monospace: true,
                invalid: error().is_some(),
                oninput: move |v: String| form.write().value = v,
            }
        },
        SettingType::Number => rsx! {
            Input {
                id: input_id.clone(),
                kind: "number",
                value: current.value.clone(),
                invalid: error().is_some(),
                oninput: move |v: String| form.write().value = v,
            }
        },
        SettingType::String => rsx! {
            Input {
                id: input_id.clone(),
                value: current.value.clone(),
                invalid: error().is_some(),
                oninput: move |v: String| form.write().value = v,
            }
        },
    };

    rsx! {
        div {
            class: "setting-row",
            div {
                class: "setting-meta",
                label { r#for: "{input_id}", class: "mono setting-key", "{stored.setting_key}" }
                div {
                    class: "setting-tags",
                    Badge { "{type_label(stored.setting_type)}" }
                    if stored.is_public {
                        Badge { tone: BadgeTone::Info, "publik" }
                    }
                }
                if let Some(description) = stored.description.clone() {
                    p { class: "muted", "{description}" }
                }
                if let Some(updated) = stored.updated_at.clone() {
                    p { class: "muted setting-updated", "Diubah {format_timestamp(&updated)}" }
                }
            }
            div {
                class: "setting-editor",
                {editor}
                FieldError { message: error() }
            }
            div {
                class: "setting-actions",
                Button {
                    size: ButtonSize::Small,
                    variant: if dirty { ButtonVariant::Primary } else { ButtonVariant::Outline },
                    disabled: !dirty,
                    loading: saving(),
                    onclick: save,
                    "Simpan"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_labels() {
        assert_eq!(type_label(SettingType::Json), "json");
        assert_eq!(type_label(SettingType::Number), "angka");
    }
}
