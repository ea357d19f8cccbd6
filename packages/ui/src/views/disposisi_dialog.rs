use api::forms::DisposisiForm;
use api::models::{SuratType, User, UserQuery};
use api::FormErrors;
use dioxus::prelude::*;

use crate::auth::use_api;
use crate::components::{Button, ButtonVariant, Dialog, Field, Input, Select, SelectOption, Textarea};
use crate::format::today;
use crate::toast::use_toast;

use super::surat_common::{id_value, parse_id};

/// Active accounts that can receive a disposition. Staff without access to
/// `/users` get an empty list.
pub fn use_user_directory() -> Resource<Vec<User>> {
    let api = use_api();
    use_resource(move || {
        let api = api.clone();
        async move {
            let query = UserQuery {
                is_active: Some(true),
                limit: Some(500),
                ..Default::default()
            };
            api.users().list(&query).await.unwrap_or_else(|e| {
                tracing::warn!("Failed to load user directory: {}", e);
                Vec::new()
            })
        }
    })
}

/// Display name for `id`, falling back to `User #id`.
pub fn user_name(users: &[User], id: Option<i64>) -> String {
    match id {
        Some(id) => users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| format!("User #{id}")),
        None => "-".to_string(),
    }
}

/// Route a letter to a staff member.
#[component]
pub fn DisposisiDialog(
    surat_type: SuratType,
    surat_id: i64,
    /// Letter number shown in the dialog header.
    #[props(into)]
    nomor: String,
    on_close: EventHandler<()>,
    on_created: EventHandler<()>,
) -> Element {
    let api = use_api();
    let toast = use_toast();
    let users = use_user_directory();
    let mut form = use_signal(DisposisiForm::default);
    let mut errors = use_signal(FormErrors::default);
    let mut saving = use_signal(|| false);

    let submit = move |_| {
        let api = api.clone();
        async move {
            let payload = match form.read().validate(surat_type, surat_id, today()) {
                Ok(p) => p,
                Err(e) => {
                    errors.set(e);
                    return;
                }
            };
            errors.set(FormErrors::default());
            saving.set(true);
            let result = api.disposisi().create(&payload).await;
            saving.set(false);
            match result {
                Ok(created) => {
                    tracing::info!("Created disposisi {} for {} {}", created.id, surat_type.as_str(), surat_id);
                    toast.success("Disposisi berhasil dibuat");
                    on_created.call(());
                }
                Err(e) => toast.error(e.user_message("Gagal membuat disposisi")),
            }
        }
    };

    let options: Vec<SelectOption> = users
        .read()
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|u| SelectOption::new(u.id.to_string(), format!("{} ({})", u.display_name(), u.role.label())))
        .collect();
    let err = |field: &str| errors.read().get(field).map(String::from);
    let current = form();

    rsx! {
        Dialog {
            title: "Buat Disposisi",
            description: format!("{} {}", surat_type.label(), nomor),
            on_close: move |_| on_close.call(()),
            Field {
                label: "Tujuan",
                html_for: "dispo-to",
                required: true,
                error: err("to_user_id"),
                Select {
                    id: "dispo-to",
                    value: id_value(current.to_user_id),
                    options,
                    placeholder: "Pilih penerima disposisi",
                    invalid: err("to_user_id").is_some(),
                    onchange: move |v: String| form.write().to_user_id = parse_id(&v),
                }
            }
            Field {
                label: "Instruksi",
                html_for: "dispo-instruksi",
                required: true,
                error: err("instruksi"),
                Textarea {
                    id: "dispo-instruksi",
                    value: current.instruksi.clone(),
                    placeholder: "Contoh: Mohon ditindaklanjuti dan dilaporkan",
                    invalid: err("instruksi").is_some(),
                    oninput: move |v: String| form.write().instruksi = v,
                }
            }
            Field {
                label: "Keterangan",
                html_for: "dispo-keterangan",
                Textarea {
                    id: "dispo-keterangan",
                    value: current.keterangan.clone(),
                    rows: 2,
                    oninput: move |v: String| form.write().keterangan = v,
                }
            }
            Field {
                label: "Batas Waktu",
                html_for: "dispo-deadline",
                error: err("deadline"),
                Input {
                    id: "dispo-deadline",
                    kind: "date",
                    value: current.deadline.clone(),
                    invalid: err("deadline").is_some(),
                    oninput: move |v: String| form.write().deadline = v,
                }
            }
            div {
                class: "modal-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: saving(),
                    onclick: move |_| on_close.call(()),
                    "Batal"
                }
                Button { loading: saving(), onclick: submit, "Kirim Disposisi" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::Role;

    fn user(id: i64, username: &str, full_name: &str) -> User {
        User {
            id,
            username: username.into(),
            email: format!("{username}@dinas.go.id"),
            full_name: full_name.into(),
            role: Role::Staff,
            is_active: true,
            created_at: None,
            avatar: None,
        }
    }

    #[test]
    fn test_user_name_lookup() {
        let users = vec![user(1, "budi", "Budi Santoso"), user(2, "sari", "")];
        assert_eq!(user_name(&users, Some(1)), "Budi Santoso");
        assert_eq!(user_name(&users, Some(2)), "sari");
        assert_eq!(user_name(&users, Some(9)), "User #9");
        assert_eq!(user_name(&users, None), "-");
    }
}
