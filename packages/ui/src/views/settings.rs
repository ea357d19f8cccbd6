use api::forms::{ChangePasswordForm, ProfileForm};
use api::FormErrors;
use dioxus::prelude::*;

use crate::auth::{use_api, use_auth, use_auth_handle};
use crate::components::{Button, Card, CardContent, CardHeader, DetailRow, Field, Input, PageHeader};
use crate::format::format_timestamp;
use crate::nav::{settings_tabs, Page, SettingsTab};
use crate::toast::use_toast;

/// Settings area with one tab per section. Admin-only tabs are hidden from
/// other roles; the router also guards them.
#[component]
pub fn SettingsLayoutView(active: SettingsTab, on_navigate: EventHandler<Page>, children: Element) -> Element {
    let auth = use_auth();
    let role = auth.read().user.as_ref().map(|u| u.role).unwrap_or_default();

    rsx! {
        PageHeader { title: "Pengaturan", subtitle: "Profil, pengguna dan konfigurasi aplikasi" }
        nav {
            class: "tabs",
            for tab in settings_tabs(role) {
                button {
                    key: "{tab.label()}",
                    class: if tab == active { "tab tab-active" } else { "tab" },
                    onclick: move |_| on_navigate.call(Page::Settings(tab)),
                    "{tab.label()}"
                }
            }
        }
        div { class: "tab-panel", {children} }
    }
}

#[component]
pub fn ProfileView() -> Element {
    let auth = use_auth();
    let Some(user) = auth.read().user.clone() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "settings-grid",
            Card {
                CardHeader { title: "Akun" }
                CardContent {
                    dl {
                        class: "detail-list",
                        DetailRow { label: "Username", span { class: "mono", "{user.username}" } }
                        DetailRow { label: "Peran", "{user.role.label()}" }
                        DetailRow { label: "Status", if user.is_active { "Aktif" } else { "Nonaktif" } }
                        if let Some(created) = user.created_at.clone() {
                            DetailRow { label: "Terdaftar", "{format_timestamp(&created)}" }
                        }
                    }
                }
            }
            ProfileCard { full_name: user.full_name.clone(), email: user.email.clone() }
            ChangePasswordCard {}
        }
    }
}

#[component]
fn ProfileCard(full_name: String, email: String) -> Element {
    let api = use_api();
    let handle = use_auth_handle();
    let toast = use_toast();
    let mut form = use_signal(|| ProfileForm { full_name, email });
    let mut errors = use_signal(FormErrors::default);
    let mut saving = use_signal(|| false);

    let save = move |_| {
        let api = api.clone();
        let handle = handle.clone();
        async move {
            let payload = match form.read().validate() {
                Ok(p) => p,
                Err(e) => {
                    errors.set(e);
                    return;
                }
            };
            errors.set(FormErrors::default());
            saving.set(true);
            let result = api.auth().update_profile(&payload).await;
            saving.set(false);
            match result {
                Ok(user) => {
                    handle.update_user(user);
                    toast.success("Profil berhasil diperbarui");
                }
                Err(e) => toast.error(e.user_message("Gagal memperbarui profil")),
            }
        }
    };

    let err = |field: &str| errors.read().get(field).map(String::from);
    let current = form();
    rsx! {
        Card {
            CardHeader { title: "Profil", description: "Nama dan email yang tampil di aplikasi" }
            CardContent {
                Field {
                    label: "Nama Lengkap",
                    html_for: "profile-name",
                    required: true,
                    error: err("full_name"),
                    Input {
                        id: "profile-name",
                        value: current.full_name,
                        invalid: err("full_name").is_some(),
                        oninput: move |v: String| form.write().full_name = v,
                    }
                }
                Field {
                    label: "Email",
                    html_for: "profile-email",
                    required: true,
                    error: err("email"),
                    Input {
                        id: "profile-email",
                        kind: "email",
                        value: current.email,
                        invalid: err("email").is_some(),
                        oninput: move |v: String| form.write().email = v,
                    }
                }
                div {
                    class: "form-actions",
                    Button { loading: saving(), onclick: save, "Simpan Profil" }
                }
            }
        }
    }
}

#[component]
fn ChangePasswordCard() -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut form = use_signal(ChangePasswordForm::default);
    let mut errors = use_signal(FormErrors::default);
    let mut saving = use_signal(|| false);

    let save = move |_| {
        let api = api.clone();
        async move {
            let payload = match form.read().validate() {
                Ok(p) => p,
                Err(e) => {
                    errors.set(e);
                    return;
                }
            };
            errors.set(FormErrors::default());
            saving.set(true);
            let result = api.auth().change_password(&payload).await;
            saving.set(false);
            match result {
                Ok(response) => {
                    form.set(ChangePasswordForm::default());
                    toast.success(if response.message.is_empty() {
                        "Password berhasil diubah".to_string()
                    } else {
                        response.message
                    });
                }
                Err(e) => toast.error(e.user_message("Gagal mengubah password")),
            }
        }
    };

    let err = |field: &str| errors.read().get(field).map(String::from);
    let current = form();
    rsx! {
        Card {
            CardHeader { title: "Ubah Password", description: "Minimal 6 karakter" }
            CardContent {
                Field {
                    label: "Password Saat Ini",
                    html_for: "pw-current",
                    required: true,
                    error: err("current_password"),
                    Input {
                        id: "pw-current",
                        kind: "password",
                        autocomplete: "current-password",
                        value: current.current_password,
                        invalid: err("current_password").is_some(),
                        oninput: move |v: String| form.write().current_password = v,
                    }
                }
                Field {
                    label: "Password Baru",
                    html_for: "pw-new",
                    required: true,
                    error: err("new_password"),
                    Input {
                        id: "pw-new",
                        kind: "password",
                        autocomplete: "new-password",
                        value: current.new_password,
                        invalid: err("new_password").is_some(),
                        oninput: move |v: String| form.write().new_password = v,
                    }
                }
                Field {
                    label: "Konfirmasi Password Baru",
                    html_for: "pw-confirm",
                    required: true,
                    error: err("confirm_password"),
                    Input {
                        id: "pw-confirm",
                        kind: "password",
                        autocomplete: "new-password",
                        value: current.confirm_password,
                        invalid: err("confirm_password").is_some(),
                        oninput: move |v: String| form.write().confirm_password = v,
                    }
                }
                div {
                    class: "form-actions",
                    Button { loading: saving(), onclick: save, "Ubah Password" }
                }
            }
        }
    }
}
