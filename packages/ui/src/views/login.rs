use api::forms::LoginForm;
use api::{ApiError, FormErrors};
use dioxus::prelude::*;

use crate::auth::{use_api, use_auth_handle};
use crate::components::{Button, Dialog, Field, Input, COMPONENTS_CSS};
use crate::icons::{FaEnvelope, FaPhone};
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Message shown for a failed sign-in.
pub fn login_error_message(err: &ApiError) -> String {
    match err.status() {
        Some(401) | Some(400) => "Username atau password salah".to_string(),
        _ => err.user_message("Login gagal. Periksa koneksi Anda dan coba lagi."),
    }
}

const RESET_HELP: &str = "Administrator dapat mereset password Anda melalui panel manajemen pengguna. \
Setelah di-reset, Anda akan menerima password sementara yang harus segera diganti.";

/// Info dialog behind "Lupa password?". There is no self-service reset;
/// only an admin can set a new password.
#[component]
pub fn ForgotPasswordDialog(on_close: EventHandler<()>) -> Element {
    rsx! {
        Dialog {
            title: "Lupa Password",
            description: "Sistem ini tidak menggunakan reset password via email. Hubungi administrator untuk mereset password Anda.",
            on_close,
            p { class: "modal-text muted", "{RESET_HELP}" }
            div {
                class: "reset-contact",
                p { strong { "Hubungi Administrator:" } }
                p {
                    class: "muted",
                    Icon { icon: FaPhone, width: 12, height: 12 }
                    " Hubungi langsung admin sistem"
                }
                p {
                    class: "muted",
                    Icon { icon: FaEnvelope, width: 12, height: 12 }
                    " Informasikan username atau email akun Anda"
                }
            }
            div {
                class: "modal-actions",
                Button { onclick: move |_| on_close.call(()), "Mengerti" }
            }
        }
    }
}

/// Username/password sign-in card.
#[component]
pub fn LoginView(on_success: EventHandler<()>) -> Element {
    let api = use_api();
    let handle = use_auth_handle();
    let mut form = use_signal(LoginForm::default);
    let mut errors = use_signal(FormErrors::default);
    let mut failure = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);
    let mut show_forgot = use_signal(|| false);

    let submit = move |_| {
        let api = api.clone();
        let handle = handle.clone();
        async move {
            let credentials = match form.read().validate() {
                Ok(c) => c,
                Err(e) => {
                    errors.set(e);
                    return;
                }
            };
            errors.set(FormErrors::default());
            failure.set(None);
            busy.set(true);
            let result = api.auth().sign_in(&credentials.username, &credentials.password).await;
            busy.set(false);
            match result {
                Ok(session) => {
                    tracing::info!("Signed in as {}", credentials.username);
                    handle.sign_in(session);
                    on_success.call(());
                }
                Err(e) => {
                    tracing::warn!("Sign-in failed: {}", e);
                    failure.set(Some(login_error_message(&e)));
                }
            }
        }
    };

    rsx! {
        document::Stylesheet { href: COMPONENTS_CSS }
        document::Stylesheet { href: VIEWS_CSS }

        div {
            class: "login-page",
            div {
                class: "login-card",
                div {
                    class: "login-brand",
                    span { class: "sidebar-logo", "AS" }
                    h1 { "Arsip Surat" }
                    p { class: "muted", "Masuk untuk mengelola surat masuk, surat keluar dan disposisi" }
                }

                if let Some(message) = failure() {
                    div { class: "alert alert-error", "{message}" }
                }

                Field {
                    label: "Username",
                    html_for: "login-username",
                    required: true,
                    error: errors.read().get("username").map(String::from),
                    Input {
                        id: "login-username",
                        value: form.read().username.clone(),
                        placeholder: "Masukkan username",
                        autocomplete: "username",
                        invalid: errors.read().get("username").is_some(),
                        oninput: move |v: String| form.write().username = v,
                    }
                }
                Field {
                    label: "Password",
                    html_for: "login-password",
                    required: true,
                    error: errors.read().get("password").map(String::from),
                    Input {
                        id: "login-password",
                        kind: "password",
                        value: form.read().password.clone(),
                        placeholder: "Masukkan password",
                        autocomplete: "current-password",
                        invalid: errors.read().get("password").is_some(),
                        oninput: move |v: String| form.write().password = v,
                    }
                }
                div {
                    class: "login-forgot",
                    button {
                        class: "link-button",
                        r#type: "button",
                        onclick: move |_| show_forgot.set(true),
                        "Lupa password?"
                    }
                }
                Button {
                    class: "btn-block",
                    loading: busy(),
                    onclick: submit,
                    if busy() { "Memproses..." } else { "Masuk" }
                }
            }
        }

        if show_forgot() {
            ForgotPasswordDialog { on_close: move |_| show_forgot.set(false) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_credentials_message() {
        assert_eq!(login_error_message(&ApiError::Unauthorized), "Username atau password salah");
        let err = ApiError::Status {
            status: 400,
            detail: "Incorrect username or password".into(),
        };
        assert_eq!(login_error_message(&err), "Username atau password salah");
    }

    #[test]
    fn test_other_failures_keep_server_detail() {
        let err = ApiError::Status {
            status: 403,
            detail: "Akun dinonaktifkan".into(),
        };
        assert_eq!(login_error_message(&err), "Akun dinonaktifkan");
        let err = ApiError::Network("connection refused".into());
        assert!(login_error_message(&err).starts_with("Login gagal"));
    }

    #[test]
    fn test_reset_help_points_to_admin() {
        assert!(RESET_HELP.contains("Administrator"));
        assert!(RESET_HELP.contains("password sementara"));
    }
}
