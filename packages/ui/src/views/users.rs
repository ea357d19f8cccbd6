use std::cmp::Ordering;

use api::forms::UserForm;
use api::models::{ResetPassword, Role, User, UserQuery};
use api::FormErrors;
use dioxus::prelude::*;

use crate::auth::{use_api, use_auth, use_config};
use crate::components::{
    Badge, BadgeTone, Button, ButtonVariant, Card, Checkbox, ConfirmDialog, Dialog, EmptyState, ErrorState, Field,
    Input, Pagination, Select, SelectOption, SortHeader, Spinner,
};
use crate::icons::{FaKey, FaPen, FaPlus, FaToggleOff, FaToggleOn, FaTrash};
use crate::table::{compare_text, SortColumn, SortDirection, TableState};
use crate::toast::use_toast;
use crate::Icon;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UserColumn {
    Nama,
    Username,
    Role,
}

impl SortColumn<User> for UserColumn {
    fn compare(self, a: &User, b: &User) -> Ordering {
        match self {
            UserColumn::Nama => compare_text(a.display_name(), b.display_name()),
            UserColumn::Username => compare_text(&a.username, &b.username),
            UserColumn::Role => a.role.label().cmp(b.role.label()),
        }
    }
}

fn matches_search(user: &User, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    needle.is_empty()
        || [&user.username, &user.full_name, &user.email]
            .iter()
            .any(|h| h.to_lowercase().contains(&needle))
}

fn role_options() -> Vec<SelectOption> {
    Role::ASSIGNABLE
        .into_iter()
        .map(|r| SelectOption::new(r.as_str(), r.label()))
        .collect()
}

/// What the user dialog is doing.
#[derive(Clone, Debug, PartialEq)]
enum Editing {
    New,
    Existing(User),
}

#[component]
pub fn UsersView() -> Element {
    let api = use_api();
    let config = use_config();
    let toast = use_toast();
    let auth = use_auth();
    let self_id = auth.read().user.as_ref().map(|u| u.id);
    let mut search = use_signal(String::new);
    let mut role_filter = use_signal(|| Option::<Role>::None);
    let mut table = use_signal(|| {
        TableState::new(config.tables.page_size as usize).sorted_by(UserColumn::Nama, SortDirection::Asc)
    });
    let mut editing = use_signal(|| Option::<Editing>::None);
    let mut resetting = use_signal(|| Option::<User>::None);
    let mut pending_delete = use_signal(|| Option::<User>::None);
    let mut deleting = use_signal(|| false);

    let fetch_limit = config.tables.fetch_limit;
    let mut users = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let query = UserQuery {
                limit: Some(fetch_limit),
                role: role_filter(),
                ..Default::default()
            };
            async move { api.users().list(&query).await }
        }
    });

    let toggle_active = use_callback({
        let api = api.clone();
        move |id: i64| {
            let api = api.clone();
            spawn(async move {
                match api.users().toggle_active(id).await {
                    Ok(user) => {
                        let state = if user.is_active { "diaktifkan" } else { "dinonaktifkan" };
                        toast.success(format!("User {} {}", user.username, state));
                        users.restart();
                    }
                    Err(e) => toast.error(e.user_message("Gagal mengubah status user")),
                }
            });
        }
    });

    let confirm_delete = move |_| {
        let api = api.clone();
        let Some(target) = pending_delete() else {
            return;
        };
        spawn(async move {
            deleting.set(true);
            match api.users().delete(target.id).await {
                Ok(()) => {
                    toast.success("User berhasil dihapus");
                    users.restart();
                }
                Err(e) => toast.error(e.user_message("Gagal menghapus user")),
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    };

    let needle = search();
    let body = match &*users.read() {
        None => rsx! { Spinner { label: "Memuat pengguna..." } },
        Some(Err(e)) => rsx! {
            ErrorState {
                message: e.user_message("Gagal memuat daftar user"),
                on_retry: move |_| users.restart(),
            }
        },
        Some(Ok(rows)) => {
            let visible: Vec<User> = rows.iter().filter(|u| matches_search(u, &needle)).cloned().collect();
            let total = visible.len();
            let state = table();
            if total == 0 {
                rsx! { EmptyState { title: "Tidak ada user", description: "Ubah pencarian atau tambahkan user baru" } }
            } else {
                let page_rows: Vec<User> = state.apply(&visible).into_iter().cloned().collect();
                rsx! {
                    div {
                        class: "table-wrap",
                        table {
                            class: "table",
                            thead {
                                tr {
                                    SortHeader { label: "Nama", direction: state.direction(UserColumn::Nama), on_sort: move |_| table.write().toggle_sort(UserColumn::Nama) }
                                    SortHeader { label: "Username", direction: state.direction(UserColumn::Username), on_sort: move |_| table.write().toggle_sort(UserColumn::Username) }
                                    th { "Email" }
                                    SortHeader { label: "Peran", direction: state.direction(UserColumn::Role), on_sort: move |_| table.write().toggle_sort(UserColumn::Role) }
                                    th { "Status" }
                                    th { class: "table-actions", "Aksi" }
                                }
                            }
                            tbody {
                                for user in page_rows {
                                    {
                                        let is_self = self_id == Some(user.id);
                                        let id = user.id;
                                        let for_edit = user.clone();
                                        let for_reset = user.clone();
                                        let for_delete = user.clone();
                                        rsx! {
                                            tr {
                                                key: "{id}",
                                                td { "{user.display_name()}" }
                                                td { class: "mono", "{user.username}" }
                                                td { "{user.email}" }
                                                td {
                                                    Badge {
                                                        tone: if user.role.is_admin() { BadgeTone::Accent } else { BadgeTone::Neutral },
                                                        "{user.role.label()}"
                                                    }
                                                }
                                                td {
                                                    if user.is_active {
                                                        Badge { tone: BadgeTone::Success, "Aktif" }
                                                    } else {
                                                        Badge { tone: BadgeTone::Neutral, "Nonaktif" }
                                                    }
                                                }
                                                td {
                                                    class: "table-actions",
                                                    button {
                                                        class: "btn btn-ghost btn-icon",
                                                        title: "Edit",
                                                        onclick: move |_| editing.set(Some(Editing::Existing(for_edit.clone()))),
                                                        Icon { icon: FaPen, width: 14, height: 14 }
                                                    }
                                                    button {
                                                        class: "btn btn-ghost btn-icon",
                                                        title: "Reset password",
                                                        onclick: move |_| resetting.set(Some(for_reset.clone())),
                                                        Icon { icon: FaKey, width: 14, height: 14 }
                                                    }
                                                    if !is_self {
                                                        button {
                                                            class: "btn btn-ghost btn-icon",
                                                            title: if user.is_active { "Nonaktifkan" } else { "Aktifkan" },
                                                            onclick: move |_| toggle_active.call(id),
                                                            if user.is_active {
                                                                Icon { icon: FaToggleOn, width: 16, height: 16 }
                                                            } else {
                                                                Icon { icon: FaToggleOff, width: 16, height: 16 }
                                                            }
                                                        }
                                                        button {
                                                            class: "btn btn-ghost btn-icon btn-danger-text",
                                                            title: "Hapus",
                                                            onclick: move |_| pending_delete.set(Some(for_delete.clone())),
                                                            Icon { icon: FaTrash, width: 14, height: 14 }
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    Pagination {
                        summary: state.range_label(total),
                        page: state.page(),
                        page_count: state.page_count(total),
                        can_prev: state.can_prev(),
                        can_next: state.can_next(total),
                        on_page: move |page: usize| table.write().set_page(page, total),
                    }
                }
            }
        }
    };

    rsx! {
        Card {
            div {
                class: "filter-bar",
                Input {
                    value: needle.clone(),
                    placeholder: "Cari nama, username atau email...",
                    oninput: move |v: String| {
                        search.set(v);
                        table.write().reset_page();
                    },
                }
                Select {
                    value: role_filter().map(|r| r.as_str()).unwrap_or_default(),
                    options: role_options(),
                    placeholder: "Semua Peran",
                    onchange: move |v: String| {
                        role_filter.set(Role::ASSIGNABLE.into_iter().find(|r| r.as_str() == v));
                        table.write().reset_page();
                    },
                }
                div { class: "filter-spacer" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| editing.set(Some(Editing::New)),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    "Tambah User"
                }
            }
            {body}
        }
        if let Some(mode) = editing() {
            UserDialog {
                mode,
                on_close: move |_| editing.set(None),
                on_saved: move |_| {
                    editing.set(None);
                    users.restart();
                },
            }
        }
        if let Some(target) = resetting() {
            ResetPasswordDialog { key: "{target.id}", user: target, on_close: move |_| resetting.set(None) }
        }
        if let Some(target) = pending_delete() {
            ConfirmDialog {
                title: "Hapus User",
                message: format!("Akun {} ({}) akan dihapus permanen.", target.display_name(), target.username),
                busy: deleting(),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

#[component]
fn UserDialog(mode: Editing, on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let api = use_api();
    let toast = use_toast();
    let existing = match &mode {
        Editing::Existing(user) => Some(user.id),
        Editing::New => None,
    };
    let mut form = use_signal(|| match &mode {
        Editing::Existing(user) => UserForm::from_user(user),
        Editing::New => UserForm::default(),
    });
    let mut errors = use_signal(FormErrors::default);
    let mut saving = use_signal(|| false);

    let submit = move |_| {
        let api = api.clone();
        async move {
            let current = form();
            let result = match existing {
                Some(id) => match current.validate_update() {
                    Ok(payload) => {
                        saving.set(true);
                        api.users().update(id, &payload).await
                    }
                    Err(e) => {
                        errors.set(e);
                        return;
                    }
                },
                None => match current.validate_create() {
                    Ok(payload) => {
                        saving.set(true);
                        api.users().create(&payload).await
                    }
                    Err(e) => {
                        errors.set(e);
                        return;
                    }
                },
            };
            saving.set(false);
            match result {
                Ok(user) => {
                    tracing::info!("Saved user {} ({})", user.id, user.username);
                    toast.success(if existing.is_some() { "User berhasil diperbarui" } else { "User berhasil ditambahkan" });
                    on_saved.call(());
                }
                Err(e) => toast.error(e.user_message("Gagal menyimpan user")),
            }
        }
    };

    let err = |field: &str| errors.read().get(field).map(String::from);
    let current = form();
    let is_new = existing.is_none();
    rsx! {
        Dialog {
            title: if is_new { "Tambah User" } else { "Edit User" },
            on_close: move |_| on_close.call(()),
            Field {
                label: "Username",
                html_for: "user-username",
                required: is_new,
                error: err("username"),
                Input {
                    id: "user-username",
                    value: current.username.clone(),
                    disabled: !is_new,
                    autocomplete: "off",
                    invalid: err("username").is_some(),
                    oninput: move |v: String| form.write().username = v,
                }
            }
            Field {
                label: "Nama Lengkap",
                html_for: "user-name",
                required: true,
                error: err("full_name"),
                Input {
                    id: "user-name",
                    value: current.full_name.clone(),
                    invalid: err("full_name").is_some(),
                    oninput: move |v: String| form.write().full_name = v,
                }
            }
            Field {
                label: "Email",
                html_for: "user-email",
                required: true,
                error: err("email"),
                Input {
                    id: "user-email",
                    kind: "email",
                    value: current.email.clone(),
                    invalid: err("email").is_some(),
                    oninput: move |v: String| form.write().email = v,
                }
            }
            Field {
                label: "Peran",
                html_for: "user-role",
                Select {
                    id: "user-role",
                    value: current.role.as_str(),
                    options: role_options(),
                    onchange: move |v: String| {
                        if let Some(role) = Role::ASSIGNABLE.into_iter().find(|r| r.as_str() == v) {
                            form.write().role = role;
                        }
                    },
                }
            }
            Field {
                label: "Password",
                html_for: "user-password",
                required: is_new,
                hint: if is_new { "Minimal 6 karakter" } else { "Kosongkan jika tidak diubah" },
                error: err("password"),
                Input {
                    id: "user-password",
                    kind: "password",
                    autocomplete: "new-password",
                    value: current.password.clone(),
                    invalid: err("password").is_some(),
                    oninput: move |v: String| form.write().password = v,
                }
            }
            if !is_new {
                Checkbox {
                    id: "user-active",
                    checked: current.is_active,
                    label: "Akun aktif",
                    onchange: move |checked: bool| form.write().is_active = checked,
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
                Button { loading: saving(), onclick: submit, "Simpan" }
            }
        }
    }
}

/// Admin password reset. An empty field lets the server generate a
/// temporary password, which is shown once.
#[component]
fn ResetPasswordDialog(user: User, on_close: EventHandler<()>) -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut password = use_signal(String::new);
    let mut force_change = use_signal(|| true);
    let mut saving = use_signal(|| false);
    let mut temporary = use_signal(|| Option::<String>::None);
    let id = user.id;

    let submit = move |_| {
        let api = api.clone();
        async move {
            let new_password = password().trim().to_string();
            if !new_password.is_empty() && new_password.chars().count() < 6 {
                toast.error("Password minimal 6 karakter");
                return;
            }
            let payload = ResetPassword {
                new_password: Some(new_password).filter(|p| !p.is_empty()),
                force_change_on_login: force_change(),
            };
            saving.set(true);
            let result = api.users().reset_password(id, &payload).await;
            saving.set(false);
            match result {
                Ok(response) => match response.temporary_password {
                    Some(temp) => temporary.set(Some(temp)),
                    None => {
                        toast.success("Password berhasil direset");
                        on_close.call(());
                    }
                },
                Err(e) => toast.error(e.user_message("Gagal mereset password")),
            }
        }
    };

    rsx! {
        Dialog {
            title: "Reset Password",
            description: format!("{} ({})", user.display_name(), user.username),
            on_close: move |_| on_close.call(()),
            if let Some(temp) = temporary() {
                div {
                    class: "alert alert-success",
                    p { "Password sementara:" }
                    p { class: "mono temp-password", "{temp}" }
                    p { class: "muted", "Sampaikan password ini ke pengguna. Password tidak akan ditampilkan lagi." }
                }
                div {
                    class: "modal-actions",
                    Button { onclick: move |_| on_close.call(()), "Selesai" }
                }
            } else {
                Field {
                    label: "Password Baru",
                    html_for: "reset-password",
                    hint: "Kosongkan untuk membuat password sementara",
                    Input {
                        id: "reset-password",
                        kind: "password",
                        autocomplete: "new-password",
                        value: password(),
                        oninput: move |v: String| password.set(v),
                    }
                }
                Checkbox {
                    id: "reset-force",
                    checked: force_change(),
                    label: "Wajib ganti password saat login",
                    onchange: move |checked: bool| force_change.set(checked),
                }
                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: saving(),
                        onclick: move |_| on_close.call(()),
                        "Batal"
                    }
                    Button { variant: ButtonVariant::Destructive, loading: saving(), onclick: submit, "Reset Password" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, username: &str, full_name: &str, role: Role) -> User {
        User {
            id,
            username: username.into(),
            email: format!("{username}@dinas.go.id"),
            full_name: full_name.into(),
            role,
            is_active: true,
            created_at: None,
            avatar: None,
        }
    }

    #[test]
    fn test_search_matches_name_username_and_email() {
        let u = user(1, "budi", "Budi Santoso", Role::Staff);
        assert!(matches_search(&u, "SANTOSO"));
        assert!(matches_search(&u, "budi@"));
        assert!(matches_search(&u, "  "));
        assert!(!matches_search(&u, "sari"));
    }

    #[test]
    fn test_sort_by_display_name_falls_back_to_username() {
        let rows = vec![
            user(1, "zaki", "", Role::User),
            user(2, "andi", "Rahmat", Role::Admin),
            user(3, "sari", "Ayu", Role::Staff),
        ];
        let state = TableState::new(10).sorted_by(UserColumn::Nama, SortDirection::Asc);
        let ids: Vec<i64> = state.apply(&rows).iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_role_options_exclude_unknown() {
        let values: Vec<String> = role_options().into_iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["admin", "staff", "pimpinan", "user"]);
    }
}
