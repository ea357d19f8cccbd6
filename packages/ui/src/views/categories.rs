use api::forms::{slugify, KategoriForm};
use api::models::{Kategori, KategoriQuery};
use api::FormErrors;
use dioxus::prelude::*;

use crate::auth::use_api;
use crate::components::{
    Badge, BadgeTone, Button, ButtonVariant, Card, Checkbox, ConfirmDialog, Dialog, EmptyState, ErrorState, Field,
    Input, KategoriChip, Spinner, Textarea,
};
use crate::icons::{FaPen, FaPlus, FaTrash};
use crate::toast::use_toast;
use crate::Icon;

/// Color presets offered next to the hex input.
const PRESET_COLORS: [&str; 8] = [
    "#6B7280", "#EF4444", "#F59E0B", "#10B981", "#3B82F6", "#6366F1", "#8B5CF6", "#EC4899",
];

/// Name edits keep the slug in sync until the slug is edited by hand.
fn follow_name(form: &mut KategoriForm, nama: String) {
    if form.slug.is_empty() || form.slug == slugify(&form.nama) {
        form.slug = slugify(&nama);
    }
    form.nama = nama;
}

#[component]
pub fn CategoriesView() -> Element {
    let api = use_api();
    let toast = use_toast();
    let mut editing = use_signal(|| Option::<Option<Kategori>>::None);
    let mut pending_delete = use_signal(|| Option::<Kategori>::None);
    let mut deleting = use_signal(|| false);

    let mut list = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                let query = KategoriQuery {
                    limit: Some(500),
                    ..Default::default()
                };
                api.kategori().list(&query).await
            }
        }
    });

    let confirm_delete = move |_| {
        let api = api.clone();
        let Some(target) = pending_delete() else {
            return;
        };
        spawn(async move {
            deleting.set(true);
            match api.kategori().delete(target.id).await {
                Ok(()) => {
                    toast.success(format!("Kategori {} dihapus", target.nama));
                    list.restart();
                }
                Err(e) => toast.error(e.user_message("Gagal menghapus kategori")),
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    };

    let body = match &*list.read() {
        None => rsx! { Spinner { label: "Memuat kategori..." } },
        Some(Err(e)) => rsx! {
            ErrorState {
                message: e.user_message("Gagal memuat kategori"),
                on_retry: move |_| list.restart(),
            }
        },
        Some(Ok(rows)) if rows.is_empty() => rsx! {
            EmptyState { title: "Belum ada kategori", description: "Kategori membantu mengelompokkan surat" }
        },
        Some(Ok(rows)) => rsx! {
            div {
                class: "table-wrap",
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Nama" }
                            th { "Slug" }
                            th { "Deskripsi" }
                            th { "Status" }
                            th { class: "table-actions", "Aksi" }
                        }
                    }
                    tbody {
                        for k in rows.iter().cloned() {
                            tr {
                                key: "{k.id}",
                                td { KategoriChip { name: k.nama.clone(), color: k.color.clone() } }
                                td { class: "mono", "{k.slug}" }
                                td { class: "muted", {k.deskripsi.clone().unwrap_or_default()} }
                                td {
                                    if k.is_active {
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
                                        onclick: {
                                            let k = k.clone();
                                            move |_| editing.set(Some(Some(k.clone())))
                                        },
                                        Icon { icon: FaPen, width: 14, height: 14 }
                                    }
                                    button {
                                        class: "btn btn-ghost btn-icon btn-danger-text",
                                        title: "Hapus",
                                        onclick: {
                                            let k = k.clone();
                                            move |_| pending_delete.set(Some(k.clone()))
                                        },
                                        Icon { icon: FaTrash, width: 14, height: 14 }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        Card {
            div {
                class: "filter-bar",
                p { class: "muted", "Kategori nonaktif tidak muncul di form surat" }
                div { class: "filter-spacer" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| editing.set(Some(None)),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    "Tambah Kategori"
                }
            }
            {body}
        }
        if let Some(target) = editing() {
            KategoriDialog {
                existing: target,
                on_close: move |_| editing.set(None),
                on_saved: move |_| {
                    editing.set(None);
                    list.restart();
                },
            }
        }
        if let Some(target) = pending_delete() {
            ConfirmDialog {
                title: "Hapus Kategori",
                message: format!("Kategori {} akan dihapus. Surat yang memakai kategori ini menjadi tanpa kategori.", target.nama),
                busy: deleting(),
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

#[component]
fn KategoriDialog(existing: Option<Kategori>, on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let api = use_api();
    let toast = use_toast();
    let id = existing.as_ref().map(|k| k.id);
    let mut form = use_signal(|| existing.as_ref().map(KategoriForm::from_kategori).unwrap_or_default());
    let mut errors = use_signal(FormErrors::default);
    let mut saving = use_signal(|| false);

    let submit = move |_| {
        let api = api.clone();
        async move {
            let current = form();
            let result = match id {
                Some(id) => match current.validate_update() {
                    Ok(payload) => {
                        saving.set(true);
                        api.kategori().update(id, &payload).await
                    }
                    Err(e) => {
                        errors.set(e);
                        return;
                    }
                },
                None => match current.validate_create() {
                    Ok(payload) => {
                        saving.set(true);
                        api.kategori().create(&payload).await
                    }
                    Err(e) => {
                        errors.set(e);
                        return;
                    }
                },
            };
            saving.set(false);
            match result {
                Ok(k) => {
                    toast.success(format!("Kategori {} disimpan", k.nama));
                    on_saved.call(());
                }
                Err(e) => toast.error(e.user_message("Gagal menyimpan kategori")),
            }
        }
    };

    let err = |field: &str| errors.read().get(field).map(String::from);
    let current = form();
    rsx! {
        Dialog {
            title: if id.is_some() { "Edit Kategori" } else { "Tambah Kategori" },
            on_close: move |_| on_close.call(()),
            Field {
                label: "Nama",
                html_for: "kategori-nama",
                required: true,
                error: err("nama"),
                Input {
                    id: "kategori-nama",
                    value: current.nama.clone(),
                    placeholder: "Contoh: Undangan",
                    invalid: err("nama").is_some(),
                    oninput: move |v: String| follow_name(&mut form.write(), v),
                }
            }
            Field {
                label: "Slug",
                html_for: "kategori-slug",
                hint: "Huruf kecil dan tanda hubung, dibuat otomatis dari nama",
                error: err("slug"),
                Input {
                    id: "kategori-slug",
                    value: current.slug.clone(),
                    invalid: err("slug").is_some(),
                    oninput: move |v: String| form.write().slug = v,
                }
            }
            Field {
                label: "Deskripsi",
                html_for: "kategori-deskripsi",
                Textarea {
                    id: "kategori-deskripsi",
                    value: current.deskripsi.clone(),
                    rows: 2,
                    oninput: move |v: String| form.write().deskripsi = v,
                }
            }
            Field {
                label: "Warna",
                html_for: "kategori-color",
                error: err("color"),
                div {
                    class: "color-picker",
                    input {
                        r#type: "color",
                        value: "{current.color}",
                        oninput: move |evt: FormEvent| form.write().color = evt.value().to_uppercase(),
                    }
                    Input {
                        id: "kategori-color",
                        value: current.color.clone(),
                        invalid: err("color").is_some(),
                        oninput: move |v: String| form.write().color = v,
                    }
                }
                div {
                    class: "color-presets",
                    for color in PRESET_COLORS {
                        button {
                            key: "{color}",
                            class: "color-swatch",
                            style: "background-color: {color}",
                            title: "{color}",
                            onclick: move |_| form.write().color = color.to_string(),
                        }
                    }
                }
            }
            if id.is_some() {
                Checkbox {
                    id: "kategori-active",
                    checked: current.is_active,
                    label: "Aktif",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_follows_name_until_edited() {
        let mut form = KategoriForm::default();
        follow_name(&mut form, "Surat Undangan".into());
        assert_eq!(form.slug, "surat-undangan");
        follow_name(&mut form, "Surat Undangan Rapat".into());
        assert_eq!(form.slug, "surat-undangan-rapat");

        form.slug = "undangan".into();
        follow_name(&mut form, "Undangan Resmi".into());
        assert_eq!(form.slug, "undangan");
        assert_eq!(form.nama, "Undangan Resmi");
    }
}
