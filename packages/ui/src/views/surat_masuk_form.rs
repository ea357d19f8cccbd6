use api::forms::{SuratMasukEdit, SuratMasukReview};
use api::models::{DetectedMasuk, Kategori, Priority, SuratStatus, UploadFile};
use api::{ApiError, DetectionMethod, FormErrors, Intake, IntakeStep, NextAction, Submission};
use dioxus::prelude::*;

use crate::auth::{use_api, use_config};
use crate::components::{
    Button, ButtonVariant, Card, CardContent, CardHeader, EmptyState, ErrorState, Field, Input, PageHeader, Select,
    Spinner, Textarea,
};
use crate::format::today;
use crate::icons::FaArrowLeft;
use crate::nav::Page;
use crate::toast::use_toast;
use crate::Icon;

use super::intake::{review_sidebar, upload_step, ReviewField, ScanningPanel};
use super::surat_common::{id_value, kategori_options, parse_id, priority_options, status_options, use_active_kategori};

/// Detection flags per field, in form order.
fn masuk_flags(detected: Option<&DetectedMasuk>) -> [Option<bool>; 5] {
    match detected {
        Some(d) => [
            Some(d.nomor_surat.detected),
            Some(d.tanggal_surat.detected),
            Some(d.pengirim.detected),
            Some(d.perihal.detected),
            d.isi_singkat.as_ref().map(|f| f.detected),
        ],
        None => [None; 5],
    }
}

/// Inputs of an incoming letter, shared by the intake review and the edit page.
#[component]
pub fn SuratMasukFields(
    value: SuratMasukReview,
    errors: FormErrors,
    kategori: Vec<Kategori>,
    /// Detected fields to flag; `None` hides the markers.
    detected: Option<DetectedMasuk>,
    on_change: EventHandler<SuratMasukReview>,
) -> Element {
    let [nomor, tanggal, pengirim, perihal, isi] = masuk_flags(detected.as_ref());
    let err = |field: &str| errors.get(field).map(String::from);

    let v = value.clone();
    rsx! {
        div {
            class: "form-grid",
            ReviewField {
                label: "Nomor Surat",
                html_for: "masuk-nomor",
                error: err("nomor_surat"),
                detected: nomor,
                Input {
                    id: "masuk-nomor",
                    value: v.nomor_surat.clone(),
                    placeholder: "Contoh: 005/123/DINKES/2024",
                    oninput: {
                        let value = value.clone();
                        move |text: String| on_change.call(SuratMasukReview { nomor_surat: text, ..value.clone() })
                    },
                }
            }
            ReviewField {
                label: "Tanggal Surat",
                html_for: "masuk-tanggal-surat",
                required: true,
                error: err("tanggal_surat"),
                detected: tanggal,
                Input {
                    id: "masuk-tanggal-surat",
                    kind: "date",
                    value: v.tanggal_surat.clone(),
                    invalid: err("tanggal_surat").is_some(),
                    oninput: {
                        let value = value.clone();
                        move |text: String| on_change.call(SuratMasukReview { tanggal_surat: text, ..value.clone() })
                    },
                }
            }
            ReviewField {
                label: "Tanggal Terima",
                html_for: "masuk-tanggal-terima",
                required: true,
                error: err("tanggal_terima"),
                Input {
                    id: "masuk-tanggal-terima",
                    kind: "date",
                    value: v.tanggal_terima.clone(),
                    invalid: err("tanggal_terima").is_some(),
                    oninput: {
                        let value = value.clone();
                        move |text: String| on_change.call(SuratMasukReview { tanggal_terima: text, ..value.clone() })
                    },
                }
            }
            ReviewField {
                label: "Pengirim",
                html_for: "masuk-pengirim",
                required: true,
                error: err("pengirim"),
                detected: pengirim,
                Input {
                    id: "masuk-pengirim",
                    value: v.pengirim.clone(),
                    placeholder: "Instansi atau nama pengirim",
                    invalid: err("pengirim").is_some(),
                    oninput: {
                        let value = value.clone();
                        move |text: String| on_change.call(SuratMasukReview { pengirim: text, ..value.clone() })
                    },
                }
            }
            ReviewField {
                label: "Perihal",
                html_for: "masuk-perihal",
                required: true,
                error: err("perihal"),
                detected: perihal,
                Input {
                    id: "masuk-perihal",
                    value: v.perihal.clone(),
                    invalid: err("perihal").is_some(),
                    oninput: {
                        let value = value.clone();
                        move |text: String| on_change.call(SuratMasukReview { perihal: text, ..value.clone() })
                    },
                }
            }
            Field {
                label: "Kategori",
                html_for: "masuk-kategori",
                Select {
                    id: "masuk-kategori",
                    value: id_value(v.kategori_id),
                    options: kategori_options(&kategori),
                    placeholder: "Tanpa kategori",
                    onchange: {
                        let value = value.clone();
                        move |id: String| on_change.call(SuratMasukReview { kategori_id: parse_id(&id), ..value.clone() })
                    },
                }
            }
            Field {
                label: "Prioritas",
                html_for: "masuk-prioritas",
                Select {
                    id: "masuk-prioritas",
                    value: v.priority.as_str(),
                    options: priority_options(),
                    onchange: {
                        let value = value.clone();
                        move |p: String| {
                            let priority = Priority::parse(&p).unwrap_or(value.priority);
                            on_change.call(SuratMasukReview { priority, ..value.clone() })
                        }
                    },
                }
            }
            div {
                class: "form-grid-full",
                ReviewField {
                    label: "Isi Singkat",
                    html_for: "masuk-isi",
                    detected: isi,
                    Textarea {
                        id: "masuk-isi",
                        value: v.isi_singkat.clone(),
                        rows: 4,
                        oninput: {
                            let value = value.clone();
                            move |text: String| on_change.call(SuratMasukReview { isi_singkat: text, ..value.clone() })
                        },
                    }
                }
            }
        }
    }
}

/// New incoming letter: pick a method, drop the scan, review what was
/// detected, then save.
#[component]
pub fn SuratMasukCreateView(on_navigate: EventHandler<Page>) -> Element {
    let api = use_api();
    let config = use_config();
    let toast = use_toast();
    let kategori = use_active_kategori();
    let ai_available = config.intake.ai_available;
    let mut intake = use_signal(|| Intake::<DetectedMasuk>::new(DetectionMethod::default_for(ai_available), today()));
    let mut errors = use_signal(FormErrors::default);
    let mut saving = use_signal(|| false);

    let on_files = {
        let api = api.clone();
        move |files: Vec<UploadFile>| {
            let next = intake.write().select_files(files);
            match next {
                Err(e) => toast.error(e.to_string()),
                Ok(NextAction::Review) => errors.set(FormErrors::default()),
                Ok(NextAction::Detect) => {
                    let (file, method) = {
                        let current = intake.read();
                        (current.file().cloned(), current.method())
                    };
                    let Some(file) = file else {
                        return;
                    };
                    let api = api.clone();
                    spawn(async move {
                        match api.surat_masuk().detect(&file, method).await {
                            Ok(result) => {
                                if let Err(e) = intake.write().detection_succeeded(result) {
                                    tracing::debug!("Ignoring stale detection for {}: {}", file.name, e);
                                }
                                errors.set(FormErrors::default());
                            }
                            Err(e) => {
                                intake.write().detection_failed();
                                toast.error(e.user_message("Gagal memindai dokumen"));
                            }
                        }
                    });
                }
            }
        }
    };

    let submit = move |_| {
        let api = api.clone();
        async move {
            let snapshot = intake();
            let Some(submission) = snapshot.submission() else {
                return;
            };
            let form = snapshot.form();
            saving.set(true);
            let result = match submission {
                Submission::Confirm {
                    file_token,
                    ocr_text,
                    ocr_confidence,
                } => match form.to_confirm(file_token, ocr_text, ocr_confidence) {
                    Ok(payload) => Some(api.surat_masuk().confirm(&payload).await),
                    Err(e) => {
                        errors.set(e);
                        None
                    }
                },
                Submission::Create { file } => match form.to_create() {
                    Ok(payload) => Some(api.surat_masuk().create(&payload, file).await),
                    Err(e) => {
                        errors.set(e);
                        None
                    }
                },
            };
            saving.set(false);
            match result {
                Some(Ok(created)) => {
                    tracing::info!("Registered surat masuk {} ({})", created.id, created.nomor_surat);
                    toast.success("Surat masuk berhasil disimpan");
                    on_navigate.call(Page::SuratMasukDetail(created.id));
                }
                Some(Err(e)) => toast.error(e.user_message("Gagal menyimpan surat masuk")),
                None => toast.error("Periksa kembali isian form"),
            }
        }
    };

    let current = intake.read();
    let body = match current.step() {
        IntakeStep::Upload => upload_step(
            current.method(),
            ai_available,
            EventHandler::new(move |method: DetectionMethod| {
                intake.write().set_method(method);
            }),
            EventHandler::new(on_files),
            EventHandler::new(move |_: ()| {
                intake.write().open_blank();
                errors.set(FormErrors::default());
            }),
        ),
        IntakeStep::Scanning => rsx! {
            ScanningPanel {
                method: current.method(),
                filename: current.file().map(|f| f.name.clone()).unwrap_or_default(),
            }
        },
        IntakeStep::Review => {
            let detected = current
                .result()
                .filter(|_| current.shows_badges())
                .map(|r| r.detected.clone());
            rsx! {
                div {
                    class: "intake-review",
                    {review_sidebar(&*current, EventHandler::new(move |_: ()| intake.write().retry()))}
                    Card {
                        CardHeader { title: "Data Surat", description: "Periksa dan lengkapi data sebelum disimpan" }
                        CardContent {
                            SuratMasukFields {
                                value: current.form().clone(),
                                errors: errors(),
                                kategori: kategori.read().clone().unwrap_or_default(),
                                detected,
                                on_change: move |form: SuratMasukReview| *intake.write().form_mut() = form,
                            }
                            div {
                                class: "form-actions",
                                Button {
                                    variant: ButtonVariant::Outline,
                                    disabled: saving(),
                                    onclick: move |_| on_navigate.call(Page::SuratMasuk),
                                    "Batal"
                                }
                                Button { loading: saving(), onclick: submit, "Simpan Surat" }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        PageHeader {
            title: "Tambah Surat Masuk",
            subtitle: "Unggah scan surat untuk mengisi data secara otomatis",
            button {
                class: "btn btn-ghost",
                onclick: move |_| on_navigate.call(Page::SuratMasuk),
                Icon { icon: FaArrowLeft, width: 14, height: 14 }
                "Kembali"
            }
        }
        {body}
    }
}

#[component]
pub fn SuratMasukEditView(id: i64, on_navigate: EventHandler<Page>) -> Element {
    let api = use_api();
    let toast = use_toast();
    let kategori = use_active_kategori();
    let mut edit = use_signal(|| Option::<SuratMasukEdit>::None);
    let mut errors = use_signal(FormErrors::default);
    let mut saving = use_signal(|| false);

    let mut current_id = use_signal(|| id);
    if *current_id.peek() != id {
        current_id.set(id);
    }
    let mut loaded = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let id = current_id();
            async move {
                let surat = api.surat_masuk().get(id).await?;
                edit.set(Some(SuratMasukEdit::from_surat(&surat)));
                Ok::<_, ApiError>(surat.nomor_surat)
            }
        }
    });

    let submit = move |_| {
        let api = api.clone();
        async move {
            let Some(form) = edit() else {
                return;
            };
            let payload = match form.validate() {
                Ok(p) => p,
                Err(e) => {
                    errors.set(e);
                    return;
                }
            };
            errors.set(FormErrors::default());
            saving.set(true);
            let result = api.surat_masuk().update(id, &payload).await;
            saving.set(false);
            match result {
                Ok(_) => {
                    toast.success("Surat masuk berhasil diperbarui");
                    on_navigate.call(Page::SuratMasukDetail(id));
                }
                Err(e) => toast.error(e.user_message("Gagal memperbarui surat masuk")),
            }
        }
    };

    let body = match (&*loaded.read(), edit()) {
        (None, _) => rsx! { Spinner { label: "Memuat surat..." } },
        (Some(Err(e)), _) if e.is_not_found() => rsx! {
            EmptyState { title: "Surat tidak ditemukan", description: "Surat mungkin sudah dihapus" }
        },
        (Some(Err(e)), _) => rsx! {
            ErrorState {
                message: e.user_message("Gagal memuat surat masuk"),
                on_retry: move |_| loaded.restart(),
            }
        },
        (Some(Ok(_)), None) => rsx! { Spinner {} },
        (Some(Ok(_)), Some(form)) => rsx! {
            Card {
                CardContent {
                    SuratMasukFields {
                        value: form.fields.clone(),
                        errors: errors(),
                        kategori: kategori.read().clone().unwrap_or_default(),
                        on_change: move |fields: SuratMasukReview| {
                            if let Some(current) = edit.write().as_mut() {
                                current.fields = fields;
                            }
                        },
                    }
                    Field {
                        label: "Status",
                        html_for: "masuk-status",
                        Select {
                            id: "masuk-status",
                            value: form.status.as_str(),
                            options: status_options(),
                            onchange: move |v: String| {
                                if let (Some(current), Some(status)) = (edit.write().as_mut(), SuratStatus::parse(&v)) {
                                    current.status = status;
                                }
                            },
                        }
                    }
                    div {
                        class: "form-actions",
                        Button {
                            variant: ButtonVariant::Outline,
                            disabled: saving(),
                            onclick: move |_| on_navigate.call(Page::SuratMasukDetail(id)),
                            "Batal"
                        }
                        Button { loading: saving(), onclick: submit, "Simpan Perubahan" }
                    }
                }
            }
        },
    };

    let subtitle = match &*loaded.read() {
        Some(Ok(nomor)) => format!("No. {nomor}"),
        _ => String::new(),
    };

    rsx! {
        PageHeader {
            title: "Edit Surat Masuk",
            subtitle,
            button {
                class: "btn btn-ghost",
                onclick: move |_| on_navigate.call(Page::SuratMasukDetail(id)),
                Icon { icon: FaArrowLeft, width: 14, height: 14 }
                "Kembali"
            }
        }
        {body}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::DetectedField;

    fn field(value: Option<&str>) -> DetectedField {
        DetectedField {
            value: value.map(String::from),
            detected: value.is_some(),
        }
    }

    #[test]
    fn test_flags_follow_detection() {
        let detected = DetectedMasuk {
            nomor_surat: field(Some("005/UND/2024")),
            tanggal_surat: field(None),
            pengirim: field(Some("Dinas PU")),
            perihal: field(Some("Undangan")),
            isi_singkat: None,
        };
        assert_eq!(
            masuk_flags(Some(&detected)),
            [Some(true), Some(false), Some(true), Some(true), None]
        );
        assert_eq!(masuk_flags(None), [None; 5]);
    }
}
