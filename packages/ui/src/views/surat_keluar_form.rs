use api::forms::{SuratKeluarEdit, SuratKeluarReview};
use api::models::{DetectedKeluar, Kategori, Priority, SuratStatus, UploadFile};
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
fn keluar_flags(detected: Option<&DetectedKeluar>) -> [Option<bool>; 4] {
    match detected {
        Some(d) => [
            Some(d.tanggal_surat.detected),
            Some(d.penerima.detected),
            Some(d.perihal.detected),
            d.isi_singkat.as_ref().map(|f| f.detected),
        ],
        None => [None; 4],
    }
}

/// Inputs of an outgoing letter. The letter number is not editable; the
/// server assigns it on save.
#[component]
pub fn SuratKeluarFields(
    value: SuratKeluarReview,
    errors: FormErrors,
    kategori: Vec<Kategori>,
    detected: Option<DetectedKeluar>,
    on_change: EventHandler<SuratKeluarReview>,
) -> Element {
    let [tanggal, penerima, perihal, isi] = keluar_flags(detected.as_ref());
    let err = |field: &str| errors.get(field).map(String::from);

    let v = value.clone();
    rsx! {
        div {
            class: "form-grid",
            ReviewField {
                label: "Tanggal Surat",
                html_for: "keluar-tanggal",
                required: true,
                error: err("tanggal_surat"),
                detected: tanggal,
                Input {
                    id: "keluar-tanggal",
                    kind: "date",
                    value: v.tanggal_surat.clone(),
                    invalid: err("tanggal_surat").is_some(),
                    oninput: {
                        let value = value.clone();
                        move |text: String| on_change.call(SuratKeluarReview { tanggal_surat: text, ..value.clone() })
                    },
                }
            }
            ReviewField {
                label: "Penerima",
                html_for: "keluar-penerima",
                required: true,
                error: err("penerima"),
                detected: penerima,
                Input {
                    id: "keluar-penerima",
                    value: v.penerima.clone(),
                    placeholder: "Instansi atau pejabat tujuan",
                    invalid: err("penerima").is_some(),
                    oninput: {
                        let value = value.clone();
                        move |text: String| on_change.call(SuratKeluarReview { penerima: text, ..value.clone() })
                    },
                }
            }
            div {
                class: "form-grid-full",
                ReviewField {
                    label: "Perihal",
                    html_for: "keluar-perihal",
                    required: true,
                    error: err("perihal"),
                    detected: perihal,
                    Input {
                        id: "keluar-perihal",
                        value: v.perihal.clone(),
                        invalid: err("perihal").is_some(),
                        oninput: {
                            let value = value.clone();
                            move |text: String| on_change.call(SuratKeluarReview { perihal: text, ..value.clone() })
                        },
                    }
                }
            }
            Field {
                label: "Kategori",
                html_for: "keluar-kategori",
                Select {
                    id: "keluar-kategori",
                    value: id_value(v.kategori_id),
                    options: kategori_options(&kategori),
                    placeholder: "Tanpa kategori",
                    onchange: {
                        let value = value.clone();
                        move |id: String| on_change.call(SuratKeluarReview { kategori_id: parse_id(&id), ..value.clone() })
                    },
                }
            }
            Field {
                label: "Prioritas",
                html_for: "keluar-prioritas",
                Select {
                    id: "keluar-prioritas",
                    value: v.priority.as_str(),
                    options: priority_options(),
                    onchange: {
                        let value = value.clone();
                        move |p: String| {
                            let priority = Priority::parse(&p).unwrap_or(value.priority);
                            on_change.call(SuratKeluarReview { priority, ..value.clone() })
                        }
                    },
                }
            }
            div {
                class: "form-grid-full",
                Field {
                    label: "Tembusan",
                    html_for: "keluar-tembusan",
                    hint: "Satu penerima tembusan per baris",
                    Textarea {
                        id: "keluar-tembusan",
                        value: v.tembusan.clone(),
                        rows: 2,
                        oninput: {
                            let value = value.clone();
                            move |text: String| on_change.call(SuratKeluarReview { tembusan: text, ..value.clone() })
                        },
                    }
                }
                ReviewField {
                    label: "Isi Singkat",
                    html_for: "keluar-isi",
                    detected: isi,
                    Textarea {
                        id: "keluar-isi",
                        value: v.isi_singkat.clone(),
                        rows: 4,
                        oninput: {
                            let value = value.clone();
                            move |text: String| on_change.call(SuratKeluarReview { isi_singkat: text, ..value.clone() })
                        },
                    }
                }
            }
        }
    }
}

/// New outgoing letter. Same flow as incoming letters; the number comes
/// back from the server.
#[component]
pub fn SuratKeluarCreateView(on_navigate: EventHandler<Page>) -> Element {
    let api = use_api();
    let config = use_config();
    let toast = use_toast();
    let kategori = use_active_kategori();
    let ai_available = config.intake.ai_available;
    let mut intake = use_signal(|| Intake::<DetectedKeluar>::new(DetectionMethod::default_for(ai_available), today()));
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
                        match api.surat_keluar().detect(&file, method).await {
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
                    Ok(payload) => Some(api.surat_keluar().confirm(&payload).await),
                    Err(e) => {
                        errors.set(e);
                        None
                    }
                },
                Submission::Create { file } => match form.to_create() {
                    Ok(payload) => Some(api.surat_keluar().create(&payload, file).await),
                    Err(e) => {
                        errors.set(e);
                        None
                    }
                },
            };
            saving.set(false);
            match result {
                Some(Ok(created)) => {
                    tracing::info!("Registered surat keluar {} ({})", created.id, created.nomor_surat_keluar);
                    toast.success("Surat keluar berhasil disimpan");
                    on_navigate.call(Page::SuratKeluarDetail(created.id));
                }
                Some(Err(e)) => toast.error(e.user_message("Gagal menyimpan surat keluar")),
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
                            SuratKeluarFields {
                                value: current.form().clone(),
                                errors: errors(),
                                kategori: kategori.read().clone().unwrap_or_default(),
                                detected,
                                on_change: move |form: SuratKeluarReview| *intake.write().form_mut() = form,
                            }
                            div {
                                class: "form-actions",
                                Button {
                                    variant: ButtonVariant::Outline,
                                    disabled: saving(),
                                    onclick: move |_| on_navigate.call(Page::SuratKeluar),
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
            title: "Tambah Surat Keluar",
            subtitle: "Unggah konsep atau scan surat; nomor surat dibuat otomatis saat disimpan",
            button {
                class: "btn btn-ghost",
                onclick: move |_| on_navigate.call(Page::SuratKeluar),
                Icon { icon: FaArrowLeft, width: 14, height: 14 }
                "Kembali"
            }
        }
        {body}
    }
}

#[component]
pub fn SuratKeluarEditView(id: i64, on_navigate: EventHandler<Page>) -> Element {
    let api = use_api();
    let toast = use_toast();
    let kategori = use_active_kategori();
    let mut edit = use_signal(|| Option::<SuratKeluarEdit>::None);
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
                let surat = api.surat_keluar().get(id).await?;
                edit.set(Some(SuratKeluarEdit::from_surat(&surat)));
                Ok::<_, ApiError>(surat.nomor_surat_keluar)
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
            let result = api.surat_keluar().update(id, &payload).await;
            saving.set(false);
            match result {
                Ok(_) => {
                    toast.success("Surat keluar berhasil diperbarui");
                    on_navigate.call(Page::SuratKeluarDetail(id));
                }
                Err(e) => toast.error(e.user_message("Gagal memperbarui surat keluar")),
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
                message: e.user_message("Gagal memuat surat keluar"),
                on_retry: move |_| loaded.restart(),
            }
        },
        (Some(Ok(_)), None) => rsx! { Spinner {} },
        (Some(Ok(_)), Some(form)) => rsx! {
            Card {
                CardContent {
                    SuratKeluarFields {
                        value: form.fields.clone(),
                        errors: errors(),
                        kategori: kategori.read().clone().unwrap_or_default(),
                        on_change: move |fields: SuratKeluarReview| {
                            if let Some(current) = edit.write().as_mut() {
                                current.fields = fields;
                            }
                        },
                    }
                    Field {
                        label: "Status",
                        html_for: "keluar-status",
                        Select {
                            id: "keluar-status",
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
                            onclick: move |_| on_navigate.call(Page::SuratKeluarDetail(id)),
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
            title: "Edit Surat Keluar",
            subtitle,
            button {
                class: "btn btn-ghost",
                onclick: move |_| on_navigate.call(Page::SuratKeluarDetail(id)),
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

    #[test]
    fn test_flags_skip_missing_summary() {
        let hit = DetectedField {
            value: Some("Bupati".into()),
            detected: true,
        };
        let detected = DetectedKeluar {
            penerima: hit.clone(),
            perihal: DetectedField::default(),
            tanggal_surat: hit,
            isi_singkat: Some(DetectedField::default()),
        };
        assert_eq!(
            keluar_flags(Some(&detected)),
            [Some(true), Some(true), Some(false), Some(false)]
        );
    }
}
