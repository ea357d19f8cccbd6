//! Widgets of the "detect, review, confirm" intake page shared by both
//! letter registers. The page owns an [`api::Intake`] and feeds these pieces.

use api::models::{format_size, UploadFile, ACCEPT_ATTR};
use api::{DetectionMethod, Intake, Prefill};
use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;

use crate::components::{FieldError, Label};
use crate::format::format_confidence;
use crate::icons::{FaCloudArrowUp, FaRotate};
use crate::Icon;

/// Read picked or dropped files into memory.
pub async fn read_uploads(files: Vec<FileData>) -> Vec<UploadFile> {
    let mut uploads = Vec::with_capacity(files.len());
    for file in files {
        let name = file.name();
        match file.read_bytes().await {
            Ok(bytes) => uploads.push(UploadFile::new(name, bytes.to_vec())),
            Err(e) => tracing::warn!("Could not read {}: {:?}", name, e),
        }
    }
    uploads
}

/// Cards for choosing how fields get extracted. AI methods are disabled
/// when the deployment has no AI backend.
#[component]
pub fn MethodSelector(selected: DetectionMethod, ai_available: bool, on_select: EventHandler<DetectionMethod>) -> Element {
    rsx! {
        div {
            class: "method-grid",
            for method in DetectionMethod::ALL {
                {
                    let available = method.is_available(ai_available);
                    let mut class = String::from("method-card");
                    if method == selected {
                        class.push_str(" method-card-selected");
                    }
                    if !available {
                        class.push_str(" method-card-disabled");
                    }
                    rsx! {
                        button {
                            key: "{method.as_str()}",
                            class: "{class}",
                            disabled: !available,
                            onclick: move |_| on_select.call(method),
                            div {
                                class: "method-card-title",
                                span { class: "method-icon", "{method.icon()}" }
                                span { "{method.label()}" }
                                if method.is_recommended() {
                                    span { class: "badge badge-success", "Rekomendasi" }
                                }
                            }
                            p { class: "method-card-description", "{method.description()}" }
                            if !available {
                                p { class: "method-card-note", "AI tidak tersedia" }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// File picker with drag-and-drop.
#[component]
pub fn DropZone(on_files: EventHandler<Vec<UploadFile>>) -> Element {
    let mut dragging = use_signal(|| false);
    rsx! {
        label {
            class: if dragging() { "dropzone dropzone-active" } else { "dropzone" },
            ondragover: move |evt: DragEvent| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| dragging.set(false),
            ondrop: move |evt: DragEvent| async move {
                evt.prevent_default();
                dragging.set(false);
                on_files.call(read_uploads(evt.files()).await);
            },
            input {
                class: "sr-only",
                r#type: "file",
                accept: ACCEPT_ATTR,
                onchange: move |evt: FormEvent| async move {
                    on_files.call(read_uploads(evt.files()).await);
                },
            }
            Icon { icon: FaCloudArrowUp, width: 36, height: 36 }
            p { class: "dropzone-title", "Seret file ke sini atau klik untuk memilih" }
            p { class: "muted", "PDF, PNG, JPG atau JPEG, satu file" }
        }
    }
}

#[component]
pub fn ScanningPanel(method: DetectionMethod, #[props(into)] filename: String) -> Element {
    rsx! {
        div {
            class: "scanning-panel",
            span { class: "spinner spinner-lg" }
            p { class: "scanning-title", "{method.scanning_label()}" }
            p { class: "muted", "{filename}" }
        }
    }
}

/// The uploaded file with the method used, and a button to start over.
#[component]
pub fn FileSummary(file: UploadFile, method: DetectionMethod, on_replace: EventHandler<()>) -> Element {
    let size = format_size(file.size() as u64);
    rsx! {
        div {
            class: "file-summary",
            div {
                div { class: "file-name", "{file.name}" }
                div { class: "muted", "{size}" }
            }
            span { class: "badge badge-accent", "{method.badge()}" }
            button {
                class: "btn btn-outline btn-sm",
                onclick: move |_| on_replace.call(()),
                Icon { icon: FaRotate, width: 12, height: 12 }
                "Ganti"
            }
        }
    }
}

/// Marker next to a reviewed field.
#[component]
pub fn DetectedBadge(detected: bool) -> Element {
    rsx! {
        if detected {
            span { class: "detected-badge detected-yes", "✓ Terdeteksi" }
        } else {
            span { class: "detected-badge detected-no", "? Tidak terdeteksi" }
        }
    }
}

#[component]
pub fn DetectionSummary(#[props(into)] text: String, all_detected: bool, ai_error: Option<String>) -> Element {
    rsx! {
        div {
            class: if all_detected { "alert alert-success" } else { "alert alert-info" },
            "{text}"
        }
        if let Some(message) = ai_error {
            div { class: "alert alert-warning", "AI gagal memproses surat: {message}. Field diisi dengan metode cadangan." }
        }
    }
}

/// Collapsible raw OCR text with its confidence.
#[component]
pub fn OcrTextPanel(#[props(into)] text: String, confidence: Option<f64>, keywords: Vec<String>) -> Element {
    let mut open = use_signal(|| false);
    if text.trim().is_empty() {
        return rsx! {};
    }
    rsx! {
        div {
            class: "ocr-panel",
            button {
                class: "ocr-toggle",
                onclick: move |_| open.toggle(),
                if open() { "Sembunyikan teks OCR" } else { "Lihat teks OCR" }
                span { class: "muted", " (keyakinan {format_confidence(confidence)})" }
            }
            if !keywords.is_empty() {
                div {
                    class: "keyword-list",
                    for keyword in keywords {
                        span { key: "{keyword}", class: "badge badge-neutral", "{keyword}" }
                    }
                }
            }
            if open() {
                pre { class: "ocr-text", "{text}" }
            }
        }
    }
}

/// A review form field with its detection marker next to the label.
#[component]
pub fn ReviewField(
    #[props(into)] label: String,
    #[props(into)] html_for: String,
    #[props(default)] required: bool,
    error: Option<String>,
    /// `Some` once fields were detected; `None` hides the marker.
    detected: Option<bool>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "field",
            div {
                class: "field-head",
                Label { html_for, required, "{label}" }
                if let Some(detected) = detected {
                    DetectedBadge { detected }
                }
            }
            {children}
            FieldError { message: error }
        }
    }
}

/// The upload step: method cards, the drop zone and the manual-entry escape.
pub fn upload_step(
    method: DetectionMethod,
    ai_available: bool,
    on_method: EventHandler<DetectionMethod>,
    on_files: EventHandler<Vec<UploadFile>>,
    on_blank: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "intake-upload",
            h3 { class: "section-title", "Metode ekstraksi" }
            MethodSelector { selected: method, ai_available, on_select: on_method }
            DropZone { on_files }
            div {
                class: "intake-blank",
                span { class: "muted", "Tidak punya file?" }
                button {
                    class: "btn btn-ghost btn-sm",
                    onclick: move |_| on_blank.call(()),
                    "Buka Form Kosong"
                }
            }
        }
    }
}

/// Left column of the review step: the file, how well detection went and
/// the OCR text.
pub fn review_sidebar<F: Prefill>(intake: &Intake<F>, on_replace: EventHandler<()>) -> Element {
    let method = intake.method();
    let file = intake.file().cloned();
    let result = intake.result();
    let ai_error = result.and_then(|r| r.ai_error.as_ref()).map(|e| e.message.clone());
    let ocr_text = result.map(|r| r.ocr_text.clone()).unwrap_or_default();
    let confidence = result.and_then(|r| r.ocr_confidence);
    let keywords = result.map(|r| r.keywords.clone()).unwrap_or_default();
    rsx! {
        div {
            class: "intake-side",
            if let Some(file) = file {
                FileSummary { file, method, on_replace }
            } else {
                div {
                    class: "file-summary",
                    span { class: "muted", "Tanpa file lampiran" }
                    button {
                        class: "btn btn-outline btn-sm",
                        onclick: move |_| on_replace.call(()),
                        "Unggah File"
                    }
                }
            }
            DetectionSummary { text: intake.summary_text(), all_detected: intake.all_detected(), ai_error }
            OcrTextPanel { text: ocr_text, confidence, keywords }
        }
    }
}
