//! Platform glue shared by every view.
//!
//! | Concern | Web (WASM + `web` feature) | Desktop (native) |
//! |---------|----------------------------|------------------|
//! | Session storage | `window.localStorage` via [`store::LocalStorageStore`] | one file per key under `<data_dir>/arsip-surat/` via [`store::FileStore`] |
//! | Timers | `gloo_timers` | `tokio::time` |
//! | Downloads | `Blob` + object URL + synthetic `<a download>` click | written to the user's download directory |
//! | Printing | `window.print()` | not available |

use std::time::Duration;

use thiserror::Error;

/// Create the platform-appropriate store for the persisted auth session.
pub fn make_session_store() -> store::SessionStore<impl store::KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::SessionStore::new(store::LocalStorageStore::new())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("arsip-surat");
        store::SessionStore::new(store::FileStore::new(base))
    }
}

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or_default()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DownloadError {
    #[error("Browser menolak unduhan: {0}")]
    Browser(String),

    #[error("Gagal menyimpan file: {0}")]
    Io(String),
}

/// Hand a downloaded file to the user.
///
/// Returns where the file went: the file name in the browser, the full path
/// on desktop.
pub fn save_file(name: &str, mime: &str, bytes: &[u8]) -> Result<String, DownloadError> {
    #[cfg(target_arch = "wasm32")]
    {
        browser_download(name, mime, bytes).map_err(|e| DownloadError::Browser(format!("{e:?}")))?;
        Ok(name.to_string())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = mime;
        let dir = dirs::download_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
        let path = dir.join(name);
        std::fs::write(&path, bytes).map_err(|e| DownloadError::Io(e.to_string()))?;
        tracing::info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path.display().to_string())
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_download(name: &str, mime: &str, bytes: &[u8]) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url)
}

/// Open the print dialog for the current page.
pub fn print_page() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.print() {
                tracing::warn!("window.print failed: {:?}", e);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!("Printing is only available in the browser");
}
