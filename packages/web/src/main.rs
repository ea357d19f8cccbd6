use dioxus::prelude::*;

use store::ConsoleConfig;
use ui::{AuthProvider, Page, SettingsTab, ToastProvider};
use views::{
    AppLayout, AppSettings, AuditLog, Categories, Dashboard, Disposisi, Login, NotFound, Profile, Root, SettingsLayout,
    SuratKeluar, SuratKeluarDetail, SuratKeluarEdit, SuratKeluarNew, SuratMasuk, SuratMasukDetail, SuratMasukEdit,
    SuratMasukNew, Users,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/login")]
    Login {},
    #[layout(AppLayout)]
        #[route("/")]
        Root {},
        #[route("/dashboard")]
        Dashboard {},
        #[route("/surat-masuk")]
        SuratMasuk {},
        #[route("/surat-masuk/baru")]
        SuratMasukNew {},
        #[route("/surat-masuk/:id")]
        SuratMasukDetail { id: i64 },
        #[route("/surat-masuk/:id/edit")]
        SuratMasukEdit { id: i64 },
        #[route("/surat-keluar")]
        SuratKeluar {},
        #[route("/surat-keluar/baru")]
        SuratKeluarNew {},
        #[route("/surat-keluar/:id")]
        SuratKeluarDetail { id: i64 },
        #[route("/surat-keluar/:id/edit")]
        SuratKeluarEdit { id: i64 },
        #[route("/disposisi")]
        Disposisi {},
        #[nest("/settings")]
        #[layout(SettingsLayout)]
            #[route("/")]
            Profile {},
            #[route("/users")]
            Users {},
            #[route("/categories")]
            Categories {},
            #[route("/app")]
            AppSettings {},
            #[route("/audit")]
            AuditLog {},
        #[end_layout]
        #[end_nest]
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl From<Page> for Route {
    fn from(page: Page) -> Self {
        match page {
            Page::Login => Route::Login {},
            Page::Dashboard => Route::Dashboard {},
            Page::SuratMasuk => Route::SuratMasuk {},
            Page::SuratMasukNew => Route::SuratMasukNew {},
            Page::SuratMasukDetail(id) => Route::SuratMasukDetail { id },
            Page::SuratMasukEdit(id) => Route::SuratMasukEdit { id },
            Page::SuratKeluar => Route::SuratKeluar {},
            Page::SuratKeluarNew => Route::SuratKeluarNew {},
            Page::SuratKeluarDetail(id) => Route::SuratKeluarDetail { id },
            Page::SuratKeluarEdit(id) => Route::SuratKeluarEdit { id },
            Page::Disposisi => Route::Disposisi {},
            Page::Settings(SettingsTab::Profile) => Route::Profile {},
            Page::Settings(SettingsTab::Users) => Route::Users {},
            Page::Settings(SettingsTab::Categories) => Route::Categories {},
            Page::Settings(SettingsTab::App) => Route::AppSettings {},
            Page::Settings(SettingsTab::Audit) => Route::AuditLog {},
        }
    }
}

impl Route {
    /// The console page this route renders. `/` and unknown paths have none.
    fn page(&self) -> Option<Page> {
        Some(match self {
            Route::Login {} => Page::Login,
            Route::Root {} | Route::NotFound { .. } => return None,
            Route::Dashboard {} => Page::Dashboard,
            Route::SuratMasuk {} => Page::SuratMasuk,
            Route::SuratMasukNew {} => Page::SuratMasukNew,
            Route::SuratMasukDetail { id } => Page::SuratMasukDetail(*id),
            Route::SuratMasukEdit { id } => Page::SuratMasukEdit(*id),
            Route::SuratKeluar {} => Page::SuratKeluar,
            Route::SuratKeluarNew {} => Page::SuratKeluarNew,
            Route::SuratKeluarDetail { id } => Page::SuratKeluarDetail(*id),
            Route::SuratKeluarEdit { id } => Page::SuratKeluarEdit(*id),
            Route::Disposisi {} => Page::Disposisi,
            Route::Profile {} => Page::Settings(SettingsTab::Profile),
            Route::Users {} => Page::Settings(SettingsTab::Users),
            Route::Categories {} => Page::Settings(SettingsTab::Categories),
            Route::AppSettings {} => Page::Settings(SettingsTab::App),
            Route::AuditLog {} => Page::Settings(SettingsTab::Audit),
        })
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const CONSOLE_TOML: &str = include_str!("../console.toml");

/// Embedded `console.toml`, with `ARSIP_API_URL` from the build environment
/// taking precedence over the file's base URL.
fn load_config() -> ConsoleConfig {
    let config = ConsoleConfig::from_toml(CONSOLE_TOML).unwrap_or_else(|e| {
        tracing::error!("Invalid {}: {}", ConsoleConfig::filename(), e);
        ConsoleConfig::default()
    });
    match option_env!("ARSIP_API_URL") {
        Some(url) if !url.trim().is_empty() => config.with_base_url(url.trim()),
        _ => config,
    }
}

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        // Global app resources
        document::Title { "Arsip Surat" }
        document::Stylesheet { href: MAIN_CSS }
        AuthProvider {
            config,
            ToastProvider {
                Router::<Route> {}
            }
        }
    }
}
