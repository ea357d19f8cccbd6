use dioxus::prelude::*;
use ui::Page;

use crate::Route;

mod login;
pub use login::Login;

mod layout;
pub use layout::{AppLayout, NotFound, Root};

mod dashboard;
pub use dashboard::{Dashboard, Disposisi};

mod surat;
pub use surat::{
    SuratKeluar, SuratKeluarDetail, SuratKeluarEdit, SuratKeluarNew, SuratMasuk, SuratMasukDetail, SuratMasukEdit,
    SuratMasukNew,
};

mod settings;
pub use settings::{AppSettings, AuditLog, Categories, Profile, SettingsLayout, Users};

/// Push the route for a page requested by a shared view.
pub(crate) fn use_page_navigator() -> Callback<Page> {
    let nav = use_navigator();
    use_callback(move |page: Page| {
        nav.push(Route::from(page));
    })
}
