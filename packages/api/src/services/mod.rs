//! Per-resource service handles.
//!
//! Each handle borrows the [`ApiClient`] and exposes one method per endpoint:
//!
//! ```ignore
//! let letters = client.surat_masuk().list(&SuratMasukQuery::default()).await?;
//! ```

mod audit;
mod auth;
mod dashboard;
mod disposisi;
mod kategori;
mod notifications;
mod reports;
mod settings;
mod surat_keluar;
mod surat_masuk;
mod users;

pub use audit::AuditService;
pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use disposisi::DisposisiService;
pub use kategori::KategoriService;
pub use notifications::NotificationService;
pub use reports::ReportService;
pub use settings::SettingsService;
pub use surat_keluar::SuratKeluarService;
pub use surat_masuk::SuratMasukService;
pub use users::UserService;

use crate::client::ApiClient;

impl ApiClient {
    pub fn auth(&self) -> AuthService<'_> {
        AuthService { client: self }
    }

    pub fn users(&self) -> UserService<'_> {
        UserService { client: self }
    }

    pub fn kategori(&self) -> KategoriService<'_> {
        KategoriService { client: self }
    }

    pub fn surat_masuk(&self) -> SuratMasukService<'_> {
        SuratMasukService { client: self }
    }

    pub fn surat_keluar(&self) -> SuratKeluarService<'_> {
        SuratKeluarService { client: self }
    }

    pub fn disposisi(&self) -> DisposisiService<'_> {
        DisposisiService { client: self }
    }

    pub fn notifications(&self) -> NotificationService<'_> {
        NotificationService { client: self }
    }

    pub fn audit(&self) -> AuditService<'_> {
        AuditService { client: self }
    }

    pub fn settings(&self) -> SettingsService<'_> {
        SettingsService { client: self }
    }

    pub fn dashboard(&self) -> DashboardService<'_> {
        DashboardService { client: self }
    }

    pub fn reports(&self) -> ReportService<'_> {
        ReportService { client: self }
    }
}
