//! Wire models for the archive REST API.

mod audit;
mod dashboard;
mod detect;
mod disposisi;
mod file;
mod kategori;
mod notification;
mod report;
mod setting;
mod surat;
mod surat_keluar;
mod surat_masuk;
mod user;

pub use audit::{AuditAction, AuditLog, AuditQuery, AuditStats};
pub use dashboard::{ChartDataPoint, DashboardSnapshot, DashboardStats, RecentActivity, TrendPoint};
pub use detect::{
    AiError, DetectKeluarResult, DetectMasukResult, DetectResult, DetectedField, DetectedFields,
    DetectedKeluar, DetectedMasuk, OcrResult,
};
pub use disposisi::{
    CompleteDisposisi, CreateDisposisi, Disposisi, DisposisiQuery, DisposisiStatus, UpdateDisposisi,
};
pub use file::{format_size, ExportedFile, FormFields, UploadFile, ACCEPTED_EXTENSIONS, ACCEPT_ATTR};
pub use kategori::{kategori_name, CreateKategori, Kategori, KategoriQuery, KategoriRef, UpdateKategori};
pub use notification::{Notification, NotificationKind, NotificationQuery, NotificationStats};
pub use report::{report_filename, ReportFormat, ReportParams};
pub use setting::{setting_value, AppSetting, OrgProfile, SettingType, UpdateSetting};
pub use surat::{Priority, SuratStatus, SuratType};
pub use surat_keluar::{ConfirmSuratKeluar, CreateSuratKeluar, SuratKeluar, SuratKeluarQuery, UpdateSuratKeluar};
pub use surat_masuk::{ConfirmSuratMasuk, CreateSuratMasuk, SuratMasuk, SuratMasukQuery, UpdateSuratMasuk};
pub use user::{
    ChangePassword, CreateUser, LoginResponse, MessageResponse, PasswordChangeResponse, ResetPassword,
    Role, UpdateProfile, UpdateUser, User, UserCount, UserQuery,
};

pub(crate) use kategori::default_color;
