mod layout;
pub use layout::AppLayoutView;

mod login;
pub use login::LoginView;

mod dashboard;
pub use dashboard::DashboardView;

mod surat_common;

mod intake;

mod surat_masuk_list;
pub use surat_masuk_list::SuratMasukListView;

mod surat_masuk_detail;
pub use surat_masuk_detail::SuratMasukDetailView;

mod surat_masuk_form;
pub use surat_masuk_form::{SuratMasukCreateView, SuratMasukEditView};

mod surat_keluar_list;
pub use surat_keluar_list::SuratKeluarListView;

mod surat_keluar_detail;
pub use surat_keluar_detail::SuratKeluarDetailView;

mod surat_keluar_form;
pub use surat_keluar_form::{SuratKeluarCreateView, SuratKeluarEditView};

mod disposisi_dialog;

mod disposisi;
pub use disposisi::DisposisiView;

mod settings;
pub use settings::{ProfileView, SettingsLayoutView};

mod users;
pub use users::UsersView;

mod categories;
pub use categories::CategoriesView;

mod app_settings;
pub use app_settings::AppSettingsView;

mod audit_log;
pub use audit_log::AuditLogView;
