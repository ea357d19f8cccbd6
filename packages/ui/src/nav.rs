//! Role-gated navigation and route guarding.
//!
//! The router lives in the platform package; this module only decides. Each
//! route declares an [`Access`] level and [`guard`] answers whether the
//! current session may stay or must be sent elsewhere.

use store::{AuthSession, Role};

/// Top-level destinations in the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavTarget {
    Dashboard,
    SuratMasuk,
    SuratKeluar,
    Disposisi,
    Users,
    Settings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub target: NavTarget,
    pub label: &'static str,
    pub admin_only: bool,
}

pub const SIDEBAR_ITEMS: [NavItem; 6] = [
    NavItem { target: NavTarget::Dashboard, label: "Dashboard", admin_only: false },
    NavItem { target: NavTarget::SuratMasuk, label: "Surat Masuk", admin_only: false },
    NavItem { target: NavTarget::SuratKeluar, label: "Surat Keluar", admin_only: false },
    NavItem { target: NavTarget::Disposisi, label: "Disposisi", admin_only: false },
    NavItem { target: NavTarget::Users, label: "Users", admin_only: true },
    NavItem { target: NavTarget::Settings, label: "Settings", admin_only: false },
];

pub fn sidebar_items(role: Role) -> Vec<NavItem> {
    SIDEBAR_ITEMS
        .into_iter()
        .filter(|item| !item.admin_only || role.is_admin())
        .collect()
}

/// Sections of the settings area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SettingsTab {
    Profile,
    Users,
    Categories,
    App,
    Audit,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 5] = [
        SettingsTab::Profile,
        SettingsTab::Users,
        SettingsTab::Categories,
        SettingsTab::App,
        SettingsTab::Audit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsTab::Profile => "Profil",
            SettingsTab::Users => "Manajemen User",
            SettingsTab::Categories => "Kategori Surat",
            SettingsTab::App => "Pengaturan Aplikasi",
            SettingsTab::Audit => "Audit Log",
        }
    }

    pub fn admin_only(self) -> bool {
        !matches!(self, SettingsTab::Profile)
    }
}

pub fn settings_tabs(role: Role) -> Vec<SettingsTab> {
    SettingsTab::ALL
        .into_iter()
        .filter(|tab| !tab.admin_only() || role.is_admin())
        .collect()
}

/// A screen of the console, independent of the router that renders it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Login,
    Dashboard,
    SuratMasuk,
    SuratMasukNew,
    SuratMasukDetail(i64),
    SuratMasukEdit(i64),
    SuratKeluar,
    SuratKeluarNew,
    SuratKeluarDetail(i64),
    SuratKeluarEdit(i64),
    Disposisi,
    Settings(SettingsTab),
}

impl Page {
    pub fn path(self) -> String {
        match self {
            Page::Login => "/login".to_string(),
            Page::Dashboard => "/dashboard".to_string(),
            Page::SuratMasuk => "/surat-masuk".to_string(),
            Page::SuratMasukNew => "/surat-masuk/baru".to_string(),
            Page::SuratMasukDetail(id) => format!("/surat-masuk/{id}"),
            Page::SuratMasukEdit(id) => format!("/surat-masuk/{id}/edit"),
            Page::SuratKeluar => "/surat-keluar".to_string(),
            Page::SuratKeluarNew => "/surat-keluar/baru".to_string(),
            Page::SuratKeluarDetail(id) => format!("/surat-keluar/{id}"),
            Page::SuratKeluarEdit(id) => format!("/surat-keluar/{id}/edit"),
            Page::Disposisi => "/disposisi".to_string(),
            Page::Settings(SettingsTab::Profile) => "/settings".to_string(),
            Page::Settings(SettingsTab::Users) => "/settings/users".to_string(),
            Page::Settings(SettingsTab::Categories) => "/settings/categories".to_string(),
            Page::Settings(SettingsTab::App) => "/settings/app".to_string(),
            Page::Settings(SettingsTab::Audit) => "/settings/audit".to_string(),
        }
    }

    /// Resolve an in-app link such as a notification's `link` field.
    /// Query strings and fragments are ignored.
    pub fn from_link(link: &str) -> Option<Page> {
        let path = link.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let page = match segments.as_slice() {
            [] | ["dashboard"] => Page::Dashboard,
            ["login"] => Page::Login,
            ["surat-masuk"] => Page::SuratMasuk,
            ["surat-masuk", "baru"] => Page::SuratMasukNew,
            ["surat-masuk", id] => Page::SuratMasukDetail(id.parse().ok()?),
            ["surat-masuk", id, "edit"] => Page::SuratMasukEdit(id.parse().ok()?),
            ["surat-keluar"] => Page::SuratKeluar,
            ["surat-keluar", "baru"] => Page::SuratKeluarNew,
            ["surat-keluar", id] => Page::SuratKeluarDetail(id.parse().ok()?),
            ["surat-keluar", id, "edit"] => Page::SuratKeluarEdit(id.parse().ok()?),
            ["disposisi", ..] => Page::Disposisi,
            ["users"] | ["settings", "users"] => Page::Settings(SettingsTab::Users),
            ["settings"] => Page::Settings(SettingsTab::Profile),
            ["settings", "categories"] => Page::Settings(SettingsTab::Categories),
            ["settings", "app"] => Page::Settings(SettingsTab::App),
            ["settings", "audit"] => Page::Settings(SettingsTab::Audit),
            _ => return None,
        };
        Some(page)
    }

    /// Sidebar entry highlighted while this page is open.
    pub fn nav_target(self) -> Option<NavTarget> {
        Some(match self {
            Page::Login => return None,
            Page::Dashboard => NavTarget::Dashboard,
            Page::SuratMasuk | Page::SuratMasukNew | Page::SuratMasukDetail(_) | Page::SuratMasukEdit(_) => {
                NavTarget::SuratMasuk
            }
            Page::SuratKeluar | Page::SuratKeluarNew | Page::SuratKeluarDetail(_) | Page::SuratKeluarEdit(_) => {
                NavTarget::SuratKeluar
            }
            Page::Disposisi => NavTarget::Disposisi,
            Page::Settings(SettingsTab::Users) => NavTarget::Users,
            Page::Settings(_) => NavTarget::Settings,
        })
    }

    pub fn access(self) -> Access {
        match self {
            Page::Login => Access::Guest,
            Page::Settings(tab) if tab.admin_only() => Access::Admin,
            _ => Access::Member,
        }
    }
}

impl NavTarget {
    pub fn page(self) -> Page {
        match self {
            NavTarget::Dashboard => Page::Dashboard,
            NavTarget::SuratMasuk => Page::SuratMasuk,
            NavTarget::SuratKeluar => Page::SuratKeluar,
            NavTarget::Disposisi => Page::Disposisi,
            NavTarget::Users => Page::Settings(SettingsTab::Users),
            NavTarget::Settings => Page::Settings(SettingsTab::Profile),
        }
    }
}

impl Redirect {
    pub fn page(self) -> Page {
        match self {
            Redirect::Login => Page::Login,
            Redirect::Dashboard => Page::Dashboard,
            Redirect::Settings => Page::Settings(SettingsTab::Profile),
        }
    }
}

/// Who may open a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Only signed-out visitors (the login page).
    Guest,
    /// Any signed-in user.
    Member,
    /// Signed-in administrators.
    Admin,
}

/// Where a guarded route sends the visitor instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Dashboard,
    Settings,
}

pub fn guard(access: Access, session: &AuthSession) -> Option<Redirect> {
    match access {
        Access::Guest => session.is_authenticated.then_some(Redirect::Dashboard),
        _ if !session.is_authenticated => Some(Redirect::Login),
        Access::Admin if !session.is_admin() => Some(Redirect::Settings),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::AuthUser;

    fn session(role: Role) -> AuthSession {
        AuthSession::signed_in(
            AuthUser {
                id: 1,
                username: "u".into(),
                email: "u@dinas.go.id".into(),
                full_name: String::new(),
                role,
                is_active: true,
                created_at: None,
                avatar: None,
            },
            "tok".into(),
        )
    }

    #[test]
    fn test_guest_routes() {
        assert_eq!(guard(Access::Guest, &AuthSession::default()), None);
        assert_eq!(guard(Access::Guest, &session(Role::Staff)), Some(Redirect::Dashboard));
    }

    #[test]
    fn test_member_and_admin_routes() {
        let anonymous = AuthSession::default();
        assert_eq!(guard(Access::Member, &anonymous), Some(Redirect::Login));
        assert_eq!(guard(Access::Admin, &anonymous), Some(Redirect::Login));
        assert_eq!(guard(Access::Member, &session(Role::Staff)), None);
        assert_eq!(guard(Access::Admin, &session(Role::Staff)), Some(Redirect::Settings));
        assert_eq!(guard(Access::Admin, &session(Role::Admin)), None);
    }

    #[test]
    fn test_role_gated_menus() {
        let staff: Vec<NavTarget> = sidebar_items(Role::Staff).iter().map(|i| i.target).collect();
        assert!(!staff.contains(&NavTarget::Users));
        assert_eq!(sidebar_items(Role::Admin).len(), SIDEBAR_ITEMS.len());

        assert_eq!(settings_tabs(Role::Pimpinan), vec![SettingsTab::Profile]);
        assert_eq!(settings_tabs(Role::Admin).len(), 5);
    }

    #[test]
    fn test_links_resolve_to_pages() {
        assert_eq!(Page::from_link("/surat-masuk/12"), Some(Page::SuratMasukDetail(12)));
        assert_eq!(Page::from_link("/surat-keluar/3/edit?tab=file"), Some(Page::SuratKeluarEdit(3)));
        assert_eq!(Page::from_link("/disposisi?status=pending"), Some(Page::Disposisi));
        assert_eq!(Page::from_link("/users"), Some(Page::Settings(SettingsTab::Users)));
        assert_eq!(Page::from_link("/"), Some(Page::Dashboard));
        assert_eq!(Page::from_link("/surat-masuk/abc"), None);
        assert_eq!(Page::from_link("https://contoh.go.id/x"), None);
    }

    #[test]
    fn test_paths_round_trip() {
        for page in [
            Page::Login,
            Page::SuratMasukNew,
            Page::SuratKeluarDetail(8),
            Page::Settings(SettingsTab::Audit),
            Page::Settings(SettingsTab::Profile),
        ] {
            assert_eq!(Page::from_link(&page.path()), Some(page));
        }
    }

    #[test]
    fn test_page_access_and_highlight() {
        assert_eq!(Page::Login.access(), Access::Guest);
        assert_eq!(Page::Settings(SettingsTab::Profile).access(), Access::Member);
        assert_eq!(Page::Settings(SettingsTab::Categories).access(), Access::Admin);
        assert_eq!(Page::SuratMasukEdit(1).nav_target(), Some(NavTarget::SuratMasuk));
        assert_eq!(NavTarget::Users.page().nav_target(), Some(NavTarget::Users));
    }
}
