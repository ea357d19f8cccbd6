//! This crate contains all shared UI for the records console.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`auth`] | session context, [`AuthProvider`], API client hooks |
//! | [`nav`] | sidebar items, settings tabs, [`Page`] targets and route guards |
//! | [`toast`] | transient success/error/info messages |
//! | [`notification_bell`] | header bell with polling |
//! | [`components`] | buttons, cards, inputs, dialogs, badges, tables |
//! | [`views`] | one component per page, router-agnostic |
//!
//! Views never touch the router. They report where the user wants to go as a
//! [`Page`] and the platform package maps it to a route.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod auth;
pub use auth::{use_api, use_auth, use_auth_handle, use_config, AuthHandle, AuthProvider, AuthState, LogoutButton};

pub mod nav;
pub use nav::{guard, Access, NavTarget, Page, Redirect, SettingsTab};

pub mod toast;
pub use toast::{use_toast, ToastProvider, Toaster};

pub mod format;
pub mod platform;
pub mod table;

pub mod notification_bell;
pub use notification_bell::NotificationBell;

pub mod views;
