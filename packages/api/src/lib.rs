//! # API crate: typed REST client for the Arsip Surat backend
//!
//! Everything the console sends over the network goes through this crate.
//! Pages never build URLs or JSON by hand: they fill a form from [`forms`],
//! validate it into a payload from [`models`], and hand that to a service
//! handle on [`ApiClient`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`], bearer token injection, status mapping, 401 session expiry |
//! | [`error`] | [`ApiError`] and the user-facing message fallback |
//! | [`models`] | Wire types for letters, dispositions, users, categories, notifications, audit, settings, dashboard and reports |
//! | [`services`] | One borrowed handle per resource: `client.surat_masuk().list(..)` |
//! | [`forms`] | Input validation with Indonesian messages, producing request payloads |
//! | [`intake`] | The detect → review → confirm state machine for new letters |
//!
//! ## Session handling
//!
//! The client does not own the session. It is built with an
//! `Rc<dyn SessionContext>`: the UI passes a context backed by its auth
//! signal, tests pass a [`StaticSession`]. A 401 from any endpoint calls
//! [`SessionContext::expire`] before the error is returned, so the caller
//! only has to redirect.

pub mod client;
pub mod error;
pub mod forms;
pub mod intake;
pub mod models;
pub mod services;

pub use client::{ApiClient, Page, SessionContext, StaticSession};
pub use error::{ApiError, Result};
pub use forms::FormErrors;
pub use intake::{DetectionMethod, Intake, IntakeError, IntakeStep, NextAction, Prefill, Submission};

pub use store::{AuthSession, ConsoleConfig};
