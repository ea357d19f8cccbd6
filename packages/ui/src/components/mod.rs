//! Presentational building blocks shared by every view.
//!
//! Styling lives in `assets/styling/components.css`; the stylesheet is linked
//! once by the app shell.

mod badge;
mod button;
mod card;
mod data_table;
mod dialog;
mod feedback;
mod input;

pub use badge::{
    disposisi_tone, priority_tone, surat_status_tone, Badge, BadgeTone, DisposisiStatusBadge, KategoriChip,
    PriorityBadge, StatusBadge,
};
pub use button::{Button, ButtonSize, ButtonVariant};
pub use card::{Card, CardContent, CardHeader, DetailRow, PageHeader};
pub use data_table::{Pagination, SortHeader};
pub use dialog::{ConfirmDialog, Dialog, ModalOverlay};
pub use feedback::{EmptyState, ErrorState, Spinner};
pub use input::{Checkbox, Field, FieldError, Input, Label, Select, SelectOption, Textarea};

use dioxus::prelude::*;

pub const COMPONENTS_CSS: Asset = asset!("/assets/styling/components.css");
