//! Login page. Signed-in visitors are sent to the dashboard.

use dioxus::prelude::*;
use ui::views::LoginView;
use ui::{guard, use_auth, Access};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    if let Some(redirect) = guard(Access::Guest, &auth()) {
        nav.replace(Route::from(redirect.page()));
        return rsx! {};
    }

    rsx! {
        LoginView {
            on_success: move |_| {
                nav.replace(Route::Dashboard {});
            },
        }
    }
}
