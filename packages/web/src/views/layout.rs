use dioxus::prelude::*;
use ui::views::AppLayoutView;
use ui::{guard, use_auth, Access};

use super::use_page_navigator;
use crate::Route;

/// Guarded shell around every signed-in route.
///
/// The guard re-runs whenever the session signal changes, so an expired
/// token (401 on any request) lands the user on the login page.
#[component]
pub fn AppLayout() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let route = use_route::<Route>();
    let on_navigate = use_page_navigator();

    let page = route.page();
    let access = page.map_or(Access::Member, |p| p.access());
    if let Some(redirect) = guard(access, &auth()) {
        tracing::debug!("Redirecting {} to {:?}", route, redirect);
        nav.replace(Route::from(redirect.page()));
        return rsx! {};
    }

    rsx! {
        AppLayoutView {
            active: page.and_then(|p| p.nav_target()),
            on_navigate,
            on_logout: move |_| {
                nav.replace(Route::Login {});
            },
            Outlet::<Route> {}
        }
    }
}

/// Redirect `/` to `/dashboard`
#[component]
pub fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Dashboard {});
    rsx! {}
}

/// Unknown paths go to the dashboard.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::debug!("Unknown path /{}", segments.join("/"));
    nav.replace(Route::Dashboard {});
    rsx! {}
}
