use dioxus::prelude::*;

use crate::pages::{
    AllRoutes, Comparison, DirectTrace, History, Login, MacTrace, NotFound, RouteTrace,
};
use crate::state::{use_app_state, use_app_state_provider};
use crate::styles::{APP_STYLES, THEME_TOKENS};
use crate::theme;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login")]
    Login {},
    #[layout(Shell)]
        #[route("/")]
        RouteTrace {},
        #[route("/mac-trace")]
        MacTrace {},
        #[route("/direct-route-trace")]
        DirectTrace {},
        #[route("/history")]
        History {},
        #[route("/all-routes")]
        AllRoutes {},
        #[route("/comparison")]
        Comparison {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// Sidebar entries in display order.
pub fn nav_items() -> [(&'static str, Route); 6] {
    [
        ("Trace Route", Route::RouteTrace {}),
        ("MAC Trace", Route::MacTrace {}),
        ("Direct Route", Route::DirectTrace {}),
        ("My History", Route::History {}),
        ("All Routes", Route::AllRoutes {}),
        ("Compare", Route::Comparison {}),
    ]
}

#[component]
pub fn App() -> Element {
    let state = use_app_state_provider();

    use_effect(move || {
        theme::apply_theme_to_document(&state.theme.read());
    });

    rsx! {
        style { {THEME_TOKENS} }
        style { {APP_STYLES} }
        Router::<Route> {}
    }
}

/// Layout for every protected page. Signed-out visitors are sent to the
/// login page.
#[component]
fn Shell() -> Element {
    let state = use_app_state();
    let authenticated = state.session.read().is_authenticated();

    use_effect(move || {
        if !state.session.read().is_authenticated() {
            navigator().replace(Route::Login {});
        }
    });

    if !authenticated {
        return rsx! {};
    }

    rsx! {
        div {
            class: "app-shell",
            Sidebar {}
            main {
                class: "main-content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let state = use_app_state();
    let current = use_route::<Route>();
    let current_theme = state.theme.read().clone();
    let username = state
        .session
        .read()
        .user()
        .map(|user| user.username.clone());

    rsx! {
        nav {
            class: "sidebar",
            div { class: "sidebar-title", "RouteTrace" }

            div {
                class: "sidebar-nav",
                for (label, route) in nav_items() {
                    Link {
                        key: "{label}",
                        class: if route == current { "sidebar-link active" } else { "sidebar-link" },
                        to: route.clone(),
                        "{label}"
                    }
                }
            }

            div {
                class: "sidebar-footer",
                if let Some(name) = username {
                    span { class: "hop-secondary", "{name}" }
                }
                button {
                    class: "btn btn-icon",
                    title: if current_theme == "dark" { "Switch to light mode" } else { "Switch to dark mode" },
                    onclick: move |_| state.toggle_theme(),
                    if current_theme == "dark" { "☀️" } else { "🌙" }
                }
                button {
                    class: "btn",
                    onclick: move |_| {
                        state.sign_out();
                        navigator().replace(Route::Login {});
                    },
                    "Logout"
                }
            }
        }
    }
}
