//! Routed pages.

use std::collections::BTreeSet;

use dioxus::prelude::*;
use trace_core::comparison::{selection_options, shared_hop_ips};
use trace_core::driver;
use trace_core::format::{format_timestamp, TimestampStyle};
use trace_core::{
    ComparisonSelection, HistoryEntry, HistoryId, HistoryScope, LoadStatus, LoginRequest, SectionId,
    TraceBoard, TraceForm,
};

use crate::app::Route;
use crate::components::{ErrorMessage, LoadingSpinner, Severity};
use crate::credentials::CookieCredentials;
use crate::history_view::{display_or_missing, HistoryList, HistoryTraceVisualizer};
use crate::state::{use_app_state, SignalHandle};
use crate::trace_view::{CombinedSectionCard, DirectSectionCard, MacSectionCard};

// ============================================================================
// Login
// ============================================================================

#[component]
pub fn Login() -> Element {
    let state = use_app_state();
    let nav = navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let session = state.session.read().clone();

    use_effect(move || {
        if state.session.read().is_authenticated() {
            nav.replace(Route::RouteTrace {});
        }
    });

    let can_submit =
        !session.pending && !username.read().trim().is_empty() && !password.read().is_empty();

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = LoginRequest {
            username: username.read().trim().to_string(),
            password: password.read().clone(),
        };
        let api = state.api();
        spawn(async move {
            let handle = SignalHandle(state.session);
            if driver::sign_in(&api, &handle, &CookieCredentials, request)
                .await
                .is_ok()
            {
                nav.replace(Route::RouteTrace {});
            }
        });
    };

    rsx! {
        div {
            class: "login-page",
            form {
                class: "login-card",
                onsubmit: submit,
                h1 { class: "page-title", "Sign In" }
                if let Some(error) = session.error.clone() {
                    ErrorMessage { message: error }
                }
                div {
                    class: "field",
                    label { "Username" }
                    input {
                        r#type: "text",
                        autocomplete: "username",
                        value: "{username}",
                        disabled: session.pending,
                        oninput: move |e| username.set(e.value()),
                    }
                }
                div {
                    class: "field",
                    label { "Password" }
                    input {
                        r#type: "password",
                        autocomplete: "current-password",
                        value: "{password}",
                        disabled: session.pending,
                        oninput: move |e| password.set(e.value()),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: !can_submit,
                    if session.pending { "Signing in..." } else { "Sign In" }
                }
            }
        }
    }
}

// ============================================================================
// Trace boards
// ============================================================================

/// Section ids in display order, whether another can be added, and whether
/// any can be removed.
fn board_layout<F: TraceForm>(board: &TraceBoard<F>) -> (Vec<SectionId>, bool, bool) {
    let ids = board.sections().iter().map(|section| section.id).collect();
    (ids, board.can_add(), board.can_remove())
}

#[component]
fn BoardActions(can_add: bool, on_add: EventHandler<()>, on_reset: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "page-actions",
            button {
                class: "btn",
                disabled: !can_add,
                onclick: move |_| on_add.call(()),
                "+ Add Route for Comparison"
            }
            button {
                class: "btn",
                onclick: move |_| on_reset.call(()),
                "Reset"
            }
        }
    }
}

#[component]
pub fn RouteTrace() -> Element {
    let state = use_app_state();
    let mut board = state.combined;
    let (ids, can_add, removable) = board_layout(&*board.read());

    rsx! {
        h1 { class: "page-title", "Trace Network Route (Combined)" }
        div {
            class: "section-list",
            for (index, id) in ids.into_iter().enumerate() {
                CombinedSectionCard { key: "{id}", id, index, removable }
            }
        }
        BoardActions {
            can_add,
            on_add: move |_| {
                board.write().add_section();
            },
            on_reset: move |_| board.write().reset(),
        }
    }
}

#[component]
pub fn MacTrace() -> Element {
    let state = use_app_state();
    let mut board = state.mac;
    let (ids, can_add, removable) = board_layout(&*board.read());

    rsx! {
        h1 { class: "page-title", "MAC Address Trace" }
        div {
            class: "section-list",
            for (index, id) in ids.into_iter().enumerate() {
                MacSectionCard { key: "{id}", id, index, removable }
            }
        }
        BoardActions {
            can_add,
            on_add: move |_| {
                board.write().add_section();
            },
            on_reset: move |_| board.write().reset(),
        }
    }
}

#[component]
pub fn DirectTrace() -> Element {
    let state = use_app_state();
    let mut board = state.direct;
    let (ids, can_add, removable) = board_layout(&*board.read());

    rsx! {
        h1 { class: "page-title", "Direct Route Trace (Gateways)" }
        div {
            class: "section-list",
            for (index, id) in ids.into_iter().enumerate() {
                DirectSectionCard { key: "{id}", id, index, removable }
            }
        }
        BoardActions {
            can_add,
            on_add: move |_| {
                board.write().add_section();
            },
            on_reset: move |_| board.write().reset(),
        }
    }
}

// ============================================================================
// History
// ============================================================================

pub fn history_title(username: Option<&str>) -> String {
    match username {
        Some(name) => format!("{name}'s Traces"),
        None => "My Recorded Traces".to_string(),
    }
}

/// Fetches `scope` on mount (a no-op once loaded) and renders its cache.
#[component]
fn HistoryPanel(scope: HistoryScope, title: String) -> Element {
    let state = use_app_state();
    use_hook(move || state.load_history(scope));

    let (entries, status, error) = {
        let history = state.history.read();
        let cache = history.cache(scope);
        let error = match cache.status {
            LoadStatus::Failed => history.error.clone(),
            _ => None,
        };
        (cache.entries.clone(), cache.status, error)
    };

    rsx! {
        HistoryList {
            title,
            entries,
            loading: status.is_loading(),
            error,
            on_refresh: move |_| state.refresh_history(scope),
        }
    }
}

#[component]
pub fn History() -> Element {
    let state = use_app_state();
    let username = state
        .session
        .read()
        .user()
        .map(|user| user.username.clone());

    rsx! {
        h1 { class: "page-title", "My Trace History" }
        HistoryPanel {
            scope: HistoryScope::User,
            title: history_title(username.as_deref()),
        }
    }
}

#[component]
pub fn AllRoutes() -> Element {
    rsx! {
        h1 { class: "page-title", "All Recorded Traces" }
        HistoryPanel {
            scope: HistoryScope::All,
            title: "All Users' Traces".to_string(),
        }
    }
}

// ============================================================================
// Comparison
// ============================================================================

/// One line in the selection list.
pub fn option_label(entry: &HistoryEntry) -> String {
    format!(
        "{} {} {}",
        display_or_missing(&entry.source),
        entry.trace_type.separator(),
        display_or_missing(&entry.destination)
    )
}

pub fn option_caption(entry: &HistoryEntry) -> String {
    let when = format_timestamp(&entry.timestamp, TimestampStyle::Short);
    match entry.username() {
        Some(user) => format!("{} · {} · {}", entry.trace_type.title(), when, user),
        None => format!("{} · {}", entry.trace_type.title(), when),
    }
}

#[component]
pub fn Comparison() -> Element {
    let state = use_app_state();
    let mut selection = use_signal(ComparisonSelection::new);
    use_hook(move || state.load_history(HistoryScope::All));

    let (options, selected, status, error) = {
        let history = state.history.read();
        let cache = history.cache(HistoryScope::All);
        let options: Vec<HistoryEntry> = selection_options(&cache.entries)
            .into_iter()
            .cloned()
            .collect();
        let selected: Vec<HistoryEntry> = selection
            .read()
            .resolve(&cache.entries)
            .into_iter()
            .cloned()
            .collect();
        (options, selected, cache.status, history.error.clone())
    };
    let shared = {
        let refs: Vec<&HistoryEntry> = selected.iter().collect();
        shared_hop_ips(&refs)
    };

    rsx! {
        h1 { class: "page-title", "Compare Historical Traces" }

        if status.is_loading() {
            LoadingSpinner {}
        }
        if status == LoadStatus::Failed {
            ErrorMessage {
                message: error.unwrap_or_else(|| "Unknown error".to_string()),
                title: "Could not load route history".to_string(),
            }
        }

        if status == LoadStatus::Succeeded {
            div {
                class: "history-list-header",
                strong { "Select Routes to Compare ({selected.len()} selected)" }
                div {
                    button {
                        class: "btn",
                        onclick: move |_| state.refresh_history(HistoryScope::All),
                        "Refresh"
                    }
                    button {
                        class: "btn",
                        disabled: selected.is_empty(),
                        onclick: move |_| selection.write().clear(),
                        "Clear"
                    }
                }
            }
            div {
                class: "comparison-options",
                if options.is_empty() {
                    div { class: "empty-state", "No recorded traces yet." }
                }
                for entry in options.iter() {
                    ComparisonOption {
                        key: "{entry.id}",
                        checked: selection.read().contains(&entry.id),
                        entry: entry.clone(),
                        on_toggle: move |id: HistoryId| {
                            selection.write().toggle(id);
                        },
                    }
                }
            }

            if selected.is_empty() {
                ErrorMessage {
                    message: "Select two or more routes from the history list above to compare them side-by-side.".to_string(),
                    severity: Severity::Info,
                }
            } else {
                div {
                    class: "section-list",
                    style: "margin-top: 1rem;",
                    for entry in selected.iter() {
                        ComparisonItem { key: "{entry.id}", entry: entry.clone(), shared: shared.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn ComparisonOption(
    entry: HistoryEntry,
    checked: bool,
    on_toggle: EventHandler<HistoryId>,
) -> Element {
    let label = option_label(&entry);
    let caption = option_caption(&entry);
    let id = entry.id.clone();

    rsx! {
        label {
            class: "comparison-option",
            input {
                r#type: "checkbox",
                checked,
                onchange: move |_| on_toggle.call(id.clone()),
            }
            div {
                div { "{label}" }
                div { class: "hop-secondary", "{caption}" }
            }
        }
    }
}

#[component]
fn ComparisonItem(entry: HistoryEntry, shared: BTreeSet<String>) -> Element {
    let label = option_label(&entry);
    let caption = option_caption(&entry);

    rsx! {
        div {
            class: "trace-section",
            div {
                class: "trace-section-header",
                span { "{label}" }
                span { class: "hop-secondary", "{caption}" }
            }
            HistoryTraceVisualizer { entry, shared }
        }
    }
}

// ============================================================================
// Fallback
// ============================================================================

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    rsx! {
        div {
            class: "login-page",
            div {
                class: "login-card",
                style: "text-align: center;",
                h1 { class: "page-title", "404 - Page Not Found" }
                p {
                    class: "hop-secondary",
                    "The page {path} doesn't exist or may have been moved."
                }
                Link { class: "btn btn-primary", to: Route::RouteTrace {}, "Go to Homepage" }
            }
        }
    }
}
