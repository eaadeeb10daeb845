//! Building blocks shared by the trace, history and comparison pages.

use std::collections::BTreeSet;

use dioxus::prelude::*;
use trace_core::validate::ip_hint;
use trace_core::{GatewayField, GatewayStatus, Hop, SectionError, SectionErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    fn class(self) -> &'static str {
        match self {
            Severity::Error => "message error",
            Severity::Warning => "message warning",
            Severity::Info => "message info",
        }
    }
}

#[component]
pub fn ErrorMessage(
    message: String,
    title: Option<String>,
    #[props(default = Severity::Error)] severity: Severity,
) -> Element {
    rsx! {
        div {
            class: severity.class(),
            role: "alert",
            if let Some(title) = title {
                div { class: "message-title", "{title}" }
            }
            "{message}"
        }
    }
}

#[component]
pub fn LoadingSpinner(message: Option<String>) -> Element {
    rsx! {
        div {
            class: "spinner",
            div { class: "spinner-ring" }
            if let Some(message) = message {
                span { "{message}" }
            }
        }
    }
}

/// Title and severity for a section error banner.
pub fn section_error_banner(error: &SectionError) -> (&'static str, Severity) {
    match error.kind {
        SectionErrorKind::MissingInput => ("Missing Input", Severity::Warning),
        SectionErrorKind::GatewayFetch(_) => ("Gateway Fetch Error", Severity::Error),
        SectionErrorKind::Trace => ("Trace Error", Severity::Error),
        SectionErrorKind::PartialTrace => ("Partial Trace Success", Severity::Warning),
    }
}

#[component]
pub fn SectionErrorBanner(error: SectionError) -> Element {
    let (title, severity) = section_error_banner(&error);
    rsx! {
        ErrorMessage {
            message: error.message.clone(),
            title: title.to_string(),
            severity,
        }
    }
}

/// Badge symbol, css modifier and tooltip for a gateway field.
pub fn gateway_badge(status: GatewayStatus) -> Option<(&'static str, &'static str, &'static str)> {
    match status {
        GatewayStatus::Idle => None,
        GatewayStatus::Loading => Some(("⏳", "loading", "Fetching gateway...")),
        GatewayStatus::Succeeded => Some(("✓", "succeeded", "Gateway automatically fetched")),
        GatewayStatus::Failed => Some(("⚠", "failed", "Failed to fetch gateway")),
        GatewayStatus::Manual => Some(("✎", "manual", "Gateway manually entered")),
    }
}

/// IPv4 input that validates once touched and reports blur to the parent.
#[component]
pub fn IpInput(
    label: String,
    value: String,
    #[props(default)] disabled: bool,
    on_input: EventHandler<String>,
    on_blur: EventHandler<String>,
) -> Element {
    let mut touched = use_signal(|| false);
    let hint = if touched() { ip_hint(&value) } else { None };
    let blur_value = value.clone();

    rsx! {
        div {
            class: "field",
            label { "{label}" }
            div {
                class: "field-input",
                input {
                    class: if hint.is_some() { "invalid" } else { "" },
                    r#type: "text",
                    placeholder: "e.g. 10.0.0.1",
                    value: "{value}",
                    disabled,
                    oninput: move |e| on_input.call(e.value()),
                    onblur: move |_| {
                        touched.set(true);
                        on_blur.call(blur_value.clone());
                    },
                }
            }
            if let Some(hint) = hint {
                span { class: "field-hint", "{hint}" }
            }
        }
    }
}

/// Gateway input with its fetch status and a retry button.
#[component]
pub fn GatewayInput(
    label: String,
    field: GatewayField,
    #[props(default)] disabled: bool,
    on_input: EventHandler<String>,
    on_refetch: EventHandler<()>,
) -> Element {
    let loading = field.is_loading();
    let badge = gateway_badge(field.status);

    rsx! {
        div {
            class: "field",
            label { "{label}" }
            div {
                class: "field-input",
                input {
                    r#type: "text",
                    placeholder: if loading { "Fetching..." } else { "Default gateway" },
                    value: "{field.value}",
                    disabled: disabled || loading,
                    oninput: move |e| on_input.call(e.value()),
                }
                if let Some((symbol, modifier, tooltip)) = badge {
                    span {
                        class: "gateway-badge {modifier}",
                        title: tooltip,
                        "{symbol}"
                    }
                }
                button {
                    class: "btn btn-icon",
                    title: "Fetch gateway",
                    disabled: disabled || loading,
                    onclick: move |_| on_refetch.call(()),
                    "⟳"
                }
            }
        }
    }
}

/// Ordered hop list. Hops whose IP is in `shared` are highlighted.
#[component]
pub fn HopChain(
    hops: Vec<Hop>,
    title: Option<String>,
    #[props(default)] shared: BTreeSet<String>,
) -> Element {
    rsx! {
        if let Some(title) = title {
            div { class: "hop-chain-title", "{title} ({hops.len()})" }
        }
        if hops.is_empty() {
            div { class: "empty-state", "No hops returned." }
        } else {
            div {
                class: "hop-chain",
                for (index, hop) in hops.iter().enumerate() {
                    HopRow {
                        key: "{index}",
                        position: index + 1,
                        hop: hop.clone(),
                        shared: shared.contains(&hop.ip),
                    }
                }
            }
        }
    }
}

#[component]
fn HopRow(position: usize, hop: Hop, shared: bool) -> Element {
    let mut expanded = use_signal(|| false);
    let number = if hop.hop > 0 { hop.hop as usize } else { position };
    let icon = hop.hop_kind().icon();
    let name = hop.display_name().to_string();
    let secondary = hop.secondary_label().map(str::to_string);
    let rows = hop.detail_rows();

    rsx! {
        div {
            class: if shared { "hop shared" } else { "hop" },
            onclick: move |_| expanded.toggle(),
            span { class: "hop-index", "{number}" }
            span { "{icon}" }
            div {
                div { class: "hop-name", "{name}" }
                if let Some(secondary) = secondary {
                    div { class: "hop-secondary", "{secondary}" }
                }
                if expanded() {
                    div {
                        class: "hop-details",
                        for (key, value) in rows.iter() {
                            span { key: "{key}", "{key}" }
                            span { "{value}" }
                        }
                    }
                }
            }
        }
    }
}
