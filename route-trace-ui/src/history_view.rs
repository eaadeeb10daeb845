//! Saved trace rendering for the history pages and the comparison view.

use std::collections::BTreeSet;

use dioxus::prelude::*;
use trace_core::format::{format_timestamp, TimestampStyle};
use trace_core::{HistoryEntry, Hop, StoredJson, TraceType};

use crate::components::{ErrorMessage, HopChain, LoadingSpinner, Severity};

/// Stored hop list: parsed chain, raw text when parsing failed, nothing
/// when absent.
fn stored_hops(title: &str, stored: &StoredJson<Vec<Hop>>, shared: &BTreeSet<String>) -> Element {
    match stored {
        StoredJson::Parsed(hops) => rsx! {
            HopChain {
                hops: hops.clone(),
                title: title.to_string(),
                shared: shared.clone(),
            }
        },
        StoredJson::Malformed { raw } => rsx! {
            div { class: "hop-chain-title", "{title}: Raw Data (Parsing Failed)" }
            pre { class: "raw-text", "{raw}" }
        },
        StoredJson::Absent => rsx! {},
    }
}

/// Source/destination summary with the labels of the entry's trace type.
#[component]
fn EndpointSummary(source: String, destination: String, trace_type: TraceType) -> Element {
    let source = display_or_missing(&source);
    let destination = display_or_missing(&destination);
    rsx! {
        span {
            span { class: "chip", "{trace_type.source_label()}" }
            strong { "{source}" }
            span { " {trace_type.separator()} " }
            span { class: "chip destination", "{trace_type.destination_label()}" }
            strong { "{destination}" }
        }
    }
}

pub fn display_or_missing(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        "N/A".to_string()
    } else {
        text.to_string()
    }
}

/// Every hop list an entry carries, main route first.
#[component]
pub fn HistoryTraceVisualizer(
    entry: HistoryEntry,
    #[props(default)] shared: BTreeSet<String>,
) -> Element {
    let main_title = match entry.trace_type {
        TraceType::Combined => "Main Route",
        TraceType::Direct => "Direct Route",
        TraceType::Mac => "MAC Path",
    };
    let nothing_stored = entry.main_route().is_absent()
        && entry.source_mac_trace.is_absent()
        && entry.destination_mac_trace.is_absent();

    rsx! {
        if nothing_stored {
            div { class: "empty-state", "No route data available for this trace." }
        }
        {stored_hops(main_title, entry.main_route(), &shared)}
        {stored_hops("Source MAC Trace", &entry.source_mac_trace, &shared)}
        {stored_hops("Destination MAC Trace", &entry.destination_mac_trace, &shared)}
    }
}

#[component]
pub fn HistoryItem(entry: HistoryEntry) -> Element {
    let mut expanded = use_signal(|| false);
    let timestamp = format_timestamp(&entry.timestamp, TimestampStyle::Long);
    let relative = format_timestamp(&entry.timestamp, TimestampStyle::Relative);
    let inputs: Vec<(String, String)> = entry
        .input_details
        .rows()
        .into_iter()
        .map(|(label, value)| (label.to_string(), value.to_string()))
        .collect();
    let device_rows = entry.device_rows();
    let device_info_raw = entry.device_info.raw().map(str::to_string);

    rsx! {
        div {
            class: "history-item",
            div {
                class: "history-item-summary",
                onclick: move |_| expanded.toggle(),
                div {
                    span { class: "chip", "{entry.trace_type.title()}" }
                    EndpointSummary {
                        source: entry.source.clone(),
                        destination: entry.destination.clone(),
                        trace_type: entry.trace_type,
                    }
                }
                div {
                    class: "history-meta",
                    if let Some(username) = entry.username() {
                        span { "User: {username}" }
                    }
                    span { title: "{relative}", "{timestamp}" }
                    span { "(ID: {entry.id})" }
                }
                span { if expanded() { "▲" } else { "▼" } }
            }

            if expanded() {
                div {
                    class: "history-item-body",
                    if !inputs.is_empty() {
                        div { class: "hop-chain-title", "Inputs" }
                        div {
                            class: "kv-table",
                            for (label, value) in inputs.iter() {
                                span { key: "{label}", "{label}" }
                                span { "{value}" }
                            }
                        }
                    }
                    if !device_rows.is_empty() {
                        div { class: "hop-chain-title", "Additional Device Info" }
                        div {
                            class: "kv-table",
                            for (key, value) in device_rows.iter() {
                                span { key: "{key}", "{key}" }
                                span { "{value}" }
                            }
                        }
                    }
                    if let Some(raw) = device_info_raw {
                        div { class: "hop-chain-title", "Device Info: Raw Data (Parsing Failed)" }
                        pre { class: "raw-text", "{raw}" }
                    }
                    HistoryTraceVisualizer { entry: entry.clone() }
                }
            }
        }
    }
}

/// History list with loading, failure and empty states.
#[component]
pub fn HistoryList(
    title: String,
    entries: Vec<HistoryEntry>,
    loading: bool,
    #[props(!optional)] error: Option<String>,
    on_refresh: EventHandler<()>,
) -> Element {
    rsx! {
        if let Some(error) = error {
            ErrorMessage {
                message: error,
                title: "Could Not Load History".to_string(),
                severity: Severity::Error,
            }
        }
        div {
            class: "history-list",
            div {
                class: "history-list-header",
                strong { "{title} ({entries.len()})" }
                button {
                    class: "btn",
                    disabled: loading,
                    onclick: move |_| on_refresh.call(()),
                    "Refresh"
                }
            }
            if loading {
                LoadingSpinner { message: "Loading trace history...".to_string() }
            } else if entries.is_empty() {
                div { class: "empty-state", "No trace history found." }
            } else {
                for entry in entries.iter() {
                    HistoryItem { key: "{entry.id}", entry: entry.clone() }
                }
            }
        }
    }
}
