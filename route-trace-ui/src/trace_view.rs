//! Section cards for the three trace boards.

use dioxus::prelude::*;
use trace_core::validate::is_valid_ipv4;
use trace_core::{
    CombinedField, CombinedForm, DirectField, DirectForm, EndpointRole, MacField, MacForm,
    SectionError, SectionId, TraceForm, TraceStatus,
};

use crate::components::{ErrorMessage, GatewayInput, HopChain, IpInput, SectionErrorBanner, Severity};
use crate::state::{edit_field, spawn_gateway_fetch, spawn_trace, use_app_state};

pub fn direct_field(field: CombinedField) -> DirectField {
    match field {
        CombinedField::SourceIp => DirectField::SourceIp,
        CombinedField::DestinationIp => DirectField::DestinationIp,
        CombinedField::SourceGateway => DirectField::SourceGateway,
        CombinedField::DestinationGateway => DirectField::DestinationGateway,
    }
}

fn trace_button_label(status: TraceStatus) -> &'static str {
    if status.is_loading() {
        "Tracing..."
    } else {
        "Run Trace"
    }
}

/// Header, error banner and trace button shared by every section card.
#[component]
fn SectionFrame(
    title: String,
    removable: bool,
    busy: bool,
    status: TraceStatus,
    #[props(!optional)] error: Option<SectionError>,
    on_remove: EventHandler<()>,
    on_trace: EventHandler<()>,
    children: Element,
    results: Element,
) -> Element {
    rsx! {
        div {
            class: "trace-section",
            div {
                class: "trace-section-header",
                span { "{title}" }
                if removable {
                    button {
                        class: "btn btn-icon",
                        title: "Remove this trace section",
                        disabled: busy,
                        onclick: move |_| on_remove.call(()),
                        "✕"
                    }
                }
            }
            {children}
            if let Some(error) = error {
                SectionErrorBanner { error }
            }
            div {
                class: "section-actions",
                button {
                    class: "btn btn-primary",
                    disabled: busy,
                    onclick: move |_| on_trace.call(()),
                    "{trace_button_label(status)}"
                }
            }
            {results}
        }
    }
}

/// Source and destination IP/gateway inputs. A valid IP fetches its
/// gateway on blur.
#[component]
fn EndpointInputs(
    form: CombinedForm,
    busy: bool,
    on_edit: EventHandler<(CombinedField, String)>,
    on_fetch: EventHandler<EndpointRole>,
) -> Element {
    let fetch_if_valid = move |role: EndpointRole| {
        move |ip: String| {
            if is_valid_ipv4(ip.trim()) {
                on_fetch.call(role);
            }
        }
    };

    rsx! {
        div {
            class: "endpoint-grid",
            div {
                div { class: "endpoint-heading", "Source" }
                IpInput {
                    label: "Source IP Address *".to_string(),
                    value: form.source_ip.clone(),
                    disabled: busy,
                    on_input: move |v: String| on_edit.call((CombinedField::SourceIp, v)),
                    on_blur: fetch_if_valid(EndpointRole::Source),
                }
                GatewayInput {
                    label: "Source Default Gateway *".to_string(),
                    field: form.source_gateway.clone(),
                    disabled: busy,
                    on_input: move |v: String| on_edit.call((CombinedField::SourceGateway, v)),
                    on_refetch: move |_| on_fetch.call(EndpointRole::Source),
                }
            }
            div {
                div { class: "endpoint-heading destination", "Destination" }
                IpInput {
                    label: "Destination IP Address *".to_string(),
                    value: form.destination_ip.clone(),
                    disabled: busy,
                    on_input: move |v: String| on_edit.call((CombinedField::DestinationIp, v)),
                    on_blur: fetch_if_valid(EndpointRole::Destination),
                }
                GatewayInput {
                    label: "Destination Default Gateway *".to_string(),
                    field: form.destination_gateway.clone(),
                    disabled: busy,
                    on_input: move |v: String| on_edit.call((CombinedField::DestinationGateway, v)),
                    on_refetch: move |_| on_fetch.call(EndpointRole::Destination),
                }
            }
        }
    }
}

fn card_title<F: TraceForm>(index: usize) -> String {
    format!("Trace #{} ({})", index + 1, F::KIND.title())
}

/// One MAC leg of a combined result. `None` means that call failed.
fn mac_leg(title: &str, hops: Option<Vec<trace_core::Hop>>) -> Element {
    match hops {
        Some(hops) => rsx! {
            HopChain { hops, title: title.to_string() }
        },
        None => rsx! {
            ErrorMessage {
                message: format!("{title} unavailable."),
                severity: Severity::Info,
            }
        },
    }
}

#[component]
pub fn CombinedSectionCard(id: SectionId, index: usize, removable: bool) -> Element {
    let state = use_app_state();
    let mut board = state.combined;
    let api = state.api();
    let Some(section) = board.read().get(id).cloned() else {
        return rsx! {};
    };
    let busy = section.is_busy();
    let title = card_title::<CombinedForm>(index);

    rsx! {
        SectionFrame {
            title,
            removable,
            busy,
            status: section.trace_status,
            error: section.error.clone(),
            on_remove: move |_| {
                board.write().remove_section(id);
            },
            on_trace: move |_| spawn_trace(api, board, id),
            results: rsx! {
                if let Some(trace) = section.result.clone() {
                    HopChain { hops: trace.main_route, title: "Main Route".to_string() }
                    {mac_leg("Source MAC Trace", trace.source_mac)}
                    {mac_leg("Destination MAC Trace", trace.destination_mac)}
                }
            },
            EndpointInputs {
                form: section.form.clone(),
                busy,
                on_edit: move |(field, value): (CombinedField, String)| edit_field(board, id, field, value),
                on_fetch: move |role: EndpointRole| spawn_gateway_fetch(api, board, id, role),
            }
        }
    }
}

#[component]
pub fn DirectSectionCard(id: SectionId, index: usize, removable: bool) -> Element {
    let state = use_app_state();
    let mut board = state.direct;
    let api = state.api();
    let Some(section) = board.read().get(id).cloned() else {
        return rsx! {};
    };
    let busy = section.is_busy();
    let title = card_title::<DirectForm>(index);
    let vrf = section.form.vrf.clone();

    rsx! {
        SectionFrame {
            title,
            removable,
            busy,
            status: section.trace_status,
            error: section.error.clone(),
            on_remove: move |_| {
                board.write().remove_section(id);
            },
            on_trace: move |_| spawn_trace(api, board, id),
            results: rsx! {
                if let Some(hops) = section.result.clone() {
                    HopChain { hops, title: "Direct Route".to_string() }
                }
            },
            EndpointInputs {
                form: section.form.endpoints.clone(),
                busy,
                on_edit: move |(field, value): (CombinedField, String)| {
                    edit_field(board, id, direct_field(field), value)
                },
                on_fetch: move |role: EndpointRole| spawn_gateway_fetch(api, board, id, role),
            }
            div {
                class: "field",
                label { "VRF (optional)" }
                input {
                    r#type: "text",
                    value: "{vrf}",
                    disabled: busy,
                    oninput: move |e| edit_field(board, id, DirectField::Vrf, e.value()),
                }
            }
        }
    }
}

#[component]
pub fn MacSectionCard(id: SectionId, index: usize, removable: bool) -> Element {
    let state = use_app_state();
    let mut board = state.mac;
    let api = state.api();
    let Some(section) = board.read().get(id).cloned() else {
        return rsx! {};
    };
    let busy = section.is_busy();
    let title = card_title::<MacForm>(index);

    rsx! {
        SectionFrame {
            title,
            removable,
            busy,
            status: section.trace_status,
            error: section.error.clone(),
            on_remove: move |_| {
                board.write().remove_section(id);
            },
            on_trace: move |_| spawn_trace(api, board, id),
            results: rsx! {
                if let Some(hops) = section.result.clone() {
                    HopChain { hops, title: "MAC Path".to_string() }
                }
            },
            div {
                class: "endpoint-grid",
                div {
                    IpInput {
                        label: "Endpoint IP Address *".to_string(),
                        value: section.form.ip.clone(),
                        disabled: busy,
                        on_input: move |v: String| edit_field(board, id, MacField::Ip, v),
                        on_blur: move |ip: String| {
                            if is_valid_ipv4(ip.trim()) {
                                spawn_gateway_fetch(api, board, id, EndpointRole::Endpoint);
                            }
                        },
                    }
                }
                div {
                    GatewayInput {
                        label: "Default Gateway *".to_string(),
                        field: section.form.gateway.clone(),
                        disabled: busy,
                        on_input: move |v: String| edit_field(board, id, MacField::Gateway, v),
                        on_refetch: move |_| spawn_gateway_fetch(api, board, id, EndpointRole::Endpoint),
                    }
                }
            }
        }
    }
}
