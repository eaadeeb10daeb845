//! Backend calls behind each trace flavour and how their results combine.

use futures_util::future::join3;
use tracing::{debug, warn};

use crate::api::TraceApi;
use crate::combined::{CombinedTrace, EndpointPair};
use crate::direct::DirectRequest;
use crate::error::ApiError;
use crate::hop::Hop;
use crate::mac::MacRequest;
use crate::section::TraceOutcome;

const MAIN_ROUTE_LABEL: &str = "Main route";
const SOURCE_MAC_LABEL: &str = "Source MAC trace";
const DESTINATION_MAC_LABEL: &str = "Destination MAC trace";

/// Route trace plus both MAC traces, all in flight at once.
///
/// Waits for every call to settle before deciding the status; one failing
/// never cancels or delays the others.
pub async fn run_combined_trace(
    api: &dyn TraceApi,
    request: &EndpointPair,
) -> TraceOutcome<CombinedTrace> {
    let query = request.route_query(None);
    debug!(
        source = %request.source_ip,
        destination = %request.destination_ip,
        "Starting combined trace"
    );

    let (main_route, source_mac, destination_mac) = join3(
        api.route_trace(&query),
        api.mac_trace(&request.source_ip, &request.source_gateway),
        api.mac_trace(&request.destination_ip, &request.destination_gateway),
    )
    .await;

    aggregate_combined(main_route, source_mac, destination_mac)
}

/// Main route failure dominates; MAC failures alone only degrade the result.
pub fn aggregate_combined(
    main_route: Result<Vec<Hop>, ApiError>,
    source_mac: Result<Vec<Hop>, ApiError>,
    destination_mac: Result<Vec<Hop>, ApiError>,
) -> TraceOutcome<CombinedTrace> {
    let mut failures = Vec::new();
    let mut record = |label: &str, error: &ApiError| {
        warn!(leg = label, %error, "Combined trace leg failed");
        failures.push(format!("{label}: {error}"));
    };

    if let Err(error) = &main_route {
        record(MAIN_ROUTE_LABEL, error);
    }
    if let Err(error) = &source_mac {
        record(SOURCE_MAC_LABEL, error);
    }
    if let Err(error) = &destination_mac {
        record(DESTINATION_MAC_LABEL, error);
    }

    let main_route = match main_route {
        Ok(hops) => hops,
        Err(_) => return TraceOutcome::failed(failures.join("; ")),
    };

    let trace = CombinedTrace {
        main_route,
        source_mac: source_mac.ok(),
        destination_mac: destination_mac.ok(),
    };

    if failures.is_empty() {
        TraceOutcome::succeeded(trace)
    } else {
        TraceOutcome::partial(trace, failures.join("; "))
    }
}

pub async fn run_direct_trace(api: &dyn TraceApi, request: &DirectRequest) -> TraceOutcome<Vec<Hop>> {
    let query = request.endpoints.route_query(request.vrf.clone());
    settle_single(api.route_trace(&query).await)
}

pub async fn run_mac_trace(api: &dyn TraceApi, request: &MacRequest) -> TraceOutcome<Vec<Hop>> {
    settle_single(api.mac_trace(&request.ip, &request.gateway).await)
}

fn settle_single(result: Result<Vec<Hop>, ApiError>) -> TraceOutcome<Vec<Hop>> {
    match result {
        Ok(hops) => TraceOutcome::succeeded(hops),
        Err(error) => {
            warn!(%error, "Trace failed");
            TraceOutcome::failed(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::SectionErrorKind;
    use crate::status::TraceStatus;

    fn hops(ip: &str) -> Vec<Hop> {
        vec![Hop {
            hop: 1,
            ip: ip.to_string(),
            ..Default::default()
        }]
    }

    fn backend(detail: &str) -> ApiError {
        ApiError::Http {
            status: 500,
            detail: Some(detail.to_string()),
        }
    }

    #[test]
    fn all_legs_ok_is_success() {
        let outcome = aggregate_combined(Ok(hops("10.0.0.1")), Ok(vec![]), Ok(hops("aa")));
        assert_eq!(outcome.status, TraceStatus::Succeeded);
        assert_eq!(outcome.error, None);
        let trace = outcome.result.unwrap();
        assert_eq!(trace.source_mac, Some(vec![]));
    }

    #[test]
    fn main_route_failure_dominates() {
        let outcome = aggregate_combined(Err(backend("route down")), Ok(vec![]), Ok(vec![]));
        assert_eq!(outcome.status, TraceStatus::Failed);
        assert_eq!(outcome.result, None);
        let error = outcome.error.unwrap();
        assert_eq!(error.kind, SectionErrorKind::Trace);
        assert_eq!(error.message, "Main route: route down");
    }

    #[test]
    fn main_failure_reports_every_failed_leg() {
        let outcome = aggregate_combined(
            Err(backend("route down")),
            Err(backend("switch unreachable")),
            Ok(vec![]),
        );
        assert_eq!(
            outcome.error.unwrap().message,
            "Main route: route down; Source MAC trace: switch unreachable"
        );
    }

    #[test]
    fn single_mac_failure_is_partial() {
        let outcome = aggregate_combined(
            Ok(hops("10.0.0.1")),
            Ok(hops("aa")),
            Err(backend("no arp entry")),
        );
        assert_eq!(outcome.status, TraceStatus::PartialSuccess);
        let error = outcome.error.unwrap();
        assert_eq!(error.kind, SectionErrorKind::PartialTrace);
        assert_eq!(error.message, "Destination MAC trace: no arp entry");
        let trace = outcome.result.unwrap();
        assert_eq!(trace.main_route, hops("10.0.0.1"));
        assert_eq!(trace.destination_mac, None);
    }
}
