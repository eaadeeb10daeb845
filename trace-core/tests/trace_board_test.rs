//! Trace section state machines driven end to end against a scripted backend.
//!
//! Run: cargo test -p trace-core --test trace_board_test

mod support;

use std::cell::RefCell;
use std::rc::Rc;

use futures::join;
use support::{backend_error, hops, settle, ScriptedApi};
use trace_core::driver::{fetch_gateway, perform_trace};
use trace_core::{
    CombinedField, CombinedForm, DirectField, DirectForm, EndpointRole, GatewayStatus, MacField,
    MacForm, SectionErrorKind, SectionId, StateHandle, TraceBoard, TraceError, TraceForm,
    TraceStatus,
};

type Shared<F> = Rc<RefCell<TraceBoard<F>>>;

fn board<F: TraceForm>() -> (Shared<F>, SectionId) {
    let board = TraceBoard::<F>::new();
    let id = board.sections()[0].id;
    (Rc::new(RefCell::new(board)), id)
}

fn fill_combined(board: &Shared<CombinedForm>, id: SectionId) {
    board.with_mut(|b| {
        b.update_field(id, CombinedField::SourceIp, "10.0.0.1").unwrap();
        b.update_field(id, CombinedField::DestinationIp, "10.0.1.1").unwrap();
        b.update_field(id, CombinedField::SourceGateway, "10.0.0.254").unwrap();
        b.update_field(id, CombinedField::DestinationGateway, "10.0.1.254")
            .unwrap();
    });
}

// ─── Input edits ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn editing_after_settlement_resets_section() {
    let api = ScriptedApi::new()
        .route(Ok(hops(&["10.0.0.254", "10.0.1.254"])))
        .mac("10.0.1.1", Err(backend_error("no arp entry")));
    let (board, id) = board::<CombinedForm>();
    fill_combined(&board, id);

    let status = perform_trace(&api, &board, id).await.unwrap();
    assert_eq!(status, TraceStatus::PartialSuccess);

    // Any field, even one unrelated to the failure, invalidates everything.
    board.with_mut(|b| b.update_field(id, CombinedField::DestinationGateway, "10.0.1.253").unwrap());
    board.with(|b| {
        let section = b.get(id).unwrap();
        assert_eq!(section.trace_status, TraceStatus::Idle);
        assert_eq!(section.result, None);
        assert_eq!(section.error, None);
    });
}

#[tokio::test]
async fn editing_after_failure_resets_mac_section() {
    let api = ScriptedApi::new().mac("10.0.0.5", Err(backend_error("switch unreachable")));
    let (board, id) = board::<MacForm>();
    board.with_mut(|b| {
        b.update_field(id, MacField::Ip, "10.0.0.5").unwrap();
        b.update_field(id, MacField::Gateway, "10.0.0.1").unwrap();
    });

    assert_eq!(perform_trace(&api, &board, id).await, Ok(TraceStatus::Failed));
    board.with(|b| {
        let error = b.get(id).unwrap().error.clone().unwrap();
        assert_eq!(error.kind, SectionErrorKind::Trace);
        assert_eq!(error.message, "switch unreachable");
    });

    board.with_mut(|b| b.update_field(id, MacField::Gateway, "10.0.0.2").unwrap());
    board.with(|b| {
        let section = b.get(id).unwrap();
        assert_eq!(section.trace_status, TraceStatus::Idle);
        assert_eq!(section.error, None);
    });
}

#[tokio::test]
async fn editing_ip_discards_gateway_from_every_status() {
    let api = ScriptedApi::new()
        .gateway("10.0.0.1", Ok("10.0.0.254"))
        .gateway("10.0.0.9", Err(backend_error("timeout")));

    let (board, id) = board::<CombinedForm>();

    // succeeded
    board.with_mut(|b| b.update_field(id, CombinedField::SourceIp, "10.0.0.1").unwrap());
    fetch_gateway(&api, &board, id, EndpointRole::Source).await.unwrap();
    assert_eq!(
        board.with(|b| b.get(id).unwrap().form.source_gateway.status),
        GatewayStatus::Succeeded
    );
    board.with_mut(|b| b.update_field(id, CombinedField::SourceIp, "10.0.0.9").unwrap());
    assert_cleared(&board, id);

    // failed
    fetch_gateway(&api, &board, id, EndpointRole::Source).await.unwrap();
    assert_eq!(
        board.with(|b| b.get(id).unwrap().form.source_gateway.status),
        GatewayStatus::Failed
    );
    board.with_mut(|b| b.update_field(id, CombinedField::SourceIp, "10.0.0.1").unwrap());
    assert_cleared(&board, id);

    // manual
    board.with_mut(|b| b.update_field(id, CombinedField::SourceGateway, "10.0.0.250").unwrap());
    board.with_mut(|b| b.update_field(id, CombinedField::SourceIp, "10.0.0.2").unwrap());
    assert_cleared(&board, id);

    // loading
    board.with_mut(|b| b.begin_gateway_fetch(id, EndpointRole::Source).unwrap());
    board.with_mut(|b| b.update_field(id, CombinedField::SourceIp, "10.0.0.3").unwrap());
    assert_cleared(&board, id);
}

fn assert_cleared(board: &Shared<CombinedForm>, id: SectionId) {
    board.with(|b| {
        let gateway = &b.get(id).unwrap().form.source_gateway;
        assert_eq!(gateway.value, "");
        assert_eq!(gateway.status, GatewayStatus::Idle);
    });
}

// ─── Gateway lookups ─────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_ip_never_reaches_the_backend() {
    let api = ScriptedApi::new();
    let (board, id) = board::<DirectForm>();
    board.with_mut(|b| b.update_field(id, DirectField::SourceIp, "   ").unwrap());

    let result = fetch_gateway(&api, &board, id, EndpointRole::Source).await;
    assert!(matches!(result, Err(TraceError::MissingInput(_))));
    assert!(api.calls().is_empty());
    board.with(|b| {
        let section = b.get(id).unwrap();
        assert_eq!(section.form.endpoints.source_gateway.status, GatewayStatus::Idle);
        assert_eq!(
            section.error.as_ref().map(|e| e.kind),
            Some(SectionErrorKind::MissingInput)
        );
    });
}

#[tokio::test]
async fn blur_fetch_then_manual_override() {
    let api = ScriptedApi::new().gateway("10.0.0.1", Ok("10.0.0.254"));
    let (board, id) = board::<CombinedForm>();

    board.with_mut(|b| b.update_field(id, CombinedField::SourceIp, "10.0.0.1").unwrap());
    fetch_gateway(&api, &board, id, EndpointRole::Source).await.unwrap();
    board.with(|b| {
        let gateway = &b.get(id).unwrap().form.source_gateway;
        assert_eq!(gateway.value, "10.0.0.254");
        assert_eq!(gateway.status, GatewayStatus::Succeeded);
    });

    board.with_mut(|b| b.update_field(id, CombinedField::SourceGateway, "10.0.0.253").unwrap());
    board.with(|b| {
        let gateway = &b.get(id).unwrap().form.source_gateway;
        assert_eq!(gateway.value, "10.0.0.253");
        assert_eq!(gateway.status, GatewayStatus::Manual);
    });
    assert_eq!(api.calls(), vec!["gateway:10.0.0.1"]);
}

#[tokio::test]
async fn failed_lookup_reports_role_qualified_error() {
    let api = ScriptedApi::new();
    let (board, id) = board::<CombinedForm>();
    board.with_mut(|b| b.update_field(id, CombinedField::DestinationIp, "10.0.1.1").unwrap());

    fetch_gateway(&api, &board, id, EndpointRole::Destination)
        .await
        .unwrap();
    board.with(|b| {
        let section = b.get(id).unwrap();
        assert_eq!(section.form.destination_gateway.status, GatewayStatus::Failed);
        assert_eq!(section.form.destination_gateway.value, "");
        let error = section.error.as_ref().unwrap();
        assert_eq!(error.kind, SectionErrorKind::GatewayFetch(EndpointRole::Destination));
        assert_eq!(
            error.message,
            "Gateway Fetch Error (destination): No gateway for 10.0.1.1"
        );
    });
}

#[tokio::test]
async fn trace_waits_for_in_flight_gateway() {
    let api = ScriptedApi::new().gateway("10.0.0.5", Ok("10.0.0.1"));
    let release = api.hold("gateway:10.0.0.5");
    let (board, id) = board::<MacForm>();
    board.with_mut(|b| b.update_field(id, MacField::Ip, "10.0.0.5").unwrap());

    let fetch = fetch_gateway(&api, &board, id, EndpointRole::Endpoint);
    let probe = async {
        settle().await;
        assert_eq!(
            board.with(|b| b.get(id).unwrap().form.gateway.status),
            GatewayStatus::Loading
        );
        assert_eq!(perform_trace(&api, &board, id).await, Err(TraceError::Busy));
        assert_eq!(
            fetch_gateway(&api, &board, id, EndpointRole::Endpoint).await,
            Err(TraceError::Busy)
        );
        release.send(()).unwrap();
    };
    let (fetched, ()) = join!(fetch, probe);
    fetched.unwrap();

    assert_eq!(perform_trace(&api, &board, id).await, Ok(TraceStatus::Succeeded));
    assert_eq!(api.calls(), vec!["gateway:10.0.0.5", "mac:10.0.0.5"]);
}

// ─── Combined aggregation ────────────────────────────────────────────────────

#[tokio::test]
async fn main_route_failure_dominates_successful_macs() {
    let api = ScriptedApi::new()
        .route(Err(backend_error("Simulated backend error during Route trace")))
        .mac("10.0.0.1", Ok(hops(&["aa"])))
        .mac("10.0.1.1", Ok(hops(&["bb"])));
    let (board, id) = board::<CombinedForm>();
    fill_combined(&board, id);

    assert_eq!(perform_trace(&api, &board, id).await, Ok(TraceStatus::Failed));
    board.with(|b| {
        let section = b.get(id).unwrap();
        assert_eq!(section.result, None);
        let error = section.error.as_ref().unwrap();
        assert_eq!(error.kind, SectionErrorKind::Trace);
        assert!(error.message.contains("Simulated backend error during Route trace"));
    });
}

#[tokio::test]
async fn one_mac_failure_is_partial_success() {
    let api = ScriptedApi::new()
        .route(Ok(hops(&["10.0.0.254", "172.16.0.1", "10.0.1.254"])))
        .mac("10.0.0.1", Err(backend_error("MAC not found on any switch")))
        .mac("10.0.1.1", Ok(hops(&["bb"])));
    let (board, id) = board::<CombinedForm>();
    fill_combined(&board, id);

    assert_eq!(
        perform_trace(&api, &board, id).await,
        Ok(TraceStatus::PartialSuccess)
    );
    board.with(|b| {
        let section = b.get(id).unwrap();
        let trace = section.result.as_ref().unwrap();
        assert_eq!(trace.main_route.len(), 3);
        assert_eq!(trace.source_mac, None);
        assert_eq!(trace.destination_mac, Some(hops(&["bb"])));
        let error = section.error.as_ref().unwrap();
        assert_eq!(error.kind, SectionErrorKind::PartialTrace);
        assert_eq!(error.message, "Source MAC trace: MAC not found on any switch");
    });
}

#[tokio::test]
async fn combined_calls_are_in_flight_together() {
    let api = ScriptedApi::new().route(Ok(hops(&["10.0.0.254"])));
    let route = api.hold("route");
    let source_mac = api.hold("mac:10.0.0.1");
    let (board, id) = board::<CombinedForm>();
    fill_combined(&board, id);

    let trace = perform_trace(&api, &board, id);
    let probe = async {
        settle().await;
        // Neither MAC call waits on the route, nor on each other.
        let mut calls = api.calls();
        calls.sort();
        assert_eq!(calls, vec!["mac:10.0.0.1", "mac:10.0.1.1", "route"]);
        assert_eq!(
            board.with(|b| b.get(id).unwrap().trace_status),
            TraceStatus::Loading
        );
        assert_eq!(perform_trace(&api, &board, id).await, Err(TraceError::Busy));

        // Settle-all: releasing the route alone does not finish the trace.
        route.send(()).unwrap();
        settle().await;
        assert_eq!(
            board.with(|b| b.get(id).unwrap().trace_status),
            TraceStatus::Loading
        );
        source_mac.send(()).unwrap();
    };
    let (status, ()) = join!(trace, probe);
    assert_eq!(status, Ok(TraceStatus::Succeeded));

    let query = &api.queries()[0];
    assert_eq!(query.source_dg.as_deref(), Some("10.0.0.254"));
    assert_eq!(query.vrf, None);
}

#[tokio::test]
async fn missing_input_is_rejected_locally() {
    let api = ScriptedApi::new();
    let (board, id) = board::<CombinedForm>();
    board.with_mut(|b| b.update_field(id, CombinedField::SourceIp, "10.0.0.1").unwrap());

    let result = perform_trace(&api, &board, id).await;
    assert!(matches!(result, Err(TraceError::MissingInput(_))));
    assert!(api.calls().is_empty());
    board.with(|b| {
        let section = b.get(id).unwrap();
        assert_eq!(section.trace_status, TraceStatus::Idle);
        assert_eq!(
            section.error.as_ref().map(|e| e.kind),
            Some(SectionErrorKind::MissingInput)
        );
    });
}

// ─── Direct and MAC ──────────────────────────────────────────────────────────

#[tokio::test]
async fn direct_trace_sends_vrf_and_defaults_to_empty_hops() {
    let api = ScriptedApi::new();
    let (board, id) = board::<DirectForm>();
    board.with_mut(|b| {
        b.update_field(id, DirectField::SourceIp, "10.0.0.254").unwrap();
        b.update_field(id, DirectField::DestinationIp, "10.0.1.254").unwrap();
        b.update_field(id, DirectField::SourceGateway, "10.0.0.1").unwrap();
        b.update_field(id, DirectField::DestinationGateway, "10.0.1.1").unwrap();
        b.update_field(id, DirectField::Vrf, "PROD").unwrap();
    });

    assert_eq!(perform_trace(&api, &board, id).await, Ok(TraceStatus::Succeeded));
    assert_eq!(board.with(|b| b.get(id).unwrap().result.clone()), Some(vec![]));
    assert_eq!(api.calls(), vec!["route"]);
    assert_eq!(api.queries()[0].vrf.as_deref(), Some("PROD"));
}

// ─── Collection bounds ───────────────────────────────────────────────────────

fn check_bounds<F: TraceForm>() {
    let mut board = TraceBoard::<F>::new();
    let first = board.sections()[0].id;
    assert!(!board.remove_section(first));
    assert_eq!(board.len(), 1);

    for _ in 0..F::MAX_SECTIONS + 3 {
        board.add_section();
        assert!(board.len() <= F::MAX_SECTIONS);
    }
    assert_eq!(board.len(), F::MAX_SECTIONS);

    let ids: Vec<_> = board.sections().iter().map(|s| s.id).collect();
    for id in &ids {
        board.remove_section(*id);
        assert!(board.len() >= 1);
    }
    assert_eq!(board.len(), 1);
}

#[test]
fn section_bounds_hold_for_every_flavour() {
    check_bounds::<CombinedForm>();
    check_bounds::<DirectForm>();
    check_bounds::<MacForm>();
}

// ─── Stale settlements ───────────────────────────────────────────────────────

#[tokio::test]
async fn settlement_after_removal_is_dropped() {
    let api = ScriptedApi::new().route(Ok(hops(&["10.0.0.254"])));
    let release = api.hold("route");
    let (board, first) = board::<CombinedForm>();
    let second = board.with_mut(|b| b.add_section()).unwrap();
    fill_combined(&board, second);

    let trace = perform_trace(&api, &board, second);
    let probe = async {
        settle().await;
        assert!(board.with_mut(|b| b.remove_section(second)));
        release.send(()).unwrap();
    };
    let (status, ()) = join!(trace, probe);
    assert_eq!(status, Ok(TraceStatus::Succeeded));

    board.with(|b| {
        assert_eq!(b.len(), 1);
        let remaining = b.get(first).unwrap();
        assert_eq!(remaining.trace_status, TraceStatus::Idle);
        assert_eq!(remaining.result, None);
    });
}

#[tokio::test]
async fn settlement_after_input_change_still_applies() {
    let api = ScriptedApi::new().mac("10.0.0.5", Ok(hops(&["aa", "bb"])));
    let release = api.hold("mac:10.0.0.5");
    let (board, id) = board::<MacForm>();
    board.with_mut(|b| {
        b.update_field(id, MacField::Ip, "10.0.0.5").unwrap();
        b.update_field(id, MacField::Gateway, "10.0.0.1").unwrap();
    });

    let trace = perform_trace(&api, &board, id);
    let probe = async {
        settle().await;
        board.with_mut(|b| b.update_field(id, MacField::Gateway, "10.0.0.2").unwrap());
        release.send(()).unwrap();
    };
    let (status, ()) = join!(trace, probe);
    assert_eq!(status, Ok(TraceStatus::Succeeded));
    board.with(|b| {
        let section = b.get(id).unwrap();
        assert_eq!(section.trace_status, TraceStatus::Succeeded);
        assert_eq!(section.result.as_ref().map(Vec::len), Some(2));
        assert_eq!(section.form.gateway.value, "10.0.0.2");
    });
}
