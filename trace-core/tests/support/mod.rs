//! Scripted in-memory backend for driver tests.
//!
//! Every call is logged by key (`gateway:<ip>`, `mac:<ip>`, `route`,
//! `user_routes`, `all_routes`, `login`). A call can be held open with
//! [`ScriptedApi::hold`] until the returned sender fires or is dropped.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use futures::channel::oneshot;
use trace_core::{ApiError, Hop, LoginRequest, RawHistoryEntry, RouteTraceQuery, TraceApi};

#[derive(Default)]
pub struct ScriptedApi {
    calls: RefCell<Vec<String>>,
    gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
    gateways: RefCell<HashMap<String, Result<String, ApiError>>>,
    macs: RefCell<HashMap<String, Result<Vec<Hop>, ApiError>>>,
    route: RefCell<Option<Result<Vec<Hop>, ApiError>>>,
    history: RefCell<Option<Result<Vec<RawHistoryEntry>, ApiError>>>,
    login: RefCell<Option<Result<String, ApiError>>>,
    queries: RefCell<Vec<RouteTraceQuery>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gateway(self, ip: &str, result: Result<&str, ApiError>) -> Self {
        self.gateways
            .borrow_mut()
            .insert(ip.to_string(), result.map(str::to_string));
        self
    }

    pub fn mac(self, ip: &str, result: Result<Vec<Hop>, ApiError>) -> Self {
        self.macs.borrow_mut().insert(ip.to_string(), result);
        self
    }

    pub fn route(self, result: Result<Vec<Hop>, ApiError>) -> Self {
        *self.route.borrow_mut() = Some(result);
        self
    }

    pub fn history(self, result: Result<Vec<RawHistoryEntry>, ApiError>) -> Self {
        *self.history.borrow_mut() = Some(result);
        self
    }

    pub fn login(self, result: Result<&str, ApiError>) -> Self {
        *self.login.borrow_mut() = Some(result.map(str::to_string));
        self
    }

    /// Holds the next call with `key` open until the sender fires.
    pub fn hold(&self, key: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(key.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn queries(&self) -> Vec<RouteTraceQuery> {
        self.queries.borrow().clone()
    }

    async fn enter(&self, key: String) {
        self.calls.borrow_mut().push(key.clone());
        let gate = self.gates.borrow_mut().remove(&key);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

#[async_trait(?Send)]
impl TraceApi for ScriptedApi {
    async fn login(&self, _request: &LoginRequest) -> Result<String, ApiError> {
        self.enter("login".to_string()).await;
        self.login
            .borrow()
            .clone()
            .unwrap_or_else(|| Ok("token-123".to_string()))
    }

    async fn default_gateway(&self, ip: &str) -> Result<String, ApiError> {
        self.enter(format!("gateway:{ip}")).await;
        self.gateways.borrow().get(ip).cloned().unwrap_or_else(|| {
            Err(ApiError::Http {
                status: 404,
                detail: Some(format!("No gateway for {ip}")),
            })
        })
    }

    async fn mac_trace(&self, ip: &str, _gateway: &str) -> Result<Vec<Hop>, ApiError> {
        self.enter(format!("mac:{ip}")).await;
        self.macs.borrow().get(ip).cloned().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn route_trace(&self, query: &RouteTraceQuery) -> Result<Vec<Hop>, ApiError> {
        self.queries.borrow_mut().push(query.clone());
        self.enter("route".to_string()).await;
        self.route.borrow().clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn user_routes(&self) -> Result<Vec<RawHistoryEntry>, ApiError> {
        self.enter("user_routes".to_string()).await;
        self.history.borrow().clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn all_routes(&self) -> Result<Vec<RawHistoryEntry>, ApiError> {
        self.enter("all_routes".to_string()).await;
        self.history.borrow().clone().unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn hops(ips: &[&str]) -> Vec<Hop> {
    ips.iter()
        .enumerate()
        .map(|(i, ip)| Hop {
            hop: i as u32 + 1,
            ip: ip.to_string(),
            ..Default::default()
        })
        .collect()
}

pub fn backend_error(detail: &str) -> ApiError {
    ApiError::Http {
        status: 500,
        detail: Some(detail.to_string()),
    }
}

/// Lets other futures in the same `join!` make progress.
pub async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}
