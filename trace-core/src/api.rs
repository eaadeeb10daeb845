//! Backend surface consumed by the app.
//!
//! The transport lives in the UI crate (gloo-net); this module owns the
//! request shapes, the trait the state machines are written against, and the
//! pure decoding of response bodies so both sides agree on them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::history::RawHistoryEntry;
use crate::hop::Hop;

pub const LOGIN_PATH: &str = "/verify-device-auth";
pub const DEFAULT_GATEWAY_PATH: &str = "/get-default-gateway";
pub const MAC_TRACE_PATH: &str = "/get-mac-trace";
pub const ROUTE_TRACE_PATH: &str = "/get-route-trace";
pub const USER_ROUTES_PATH: &str = "/get-user-routes";
pub const ALL_ROUTES_PATH: &str = "/get-all-routes";

/// Header carrying the stored credential on every request.
pub const TOKEN_HEADER: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Query of `GET /get-route-trace`. Optional parameters are omitted from the
/// query string when empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteTraceQuery {
    pub source_ip: String,
    pub destination_ip: String,
    pub source_dg: Option<String>,
    pub destination_dg: Option<String>,
    pub source_dg_name: Option<String>,
    pub destination_dg_name: Option<String>,
    pub vrf: Option<String>,
    pub destination_vrf: Option<String>,
}

impl RouteTraceQuery {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            ("source_ip", self.source_ip.as_str()),
            ("destination_ip", self.destination_ip.as_str()),
        ];
        let optional = [
            ("source_dg", &self.source_dg),
            ("destination_dg", &self.destination_dg),
            ("source_dg_name", &self.source_dg_name),
            ("destination_dg_name", &self.destination_dg_name),
            ("vrf", &self.vrf),
            ("destination_vrf", &self.destination_vrf),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key, value));
            }
        }
        pairs
    }
}

/// Typed backend operations. Futures are `?Send`: in the browser they run on
/// the single wasm thread.
#[async_trait(?Send)]
pub trait TraceApi {
    /// Returns the opaque session token.
    async fn login(&self, request: &LoginRequest) -> Result<String, ApiError>;

    async fn default_gateway(&self, ip: &str) -> Result<String, ApiError>;

    async fn mac_trace(&self, ip: &str, gateway: &str) -> Result<Vec<Hop>, ApiError>;

    async fn route_trace(&self, query: &RouteTraceQuery) -> Result<Vec<Hop>, ApiError>;

    async fn user_routes(&self) -> Result<Vec<RawHistoryEntry>, ApiError>;

    async fn all_routes(&self) -> Result<Vec<RawHistoryEntry>, ApiError>;
}

/// A body that is either a JSON string (`"10.0.0.254"`) or bare text.
pub fn decode_text(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(text)) => text.trim().to_string(),
        Ok(Value::Null) => String::new(),
        _ => body.trim().to_string(),
    }
}

/// Hop list body. `null` and an empty body decode to no hops.
pub fn decode_hops(body: &str) -> Result<Vec<Hop>, ApiError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let hops: Option<Vec<Hop>> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(hops.unwrap_or_default())
}

pub fn decode_history(body: &str) -> Result<Vec<RawHistoryEntry>, ApiError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let entries: Option<Vec<RawHistoryEntry>> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(entries.unwrap_or_default())
}

/// FastAPI-style `detail`: a string, or a list of validation items with `msg`.
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

/// Error for a non-2xx response.
pub fn classify_failure(status: u16, body: &str) -> ApiError {
    let detail = error_detail(body);
    if status == 401 {
        ApiError::Unauthorized { detail }
    } else {
        ApiError::Http { status, detail }
    }
}
