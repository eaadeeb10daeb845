//! Saved traces and the two lazily fetched history caches.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::hop::Hop;
use crate::status::{LoadStatus, TraceType};

/// Backend identifier of a history entry. Numeric ids are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct HistoryId(String);

impl HistoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for HistoryId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for HistoryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Number(i64),
            Text(String),
        }
        Ok(match Wire::deserialize(deserializer)? {
            Wire::Number(n) => HistoryId(n.to_string()),
            Wire::Text(s) => HistoryId(s),
        })
    }
}

/// History entry as the backend sends it. Fields that carry stored JSON may
/// arrive as JSON text or as already-decoded values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHistoryEntry {
    pub id: HistoryId,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_route_trace: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_mac_trace: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_mac_trace: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_additional_info: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_details: Option<Value>,
}

/// Outcome of decoding one stored JSON field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StoredJson<T> {
    #[default]
    Absent,
    Parsed(T),
    Malformed {
        raw: String,
    },
}

impl<T: DeserializeOwned> StoredJson<T> {
    pub fn decode(field: &str, value: Option<&Value>) -> Self {
        let value = match value {
            None | Some(Value::Null) => return StoredJson::Absent,
            Some(Value::String(text)) if text.trim().is_empty() => return StoredJson::Absent,
            Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Null) => return StoredJson::Absent,
                Ok(value) => (value, text.clone()),
                Err(error) => {
                    warn!(field, %error, "Stored JSON is not valid JSON");
                    return StoredJson::Malformed { raw: text.clone() };
                }
            },
            Some(other) => (other.clone(), other.to_string()),
        };
        let (value, raw) = value;
        match serde_json::from_value(value) {
            Ok(parsed) => StoredJson::Parsed(parsed),
            Err(error) => {
                warn!(field, %error, "Stored JSON has an unexpected shape");
                StoredJson::Malformed { raw }
            }
        }
    }
}

impl<T> StoredJson<T> {
    /// The parsed value; absent and malformed both read as `None`.
    pub fn value(&self) -> Option<&T> {
        match self {
            StoredJson::Parsed(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, StoredJson::Absent)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, StoredJson::Malformed { .. })
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            StoredJson::Malformed { raw } => Some(raw),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryUser {
    pub username: String,
}

/// What the user typed for a saved trace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputDetails {
    pub source_ip: Option<String>,
    pub destination_ip: Option<String>,
    pub source_dg: Option<String>,
    pub destination_dg: Option<String>,
    pub vrf: Option<String>,
    pub ip: Option<String>,
    pub dg: Option<String>,
}

impl InputDetails {
    fn from_map(map: &Map<String, Value>, prefix: &str) -> Self {
        let text = |keys: &[&str]| {
            keys.iter().find_map(|key| {
                map.get(&format!("{prefix}{key}"))
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            })
        };
        Self {
            source_ip: text(&["source_ip"]),
            destination_ip: text(&["destination_ip"]),
            source_dg: text(&["source_dg", "source_gateway"]),
            destination_dg: text(&["destination_dg", "destination_gateway"]),
            vrf: text(&["vrf"]),
            ip: text(&["ip"]),
            dg: text(&["dg", "gateway"]),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == InputDetails::default()
    }

    /// Non-empty (label, value) pairs in display order.
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        [
            ("Source IP", &self.source_ip),
            ("Destination IP", &self.destination_ip),
            ("Source DG", &self.source_dg),
            ("Destination DG", &self.destination_dg),
            ("VRF", &self.vrf),
            ("IP", &self.ip),
            ("DG", &self.dg),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect()
    }
}

/// History entry with its stored JSON decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub source: String,
    pub destination: String,
    pub timestamp: String,
    pub user: Option<HistoryUser>,
    pub trace_type: TraceType,
    pub route_data: StoredJson<Vec<Hop>>,
    pub main_route_trace: StoredJson<Vec<Hop>>,
    pub source_mac_trace: StoredJson<Vec<Hop>>,
    pub destination_mac_trace: StoredJson<Vec<Hop>>,
    pub device_info: StoredJson<Map<String, Value>>,
    pub input_details: InputDetails,
}

impl From<RawHistoryEntry> for HistoryEntry {
    fn from(raw: RawHistoryEntry) -> Self {
        let device_info: StoredJson<Map<String, Value>> =
            StoredJson::decode("device_additional_info", raw.device_additional_info.as_ref());

        let trace_type = raw
            .trace_type
            .as_deref()
            .and_then(TraceType::from_label)
            .or_else(|| {
                device_info
                    .value()
                    .and_then(|info| info.get("trace_type"))
                    .and_then(Value::as_str)
                    .and_then(TraceType::from_label)
            })
            .unwrap_or(TraceType::Combined);

        let explicit_inputs: StoredJson<Map<String, Value>> =
            StoredJson::decode("input_details", raw.input_details.as_ref());
        let input_details = match (explicit_inputs.value(), device_info.value()) {
            (Some(map), _) => InputDetails::from_map(map, ""),
            (None, Some(info)) => InputDetails::from_map(info, "input_"),
            (None, None) => InputDetails::default(),
        };

        let user = match raw.user {
            Some(Value::Object(map)) => map
                .get("username")
                .and_then(Value::as_str)
                .map(|username| HistoryUser {
                    username: username.to_string(),
                }),
            _ => None,
        };

        HistoryEntry {
            route_data: StoredJson::decode("route", raw.route.as_ref()),
            main_route_trace: StoredJson::decode("main_route_trace", raw.main_route_trace.as_ref()),
            source_mac_trace: StoredJson::decode("source_mac_trace", raw.source_mac_trace.as_ref()),
            destination_mac_trace: StoredJson::decode(
                "destination_mac_trace",
                raw.destination_mac_trace.as_ref(),
            ),
            id: raw.id,
            source: raw.source,
            destination: raw.destination,
            timestamp: raw.timestamp,
            user,
            trace_type,
            device_info,
            input_details,
        }
    }
}

impl HistoryEntry {
    /// The main path: `main_route_trace`, or `route` for entries saved
    /// before the split.
    pub fn main_route(&self) -> &StoredJson<Vec<Hop>> {
        if self.main_route_trace.is_absent() {
            &self.route_data
        } else {
            &self.main_route_trace
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }

    /// Device metadata minus the echoed inputs, for the expanded view.
    pub fn device_rows(&self) -> Vec<(String, String)> {
        let Some(info) = self.device_info.value() else {
            return Vec::new();
        };
        info.iter()
            .filter(|(key, _)| !key.starts_with("input_") && key.as_str() != "trace_type")
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect()
    }
}

/// Which history collection an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryScope {
    /// The signed-in user's traces.
    User,
    /// Everybody's traces.
    All,
}

impl HistoryScope {
    pub fn as_str(self) -> &'static str {
        match self {
            HistoryScope::User => "user",
            HistoryScope::All => "all",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryCache {
    pub entries: Vec<HistoryEntry>,
    pub status: LoadStatus,
}

/// Owner of both history caches.
///
/// Fetch-once: a cache only fetches from `Idle`, and a successful fetch
/// replaces its entries. `invalidate` is the explicit refresh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryStore {
    pub user: HistoryCache,
    pub all: HistoryCache,
    pub error: Option<String>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self, scope: HistoryScope) -> &HistoryCache {
        match scope {
            HistoryScope::User => &self.user,
            HistoryScope::All => &self.all,
        }
    }

    fn cache_mut(&mut self, scope: HistoryScope) -> &mut HistoryCache {
        match scope {
            HistoryScope::User => &mut self.user,
            HistoryScope::All => &mut self.all,
        }
    }

    /// Returns true when the caller should issue the fetch.
    pub fn begin_fetch(&mut self, scope: HistoryScope) -> bool {
        let cache = self.cache_mut(scope);
        if cache.status != LoadStatus::Idle {
            debug!(scope = scope.as_str(), status = ?cache.status, "History fetch skipped");
            return false;
        }
        cache.status = LoadStatus::Loading;
        self.error = None;
        true
    }

    pub fn finish_fetch(
        &mut self,
        scope: HistoryScope,
        result: Result<Vec<RawHistoryEntry>, ApiError>,
    ) {
        match result {
            Ok(raw) => {
                let cache = self.cache_mut(scope);
                cache.entries = raw.into_iter().map(HistoryEntry::from).collect();
                cache.status = LoadStatus::Succeeded;
            }
            Err(error) => {
                warn!(scope = scope.as_str(), %error, "History fetch failed");
                self.cache_mut(scope).status = LoadStatus::Failed;
                self.error = Some(error.to_string());
            }
        }
    }

    /// Allows the next `begin_fetch`. Entries stay visible until it lands.
    pub fn invalidate(&mut self, scope: HistoryScope) {
        let cache = self.cache_mut(scope);
        if !cache.status.is_loading() {
            cache.status = LoadStatus::Idle;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn find(&self, id: &HistoryId) -> Option<&HistoryEntry> {
        self.user
            .entries
            .iter()
            .chain(self.all.entries.iter())
            .find(|entry| &entry.id == id)
    }
}
