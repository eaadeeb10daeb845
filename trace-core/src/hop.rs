//! Hop records returned by the route and MAC trace endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNKNOWN_HOST: &str = "Unknown Host";

/// One element of a traced path.
///
/// Sequences of hops are kept in the order the backend returned them; that
/// order is the path order and is never re-sorted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hop {
    /// 1-based position in the path.
    #[serde(default)]
    pub hop: u32,

    #[serde(default)]
    pub ip: String,

    /// Resolved device name. The backend sends it as `hostname`.
    #[serde(default, alias = "hostname", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Everything else the backend attached (mac, device_id, vrf, rtt, ...).
    #[serde(flatten)]
    pub details: BTreeMap<String, Value>,
}

/// Coarse device classification used to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopKind {
    Router,
    Firewall,
    Host,
    Switch,
    Wireless,
    Unknown,
}

impl HopKind {
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        const TABLE: &[(&str, HopKind)] = &[
            ("router", HopKind::Router),
            ("gateway", HopKind::Router),
            ("firewall", HopKind::Firewall),
            ("host", HopKind::Host),
            ("endpoint", HopKind::Host),
            ("server", HopKind::Host),
            ("switch", HopKind::Switch),
            ("bridge", HopKind::Switch),
            ("wifi", HopKind::Wireless),
        ];
        TABLE
            .iter()
            .find(|(needle, _)| tag.contains(needle))
            .map(|(_, kind)| *kind)
            .unwrap_or(HopKind::Unknown)
    }

    pub fn icon(self) -> &'static str {
        match self {
            HopKind::Router => "🛜",
            HopKind::Firewall => "🛡",
            HopKind::Host => "🖥",
            HopKind::Switch => "🔀",
            HopKind::Wireless => "📶",
            HopKind::Unknown => "❔",
        }
    }
}

impl Hop {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_HOST,
        }
    }

    pub fn hop_kind(&self) -> HopKind {
        self.kind
            .as_deref()
            .map(HopKind::from_tag)
            .unwrap_or(HopKind::Unknown)
    }

    /// MAC address if the backend attached one.
    pub fn mac(&self) -> Option<&str> {
        self.details
            .get("mac")
            .or_else(|| self.details.get("destination_mac"))
            .and_then(Value::as_str)
            .filter(|mac| !mac.is_empty())
    }

    /// Secondary line under the display name: the address when a name was
    /// resolved, otherwise the type tag.
    pub fn secondary_label(&self) -> Option<&str> {
        let address = Some(self.ip.as_str())
            .filter(|ip| !ip.is_empty())
            .or_else(|| self.mac());
        if self.name.as_deref().is_some_and(|n| !n.trim().is_empty()) {
            address
        } else if address.is_some() {
            self.kind.as_deref().filter(|k| !k.is_empty())
        } else {
            None
        }
    }

    /// Rows for the hop detail popover, empty values dropped.
    pub fn detail_rows(&self) -> Vec<(String, String)> {
        let mut rows = Vec::new();
        if !self.ip.is_empty() {
            rows.push(("IP".to_string(), self.ip.clone()));
        }
        if let Some(kind) = self.kind.as_deref().filter(|k| !k.is_empty()) {
            rows.push(("Type".to_string(), kind.to_string()));
        }
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            rows.push(("Hostname".to_string(), name.to_string()));
        }
        for (key, value) in &self.details {
            let Some(mut text) = render_detail(value) else {
                continue;
            };
            if key == "rtt" {
                text.push_str(" ms");
            }
            rows.push((humanize_key(key), text));
        }
        rows
    }
}

fn render_detail(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(true) => Some("Yes".to_string()),
        Value::Bool(false) => Some("No".to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// `device_id` → `Device id`, `destinationMac` → `Destination mac`.
pub fn humanize_key(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch == '_' {
            spaced.push(' ');
        } else if ch.is_ascii_uppercase() {
            spaced.push(' ');
            spaced.push(ch.to_ascii_lowercase());
        } else {
            spaced.push(ch);
        }
    }
    let trimmed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_hop_with_hostname_alias_and_extras() {
        let json = r#"{
            "hop": 3,
            "ip": "10.1.2.3",
            "type": "firewall",
            "hostname": "fw-core-1",
            "vrf": "PROD",
            "passed_firewall": true,
            "mpls_label": null
        }"#;
        let hop: Hop = serde_json::from_str(json).unwrap();
        assert_eq!(hop.hop, 3);
        assert_eq!(hop.display_name(), "fw-core-1");
        assert_eq!(hop.hop_kind(), HopKind::Firewall);
        assert_eq!(hop.details.get("vrf"), Some(&Value::from("PROD")));
        assert!(!hop.details.contains_key("hostname"));
    }

    #[test]
    fn unnamed_hop_falls_back_to_unknown_host() {
        let hop: Hop = serde_json::from_str(r#"{"hop":1,"ip":"10.0.0.1"}"#).unwrap();
        assert_eq!(hop.display_name(), UNKNOWN_HOST);

        let blank: Hop = serde_json::from_str(r#"{"hop":1,"ip":"10.0.0.1","name":" "}"#).unwrap();
        assert_eq!(blank.display_name(), UNKNOWN_HOST);
    }

    #[test]
    fn secondary_label_prefers_address_when_named() {
        let named: Hop =
            serde_json::from_str(r#"{"hop":1,"ip":"10.0.0.1","name":"gw","type":"router"}"#)
                .unwrap();
        assert_eq!(named.secondary_label(), Some("10.0.0.1"));

        let unnamed: Hop =
            serde_json::from_str(r#"{"hop":2,"ip":"10.0.0.2","type":"L2 Switch"}"#).unwrap();
        assert_eq!(unnamed.secondary_label(), Some("L2 Switch"));
        assert_eq!(unnamed.hop_kind(), HopKind::Switch);
    }

    #[test]
    fn detail_rows_humanize_and_drop_empty_values() {
        let hop: Hop = serde_json::from_str(
            r#"{"hop":2,"ip":"10.0.0.2","device_id":"sw-9","rtt":4,"passed_firewall":false,"destination_mac":""}"#,
        )
        .unwrap();
        let rows = hop.detail_rows();
        assert!(rows.contains(&("IP".to_string(), "10.0.0.2".to_string())));
        assert!(rows.contains(&("Device id".to_string(), "sw-9".to_string())));
        assert!(rows.contains(&("Rtt".to_string(), "4 ms".to_string())));
        assert!(rows.contains(&("Passed firewall".to_string(), "No".to_string())));
        assert!(!rows.iter().any(|(k, _)| k == "Destination mac"));
    }

    #[test]
    fn humanize_handles_camel_and_snake_case() {
        assert_eq!(humanize_key("nexthop_int_ip"), "Nexthop int ip");
        assert_eq!(humanize_key("destinationMac"), "Destination mac");
        assert_eq!(humanize_key(""), "");
    }
}
