use serde::{Deserialize, Serialize};

/// Lifecycle of one gateway field of a trace section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
    /// Edited by hand after (or instead of) an automatic lookup.
    Manual,
}

impl GatewayStatus {
    pub fn is_loading(self) -> bool {
        self == GatewayStatus::Loading
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GatewayStatus::Idle => "idle",
            GatewayStatus::Loading => "loading",
            GatewayStatus::Succeeded => "succeeded",
            GatewayStatus::Failed => "failed",
            GatewayStatus::Manual => "manual",
        }
    }
}

/// Lifecycle of the trace itself. `PartialSuccess` is only produced by the
/// combined trace, where the main route succeeded but a MAC leg did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
    PartialSuccess,
}

impl TraceStatus {
    pub fn is_loading(self) -> bool {
        self == TraceStatus::Loading
    }

    /// Succeeded, failed or partially succeeded.
    pub fn is_settled(self) -> bool {
        matches!(
            self,
            TraceStatus::Succeeded | TraceStatus::Failed | TraceStatus::PartialSuccess
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TraceStatus::Idle => "idle",
            TraceStatus::Loading => "loading",
            TraceStatus::Succeeded => "succeeded",
            TraceStatus::Failed => "failed",
            TraceStatus::PartialSuccess => "partial_success",
        }
    }
}

/// Load status of a lazily fetched history collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl LoadStatus {
    pub fn is_loading(self) -> bool {
        self == LoadStatus::Loading
    }
}

/// Which of the three trace flavours produced a section or history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceType {
    #[default]
    Combined,
    Direct,
    Mac,
}

impl TraceType {
    pub fn as_str(self) -> &'static str {
        match self {
            TraceType::Combined => "combined",
            TraceType::Direct => "direct",
            TraceType::Mac => "mac",
        }
    }

    /// Lenient parse used for stored history metadata ("Direct (Gateways)",
    /// "MAC", "combined", ...).
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_ascii_lowercase();
        if label.is_empty() {
            None
        } else if label.contains("direct") {
            Some(TraceType::Direct)
        } else if label.contains("mac") {
            Some(TraceType::Mac)
        } else if label.contains("combined") {
            Some(TraceType::Combined)
        } else {
            None
        }
    }

    /// Human name for headings and history badges.
    pub fn title(self) -> &'static str {
        match self {
            TraceType::Combined => "Combined",
            TraceType::Direct => "Direct",
            TraceType::Mac => "MAC",
        }
    }

    pub fn source_label(self) -> &'static str {
        match self {
            TraceType::Combined => "Src IP",
            TraceType::Direct => "Src GW",
            TraceType::Mac => "Endpoint",
        }
    }

    pub fn destination_label(self) -> &'static str {
        match self {
            TraceType::Combined => "Dst IP",
            TraceType::Direct => "Dst GW",
            TraceType::Mac => "Gateway",
        }
    }

    pub fn separator(self) -> &'static str {
        match self {
            TraceType::Mac => "↔",
            _ => "→",
        }
    }
}
