use thiserror::Error;

use crate::section::{EndpointRole, SectionId};

/// Failure of a single backend call.
///
/// `Display` is the human-readable text that ends up in section errors and
/// history banners, so variants carrying a backend `detail` show it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("{}", describe_http(.status, .detail))]
    Http { status: u16, detail: Option<String> },

    #[error("{}", describe_unauthorized(.detail))]
    Unauthorized { detail: Option<String> },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("{0}")]
    Empty(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

fn describe_http(status: &u16, detail: &Option<String>) -> String {
    match detail.as_deref().map(str::trim) {
        Some(detail) if !detail.is_empty() => detail.to_string(),
        _ => format!("HTTP error: {status}"),
    }
}

fn describe_unauthorized(detail: &Option<String>) -> String {
    detail
        .clone()
        .unwrap_or_else(|| "Authentication failed: token invalid or expired".to_string())
}

/// Rejection of a state-machine operation before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    #[error("Trace section {0} not found")]
    UnknownSection(SectionId),

    #[error("{0} gateway is not part of this trace form")]
    UnsupportedRole(EndpointRole),

    #[error("{0}")]
    MissingInput(String),

    #[error("An operation is already in flight for this section")]
    Busy,
}
