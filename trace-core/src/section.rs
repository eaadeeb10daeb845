//! A single trace section: its inputs, gateway sub-states, status and result.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::TraceApi;
use crate::error::TraceError;
use crate::status::{GatewayStatus, TraceStatus, TraceType};

/// Opaque, stable identifier of a trace section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionId(Uuid);

impl SectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which address of a form a gateway belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointRole {
    Source,
    Destination,
    /// The single address of a MAC trace.
    Endpoint,
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EndpointRole::Source => "source",
            EndpointRole::Destination => "destination",
            EndpointRole::Endpoint => "endpoint",
        })
    }
}

/// Gateway text plus how it got there.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GatewayField {
    pub value: String,
    pub status: GatewayStatus,
}

impl GatewayField {
    /// Typed by the user. An in-flight lookup keeps its `loading` status.
    pub fn edit(&mut self, value: String) {
        self.value = value;
        if !self.status.is_loading() {
            self.status = GatewayStatus::Manual;
        }
    }

    /// The associated IP changed, so the gateway no longer applies.
    pub fn discard(&mut self) {
        self.value.clear();
        self.status = GatewayStatus::Idle;
    }

    pub(crate) fn begin_fetch(&mut self) -> Result<(), TraceError> {
        if self.status.is_loading() {
            return Err(TraceError::Busy);
        }
        self.status = GatewayStatus::Loading;
        Ok(())
    }

    pub(crate) fn resolve(&mut self, gateway: String) {
        self.value = gateway;
        self.status = GatewayStatus::Succeeded;
    }

    pub(crate) fn fail(&mut self) {
        self.status = GatewayStatus::Failed;
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

/// Where a section error came from, so it can be shown next to the inputs
/// or in the results area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "role")]
pub enum SectionErrorKind {
    MissingInput,
    GatewayFetch(EndpointRole),
    Trace,
    PartialTrace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionError {
    pub kind: SectionErrorKind,
    pub message: String,
}

impl SectionError {
    pub fn missing_input(message: impl Into<String>) -> Self {
        Self {
            kind: SectionErrorKind::MissingInput,
            message: message.into(),
        }
    }

    pub fn gateway_fetch(role: EndpointRole, detail: impl fmt::Display) -> Self {
        Self {
            kind: SectionErrorKind::GatewayFetch(role),
            message: format!("Gateway Fetch Error ({role}): {detail}"),
        }
    }

    pub fn trace(message: impl Into<String>) -> Self {
        Self {
            kind: SectionErrorKind::Trace,
            message: message.into(),
        }
    }

    pub fn partial(message: impl Into<String>) -> Self {
        Self {
            kind: SectionErrorKind::PartialTrace,
            message: message.into(),
        }
    }

    /// True for errors that belong next to the input form.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.kind,
            SectionErrorKind::MissingInput | SectionErrorKind::GatewayFetch(_)
        )
    }
}

impl fmt::Display for SectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Settled result of one trace invocation, applied wholesale to a section.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceOutcome<T> {
    pub status: TraceStatus,
    pub result: Option<T>,
    pub error: Option<SectionError>,
}

impl<T> TraceOutcome<T> {
    pub fn succeeded(result: T) -> Self {
        Self {
            status: TraceStatus::Succeeded,
            result: Some(result),
            error: None,
        }
    }

    pub fn partial(result: T, message: impl Into<String>) -> Self {
        Self {
            status: TraceStatus::PartialSuccess,
            result: Some(result),
            error: Some(SectionError::partial(message)),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: TraceStatus::Failed,
            result: None,
            error: Some(SectionError::trace(message)),
        }
    }
}

/// The input side of one trace flavour.
///
/// A form knows how to apply an edit, which gateways it carries, how to turn
/// itself into a backend request, and how to execute that request.
#[async_trait(?Send)]
pub trait TraceForm: Clone + Default + PartialEq + fmt::Debug + 'static {
    type Field: Copy + PartialEq + fmt::Debug;
    type Request: Clone + PartialEq + fmt::Debug;
    type Output: Clone + PartialEq + fmt::Debug;

    const KIND: TraceType;
    const MAX_SECTIONS: usize = 5;

    /// Store `value` in `field`, applying gateway side effects.
    fn apply(&mut self, field: Self::Field, value: String);

    fn gateway(&self, role: EndpointRole) -> Option<&GatewayField>;

    fn gateway_mut(&mut self, role: EndpointRole) -> Option<&mut GatewayField>;

    /// The IP a gateway lookup for `role` resolves.
    fn ip(&self, role: EndpointRole) -> Option<&str>;

    /// Roles this form carries a gateway for.
    fn roles() -> &'static [EndpointRole];

    /// Trimmed request, or the missing-input message.
    fn request(&self) -> Result<Self::Request, String>;

    async fn execute(api: &dyn TraceApi, request: &Self::Request) -> TraceOutcome<Self::Output>;

    fn any_gateway_loading(&self) -> bool {
        Self::roles()
            .iter()
            .filter_map(|role| self.gateway(*role))
            .any(GatewayField::is_loading)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section<F: TraceForm> {
    pub id: SectionId,
    pub form: F,
    pub trace_status: TraceStatus,
    pub result: Option<F::Output>,
    pub error: Option<SectionError>,
}

impl<F: TraceForm> Default for Section<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: TraceForm> Section<F> {
    pub fn new() -> Self {
        Self {
            id: SectionId::new(),
            form: F::default(),
            trace_status: TraceStatus::Idle,
            result: None,
            error: None,
        }
    }

    /// Any edit invalidates the previous run, even for unrelated fields.
    pub fn update_field(&mut self, field: F::Field, value: String) {
        self.form.apply(field, value);
        self.invalidate();
    }

    pub fn invalidate(&mut self) {
        self.trace_status = TraceStatus::Idle;
        self.result = None;
        self.error = None;
    }

    /// A trace or gateway lookup is in flight.
    pub fn is_busy(&self) -> bool {
        self.trace_status.is_loading() || self.form.any_gateway_loading()
    }

    pub(crate) fn apply_outcome(&mut self, outcome: TraceOutcome<F::Output>) {
        self.trace_status = outcome.status;
        self.result = outcome.result;
        self.error = outcome.error;
    }
}
