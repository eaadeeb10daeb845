//! RouteTrace core
//!
//! Everything the front end owns that does not touch the browser:
//! - Wire types for hops, history entries and backend requests
//! - Per-section trace state machines (combined, direct, MAC) and their boards
//! - The settle-all orchestration of the combined trace
//! - History, session and comparison containers
//!
//! Builds for native targets (tests) and for wasm32 (the Dioxus app).

pub mod api;
pub mod board;
pub mod combined;
pub mod comparison;
pub mod credential;
pub mod direct;
pub mod driver;
pub mod error;
pub mod format;
pub mod history;
pub mod hop;
pub mod mac;
pub mod orchestrate;
pub mod section;
pub mod session;
pub mod status;
pub mod validate;

pub use api::{LoginRequest, RouteTraceQuery, TraceApi};
pub use board::{GatewayLookup, TraceBoard};
pub use combined::{CombinedField, CombinedForm, CombinedTrace, EndpointPair};
pub use comparison::ComparisonSelection;
pub use credential::{CredentialStore, MemoryCredentials};
pub use direct::{DirectField, DirectForm, DirectRequest};
pub use driver::StateHandle;
pub use error::{ApiError, TraceError};
pub use history::{
    HistoryCache, HistoryEntry, HistoryId, HistoryScope, HistoryStore, HistoryUser, InputDetails,
    RawHistoryEntry, StoredJson,
};
pub use hop::{Hop, HopKind};
pub use mac::{MacField, MacForm, MacRequest};
pub use section::{
    EndpointRole, GatewayField, Section, SectionError, SectionErrorKind, SectionId, TraceForm,
    TraceOutcome,
};
pub use session::{AuthState, AuthUser, Session};
pub use status::{GatewayStatus, LoadStatus, TraceStatus, TraceType};
