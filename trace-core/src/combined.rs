//! Combined trace: the routed path plus a MAC trace on each side.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::{RouteTraceQuery, TraceApi};
use crate::hop::Hop;
use crate::orchestrate;
use crate::section::{EndpointRole, GatewayField, TraceForm, TraceOutcome};
use crate::status::TraceType;

pub const MISSING_ENDPOINTS: &str =
    "Source IP, Destination IP, Source DG, and Destination DG are required.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinedField {
    SourceIp,
    DestinationIp,
    SourceGateway,
    DestinationGateway,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombinedForm {
    pub source_ip: String,
    pub destination_ip: String,
    pub source_gateway: GatewayField,
    pub destination_gateway: GatewayField,
}

/// Both addresses with their gateways, trimmed and known non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPair {
    pub source_ip: String,
    pub destination_ip: String,
    pub source_gateway: String,
    pub destination_gateway: String,
}

impl EndpointPair {
    pub fn route_query(&self, vrf: Option<String>) -> RouteTraceQuery {
        RouteTraceQuery {
            source_ip: self.source_ip.clone(),
            destination_ip: self.destination_ip.clone(),
            source_dg: Some(self.source_gateway.clone()),
            destination_dg: Some(self.destination_gateway.clone()),
            vrf,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CombinedTrace {
    pub main_route: Vec<Hop>,
    /// `None` when that MAC leg failed.
    pub source_mac: Option<Vec<Hop>>,
    pub destination_mac: Option<Vec<Hop>>,
}

impl CombinedForm {
    pub(crate) fn apply_endpoint(&mut self, field: CombinedField, value: String) {
        match field {
            CombinedField::SourceIp => {
                self.source_ip = value;
                self.source_gateway.discard();
            }
            CombinedField::DestinationIp => {
                self.destination_ip = value;
                self.destination_gateway.discard();
            }
            CombinedField::SourceGateway => self.source_gateway.edit(value),
            CombinedField::DestinationGateway => self.destination_gateway.edit(value),
        }
    }

    pub(crate) fn endpoint_gateway(&self, role: EndpointRole) -> Option<&GatewayField> {
        match role {
            EndpointRole::Source => Some(&self.source_gateway),
            EndpointRole::Destination => Some(&self.destination_gateway),
            EndpointRole::Endpoint => None,
        }
    }

    pub(crate) fn endpoint_gateway_mut(&mut self, role: EndpointRole) -> Option<&mut GatewayField> {
        match role {
            EndpointRole::Source => Some(&mut self.source_gateway),
            EndpointRole::Destination => Some(&mut self.destination_gateway),
            EndpointRole::Endpoint => None,
        }
    }

    pub(crate) fn endpoint_ip(&self, role: EndpointRole) -> Option<&str> {
        match role {
            EndpointRole::Source => Some(&self.source_ip),
            EndpointRole::Destination => Some(&self.destination_ip),
            EndpointRole::Endpoint => None,
        }
    }

    pub fn endpoints(&self) -> Option<EndpointPair> {
        let pair = EndpointPair {
            source_ip: self.source_ip.trim().to_string(),
            destination_ip: self.destination_ip.trim().to_string(),
            source_gateway: self.source_gateway.trimmed().to_string(),
            destination_gateway: self.destination_gateway.trimmed().to_string(),
        };
        let complete = [
            &pair.source_ip,
            &pair.destination_ip,
            &pair.source_gateway,
            &pair.destination_gateway,
        ]
        .iter()
        .all(|value| !value.is_empty());
        complete.then_some(pair)
    }
}

pub(crate) const ENDPOINT_ROLES: &[EndpointRole] =
    &[EndpointRole::Source, EndpointRole::Destination];

#[async_trait(?Send)]
impl TraceForm for CombinedForm {
    type Field = CombinedField;
    type Request = EndpointPair;
    type Output = CombinedTrace;

    const KIND: TraceType = TraceType::Combined;

    fn apply(&mut self, field: CombinedField, value: String) {
        self.apply_endpoint(field, value);
    }

    fn gateway(&self, role: EndpointRole) -> Option<&GatewayField> {
        self.endpoint_gateway(role)
    }

    fn gateway_mut(&mut self, role: EndpointRole) -> Option<&mut GatewayField> {
        self.endpoint_gateway_mut(role)
    }

    fn ip(&self, role: EndpointRole) -> Option<&str> {
        self.endpoint_ip(role)
    }

    fn roles() -> &'static [EndpointRole] {
        ENDPOINT_ROLES
    }

    fn request(&self) -> Result<EndpointPair, String> {
        self.endpoints().ok_or_else(|| MISSING_ENDPOINTS.to_string())
    }

    async fn execute(api: &dyn TraceApi, request: &EndpointPair) -> TraceOutcome<CombinedTrace> {
        orchestrate::run_combined_trace(api, request).await
    }
}
