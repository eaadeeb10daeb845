//! Direct trace: routed path between two gateways, optionally in a VRF.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::TraceApi;
use crate::combined::{CombinedField, CombinedForm, EndpointPair, ENDPOINT_ROLES, MISSING_ENDPOINTS};
use crate::hop::Hop;
use crate::orchestrate;
use crate::section::{EndpointRole, GatewayField, TraceForm, TraceOutcome};
use crate::status::TraceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectField {
    SourceIp,
    DestinationIp,
    SourceGateway,
    DestinationGateway,
    Vrf,
}

impl DirectField {
    fn endpoint(self) -> Option<CombinedField> {
        match self {
            DirectField::SourceIp => Some(CombinedField::SourceIp),
            DirectField::DestinationIp => Some(CombinedField::DestinationIp),
            DirectField::SourceGateway => Some(CombinedField::SourceGateway),
            DirectField::DestinationGateway => Some(CombinedField::DestinationGateway),
            DirectField::Vrf => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectForm {
    #[serde(flatten)]
    pub endpoints: CombinedForm,
    pub vrf: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectRequest {
    pub endpoints: EndpointPair,
    pub vrf: Option<String>,
}

#[async_trait(?Send)]
impl TraceForm for DirectForm {
    type Field = DirectField;
    type Request = DirectRequest;
    type Output = Vec<Hop>;

    const KIND: TraceType = TraceType::Direct;

    fn apply(&mut self, field: DirectField, value: String) {
        match field.endpoint() {
            Some(endpoint) => self.endpoints.apply_endpoint(endpoint, value),
            None => self.vrf = value,
        }
    }

    fn gateway(&self, role: EndpointRole) -> Option<&GatewayField> {
        self.endpoints.endpoint_gateway(role)
    }

    fn gateway_mut(&mut self, role: EndpointRole) -> Option<&mut GatewayField> {
        self.endpoints.endpoint_gateway_mut(role)
    }

    fn ip(&self, role: EndpointRole) -> Option<&str> {
        self.endpoints.endpoint_ip(role)
    }

    fn roles() -> &'static [EndpointRole] {
        ENDPOINT_ROLES
    }

    fn request(&self) -> Result<DirectRequest, String> {
        let endpoints = self
            .endpoints
            .endpoints()
            .ok_or_else(|| MISSING_ENDPOINTS.to_string())?;
        let vrf = Some(self.vrf.trim())
            .filter(|vrf| !vrf.is_empty())
            .map(str::to_string);
        Ok(DirectRequest { endpoints, vrf })
    }

    async fn execute(api: &dyn TraceApi, request: &DirectRequest) -> TraceOutcome<Vec<Hop>> {
        orchestrate::run_direct_trace(api, request).await
    }
}
