//! MAC trace: layer-2 path between an endpoint and its gateway.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::TraceApi;
use crate::hop::Hop;
use crate::orchestrate;
use crate::section::{EndpointRole, GatewayField, TraceForm, TraceOutcome};
use crate::status::TraceType;

pub const MISSING_ENDPOINT: &str = "Endpoint IP and Default Gateway are required.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacField {
    Ip,
    Gateway,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MacForm {
    pub ip: String,
    pub gateway: GatewayField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacRequest {
    pub ip: String,
    pub gateway: String,
}

#[async_trait(?Send)]
impl TraceForm for MacForm {
    type Field = MacField;
    type Request = MacRequest;
    type Output = Vec<Hop>;

    const KIND: TraceType = TraceType::Mac;

    fn apply(&mut self, field: MacField, value: String) {
        match field {
            MacField::Ip => {
                self.ip = value;
                self.gateway.discard();
            }
            MacField::Gateway => self.gateway.edit(value),
        }
    }

    fn gateway(&self, role: EndpointRole) -> Option<&GatewayField> {
        (role == EndpointRole::Endpoint).then_some(&self.gateway)
    }

    fn gateway_mut(&mut self, role: EndpointRole) -> Option<&mut GatewayField> {
        (role == EndpointRole::Endpoint).then_some(&mut self.gateway)
    }

    fn ip(&self, role: EndpointRole) -> Option<&str> {
        (role == EndpointRole::Endpoint).then_some(self.ip.as_str())
    }

    fn roles() -> &'static [EndpointRole] {
        &[EndpointRole::Endpoint]
    }

    fn request(&self) -> Result<MacRequest, String> {
        let ip = self.ip.trim();
        let gateway = self.gateway.trimmed();
        if ip.is_empty() || gateway.is_empty() {
            return Err(MISSING_ENDPOINT.to_string());
        }
        Ok(MacRequest {
            ip: ip.to_string(),
            gateway: gateway.to_string(),
        })
    }

    async fn execute(api: &dyn TraceApi, request: &MacRequest) -> TraceOutcome<Vec<Hop>> {
        orchestrate::run_mac_trace(api, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::GatewayStatus;

    #[test]
    fn only_the_endpoint_role_has_a_gateway() {
        let mut form = MacForm::default();
        assert!(form.gateway(EndpointRole::Source).is_none());
        assert!(form.gateway_mut(EndpointRole::Endpoint).is_some());
    }

    #[test]
    fn missing_gateway_is_rejected() {
        let mut form = MacForm::default();
        form.apply(MacField::Ip, "10.0.0.5".into());
        assert_eq!(form.request(), Err(MISSING_ENDPOINT.to_string()));

        form.apply(MacField::Gateway, "10.0.0.1".into());
        assert_eq!(form.gateway.status, GatewayStatus::Manual);
        assert_eq!(
            form.request(),
            Ok(MacRequest {
                ip: "10.0.0.5".into(),
                gateway: "10.0.0.1".into()
            })
        );
    }
}
