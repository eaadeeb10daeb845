//! The ordered, bounded collection of sections behind one trace page.
//!
//! Every operation is a synchronous reducer. Network work happens between a
//! `begin_*` call, which validates and marks the section `loading`, and the
//! matching `finish_*` call, which applies the settlement.

use tracing::debug;

use crate::error::{ApiError, TraceError};
use crate::section::{EndpointRole, Section, SectionError, SectionId, TraceForm, TraceOutcome};
use crate::status::TraceStatus;

pub const MISSING_IP: &str = "IP address is required.";
pub const NO_GATEWAY_FOUND: &str = "No gateway found by backend.";

/// A gateway lookup handed out by [`TraceBoard::begin_gateway_fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayLookup {
    pub section_id: SectionId,
    pub role: EndpointRole,
    pub ip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceBoard<F: TraceForm> {
    sections: Vec<Section<F>>,
}

impl<F: TraceForm> Default for TraceBoard<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: TraceForm> TraceBoard<F> {
    pub fn new() -> Self {
        Self {
            sections: vec![Section::new()],
        }
    }

    pub fn sections(&self) -> &[Section<F>] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false; a board keeps at least one section.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn can_add(&self) -> bool {
        self.sections.len() < F::MAX_SECTIONS
    }

    pub fn can_remove(&self) -> bool {
        self.sections.len() > 1
    }

    pub fn get(&self, id: SectionId) -> Option<&Section<F>> {
        self.sections.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: SectionId) -> Result<&mut Section<F>, TraceError> {
        self.sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(TraceError::UnknownSection(id))
    }

    /// Appends a fresh section unless the board is full.
    pub fn add_section(&mut self) -> Option<SectionId> {
        if !self.can_add() {
            debug!(kind = F::KIND.as_str(), max = F::MAX_SECTIONS, "Section limit reached");
            return None;
        }
        let section = Section::new();
        let id = section.id;
        self.sections.push(section);
        Some(id)
    }

    /// Removes a section unless it is the last one.
    pub fn remove_section(&mut self, id: SectionId) -> bool {
        if !self.can_remove() {
            debug!(kind = F::KIND.as_str(), "Refusing to remove the last section");
            return false;
        }
        let before = self.sections.len();
        self.sections.retain(|s| s.id != id);
        before != self.sections.len()
    }

    pub fn reset(&mut self) {
        self.sections = vec![Section::new()];
    }

    pub fn update_field(
        &mut self,
        id: SectionId,
        field: F::Field,
        value: impl Into<String>,
    ) -> Result<(), TraceError> {
        self.get_mut(id)?.update_field(field, value.into());
        Ok(())
    }

    pub fn clear_error(&mut self, id: SectionId) {
        if let Ok(section) = self.get_mut(id) {
            section.error = None;
        }
    }

    /// Validates and marks a gateway lookup as started.
    ///
    /// An empty IP is recorded as a missing-input error on the section and
    /// no lookup is handed out.
    pub fn begin_gateway_fetch(
        &mut self,
        id: SectionId,
        role: EndpointRole,
    ) -> Result<GatewayLookup, TraceError> {
        let section = self.get_mut(id)?;
        let ip = section
            .form
            .ip(role)
            .ok_or(TraceError::UnsupportedRole(role))?
            .trim()
            .to_string();

        if ip.is_empty() {
            section.error = Some(SectionError::missing_input(MISSING_IP));
            return Err(TraceError::MissingInput(MISSING_IP.to_string()));
        }

        section
            .form
            .gateway_mut(role)
            .ok_or(TraceError::UnsupportedRole(role))?
            .begin_fetch()?;
        section.error = None;

        Ok(GatewayLookup {
            section_id: id,
            role,
            ip,
        })
    }

    /// Applies a gateway lookup result. Returns false when the section is
    /// gone.
    pub fn finish_gateway_fetch(
        &mut self,
        lookup: &GatewayLookup,
        result: Result<String, ApiError>,
    ) -> bool {
        let Ok(section) = self.get_mut(lookup.section_id) else {
            debug!(section = %lookup.section_id, "Dropping gateway result for removed section");
            return false;
        };
        let Some(gateway) = section.form.gateway_mut(lookup.role) else {
            return false;
        };

        let detail = match result {
            Ok(value) if !value.trim().is_empty() => {
                gateway.resolve(value.trim().to_string());
                return true;
            }
            Ok(_) => NO_GATEWAY_FOUND.to_string(),
            Err(error) => error.to_string(),
        };

        gateway.fail();
        section.error = Some(SectionError::gateway_fetch(lookup.role, detail));
        true
    }

    /// Validates the section and marks its trace as started.
    pub fn begin_trace(&mut self, id: SectionId) -> Result<F::Request, TraceError> {
        let section = self.get_mut(id)?;
        if section.is_busy() {
            debug!(section = %id, "Trace rejected while section is busy");
            return Err(TraceError::Busy);
        }

        let request = match section.form.request() {
            Ok(request) => request,
            Err(message) => {
                section.error = Some(SectionError::missing_input(message.clone()));
                return Err(TraceError::MissingInput(message));
            }
        };

        section.trace_status = TraceStatus::Loading;
        section.result = None;
        section.error = None;
        Ok(request)
    }

    /// Applies a trace settlement. Returns false when the section is gone.
    pub fn finish_trace(&mut self, id: SectionId, outcome: TraceOutcome<F::Output>) -> bool {
        match self.get_mut(id) {
            Ok(section) => {
                section.apply_outcome(outcome);
                true
            }
            Err(_) => {
                debug!(section = %id, "Dropping trace result for removed section");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hop::Hop;
    use crate::mac::{MacField, MacForm};
    use crate::status::GatewayStatus;

    fn board_with_ip(ip: &str) -> (TraceBoard<MacForm>, SectionId) {
        let mut board = TraceBoard::<MacForm>::new();
        let id = board.sections()[0].id;
        board.update_field(id, MacField::Ip, ip).unwrap();
        (board, id)
    }

    #[test]
    fn empty_ip_is_rejected_without_lookup() {
        let (mut board, id) = board_with_ip("  ");
        let err = board.begin_gateway_fetch(id, EndpointRole::Endpoint).unwrap_err();
        assert_eq!(err, TraceError::MissingInput(MISSING_IP.to_string()));
        let section = board.get(id).unwrap();
        assert_eq!(section.form.gateway.status, GatewayStatus::Idle);
        assert_eq!(section.error, Some(SectionError::missing_input(MISSING_IP)));
    }

    #[test]
    fn unsupported_role_is_rejected() {
        let (mut board, id) = board_with_ip("10.0.0.5");
        assert_eq!(
            board.begin_gateway_fetch(id, EndpointRole::Source),
            Err(TraceError::UnsupportedRole(EndpointRole::Source))
        );
    }

    #[test]
    fn gateway_fetch_clears_error_and_resolves() {
        let (mut board, id) = board_with_ip("10.0.0.5");
        board.begin_trace(id).unwrap_err();
        assert!(board.get(id).unwrap().error.is_some());

        let lookup = board.begin_gateway_fetch(id, EndpointRole::Endpoint).unwrap();
        assert_eq!(lookup.ip, "10.0.0.5");
        assert_eq!(board.get(id).unwrap().error, None);
        assert_eq!(
            board.begin_gateway_fetch(id, EndpointRole::Endpoint),
            Err(TraceError::Busy)
        );

        assert!(board.finish_gateway_fetch(&lookup, Ok("10.0.0.1".into())));
        let gateway = &board.get(id).unwrap().form.gateway;
        assert_eq!(gateway.value, "10.0.0.1");
        assert_eq!(gateway.status, GatewayStatus::Succeeded);
    }

    #[test]
    fn failed_or_blank_lookup_keeps_value_and_reports_role() {
        let (mut board, id) = board_with_ip("10.0.0.5");
        let lookup = board.begin_gateway_fetch(id, EndpointRole::Endpoint).unwrap();
        board.finish_gateway_fetch(&lookup, Ok("  ".into()));
        let section = board.get(id).unwrap();
        assert_eq!(section.form.gateway.status, GatewayStatus::Failed);
        assert_eq!(section.form.gateway.value, "");
        assert_eq!(
            section.error.as_ref().unwrap().message,
            "Gateway Fetch Error (endpoint): No gateway found by backend."
        );
    }

    #[test]
    fn trace_is_rejected_while_gateway_loading() {
        let (mut board, id) = board_with_ip("10.0.0.5");
        board.begin_gateway_fetch(id, EndpointRole::Endpoint).unwrap();
        board
            .update_field(id, MacField::Gateway, "10.0.0.1")
            .unwrap();
        assert_eq!(board.begin_trace(id), Err(TraceError::Busy));
    }

    #[test]
    fn collection_bounds_hold() {
        let mut board = TraceBoard::<MacForm>::new();
        let only = board.sections()[0].id;
        assert!(!board.remove_section(only));
        assert_eq!(board.len(), 1);

        while board.add_section().is_some() {}
        assert_eq!(board.len(), MacForm::MAX_SECTIONS);
        assert_eq!(board.add_section(), None);
        assert_eq!(board.len(), MacForm::MAX_SECTIONS);

        board.reset();
        assert_eq!(board.len(), 1);
        assert_ne!(board.sections()[0].id, only);
    }

    #[test]
    fn settlement_for_removed_section_is_dropped() {
        let mut board = TraceBoard::<MacForm>::new();
        let first = board.sections()[0].id;
        let second = board.add_section().unwrap();
        board.update_field(second, MacField::Ip, "10.0.0.5").unwrap();
        board.update_field(second, MacField::Gateway, "10.0.0.1").unwrap();
        board.begin_trace(second).unwrap();
        assert!(board.remove_section(second));

        let applied = board.finish_trace(second, TraceOutcome::<Vec<Hop>>::succeeded(vec![]));
        assert!(!applied);
        assert_eq!(board.len(), 1);
        assert_eq!(board.sections()[0].id, first);
    }
}
