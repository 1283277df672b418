//! PFCP control-channel handler (§4.3): a single-threaded state machine
//! that dispatches decoded requests against the session store and encodes
//! the matching response. One `PfcpHandler` is shared (not cloned) across
//! the single PFCP reader thread described in §5.

use crate::error::UpfError;
use crate::ie::cause::{Cause, CauseValue};
use crate::ie::create_far::CreateFar;
use crate::ie::create_pdr::CreatePdr;
use crate::ie::create_qer::CreateQer;
use crate::ie::destination_interface::Interface as WireDestInterface;
use crate::ie::fseid::Fseid;
use crate::ie::gate_status::GateStatusValue;
use crate::ie::mbr::Mbr;
use crate::ie::node_id::NodeId;
use crate::ie::outer_header_creation::OuterHeaderCreation as WireOuterHeaderCreation;
use crate::ie::recovery_time_stamp::RecoveryTimeStamp;
use crate::ie::source_interface::SourceInterfaceValue;
use crate::message::association_release_request::AssociationReleaseRequest;
use crate::message::association_release_response::AssociationReleaseResponse;
use crate::message::association_setup_request::AssociationSetupRequest;
use crate::message::association_setup_response::AssociationSetupResponse;
use crate::message::header::Header;
use crate::message::heartbeat_request::HeartbeatRequest;
use crate::message::heartbeat_response::HeartbeatResponse;
use crate::message::session_deletion_request::SessionDeletionRequest;
use crate::message::session_deletion_response::SessionDeletionResponse;
use crate::message::session_establishment_request::SessionEstablishmentRequest;
use crate::message::session_establishment_response::SessionEstablishmentResponse;
use crate::message::session_modification_request::SessionModificationRequest;
use crate::message::session_modification_response::SessionModificationResponse;
use crate::message::{peek_msg_type, MsgType};
use crate::metrics::Metrics;
use crate::session::store::SessionStore;
use crate::session::{Far, FarAction, Interface as RtInterface, OuterHeaderCreation, Pdr, Qer};
use crate::types::Seid;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, warn};

/// Default triple installed when a Session Establishment Request carries
/// no Create PDR/FAR/QER at all (§4.3 backward-compatibility default).
fn default_qer() -> Qer {
    let mut qer = Qer::new(1);
    qer.mbr_ul_bps = Some(10_000_000);
    qer.mbr_dl_bps = Some(10_000_000);
    qer
}

fn default_far() -> Far {
    Far {
        far_id: 1,
        action: FarAction::Forward,
        destination_interface: RtInterface::Core,
        outer_header_creation: None,
    }
}

fn default_pdr() -> Pdr {
    Pdr {
        rule_id: 1,
        precedence: 100,
        source_interface: RtInterface::Access,
        teid: crate::types::Teid::new(0x100),
        far_id: 1,
        qer_id: Some(1),
    }
}

fn interface_from_source(value: SourceInterfaceValue) -> RtInterface {
    match value {
        SourceInterfaceValue::Access => RtInterface::Access,
        SourceInterfaceValue::Core => RtInterface::Core,
        SourceInterfaceValue::SgiLan => RtInterface::SgiLan,
        SourceInterfaceValue::CpFunction => RtInterface::CpFunction,
        // Wire value 4, "5G VN internal" (§3) — kept distinct rather than
        // aliased to Access, or a PDR provisioned against it would start
        // matching live N3 traffic it was never meant to see.
        SourceInterfaceValue::Unknown(_) => RtInterface::VnInternal,
    }
}

fn interface_from_destination(value: WireDestInterface) -> RtInterface {
    match value {
        WireDestInterface::Access => RtInterface::Access,
        WireDestInterface::Core => RtInterface::Core,
        WireDestInterface::SgiLan => RtInterface::SgiLan,
        WireDestInterface::CpFunction => RtInterface::CpFunction,
        WireDestInterface::Unknown(_) => RtInterface::VnInternal,
    }
}

/// Apply Action flags: first set wins in DROP, FORW, BUFF order (§4.1).
fn far_action_from_apply_action(aa: crate::ie::apply_action::ApplyAction) -> FarAction {
    use crate::ie::apply_action::ApplyAction;
    if aa.contains(ApplyAction::DROP) {
        FarAction::Drop
    } else if aa.contains(ApplyAction::FORW) {
        FarAction::Forward
    } else if aa.contains(ApplyAction::BUFF) {
        FarAction::Buffer
    } else {
        FarAction::Drop
    }
}

/// IPv6 outer header creation has no counterpart in the runtime model
/// (IPv6 user plane is a Non-goal); such a FAR installs without
/// encapsulation, which the pipeline then treats as a drop on Forward.
fn outer_header_from_wire(ohc: &WireOuterHeaderCreation) -> Option<OuterHeaderCreation> {
    match ohc {
        WireOuterHeaderCreation::GtpuIpv4 { teid, address } => Some(OuterHeaderCreation {
            teid: crate::types::Teid::new(*teid),
            ipv4: *address,
        }),
        WireOuterHeaderCreation::GtpuIpv6 { .. } => None,
    }
}

fn pdr_from_wire(p: &CreatePdr) -> Pdr {
    Pdr {
        rule_id: p.pdr_id.value,
        precedence: p.precedence.value,
        source_interface: interface_from_source(p.pdi.source_interface.value),
        teid: p
            .pdi
            .f_teid
            .map(|f| crate::types::Teid::new(f.teid))
            .unwrap_or(crate::types::Teid::new(0)),
        far_id: p.far_id.map(|f| f.value as u16).unwrap_or(0),
        qer_id: p.qer_id.map(|q| q.value as u16),
    }
}

fn far_from_wire(f: &CreateFar) -> Far {
    let (destination_interface, outer_header_creation) = match &f.forwarding_parameters {
        Some(fp) => (
            interface_from_destination(fp.destination_interface.interface),
            fp.outer_header_creation
                .as_ref()
                .and_then(outer_header_from_wire),
        ),
        None => (RtInterface::Core, None),
    };
    Far {
        far_id: f.far_id.value as u16,
        action: far_action_from_apply_action(f.apply_action),
        destination_interface,
        outer_header_creation,
    }
}

fn qer_from_wire(q: &CreateQer) -> Qer {
    let mut qer = Qer::new(q.qer_id.value as u16);
    if let Some(qfi) = q.qfi {
        qer.qfi = qfi.value();
    }
    if let Some(gs) = q.gate_status {
        qer.gate_open_uplink = matches!(gs.uplink_gate, GateStatusValue::Open);
        qer.gate_open_downlink = matches!(gs.downlink_gate, GateStatusValue::Open);
    }
    if let Some(mbr) = q.mbr {
        qer.mbr_ul_bps = Some(mbr.uplink_bps);
        qer.mbr_dl_bps = Some(mbr.downlink_bps);
    }
    if let Some(gbr) = q.gbr {
        qer.gbr_ul_bps = Some(gbr.uplink_bps);
        qer.gbr_dl_bps = Some(gbr.downlink_bps);
    }
    qer
}

/// Process-wide control-channel state machine driving the session store.
pub struct PfcpHandler {
    store: Arc<SessionStore>,
    metrics: Arc<Metrics>,
    association_established: AtomicBool,
    start_time: SystemTime,
    local_node_id: NodeId,
}

impl PfcpHandler {
    pub fn new(store: Arc<SessionStore>, metrics: Arc<Metrics>, local_node_id: NodeId) -> Self {
        PfcpHandler {
            store,
            metrics,
            association_established: AtomicBool::new(false),
            start_time: SystemTime::now(),
            local_node_id,
        }
    }

    pub fn is_associated(&self) -> bool {
        self.association_established.load(Ordering::SeqCst)
    }

    /// Decodes and dispatches one inbound PFCP datagram. Returns the
    /// response to send back; unsupported message types are logged and
    /// silently ignored (§4.3 step 2, "Any other").
    pub fn handle(&self, data: &[u8]) -> Option<Vec<u8>> {
        let msg_type = match peek_msg_type(data) {
            Ok(t) => t,
            Err(err) => {
                warn!(%err, "malformed PFCP header");
                self.metrics.incr_pfcp_malformed();
                return None;
            }
        };

        let response = match msg_type {
            MsgType::HeartbeatRequest => self.handle_heartbeat(data),
            MsgType::AssociationSetupRequest => self.handle_association_setup(data),
            MsgType::AssociationReleaseRequest => self.handle_association_release(data),
            MsgType::SessionEstablishmentRequest => self.handle_session_establishment(data),
            MsgType::SessionModificationRequest => self.handle_session_modification(data),
            MsgType::SessionDeletionRequest => self.handle_session_deletion(data),
            other => {
                debug!(?other, "ignoring unsupported PFCP message type");
                return None;
            }
        };

        match response {
            Ok(bytes) => {
                self.metrics.incr_pfcp_handled();
                Some(bytes)
            }
            Err(err) => {
                warn!(%err, "malformed PFCP message body");
                self.metrics.incr_pfcp_malformed();
                None
            }
        }
    }

    fn handle_heartbeat(&self, data: &[u8]) -> Result<Vec<u8>, UpfError> {
        let req = HeartbeatRequest::unmarshal(data)?;
        let resp = HeartbeatResponse::new(req.sequence_number(), RecoveryTimeStamp::new(self.start_time));
        Ok(resp.marshal())
    }

    fn handle_association_setup(&self, data: &[u8]) -> Result<Vec<u8>, UpfError> {
        let req = match AssociationSetupRequest::unmarshal(data) {
            Ok(req) => req,
            Err(UpfError::MissingMandatoryIe(_)) => {
                let header = Header::unmarshal(data)?;
                return Ok(AssociationSetupResponse::new(
                    header.sequence_number,
                    self.local_node_id.clone(),
                    Cause::new(CauseValue::MandatoryIeMissing),
                    None,
                )
                .marshal());
            }
            Err(other) => return Err(other),
        };
        self.association_established.store(true, Ordering::SeqCst);
        let resp = AssociationSetupResponse::new(
            req.header.sequence_number,
            self.local_node_id.clone(),
            Cause::new(CauseValue::RequestAccepted),
            Some(RecoveryTimeStamp::new(self.start_time)),
        );
        Ok(resp.marshal())
    }

    fn handle_association_release(&self, data: &[u8]) -> Result<Vec<u8>, UpfError> {
        let req = AssociationReleaseRequest::unmarshal(data)?;
        self.association_established.store(false, Ordering::SeqCst);
        let resp = AssociationReleaseResponse::new(
            req.header.sequence_number,
            self.local_node_id.clone(),
            Cause::new(CauseValue::RequestAccepted),
        );
        Ok(resp.marshal())
    }

    fn handle_session_establishment(&self, data: &[u8]) -> Result<Vec<u8>, UpfError> {
        let req = match SessionEstablishmentRequest::unmarshal(data) {
            Ok(req) => req,
            Err(UpfError::MissingMandatoryIe(_)) => {
                let header = Header::unmarshal(data)?;
                // The CP-SEID normally comes from the missing F-SEID IE
                // itself; with no SEID to echo, respond with 0 per the
                // "unknown peer SEID" convention used elsewhere on this path.
                return Ok(SessionEstablishmentResponse::new(
                    header.sequence_number,
                    Seid::new(0),
                    self.local_node_id.clone(),
                    Cause::new(CauseValue::MandatoryIeMissing),
                    None,
                )
                .marshal());
            }
            Err(other) => return Err(other),
        };
        let seq = req.header.sequence_number;
        let cp_seid = req.fseid.seid;

        if !self.is_associated() {
            return Ok(SessionEstablishmentResponse::new(
                seq,
                cp_seid,
                self.local_node_id.clone(),
                Cause::new(CauseValue::NoEstablishedPfcpAssociation),
                None,
            )
            .marshal());
        }

        let up_seid = match self.store.create(cp_seid) {
            Ok(s) => s,
            Err(UpfError::NoResources) => {
                return Ok(SessionEstablishmentResponse::new(
                    seq,
                    cp_seid,
                    self.local_node_id.clone(),
                    Cause::new(CauseValue::NoResourcesAvailable),
                    None,
                )
                .marshal());
            }
            Err(other) => return Err(other),
        };

        let session_arc = self.store.find(up_seid).expect("just created");
        {
            let mut session = session_arc.lock().unwrap();
            if req.create_pdrs.is_empty() && req.create_fars.is_empty() && req.create_qers.is_empty() {
                session.insert_far(default_far()).ok();
                session.insert_qer(default_qer()).ok();
                session.insert_pdr(default_pdr()).ok();
            } else {
                for qer in &req.create_qers {
                    session.insert_qer(qer_from_wire(qer)).ok();
                }
                for far in &req.create_fars {
                    session.insert_far(far_from_wire(far)).ok();
                }
                for pdr in &req.create_pdrs {
                    session.insert_pdr(pdr_from_wire(pdr)).ok();
                }
            }
        }

        let up_fseid = Fseid::new(up_seid, Some(Ipv4Addr::new(10, 0, 0, 1)), None);
        Ok(SessionEstablishmentResponse::new(
            seq,
            cp_seid,
            self.local_node_id.clone(),
            Cause::new(CauseValue::RequestAccepted),
            Some(up_fseid),
        )
        .marshal())
    }

    fn handle_session_modification(&self, data: &[u8]) -> Result<Vec<u8>, UpfError> {
        let (header, req) = SessionModificationRequest::unmarshal(data)?;
        let seq = header.sequence_number;
        let up_seid = header.seid;

        let session_arc = match self.store.find(up_seid) {
            Some(s) => s,
            None => {
                return Ok(SessionModificationResponse::new(
                    seq,
                    up_seid,
                    Cause::new(CauseValue::SessionContextNotFound),
                )
                .marshal());
            }
        };

        {
            let mut session = session_arc.lock().unwrap();
            for far in &req.create_fars {
                session.insert_far(far_from_wire(far)).ok();
            }
            for pdr in &req.create_pdrs {
                session.insert_pdr(pdr_from_wire(pdr)).ok();
            }
            for uf in &req.update_fars {
                if let Some(aa) = uf.apply_action {
                    session.update_far_action(uf.far_id.value as u16, far_action_from_apply_action(aa));
                }
            }
            for up in &req.update_pdrs {
                if let Some(p) = up.precedence {
                    session.update_pdr_precedence(up.pdr_id.value, p.value);
                }
                if let Some(f) = up.far_id {
                    session.update_pdr_far(up.pdr_id.value, f.value as u16);
                }
            }
            for uq in &req.update_qers {
                let mut qer = session
                    .find_qer(uq.qer_id.value as u16)
                    .copied()
                    .unwrap_or_else(|| Qer::new(uq.qer_id.value as u16));
                if let Some(gs) = uq.gate_status {
                    qer.gate_open_uplink = matches!(gs.uplink_gate, GateStatusValue::Open);
                    qer.gate_open_downlink = matches!(gs.downlink_gate, GateStatusValue::Open);
                }
                if let Some(mbr) = uq.mbr {
                    qer.mbr_ul_bps = Some(mbr.uplink_bps);
                    qer.mbr_dl_bps = Some(mbr.downlink_bps);
                }
                if let Some(gbr) = uq.gbr {
                    qer.gbr_ul_bps = Some(gbr.uplink_bps);
                    qer.gbr_dl_bps = Some(gbr.downlink_bps);
                }
                if let Some(qfi) = uq.qfi {
                    qer.qfi = qfi.value();
                }
                session.insert_qer(qer).ok();
            }
            for rp in &req.remove_pdrs {
                session.remove_pdr(rp.pdr_id.value);
            }
            for rf in &req.remove_fars {
                session.remove_far(rf.far_id.value as u16);
            }
        }

        Ok(SessionModificationResponse::new(seq, up_seid, Cause::new(CauseValue::RequestAccepted)).marshal())
    }

    fn handle_session_deletion(&self, data: &[u8]) -> Result<Vec<u8>, UpfError> {
        let req = SessionDeletionRequest::unmarshal(data)?;
        let seq = req.header.sequence_number;
        let up_seid = req.header.seid;

        let cause = if self.store.delete(up_seid) {
            CauseValue::RequestAccepted
        } else {
            CauseValue::SessionContextNotFound
        };
        Ok(SessionDeletionResponse::new(seq, up_seid, Cause::new(cause)).marshal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::node_id::NodeId;
    use crate::message::MsgType;

    fn handler() -> PfcpHandler {
        PfcpHandler::new(
            Arc::new(SessionStore::new(4)),
            Arc::new(Metrics::new()),
            NodeId::new_ipv4(Ipv4Addr::new(10, 0, 0, 1)),
        )
    }

    #[test]
    fn heartbeat_echoes_sequence_number() {
        let h = handler();
        let req = HeartbeatRequest::new(0x000001u32, RecoveryTimeStamp::new(SystemTime::now()));
        let resp_bytes = h.handle(&req.marshal()).unwrap();
        let resp = HeartbeatResponse::unmarshal(&resp_bytes).unwrap();
        assert_eq!(resp.header.sequence_number.value(), 0x000001);
        assert_eq!(resp.header.message_type, MsgType::HeartbeatResponse);
    }

    #[test]
    fn association_setup_flips_flag_and_accepts() {
        let h = handler();
        assert!(!h.is_associated());
        let req = AssociationSetupRequest::new(
            1u32,
            NodeId::new_ipv4(Ipv4Addr::new(10, 0, 0, 2)),
            RecoveryTimeStamp::new(SystemTime::now()),
        );
        let resp_bytes = h.handle(&req.marshal()).unwrap();
        let resp = AssociationSetupResponse::unmarshal(&resp_bytes).unwrap();
        assert_eq!(resp.cause.value, CauseValue::RequestAccepted);
        assert!(h.is_associated());
    }

    #[test]
    fn establishment_without_association_is_rejected() {
        let h = handler();
        let req = SessionEstablishmentRequest::new(
            1u32,
            NodeId::new_ipv4(Ipv4Addr::new(10, 0, 0, 2)),
            Fseid::new(Seid::new(0xA1B2_C3D4), Some(Ipv4Addr::new(10, 0, 0, 2)), None),
            vec![],
            vec![],
            vec![],
        );
        let resp_bytes = h.handle(&req.marshal()).unwrap();
        let resp = SessionEstablishmentResponse::unmarshal(&resp_bytes).unwrap();
        assert_eq!(resp.cause.value, CauseValue::NoEstablishedPfcpAssociation);
    }

    #[test]
    fn establishment_default_installs_backward_compat_triple() {
        let h = handler();
        h.association_established.store(true, Ordering::SeqCst);

        let req = SessionEstablishmentRequest::new(
            2u32,
            NodeId::new_ipv4(Ipv4Addr::new(10, 0, 0, 2)),
            Fseid::new(Seid::new(0xA1B2_C3D4), Some(Ipv4Addr::new(10, 0, 0, 2)), None),
            vec![],
            vec![],
            vec![],
        );
        let resp_bytes = h.handle(&req.marshal()).unwrap();
        let resp = SessionEstablishmentResponse::unmarshal(&resp_bytes).unwrap();
        assert_eq!(resp.cause.value, CauseValue::RequestAccepted);
        let up_seid = resp.fseid.unwrap().seid;

        let session_arc = h.store.find(up_seid).unwrap();
        let session = session_arc.lock().unwrap();
        assert_eq!(session.pdrs().len(), 1);
        assert_eq!(session.fars().len(), 1);
        assert_eq!(session.qers().len(), 1);
        assert_eq!(session.pdrs()[0].rule_id, 1);
        assert_eq!(session.pdrs()[0].precedence, 100);
        assert_eq!(session.fars()[0].action, FarAction::Forward);
    }

    #[test]
    fn deletion_of_unknown_seid_reports_context_not_found() {
        let h = handler();
        let req = SessionDeletionRequest::new(1u32, 0xDEAD_BEEFu64);
        let resp_bytes = h.handle(&req.marshal()).unwrap();
        let resp = SessionDeletionResponse::unmarshal(&resp_bytes).unwrap();
        assert_eq!(resp.cause.value, CauseValue::SessionContextNotFound);
    }

    #[test]
    fn malformed_header_is_dropped_without_response() {
        let h = handler();
        assert!(h.handle(&[0u8; 2]).is_none());
        assert_eq!(h.metrics.snapshot().pfcp_malformed, 1);
    }
}
