//! Session Establishment Request message — establishes a new PFCP session
//! with its initial set of PDRs, FARs and QERs.

use crate::error::UpfError;
use crate::ie::create_far::CreateFar;
use crate::ie::create_pdr::CreatePdr;
use crate::ie::create_qer::CreateQer;
use crate::ie::fseid::Fseid;
use crate::ie::node_id::NodeId;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::MsgType;
use crate::types::SequenceNumber;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEstablishmentRequest {
    pub header: Header,
    pub node_id: NodeId,
    pub fseid: Fseid,
    pub create_pdrs: Vec<CreatePdr>,
    pub create_fars: Vec<CreateFar>,
    pub create_qers: Vec<CreateQer>,
}

impl SessionEstablishmentRequest {
    pub fn new(
        sequence_number: impl Into<SequenceNumber>,
        node_id: NodeId,
        fseid: Fseid,
        create_pdrs: Vec<CreatePdr>,
        create_fars: Vec<CreateFar>,
        create_qers: Vec<CreateQer>,
    ) -> Self {
        let mut header =
            Header::new(MsgType::SessionEstablishmentRequest, true, 0u64, sequence_number);
        let mut length = header.len() - 4;
        length += node_id.to_ie().len() as u16;
        length += fseid.to_ie().len() as u16;
        for pdr in &create_pdrs {
            length += pdr.to_ie().len() as u16;
        }
        for far in &create_fars {
            length += far.to_ie().len() as u16;
        }
        for qer in &create_qers {
            length += qer.to_ie().len() as u16;
        }
        header.length = length;
        SessionEstablishmentRequest {
            header,
            node_id,
            fseid,
            create_pdrs,
            create_fars,
            create_qers,
        }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.header.marshal_into(&mut buf);
        self.node_id.to_ie().marshal_into(&mut buf);
        self.fseid.to_ie().marshal_into(&mut buf);
        for pdr in &self.create_pdrs {
            pdr.to_ie().marshal_into(&mut buf);
        }
        for far in &self.create_fars {
            far.to_ie().marshal_into(&mut buf);
        }
        for qer in &self.create_qers {
            qer.to_ie().marshal_into(&mut buf);
        }
        buf
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        let header = Header::unmarshal(data)?;
        let body = &data[header.len() as usize..];

        let mut node_id = None;
        let mut fseid = None;
        let mut create_pdrs = Vec::new();
        let mut create_fars = Vec::new();
        let mut create_qers = Vec::new();

        for ie in Ie::iter_all(body) {
            let ie = ie?;
            match ie.ie_type {
                IeType::NodeId => node_id = Some(NodeId::unmarshal(&ie.payload)?),
                IeType::Fseid => fseid = Some(Fseid::unmarshal(&ie.payload)?),
                IeType::CreatePdr => create_pdrs.push(CreatePdr::unmarshal(&ie.payload)?),
                IeType::CreateFar => create_fars.push(CreateFar::unmarshal(&ie.payload)?),
                IeType::CreateQer => create_qers.push(CreateQer::unmarshal(&ie.payload)?),
                _ => (),
            }
        }

        Ok(SessionEstablishmentRequest {
            header,
            node_id: node_id.ok_or(UpfError::MissingMandatoryIe("Node ID"))?,
            fseid: fseid.ok_or(UpfError::MissingMandatoryIe("F-SEID"))?,
            create_pdrs,
            create_fars,
            create_qers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::destination_interface::{DestinationInterface, Interface};
    use crate::ie::forwarding_parameters::ForwardingParameters;
    use crate::ie::pdi::Pdi;
    use crate::ie::pdr_id::PdrId;
    use crate::ie::precedence::Precedence;
    use crate::ie::source_interface::{SourceInterface, SourceInterfaceValue};
    use crate::types::Seid;
    use std::net::Ipv4Addr;

    #[test]
    fn roundtrip_minimal() {
        let req = SessionEstablishmentRequest::new(
            1u32,
            NodeId::new_ipv4(Ipv4Addr::new(10, 0, 0, 2)),
            Fseid::new(Seid::new(0xA1B2_C3D4), Some(Ipv4Addr::new(10, 0, 0, 2)), None),
            vec![],
            vec![],
            vec![],
        );
        let bytes = req.marshal();
        let decoded = SessionEstablishmentRequest::unmarshal(&bytes).unwrap();
        assert_eq!(decoded.fseid, req.fseid);
        assert_eq!(decoded.header.seid.value(), 0);
        assert!(decoded.header.has_seid);
    }

    #[test]
    fn roundtrip_with_rules() {
        let pdi = Pdi::new(SourceInterface::new(SourceInterfaceValue::Access), None);
        let pdr = CreatePdr::new(PdrId::new(1), Precedence::new(100), pdi, Some(crate::ie::far_id::FarId::new(1)), None);
        let fp = ForwardingParameters::new(DestinationInterface::new(Interface::Core), None);
        let far = CreateFar::new(crate::ie::far_id::FarId::new(1), crate::ie::apply_action::ApplyAction::FORW, Some(fp));

        let req = SessionEstablishmentRequest::new(
            2u32,
            NodeId::new_ipv4(Ipv4Addr::new(10, 0, 0, 2)),
            Fseid::new(Seid::new(1), Some(Ipv4Addr::new(10, 0, 0, 2)), None),
            vec![pdr],
            vec![far],
            vec![],
        );
        let decoded = SessionEstablishmentRequest::unmarshal(&req.marshal()).unwrap();
        assert_eq!(decoded.create_pdrs.len(), 1);
        assert_eq!(decoded.create_fars.len(), 1);
    }

    #[test]
    fn missing_fseid_errors() {
        let header = Header::new(MsgType::SessionEstablishmentRequest, true, 0u64, 1u32);
        let mut bytes = header.marshal();
        NodeId::new_ipv4(Ipv4Addr::new(10, 0, 0, 2))
            .to_ie()
            .marshal_into(&mut bytes);
        assert!(SessionEstablishmentRequest::unmarshal(&bytes).is_err());
    }
}
