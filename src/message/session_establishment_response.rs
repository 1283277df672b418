//! Session Establishment Response message.

use crate::error::UpfError;
use crate::ie::cause::Cause;
use crate::ie::fseid::Fseid;
use crate::ie::node_id::NodeId;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::MsgType;
use crate::types::{Seid, SequenceNumber};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEstablishmentResponse {
    pub header: Header,
    pub node_id: NodeId,
    pub cause: Cause,
    pub fseid: Option<Fseid>,
}

impl SessionEstablishmentResponse {
    pub fn new(
        sequence_number: impl Into<SequenceNumber>,
        cp_seid: impl Into<Seid>,
        node_id: NodeId,
        cause: Cause,
        fseid: Option<Fseid>,
    ) -> Self {
        let mut header = Header::new(
            MsgType::SessionEstablishmentResponse,
            true,
            cp_seid,
            sequence_number,
        );
        let mut length = header.len() - 4;
        length += node_id.to_ie().len() as u16;
        length += cause.to_ie().len() as u16;
        if let Some(f) = &fseid {
            length += f.to_ie().len() as u16;
        }
        header.length = length;
        SessionEstablishmentResponse {
            header,
            node_id,
            cause,
            fseid,
        }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.header.marshal_into(&mut buf);
        self.node_id.to_ie().marshal_into(&mut buf);
        self.cause.to_ie().marshal_into(&mut buf);
        if let Some(f) = &self.fseid {
            f.to_ie().marshal_into(&mut buf);
        }
        buf
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        let header = Header::unmarshal(data)?;
        let body = &data[header.len() as usize..];

        let mut node_id = None;
        let mut cause = None;
        let mut fseid = None;
        for ie in Ie::iter_all(body) {
            let ie = ie?;
            match ie.ie_type {
                IeType::NodeId => node_id = Some(NodeId::unmarshal(&ie.payload)?),
                IeType::Cause => cause = Some(Cause::unmarshal(&ie.payload)?),
                IeType::Fseid => fseid = Some(Fseid::unmarshal(&ie.payload)?),
                _ => (),
            }
        }

        Ok(SessionEstablishmentResponse {
            header,
            node_id: node_id.ok_or(UpfError::MissingMandatoryIe("Node ID"))?,
            cause: cause.ok_or(UpfError::MissingMandatoryIe("Cause"))?,
            fseid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::cause::CauseValue;
    use std::net::Ipv4Addr;

    #[test]
    fn roundtrip() {
        let resp = SessionEstablishmentResponse::new(
            1u32,
            0xA1B2_C3D4u64,
            NodeId::new_ipv4(Ipv4Addr::new(10, 0, 0, 2)),
            Cause::new(CauseValue::RequestAccepted),
            Some(Fseid::new(Seid::new(0x99), Some(Ipv4Addr::new(10, 0, 0, 2)), None)),
        );
        let bytes = resp.marshal();
        let decoded = SessionEstablishmentResponse::unmarshal(&bytes).unwrap();
        assert_eq!(decoded.cause.value, CauseValue::RequestAccepted);
        assert_eq!(decoded.header.seid.value(), 0xA1B2_C3D4);
        assert_eq!(decoded.fseid.unwrap().seid.value(), 0x99);
    }

    #[test]
    fn missing_cause_errors() {
        let header = Header::new(MsgType::SessionEstablishmentResponse, true, 1u64, 1u32);
        let mut bytes = header.marshal();
        NodeId::new_ipv4(Ipv4Addr::new(10, 0, 0, 2))
            .to_ie()
            .marshal_into(&mut bytes);
        assert!(SessionEstablishmentResponse::unmarshal(&bytes).is_err());
    }
}
