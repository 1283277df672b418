//! Association Release Response message.

use crate::error::UpfError;
use crate::ie::cause::Cause;
use crate::ie::node_id::NodeId;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::MsgType;
use crate::types::SequenceNumber;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationReleaseResponse {
    pub header: Header,
    pub node_id: NodeId,
    pub cause: Cause,
}

impl AssociationReleaseResponse {
    pub fn new(sequence_number: impl Into<SequenceNumber>, node_id: NodeId, cause: Cause) -> Self {
        let mut header = Header::new(MsgType::AssociationReleaseResponse, false, 0u64, sequence_number);
        header.length = header.len() - 4 + node_id.to_ie().len() as u16 + cause.to_ie().len() as u16;
        AssociationReleaseResponse {
            header,
            node_id,
            cause,
        }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.header.marshal_into(&mut buf);
        self.node_id.to_ie().marshal_into(&mut buf);
        self.cause.to_ie().marshal_into(&mut buf);
        buf
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        let header = Header::unmarshal(data)?;
        let body = &data[header.len() as usize..];

        let mut node_id = None;
        let mut cause = None;
        for ie in Ie::iter_all(body) {
            let ie = ie?;
            match ie.ie_type {
                IeType::NodeId => node_id = Some(NodeId::unmarshal(&ie.payload)?),
                IeType::Cause => cause = Some(Cause::unmarshal(&ie.payload)?),
                _ => (),
            }
        }

        Ok(AssociationReleaseResponse {
            header,
            node_id: node_id.ok_or(UpfError::MissingMandatoryIe("Node ID"))?,
            cause: cause.ok_or(UpfError::MissingMandatoryIe("Cause"))?,
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
        let resp = AssociationReleaseResponse::new(
            1u32,
            NodeId::new_ipv4(Ipv4Addr::new(10, 0, 0, 2)),
            Cause::new(CauseValue::RequestAccepted),
        );
        let bytes = resp.marshal();
        let decoded = AssociationReleaseResponse::unmarshal(&bytes).unwrap();
        assert_eq!(decoded.cause.value, CauseValue::RequestAccepted);
    }

    #[test]
    fn missing_cause_errors() {
        let header = Header::new(MsgType::AssociationReleaseResponse, false, 0u64, 1u32);
        let mut bytes = header.marshal();
        NodeId::new_ipv4(Ipv4Addr::new(10, 0, 0, 2))
            .to_ie()
            .marshal_into(&mut bytes);
        assert!(AssociationReleaseResponse::unmarshal(&bytes).is_err());
    }
}
