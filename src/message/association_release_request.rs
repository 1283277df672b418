//! Association Release Request message.

use crate::error::UpfError;
use crate::ie::node_id::NodeId;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::MsgType;
use crate::types::SequenceNumber;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationReleaseRequest {
    pub header: Header,
    pub node_id: NodeId,
}

impl AssociationReleaseRequest {
    pub fn new(sequence_number: impl Into<SequenceNumber>, node_id: NodeId) -> Self {
        let mut header = Header::new(MsgType::AssociationReleaseRequest, false, 0u64, sequence_number);
        header.length = header.len() - 4 + node_id.to_ie().len() as u16;
        AssociationReleaseRequest { header, node_id }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.header.marshal_into(&mut buf);
        self.node_id.to_ie().marshal_into(&mut buf);
        buf
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        let header = Header::unmarshal(data)?;
        let body = &data[header.len() as usize..];

        let mut node_id = None;
        for ie in Ie::iter_all(body) {
            let ie = ie?;
            if ie.ie_type == IeType::NodeId {
                node_id = Some(NodeId::unmarshal(&ie.payload)?);
            }
        }

        Ok(AssociationReleaseRequest {
            header,
            node_id: node_id.ok_or(UpfError::MissingMandatoryIe("Node ID"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn roundtrip() {
        let req = AssociationReleaseRequest::new(1u32, NodeId::new_ipv4(Ipv4Addr::new(10, 0, 0, 2)));
        let bytes = req.marshal();
        let decoded = AssociationReleaseRequest::unmarshal(&bytes).unwrap();
        assert_eq!(decoded.node_id, req.node_id);
    }

    #[test]
    fn missing_node_id_errors() {
        let header = Header::new(MsgType::AssociationReleaseRequest, false, 0u64, 1u32);
        let bytes = header.marshal();
        assert!(AssociationReleaseRequest::unmarshal(&bytes).is_err());
    }
}
