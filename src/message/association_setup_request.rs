//! Association Setup Request message.

use crate::error::UpfError;
use crate::ie::node_id::NodeId;
use crate::ie::recovery_time_stamp::RecoveryTimeStamp;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::MsgType;
use crate::types::SequenceNumber;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationSetupRequest {
    pub header: Header,
    pub node_id: NodeId,
    pub recovery_time_stamp: RecoveryTimeStamp,
}

impl AssociationSetupRequest {
    pub fn new(
        sequence_number: impl Into<SequenceNumber>,
        node_id: NodeId,
        recovery_time_stamp: RecoveryTimeStamp,
    ) -> Self {
        let mut header = Header::new(MsgType::AssociationSetupRequest, false, 0u64, sequence_number);
        header.length =
            header.len() - 4 + node_id.to_ie().len() as u16 + recovery_time_stamp.to_ie().len() as u16;
        AssociationSetupRequest {
            header,
            node_id,
            recovery_time_stamp,
        }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.header.marshal_into(&mut buf);
        self.node_id.to_ie().marshal_into(&mut buf);
        self.recovery_time_stamp.to_ie().marshal_into(&mut buf);
        buf
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        let header = Header::unmarshal(data)?;
        let body = &data[header.len() as usize..];

        let mut node_id = None;
        let mut recovery_time_stamp = None;
        for ie in Ie::iter_all(body) {
            let ie = ie?;
            match ie.ie_type {
                IeType::NodeId => node_id = Some(NodeId::unmarshal(&ie.payload)?),
                IeType::RecoveryTimeStamp => {
                    recovery_time_stamp = Some(RecoveryTimeStamp::unmarshal(&ie.payload)?)
                }
                _ => (),
            }
        }

        Ok(AssociationSetupRequest {
            header,
            node_id: node_id.ok_or(UpfError::MissingMandatoryIe("Node ID"))?,
            recovery_time_stamp: recovery_time_stamp
                .ok_or(UpfError::MissingMandatoryIe("Recovery Time Stamp"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::time::SystemTime;

    #[test]
    fn roundtrip() {
        let req = AssociationSetupRequest::new(
            1u32,
            NodeId::new_ipv4(Ipv4Addr::new(10, 0, 0, 2)),
            RecoveryTimeStamp::new(SystemTime::now()),
        );
        let bytes = req.marshal();
        let decoded = AssociationSetupRequest::unmarshal(&bytes).unwrap();
        assert_eq!(decoded.node_id, req.node_id);
    }

    #[test]
    fn missing_node_id_errors() {
        let header = Header::new(MsgType::AssociationSetupRequest, false, 0u64, 1u32);
        let mut bytes = header.marshal();
        RecoveryTimeStamp::new(SystemTime::now())
            .to_ie()
            .marshal_into(&mut bytes);
        assert!(AssociationSetupRequest::unmarshal(&bytes).is_err());
    }
}
