//! Association Setup Response message.

use crate::error::UpfError;
use crate::ie::cause::Cause;
use crate::ie::node_id::NodeId;
use crate::ie::recovery_time_stamp::RecoveryTimeStamp;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::MsgType;
use crate::types::SequenceNumber;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationSetupResponse {
    pub header: Header,
    pub node_id: NodeId,
    pub cause: Cause,
    pub recovery_time_stamp: Option<RecoveryTimeStamp>,
}

impl AssociationSetupResponse {
    pub fn new(
        sequence_number: impl Into<SequenceNumber>,
        node_id: NodeId,
        cause: Cause,
        recovery_time_stamp: Option<RecoveryTimeStamp>,
    ) -> Self {
        let mut header = Header::new(MsgType::AssociationSetupResponse, false, 0u64, sequence_number);
        header.length = header.len() - 4 + node_id.to_ie().len() as u16 + cause.to_ie().len() as u16;
        if let Some(rts) = &recovery_time_stamp {
            header.length += rts.to_ie().len() as u16;
        }
        AssociationSetupResponse {
            header,
            node_id,
            cause,
            recovery_time_stamp,
        }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.header.marshal_into(&mut buf);
        self.node_id.to_ie().marshal_into(&mut buf);
        self.cause.to_ie().marshal_into(&mut buf);
        if let Some(rts) = &self.recovery_time_stamp {
            rts.to_ie().marshal_into(&mut buf);
        }
        buf
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        let header = Header::unmarshal(data)?;
        let body = &data[header.len() as usize..];

        let mut node_id = None;
        let mut cause = None;
        let mut recovery_time_stamp = None;
        for ie in Ie::iter_all(body) {
            let ie = ie?;
            match ie.ie_type {
                IeType::NodeId => node_id = Some(NodeId::unmarshal(&ie.payload)?),
                IeType::Cause => cause = Some(Cause::unmarshal(&ie.payload)?),
                IeType::RecoveryTimeStamp => {
                    recovery_time_stamp = Some(RecoveryTimeStamp::unmarshal(&ie.payload)?)
                }
                _ => (),
            }
        }

        Ok(AssociationSetupResponse {
            header,
            node_id: node_id.ok_or(UpfError::MissingMandatoryIe("Node ID"))?,
            cause: cause.ok_or(UpfError::MissingMandatoryIe("Cause"))?,
            recovery_time_stamp,
        })
    }
}
