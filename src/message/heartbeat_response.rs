//! Heartbeat Response message — echoes the responder's Recovery Time Stamp.

use crate::error::UpfError;
use crate::ie::recovery_time_stamp::RecoveryTimeStamp;
use crate::message::header::Header;
use crate::message::MsgType;
use crate::types::SequenceNumber;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatResponse {
    pub header: Header,
    pub recovery_time_stamp: RecoveryTimeStamp,
}

impl HeartbeatResponse {
    pub fn new(sequence_number: impl Into<SequenceNumber>, recovery_time_stamp: RecoveryTimeStamp) -> Self {
        let mut header = Header::new(MsgType::HeartbeatResponse, false, 0u64, sequence_number);
        header.length = header.len() - 4 + recovery_time_stamp.to_ie().len() as u16;
        HeartbeatResponse {
            header,
            recovery_time_stamp,
        }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.header.marshal_into(&mut buf);
        self.recovery_time_stamp.to_ie().marshal_into(&mut buf);
        buf
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        let header = Header::unmarshal(data)?;
        let body = &data[header.len() as usize..];

        let mut recovery_time_stamp = None;
        for ie in crate::ie::Ie::iter_all(body) {
            let ie = ie?;
            if ie.ie_type == crate::ie::IeType::RecoveryTimeStamp {
                recovery_time_stamp = Some(RecoveryTimeStamp::unmarshal(&ie.payload)?);
            }
        }

        Ok(HeartbeatResponse {
            header,
            recovery_time_stamp: recovery_time_stamp
                .ok_or(UpfError::MissingMandatoryIe("Recovery Time Stamp"))?,
        })
    }

    pub fn sequence_number(&self) -> SequenceNumber {
        self.header.sequence_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    #[test]
    fn roundtrip() {
        let resp = HeartbeatResponse::new(1u32, RecoveryTimeStamp::new(SystemTime::now()));
        let bytes = resp.marshal();
        let decoded = HeartbeatResponse::unmarshal(&bytes).unwrap();
        assert_eq!(decoded.header.message_type, MsgType::HeartbeatResponse);
        assert_eq!(
            decoded.recovery_time_stamp.marshal(),
            resp.recovery_time_stamp.marshal()
        );
    }

    #[test]
    fn missing_recovery_time_stamp_errors() {
        let header = Header::new(MsgType::HeartbeatResponse, false, 0u64, 1u32);
        let bytes = header.marshal();
        assert!(HeartbeatResponse::unmarshal(&bytes).is_err());
    }
}
