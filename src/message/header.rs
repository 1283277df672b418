//! PFCP message header: 4-byte fixed part, optional 8-byte SEID, 3-byte
//! sequence number plus a spare priority byte.

use crate::error::UpfError;
use crate::message::MsgType;
use crate::types::{Seid, SequenceNumber};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u8,
    pub has_fo: bool,
    pub has_mp: bool,
    pub has_seid: bool,
    pub message_type: MsgType,
    pub length: u16,
    pub seid: Seid,
    pub sequence_number: SequenceNumber,
    pub message_priority: u8,
}

impl Header {
    pub fn new(
        message_type: MsgType,
        has_seid: bool,
        seid: impl Into<Seid>,
        sequence_number: impl Into<SequenceNumber>,
    ) -> Self {
        Header {
            version: 1,
            has_fo: false,
            has_mp: false,
            has_seid,
            message_type,
            length: 0,
            seid: seid.into(),
            sequence_number: sequence_number.into(),
            message_priority: 0,
        }
    }

    pub fn len(&self) -> u16 {
        let mut length = 8;
        if self.has_seid {
            length += 8;
        }
        length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut data = vec![0; self.len() as usize];
        self.marshal_to(&mut data);
        data
    }

    pub fn marshal_into(&self, buf: &mut Vec<u8>) {
        let start = buf.len();
        buf.resize(start + self.len() as usize, 0);
        self.marshal_to(&mut buf[start..]);
    }

    pub fn marshal_to(&self, b: &mut [u8]) {
        let flags = (self.version << 5)
            | ((self.has_fo as u8) << 2)
            | ((self.has_mp as u8) << 1)
            | (self.has_seid as u8);
        b[0] = flags;
        b[1] = self.message_type as u8;
        b[2..4].copy_from_slice(&self.length.to_be_bytes());

        let mut offset = 4;
        if self.has_seid {
            b[offset..offset + 8].copy_from_slice(&self.seid.value().to_be_bytes());
            offset += 8;
        }

        let seq_bytes = self.sequence_number.value().to_be_bytes();
        b[offset..offset + 3].copy_from_slice(&seq_bytes[1..]);
        b[offset + 3] = self.message_priority;
    }

    pub fn unmarshal(b: &[u8]) -> Result<Self, UpfError> {
        if b.len() < 8 {
            return Err(UpfError::InvalidHeader(format!(
                "header too short: need at least 8 bytes, got {}",
                b.len()
            )));
        }

        let flags = b[0];
        let version = flags >> 5;
        let has_fo = (flags & 0x04) >> 2 == 1;
        let has_mp = (flags & 0x02) >> 1 == 1;
        let has_seid = (flags & 0x01) == 1;

        let message_type = MsgType::from(b[1]);
        let length = u16::from_be_bytes([b[2], b[3]]);

        let mut offset = 4;
        let seid = if has_seid {
            if b.len() < offset + 8 {
                return Err(UpfError::InvalidHeader(
                    "header with SEID too short".to_string(),
                ));
            }
            let value = u64::from_be_bytes(b[offset..offset + 8].try_into().unwrap());
            offset += 8;
            Seid::new(value)
        } else {
            Seid::new(0)
        };

        if b.len() < offset + 4 {
            return Err(UpfError::InvalidHeader(
                "header sequence number part too short".to_string(),
            ));
        }
        let sequence_number = SequenceNumber::new(u32::from_be_bytes([
            0,
            b[offset],
            b[offset + 1],
            b[offset + 2],
        ]));
        let message_priority = b[offset + 3];

        Ok(Header {
            version,
            has_fo,
            has_mp,
            has_seid,
            message_type,
            length,
            seid,
            sequence_number,
            message_priority,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_without_seid() {
        let header = Header::new(MsgType::HeartbeatRequest, false, 0u64, 123u32);
        let bytes = header.marshal();
        let decoded = Header::unmarshal(&bytes).unwrap();
        assert_eq!(decoded.message_type, MsgType::HeartbeatRequest);
        assert_eq!(decoded.sequence_number.value(), 123);
        assert!(!decoded.has_seid);
    }

    #[test]
    fn roundtrip_with_seid() {
        let header = Header::new(
            MsgType::SessionEstablishmentRequest,
            true,
            0xA1B2_C3D4u64,
            7u32,
        );
        let bytes = header.marshal();
        let decoded = Header::unmarshal(&bytes).unwrap();
        assert!(decoded.has_seid);
        assert_eq!(decoded.seid.value(), 0xA1B2_C3D4);
    }

    #[test]
    fn too_short_errors() {
        assert!(Header::unmarshal(&[0; 4]).is_err());
    }
}
