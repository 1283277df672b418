//! Session Deletion Request message — the UP-SEID identifying the session
//! to delete travels in the header; the body carries no mandatory IEs.

use crate::error::UpfError;
use crate::message::header::Header;
use crate::message::MsgType;
use crate::types::{Seid, SequenceNumber};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDeletionRequest {
    pub header: Header,
}

impl SessionDeletionRequest {
    pub fn new(sequence_number: impl Into<SequenceNumber>, up_seid: impl Into<Seid>) -> Self {
        let mut header = Header::new(MsgType::SessionDeletionRequest, true, up_seid, sequence_number);
        header.length = header.len() - 4;
        SessionDeletionRequest { header }
    }

    pub fn marshal(&self) -> Vec<u8> {
        self.header.marshal()
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        let header = Header::unmarshal(data)?;
        Ok(SessionDeletionRequest { header })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let req = SessionDeletionRequest::new(1u32, 0xA1B2_C3D4u64);
        let bytes = req.marshal();
        let decoded = SessionDeletionRequest::unmarshal(&bytes).unwrap();
        assert_eq!(decoded.header.seid.value(), 0xA1B2_C3D4);
        assert!(decoded.header.has_seid);
    }

    #[test]
    fn too_short_errors() {
        assert!(SessionDeletionRequest::unmarshal(&[0; 4]).is_err());
    }
}
