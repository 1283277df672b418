//! Session Deletion Response message.

use crate::error::UpfError;
use crate::ie::cause::Cause;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::MsgType;
use crate::types::{Seid, SequenceNumber};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDeletionResponse {
    pub header: Header,
    pub cause: Cause,
}

impl SessionDeletionResponse {
    pub fn new(sequence_number: impl Into<SequenceNumber>, cp_seid: impl Into<Seid>, cause: Cause) -> Self {
        let mut header = Header::new(MsgType::SessionDeletionResponse, true, cp_seid, sequence_number);
        header.length = header.len() - 4 + cause.to_ie().len() as u16;
        SessionDeletionResponse { header, cause }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.header.marshal_into(&mut buf);
        self.cause.to_ie().marshal_into(&mut buf);
        buf
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        let header = Header::unmarshal(data)?;
        let body = &data[header.len() as usize..];

        let mut cause = None;
        for ie in Ie::iter_all(body) {
            let ie = ie?;
            if ie.ie_type == IeType::Cause {
                cause = Some(Cause::unmarshal(&ie.payload)?);
            }
        }

        Ok(SessionDeletionResponse {
            header,
            cause: cause.ok_or(UpfError::MissingMandatoryIe("Cause"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::cause::CauseValue;

    #[test]
    fn roundtrip() {
        let resp = SessionDeletionResponse::new(1u32, 0xABu64, Cause::new(CauseValue::RequestAccepted));
        let bytes = resp.marshal();
        let decoded = SessionDeletionResponse::unmarshal(&bytes).unwrap();
        assert_eq!(decoded.cause.value, CauseValue::RequestAccepted);
    }

    #[test]
    fn missing_cause_errors() {
        let header = Header::new(MsgType::SessionDeletionResponse, true, 1u64, 1u32);
        let bytes = header.marshal();
        assert!(SessionDeletionResponse::unmarshal(&bytes).is_err());
    }
}
