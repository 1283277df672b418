//! Session Modification Response message.

use crate::error::UpfError;
use crate::ie::cause::Cause;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::MsgType;
use crate::types::{Seid, SequenceNumber};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionModificationResponse {
    pub header: Header,
    pub cause: Cause,
}

impl SessionModificationResponse {
    pub fn new(sequence_number: impl Into<SequenceNumber>, cp_seid: impl Into<Seid>, cause: Cause) -> Self {
        let mut header = Header::new(
            MsgType::SessionModificationResponse,
            true,
            cp_seid,
            sequence_number,
        );
        header.length = header.len() - 4 + cause.to_ie().len() as u16;
        SessionModificationResponse { header, cause }
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

        Ok(SessionModificationResponse {
            header,
            cause: cause.ok_or(UpfError::MissingMandatoryIe("Cause"))?,
        })
    }
}
