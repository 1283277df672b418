//! Session Modification Request message — the UP-SEID identifying the
//! session travels in the header, not as a body IE.

use crate::error::UpfError;
use crate::ie::create_far::CreateFar;
use crate::ie::create_pdr::CreatePdr;
use crate::ie::remove_far::RemoveFar;
use crate::ie::remove_pdr::RemovePdr;
use crate::ie::update_far::UpdateFar;
use crate::ie::update_pdr::UpdatePdr;
use crate::ie::update_qer::UpdateQer;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::MsgType;
use crate::types::{Seid, SequenceNumber};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionModificationRequest {
    pub create_pdrs: Vec<CreatePdr>,
    pub create_fars: Vec<CreateFar>,
    pub update_pdrs: Vec<UpdatePdr>,
    pub update_fars: Vec<UpdateFar>,
    pub update_qers: Vec<UpdateQer>,
    pub remove_pdrs: Vec<RemovePdr>,
    pub remove_fars: Vec<RemoveFar>,
}

impl SessionModificationRequest {
    pub fn to_message(
        &self,
        sequence_number: impl Into<SequenceNumber>,
        up_seid: impl Into<Seid>,
    ) -> (Header, Vec<u8>) {
        let mut header =
            Header::new(MsgType::SessionModificationRequest, true, up_seid, sequence_number);
        let mut buf = Vec::new();
        for pdr in &self.create_pdrs {
            pdr.to_ie().marshal_into(&mut buf);
        }
        for far in &self.create_fars {
            far.to_ie().marshal_into(&mut buf);
        }
        for pdr in &self.update_pdrs {
            pdr.to_ie().marshal_into(&mut buf);
        }
        for far in &self.update_fars {
            far.to_ie().marshal_into(&mut buf);
        }
        for qer in &self.update_qers {
            qer.to_ie().marshal_into(&mut buf);
        }
        for pdr in &self.remove_pdrs {
            pdr.to_ie().marshal_into(&mut buf);
        }
        for far in &self.remove_fars {
            far.to_ie().marshal_into(&mut buf);
        }
        header.length = header.len() - 4 + buf.len() as u16;
        (header, buf)
    }

    pub fn marshal(&self, sequence_number: impl Into<SequenceNumber>, up_seid: impl Into<Seid>) -> Vec<u8> {
        let (header, body) = self.to_message(sequence_number, up_seid);
        let mut out = header.marshal();
        out.extend_from_slice(&body);
        out
    }

    pub fn unmarshal(data: &[u8]) -> Result<(Header, Self), UpfError> {
        let header = Header::unmarshal(data)?;
        let body = &data[header.len() as usize..];

        let mut req = SessionModificationRequest::default();
        for ie in Ie::iter_all(body) {
            let ie = ie?;
            match ie.ie_type {
                IeType::CreatePdr => req.create_pdrs.push(CreatePdr::unmarshal(&ie.payload)?),
                IeType::CreateFar => req.create_fars.push(CreateFar::unmarshal(&ie.payload)?),
                IeType::UpdatePdr => req.update_pdrs.push(UpdatePdr::unmarshal(&ie.payload)?),
                IeType::UpdateFar => req.update_fars.push(UpdateFar::unmarshal(&ie.payload)?),
                IeType::UpdateQer => req.update_qers.push(UpdateQer::unmarshal(&ie.payload)?),
                IeType::RemovePdr => req.remove_pdrs.push(RemovePdr::unmarshal(&ie.payload)?),
                IeType::RemoveFar => req.remove_fars.push(RemoveFar::unmarshal(&ie.payload)?),
                _ => (),
            }
        }

        Ok((header, req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::far_id::FarId;
    use crate::ie::qer_id::QerId;

    #[test]
    fn roundtrip_update_qer() {
        let req = SessionModificationRequest {
            update_qers: vec![UpdateQer::new(
                QerId::new(1),
                None,
                Some(crate::ie::mbr::Mbr::new(1_000_000, 1_000_000)),
                None,
                None,
            )],
            ..Default::default()
        };
        let bytes = req.marshal(1u32, 0xA1B2_C3D4u64);
        let (header, decoded) = SessionModificationRequest::unmarshal(&bytes).unwrap();
        assert_eq!(header.seid.value(), 0xA1B2_C3D4);
        assert_eq!(decoded.update_qers.len(), 1);
    }

    #[test]
    fn roundtrip_remove_far() {
        let req = SessionModificationRequest {
            remove_fars: vec![RemoveFar::new(FarId::new(2))],
            ..Default::default()
        };
        let bytes = req.marshal(2u32, 1u64);
        let (_, decoded) = SessionModificationRequest::unmarshal(&bytes).unwrap();
        assert_eq!(decoded.remove_fars, vec![RemoveFar::new(FarId::new(2))]);
    }

    #[test]
    fn empty_modification_decodes() {
        let req = SessionModificationRequest::default();
        let bytes = req.marshal(3u32, 1u64);
        let (_, decoded) = SessionModificationRequest::unmarshal(&bytes).unwrap();
        assert_eq!(decoded, SessionModificationRequest::default());
    }
}
