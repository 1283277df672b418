//! Update PDR IE — selectively-present fields of an existing PDR.

use crate::error::UpfError;
use crate::ie::far_id::FarId;
use crate::ie::pdi::Pdi;
use crate::ie::pdr_id::PdrId;
use crate::ie::precedence::Precedence;
use crate::ie::qer_id::QerId;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdatePdr {
    pub pdr_id: PdrId,
    pub precedence: Option<Precedence>,
    pub pdi: Option<Pdi>,
    pub far_id: Option<FarId>,
    pub qer_id: Option<QerId>,
}

impl UpdatePdr {
    pub fn new(pdr_id: PdrId) -> Self {
        UpdatePdr {
            pdr_id,
            precedence: None,
            pdi: None,
            far_id: None,
            qer_id: None,
        }
    }

    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = Some(precedence);
        self
    }

    pub fn with_pdi(mut self, pdi: Pdi) -> Self {
        self.pdi = Some(pdi);
        self
    }

    pub fn with_far_id(mut self, far_id: FarId) -> Self {
        self.far_id = Some(far_id);
        self
    }

    pub fn with_qer_id(mut self, qer_id: QerId) -> Self {
        self.qer_id = Some(qer_id);
        self
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut children = vec![self.pdr_id.to_ie()];
        if let Some(precedence) = &self.precedence {
            children.push(precedence.to_ie());
        }
        if let Some(pdi) = &self.pdi {
            children.push(pdi.to_ie());
        }
        if let Some(far_id) = &self.far_id {
            children.push(far_id.to_ie());
        }
        if let Some(qer_id) = &self.qer_id {
            children.push(qer_id.to_ie());
        }
        Ie::new_grouped(IeType::UpdatePdr, &children).payload
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, UpfError> {
        let mut pdr_id = None;
        let mut precedence = None;
        let mut pdi = None;
        let mut far_id = None;
        let mut qer_id = None;

        for ie in Ie::iter_all(payload) {
            let ie = ie?;
            match ie.ie_type {
                IeType::PdrId => pdr_id = Some(PdrId::unmarshal(&ie.payload)?),
                IeType::Precedence => precedence = Some(Precedence::unmarshal(&ie.payload)?),
                IeType::Pdi => pdi = Some(Pdi::unmarshal(&ie.payload)?),
                IeType::FarId => far_id = Some(FarId::unmarshal(&ie.payload)?),
                IeType::QerId => qer_id = Some(QerId::unmarshal(&ie.payload)?),
                _ => (),
            }
        }

        Ok(UpdatePdr {
            pdr_id: pdr_id.ok_or(UpfError::MissingMandatoryIe("PDR ID"))?,
            precedence,
            pdi,
            far_id,
            qer_id,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::UpdatePdr, self.marshal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_far_only() {
        let pdr = UpdatePdr::new(PdrId::new(1)).with_far_id(FarId::new(2));
        assert_eq!(UpdatePdr::unmarshal(&pdr.marshal()).unwrap(), pdr);
    }

    #[test]
    fn roundtrip_precedence_only() {
        let pdr = UpdatePdr::new(PdrId::new(3)).with_precedence(Precedence::new(500));
        assert_eq!(UpdatePdr::unmarshal(&pdr.marshal()).unwrap(), pdr);
    }

    #[test]
    fn missing_pdr_id_errors() {
        assert!(UpdatePdr::unmarshal(&[]).is_err());
    }
}
