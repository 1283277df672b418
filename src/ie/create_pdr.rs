//! Create PDR IE — grouped: PDR ID, Precedence, PDI, FAR ID, QER ID.

use crate::error::UpfError;
use crate::ie::far_id::FarId;
use crate::ie::pdi::Pdi;
use crate::ie::pdr_id::PdrId;
use crate::ie::precedence::Precedence;
use crate::ie::qer_id::QerId;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatePdr {
    pub pdr_id: PdrId,
    pub precedence: Precedence,
    pub pdi: Pdi,
    pub far_id: Option<FarId>,
    pub qer_id: Option<QerId>,
}

impl CreatePdr {
    pub fn new(
        pdr_id: PdrId,
        precedence: Precedence,
        pdi: Pdi,
        far_id: Option<FarId>,
        qer_id: Option<QerId>,
    ) -> Self {
        CreatePdr {
            pdr_id,
            precedence,
            pdi,
            far_id,
            qer_id,
        }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut children = vec![
            self.pdr_id.to_ie(),
            self.precedence.to_ie(),
            self.pdi.to_ie(),
        ];
        if let Some(far_id) = &self.far_id {
            children.push(far_id.to_ie());
        }
        if let Some(qer_id) = &self.qer_id {
            children.push(qer_id.to_ie());
        }
        Ie::new_grouped(IeType::CreatePdr, &children).payload
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

        Ok(CreatePdr {
            pdr_id: pdr_id.ok_or(UpfError::MissingMandatoryIe("PDR ID"))?,
            precedence: precedence.ok_or(UpfError::MissingMandatoryIe("Precedence"))?,
            pdi: pdi.ok_or(UpfError::MissingMandatoryIe("PDI"))?,
            far_id,
            qer_id,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::CreatePdr, self.marshal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::source_interface::{SourceInterface, SourceInterfaceValue};

    fn access_pdi() -> Pdi {
        Pdi::new(SourceInterface::new(SourceInterfaceValue::Access), None)
    }

    #[test]
    fn roundtrip_minimal() {
        let pdr = CreatePdr::new(PdrId::new(1), Precedence::new(100), access_pdi(), None, None);
        assert_eq!(CreatePdr::unmarshal(&pdr.marshal()).unwrap(), pdr);
    }

    #[test]
    fn roundtrip_with_far_and_qer() {
        let pdr = CreatePdr::new(
            PdrId::new(2),
            Precedence::new(200),
            access_pdi(),
            Some(FarId::new(10)),
            Some(QerId::new(20)),
        );
        assert_eq!(CreatePdr::unmarshal(&pdr.marshal()).unwrap(), pdr);
    }

    #[test]
    fn missing_precedence_errors() {
        let pdr_id_ie = PdrId::new(1).to_ie();
        assert!(CreatePdr::unmarshal(&pdr_id_ie.marshal()).is_err());
    }
}
