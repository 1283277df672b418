//! Remove PDR IE — grouped{PDR ID}, names the rule to delete.

use crate::error::UpfError;
use crate::ie::pdr_id::PdrId;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovePdr {
    pub pdr_id: PdrId,
}

impl RemovePdr {
    pub fn new(pdr_id: PdrId) -> Self {
        RemovePdr { pdr_id }
    }

    pub fn marshal(&self) -> Vec<u8> {
        Ie::new_grouped(IeType::RemovePdr, &[self.pdr_id.to_ie()]).payload
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, UpfError> {
        let mut pdr_id = None;
        for ie in Ie::iter_all(payload) {
            let ie = ie?;
            if ie.ie_type == IeType::PdrId {
                pdr_id = Some(PdrId::unmarshal(&ie.payload)?);
            }
        }
        Ok(RemovePdr {
            pdr_id: pdr_id.ok_or(UpfError::MissingMandatoryIe("PDR ID"))?,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::RemovePdr, self.marshal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let r = RemovePdr::new(PdrId::new(7));
        assert_eq!(RemovePdr::unmarshal(&r.marshal()).unwrap(), r);
    }

    #[test]
    fn missing_pdr_id_errors() {
        assert!(RemovePdr::unmarshal(&[]).is_err());
    }
}
