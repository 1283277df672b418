//! Remove FAR IE — grouped{FAR ID}, names the rule to delete.

use crate::error::UpfError;
use crate::ie::far_id::FarId;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveFar {
    pub far_id: FarId,
}

impl RemoveFar {
    pub fn new(far_id: FarId) -> Self {
        RemoveFar { far_id }
    }

    pub fn marshal(&self) -> Vec<u8> {
        Ie::new_grouped(IeType::RemoveFar, &[self.far_id.to_ie()]).payload
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, UpfError> {
        let mut far_id = None;
        for ie in Ie::iter_all(payload) {
            let ie = ie?;
            if ie.ie_type == IeType::FarId {
                far_id = Some(FarId::unmarshal(&ie.payload)?);
            }
        }
        Ok(RemoveFar {
            far_id: far_id.ok_or(UpfError::MissingMandatoryIe("FAR ID"))?,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::RemoveFar, self.marshal())
    }
}
