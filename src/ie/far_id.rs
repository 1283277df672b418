//! FAR ID IE — identifies a Forwarding Action Rule within a session.

use crate::error::UpfError;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FarId {
    pub value: u32,
}

impl FarId {
    pub fn new(value: u32) -> Self {
        FarId { value }
    }

    pub fn marshal(&self) -> [u8; 4] {
        self.value.to_be_bytes()
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        if data.len() < 4 {
            return Err(UpfError::TooShort {
                context: "FAR ID",
                expected: 4,
                actual: data.len(),
            });
        }
        Ok(FarId {
            value: u32::from_be_bytes(data[0..4].try_into().unwrap()),
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::FarId, self.marshal().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let id = FarId::new(1);
        assert_eq!(FarId::unmarshal(&id.marshal()).unwrap(), id);
    }

    #[test]
    fn too_short_errors() {
        assert!(FarId::unmarshal(&[0; 3]).is_err());
    }
}
