//! PDR ID IE — identifies a Packet Detection Rule within a session.

use crate::error::UpfError;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PdrId {
    pub value: u16,
}

impl PdrId {
    pub fn new(value: u16) -> Self {
        PdrId { value }
    }

    pub fn marshal(&self) -> [u8; 2] {
        self.value.to_be_bytes()
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        if data.len() < 2 {
            return Err(UpfError::TooShort {
                context: "PDR ID",
                expected: 2,
                actual: data.len(),
            });
        }
        Ok(PdrId {
            value: u16::from_be_bytes([data[0], data[1]]),
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::PdrId, self.marshal().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let id = PdrId::new(1);
        assert_eq!(PdrId::unmarshal(&id.marshal()).unwrap(), id);
    }

    #[test]
    fn too_short_errors() {
        assert!(PdrId::unmarshal(&[0]).is_err());
    }
}
