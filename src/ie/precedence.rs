//! Precedence IE — the PDR match priority (greatest value wins ties here).

use crate::error::UpfError;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Precedence {
    pub value: u32,
}

impl Precedence {
    pub fn new(value: u32) -> Self {
        Precedence { value }
    }

    pub fn marshal(&self) -> [u8; 4] {
        self.value.to_be_bytes()
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        if data.len() < 4 {
            return Err(UpfError::TooShort {
                context: "Precedence",
                expected: 4,
                actual: data.len(),
            });
        }
        Ok(Precedence {
            value: u32::from_be_bytes(data[0..4].try_into().unwrap()),
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::Precedence, self.marshal().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let p = Precedence::new(100);
        assert_eq!(Precedence::unmarshal(&p.marshal()).unwrap(), p);
    }

    #[test]
    fn ordering_is_by_value() {
        assert!(Precedence::new(200) > Precedence::new(100));
    }

    #[test]
    fn too_short_errors() {
        assert!(Precedence::unmarshal(&[0, 0, 0]).is_err());
    }
}
