//! Apply Action IE — the FAR's Drop/Forward/Buffer/duplicate action flags.

use crate::error::UpfError;
use crate::ie::{Ie, IeType};
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct ApplyAction: u8 {
        const DROP = 1 << 0;
        const FORW = 1 << 1;
        const BUFF = 1 << 2;
        const NOCP = 1 << 3;
        const DUPL = 1 << 4;
    }
}

impl ApplyAction {
    pub fn new(bits: u8) -> Self {
        ApplyAction::from_bits_truncate(bits)
    }

    pub fn marshal(&self) -> [u8; 1] {
        self.bits().to_be_bytes()
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        if data.is_empty() {
            return Err(UpfError::TooShort {
                context: "Apply Action",
                expected: 1,
                actual: 0,
            });
        }
        Ok(ApplyAction::from_bits_truncate(data[0]))
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::ApplyAction, self.marshal().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let actions = ApplyAction::DROP | ApplyAction::FORW;
        assert_eq!(ApplyAction::unmarshal(&actions.marshal()).unwrap(), actions);
    }

    #[test]
    fn empty_errors() {
        assert!(ApplyAction::unmarshal(&[]).is_err());
    }
}
