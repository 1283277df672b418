//! QFI IE — a 6-bit QoS Flow Identifier (0-63).

use crate::error::UpfError;
use crate::ie::{Ie, IeType};

const QFI_MAX: u8 = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Qfi {
    qfi: u8,
}

impl Qfi {
    pub fn new(value: u8) -> Result<Self, UpfError> {
        if value > QFI_MAX {
            return Err(UpfError::InvalidValue {
                field: "QFI",
                reason: format!("{value} exceeds maximum {QFI_MAX}"),
            });
        }
        Ok(Qfi { qfi: value })
    }

    pub fn value(&self) -> u8 {
        self.qfi
    }

    pub fn marshal(&self) -> [u8; 1] {
        [self.qfi & 0x3F]
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        if data.is_empty() {
            return Err(UpfError::TooShort {
                context: "QFI",
                expected: 1,
                actual: 0,
            });
        }
        Ok(Qfi {
            qfi: data[0] & 0x3F,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::Qfi, self.marshal().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let qfi = Qfi::new(42).unwrap();
        assert_eq!(Qfi::unmarshal(&qfi.marshal()).unwrap(), qfi);
    }

    #[test]
    fn out_of_range_errors() {
        assert!(Qfi::new(64).is_err());
    }

    #[test]
    fn unmarshal_masks_spare_bits() {
        let qfi = Qfi::unmarshal(&[0xFF]).unwrap();
        assert_eq!(qfi.value(), 63);
    }

    #[test]
    fn empty_errors() {
        assert!(Qfi::unmarshal(&[]).is_err());
    }
}
