//! QER ID IE — identifies a QoS Enforcement Rule within a session.

use crate::error::UpfError;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QerId {
    pub value: u32,
}

impl QerId {
    pub fn new(value: u32) -> Self {
        QerId { value }
    }

    pub fn marshal(&self) -> [u8; 4] {
        self.value.to_be_bytes()
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        if data.len() < 4 {
            return Err(UpfError::TooShort {
                context: "QER ID",
                expected: 4,
                actual: data.len(),
            });
        }
        Ok(QerId {
            value: u32::from_be_bytes(data[0..4].try_into().unwrap()),
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::QerId, self.marshal().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let id = QerId::new(1);
        assert_eq!(QerId::unmarshal(&id.marshal()).unwrap(), id);
    }

    #[test]
    fn too_short_errors() {
        assert!(QerId::unmarshal(&[0; 3]).is_err());
    }
}
