//! GBR IE — Guaranteed Bit Rate, wire-encoded in kbps, reported in bits/sec.

use crate::error::UpfError;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gbr {
    pub uplink_bps: u64,
    pub downlink_bps: u64,
}

impl Gbr {
    pub fn new(uplink_bps: u64, downlink_bps: u64) -> Self {
        Gbr {
            uplink_bps,
            downlink_bps,
        }
    }

    pub fn marshal(&self) -> [u8; 10] {
        let mut bytes = [0u8; 10];
        bytes[0..5].copy_from_slice(&(self.uplink_bps / 1000).to_be_bytes()[3..]);
        bytes[5..10].copy_from_slice(&(self.downlink_bps / 1000).to_be_bytes()[3..]);
        bytes
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        if data.len() < 10 {
            return Err(UpfError::TooShort {
                context: "GBR",
                expected: 10,
                actual: data.len(),
            });
        }
        let mut ul = [0u8; 8];
        ul[3..].copy_from_slice(&data[0..5]);
        let mut dl = [0u8; 8];
        dl[3..].copy_from_slice(&data[5..10]);
        Ok(Gbr {
            uplink_bps: u64::from_be_bytes(ul) * 1000,
            downlink_bps: u64::from_be_bytes(dl) * 1000,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::Gbr, self.marshal().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let gbr = Gbr::new(500_000, 750_000);
        assert_eq!(Gbr::unmarshal(&gbr.marshal()).unwrap(), gbr);
    }

    #[test]
    fn too_short_errors() {
        assert!(Gbr::unmarshal(&[0; 9]).is_err());
    }
}
