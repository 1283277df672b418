//! MBR IE — Maximum Bit Rate, wire-encoded in kbps, reported in bits/sec.

use crate::error::UpfError;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mbr {
    pub uplink_bps: u64,
    pub downlink_bps: u64,
}

impl Mbr {
    pub fn new(uplink_bps: u64, downlink_bps: u64) -> Self {
        Mbr {
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
                context: "MBR",
                expected: 10,
                actual: data.len(),
            });
        }
        let mut ul = [0u8; 8];
        ul[3..].copy_from_slice(&data[0..5]);
        let mut dl = [0u8; 8];
        dl[3..].copy_from_slice(&data[5..10]);
        Ok(Mbr {
            uplink_bps: u64::from_be_bytes(ul) * 1000,
            downlink_bps: u64::from_be_bytes(dl) * 1000,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::Mbr, self.marshal().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_10mbps() {
        let mbr = Mbr::new(10_000_000, 10_000_000);
        assert_eq!(Mbr::unmarshal(&mbr.marshal()).unwrap(), mbr);
    }

    #[test]
    fn kbps_on_the_wire() {
        let mbr = Mbr::new(1_000_000, 2_000_000);
        let bytes = mbr.marshal();
        let mut ul = [0u8; 8];
        ul[3..].copy_from_slice(&bytes[0..5]);
        assert_eq!(u64::from_be_bytes(ul), 1000);
    }

    #[test]
    fn too_short_errors() {
        assert!(Mbr::unmarshal(&[0; 9]).is_err());
    }
}
