//! Recovery Time Stamp IE — an NTP-epoch timestamp signalling peer restarts.

use crate::error::UpfError;
use crate::ie::{Ie, IeType};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// NTP epoch (1900-01-01) is this many seconds before the Unix epoch.
const NTP_EPOCH_OFFSET: u64 = 2_208_988_800;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryTimeStamp {
    pub timestamp: SystemTime,
}

impl RecoveryTimeStamp {
    pub fn new(timestamp: SystemTime) -> Self {
        RecoveryTimeStamp { timestamp }
    }

    pub fn marshal(&self) -> [u8; 4] {
        let unix_secs = self
            .timestamp
            .duration_since(UNIX_EPOCH)
            .expect("recovery timestamp before Unix epoch")
            .as_secs();
        ((unix_secs + NTP_EPOCH_OFFSET) as u32).to_be_bytes()
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        if data.len() < 4 {
            return Err(UpfError::TooShort {
                context: "Recovery Time Stamp",
                expected: 4,
                actual: data.len(),
            });
        }
        let ntp = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as u64;
        let unix_secs = ntp.saturating_sub(NTP_EPOCH_OFFSET);
        Ok(RecoveryTimeStamp {
            timestamp: UNIX_EPOCH + Duration::from_secs(unix_secs),
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::RecoveryTimeStamp, self.marshal().to_vec())
    }
}
