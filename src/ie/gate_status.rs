//! Gate Status IE — per-direction open/closed gate for a QER.

use crate::error::UpfError;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatusValue {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateStatus {
    pub downlink_gate: GateStatusValue,
    pub uplink_gate: GateStatusValue,
}

impl GateStatus {
    pub fn new(downlink_gate: GateStatusValue, uplink_gate: GateStatusValue) -> Self {
        GateStatus {
            downlink_gate,
            uplink_gate,
        }
    }

    pub fn marshal(&self) -> [u8; 1] {
        let mut value = 0u8;
        if let GateStatusValue::Closed = self.downlink_gate {
            value |= 0b01;
        }
        if let GateStatusValue::Closed = self.uplink_gate {
            value |= 0b10;
        }
        [value]
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        if data.is_empty() {
            return Err(UpfError::TooShort {
                context: "Gate Status",
                expected: 1,
                actual: 0,
            });
        }
        let downlink_gate = if data[0] & 0b01 != 0 {
            GateStatusValue::Closed
        } else {
            GateStatusValue::Open
        };
        let uplink_gate = if data[0] & 0b10 != 0 {
            GateStatusValue::Closed
        } else {
            GateStatusValue::Open
        };
        Ok(GateStatus {
            downlink_gate,
            uplink_gate,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::GateStatus, self.marshal().to_vec())
    }
}
