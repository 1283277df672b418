//! Source Interface IE — which side of the UPF a PDR matches traffic from.

use crate::error::UpfError;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceInterfaceValue {
    Access,
    Core,
    SgiLan,
    CpFunction,
    Unknown(u8),
}

impl SourceInterfaceValue {
    pub fn as_u8(self) -> u8 {
        match self {
            SourceInterfaceValue::Access => 0,
            SourceInterfaceValue::Core => 1,
            SourceInterfaceValue::SgiLan => 2,
            SourceInterfaceValue::CpFunction => 3,
            SourceInterfaceValue::Unknown(v) => v,
        }
    }
}

impl From<u8> for SourceInterfaceValue {
    fn from(v: u8) -> Self {
        match v {
            0 => SourceInterfaceValue::Access,
            1 => SourceInterfaceValue::Core,
            2 => SourceInterfaceValue::SgiLan,
            3 => SourceInterfaceValue::CpFunction,
            other => SourceInterfaceValue::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceInterface {
    pub value: SourceInterfaceValue,
}

impl SourceInterface {
    pub fn new(value: SourceInterfaceValue) -> Self {
        SourceInterface { value }
    }

    pub fn marshal(&self) -> [u8; 1] {
        [self.value.as_u8()]
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, UpfError> {
        if payload.is_empty() {
            return Err(UpfError::TooShort {
                context: "Source Interface",
                expected: 1,
                actual: 0,
            });
        }
        Ok(SourceInterface {
            value: SourceInterfaceValue::from(payload[0]),
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::SourceInterface, self.marshal().to_vec())
    }
}
