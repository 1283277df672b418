//! Cause IE — the outcome code carried by every PFCP response.

use crate::error::UpfError;
use crate::ie::{Ie, IeType};

/// Cause values this core actually emits or recognizes (3GPP TS 29.244
/// Table 8.2.1-1 assigns many more; only the ones the spec names are kept).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CauseValue {
    RequestAccepted = 1,
    MandatoryIeMissing = 64,
    SessionContextNotFound = 69,
    NoResourcesAvailable = 72,
    NoEstablishedPfcpAssociation = 73,
    Unknown(u8),
}

impl CauseValue {
    pub fn as_u8(self) -> u8 {
        match self {
            CauseValue::RequestAccepted => 1,
            CauseValue::MandatoryIeMissing => 64,
            CauseValue::SessionContextNotFound => 69,
            CauseValue::NoResourcesAvailable => 72,
            CauseValue::NoEstablishedPfcpAssociation => 73,
            CauseValue::Unknown(v) => v,
        }
    }
}

impl From<u8> for CauseValue {
    fn from(v: u8) -> Self {
        match v {
            1 => CauseValue::RequestAccepted,
            64 => CauseValue::MandatoryIeMissing,
            69 => CauseValue::SessionContextNotFound,
            72 => CauseValue::NoResourcesAvailable,
            73 => CauseValue::NoEstablishedPfcpAssociation,
            other => CauseValue::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cause {
    pub value: CauseValue,
}

impl Cause {
    pub fn new(value: CauseValue) -> Self {
        Cause { value }
    }

    pub fn marshal(&self) -> [u8; 1] {
        [self.value.as_u8()]
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        if data.is_empty() {
            return Err(UpfError::TooShort {
                context: "Cause",
                expected: 1,
                actual: 0,
            });
        }
        Ok(Cause {
            value: CauseValue::from(data[0]),
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::Cause, self.marshal().to_vec())
    }
}
