//! Destination Interface IE — which side of the UPF a FAR forwards traffic to.

use crate::error::UpfError;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interface {
    Access,
    Core,
    SgiLan,
    CpFunction,
    Unknown(u8),
}

impl Interface {
    pub fn as_u8(self) -> u8 {
        match self {
            Interface::Access => 0,
            Interface::Core => 1,
            Interface::SgiLan => 2,
            Interface::CpFunction => 3,
            Interface::Unknown(v) => v,
        }
    }
}

impl From<u8> for Interface {
    fn from(v: u8) -> Self {
        match v {
            0 => Interface::Access,
            1 => Interface::Core,
            2 => Interface::SgiLan,
            3 => Interface::CpFunction,
            other => Interface::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationInterface {
    pub interface: Interface,
}

impl DestinationInterface {
    pub fn new(interface: Interface) -> Self {
        DestinationInterface { interface }
    }

    pub fn marshal(&self) -> [u8; 1] {
        [self.interface.as_u8()]
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, UpfError> {
        if payload.is_empty() {
            return Err(UpfError::TooShort {
                context: "Destination Interface",
                expected: 1,
                actual: 0,
            });
        }
        Ok(DestinationInterface {
            interface: payload[0].into(),
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::DestinationInterface, self.marshal().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let di = DestinationInterface::new(Interface::Core);
        assert_eq!(
            DestinationInterface::unmarshal(&di.marshal()).unwrap().interface,
            Interface::Core
        );
    }

    #[test]
    fn empty_errors() {
        assert!(DestinationInterface::unmarshal(&[]).is_err());
    }
}
