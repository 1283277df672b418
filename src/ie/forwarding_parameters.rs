//! Forwarding Parameters IE — grouped{Destination Interface, Outer Header Creation}.

use crate::error::UpfError;
use crate::ie::destination_interface::DestinationInterface;
use crate::ie::outer_header_creation::OuterHeaderCreation;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardingParameters {
    pub destination_interface: DestinationInterface,
    pub outer_header_creation: Option<OuterHeaderCreation>,
}

impl ForwardingParameters {
    pub fn new(
        destination_interface: DestinationInterface,
        outer_header_creation: Option<OuterHeaderCreation>,
    ) -> Self {
        ForwardingParameters {
            destination_interface,
            outer_header_creation,
        }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut children = vec![self.destination_interface.to_ie()];
        if let Some(ohc) = &self.outer_header_creation {
            children.push(ohc.to_ie());
        }
        Ie::new_grouped(IeType::ForwardingParameters, &children).payload
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, UpfError> {
        let mut destination_interface = None;
        let mut outer_header_creation = None;

        for ie in Ie::iter_all(payload) {
            let ie = ie?;
            match ie.ie_type {
                IeType::DestinationInterface => {
                    destination_interface = Some(DestinationInterface::unmarshal(&ie.payload)?)
                }
                IeType::OuterHeaderCreation => {
                    outer_header_creation = Some(OuterHeaderCreation::unmarshal(&ie.payload)?)
                }
                _ => (),
            }
        }

        Ok(ForwardingParameters {
            destination_interface: destination_interface
                .ok_or(UpfError::MissingMandatoryIe("Destination Interface"))?,
            outer_header_creation,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::ForwardingParameters, self.marshal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::destination_interface::Interface;
    use std::net::Ipv4Addr;

    #[test]
    fn roundtrip_minimal() {
        let fp = ForwardingParameters::new(DestinationInterface::new(Interface::Core), None);
        assert_eq!(ForwardingParameters::unmarshal(&fp.marshal()).unwrap(), fp);
    }

    #[test]
    fn roundtrip_with_outer_header_creation() {
        let fp = ForwardingParameters::new(
            DestinationInterface::new(Interface::Access),
            Some(OuterHeaderCreation::GtpuIpv4 {
                teid: 0x1234_5678,
                address: Ipv4Addr::new(10, 0, 0, 1),
            }),
        );
        assert_eq!(ForwardingParameters::unmarshal(&fp.marshal()).unwrap(), fp);
    }

    #[test]
    fn missing_destination_interface_errors() {
        assert!(ForwardingParameters::unmarshal(&[]).is_err());
    }
}
