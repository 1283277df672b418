//! Outer Header Creation IE — the GTP-U/IPv4 or GTP-U/IPv6 encapsulation a FAR applies.

use crate::error::UpfError;
use crate::ie::{Ie, IeType};
use std::net::{Ipv4Addr, Ipv6Addr};

const GTPU_UDP_IPV4: u16 = 0x0100;
const GTPU_UDP_IPV6: u16 = 0x0200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OuterHeaderCreation {
    GtpuIpv4 { teid: u32, address: Ipv4Addr },
    GtpuIpv6 { teid: u32, address: Ipv6Addr },
}

impl OuterHeaderCreation {
    pub fn marshal(&self) -> Vec<u8> {
        let mut data = Vec::new();
        match self {
            OuterHeaderCreation::GtpuIpv4 { teid, address } => {
                data.extend_from_slice(&GTPU_UDP_IPV4.to_be_bytes());
                data.extend_from_slice(&teid.to_be_bytes());
                data.extend_from_slice(&address.octets());
            }
            OuterHeaderCreation::GtpuIpv6 { teid, address } => {
                data.extend_from_slice(&GTPU_UDP_IPV6.to_be_bytes());
                data.extend_from_slice(&teid.to_be_bytes());
                data.extend_from_slice(&address.octets());
            }
        }
        data
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, UpfError> {
        if payload.len() < 6 {
            return Err(UpfError::TooShort {
                context: "Outer Header Creation",
                expected: 6,
                actual: payload.len(),
            });
        }
        let description = u16::from_be_bytes([payload[0], payload[1]]);
        let teid = u32::from_be_bytes([payload[2], payload[3], payload[4], payload[5]]);
        if description & GTPU_UDP_IPV4 != 0 {
            if payload.len() < 10 {
                return Err(UpfError::TooShort {
                    context: "Outer Header Creation IPv4",
                    expected: 10,
                    actual: payload.len(),
                });
            }
            Ok(OuterHeaderCreation::GtpuIpv4 {
                teid,
                address: Ipv4Addr::new(payload[6], payload[7], payload[8], payload[9]),
            })
        } else if description & GTPU_UDP_IPV6 != 0 {
            if payload.len() < 22 {
                return Err(UpfError::TooShort {
                    context: "Outer Header Creation IPv6",
                    expected: 22,
                    actual: payload.len(),
                });
            }
            let mut octets = [0u8; 16];
            octets.copy_from_slice(&payload[6..22]);
            Ok(OuterHeaderCreation::GtpuIpv6 {
                teid,
                address: Ipv6Addr::from(octets),
            })
        } else {
            Err(UpfError::InvalidValue {
                field: "Outer Header Creation description",
                reason: format!("{description:#06x} is neither GTP-U/IPv4 nor GTP-U/IPv6"),
            })
        }
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::OuterHeaderCreation, self.marshal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_ipv4() {
        let ohc = OuterHeaderCreation::GtpuIpv4 {
            teid: 0x1234_5678,
            address: Ipv4Addr::new(192, 168, 1, 1),
        };
        assert_eq!(OuterHeaderCreation::unmarshal(&ohc.marshal()).unwrap(), ohc);
    }

    #[test]
    fn roundtrip_ipv6() {
        let ohc = OuterHeaderCreation::GtpuIpv6 {
            teid: 0xABCD_EF01,
            address: Ipv6Addr::LOCALHOST,
        };
        assert_eq!(OuterHeaderCreation::unmarshal(&ohc.marshal()).unwrap(), ohc);
    }

    #[test]
    fn unknown_description_errors() {
        let mut data = vec![0, 0];
        data.extend_from_slice(&0u32.to_be_bytes());
        assert!(OuterHeaderCreation::unmarshal(&data).is_err());
    }

    #[test]
    fn too_short_errors() {
        assert!(OuterHeaderCreation::unmarshal(&[0; 5]).is_err());
    }
}
