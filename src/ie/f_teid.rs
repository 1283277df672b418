//! F-TEID IE — a GTP-U tunnel endpoint (IP address + TEID).

use crate::error::UpfError;
use crate::ie::{Ie, IeType};
use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fteid {
    pub v4: bool,
    pub v6: bool,
    pub teid: u32,
    pub ipv4_address: Option<Ipv4Addr>,
    pub ipv6_address: Option<Ipv6Addr>,
}

impl Fteid {
    pub fn ipv4(teid: u32, addr: Ipv4Addr) -> Self {
        Fteid {
            v4: true,
            v6: false,
            teid,
            ipv4_address: Some(addr),
            ipv6_address: None,
        }
    }

    pub fn ipv6(teid: u32, addr: Ipv6Addr) -> Self {
        Fteid {
            v4: false,
            v6: true,
            teid,
            ipv4_address: None,
            ipv6_address: Some(addr),
        }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut data = Vec::new();
        let mut flags = 0u8;
        if self.v4 {
            flags |= 0x01;
        }
        if self.v6 {
            flags |= 0x02;
        }
        data.push(flags);
        data.extend_from_slice(&self.teid.to_be_bytes());
        if let Some(addr) = self.ipv4_address {
            data.extend_from_slice(&addr.octets());
        }
        if let Some(addr) = self.ipv6_address {
            data.extend_from_slice(&addr.octets());
        }
        data
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, UpfError> {
        if payload.len() < 5 {
            return Err(UpfError::TooShort {
                context: "F-TEID",
                expected: 5,
                actual: payload.len(),
            });
        }
        let flags = payload[0];
        let v4 = flags & 0x01 != 0;
        let v6 = flags & 0x02 != 0;
        let teid = u32::from_be_bytes([payload[1], payload[2], payload[3], payload[4]]);
        let mut offset = 5;
        let ipv4_address = if v4 {
            if payload.len() < offset + 4 {
                return Err(UpfError::TooShort {
                    context: "F-TEID IPv4",
                    expected: offset + 4,
                    actual: payload.len(),
                });
            }
            let addr = Ipv4Addr::new(
                payload[offset],
                payload[offset + 1],
                payload[offset + 2],
                payload[offset + 3],
            );
            offset += 4;
            Some(addr)
        } else {
            None
        };
        let ipv6_address = if v6 {
            if payload.len() < offset + 16 {
                return Err(UpfError::TooShort {
                    context: "F-TEID IPv6",
                    expected: offset + 16,
                    actual: payload.len(),
                });
            }
            let mut octets = [0u8; 16];
            octets.copy_from_slice(&payload[offset..offset + 16]);
            Some(Ipv6Addr::from(octets))
        } else {
            None
        };
        Ok(Fteid {
            v4,
            v6,
            teid,
            ipv4_address,
            ipv6_address,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::Fteid, self.marshal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_ipv4() {
        let f = Fteid::ipv4(0x1234_5678, Ipv4Addr::new(192, 168, 0, 1));
        assert_eq!(Fteid::unmarshal(&f.marshal()).unwrap(), f);
    }

    #[test]
    fn roundtrip_ipv6() {
        let f = Fteid::ipv6(0x1234_5678, Ipv6Addr::LOCALHOST);
        assert_eq!(Fteid::unmarshal(&f.marshal()).unwrap(), f);
    }

    #[test]
    fn too_short_errors() {
        assert!(Fteid::unmarshal(&[0, 0, 0, 0]).is_err());
    }

    #[test]
    fn truncated_ipv4_errors() {
        assert!(Fteid::unmarshal(&[1, 0, 0, 0, 0, 1, 2]).is_err());
    }
}
