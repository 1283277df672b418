//! F-SEID IE — the CP/UP Session Endpoint Identifier exchanged at establishment.

use crate::error::UpfError;
use crate::ie::{Ie, IeType};
use crate::types::Seid;
use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fseid {
    pub v4: bool,
    pub v6: bool,
    pub seid: Seid,
    pub ipv4_address: Option<Ipv4Addr>,
    pub ipv6_address: Option<Ipv6Addr>,
}

impl Fseid {
    pub fn new(
        seid: impl Into<Seid>,
        ipv4_address: Option<Ipv4Addr>,
        ipv6_address: Option<Ipv6Addr>,
    ) -> Self {
        Fseid {
            v4: ipv4_address.is_some(),
            v6: ipv6_address.is_some(),
            seid: seid.into(),
            ipv4_address,
            ipv6_address,
        }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut data = Vec::new();
        let mut flags = 0u8;
        if self.v6 {
            flags |= 0b01;
        }
        if self.v4 {
            flags |= 0b10;
        }
        data.push(flags);
        data.extend_from_slice(&self.seid.value().to_be_bytes());
        if let Some(addr) = self.ipv4_address {
            data.extend_from_slice(&addr.octets());
        }
        if let Some(addr) = self.ipv6_address {
            data.extend_from_slice(&addr.octets());
        }
        data
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, UpfError> {
        if data.len() < 9 {
            return Err(UpfError::TooShort {
                context: "F-SEID",
                expected: 9,
                actual: data.len(),
            });
        }
        let flags = data[0];
        let v6 = flags & 0b01 != 0;
        let v4 = flags & 0b10 != 0;
        let seid = u64::from_be_bytes(data[1..9].try_into().unwrap());

        let mut offset = 9;
        let ipv4_address = if v4 {
            if data.len() < offset + 4 {
                return Err(UpfError::TooShort {
                    context: "F-SEID IPv4",
                    expected: offset + 4,
                    actual: data.len(),
                });
            }
            let addr = Ipv4Addr::new(data[offset], data[offset + 1], data[offset + 2], data[offset + 3]);
            offset += 4;
            Some(addr)
        } else {
            None
        };

        let ipv6_address = if v6 {
            if data.len() < offset + 16 {
                return Err(UpfError::TooShort {
                    context: "F-SEID IPv6",
                    expected: offset + 16,
                    actual: data.len(),
                });
            }
            let mut octets = [0u8; 16];
            octets.copy_from_slice(&data[offset..offset + 16]);
            Some(Ipv6Addr::from(octets))
        } else {
            None
        };

        Ok(Fseid {
            v4,
            v6,
            seid: Seid::new(seid),
            ipv4_address,
            ipv6_address,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::Fseid, self.marshal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_ipv4() {
        let f = Fseid::new(0x1234_5678_90ab_cdef_u64, Some(Ipv4Addr::new(192, 168, 0, 1)), None);
        assert_eq!(Fseid::unmarshal(&f.marshal()).unwrap(), f);
    }

    #[test]
    fn roundtrip_ipv6() {
        let f = Fseid::new(0x1234_5678_90ab_cdef_u64, None, Some(Ipv6Addr::LOCALHOST));
        assert_eq!(Fseid::unmarshal(&f.marshal()).unwrap(), f);
    }

    #[test]
    fn too_short_errors() {
        assert!(Fseid::unmarshal(&[0; 8]).is_err());
    }
}
