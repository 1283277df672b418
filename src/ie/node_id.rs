//! Node ID IE — identifies a PFCP peer, by IPv4, IPv6 or FQDN.

use crate::error::UpfError;
use crate::ie::{Ie, IeType};
use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeId {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Fqdn(String),
}

impl NodeId {
    pub fn new_ipv4(addr: Ipv4Addr) -> Self {
        NodeId::Ipv4(addr)
    }

    pub fn new_ipv6(addr: Ipv6Addr) -> Self {
        NodeId::Ipv6(addr)
    }

    pub fn new_fqdn(fqdn: &str) -> Self {
        NodeId::Fqdn(fqdn.to_string())
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut data = Vec::new();
        match self {
            NodeId::Ipv4(addr) => {
                data.push(0);
                data.extend_from_slice(&addr.octets());
            }
            NodeId::Ipv6(addr) => {
                data.push(1);
                data.extend_from_slice(&addr.octets());
            }
            NodeId::Fqdn(fqdn) => {
                data.push(2);
                data.extend_from_slice(fqdn.as_bytes());
            }
        }
        data
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, UpfError> {
        if payload.is_empty() {
            return Err(UpfError::TooShort {
                context: "Node ID",
                expected: 1,
                actual: 0,
            });
        }
        match payload[0] {
            0 => {
                if payload.len() < 5 {
                    return Err(UpfError::TooShort {
                        context: "Node ID (IPv4)",
                        expected: 5,
                        actual: payload.len(),
                    });
                }
                Ok(NodeId::Ipv4(Ipv4Addr::new(
                    payload[1], payload[2], payload[3], payload[4],
                )))
            }
            1 => {
                if payload.len() < 17 {
                    return Err(UpfError::TooShort {
                        context: "Node ID (IPv6)",
                        expected: 17,
                        actual: payload.len(),
                    });
                }
                let mut octets = [0u8; 16];
                octets.copy_from_slice(&payload[1..17]);
                Ok(NodeId::Ipv6(Ipv6Addr::from(octets)))
            }
            2 => {
                let fqdn = String::from_utf8(payload[1..].to_vec()).map_err(|_| {
                    UpfError::InvalidValue {
                        field: "Node ID (FQDN)",
                        reason: "invalid UTF-8".into(),
                    }
                })?;
                Ok(NodeId::Fqdn(fqdn))
            }
            other => Err(UpfError::InvalidValue {
                field: "Node ID type",
                reason: format!("{other} is not 0=IPv4, 1=IPv6 or 2=FQDN"),
            }),
        }
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::NodeId, self.marshal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_ipv4() {
        let n = NodeId::new_ipv4(Ipv4Addr::new(10, 0, 0, 2));
        assert_eq!(NodeId::unmarshal(&n.marshal()).unwrap(), n);
    }

    #[test]
    fn roundtrip_ipv6() {
        let n = NodeId::new_ipv6(Ipv6Addr::LOCALHOST);
        assert_eq!(NodeId::unmarshal(&n.marshal()).unwrap(), n);
    }

    #[test]
    fn roundtrip_fqdn() {
        let n = NodeId::new_fqdn("upf.example.org");
        assert_eq!(NodeId::unmarshal(&n.marshal()).unwrap(), n);
    }

    #[test]
    fn unknown_type_byte_errors() {
        assert!(NodeId::unmarshal(&[9, 1, 2, 3]).is_err());
    }

    #[test]
    fn truncated_ipv4_errors() {
        assert!(NodeId::unmarshal(&[0, 10, 0]).is_err());
    }
}
