//! SNAT/DNAT rewrite with RFC 1624 incremental checksum update (§4.1, §4.6).
//! Operates on raw IPv4 packet bytes; callers are responsible for handing in
//! only packets that already passed the IPv4/ihl/transport-header
//! preconditions (this module does not re-derive them beyond a length check).

use std::net::Ipv4Addr;

const IP_PROTO_TCP: u8 = 6;
const IP_PROTO_UDP: u8 = 17;

/// Standard 16-bit one's-complement checksum over `data` (must be
/// even-length; an odd trailing byte is padded with zero per RFC 1071).
pub fn calc(data: &[u8]) -> u16 {
    let mut sum: u32 = 0;
    let mut chunks = data.chunks_exact(2);
    for chunk in &mut chunks {
        sum += u16::from_be_bytes([chunk[0], chunk[1]]) as u32;
    }
    if let [last] = chunks.remainder() {
        sum += (*last as u32) << 8;
    }
    while sum >> 16 != 0 {
        sum = (sum & 0xffff) + (sum >> 16);
    }
    !(sum as u16)
}

/// RFC 1624 incremental checksum update: given the old checksum and the
/// old/new values of a field that changed, returns the new checksum without
/// re-summing the whole packet.
pub fn update_after_nat(old_checksum: u16, old_value: u16, new_value: u16) -> u16 {
    let mut sum = !old_checksum as u32;
    sum += !old_value as u32 & 0xffff;
    sum += new_value as u32;
    while sum >> 16 != 0 {
        sum = (sum & 0xffff) + (sum >> 16);
    }
    !(sum as u16)
}

fn update_checksum_for_u16(checksum: u16, old: u16, new: u16) -> u16 {
    update_after_nat(checksum, old, new)
}

fn rewrite_ip_checksum(packet: &mut [u8], old_addr: Ipv4Addr, new_addr: Ipv4Addr) {
    let old_octets = old_addr.octets();
    let new_octets = new_addr.octets();
    let old_hi = u16::from_be_bytes([old_octets[0], old_octets[1]]);
    let old_lo = u16::from_be_bytes([old_octets[2], old_octets[3]]);
    let new_hi = u16::from_be_bytes([new_octets[0], new_octets[1]]);
    let new_lo = u16::from_be_bytes([new_octets[2], new_octets[3]]);

    let mut checksum = u16::from_be_bytes([packet[10], packet[11]]);
    checksum = update_checksum_for_u16(checksum, old_hi, new_hi);
    checksum = update_checksum_for_u16(checksum, old_lo, new_lo);
    packet[10..12].copy_from_slice(&checksum.to_be_bytes());
}

/// Rewrites the packet's source address/port to `new_addr`/`new_port` (SNAT,
/// uplink direction) or, symmetrically, the destination for DNAT downlink,
/// fixing up the IP header checksum and the TCP/UDP checksum (when present
/// and nonzero — a zero UDP checksum means "not in use" per RFC 768 and is
/// left untouched).
pub fn rewrite_source(packet: &mut [u8], new_addr: Ipv4Addr, new_port: u16) -> Option<()> {
    rewrite(packet, new_addr, new_port, true)
}

/// DNAT counterpart to [`rewrite_source`]. The running daemon has no N6
/// reader thread (no downlink packet is ever classified to a session), so
/// this is currently only exercised directly by callers, not wired into the
/// pipeline — see DESIGN.md's NAT engine entry.
pub fn rewrite_destination(packet: &mut [u8], new_addr: Ipv4Addr, new_port: u16) -> Option<()> {
    rewrite(packet, new_addr, new_port, false)
}

fn rewrite(packet: &mut [u8], new_addr: Ipv4Addr, new_port: u16, is_source: bool) -> Option<()> {
    if packet.len() < 20 || (packet[0] >> 4) != 4 {
        return None;
    }
    let ihl = (packet[0] & 0x0f) as usize * 4;
    if ihl < 20 || packet.len() < ihl {
        return None;
    }
    let protocol = packet[9];
    let addr_offset = if is_source { 12 } else { 16 };
    let old_addr = Ipv4Addr::new(
        packet[addr_offset],
        packet[addr_offset + 1],
        packet[addr_offset + 2],
        packet[addr_offset + 3],
    );

    match protocol {
        IP_PROTO_TCP | IP_PROTO_UDP => {
            let port_field_offset = if is_source { 0 } else { 2 };
            let transport_offset = ihl;
            if packet.len() < transport_offset + 4 {
                return None;
            }
            let port_offset = transport_offset + port_field_offset;
            let old_port = u16::from_be_bytes([packet[port_offset], packet[port_offset + 1]]);

            let checksum_offset = if protocol == IP_PROTO_TCP {
                transport_offset + 16
            } else {
                transport_offset + 6
            };
            if packet.len() < checksum_offset + 2 {
                return None;
            }
            let old_checksum = u16::from_be_bytes([packet[checksum_offset], packet[checksum_offset + 1]]);

            let skip_transport_checksum = protocol == IP_PROTO_UDP && old_checksum == 0;

            if !skip_transport_checksum {
                let old_octets = old_addr.octets();
                let new_octets = new_addr.octets();
                let mut checksum = old_checksum;
                checksum = update_checksum_for_u16(
                    checksum,
                    u16::from_be_bytes([old_octets[0], old_octets[1]]),
                    u16::from_be_bytes([new_octets[0], new_octets[1]]),
                );
                checksum = update_checksum_for_u16(
                    checksum,
                    u16::from_be_bytes([old_octets[2], old_octets[3]]),
                    u16::from_be_bytes([new_octets[2], new_octets[3]]),
                );
                checksum = update_checksum_for_u16(checksum, old_port, new_port);
                packet[checksum_offset..checksum_offset + 2].copy_from_slice(&checksum.to_be_bytes());
            }

            packet[port_offset..port_offset + 2].copy_from_slice(&new_port.to_be_bytes());
        }
        _ => {}
    }

    rewrite_ip_checksum(packet, old_addr, new_addr);
    packet[addr_offset..addr_offset + 4].copy_from_slice(&new_addr.octets());

    Some(())
}
