//! Five-stage data-plane pipeline (§4.5): Parse, session lookup, PDR match,
//! FAR lookup, execute. Each worker thread owns one [`Pipeline`] reference
//! and runs packets dequeued from the [`crate::queue::PacketQueue`] through
//! it one at a time.

use crate::gtpu::GtpuHeader;
use crate::metrics::Metrics;
use crate::nat;
use crate::queue::QueueEntry;
use crate::session::store::SessionStore;
use crate::session::{Far, FarAction, Interface};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;
use tracing::{debug, trace};

pub const GTPU_PORT: u16 = 2152;

/// Which ingress socket a packet was read from — determines the source
/// interface a PDR match is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSocket {
    N3,
    N9,
}

fn interface_for_socket(socket: SourceSocket) -> Interface {
    match socket {
        SourceSocket::N3 => Interface::Access,
        SourceSocket::N9 => Interface::SgiLan,
    }
}

/// Where a forwarded packet actually goes: re-encapsulated GTP-U toward a
/// peer UPF/gNodeB, or decapsulated onto the N6 TUN device. Implemented by
/// the daemon binary; a test double records calls instead of touching a
/// socket.
pub trait Egress: Send + Sync {
    fn send_gtpu(&self, dest: SocketAddrV4, data: &[u8]);
    fn send_n6(&self, data: &[u8]);
}

pub struct Pipeline {
    store: Arc<SessionStore>,
    metrics: Arc<Metrics>,
}

impl Pipeline {
    pub fn new(store: Arc<SessionStore>, metrics: Arc<Metrics>) -> Self {
        Pipeline { store, metrics }
    }

    /// Runs one dequeued packet through all five stages. Any failed stage
    /// counts the packet as dropped; the caller simply dequeues the next
    /// one (§4.5's "the worker returns to dequeue").
    pub fn process(&self, worker_id: usize, entry: &QueueEntry, source: SourceSocket, egress: &dyn Egress) {
        let (header, offset) = match GtpuHeader::unmarshal(&entry.data) {
            Ok(parsed) => parsed,
            Err(_) => {
                self.metrics.incr_gtpu_dropped();
                return;
            }
        };
        if !header.carries_user_data() {
            self.metrics.incr_gtpu_dropped();
            return;
        }
        let payload = &entry.data[offset..];
        let source_iface = interface_for_socket(source);

        let Some((up_seid, _, _)) = self.store.find_by_teid(header.teid, source_iface) else {
            trace!(worker_id, teid = %header.teid, "no session owns this TEID");
            self.metrics.incr_gtpu_dropped();
            return;
        };
        let Some(session_arc) = self.store.find(up_seid) else {
            self.metrics.incr_gtpu_dropped();
            return;
        };

        let far: Far = {
            let session = session_arc.lock().unwrap();
            let Some(pdr) = session.match_pdr(header.teid, source_iface) else {
                self.metrics.incr_gtpu_dropped();
                return;
            };
            debug!(
                worker_id,
                teid = %header.teid,
                pdr_id = pdr.rule_id,
                precedence = pdr.precedence,
                "classified packet"
            );
            match session.find_far(pdr.far_id) {
                Some(far) => *far,
                None => {
                    self.metrics.incr_gtpu_dropped();
                    return;
                }
            }
        };

        self.execute(far, payload, egress);
    }

    fn execute(&self, far: Far, payload: &[u8], egress: &dyn Egress) {
        match far.action {
            FarAction::Drop => {
                self.metrics.incr_gtpu_dropped();
            }
            FarAction::Buffer => {
                // Buffering is accepted but not implemented (§9): drop and count.
                self.metrics.incr_gtpu_dropped();
            }
            FarAction::Forward => match far.destination_interface {
                Interface::Core => self.forward_to_n6(payload, egress),
                Interface::Access | Interface::SgiLan | Interface::CpFunction => {
                    self.forward_as_gtpu(far, payload, egress)
                }
                Interface::VnInternal => {
                    // 5G VN internal forwarding has no egress path in this
                    // core; count it the same as any other unsupported FAR.
                    self.metrics.incr_gtpu_dropped();
                }
            },
        }
    }

    fn forward_as_gtpu(&self, far: Far, payload: &[u8], egress: &dyn Egress) {
        let Some(ohc) = far.outer_header_creation else {
            self.metrics.incr_gtpu_dropped();
            return;
        };
        let header = GtpuHeader::new(ohc.teid, payload.len() as u16);
        let mut out = header.marshal();
        out.extend_from_slice(payload);
        egress.send_gtpu(SocketAddrV4::new(ohc.ipv4, GTPU_PORT), &out);
        self.metrics.incr_gtpu_tx();
    }

    /// N6 egress: SNAT the decapsulated inner IP packet before handing it
    /// to the TUN device (§4.6). A NAT precondition failure counts as a
    /// drop, same as any other data-plane failure (§7).
    fn forward_to_n6(&self, payload: &[u8], egress: &dyn Egress) {
        let mut packet = payload.to_vec();
        match nat::rewrite_source(&mut packet, self.nat_public_ip(), self.nat_public_port()) {
            Some(()) => {
                egress.send_n6(&packet);
                self.metrics.incr_gtpu_tx();
            }
            None => {
                self.metrics.incr_gtpu_dropped();
            }
        }
    }

    // TODO: source port/IP allocation for SNAT should come from a
    // configurable NAT pool (§4.6); a single static mapping is a stand-in
    // until that pool exists.
    fn nat_public_ip(&self) -> Ipv4Addr {
        Ipv4Addr::new(192, 0, 2, 1)
    }

    fn nat_public_port(&self) -> u16 {
        55555
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Far, FarAction, OuterHeaderCreation, Pdr};
    use crate::types::{Seid, Teid};
    use std::net::Ipv4Addr;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingEgress {
        gtpu: Mutex<Vec<(SocketAddrV4, Vec<u8>)>>,
        n6: Mutex<Vec<Vec<u8>>>,
    }

    impl Egress for RecordingEgress {
        fn send_gtpu(&self, dest: SocketAddrV4, data: &[u8]) {
            self.gtpu.lock().unwrap().push((dest, data.to_vec()));
        }
        fn send_n6(&self, data: &[u8]) {
            self.n6.lock().unwrap().push(data.to_vec());
        }
    }

    fn entry_with_gtpu(teid: Teid, payload: &[u8]) -> QueueEntry {
        let header = GtpuHeader::new(teid, payload.len() as u16);
        let mut data = header.marshal();
        data.extend_from_slice(payload);
        QueueEntry {
            data,
            peer: "127.0.0.1:2152".parse().unwrap(),
            socket_id: 0,
        }
    }

    fn build_udp_packet() -> Vec<u8> {
        let mut packet = vec![0u8; 20 + 8];
        packet[0] = 0x45;
        packet[2..4].copy_from_slice(&(packet.len() as u16).to_be_bytes());
        packet[9] = 17;
        packet[12..16].copy_from_slice(&Ipv4Addr::new(10, 45, 0, 7).octets());
        packet[16..20].copy_from_slice(&Ipv4Addr::new(8, 8, 8, 8).octets());
        let checksum = nat::calc(&packet[0..20]);
        packet[10..12].copy_from_slice(&checksum.to_be_bytes());
        packet
    }

    #[test]
    fn forward_to_peer_builds_fresh_gtpu_header() {
        let store = Arc::new(SessionStore::new(4));
        let metrics = Arc::new(Metrics::new());
        let pipeline = Pipeline::new(store.clone(), metrics.clone());

        let up_seid = store.create(Seid::new(1)).unwrap();
        let session_arc = store.find(up_seid).unwrap();
        {
            let mut session = session_arc.lock().unwrap();
            session
                .insert_far(Far {
                    far_id: 1,
                    action: FarAction::Forward,
                    destination_interface: Interface::Access,
                    outer_header_creation: Some(OuterHeaderCreation {
                        teid: Teid::new(0x999),
                        ipv4: Ipv4Addr::new(10, 1, 1, 1),
                    }),
                })
                .unwrap();
            session
                .insert_pdr(Pdr {
                    rule_id: 1,
                    precedence: 100,
                    source_interface: Interface::Access,
                    teid: Teid::new(0x100),
                    far_id: 1,
                    qer_id: None,
                })
                .unwrap();
        }

        let entry = entry_with_gtpu(Teid::new(0x100), b"hello");
        let egress = RecordingEgress::default();
        pipeline.process(0, &entry, SourceSocket::N3, &egress);

        assert_eq!(metrics.snapshot().gtpu_packets_tx, 1);
        let sent = egress.gtpu.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0.ip(), &Ipv4Addr::new(10, 1, 1, 1));
    }

    #[test]
    fn forward_to_n6_applies_snat() {
        let store = Arc::new(SessionStore::new(4));
        let metrics = Arc::new(Metrics::new());
        let pipeline = Pipeline::new(store.clone(), metrics.clone());

        let up_seid = store.create(Seid::new(1)).unwrap();
        let session_arc = store.find(up_seid).unwrap();
        {
            let mut session = session_arc.lock().unwrap();
            session
                .insert_far(Far {
                    far_id: 1,
                    action: FarAction::Forward,
                    destination_interface: Interface::Core,
                    outer_header_creation: None,
                })
                .unwrap();
            session
                .insert_pdr(Pdr {
                    rule_id: 1,
                    precedence: 100,
                    source_interface: Interface::Access,
                    teid: Teid::new(0x100),
                    far_id: 1,
                    qer_id: None,
                })
                .unwrap();
        }

        let inner_ip = build_udp_packet();
        let entry = entry_with_gtpu(Teid::new(0x100), &inner_ip);
        let egress = RecordingEgress::default();
        pipeline.process(0, &entry, SourceSocket::N3, &egress);

        assert_eq!(metrics.snapshot().gtpu_packets_tx, 1);
        let sent = egress.n6.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(&sent[0][12..16], &Ipv4Addr::new(192, 0, 2, 1).octets());
    }

    #[test]
    fn drop_action_counts_without_sending() {
        let store = Arc::new(SessionStore::new(4));
        let metrics = Arc::new(Metrics::new());
        let pipeline = Pipeline::new(store.clone(), metrics.clone());

        let up_seid = store.create(Seid::new(1)).unwrap();
        let session_arc = store.find(up_seid).unwrap();
        {
            let mut session = session_arc.lock().unwrap();
            session
                .insert_far(Far {
                    far_id: 1,
                    action: FarAction::Drop,
                    destination_interface: Interface::Core,
                    outer_header_creation: None,
                })
                .unwrap();
            session
                .insert_pdr(Pdr {
                    rule_id: 1,
                    precedence: 100,
                    source_interface: Interface::Access,
                    teid: Teid::new(0x100),
                    far_id: 1,
                    qer_id: None,
                })
                .unwrap();
        }

        let entry = entry_with_gtpu(Teid::new(0x100), b"x");
        let egress = RecordingEgress::default();
        pipeline.process(0, &entry, SourceSocket::N3, &egress);

        assert_eq!(metrics.snapshot().gtpu_packets_dropped, 1);
        assert_eq!(metrics.snapshot().gtpu_packets_tx, 0);
    }

    #[test]
    fn vn_internal_destination_is_dropped_not_forwarded() {
        let store = Arc::new(SessionStore::new(4));
        let metrics = Arc::new(Metrics::new());
        let pipeline = Pipeline::new(store.clone(), metrics.clone());

        let up_seid = store.create(Seid::new(1)).unwrap();
        let session_arc = store.find(up_seid).unwrap();
        {
            let mut session = session_arc.lock().unwrap();
            session
                .insert_far(Far {
                    far_id: 1,
                    action: FarAction::Forward,
                    destination_interface: Interface::VnInternal,
                    outer_header_creation: None,
                })
                .unwrap();
            session
                .insert_pdr(Pdr {
                    rule_id: 1,
                    precedence: 100,
                    source_interface: Interface::Access,
                    teid: Teid::new(0x100),
                    far_id: 1,
                    qer_id: None,
                })
                .unwrap();
        }

        let entry = entry_with_gtpu(Teid::new(0x100), b"x");
        let egress = RecordingEgress::default();
        pipeline.process(0, &entry, SourceSocket::N3, &egress);

        assert_eq!(metrics.snapshot().gtpu_packets_dropped, 1);
        assert!(egress.gtpu.lock().unwrap().is_empty());
        assert!(egress.n6.lock().unwrap().is_empty());
    }

    #[test]
    fn no_matching_session_is_dropped() {
        let store = Arc::new(SessionStore::new(4));
        let metrics = Arc::new(Metrics::new());
        let pipeline = Pipeline::new(store, metrics.clone());

        let entry = entry_with_gtpu(Teid::new(0xDEAD), b"x");
        let egress = RecordingEgress::default();
        pipeline.process(0, &entry, SourceSocket::N3, &egress);

        assert_eq!(metrics.snapshot().gtpu_packets_dropped, 1);
    }
}
