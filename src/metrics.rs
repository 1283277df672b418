//! Named atomic counters (SPEC_FULL §10). Deliberately not a statistics
//! *subsystem* — just the bare counters the data plane must maintain.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    pub gtpu_packets_tx: AtomicU64,
    pub gtpu_packets_dropped: AtomicU64,
    pub pfcp_malformed: AtomicU64,
    pub pfcp_requests_handled: AtomicU64,
    pub queue_overflow: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub gtpu_packets_tx: u64,
    pub gtpu_packets_dropped: u64,
    pub pfcp_malformed: u64,
    pub pfcp_requests_handled: u64,
    pub queue_overflow: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Metrics::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            gtpu_packets_tx: self.gtpu_packets_tx.load(Ordering::Relaxed),
            gtpu_packets_dropped: self.gtpu_packets_dropped.load(Ordering::Relaxed),
            pfcp_malformed: self.pfcp_malformed.load(Ordering::Relaxed),
            pfcp_requests_handled: self.pfcp_requests_handled.load(Ordering::Relaxed),
            queue_overflow: self.queue_overflow.load(Ordering::Relaxed),
        }
    }

    pub fn incr_gtpu_tx(&self) {
        self.gtpu_packets_tx.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_gtpu_dropped(&self) {
        self.gtpu_packets_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_pfcp_malformed(&self) {
        self.pfcp_malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_pfcp_handled(&self) {
        self.pfcp_requests_handled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_queue_overflow(&self) {
        self.queue_overflow.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_increments() {
        let m = Metrics::new();
        m.incr_gtpu_tx();
        m.incr_gtpu_tx();
        m.incr_gtpu_dropped();
        let snap = m.snapshot();
        assert_eq!(snap.gtpu_packets_tx, 2);
        assert_eq!(snap.gtpu_packets_dropped, 1);
        assert_eq!(snap.pfcp_malformed, 0);
    }
}
