//! Bounded MPMC packet queue (§4.4). Workers poll with a short sleep rather
//! than a condition variable — an explicit design choice recorded in §5/§9,
//! not an oversight.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Mutex;

/// A single queued packet: raw bytes, the peer it arrived from, and which
/// socket (N3 vs N9) received it.
#[derive(Debug, Clone)]
pub struct QueueEntry {
    pub data: Vec<u8>,
    pub peer: SocketAddr,
    pub socket_id: usize,
}

pub struct PacketQueue {
    capacity: usize,
    inner: Mutex<VecDeque<QueueEntry>>,
}

impl PacketQueue {
    pub fn new(capacity: usize) -> Self {
        PacketQueue {
            capacity,
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Returns `false` (and drops the entry) when the queue is at capacity.
    pub fn enqueue(&self, entry: QueueEntry) -> bool {
        let mut q = self.inner.lock().unwrap();
        if q.len() >= self.capacity {
            return false;
        }
        q.push_back(entry);
        true
    }

    pub fn dequeue(&self) -> Option<QueueEntry> {
        self.inner.lock().unwrap().pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: u8) -> QueueEntry {
        QueueEntry {
            data: vec![n],
            peer: "127.0.0.1:2152".parse().unwrap(),
            socket_id: 0,
        }
    }

    #[test]
    fn fifo_order() {
        let q = PacketQueue::new(4);
        assert!(q.enqueue(entry(1)));
        assert!(q.enqueue(entry(2)));
        assert_eq!(q.dequeue().unwrap().data, vec![1]);
        assert_eq!(q.dequeue().unwrap().data, vec![2]);
    }

    #[test]
    fn overflow_rejects_past_capacity() {
        let q = PacketQueue::new(4);
        for i in 0..4 {
            assert!(q.enqueue(entry(i)));
        }
        for _ in 0..10 {
            assert!(!q.enqueue(entry(0xff)));
        }
        assert_eq!(q.len(), 4);
    }

    #[test]
    fn empty_dequeue_returns_none() {
        let q = PacketQueue::new(4);
        assert!(q.dequeue().is_none());
    }
}
