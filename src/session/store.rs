//! Session store: container lock over per-session locks, per §4.2.

use crate::error::UpfError;
use crate::session::{Interface, Session};
use crate::types::{Seid, Teid};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Thread-safe session table. The outer `Mutex` guards membership (insert,
/// lookup, delete); each session's rules are guarded independently so a
/// data-plane worker holding one session's lock never blocks another
/// worker's unrelated session.
pub struct SessionStore {
    capacity: usize,
    next_up_seid: Mutex<u64>,
    sessions: Mutex<HashMap<u64, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        SessionStore {
            capacity,
            next_up_seid: Mutex::new(0),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Invariant I2: every session gets a freshly allocated, unique UP-SEID.
    pub fn create(&self, cp_seid: Seid) -> Result<Seid, UpfError> {
        let mut sessions = self.sessions.lock().unwrap();
        if sessions.len() >= self.capacity {
            return Err(UpfError::NoResources);
        }
        let up_seid = {
            let mut next = self.next_up_seid.lock().unwrap();
            *next += 1;
            *next
        };
        sessions.insert(
            up_seid,
            Arc::new(Mutex::new(Session::new(up_seid, cp_seid.value()))),
        );
        Ok(Seid::new(up_seid))
    }

    pub fn find(&self, up_seid: Seid) -> Option<Arc<Mutex<Session>>> {
        self.sessions.lock().unwrap().get(&up_seid.value()).cloned()
    }

    /// Invariant I3: a TEID is scoped to its source interface, so the lookup
    /// always carries both. Ties across sessions favor the lowest UP-SEID.
    pub fn find_by_teid(&self, teid: Teid, source_interface: Interface) -> Option<(Seid, u16, u32)> {
        let sessions = self.sessions.lock().unwrap();
        let mut best: Option<(u64, u16, u32)> = None;
        for (&up_seid, session) in sessions.iter() {
            let session = session.lock().unwrap();
            if let Some(pdr) = session.match_pdr(teid, source_interface) {
                let candidate = (up_seid, pdr.rule_id, pdr.precedence);
                best = Some(match best {
                    None => candidate,
                    Some(cur) if candidate.2 > cur.2 => candidate,
                    Some(cur) if candidate.2 == cur.2 && candidate.0 < cur.0 => candidate,
                    Some(cur) => cur,
                });
            }
        }
        best.map(|(up_seid, rule_id, precedence)| (Seid::new(up_seid), rule_id, precedence))
    }

    pub fn delete(&self, up_seid: Seid) -> bool {
        self.sessions.lock().unwrap().remove(&up_seid.value()).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Far, FarAction, Pdr};

    #[test]
    fn create_allocates_unique_up_seids() {
        let store = SessionStore::new(4);
        let a = store.create(Seid::new(1)).unwrap();
        let b = store.create(Seid::new(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn create_errors_when_full() {
        let store = SessionStore::new(1);
        store.create(Seid::new(1)).unwrap();
        assert!(matches!(store.create(Seid::new(2)), Err(UpfError::NoResources)));
    }

    #[test]
    fn delete_removes_session() {
        let store = SessionStore::new(4);
        let up_seid = store.create(Seid::new(1)).unwrap();
        assert!(store.delete(up_seid));
        assert!(store.find(up_seid).is_none());
    }

    #[test]
    fn find_by_teid_resolves_across_sessions() {
        let store = SessionStore::new(4);
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
                    precedence: 10,
                    source_interface: Interface::Access,
                    teid: Teid::new(0x100),
                    far_id: 1,
                    qer_id: None,
                })
                .unwrap();
        }
        let (found_seid, rule_id, _) = store
            .find_by_teid(Teid::new(0x100), Interface::Access)
            .unwrap();
        assert_eq!(found_seid, up_seid);
        assert_eq!(rule_id, 1);
    }
}
