//! Runtime session/PDR/FAR/QER rule store — the in-memory shape a PFCP
//! session takes once decoded off the wire, independent of how it arrived.

pub mod store;

use crate::types::Teid;
use std::net::Ipv4Addr;

/// Fixed per-session capacity for PDRs, FARs and QERs.
pub const MAX_RULES_PER_SESSION: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interface {
    Access,
    Core,
    SgiLan,
    CpFunction,
    /// Wire value 4, "5G VN internal" (§3). No PDR/FAR in this core is
    /// expected to carry it; it exists so an untranslated wire value is
    /// preserved instead of being folded into Access or Core.
    VnInternal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pdr {
    pub rule_id: u16,
    pub precedence: u32,
    pub source_interface: Interface,
    pub teid: Teid,
    pub far_id: u16,
    pub qer_id: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FarAction {
    Drop,
    Forward,
    Buffer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OuterHeaderCreation {
    pub teid: Teid,
    pub ipv4: Ipv4Addr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Far {
    pub far_id: u16,
    pub action: FarAction,
    pub destination_interface: Interface,
    pub outer_header_creation: Option<OuterHeaderCreation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Qer {
    pub qer_id: u16,
    pub qfi: u8,
    pub gate_open_uplink: bool,
    pub gate_open_downlink: bool,
    pub mbr_ul_bps: Option<u64>,
    pub mbr_dl_bps: Option<u64>,
    pub gbr_ul_bps: Option<u64>,
    pub gbr_dl_bps: Option<u64>,
}

impl Qer {
    pub fn new(qer_id: u16) -> Self {
        Qer {
            qer_id,
            qfi: 5,
            gate_open_uplink: true,
            gate_open_downlink: true,
            mbr_ul_bps: None,
            mbr_dl_bps: None,
            gbr_ul_bps: None,
            gbr_dl_bps: None,
        }
    }

    /// Packets-per-second cap derived from the uplink MBR when no explicit
    /// PPS limit was configured: `max(ul_mbr_kbps / 12, 100)`.
    pub fn derived_pps(&self) -> Option<u64> {
        self.mbr_ul_bps.map(|bps| {
            let kbps = bps / 1000;
            std::cmp::max(kbps / 12, 100)
        })
    }
}

/// A PFCP session: its rule sets plus the CP/UP SEID pair identifying it.
#[derive(Debug, Clone)]
pub struct Session {
    pub up_seid: u64,
    pub cp_seid: u64,
    pdrs: Vec<Pdr>,
    fars: Vec<Far>,
    qers: Vec<Qer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("session already holds the maximum of {0} rules")]
    Full(usize),
    #[error("FAR {0} referenced by a PDR does not exist in this session")]
    UnknownFar(u16),
}

impl Session {
    pub fn new(up_seid: u64, cp_seid: u64) -> Self {
        Session {
            up_seid,
            cp_seid,
            pdrs: Vec::with_capacity(MAX_RULES_PER_SESSION),
            fars: Vec::with_capacity(MAX_RULES_PER_SESSION),
            qers: Vec::with_capacity(MAX_RULES_PER_SESSION),
        }
    }

    pub fn pdrs(&self) -> &[Pdr] {
        &self.pdrs
    }

    pub fn fars(&self) -> &[Far] {
        &self.fars
    }

    pub fn qers(&self) -> &[Qer] {
        &self.qers
    }

    /// Invariant I1: a PDR's `far_id` must already exist in the session.
    pub fn insert_pdr(&mut self, pdr: Pdr) -> Result<(), RuleError> {
        if self.pdrs.len() >= MAX_RULES_PER_SESSION {
            return Err(RuleError::Full(MAX_RULES_PER_SESSION));
        }
        if self.find_far(pdr.far_id).is_none() {
            return Err(RuleError::UnknownFar(pdr.far_id));
        }
        self.pdrs.retain(|p| p.rule_id != pdr.rule_id);
        self.pdrs.push(pdr);
        Ok(())
    }

    pub fn insert_far(&mut self, far: Far) -> Result<(), RuleError> {
        if self.fars.len() >= MAX_RULES_PER_SESSION && self.find_far(far.far_id).is_none() {
            return Err(RuleError::Full(MAX_RULES_PER_SESSION));
        }
        self.fars.retain(|f| f.far_id != far.far_id);
        self.fars.push(far);
        Ok(())
    }

    pub fn insert_qer(&mut self, qer: Qer) -> Result<(), RuleError> {
        if self.qers.len() >= MAX_RULES_PER_SESSION && self.find_qer(qer.qer_id).is_none() {
            return Err(RuleError::Full(MAX_RULES_PER_SESSION));
        }
        self.qers.retain(|q| q.qer_id != qer.qer_id);
        self.qers.push(qer);
        Ok(())
    }

    pub fn remove_pdr(&mut self, rule_id: u16) {
        self.pdrs.retain(|p| p.rule_id != rule_id);
    }

    pub fn remove_far(&mut self, far_id: u16) {
        self.fars.retain(|f| f.far_id != far_id);
    }

    pub fn update_pdr_precedence(&mut self, rule_id: u16, precedence: u32) {
        if let Some(p) = self.pdrs.iter_mut().find(|p| p.rule_id == rule_id) {
            p.precedence = precedence;
        }
    }

    pub fn update_pdr_far(&mut self, rule_id: u16, far_id: u16) {
        if let Some(p) = self.pdrs.iter_mut().find(|p| p.rule_id == rule_id) {
            p.far_id = far_id;
        }
    }

    pub fn update_far_action(&mut self, far_id: u16, action: FarAction) {
        if let Some(f) = self.fars.iter_mut().find(|f| f.far_id == far_id) {
            f.action = action;
        }
    }

    pub fn find_far(&self, far_id: u16) -> Option<&Far> {
        self.fars.iter().find(|f| f.far_id == far_id)
    }

    pub fn find_qer(&self, qer_id: u16) -> Option<&Qer> {
        self.qers.iter().find(|q| q.qer_id == qer_id)
    }

    /// Invariant I4: greatest-precedence PDR wins; ties favor whichever
    /// matching PDR was inserted first (`pdrs` preserves insertion order,
    /// and a strict `>` comparison keeps the earliest one on a tie).
    pub fn match_pdr(&self, teid: Teid, source_interface: Interface) -> Option<&Pdr> {
        let mut best: Option<&Pdr> = None;
        for pdr in &self.pdrs {
            if pdr.teid != teid || pdr.source_interface != source_interface {
                continue;
            }
            best = match best {
                None => Some(pdr),
                Some(cur) if pdr.precedence > cur.precedence => Some(pdr),
                Some(cur) => Some(cur),
            };
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_far(far_id: u16) -> Session {
        let mut s = Session::new(1, 1);
        s.insert_far(Far {
            far_id,
            action: FarAction::Forward,
            destination_interface: Interface::Core,
            outer_header_creation: None,
        })
        .unwrap();
        s
    }

    #[test]
    fn pdr_rejected_without_far() {
        let mut s = Session::new(1, 1);
        let err = s
            .insert_pdr(Pdr {
                rule_id: 1,
                precedence: 100,
                source_interface: Interface::Access,
                teid: Teid::new(0x100),
                far_id: 1,
                qer_id: None,
            })
            .unwrap_err();
        assert_eq!(err, RuleError::UnknownFar(1));
    }

    #[test]
    fn precedence_tie_break_prefers_first_inserted() {
        let mut s = session_with_far(1);
        s.insert_pdr(Pdr {
            rule_id: 10,
            precedence: 100,
            source_interface: Interface::Access,
            teid: Teid::new(0x200),
            far_id: 1,
            qer_id: None,
        })
        .unwrap();
        s.insert_pdr(Pdr {
            rule_id: 11,
            precedence: 100,
            source_interface: Interface::Access,
            teid: Teid::new(0x200),
            far_id: 1,
            qer_id: None,
        })
        .unwrap();
        let matched = s.match_pdr(Teid::new(0x200), Interface::Access).unwrap();
        assert_eq!(matched.rule_id, 10);
    }

    #[test]
    fn greatest_precedence_wins() {
        let mut s = session_with_far(1);
        s.insert_far(Far {
            far_id: 2,
            action: FarAction::Forward,
            destination_interface: Interface::Core,
            outer_header_creation: None,
        })
        .unwrap();
        s.insert_pdr(Pdr {
            rule_id: 10,
            precedence: 50,
            source_interface: Interface::Access,
            teid: Teid::new(0x200),
            far_id: 1,
            qer_id: None,
        })
        .unwrap();
        s.insert_pdr(Pdr {
            rule_id: 11,
            precedence: 200,
            source_interface: Interface::Access,
            teid: Teid::new(0x200),
            far_id: 2,
            qer_id: None,
        })
        .unwrap();
        let matched = s.match_pdr(Teid::new(0x200), Interface::Access).unwrap();
        assert_eq!(matched.rule_id, 11);
    }

    #[test]
    fn vn_internal_pdr_does_not_match_access_traffic() {
        let mut s = session_with_far(1);
        s.insert_pdr(Pdr {
            rule_id: 10,
            precedence: 100,
            source_interface: Interface::VnInternal,
            teid: Teid::new(0x200),
            far_id: 1,
            qer_id: None,
        })
        .unwrap();
        assert!(s.match_pdr(Teid::new(0x200), Interface::Access).is_none());
        assert!(s
            .match_pdr(Teid::new(0x200), Interface::VnInternal)
            .is_some());
    }

    #[test]
    fn derived_pps_floor_is_100() {
        let mut qer = Qer::new(1);
        qer.mbr_ul_bps = Some(1_000_000);
        assert_eq!(qer.derived_pps(), Some(100));
    }

    #[test]
    fn derived_pps_scales_with_mbr() {
        let mut qer = Qer::new(1);
        qer.mbr_ul_bps = Some(120_000_000);
        assert_eq!(qer.derived_pps(), Some(10_000));
    }

    #[test]
    fn full_session_rejects_extra_pdr() {
        let mut s = session_with_far(1);
        for i in 0..MAX_RULES_PER_SESSION as u16 {
            s.insert_pdr(Pdr {
                rule_id: i,
                precedence: i as u32,
                source_interface: Interface::Access,
                teid: Teid::new(i as u32),
                far_id: 1,
                qer_id: None,
            })
            .unwrap();
        }
        let err = s
            .insert_pdr(Pdr {
                rule_id: 99,
                precedence: 1,
                source_interface: Interface::Access,
                teid: Teid::new(99),
                far_id: 1,
                qer_id: None,
            })
            .unwrap_err();
        assert_eq!(err, RuleError::Full(MAX_RULES_PER_SESSION));
    }
}
