//! Create QER IE — grouped: QER ID, Gate Status, MBR, GBR, QFI.

use crate::error::UpfError;
use crate::ie::gate_status::GateStatus;
use crate::ie::gbr::Gbr;
use crate::ie::mbr::Mbr;
use crate::ie::qer_id::QerId;
use crate::ie::qfi::Qfi;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateQer {
    pub qer_id: QerId,
    pub gate_status: Option<GateStatus>,
    pub mbr: Option<Mbr>,
    pub gbr: Option<Gbr>,
    pub qfi: Option<Qfi>,
}

impl CreateQer {
    pub fn new(qer_id: QerId) -> Self {
        CreateQer {
            qer_id,
            gate_status: None,
            mbr: None,
            gbr: None,
            qfi: None,
        }
    }

    pub fn with_gate_status(mut self, gate_status: GateStatus) -> Self {
        self.gate_status = Some(gate_status);
        self
    }

    pub fn with_mbr(mut self, mbr: Mbr) -> Self {
        self.mbr = Some(mbr);
        self
    }

    pub fn with_gbr(mut self, gbr: Gbr) -> Self {
        self.gbr = Some(gbr);
        self
    }

    pub fn with_qfi(mut self, qfi: Qfi) -> Self {
        self.qfi = Some(qfi);
        self
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut children = vec![self.qer_id.to_ie()];
        if let Some(gate_status) = &self.gate_status {
            children.push(gate_status.to_ie());
        }
        if let Some(mbr) = &self.mbr {
            children.push(mbr.to_ie());
        }
        if let Some(gbr) = &self.gbr {
            children.push(gbr.to_ie());
        }
        if let Some(qfi) = &self.qfi {
            children.push(qfi.to_ie());
        }
        Ie::new_grouped(IeType::CreateQer, &children).payload
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, UpfError> {
        let mut qer_id = None;
        let mut gate_status = None;
        let mut mbr = None;
        let mut gbr = None;
        let mut qfi = None;

        for ie in Ie::iter_all(payload) {
            let ie = ie?;
            match ie.ie_type {
                IeType::QerId => qer_id = Some(QerId::unmarshal(&ie.payload)?),
                IeType::GateStatus => gate_status = Some(GateStatus::unmarshal(&ie.payload)?),
                IeType::Mbr => mbr = Some(Mbr::unmarshal(&ie.payload)?),
                IeType::Gbr => gbr = Some(Gbr::unmarshal(&ie.payload)?),
                IeType::Qfi => qfi = Some(Qfi::unmarshal(&ie.payload)?),
                _ => (),
            }
        }

        Ok(CreateQer {
            qer_id: qer_id.ok_or(UpfError::MissingMandatoryIe("QER ID"))?,
            gate_status,
            mbr,
            gbr,
            qfi,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::CreateQer, self.marshal())
    }
}
