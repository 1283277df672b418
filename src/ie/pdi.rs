//! PDI (Packet Detection Information) IE — grouped{Source Interface, F-TEID}.

use crate::error::UpfError;
use crate::ie::f_teid::Fteid;
use crate::ie::source_interface::SourceInterface;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pdi {
    pub source_interface: SourceInterface,
    pub f_teid: Option<Fteid>,
}

impl Pdi {
    pub fn new(source_interface: SourceInterface, f_teid: Option<Fteid>) -> Self {
        Pdi {
            source_interface,
            f_teid,
        }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut children = vec![self.source_interface.to_ie()];
        if let Some(f_teid) = &self.f_teid {
            children.push(f_teid.to_ie());
        }
        Ie::new_grouped(IeType::Pdi, &children).payload
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, UpfError> {
        let mut source_interface = None;
        let mut f_teid = None;

        for ie in Ie::iter_all(payload) {
            let ie = ie?;
            match ie.ie_type {
                IeType::SourceInterface => {
                    source_interface = Some(SourceInterface::unmarshal(&ie.payload)?)
                }
                IeType::Fteid => f_teid = Some(Fteid::unmarshal(&ie.payload)?),
                _ => (),
            }
        }

        Ok(Pdi {
            source_interface: source_interface
                .ok_or(UpfError::MissingMandatoryIe("Source Interface"))?,
            f_teid,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::Pdi, self.marshal())
    }
}
