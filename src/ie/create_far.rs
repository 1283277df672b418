//! Create FAR IE — grouped: FAR ID, Apply Action, Forwarding Parameters.

use crate::error::UpfError;
use crate::ie::apply_action::ApplyAction;
use crate::ie::far_id::FarId;
use crate::ie::forwarding_parameters::ForwardingParameters;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFar {
    pub far_id: FarId,
    pub apply_action: ApplyAction,
    pub forwarding_parameters: Option<ForwardingParameters>,
}

impl CreateFar {
    pub fn new(
        far_id: FarId,
        apply_action: ApplyAction,
        forwarding_parameters: Option<ForwardingParameters>,
    ) -> Self {
        CreateFar {
            far_id,
            apply_action,
            forwarding_parameters,
        }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut children = vec![self.far_id.to_ie(), self.apply_action.to_ie()];
        if let Some(fp) = &self.forwarding_parameters {
            children.push(fp.to_ie());
        }
        Ie::new_grouped(IeType::CreateFar, &children).payload
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, UpfError> {
        let mut far_id = None;
        let mut apply_action = None;
        let mut forwarding_parameters = None;

        for ie in Ie::iter_all(payload) {
            let ie = ie?;
            match ie.ie_type {
                IeType::FarId => far_id = Some(FarId::unmarshal(&ie.payload)?),
                IeType::ApplyAction => apply_action = Some(ApplyAction::unmarshal(&ie.payload)?),
                IeType::ForwardingParameters => {
                    forwarding_parameters = Some(ForwardingParameters::unmarshal(&ie.payload)?)
                }
                _ => (),
            }
        }

        Ok(CreateFar {
            far_id: far_id.ok_or(UpfError::MissingMandatoryIe("FAR ID"))?,
            apply_action: apply_action.ok_or(UpfError::MissingMandatoryIe("Apply Action"))?,
            forwarding_parameters,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::CreateFar, self.marshal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::destination_interface::{DestinationInterface, Interface};

    #[test]
    fn roundtrip_drop() {
        let far = CreateFar::new(FarId::new(1), ApplyAction::DROP, None);
        assert_eq!(CreateFar::unmarshal(&far.marshal()).unwrap(), far);
    }

    #[test]
    fn roundtrip_forward() {
        let fp = ForwardingParameters::new(DestinationInterface::new(Interface::Core), None);
        let far = CreateFar::new(FarId::new(2), ApplyAction::FORW, Some(fp));
        assert_eq!(CreateFar::unmarshal(&far.marshal()).unwrap(), far);
    }

    #[test]
    fn missing_apply_action_errors() {
        let far_id_ie = FarId::new(1).to_ie();
        assert!(CreateFar::unmarshal(&far_id_ie.marshal()).is_err());
    }
}
