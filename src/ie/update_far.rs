//! Update FAR IE — selectively-present fields of an existing FAR.

use crate::error::UpfError;
use crate::ie::apply_action::ApplyAction;
use crate::ie::far_id::FarId;
use crate::ie::forwarding_parameters::ForwardingParameters;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateFar {
    pub far_id: FarId,
    pub apply_action: Option<ApplyAction>,
    pub forwarding_parameters: Option<ForwardingParameters>,
}

impl UpdateFar {
    pub fn new(far_id: FarId) -> Self {
        UpdateFar {
            far_id,
            apply_action: None,
            forwarding_parameters: None,
        }
    }

    pub fn with_apply_action(mut self, apply_action: ApplyAction) -> Self {
        self.apply_action = Some(apply_action);
        self
    }

    pub fn with_forwarding_parameters(mut self, forwarding_parameters: ForwardingParameters) -> Self {
        self.forwarding_parameters = Some(forwarding_parameters);
        self
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut children = vec![self.far_id.to_ie()];
        if let Some(apply_action) = &self.apply_action {
            children.push(apply_action.to_ie());
        }
        if let Some(fp) = &self.forwarding_parameters {
            children.push(fp.to_ie());
        }
        Ie::new_grouped(IeType::UpdateFar, &children).payload
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

        Ok(UpdateFar {
            far_id: far_id.ok_or(UpfError::MissingMandatoryIe("FAR ID"))?,
            apply_action,
            forwarding_parameters,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::UpdateFar, self.marshal())
    }
}
