//! Information Elements (IEs) for the PFCP subset this UPF needs.
//!
//! Every IE type outside this list is a legitimate part of PFCP (3GPP TS
//! 29.244 defines well over a hundred of them) but this core only needs to
//! provision the data path described in the spec's §6; anything else is
//! skipped by its declared length, never decoded, exactly like a generic
//! PFCP stack would ignore IEs a particular procedure doesn't use.

pub mod apply_action;
pub mod cause;
pub mod create_far;
pub mod create_pdr;
pub mod create_qer;
pub mod destination_interface;
pub mod f_teid;
pub mod far_id;
pub mod forwarding_parameters;
pub mod fseid;
pub mod gate_status;
pub mod gbr;
pub mod mbr;
pub mod node_id;
pub mod outer_header_creation;
pub mod pdi;
pub mod pdr_id;
pub mod precedence;
pub mod qer_id;
pub mod qfi;
pub mod recovery_time_stamp;
pub mod remove_far;
pub mod remove_pdr;
pub mod source_interface;
pub mod update_far;
pub mod update_pdr;
pub mod update_qer;

use crate::error::UpfError;

/// IE type codes recognized by this core (3GPP TS 29.244 assigned values).
/// Anything not listed here is `Other(raw)` and is skipped by length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IeType {
    CreatePdr,
    Pdi,
    CreateFar,
    ForwardingParameters,
    CreateQer,
    UpdateQer,
    UpdatePdr,
    UpdateFar,
    RemovePdr,
    RemoveFar,
    Cause,
    SourceInterface,
    Fteid,
    GateStatus,
    Mbr,
    Gbr,
    Precedence,
    DestinationInterface,
    ApplyAction,
    PdrId,
    Fseid,
    NodeId,
    RecoveryTimeStamp,
    FarId,
    QerId,
    Qfi,
    OuterHeaderCreation,
    Other(u16),
}

impl IeType {
    pub const fn code(self) -> u16 {
        match self {
            IeType::CreatePdr => 1,
            IeType::Pdi => 2,
            IeType::CreateFar => 3,
            IeType::ForwardingParameters => 4,
            IeType::CreateQer => 7,
            IeType::UpdatePdr => 9,
            IeType::UpdateFar => 10,
            IeType::UpdateQer => 13,
            IeType::RemovePdr => 14,
            IeType::RemoveFar => 15,
            IeType::Cause => 19,
            IeType::SourceInterface => 20,
            IeType::Fteid => 21,
            IeType::GateStatus => 25,
            IeType::Mbr => 26,
            IeType::Gbr => 27,
            IeType::Precedence => 29,
            IeType::DestinationInterface => 42,
            IeType::ApplyAction => 44,
            IeType::PdrId => 56,
            IeType::Fseid => 57,
            IeType::NodeId => 60,
            IeType::RecoveryTimeStamp => 96,
            IeType::FarId => 108,
            IeType::QerId => 109,
            IeType::OuterHeaderCreation => 84,
            IeType::Qfi => 124,
            IeType::Other(raw) => raw,
        }
    }
}

impl From<u16> for IeType {
    fn from(v: u16) -> Self {
        match v {
            1 => IeType::CreatePdr,
            2 => IeType::Pdi,
            3 => IeType::CreateFar,
            4 => IeType::ForwardingParameters,
            7 => IeType::CreateQer,
            9 => IeType::UpdatePdr,
            10 => IeType::UpdateFar,
            13 => IeType::UpdateQer,
            14 => IeType::RemovePdr,
            15 => IeType::RemoveFar,
            19 => IeType::Cause,
            20 => IeType::SourceInterface,
            21 => IeType::Fteid,
            25 => IeType::GateStatus,
            26 => IeType::Mbr,
            27 => IeType::Gbr,
            29 => IeType::Precedence,
            42 => IeType::DestinationInterface,
            44 => IeType::ApplyAction,
            56 => IeType::PdrId,
            57 => IeType::Fseid,
            60 => IeType::NodeId,
            84 => IeType::OuterHeaderCreation,
            96 => IeType::RecoveryTimeStamp,
            108 => IeType::FarId,
            109 => IeType::QerId,
            124 => IeType::Qfi,
            other => IeType::Other(other),
        }
    }
}

/// A single PFCP TLV: 2-byte type, 2-byte length, `length` bytes of payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ie {
    pub ie_type: IeType,
    pub payload: Vec<u8>,
}

impl Ie {
    pub fn new(ie_type: IeType, payload: Vec<u8>) -> Self {
        Ie { ie_type, payload }
    }

    /// Wraps a group of child IEs into a grouped IE (Create PDR, Create FAR,
    /// Create QER, PDI, Forwarding Parameters are all grouped).
    pub fn new_grouped(ie_type: IeType, children: &[Ie]) -> Self {
        let mut payload = Vec::new();
        for child in children {
            child.marshal_into(&mut payload);
        }
        Ie { ie_type, payload }
    }

    pub fn len(&self) -> usize {
        4 + self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.len());
        self.marshal_into(&mut buf);
        buf
    }

    pub fn marshal_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.ie_type.code().to_be_bytes());
        buf.extend_from_slice(&(self.payload.len() as u16).to_be_bytes());
        buf.extend_from_slice(&self.payload);
    }

    /// Reads one IE from the front of `data`, returning it and the number of
    /// bytes consumed. Used to walk a buffer IE-by-IE regardless of whether
    /// each type is understood.
    pub fn unmarshal(data: &[u8]) -> Result<(Self, usize), UpfError> {
        if data.len() < 4 {
            return Err(UpfError::TooShort {
                context: "IE header",
                expected: 4,
                actual: data.len(),
            });
        }
        let ie_type = IeType::from(u16::from_be_bytes([data[0], data[1]]));
        let length = u16::from_be_bytes([data[2], data[3]]) as usize;
        if data.len() < 4 + length {
            return Err(UpfError::TooShort {
                context: "IE payload",
                expected: 4 + length,
                actual: data.len(),
            });
        }
        let payload = data[4..4 + length].to_vec();
        Ok((Ie { ie_type, payload }, 4 + length))
    }

    /// Iterates every top-level IE in `data`, in order. Used both to collect
    /// the IEs a message cares about and to preserve/skip ones it doesn't.
    pub fn iter_all(data: &[u8]) -> IeIter<'_> {
        IeIter { data }
    }
}

/// Iterator over consecutive top-level IEs in a byte slice.
pub struct IeIter<'a> {
    data: &'a [u8],
}

impl<'a> Iterator for IeIter<'a> {
    type Item = Result<Ie, UpfError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.data.is_empty() {
            return None;
        }
        match Ie::unmarshal(self.data) {
            Ok((ie, consumed)) => {
                self.data = &self.data[consumed..];
                Some(Ok(ie))
            }
            Err(e) => {
                self.data = &[];
                Some(Err(e))
            }
        }
    }
}
