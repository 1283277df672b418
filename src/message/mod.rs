//! PFCP message types this UPF needs to send and receive.
//!
//! Every message type outside this list is a legitimate part of PFCP but
//! this core only implements the procedures its data path and control
//! plane actually drive: heartbeats, association setup/release, and
//! session establishment/modification/deletion.

pub mod association_release_request;
pub mod association_release_response;
pub mod association_setup_request;
pub mod association_setup_response;
pub mod header;
pub mod heartbeat_request;
pub mod heartbeat_response;
pub mod session_deletion_request;
pub mod session_deletion_response;
pub mod session_establishment_request;
pub mod session_establishment_response;
pub mod session_modification_request;
pub mod session_modification_response;

use crate::error::UpfError;

/// PFCP message type codes recognized by this core (3GPP TS 29.244 Table 7.2-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MsgType {
    HeartbeatRequest = 1,
    HeartbeatResponse = 2,
    AssociationSetupRequest = 5,
    AssociationSetupResponse = 6,
    AssociationReleaseRequest = 9,
    AssociationReleaseResponse = 10,
    SessionEstablishmentRequest = 50,
    SessionEstablishmentResponse = 51,
    SessionModificationRequest = 52,
    SessionModificationResponse = 53,
    SessionDeletionRequest = 54,
    SessionDeletionResponse = 55,
    Unknown = 0,
}

impl From<u8> for MsgType {
    fn from(v: u8) -> Self {
        match v {
            1 => MsgType::HeartbeatRequest,
            2 => MsgType::HeartbeatResponse,
            5 => MsgType::AssociationSetupRequest,
            6 => MsgType::AssociationSetupResponse,
            9 => MsgType::AssociationReleaseRequest,
            10 => MsgType::AssociationReleaseResponse,
            50 => MsgType::SessionEstablishmentRequest,
            51 => MsgType::SessionEstablishmentResponse,
            52 => MsgType::SessionModificationRequest,
            53 => MsgType::SessionModificationResponse,
            54 => MsgType::SessionDeletionRequest,
            55 => MsgType::SessionDeletionResponse,
            _ => MsgType::Unknown,
        }
    }
}

/// Reads the message type byte (offset 1) out of a raw PFCP message without
/// fully decoding the header, so the handler can dispatch before parsing.
pub fn peek_msg_type(data: &[u8]) -> Result<MsgType, UpfError> {
    if data.len() < 2 {
        return Err(UpfError::TooShort {
            context: "PFCP message",
            expected: 2,
            actual: data.len(),
        });
    }
    Ok(MsgType::from(data[1]))
}
