//! Central error type for the UPF core.
//!
//! Every fallible operation in this crate returns [`UpfError`]. Wire-codec
//! variants carry enough context (IE name, expected/actual length) to build
//! a useful log line without re-deriving it at the call site.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpfError {
    #[error("{context} too short: need at least {expected} bytes, got {actual}")]
    TooShort {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("missing mandatory {0} IE")]
    MissingMandatoryIe(&'static str),

    #[error("invalid {field} value: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },

    #[error("invalid PFCP header: {0}")]
    InvalidHeader(String),

    #[error("unknown message type {0}")]
    UnknownMessageType(u8),

    #[error("session table full")]
    NoResources,

    #[error("no PFCP association established")]
    NoAssociation,

    #[error("unknown session {0:#x}")]
    UnknownSession(u64),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type UpfResult<T> = Result<T, UpfError>;
