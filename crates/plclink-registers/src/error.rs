use crate::address::RegisterAddress;
use crate::value::ValueKind;

/// Errors from a single register read or write.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// An I/O error occurred on the device link.
    #[error("link I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The device link was closed by the remote side.
    #[error("device link closed")]
    Closed,

    /// No register exists at the given address.
    #[error("no register mapped at {0}")]
    Unmapped(RegisterAddress),

    /// The register exists but holds a different value kind.
    #[error("register {addr} holds a {actual} value, expected {expected}")]
    KindMismatch {
        addr: RegisterAddress,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// The remote side violated the link protocol.
    #[error("protocol violation: {0}")]
    Protocol(String),
}

/// Errors from the character-array marshaling operations.
#[derive(Debug, thiserror::Error)]
pub enum MarshalError {
    /// A register access failed mid-sequence. Writes issued before the
    /// failure stand; there is no rollback.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// A character of the text value does not fit in a single byte
    /// register. Detected before that character's write is issued.
    #[error("character {ch:?} at position {position} does not fit in a byte register")]
    Unencodable { ch: char, position: usize },
}

/// Errors from node syntax parsing and array-spec construction.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    /// The input does not match `ns=<ns>;i=<index>`.
    #[error("invalid node syntax {input:?} (expected \"ns=<ns>;i=<index>\")")]
    Syntax { input: String },

    /// A numeric field failed to parse or is out of range.
    #[error("invalid {field} in node {input:?}: {source}")]
    Number {
        field: &'static str,
        input: String,
        source: std::num::ParseIntError,
    },

    /// The array span runs past the end of the register index space.
    #[error("array span overflows the index space (base {base}, capacity {capacity})")]
    SpanOverflow {
        base: RegisterAddress,
        capacity: u32,
    },
}

pub type Result<T, E = AccessError> = std::result::Result<T, E>;
