/// Errors from PDU encoding/decoding and stream I/O.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The PDU does not start with the link magic.
    #[error("invalid PDU magic (expected 0x524C \"RL\")")]
    InvalidMagic,

    /// Unknown operation code in a request.
    #[error("unknown operation code 0x{0:02X}")]
    UnknownOp(u8),

    /// Unknown value-kind tag.
    #[error("unknown value kind tag 0x{0:02X}")]
    UnknownKind(u8),

    /// Unknown status code in a response.
    #[error("unknown status code 0x{0:02X}")]
    UnknownStatus(u8),

    /// An I/O error occurred while reading or writing PDUs.
    #[error("PDU I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before a complete PDU was received.
    #[error("connection closed (incomplete PDU)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, WireError>;
