//! Register-addressed device access with character-array marshaling.
//!
//! plclink talks to devices that expose memory as addressed registers,
//! including the awkward-but-common pattern of strings spread across
//! consecutive single-byte registers.
//!
//! # Crate Structure
//!
//! - [`registers`] — Addressing, values, marshaling, and the in-memory bank
//! - [`transport`] — Unix-domain-socket link to a device simulator
//! - [`wire`] — Fixed-size request/response PDU codec
//! - [`session`] — Client sessions and the bank server (behind `session` feature)

/// Re-export register types.
pub mod registers {
    pub use plclink_registers::*;
}

/// Re-export transport types.
pub mod transport {
    pub use plclink_transport::*;
}

/// Re-export wire types.
pub mod wire {
    pub use plclink_wire::*;
}

/// Re-export session types (requires `session` feature).
#[cfg(feature = "session")]
pub mod session {
    pub use plclink_session::*;
}
