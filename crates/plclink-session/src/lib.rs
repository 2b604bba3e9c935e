//! Register session management over the simulator link.
//!
//! The "just works" layer: connect to a serving register bank, then issue
//! blocking single-register reads and writes through the
//! [`RegisterAccess`](plclink_registers::RegisterAccess) trait. The
//! marshaling layer in `plclink-registers` runs unchanged on top of a
//! [`Session`], exactly as it does on an in-process bank.

pub mod error;
pub mod hello;
pub mod server;
pub mod session;

pub use error::{Result, SessionError};
pub use hello::{HelloRequest, HelloResponse, PROTOCOL_NAME, PROTOCOL_VERSION};
pub use server::BankServer;
pub use session::Session;
