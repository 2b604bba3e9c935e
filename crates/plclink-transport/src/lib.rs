//! Blocking Unix-domain-socket link.
//!
//! The lowest layer of plclink: a connection-oriented byte stream between
//! the register tooling and a serving process. Everything above it —
//! PDU framing, sessions — builds on the [`LinkStream`] type here.
//!
//! Unix-only: the simulator link has no second transport.

pub mod error;

#[cfg(unix)]
pub mod stream;
#[cfg(unix)]
pub mod uds;

pub use error::{Result, TransportError};

#[cfg(unix)]
pub use stream::LinkStream;
#[cfg(unix)]
pub use uds::LinkSocket;
