//! Register addressing and fixed-width character-array marshaling.
//!
//! This is the core of plclink: the logic that maps a text value onto a
//! contiguous run of single-byte device registers, and the inverse that
//! rebuilds the text from those registers. Everything here is synchronous
//! and works against any [`RegisterAccess`] implementation — a live device
//! link, the in-memory [`MemoryBank`], or a test double.
//!
//! # Layout convention
//!
//! A fixed-width character array of capacity `c` occupies `c + 2` registers
//! in the device map: the base register (reserved, never touched) followed
//! by `c + 1` data slots. See [`CharArraySpec`] for the details.

pub mod access;
pub mod address;
pub mod bank;
pub mod error;
pub mod scalar;
pub mod text;
pub mod value;

pub use access::RegisterAccess;
pub use address::{CharArraySpec, RegisterAddress};
pub use bank::MemoryBank;
pub use error::{AccessError, AddressError, MarshalError, Result};
pub use scalar::{read_byte, read_float, read_scalar, write_float};
pub use text::{clear, read_text, write_text, Truncation, WriteReport, FILL_BYTE};
pub use value::{RegisterValue, ValueKind};
