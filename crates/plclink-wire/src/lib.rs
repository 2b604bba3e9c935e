//! Register operation PDUs over a byte stream.
//!
//! One request, one response, strictly in turn — the link carries a single
//! blocking register operation at a time, matching the sequential access
//! model of the marshaling layer. PDUs are fixed-layout, magic-prefixed,
//! little-endian.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{
    decode_request, decode_response, encode_request, encode_response, Request, Response, MAGIC,
    REQUEST_SIZE, RESPONSE_SIZE,
};
pub use error::{Result, WireError};
pub use reader::PduReader;
pub use writer::PduWriter;
