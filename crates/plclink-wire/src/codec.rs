use bytes::{Buf, BufMut, BytesMut};

use plclink_registers::{RegisterAddress, RegisterValue, ValueKind};

use crate::error::{Result, WireError};

/// Magic bytes: "RL" (0x52 0x4C).
pub const MAGIC: [u8; 2] = [0x52, 0x4C];

/// Request PDU size: magic (2) + op (1) + kind (1) + ns (2) + index (4) +
/// value (4) = 14 bytes.
pub const REQUEST_SIZE: usize = 14;

/// Response PDU size: magic (2) + status (1) + kind (1) + value (4) = 8 bytes.
pub const RESPONSE_SIZE: usize = 8;

const OP_READ: u8 = 0x01;
const OP_WRITE: u8 = 0x02;

const STATUS_OK: u8 = 0x00;
const STATUS_UNMAPPED: u8 = 0x01;
const STATUS_KIND_MISMATCH: u8 = 0x02;
const STATUS_MALFORMED: u8 = 0x03;

const KIND_NONE: u8 = 0x00;
const KIND_BYTE: u8 = 0x01;
const KIND_FLOAT32: u8 = 0x02;

/// A single register operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Request {
    /// Read the value at `addr`.
    Read { addr: RegisterAddress },
    /// Write `value` to `addr`.
    Write {
        addr: RegisterAddress,
        value: RegisterValue,
    },
}

/// The device side's answer to a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Response {
    /// Operation succeeded. Reads carry the value, writes carry none.
    Ok(Option<RegisterValue>),
    /// No register at the requested address.
    Unmapped,
    /// A write's value kind does not match the register; `held` is the
    /// kind the register actually holds.
    KindMismatch { held: ValueKind },
    /// The device side could not parse the request.
    Malformed,
}

fn kind_tag(kind: ValueKind) -> u8 {
    match kind {
        ValueKind::Byte => KIND_BYTE,
        ValueKind::Float32 => KIND_FLOAT32,
    }
}

fn value_bits(value: RegisterValue) -> u32 {
    match value {
        RegisterValue::Byte(b) => u32::from(b),
        RegisterValue::Float32(f) => f.to_bits(),
    }
}

fn value_from(tag: u8, bits: u32) -> Result<Option<RegisterValue>> {
    match tag {
        KIND_NONE => Ok(None),
        KIND_BYTE => Ok(Some(RegisterValue::Byte(bits as u8))),
        KIND_FLOAT32 => Ok(Some(RegisterValue::Float32(f32::from_bits(bits)))),
        other => Err(WireError::UnknownKind(other)),
    }
}

/// Encode a request into the wire format.
///
/// ```text
/// ┌────────────┬────────┬─────────┬──────────┬─────────────┬─────────────┐
/// │ Magic (2B) │ Op(1B) │ Kind(1B)│ Ns(2B LE)│ Index(4B LE)│ Value(4B LE)│
/// └────────────┴────────┴─────────┴──────────┴─────────────┴─────────────┘
/// ```
/// Byte values travel in the low 8 bits, floats as raw IEEE-754 bits, so
/// a write/read round trip is bit-exact.
pub fn encode_request(request: &Request, dst: &mut BytesMut) {
    let (op, addr, kind, bits) = match *request {
        Request::Read { addr } => (OP_READ, addr, KIND_NONE, 0),
        Request::Write { addr, value } => (OP_WRITE, addr, kind_tag(value.kind()), value_bits(value)),
    };
    dst.reserve(REQUEST_SIZE);
    dst.put_slice(&MAGIC);
    dst.put_u8(op);
    dst.put_u8(kind);
    dst.put_u16_le(addr.ns);
    dst.put_u32_le(addr.index);
    dst.put_u32_le(bits);
}

/// Decode a request from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete PDU yet.
/// On success, consumes the PDU bytes from the buffer.
pub fn decode_request(src: &mut BytesMut) -> Result<Option<Request>> {
    if src.len() < REQUEST_SIZE {
        return Ok(None);
    }

    if src[0..2] != MAGIC {
        return Err(WireError::InvalidMagic);
    }

    let op = src[2];
    let kind = src[3];
    let ns = u16::from_le_bytes(src[4..6].try_into().unwrap());
    let index = u32::from_le_bytes(src[6..10].try_into().unwrap());
    let bits = u32::from_le_bytes(src[10..14].try_into().unwrap());
    let addr = RegisterAddress::new(ns, index);

    let request = match op {
        OP_READ => Request::Read { addr },
        OP_WRITE => {
            let value = value_from(kind, bits)?.ok_or(WireError::UnknownKind(kind))?;
            Request::Write { addr, value }
        }
        other => return Err(WireError::UnknownOp(other)),
    };

    src.advance(REQUEST_SIZE);
    Ok(Some(request))
}

/// Encode a response into the wire format.
pub fn encode_response(response: &Response, dst: &mut BytesMut) {
    let (status, kind, bits) = match *response {
        Response::Ok(None) => (STATUS_OK, KIND_NONE, 0),
        Response::Ok(Some(value)) => (STATUS_OK, kind_tag(value.kind()), value_bits(value)),
        Response::Unmapped => (STATUS_UNMAPPED, KIND_NONE, 0),
        Response::KindMismatch { held } => (STATUS_KIND_MISMATCH, kind_tag(held), 0),
        Response::Malformed => (STATUS_MALFORMED, KIND_NONE, 0),
    };
    dst.reserve(RESPONSE_SIZE);
    dst.put_slice(&MAGIC);
    dst.put_u8(status);
    dst.put_u8(kind);
    dst.put_u32_le(bits);
}

/// Decode a response from a buffer; `Ok(None)` on incomplete input.
pub fn decode_response(src: &mut BytesMut) -> Result<Option<Response>> {
    if src.len() < RESPONSE_SIZE {
        return Ok(None);
    }

    if src[0..2] != MAGIC {
        return Err(WireError::InvalidMagic);
    }

    let status = src[2];
    let kind = src[3];
    let bits = u32::from_le_bytes(src[4..8].try_into().unwrap());

    let response = match status {
        STATUS_OK => Response::Ok(value_from(kind, bits)?),
        STATUS_UNMAPPED => Response::Unmapped,
        STATUS_KIND_MISMATCH => {
            let held = value_from(kind, 0)?
                .ok_or(WireError::UnknownKind(kind))?
                .kind();
            Response::KindMismatch { held }
        }
        STATUS_MALFORMED => Response::Malformed,
        other => return Err(WireError::UnknownStatus(other)),
    };

    src.advance(RESPONSE_SIZE);
    Ok(Some(response))
}
