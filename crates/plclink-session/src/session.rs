//! Client side of a register session.

use std::path::Path;

use tracing::{debug, info};

use plclink_registers::{AccessError, RegisterAccess, RegisterAddress, RegisterValue};
use plclink_transport::{LinkSocket, LinkStream};
use plclink_wire::{PduReader, PduWriter, Request, Response, WireError};

use crate::error::Result;
use crate::hello::hello_client;

/// A connected register session.
///
/// One session owns one link. Every [`RegisterAccess`] call maps to a
/// single request/response exchange, blocking until the device side
/// answers. Drop the session to close the link.
pub struct Session {
    reader: PduReader<LinkStream>,
    writer: PduWriter<LinkStream>,
    device_id: String,
}

impl Session {
    /// Connect to a serving register bank at `path` and complete the
    /// hello exchange.
    pub fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let mut stream = LinkSocket::connect(path)?;
        let hello = hello_client(&mut stream)?;
        info!(device_id = %hello.device_id, "session established");

        let read_half = stream.try_clone()?;
        Ok(Self {
            reader: PduReader::new(read_half),
            writer: PduWriter::new(stream),
            device_id: hello.device_id,
        })
    }

    /// Identifier announced by the device side during hello.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    fn exchange(&mut self, request: &Request) -> std::result::Result<Response, AccessError> {
        self.writer.send_request(request).map_err(wire_to_access)?;
        self.reader.read_response().map_err(wire_to_access)
    }
}

fn wire_to_access(err: WireError) -> AccessError {
    match err {
        WireError::Io(io) => AccessError::Io(io),
        WireError::ConnectionClosed => AccessError::Closed,
        other => AccessError::Protocol(other.to_string()),
    }
}

impl RegisterAccess for Session {
    fn read(&mut self, addr: RegisterAddress) -> plclink_registers::Result<RegisterValue> {
        debug!(%addr, "remote read");
        match self.exchange(&Request::Read { addr })? {
            Response::Ok(Some(value)) => Ok(value),
            Response::Ok(None) => Err(AccessError::Protocol(
                "read response carried no value".to_string(),
            )),
            Response::Unmapped => Err(AccessError::Unmapped(addr)),
            Response::KindMismatch { .. } => Err(AccessError::Protocol(
                "kind mismatch reported for a read".to_string(),
            )),
            Response::Malformed => Err(AccessError::Protocol(
                "device rejected the request as malformed".to_string(),
            )),
        }
    }

    fn write(&mut self, addr: RegisterAddress, value: RegisterValue) -> plclink_registers::Result<()> {
        debug!(%addr, %value, "remote write");
        match self.exchange(&Request::Write { addr, value })? {
            Response::Ok(_) => Ok(()),
            Response::Unmapped => Err(AccessError::Unmapped(addr)),
            Response::KindMismatch { held } => Err(AccessError::KindMismatch {
                addr,
                expected: value.kind(),
                actual: held,
            }),
            Response::Malformed => Err(AccessError::Protocol(
                "device rejected the request as malformed".to_string(),
            )),
        }
    }
}
