//! Device side of a register session: a simulator bank behind a socket.

use std::path::Path;

use tracing::{debug, info, warn};

use plclink_registers::{AccessError, MemoryBank, RegisterAccess};
use plclink_transport::LinkSocket;
use plclink_wire::{PduReader, PduWriter, Request, Response, WireError};

use crate::error::{Result, SessionError};
use crate::hello::hello_server;

/// Serves a [`MemoryBank`] to one register session at a time.
///
/// Connections are handled sequentially: each [`serve_one`] call accepts
/// a single session, answers its requests until the peer hangs up, then
/// returns. Mutations persist in the bank across sessions.
///
/// [`serve_one`]: BankServer::serve_one
pub struct BankServer {
    socket: LinkSocket,
    device_id: String,
}

impl BankServer {
    /// Bind at `path`, announcing `device_id` during hello.
    pub fn bind(path: impl AsRef<Path>, device_id: impl Into<String>) -> Result<Self> {
        let socket = LinkSocket::bind(path)?;
        Ok(Self {
            socket,
            device_id: device_id.into(),
        })
    }

    /// The socket path this server is bound to.
    pub fn path(&self) -> &Path {
        self.socket.path()
    }

    /// Accept one session and serve it to completion.
    ///
    /// Returns `Ok(())` when the peer disconnects cleanly. A failed hello
    /// is reported as an error; the listener itself stays usable.
    pub fn serve_one(&self, bank: &mut MemoryBank) -> Result<()> {
        let mut stream = self.socket.accept()?;
        hello_server(&mut stream, &self.device_id)?;
        info!(device_id = %self.device_id, "session accepted");

        let read_half = stream.try_clone()?;
        let mut reader = PduReader::new(read_half);
        let mut writer = PduWriter::new(stream);

        loop {
            let request = match reader.read_request() {
                Ok(request) => request,
                Err(WireError::ConnectionClosed) => {
                    debug!("peer disconnected");
                    return Ok(());
                }
                Err(err @ (WireError::InvalidMagic
                | WireError::UnknownOp(_)
                | WireError::UnknownKind(_))) => {
                    // Framing is lost; answer once and drop the session.
                    warn!(%err, "malformed request, closing session");
                    let _ = writer.send_response(&Response::Malformed);
                    return Ok(());
                }
                Err(err) => return Err(SessionError::Wire(err)),
            };

            let response = Self::answer(bank, &request);
            writer.send_response(&response)?;
        }
    }

    fn answer(bank: &mut MemoryBank, request: &Request) -> Response {
        match *request {
            Request::Read { addr } => match bank.read(addr) {
                Ok(value) => Response::Ok(Some(value)),
                Err(err) => Self::fault(addr, err),
            },
            Request::Write { addr, value } => match bank.write(addr, value) {
                Ok(()) => Response::Ok(None),
                Err(err) => Self::fault(addr, err),
            },
        }
    }

    fn fault(addr: plclink_registers::RegisterAddress, err: AccessError) -> Response {
        match err {
            AccessError::Unmapped(_) => {
                debug!(%addr, "unmapped register");
                Response::Unmapped
            }
            AccessError::KindMismatch { actual, .. } => {
                debug!(%addr, held = %actual, "kind mismatch");
                Response::KindMismatch { held: actual }
            }
            other => {
                warn!(%addr, %other, "bank fault");
                Response::Malformed
            }
        }
    }
}
