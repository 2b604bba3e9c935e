use std::fmt;
use std::io;

use plclink_registers::{AccessError, AddressError, MarshalError};
use plclink_session::SessionError;
use plclink_transport::TransportError;
use plclink_wire::WireError;

// Exit code constants shared by all subcommands.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::ConnectionRefused => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    match err {
        TransportError::Bind { source, .. }
        | TransportError::Connect { source, .. }
        | TransportError::Accept(source)
        | TransportError::Io(source) => io_error(context, source),
        other => CliError::new(TRANSPORT_ERROR, format!("{context}: {other}")),
    }
}

pub fn wire_error(context: &str, err: WireError) -> CliError {
    match err {
        WireError::Io(source) => io_error(context, source),
        WireError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
        other => CliError::new(TRANSPORT_ERROR, format!("{context}: {other}")),
    }
}

pub fn session_error(context: &str, err: SessionError) -> CliError {
    match err {
        SessionError::Transport(err) => transport_error(context, err),
        SessionError::Wire(err) => wire_error(context, err),
        SessionError::HelloFailed(_) => CliError::new(TRANSPORT_ERROR, format!("{context}: {err}")),
        SessionError::Disconnected(_) => CliError::new(FAILURE, format!("{context}: {err}")),
        SessionError::Json(_) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
    }
}

pub fn access_error(context: &str, err: AccessError) -> CliError {
    match err {
        AccessError::Io(source) => io_error(context, source),
        AccessError::Closed => CliError::new(FAILURE, format!("{context}: {err}")),
        AccessError::Unmapped(_) | AccessError::KindMismatch { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        AccessError::Protocol(_) => CliError::new(TRANSPORT_ERROR, format!("{context}: {err}")),
    }
}

pub fn marshal_error(context: &str, err: MarshalError) -> CliError {
    match err {
        MarshalError::Access(err) => access_error(context, err),
        MarshalError::Unencodable { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

pub fn address_error(context: &str, err: AddressError) -> CliError {
    CliError::new(USAGE, format!("{context}: {err}"))
}
