//! Hello exchange: the first traffic on a fresh link, before any register
//! PDU. Both sides state a protocol name and a `major.minor` version;
//! the server additionally identifies the device it is fronting.
//!
//! Frames are a 2-byte little-endian length prefix followed by JSON.

use std::fmt;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// Expected protocol name on both sides.
pub const PROTOCOL_NAME: &str = "plclink";
/// Local protocol version.
pub const PROTOCOL_VERSION: &str = "1.0";

const MAX_HELLO_PAYLOAD: usize = 4096;
const MAX_DEVICE_ID_LEN: usize = 128;

/// Client hello, sent immediately after connect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HelloRequest {
    /// Protocol name. Must be `plclink`.
    pub protocol: String,
    /// Protocol version, `<major>.<minor>`.
    pub version: String,
}

/// Server hello, answered on the same link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HelloResponse {
    /// Protocol name. Must match the request.
    pub protocol: String,
    /// Server protocol version.
    pub version: String,
    /// Identifier of the device (or simulator bank) behind the link.
    pub device_id: String,
}

impl HelloRequest {
    /// Hello for the local protocol.
    pub fn local() -> Self {
        Self {
            protocol: PROTOCOL_NAME.to_string(),
            version: PROTOCOL_VERSION.to_string(),
        }
    }
}

/// Perform the client side of the hello exchange.
pub fn hello_client<S: Read + Write>(stream: &mut S) -> Result<HelloResponse> {
    let request = HelloRequest::local();
    write_hello(stream, &request)?;

    let response: HelloResponse = read_hello(stream)?;
    validate_protocol(&response.protocol)?;
    check_version_compatible(&response.version, PROTOCOL_VERSION)?;
    validate_device_id(&response.device_id)?;
    Ok(response)
}

/// Perform the server side of the hello exchange.
pub fn hello_server<S: Read + Write>(stream: &mut S, device_id: &str) -> Result<HelloRequest> {
    validate_device_id(device_id)?;

    let request: HelloRequest = read_hello(stream)?;
    validate_protocol(&request.protocol)?;
    check_version_compatible(&request.version, PROTOCOL_VERSION)?;

    let response = HelloResponse {
        protocol: PROTOCOL_NAME.to_string(),
        version: PROTOCOL_VERSION.to_string(),
        device_id: device_id.to_string(),
    };
    write_hello(stream, &response)?;
    Ok(request)
}

fn write_hello<S: Write, T: Serialize>(stream: &mut S, value: &T) -> Result<()> {
    let payload = serde_json::to_vec(value)?;
    if payload.len() > MAX_HELLO_PAYLOAD {
        return Err(SessionError::HelloFailed(format!(
            "hello payload too large: {} (max {MAX_HELLO_PAYLOAD})",
            payload.len()
        )));
    }
    let len = (payload.len() as u16).to_le_bytes();
    stream.write_all(&len).map_err(io_disconnect)?;
    stream.write_all(&payload).map_err(io_disconnect)?;
    stream.flush().map_err(io_disconnect)?;
    Ok(())
}

fn read_hello<S: Read, T: for<'de> Deserialize<'de>>(stream: &mut S) -> Result<T> {
    let mut len_bytes = [0u8; 2];
    stream.read_exact(&mut len_bytes).map_err(io_disconnect)?;
    let len = usize::from(u16::from_le_bytes(len_bytes));
    if len > MAX_HELLO_PAYLOAD {
        return Err(SessionError::HelloFailed(format!(
            "hello payload too large: {len} (max {MAX_HELLO_PAYLOAD})"
        )));
    }

    let mut payload = vec![0u8; len];
    stream.read_exact(&mut payload).map_err(io_disconnect)?;
    Ok(serde_json::from_slice(&payload)?)
}

fn io_disconnect(err: std::io::Error) -> SessionError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        SessionError::Disconnected("connection closed during hello".to_string())
    } else {
        SessionError::Transport(err.into())
    }
}

fn validate_protocol(protocol: &str) -> Result<()> {
    if protocol != PROTOCOL_NAME {
        return Err(SessionError::HelloFailed(format!(
            "unknown protocol {protocol:?} (expected {PROTOCOL_NAME:?})"
        )));
    }
    Ok(())
}

fn validate_device_id(device_id: &str) -> Result<()> {
    if device_id.is_empty() || device_id.len() > MAX_DEVICE_ID_LEN {
        return Err(SessionError::HelloFailed(format!(
            "invalid device_id length: {}",
            device_id.len()
        )));
    }
    Ok(())
}

fn check_version_compatible(remote: &str, local: &str) -> Result<()> {
    let (remote_major, _) = parse_version(remote)?;
    let (local_major, _) = parse_version(local)?;
    if remote_major != local_major {
        return Err(SessionError::HelloFailed(format!(
            "incompatible version {remote:?} (local {local:?})"
        )));
    }
    Ok(())
}

fn parse_version(version: &str) -> Result<(u16, u16)> {
    let invalid = || {
        SessionError::HelloFailed(format!(
            "invalid version {version:?}: expected \"<major>.<minor>\""
        ))
    };
    let (major, minor) = version.split_once('.').ok_or_else(invalid)?;
    let major = major.parse::<u16>().map_err(|_| invalid())?;
    let minor = minor.parse::<u16>().map_err(|_| invalid())?;
    Ok((major, minor))
}

impl fmt::Display for HelloResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.protocol, self.version, self.device_id)
    }
}

#[cfg(test)]
mod tests {
    use std::os::unix::net::UnixStream;
    use std::thread;

    use super::*;

    #[test]
    fn successful_exchange() {
        let (mut left, mut right) = UnixStream::pair().unwrap();

        let server = thread::spawn(move || hello_server(&mut left, "sim-bank-1").unwrap());
        let response = hello_client(&mut right).unwrap();
        let request = server.join().unwrap();

        assert_eq!(response.device_id, "sim-bank-1");
        assert_eq!(response.protocol, PROTOCOL_NAME);
        assert_eq!(request, HelloRequest::local());
    }

    #[test]
    fn wrong_protocol_rejected() {
        let (mut left, mut right) = UnixStream::pair().unwrap();

        let client = thread::spawn(move || {
            let bogus = HelloRequest {
                protocol: "modbus".to_string(),
                version: "1.0".to_string(),
            };
            write_hello(&mut right, &bogus).unwrap();
            // Hold the stream open so the server fails on content, not EOF.
            let mut sink = [0u8; 16];
            let _ = right.read(&mut sink);
        });

        let result = hello_server(&mut left, "sim");
        assert!(matches!(result, Err(SessionError::HelloFailed(_))));
        drop(left);
        client.join().unwrap();
    }

    #[test]
    fn incompatible_major_version_rejected() {
        let (mut left, mut right) = UnixStream::pair().unwrap();

        let client = thread::spawn(move || {
            let future = HelloRequest {
                protocol: PROTOCOL_NAME.to_string(),
                version: "2.0".to_string(),
            };
            write_hello(&mut right, &future).unwrap();
            let mut sink = [0u8; 16];
            let _ = right.read(&mut sink);
        });

        let result = hello_server(&mut left, "sim");
        assert!(matches!(result, Err(SessionError::HelloFailed(_))));
        drop(left);
        client.join().unwrap();
    }

    #[test]
    fn client_labels_the_remote_version_incompatible() {
        let (mut left, mut right) = UnixStream::pair().unwrap();

        let server = thread::spawn(move || {
            let _request: HelloRequest = read_hello(&mut left).unwrap();
            let future = HelloResponse {
                protocol: PROTOCOL_NAME.to_string(),
                version: "2.0".to_string(),
                device_id: "sim".to_string(),
            };
            write_hello(&mut left, &future).unwrap();
        });

        let err = hello_client(&mut right).unwrap_err();
        let SessionError::HelloFailed(message) = err else {
            panic!("expected hello failure, got {err:?}");
        };
        assert!(
            message.contains("incompatible version \"2.0\""),
            "remote version should be the incompatible one: {message}"
        );
        server.join().unwrap();
    }

    #[test]
    fn garbage_json_rejected() {
        let (mut left, mut right) = UnixStream::pair().unwrap();

        let client = thread::spawn(move || {
            right.write_all(&5u16.to_le_bytes()).unwrap();
            right.write_all(b"{nope").unwrap();
            let mut sink = [0u8; 16];
            let _ = right.read(&mut sink);
        });

        let result = hello_server(&mut left, "sim");
        assert!(matches!(result, Err(SessionError::Json(_))));
        drop(left);
        client.join().unwrap();
    }

    #[test]
    fn closed_link_is_disconnected() {
        let (mut left, right) = UnixStream::pair().unwrap();
        drop(right);

        let result = hello_client(&mut left);
        assert!(matches!(result, Err(SessionError::Disconnected(_))));
    }

    #[test]
    fn oversized_payload_rejected() {
        let (mut left, mut right) = UnixStream::pair().unwrap();

        let client = thread::spawn(move || {
            right.write_all(&u16::MAX.to_le_bytes()).unwrap();
            let mut sink = [0u8; 16];
            let _ = right.read(&mut sink);
        });

        let result = hello_server(&mut left, "sim");
        assert!(matches!(result, Err(SessionError::HelloFailed(_))));
        drop(left);
        client.join().unwrap();
    }

    #[test]
    fn version_parsing() {
        assert!(parse_version("1.0").is_ok());
        assert!(parse_version("10.25").is_ok());
        assert!(parse_version("1").is_err());
        assert!(parse_version("1.0.0").is_err());
        assert!(parse_version("one.zero").is_err());
    }
}
