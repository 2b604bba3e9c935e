use std::io::{ErrorKind, Read};

use bytes::BytesMut;
use tracing::trace;

use crate::codec::{decode_request, decode_response, Request, Response, REQUEST_SIZE};
use crate::error::{Result, WireError};

const READ_CHUNK_SIZE: usize = 256;

/// Reads complete PDUs from any `Read` stream.
///
/// Handles partial reads internally — callers always get a complete
/// request or response.
pub struct PduReader<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Read> PduReader<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(REQUEST_SIZE * 4),
        }
    }

    /// Read the next complete request (blocking).
    ///
    /// Returns `Err(WireError::ConnectionClosed)` when EOF is reached.
    pub fn read_request(&mut self) -> Result<Request> {
        loop {
            if let Some(request) = decode_request(&mut self.buf)? {
                trace!(?request, "request received");
                return Ok(request);
            }
            self.fill()?;
        }
    }

    /// Read the next complete response (blocking).
    pub fn read_response(&mut self) -> Result<Response> {
        loop {
            if let Some(response) = decode_response(&mut self.buf)? {
                trace!(?response, "response received");
                return Ok(response);
            }
            self.fill()?;
        }
    }

    fn fill(&mut self) -> Result<()> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        let read = loop {
            match self.inner.read(&mut chunk) {
                Ok(n) => break n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(WireError::Io(err)),
            }
        };

        if read == 0 {
            return Err(WireError::ConnectionClosed);
        }

        self.buf.extend_from_slice(&chunk[..read]);
        Ok(())
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use plclink_registers::{RegisterAddress, RegisterValue};

    use super::*;
    use crate::codec::{encode_request, encode_response, MAGIC};

    #[test]
    fn read_single_request() {
        let mut wire = BytesMut::new();
        let request = Request::Read {
            addr: RegisterAddress::new(4, 35),
        };
        encode_request(&request, &mut wire);

        let mut reader = PduReader::new(Cursor::new(wire.to_vec()));
        assert_eq!(reader.read_request().unwrap(), request);
    }

    #[test]
    fn read_back_to_back_responses() {
        let mut wire = BytesMut::new();
        let first = Response::Ok(Some(RegisterValue::Byte(b'a')));
        let second = Response::Unmapped;
        encode_response(&first, &mut wire);
        encode_response(&second, &mut wire);

        let mut reader = PduReader::new(Cursor::new(wire.to_vec()));
        assert_eq!(reader.read_response().unwrap(), first);
        assert_eq!(reader.read_response().unwrap(), second);
    }

    #[test]
    fn byte_by_byte_arrival() {
        let mut wire = BytesMut::new();
        let request = Request::Write {
            addr: RegisterAddress::new(7, 9),
            value: RegisterValue::Float32(45.0),
        };
        encode_request(&request, &mut wire);

        let mut reader = PduReader::new(ByteByByteReader {
            bytes: wire.to_vec(),
            pos: 0,
        });
        assert_eq!(reader.read_request().unwrap(), request);
    }

    #[test]
    fn eof_is_connection_closed() {
        let mut reader = PduReader::new(Cursor::new(Vec::<u8>::new()));
        assert!(matches!(
            reader.read_request(),
            Err(WireError::ConnectionClosed)
        ));
    }

    #[test]
    fn eof_mid_pdu_is_connection_closed() {
        let mut reader = PduReader::new(Cursor::new(MAGIC.to_vec()));
        assert!(matches!(
            reader.read_response(),
            Err(WireError::ConnectionClosed)
        ));
    }

    #[test]
    fn interrupted_read_retries() {
        let mut wire = BytesMut::new();
        encode_response(&Response::Ok(None), &mut wire);

        let mut reader = PduReader::new(InterruptedThenData {
            interrupted: false,
            bytes: wire.to_vec(),
            pos: 0,
        });
        assert_eq!(reader.read_response().unwrap(), Response::Ok(None));
    }

    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct InterruptedThenData {
        interrupted: bool,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            let remaining = self.bytes.len() - self.pos;
            let n = remaining.min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }
}
