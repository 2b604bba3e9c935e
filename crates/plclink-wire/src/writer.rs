use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use tracing::trace;

use crate::codec::{encode_request, encode_response, Request, Response, REQUEST_SIZE};
use crate::error::{Result, WireError};

/// Writes complete PDUs to any `Write` stream.
pub struct PduWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> PduWriter<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(REQUEST_SIZE * 4),
        }
    }

    /// Encode and send a request (blocking).
    pub fn send_request(&mut self, request: &Request) -> Result<()> {
        trace!(?request, "sending request");
        self.buf.clear();
        encode_request(request, &mut self.buf);
        self.drain()
    }

    /// Encode and send a response (blocking).
    pub fn send_response(&mut self, response: &Response) -> Result<()> {
        trace!(?response, "sending response");
        self.buf.clear();
        encode_response(response, &mut self.buf);
        self.drain()
    }

    fn drain(&mut self) -> Result<()> {
        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(WireError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(WireError::Io(err)),
            }
        }

        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(WireError::Io(err)),
            }
        }
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
