use std::io::{self, Read};

use nmea_fix::ByteSource;

const READ_CHUNK: usize = 256;

/// A non-blocking [ByteSource] over anything readable.
///
/// `ready` tells how many bytes can be read without waiting; reads never ask for more.
pub struct ReadSource<R, F> {
    inner: R,
    ready: F,
    buf: [u8; READ_CHUNK],
    pos: usize,
    len: usize,
    error: Option<io::Error>,
}

impl<R: Read, F: FnMut(&mut R) -> io::Result<usize>> ReadSource<R, F> {
    pub fn new(inner: R, ready: F) -> Self {
        Self {
            inner,
            ready,
            buf: [0; READ_CHUNK],
            pos: 0,
            len: 0,
            error: None,
        }
    }

    /// The I/O error that stopped the last poll, if any
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn refill(&mut self) -> bool {
        let available = match (self.ready)(&mut self.inner) {
            Ok(n) => n.min(READ_CHUNK),
            Err(e) => {
                self.error = Some(e);
                return false;
            },
        };
        if available == 0 {
            return false;
        }
        match self.inner.read(&mut self.buf[..available]) {
            Ok(n) => {
                self.pos = 0;
                self.len = n;
                n > 0
            },
            Err(e) if e.kind() == io::ErrorKind::TimedOut => false,
            Err(e) => {
                self.error = Some(e);
                false
            },
        }
    }
}

impl<R: Read, F: FnMut(&mut R) -> io::Result<usize>> ByteSource for ReadSource<R, F> {
    fn is_readable(&mut self) -> bool {
        self.pos < self.len || self.refill()
    }

    fn read_byte(&mut self) -> Option<u8> {
        if !self.is_readable() {
            return None;
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        Some(byte)
    }
}
