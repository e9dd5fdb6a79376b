//! Where the parser gets its bytes from.

#[cfg(feature = "alloc")]
use alloc::collections::VecDeque;

/// Non-blocking access to a byte stream such as a UART receive register or queue.
pub trait ByteSource {
    /// Whether a byte can be read right now without waiting
    fn is_readable(&mut self) -> bool;

    /// Takes the next byte, if one is available.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Replays a byte slice
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not read yet
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn is_readable(&mut self) -> bool {
        self.pos < self.data.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }
}

#[cfg(feature = "alloc")]
impl ByteSource for VecDeque<u8> {
    fn is_readable(&mut self) -> bool {
        !self.is_empty()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_source_drains() {
        let mut src = SliceSource::new(b"ab");
        assert!(src.is_readable());
        assert_eq!(src.read_byte(), Some(b'a'));
        assert_eq!(src.remaining(), b"b");
        assert_eq!(src.read_byte(), Some(b'b'));
        assert!(!src.is_readable());
        assert_eq!(src.read_byte(), None);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn queue_source() {
        let mut queue: VecDeque<u8> = b"$G".iter().copied().collect();
        assert_eq!(queue.read_byte(), Some(b'$'));
        assert!(queue.is_readable());
        queue.read_byte();
        assert!(!queue.is_readable());
    }
}
