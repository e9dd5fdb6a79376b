#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use core::cmp::min;

/// This trait represents the bounded buffer a sentence is assembled into. We provide
/// implementations for `Vec<u8>`, `[u8; N]`([FixedBuffer]), and for `&mut [u8]` ([FixedLinearBuffer]), if you want to
/// use your own struct as an underlying buffer you can implement this trait.
///
/// Look at the `flb_*` unit tests for ideas of unit tests you can run against
/// your own implementations.
pub trait UnderlyingBuffer:
    core::ops::Index<core::ops::Range<usize>, Output = [u8]> + core::ops::Index<usize, Output = u8>
{
    /// Removes all elements from the buffer.
    fn clear(&mut self);

    /// Returns the number of elements currently stored in the buffer.
    fn len(&self) -> usize;

    /// Returns the maximum number of bytes this buffer will ever hold. The assembler
    /// treats a sentence that would grow past this as an overflow.
    fn max_capacity(&self) -> usize;

    /// Returns the number of bytes not copied over due to buffer size constraints.
    fn extend_from_slice(&mut self, other: &[u8]) -> usize;

    /// Appends one byte, returning `false` if the buffer is full.
    fn push(&mut self, byte: u8) -> bool {
        self.extend_from_slice(&[byte]) == 0
    }

    /// Returns whether the buffer is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether another byte can be stored.
    fn is_full(&self) -> bool {
        self.len() >= self.max_capacity()
    }
}

/// A growable buffer, capped at [NMEA_MAX_SENTENCE_LEN](crate::constants::NMEA_MAX_SENTENCE_LEN)
/// so that a runaway stream cannot grow it without bound.
#[cfg(feature = "alloc")]
impl UnderlyingBuffer for Vec<u8> {
    fn clear(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn max_capacity(&self) -> usize {
        crate::constants::NMEA_MAX_SENTENCE_LEN
    }

    fn extend_from_slice(&mut self, other: &[u8]) -> usize {
        let available_space = self.max_capacity().saturating_sub(self.len());
        let to_copy = min(other.len(), available_space);
        self.extend_from_slice(&other[..to_copy]);
        other.len() - to_copy
    }
}

/// Appends as much of `other` as fits behind `len`, returning how many bytes were left out.
fn append(storage: &mut [u8], len: &mut usize, other: &[u8]) -> usize {
    let to_copy = min(other.len(), storage.len() - *len);
    storage[*len..*len + to_copy].copy_from_slice(&other[..to_copy]);
    *len += to_copy;
    other.len() - to_copy
}

#[track_caller]
fn check_bounds(end: usize, len: usize) {
    if end > len {
        panic!("index out of bounds: the len is {len} but the index is {end}");
    }
}

/// Holds a mutable reference to a caller-supplied byte array
pub struct FixedLinearBuffer<'a> {
    buffer: &'a mut [u8],
    len: usize,
}

impl<'a> FixedLinearBuffer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buffer: buf,
            len: 0,
        }
    }

    /// The bytes stored so far
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.len]
    }
}

impl core::ops::Index<core::ops::Range<usize>> for FixedLinearBuffer<'_> {
    type Output = [u8];

    fn index(&self, index: core::ops::Range<usize>) -> &Self::Output {
        check_bounds(index.end, self.len);
        &self.buffer[index]
    }
}

impl core::ops::Index<usize> for FixedLinearBuffer<'_> {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        check_bounds(index + 1, self.len);
        &self.buffer[index]
    }
}

impl UnderlyingBuffer for FixedLinearBuffer<'_> {
    fn clear(&mut self) {
        self.len = 0;
    }

    fn len(&self) -> usize {
        self.len
    }

    fn max_capacity(&self) -> usize {
        self.buffer.len()
    }

    fn extend_from_slice(&mut self, other: &[u8]) -> usize {
        append(self.buffer, &mut self.len, other)
    }
}

/// An inline sentence buffer of `N` bytes, for parsers that own their storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedBuffer<const N: usize> {
    buffer: [u8; N],
    len: usize,
}

impl<const N: usize> FixedBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buffer: [0; N],
            len: 0,
        }
    }

    /// The bytes stored so far
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.len]
    }
}

impl<const N: usize> Default for FixedBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::ops::Index<core::ops::Range<usize>> for FixedBuffer<N> {
    type Output = [u8];

    fn index(&self, index: core::ops::Range<usize>) -> &Self::Output {
        check_bounds(index.end, self.len);
        &self.buffer[index]
    }
}

impl<const N: usize> core::ops::Index<usize> for FixedBuffer<N> {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        check_bounds(index + 1, self.len);
        &self.buffer[index]
    }
}

impl<const N: usize> UnderlyingBuffer for FixedBuffer<N> {
    fn clear(&mut self) {
        self.len = 0;
    }

    fn len(&self) -> usize {
        self.len
    }

    fn max_capacity(&self) -> usize {
        N
    }

    fn extend_from_slice(&mut self, other: &[u8]) -> usize {
        append(&mut self.buffer, &mut self.len, other)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[cfg(feature = "alloc")]
    use alloc::vec;

    #[test]
    fn flb_clear() {
        let mut buf = [0; 16];
        let mut buf = FixedLinearBuffer::new(&mut buf);
        buf.extend_from_slice(b"$GPGGA,");
        assert_eq!(buf.len(), 7);
        buf.clear();
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    #[should_panic]
    fn flb_index_outside_range() {
        let mut buf = [0; 16];
        let mut buf = FixedLinearBuffer::new(&mut buf);
        buf.extend_from_slice(b"$GPGGA,");
        let _ = buf[5..10];
    }

    #[test]
    fn flb_extend_outside_range() {
        let mut buf = [0; 16];
        let mut buf = FixedLinearBuffer::new(&mut buf);
        assert_eq!(buf.extend_from_slice(b"$GPGGA,"), 0);
        assert_eq!(buf.extend_from_slice(b"$GPGGA,"), 0);
        assert_eq!(buf.extend_from_slice(b"$GPGGA,"), 5);
        assert_eq!(buf.len(), 16);
        assert!(buf.is_full());
        assert!(!buf.push(b'x'));
    }

    #[test]
    fn flb_push() {
        let mut buf = [0; 2];
        let mut buf = FixedLinearBuffer::new(&mut buf);
        assert!(buf.push(b'$'));
        assert!(buf.push(b'G'));
        assert!(!buf.push(b'P'));
        assert_eq!(&buf[0..2], b"$G");
    }

    #[test]
    fn fixed_buffer_respects_capacity() {
        let mut buf = FixedBuffer::<4>::new();
        assert_eq!(buf.max_capacity(), 4);
        assert_eq!(buf.extend_from_slice(b"$GPRMC"), 2);
        assert_eq!(&buf[0..4], b"$GPR");
        buf.clear();
        assert!(buf.push(b'$'));
        assert_eq!(buf.len(), 1);
    }

    #[test]
    #[should_panic]
    fn fixed_buffer_index_past_len() {
        let mut buf = FixedBuffer::<8>::new();
        buf.push(b'$');
        let _ = buf[1];
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn vec_buffer_is_capped() {
        let mut buf: Vec<u8> = vec![];
        let data = [b'A'; crate::constants::NMEA_MAX_SENTENCE_LEN + 10];
        assert_eq!(UnderlyingBuffer::extend_from_slice(&mut buf, &data), 10);
        assert_eq!(UnderlyingBuffer::len(&buf), crate::constants::NMEA_MAX_SENTENCE_LEN);
        assert!(buf.is_full());
    }
}
