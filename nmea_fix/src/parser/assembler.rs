//! Byte-at-a-time sentence framing

use crate::{
    constants::{NMEA_END_CHAR_1, NMEA_END_CHAR_2, NMEA_RUNT_LEN, NMEA_SYNC_CHAR},
    error::ParserError,
    parser::buffer::UnderlyingBuffer,
};

/// Where the assembler is between two bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblerState {
    /// Waiting for a `$`; everything else is ignored
    Idle,
    /// Inside a sentence, the buffer holds `$` plus what followed it
    Accumulating,
    /// The previous byte terminated a sentence; its bytes stay readable until the next byte
    Complete,
    /// A sentence outgrew the buffer and was dropped; waiting for the next `$`
    Overflow,
}

/// Reassembles `$...<CR><LF>` sentences from a byte stream inside a bounded buffer.
///
/// A `$` always restarts the sentence, so a corrupted or truncated sentence is dropped
/// silently and the stream resynchronises on the next one.
pub struct StreamAssembler<T: UnderlyingBuffer> {
    buf: T,
    state: AssemblerState,
}

impl<T: UnderlyingBuffer> StreamAssembler<T> {
    pub fn new(mut underlying: T) -> Self {
        underlying.clear();
        Self {
            buf: underlying,
            state: AssemblerState::Idle,
        }
    }

    pub fn state(&self) -> AssemblerState {
        self.state
    }

    pub fn buffer_len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_buffer_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drops any partial sentence and waits for the next `$`.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.state = AssemblerState::Idle;
    }

    /// Feeds one byte.
    ///
    /// Returns `Some(Ok(sentence))` when `byte` terminates a candidate sentence
    /// (the slice excludes CR/LF), `Some(Err(_))` when a sentence was discarded, and
    /// `None` otherwise.
    pub fn feed(&mut self, byte: u8) -> Option<Result<&[u8], ParserError>> {
        if self.state == AssemblerState::Complete {
            self.reset();
        }

        match byte {
            NMEA_SYNC_CHAR => {
                self.buf.clear();
                if !self.buf.push(byte) {
                    self.state = AssemblerState::Overflow;
                    return Some(Err(ParserError::OutOfMemory { required_size: 1 }));
                }
                self.state = AssemblerState::Accumulating;
                None
            },
            NMEA_END_CHAR_1 | NMEA_END_CHAR_2 => self.terminate(),
            _ => match self.state {
                AssemblerState::Accumulating => {
                    if self.buf.push(byte) {
                        return None;
                    }
                    let required_size = self.buf.len() + 1;
                    self.buf.clear();
                    self.state = AssemblerState::Overflow;
                    Some(Err(ParserError::OutOfMemory { required_size }))
                },
                _ => None,
            },
        }
    }

    fn terminate(&mut self) -> Option<Result<&[u8], ParserError>> {
        match self.state {
            AssemblerState::Accumulating => {
                let len = self.buf.len();
                if len <= NMEA_RUNT_LEN {
                    self.reset();
                    return Some(Err(ParserError::SentenceTooShort { len }));
                }
                self.state = AssemblerState::Complete;
                Some(Ok(&self.buf[0..len]))
            },
            AssemblerState::Overflow => {
                self.state = AssemblerState::Idle;
                None
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::NMEA_MAX_SENTENCE_LEN, parser::buffer::FixedBuffer};

    fn assembler() -> StreamAssembler<FixedBuffer<NMEA_MAX_SENTENCE_LEN>> {
        StreamAssembler::new(FixedBuffer::new())
    }

    /// Feeds every byte and returns how many sentences were emitted, plus the last one.
    fn feed_all<T: UnderlyingBuffer>(
        asm: &mut StreamAssembler<T>,
        data: &[u8],
    ) -> (usize, Option<[u8; 16]>) {
        let mut count = 0;
        let mut last = None;
        for b in data {
            if let Some(Ok(sentence)) = asm.feed(*b) {
                count += 1;
                let mut head = [0u8; 16];
                let n = sentence.len().min(16);
                head[..n].copy_from_slice(&sentence[..n]);
                last = Some(head);
            }
        }
        (count, last)
    }

    #[test]
    fn emits_sentence_on_crlf() {
        let mut asm = assembler();
        let (count, last) = feed_all(&mut asm, b"$GPGGA,1,2,3*00\r\n");
        assert_eq!(count, 1);
        assert_eq!(&last.unwrap()[..15], b"$GPGGA,1,2,3*00");
        assert_eq!(asm.state(), AssemblerState::Idle);
    }

    #[test]
    fn lf_after_cr_is_ignored() {
        let mut asm = assembler();
        for b in b"$GPGGA,1" {
            assert!(asm.feed(*b).is_none());
        }
        assert!(matches!(asm.feed(b'\r'), Some(Ok(b"$GPGGA,1"))));
        assert_eq!(asm.state(), AssemblerState::Complete);
        assert!(asm.feed(b'\n').is_none());
        assert!(asm.is_buffer_empty());
    }

    #[test]
    fn dollar_restarts_sentence() {
        let mut asm = assembler();
        let (count, last) = feed_all(&mut asm, b"$GPGGA,12$GPRMC,34\r\n");
        assert_eq!(count, 1);
        assert_eq!(&last.unwrap()[..10], b"$GPRMC,34\0");
    }

    #[test]
    fn garbage_before_sync_is_ignored() {
        let mut asm = assembler();
        let (count, last) = feed_all(&mut asm, b"xx,3*1\r\n$GPRMC,9\n");
        assert_eq!(count, 1);
        assert_eq!(last.unwrap()[0], b'$');
    }

    #[test]
    fn runt_lines_are_discarded() {
        let mut asm = assembler();
        for b in b"$GPGG" {
            asm.feed(*b);
        }
        assert_eq!(
            asm.feed(b'\r'),
            Some(Err(ParserError::SentenceTooShort { len: 5 }))
        );
        // Exactly six characters is still a runt
        for b in b"$GPGGA" {
            asm.feed(*b);
        }
        assert_eq!(
            asm.feed(b'\n'),
            Some(Err(ParserError::SentenceTooShort { len: 6 }))
        );
        assert_eq!(asm.state(), AssemblerState::Idle);
    }

    #[test]
    fn overflow_discards_and_resynchronises() {
        let mut buf = [0u8; 8];
        let mut asm = StreamAssembler::new(crate::parser::FixedLinearBuffer::new(&mut buf));
        for b in b"$GPGGA," {
            assert!(asm.feed(*b).is_none());
        }
        assert!(asm.feed(b'1').is_none());
        assert_eq!(
            asm.feed(b'2'),
            Some(Err(ParserError::OutOfMemory { required_size: 9 }))
        );
        assert_eq!(asm.state(), AssemblerState::Overflow);
        assert!(asm.feed(b'3').is_none());
        assert!(asm.is_buffer_empty());
        assert!(asm.feed(b'\r').is_none());
        assert_eq!(asm.state(), AssemblerState::Idle);

        let (count, _) = feed_all(&mut asm, b"$GPRMC,\r\n");
        assert_eq!(count, 1);
    }

    #[test]
    fn zero_capacity_buffer_never_accumulates() {
        let mut buf = [0u8; 0];
        let mut asm = StreamAssembler::new(crate::parser::FixedLinearBuffer::new(&mut buf));
        assert_eq!(
            asm.feed(b'$'),
            Some(Err(ParserError::OutOfMemory { required_size: 1 }))
        );
        assert_eq!(asm.state(), AssemblerState::Overflow);
        assert!(asm.feed(b'G').is_none());
        assert!(asm.feed(b'\r').is_none());
        assert_eq!(asm.state(), AssemblerState::Idle);
    }

    #[test]
    fn max_length_sentence_fits() {
        let mut asm = assembler();
        asm.feed(b'$');
        for _ in 1..NMEA_MAX_SENTENCE_LEN {
            assert!(asm.feed(b'A').is_none());
        }
        assert_eq!(asm.buffer_len(), NMEA_MAX_SENTENCE_LEN);
        assert!(matches!(asm.feed(b'\n'), Some(Ok(s)) if s.len() == NMEA_MAX_SENTENCE_LEN));
    }

    #[test]
    fn one_past_max_length_overflows() {
        let mut asm = assembler();
        asm.feed(b'$');
        for _ in 1..NMEA_MAX_SENTENCE_LEN {
            asm.feed(b'A');
        }
        assert!(matches!(
            asm.feed(b'A'),
            Some(Err(ParserError::OutOfMemory { .. }))
        ));
        assert!(asm.feed(b'\n').is_none());
    }
}
