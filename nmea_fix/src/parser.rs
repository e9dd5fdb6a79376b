mod assembler;
mod buffer;
pub(crate) mod checksum;

pub use assembler::{AssemblerState, StreamAssembler};
pub use buffer::{FixedBuffer, FixedLinearBuffer, UnderlyingBuffer};
pub use checksum::{validate, validate_sentence, NmeaChecksumCalc};

use crate::{
    config::ParserConfig,
    constants::NMEA_MAX_SENTENCE_LEN,
    fix::FixContext,
    sentence::{dispatch, SentenceKind},
    source::ByteSource,
};

/// Streaming NMEA 0183 parser.
///
/// Bytes go in one at a time; every complete, checksummed GGA or RMC sentence is applied
/// to the [FixContext] passed along with them. The default parser keeps sentences in an
/// inline buffer of [NMEA_MAX_SENTENCE_LEN] bytes, so it needs no allocator. Pass your own
/// buffer to [Parser::new] to change that.
pub struct Parser<T = FixedBuffer<NMEA_MAX_SENTENCE_LEN>>
where
    T: UnderlyingBuffer,
{
    assembler: StreamAssembler<T>,
    config: ParserConfig,
}

impl core::default::Default for Parser<FixedBuffer<NMEA_MAX_SENTENCE_LEN>> {
    fn default() -> Self {
        Self::new(FixedBuffer::new())
    }
}

impl<T: UnderlyingBuffer> Parser<T> {
    pub fn new(underlying: T) -> Self {
        Self::with_config(underlying, ParserConfig::default())
    }

    pub fn with_config(underlying: T, config: ParserConfig) -> Self {
        Self {
            assembler: StreamAssembler::new(underlying),
            config,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn state(&self) -> AssemblerState {
        self.assembler.state()
    }

    pub fn is_buffer_empty(&self) -> bool {
        self.assembler.is_buffer_empty()
    }

    pub fn buffer_len(&self) -> usize {
        self.assembler.buffer_len()
    }

    /// Drops any partially received sentence.
    pub fn reset(&mut self) {
        self.assembler.reset();
    }

    /// Feeds one byte.
    ///
    /// Returns the kind of sentence applied to `ctx` if this byte completed one. Discarded
    /// sentences only show up in [FixContext::diagnostics].
    pub fn feed(&mut self, byte: u8, ctx: &mut FixContext) -> Option<SentenceKind> {
        match self.assembler.feed(byte)? {
            Ok(line) => dispatch(line, ctx, &self.config).ok(),
            Err(err) => {
                ctx.note_discard(&err);
                None
            },
        }
    }

    /// Feeds a chunk of bytes and returns how many sentences were applied.
    pub fn consume(&mut self, data: &[u8], ctx: &mut FixContext) -> usize {
        data.iter()
            .filter(|&&byte| self.feed(byte, ctx).is_some())
            .count()
    }

    /// Drains every byte `source` has available right now, without waiting for more.
    ///
    /// Returns how many sentences were applied.
    pub fn poll<S>(&mut self, source: &mut S, ctx: &mut FixContext) -> usize
    where
        S: ByteSource + ?Sized,
    {
        let mut applied = 0;
        while source.is_readable() {
            let Some(byte) = source.read_byte() else {
                break;
            };
            if self.feed(byte, ctx).is_some() {
                applied += 1;
            }
        }
        applied
    }
}
