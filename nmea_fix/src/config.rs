#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::{
    constants::DEFAULT_VELOCITY_NOISE_FLOOR_KMH,
    parser::{FixedBuffer, Parser, UnderlyingBuffer},
    time::UtcOffset,
};

/// Tunables of the sentence processors
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParserConfig {
    /// Offset applied to receiver UTC time for the local time fields
    pub utc_offset: UtcOffset,

    /// Speeds below this many km/h are reported as exactly zero
    pub velocity_noise_floor_kmh: f64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            utc_offset: UtcOffset::DEFAULT,
            velocity_noise_floor_kmh: DEFAULT_VELOCITY_NOISE_FLOOR_KMH,
        }
    }
}

/// Builds a [Parser] with a chosen configuration and sentence buffer.
///
/// ```
/// use nmea_fix::{ParserBuilder, UtcOffset};
///
/// let parser = ParserBuilder::new()
///     .with_utc_offset(UtcOffset::UTC)
///     .with_fixed_buffer::<128>();
/// assert_eq!(parser.config().utc_offset, UtcOffset::UTC);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ParserBuilder {
    config: ParserConfig,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_utc_offset(mut self, offset: UtcOffset) -> Self {
        self.config.utc_offset = offset;
        self
    }

    pub fn with_velocity_noise_floor(mut self, kmh: f64) -> Self {
        self.config.velocity_noise_floor_kmh = kmh;
        self
    }

    /// Finishes with an inline buffer of `N` bytes; sentences longer than `N` are dropped.
    pub fn with_fixed_buffer<const N: usize>(self) -> Parser<FixedBuffer<N>> {
        Parser::with_config(FixedBuffer::new(), self.config)
    }

    /// Finishes with a caller supplied buffer, e.g. a [crate::FixedLinearBuffer].
    pub fn with_buffer<T: UnderlyingBuffer>(self, buffer: T) -> Parser<T> {
        Parser::with_config(buffer, self.config)
    }

    #[cfg(feature = "alloc")]
    pub fn with_vec_buffer(self) -> Parser<Vec<u8>> {
        Parser::with_config(Vec::new(), self.config)
    }
}
