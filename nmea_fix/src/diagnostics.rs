use crate::{error::ParserError, sentence::SentenceKind};

/// Counters of what the parser did with the stream.
///
/// Discards stay silent as far as control flow goes; these counters are the only trace
/// they leave. All counters wrap.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    pub gga_sentences: u32,
    pub rmc_sentences: u32,
    pub checksum_failures: u32,
    pub overflow_discards: u32,
    pub runt_discards: u32,
    /// Framing or encoding problems other than overflow and runts
    pub malformed_sentences: u32,
    /// Valid sentences of a type this crate does not consume
    pub unsupported_sentences: u32,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sentences that updated the fix
    pub fn applied(&self) -> u32 {
        self.gga_sentences.wrapping_add(self.rmc_sentences)
    }

    /// Sentences dropped as broken: bad checksum, overflow, runt or malformed.
    /// Well-formed sentences of an unsupported type are counted apart.
    pub fn discarded(&self) -> u32 {
        self.checksum_failures
            .wrapping_add(self.overflow_discards)
            .wrapping_add(self.runt_discards)
            .wrapping_add(self.malformed_sentences)
    }

    pub(crate) fn record_applied(&mut self, kind: SentenceKind) {
        let counter = match kind {
            SentenceKind::Gga => &mut self.gga_sentences,
            SentenceKind::Rmc => &mut self.rmc_sentences,
        };
        *counter = counter.wrapping_add(1);
    }

    pub(crate) fn record_error(&mut self, err: &ParserError) {
        let counter = match err {
            ParserError::InvalidChecksum { .. }
            | ParserError::MissingChecksum
            | ParserError::InvalidChecksumDigits => &mut self.checksum_failures,
            ParserError::OutOfMemory { .. } => &mut self.overflow_discards,
            ParserError::SentenceTooShort { .. } => &mut self.runt_discards,
            ParserError::MissingSyncChar | ParserError::NotAscii => &mut self.malformed_sentences,
            ParserError::UnsupportedSentence => &mut self.unsupported_sentences,
        };
        *counter = counter.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_land_in_their_counter() {
        let mut diag = Diagnostics::new();
        diag.record_error(&ParserError::InvalidChecksum { expect: 1, got: 2 });
        diag.record_error(&ParserError::MissingChecksum);
        diag.record_error(&ParserError::OutOfMemory { required_size: 300 });
        diag.record_error(&ParserError::SentenceTooShort { len: 3 });
        diag.record_error(&ParserError::NotAscii);
        diag.record_error(&ParserError::UnsupportedSentence);
        assert_eq!(diag.checksum_failures, 2);
        assert_eq!(diag.overflow_discards, 1);
        assert_eq!(diag.runt_discards, 1);
        assert_eq!(diag.malformed_sentences, 1);
        assert_eq!(diag.unsupported_sentences, 1);
        assert_eq!(diag.discarded(), 5);
        assert_eq!(diag.applied(), 0);
    }

    #[test]
    fn counters_wrap() {
        let mut diag = Diagnostics {
            gga_sentences: u32::MAX,
            ..Diagnostics::default()
        };
        diag.record_applied(SentenceKind::Gga);
        diag.record_applied(SentenceKind::Rmc);
        assert_eq!(diag.gga_sentences, 0);
        assert_eq!(diag.applied(), 1);
    }
}
