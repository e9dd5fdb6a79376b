use core::fmt;

/// Error that possible during sentence framing and validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserError {
    InvalidChecksum {
        expect: u8,
        got: u8,
    },
    /// No `*` delimiter found where the checksum should be
    MissingChecksum,
    /// The two characters after `*` are not hexadecimal digits
    InvalidChecksumDigits,
    MissingSyncChar,
    SentenceTooShort {
        len: usize,
    },
    /// The sentence did not fit in the assembler buffer and was dropped
    OutOfMemory {
        required_size: usize,
    },
    /// The sentence contains bytes outside 7-bit ASCII
    NotAscii,
    UnsupportedSentence,
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::InvalidChecksum { expect, got } => write!(
                f,
                "Not valid sentence's checksum, expect {:02X}, got {:02X}",
                expect, got
            ),
            ParserError::MissingChecksum => f.write_str("Sentence has no checksum delimiter"),
            ParserError::InvalidChecksumDigits => {
                f.write_str("Sentence checksum is not two hexadecimal digits")
            },
            ParserError::MissingSyncChar => f.write_str("Sentence does not start with '$'"),
            ParserError::SentenceTooShort { len } => {
                write!(f, "Sentence too short ({} bytes)", len)
            },
            ParserError::OutOfMemory { required_size } => write!(
                f,
                "Sentence does not fit in buffer, at least {} bytes required",
                required_size
            ),
            ParserError::NotAscii => f.write_str("Sentence is not valid ASCII"),
            ParserError::UnsupportedSentence => f.write_str("Unsupported sentence type"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParserError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeError {
    InvalidDate,
    InvalidTime,
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeError::InvalidDate => f.write_str("invalid date"),
            DateTimeError::InvalidTime => f.write_str("invalid time"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DateTimeError {}
