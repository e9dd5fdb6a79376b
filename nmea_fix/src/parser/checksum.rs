use crate::{
    constants::{
        NMEA_CHECKSUM_DELIMITER, NMEA_CHECKSUM_DIGITS, NMEA_MIN_CHECKED_LEN, NMEA_SYNC_CHAR,
    },
    ParserError,
};

/// NMEA 0183 checksum calculator: XOR of every byte between `$` and `*`, supporting both
/// streaming and single-shot validation
#[derive(Default, Debug, Clone, Copy)]
pub struct NmeaChecksumCalc {
    ck: u8,
}

impl NmeaChecksumCalc {
    pub const fn new() -> Self {
        Self { ck: 0 }
    }

    /// Update checksum with new bytes
    pub const fn update(&mut self, bytes: &[u8]) {
        let mut i = 0;
        while i < bytes.len() {
            self.update_byte(bytes[i]);
            i += 1;
        }
    }

    /// Update checksum with a single byte
    pub const fn update_byte(&mut self, byte: u8) {
        self.ck ^= byte;
    }

    /// Get the current checksum result
    pub const fn result(self) -> u8 {
        self.ck
    }

    /// Validate checksum and return result
    pub const fn validate_result(self, received: u8) -> Result<(), ParserError> {
        if self.is_valid(received) {
            Ok(())
        } else {
            Err(ParserError::InvalidChecksum {
                expect: received,
                got: self.ck,
            })
        }
    }

    const fn is_valid(&self, received: u8) -> bool {
        self.ck == received
    }
}

/// Position of the checksum delimiter: the last `*` that still leaves room for two digits
pub(crate) fn find_delimiter(sentence: &[u8]) -> Option<usize> {
    let last = sentence.len().checked_sub(NMEA_CHECKSUM_DIGITS + 1)?;
    sentence[..=last]
        .iter()
        .rposition(|&b| b == NMEA_CHECKSUM_DELIMITER)
}

const fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn parse_checksum_digits(digits: &[u8]) -> Result<u8, ParserError> {
    match digits {
        [hi, lo, ..] => match (hex_digit(*hi), hex_digit(*lo)) {
            (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
            _ => Err(ParserError::InvalidChecksumDigits),
        },
        _ => Err(ParserError::InvalidChecksumDigits),
    }
}

/// Single-shot validation of a framed sentence (`$` ... `*CK`, without CR/LF).
///
/// Returns the index of the `*` delimiter on success so callers can slice the body.
pub fn validate_sentence(sentence: &[u8]) -> Result<usize, ParserError> {
    if sentence.len() < NMEA_MIN_CHECKED_LEN {
        return Err(ParserError::SentenceTooShort {
            len: sentence.len(),
        });
    }
    if sentence[0] != NMEA_SYNC_CHAR {
        return Err(ParserError::MissingSyncChar);
    }
    let star = find_delimiter(sentence).ok_or(ParserError::MissingChecksum)?;
    let received = parse_checksum_digits(&sentence[star + 1..])?;

    let mut calc = NmeaChecksumCalc::new();
    calc.update(&sentence[1..star]);
    calc.validate_result(received)?;
    Ok(star)
}

/// Returns `true` iff the sentence carries a checksum equal to the XOR of its body.
pub fn validate(sentence: &[u8]) -> bool {
    validate_sentence(sentence).is_ok()
}
