//! Validated sentences, positional fields and dispatch to the GGA/RMC processors.

use core::fmt;

use crate::{
    config::ParserConfig,
    constants::{NMEA_FIELD_SEPARATOR, NMEA_PREFIX_LEN, NMEA_SYNC_CHAR},
    error::ParserError,
    fix::{FixContext, Updated},
    parser::checksum,
};

pub mod gga;
pub mod rmc;

pub use gga::{process_gga, GgaFields};
pub use rmc::{process_rmc, RmcFields};

/// Sentence types that update the fix
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceKind {
    /// Global positioning fix data
    Gga,
    /// Recommended minimum navigation information
    Rmc,
}

impl SentenceKind {
    /// Matches the six character `$TTSSS` prefix; `GP` and `GN` talkers are accepted.
    pub fn from_prefix(sentence: &[u8]) -> Option<Self> {
        match sentence.get(..NMEA_PREFIX_LEN)? {
            [NMEA_SYNC_CHAR, b'G', b'P' | b'N', b'G', b'G', b'A'] => Some(Self::Gga),
            [NMEA_SYNC_CHAR, b'G', b'P' | b'N', b'R', b'M', b'C'] => Some(Self::Rmc),
            _ => None,
        }
    }
}

impl TryFrom<&[u8]> for SentenceKind {
    type Error = ParserError;

    fn try_from(sentence: &[u8]) -> Result<Self, Self::Error> {
        Self::from_prefix(sentence).ok_or(ParserError::UnsupportedSentence)
    }
}

impl fmt::Display for SentenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentenceKind::Gga => f.write_str("GGA"),
            SentenceKind::Rmc => f.write_str("RMC"),
        }
    }
}

/// A framed line starting with `$`, CR/LF stripped, checksum not verified yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSentence<'a>(&'a str);

impl<'a> RawSentence<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Self, ParserError> {
        if bytes.first() != Some(&NMEA_SYNC_CHAR) {
            return Err(ParserError::MissingSyncChar);
        }
        if !bytes.is_ascii() {
            return Err(ParserError::NotAscii);
        }
        let s = core::str::from_utf8(bytes).map_err(|_| ParserError::NotAscii)?;
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.0.as_bytes()
    }

    /// Checks the trailing `*CK` against the body.
    pub fn validate(self) -> Result<Sentence<'a>, ParserError> {
        let star = checksum::validate_sentence(self.as_bytes())?;
        Ok(Sentence {
            raw: self.0,
            body: &self.0[1..star],
        })
    }
}

/// A sentence whose checksum matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    raw: &'a str,
    body: &'a str,
}

impl<'a> Sentence<'a> {
    /// The whole line, `$` and checksum included
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Everything between `$` and `*`
    pub fn body(&self) -> &'a str {
        self.body
    }

    pub fn kind(&self) -> Result<SentenceKind, ParserError> {
        SentenceKind::try_from(self.raw.as_bytes())
    }

    pub fn fields(&self) -> Fields<'a> {
        Fields { body: self.body }
    }
}

/// Comma separated fields of a sentence body.
///
/// Field 0 is the talker and type (`GPGGA`). Empty fields keep their position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields<'a> {
    body: &'a str,
}

impl<'a> Fields<'a> {
    /// The field at `index`, or `""` if the sentence is shorter.
    pub fn get(&self, index: usize) -> &'a str {
        self.iter().nth(index).unwrap_or("")
    }

    pub fn iter(&self) -> core::str::Split<'a, char> {
        self.body.split(NMEA_FIELD_SEPARATOR)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl<'a> IntoIterator for Fields<'a> {
    type Item = &'a str;
    type IntoIter = core::str::Split<'a, char>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Validates a framed line and applies it to the context.
///
/// Every outcome is recorded in the context's [crate::Diagnostics]; the fix is only
/// touched by a sentence whose checksum matched and whose type is supported.
pub fn dispatch(
    line: &[u8],
    ctx: &mut FixContext,
    config: &ParserConfig,
) -> Result<SentenceKind, ParserError> {
    match apply(line, ctx, config) {
        Ok((kind, updated)) => {
            ctx.diagnostics.record_applied(kind);
            log::trace!("{} applied, updated {:?}", kind, updated);
            Ok(kind)
        },
        Err(err) => {
            ctx.note_discard(&err);
            Err(err)
        },
    }
}

fn apply(
    line: &[u8],
    ctx: &mut FixContext,
    config: &ParserConfig,
) -> Result<(SentenceKind, Updated), ParserError> {
    let sentence = RawSentence::new(line)?.validate()?;
    let kind = sentence.kind()?;
    let updated = match kind {
        SentenceKind::Gga => process_gga(&sentence, ctx, config),
        SentenceKind::Rmc => process_rmc(&sentence, ctx, config),
    };
    Ok((kind, updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GGA: &[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";

    #[test]
    fn prefixes() {
        assert_eq!(SentenceKind::from_prefix(b"$GPGGA,"), Some(SentenceKind::Gga));
        assert_eq!(SentenceKind::from_prefix(b"$GNGGA,"), Some(SentenceKind::Gga));
        assert_eq!(SentenceKind::from_prefix(b"$GNRMC,"), Some(SentenceKind::Rmc));
        assert_eq!(SentenceKind::from_prefix(b"$GLGGA,"), None);
        assert_eq!(SentenceKind::from_prefix(b"$GPGSV,"), None);
        assert_eq!(SentenceKind::from_prefix(b"$GPRM"), None);
        assert_eq!(
            SentenceKind::try_from(&b"GPGGA,1"[..]),
            Err(ParserError::UnsupportedSentence)
        );
    }

    #[test]
    fn raw_sentence_needs_sync_and_ascii() {
        assert_eq!(
            RawSentence::new(b"GPGGA,1*00"),
            Err(ParserError::MissingSyncChar)
        );
        assert_eq!(
            RawSentence::new("$GPGGA,\u{e9}*00".as_bytes()),
            Err(ParserError::NotAscii)
        );
        assert!(RawSentence::new(GGA).is_ok());
    }

    #[test]
    fn fields_are_positional() {
        let sentence = RawSentence::new(GGA).unwrap().validate().unwrap();
        assert_eq!(sentence.kind(), Ok(SentenceKind::Gga));
        let fields = sentence.fields();
        assert_eq!(fields.get(0), "GPGGA");
        assert_eq!(fields.get(1), "123519");
        assert_eq!(fields.get(9), "545.4");
        assert_eq!(fields.get(13), "");
        assert_eq!(fields.get(14), "");
        assert_eq!(fields.get(40), "");
        assert_eq!(fields.len(), 15);
        assert!(!sentence.body().contains('*'));
    }

    #[test]
    fn bad_checksum_is_rejected() {
        let mut line = *b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
        line[20] = b'9';
        let raw = RawSentence::new(&line).unwrap();
        assert!(matches!(
            raw.validate(),
            Err(ParserError::InvalidChecksum { .. })
        ));
    }

    #[test]
    fn dispatch_records_outcomes() {
        let mut ctx = FixContext::new();
        let config = ParserConfig::default();
        assert_eq!(dispatch(GGA, &mut ctx, &config), Ok(SentenceKind::Gga));
        assert_eq!(
            dispatch(
                b"$GPGSV,2,1,08,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*75",
                &mut ctx,
                &config
            ),
            Err(ParserError::UnsupportedSentence)
        );
        assert!(dispatch(b"$GPGGA,1,2*00", &mut ctx, &config).is_err());
        let diag = ctx.diagnostics();
        assert_eq!(diag.gga_sentences, 1);
        assert_eq!(diag.unsupported_sentences, 1);
        assert_eq!(diag.checksum_failures, 1);
    }
}
