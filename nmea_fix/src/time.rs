use core::fmt::{self, Write};

use heapless::String;

use crate::constants::{
    DEFAULT_UTC_OFFSET_HOURS, LOCAL_TIME_CAPACITY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};

/// Fixed whole-hour offset applied to receiver UTC time.
///
/// There is no daylight-saving or day-rollover tracking.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtcOffset(i8);

impl UtcOffset {
    /// UTC-3
    pub const DEFAULT: Self = Self(DEFAULT_UTC_OFFSET_HOURS);
    pub const UTC: Self = Self(0);

    /// Returns `None` outside of the -12..=14 range used by civil time zones.
    pub const fn from_hours(hours: i8) -> Option<Self> {
        if hours >= -12 && hours <= 14 {
            Some(Self(hours))
        } else {
            None
        }
    }

    pub const fn hours(self) -> i8 {
        self.0
    }
}

impl Default for UtcOffset {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Time of day after applying a [UtcOffset]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl LocalTime {
    pub const MIDNIGHT: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Seconds elapsed since local midnight
    pub const fn elapsed_seconds(&self) -> u32 {
        self.hours as u32 * SECONDS_PER_HOUR
            + self.minutes as u32 * SECONDS_PER_MINUTE
            + self.seconds as u32
    }

    /// Zero padded `HH:MM:SS`
    pub fn to_hms_string(&self) -> String<LOCAL_TIME_CAPACITY> {
        let mut s = String::new();
        // Two digits per component always fit in eight bytes
        let _ = write!(s, "{}", self);
        s
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

fn two_digits(pair: &[u8]) -> Option<u8> {
    match pair {
        [tens @ b'0'..=b'9', units @ b'0'..=b'9'] => Some((tens - b'0') * 10 + (units - b'0')),
        _ => None,
    }
}

/// Reads the leading `HHMMSS` of a UTC field.
fn parse_hhmmss(utc: &str) -> Option<(u8, u8, u8)> {
    let digits = utc.as_bytes().get(..6)?;
    Some((
        two_digits(&digits[0..2])?,
        two_digits(&digits[2..4])?,
        two_digits(&digits[4..6])?,
    ))
}

/// Converts a receiver `HHMMSS[.sss]` field with the given offset.
///
/// Input shorter than six characters, or not starting with six digits, yields midnight.
pub fn to_local_with_offset(utc: &str, offset: UtcOffset) -> LocalTime {
    let Some((hours, minutes, seconds)) = parse_hhmmss(utc) else {
        return LocalTime::MIDNIGHT;
    };
    let hours = (i16::from(hours) + i16::from(offset.hours())).rem_euclid(24) as u8;
    LocalTime {
        hours,
        minutes,
        seconds,
    }
}

/// Converts a receiver `HHMMSS[.sss]` field to local time at the default UTC-3 offset.
///
/// Returns the `HH:MM:SS` string and the seconds elapsed since local midnight.
pub fn to_local(utc: &str) -> (String<LOCAL_TIME_CAPACITY>, u32) {
    let local = to_local_with_offset(utc, UtcOffset::DEFAULT);
    (local.to_hms_string(), local.elapsed_seconds())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_before_midnight() {
        let (s, secs) = to_local("235959");
        assert_eq!(s.as_str(), "20:59:59");
        assert_eq!(secs, 75599);
    }

    #[test]
    fn wraps_negative_hours() {
        let (s, secs) = to_local("013005.250");
        assert_eq!(s.as_str(), "22:30:05");
        assert_eq!(secs, 22 * 3600 + 30 * 60 + 5);
    }

    #[test]
    fn short_input_is_midnight() {
        assert_eq!(to_local("12345").0.as_str(), "00:00:00");
        assert_eq!(to_local("").1, 0);
    }

    #[test]
    fn non_digits_are_midnight() {
        assert_eq!(
            to_local_with_offset("12a519", UtcOffset::UTC),
            LocalTime::MIDNIGHT
        );
    }

    #[test]
    fn positive_offset_wraps_forward() {
        let offset = UtcOffset::from_hours(5).unwrap();
        let local = to_local_with_offset("223000", offset);
        assert_eq!(local.hours, 3);
        assert_eq!(local.to_hms_string().as_str(), "03:30:00");
    }

    #[test]
    fn offset_range() {
        assert!(UtcOffset::from_hours(-12).is_some());
        assert!(UtcOffset::from_hours(14).is_some());
        assert!(UtcOffset::from_hours(15).is_none());
        assert_eq!(UtcOffset::default().hours(), -3);
    }
}
