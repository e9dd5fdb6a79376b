use bitflags::bitflags;
use chrono::{NaiveDate, NaiveTime};
use heapless::String;

use crate::{
    constants::{DATE_CAPACITY, LOCAL_TIME_CAPACITY, SATELLITES_CAPACITY, UTC_TIME_CAPACITY},
    coords::Origin,
    diagnostics::Diagnostics,
    error::{DateTimeError, ParserError},
    time::{to_local_with_offset, UtcOffset},
};

bitflags! {
    /// Parts of a [FixState] written by one sentence
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Updated: u8 {
        const TIME = 0x01;
        const POSITION = 0x02;
        const ALTITUDE = 0x04;
        const SATELLITES = 0x08;
        const VELOCITY = 0x10;
        const DATE = 0x20;
    }
}

/// Copies at most `N` bytes of an ASCII field.
fn truncated<const N: usize>(field: &str) -> String<N> {
    let mut s = String::new();
    let end = core::cmp::min(field.len(), N);
    // Sentences are ASCII-checked before fields are extracted, so any byte is a boundary
    if let Some(head) = field.get(..end) {
        let _ = s.push_str(head);
    }
    s
}

/// The latest fix derived from the sentence stream.
///
/// Only the sentence processors write it; everybody else gets `&FixState` or a clone.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FixState {
    pub(crate) longitude: f64,
    pub(crate) latitude: f64,
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) z: f64,
    pub(crate) utc_time: String<UTC_TIME_CAPACITY>,
    pub(crate) local_time: String<LOCAL_TIME_CAPACITY>,
    pub(crate) time_seconds: u32,
    pub(crate) velocity: f64,
    pub(crate) valid_fix: bool,
    pub(crate) satellites: String<SATELLITES_CAPACITY>,
    pub(crate) date: String<DATE_CAPACITY>,
}

impl FixState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a GGA sentence has ever reported a fix.
    ///
    /// Never cleared by a later loss of fix: the last known position stays reported.
    /// A fix report without usable coordinates does not set it.
    pub fn is_valid(&self) -> bool {
        self.valid_fix
    }

    /// Seconds since local midnight of the last recorded time
    pub fn time_seconds(&self) -> u32 {
        self.time_seconds
    }

    /// Meters east of the origin
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Meters north of the origin
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Altitude in meters
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Speed over ground in km/h
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Latitude in degrees, negative is South
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, negative is West
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Receiver time field as sent (`hhmmss[.sss]`), empty until first seen
    pub fn utc_time(&self) -> &str {
        &self.utc_time
    }

    /// Local `HH:MM:SS`, empty until a time was recorded
    pub fn local_time(&self) -> &str {
        &self.local_time
    }

    /// Satellites in use, as sent
    pub fn satellites(&self) -> &str {
        &self.satellites
    }

    pub fn satellite_count(&self) -> Option<u8> {
        self.satellites.parse().ok()
    }

    /// `ddmmyy`, empty until an RMC sentence carried one
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn utc_naive_time(&self) -> Result<NaiveTime, DateTimeError> {
        let digits = self.utc_time.as_bytes();
        if digits.len() < 6 || !digits[..6].iter().all(u8::is_ascii_digit) {
            return Err(DateTimeError::InvalidTime);
        }
        let num = |i: usize| u32::from(digits[i] - b'0') * 10 + u32::from(digits[i + 1] - b'0');
        NaiveTime::from_hms_opt(num(0), num(2), num(4)).ok_or(DateTimeError::InvalidTime)
    }

    /// The RMC date; two-digit years are taken as 20yy.
    pub fn naive_date(&self) -> Result<NaiveDate, DateTimeError> {
        let digits = self.date.as_bytes();
        if digits.len() < 6 || !digits[..6].iter().all(u8::is_ascii_digit) {
            return Err(DateTimeError::InvalidDate);
        }
        let num = |i: usize| u32::from(digits[i] - b'0') * 10 + u32::from(digits[i + 1] - b'0');
        let year = 2000 + num(4) as i32;
        NaiveDate::from_ymd_opt(year, num(2), num(0)).ok_or(DateTimeError::InvalidDate)
    }

    pub(crate) fn record_time(&mut self, utc: &str, offset: UtcOffset) {
        self.utc_time = truncated(utc);
        let local = to_local_with_offset(&self.utc_time, offset);
        self.local_time = local.to_hms_string();
        self.time_seconds = local.elapsed_seconds();
    }

    pub(crate) fn record_satellites(&mut self, field: &str) {
        self.satellites = truncated(field);
    }

    pub(crate) fn record_date(&mut self, field: &str) {
        self.date = truncated(field);
    }
}

/// Everything the parser mutates, owned by the caller and handed to every parser call.
///
/// Independent contexts give independent fixes and origins.
#[derive(Debug, Default, Clone)]
pub struct FixContext {
    pub(crate) fix: FixState,
    pub(crate) origin: Option<Origin>,
    pub(crate) diagnostics: Diagnostics,
}

impl FixContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fix(&self) -> &FixState {
        &self.fix
    }

    /// A copy of the whole fix, for readers that outlive the borrow
    pub fn snapshot(&self) -> FixState {
        self.fix.clone()
    }

    /// Set once, by the first valid fix
    pub fn origin(&self) -> Option<Origin> {
        self.origin
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Counts a dropped sentence. The fix is left as it was.
    pub(crate) fn note_discard(&mut self, err: &ParserError) {
        log::debug!("sentence discarded: {}", err);
        self.diagnostics.record_error(err);
    }

    /// Applies a decoded position, capturing it as the origin if none was set yet.
    pub(crate) fn record_position(&mut self, lat: f64, lon: f64) {
        self.fix.latitude = lat;
        self.fix.longitude = lon;
        self.fix.valid_fix = true;

        match self.origin {
            Some(origin) => {
                let (x, y) = origin.project(lat, lon);
                self.fix.x = x;
                self.fix.y = y;
            },
            None => {
                log::info!("origin set at {:.8}, {:.8}", lat, lon);
                self.origin = Some(Origin::new(lat, lon));
                self.fix.x = 0.0;
                self.fix.y = 0.0;
            },
        }
    }
}

/// A [FixState] published for readers on another thread.
///
/// Writers replace the whole struct and readers copy it out under the same lock, so a
/// snapshot is never torn.
#[cfg(feature = "std")]
#[derive(Debug, Default)]
pub struct SharedFix {
    inner: std::sync::Mutex<FixState>,
}

#[cfg(feature = "std")]
impl SharedFix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, fix: &FixState) {
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.clone_from(fix);
    }

    pub fn snapshot(&self) -> FixState {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}
