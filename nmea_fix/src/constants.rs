pub const NMEA_SYNC_CHAR: u8 = 0x24; // '$'
pub const NMEA_END_CHAR_1: u8 = 0x0d; // '\r' (<CR>)
pub const NMEA_END_CHAR_2: u8 = 0x0a; // '\n' (<LF>)
pub const NMEA_CHECKSUM_DELIMITER: u8 = 0x2a; // '*'
pub const NMEA_FIELD_SEPARATOR: char = ',';

/// Wire-level bound of one sentence, terminator slot included
pub const NMEA_BUFFER_SIZE: usize = 256;
/// Longest sentence the assembler will hold, excluding CR/LF
pub const NMEA_MAX_SENTENCE_LEN: usize = NMEA_BUFFER_SIZE - 1;
/// Lines of this length or shorter are never handed to validation
pub(crate) const NMEA_RUNT_LEN: usize = 6;
pub(crate) const NMEA_MIN_CHECKED_LEN: usize = 5;
pub(crate) const NMEA_PREFIX_LEN: usize = 6; // sync (1) + talker (2) + msg type (3)
pub(crate) const NMEA_CHECKSUM_DIGITS: usize = 2;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
pub const KNOTS_TO_KMH: f64 = 1.852;
pub const DEFAULT_VELOCITY_NOISE_FLOOR_KMH: f64 = 1.0;
pub const DEFAULT_UTC_OFFSET_HOURS: i8 = -3;

pub(crate) const SECONDS_PER_HOUR: u32 = 3600;
pub(crate) const SECONDS_PER_MINUTE: u32 = 60;

// Field capacities of the stored fix strings
pub(crate) const UTC_TIME_CAPACITY: usize = 11; // hhmmss.sss + slack
pub(crate) const LOCAL_TIME_CAPACITY: usize = 8; // HH:MM:SS
pub(crate) const SATELLITES_CAPACITY: usize = 3;
pub(crate) const DATE_CAPACITY: usize = 6; // ddmmyy
