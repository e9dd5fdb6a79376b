use crate::{
    config::ParserConfig,
    coords::parse_coordinate,
    fix::{FixContext, Updated},
    sentence::Sentence,
};

const UTC_TIME_MIN_LEN: usize = 6;

/// The GGA fields the fix is built from, borrowed from the sentence
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GgaFields<'a> {
    pub time: &'a str,
    pub latitude: &'a str,
    pub lat_hemisphere: &'a str,
    pub longitude: &'a str,
    pub lon_hemisphere: &'a str,
    pub fix_quality: &'a str,
    pub satellites: &'a str,
    pub altitude: &'a str,
}

impl<'a> GgaFields<'a> {
    pub fn from_sentence(sentence: &Sentence<'a>) -> Self {
        let mut fields = sentence.fields().into_iter().skip(1);
        let mut next = || fields.next().unwrap_or("");
        let time = next();
        let latitude = next();
        let lat_hemisphere = next();
        let longitude = next();
        let lon_hemisphere = next();
        let fix_quality = next();
        let satellites = next();
        let _hdop = next();
        let altitude = next();
        Self {
            time,
            latitude,
            lat_hemisphere,
            longitude,
            lon_hemisphere,
            fix_quality,
            satellites,
            altitude,
        }
    }

    /// Fix quality present and not `0`
    pub fn has_fix(&self) -> bool {
        matches!(self.fix_quality.as_bytes().first(), Some(q) if *q != b'0')
    }
}

/// Applies a checksummed GGA sentence.
///
/// Time and satellite count are taken whenever present. Altitude and position only
/// when the receiver reports a fix; the first position becomes the projection origin.
pub fn process_gga(
    sentence: &Sentence<'_>,
    ctx: &mut FixContext,
    config: &ParserConfig,
) -> Updated {
    let fields = GgaFields::from_sentence(sentence);
    let mut updated = Updated::empty();

    if fields.time.len() >= UTC_TIME_MIN_LEN {
        ctx.fix.record_time(fields.time, config.utc_offset);
        updated |= Updated::TIME;
    }
    if !fields.satellites.is_empty() {
        ctx.fix.record_satellites(fields.satellites);
        updated |= Updated::SATELLITES;
    }

    if !fields.has_fix() {
        return updated;
    }

    if let Ok(altitude) = fields.altitude.parse::<f64>() {
        ctx.fix.z = altitude;
        updated |= Updated::ALTITUDE;
    }

    let lat = parse_coordinate(fields.latitude, fields.lat_hemisphere);
    let lon = parse_coordinate(fields.longitude, fields.lon_hemisphere);
    if let (Some(lat), Some(lon)) = (lat, lon) {
        ctx.record_position(lat, lon);
        updated |= Updated::POSITION;
    }

    updated
}
