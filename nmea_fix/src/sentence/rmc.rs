use crate::{
    config::ParserConfig,
    constants::KNOTS_TO_KMH,
    fix::{FixContext, Updated},
    sentence::Sentence,
};

const UTC_TIME_MIN_LEN: usize = 6;
const DATE_MIN_LEN: usize = 6;

/// The RMC fields the fix is built from, borrowed from the sentence
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RmcFields<'a> {
    pub time: &'a str,
    pub status: &'a str,
    /// Speed over ground in knots
    pub speed: &'a str,
    pub date: &'a str,
}

impl<'a> RmcFields<'a> {
    pub fn from_sentence(sentence: &Sentence<'a>) -> Self {
        let fields = sentence.fields();
        Self {
            time: fields.get(1),
            status: fields.get(2),
            speed: fields.get(7),
            date: fields.get(9),
        }
    }

    /// Status `A`, data valid
    pub fn is_active(&self) -> bool {
        self.status.as_bytes().first() == Some(&b'A')
    }

    /// Speed in km/h, zero below the noise floor
    pub fn speed_kmh(&self, noise_floor_kmh: f64) -> Option<f64> {
        if !self.is_active() || self.speed.is_empty() {
            return None;
        }
        let knots: f64 = self.speed.parse().ok()?;
        let kmh = knots * KNOTS_TO_KMH;
        if kmh < noise_floor_kmh {
            Some(0.0)
        } else {
            Some(kmh)
        }
    }
}

/// Applies a checksummed RMC sentence.
///
/// GGA owns the time: RMC only fills it in while no time was seen yet.
pub fn process_rmc(
    sentence: &Sentence<'_>,
    ctx: &mut FixContext,
    config: &ParserConfig,
) -> Updated {
    let fields = RmcFields::from_sentence(sentence);
    let mut updated = Updated::empty();

    if fields.time.len() >= UTC_TIME_MIN_LEN && ctx.fix.utc_time.is_empty() {
        ctx.fix.record_time(fields.time, config.utc_offset);
        updated |= Updated::TIME;
    }
    if fields.date.len() >= DATE_MIN_LEN {
        ctx.fix.record_date(fields.date);
        updated |= Updated::DATE;
    }
    if let Some(kmh) = fields.speed_kmh(config.velocity_noise_floor_kmh) {
        ctx.fix.velocity = kmh;
        updated |= Updated::VELOCITY;
    }

    updated
}
