use std::fmt::Write;

use nmea_fix::FixState;

/// Splits a run of at least six characters into `aa<sep>bb<sep>cc`.
fn pairs(field: &str, sep: char, fallback: &'static str) -> String {
    match (field.get(0..2), field.get(2..4), field.get(4..6)) {
        (Some(a), Some(b), Some(c)) => format!("{a}{sep}{b}{sep}{c}"),
        _ => fallback.to_string(),
    }
}

/// `Lon=..,Lat=..,X=..,Y=..,Z=..,T=..,S=..,V=..`
pub fn compact_line(fix: &FixState) -> String {
    format!(
        "Lon={:.8},Lat={:.8},X={:.2},Y={:.2},Z={:.2},T={},S={},V={:.2}",
        fix.longitude(),
        fix.latitude(),
        fix.x(),
        fix.y(),
        fix.z(),
        fix.local_time(),
        fix.time_seconds(),
        fix.velocity()
    )
}

/// Multi-line status block, or a waiting notice while there is no fix.
pub fn status_report(fix: &FixState) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "======= GPS DATA =======");
    if fix.is_valid() {
        let _ = writeln!(out, "STATUS: GPS FIX VALID");
        let _ = writeln!(out, "Longitude (deg): {:.8}", fix.longitude());
        let _ = writeln!(out, "Latitude  (deg): {:.8}", fix.latitude());
        let _ = writeln!(out, "X (m, east of origin): {:.2} m", fix.x());
        let _ = writeln!(out, "Y (m, north of origin): {:.2} m", fix.y());
        let _ = writeln!(out, "Z (altitude): {:.2} m", fix.z());
        let _ = writeln!(out, "UTC time: {}", pairs(fix.utc_time(), ':', "00:00:00"));
        let _ = writeln!(out, "Local time: {}", fix.local_time());
        let _ = writeln!(out, "Seconds: {} s", fix.time_seconds());
        let _ = writeln!(out, "Date: {}", pairs(fix.date(), '/', "00/00/00"));
        let _ = writeln!(out, "Velocity: {:.2} km/h", fix.velocity());
        let _ = writeln!(out, "Satellites: {}", fix.satellites());
        let _ = writeln!(out);
        let _ = writeln!(out, "COMPACT:");
        let _ = writeln!(out, "{}", compact_line(fix));
    } else {
        let _ = writeln!(out, "STATUS: WAITING FOR GPS FIX...");
    }
    let _ = writeln!(out, "========================");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nmea_fix::{FixContext, Parser};

    fn fixed() -> FixContext {
        let mut parser = Parser::default();
        let mut ctx = FixContext::new();
        parser.consume(
            b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n\
              $GPRMC,123519,A,4807.038,N,01131.000,E,10.0,084.4,230394,003.1,W*5F\r\n",
            &mut ctx,
        );
        ctx
    }

    #[test]
    fn compact_line_format() {
        let ctx = fixed();
        assert_eq!(
            compact_line(ctx.fix()),
            "Lon=11.51666667,Lat=48.11730000,X=0.00,Y=0.00,Z=545.40,T=09:35:19,S=34519,V=18.52"
        );
    }

    #[test]
    fn report_formats_time_and_date() {
        let ctx = fixed();
        let report = status_report(ctx.fix());
        assert!(report.contains("UTC time: 12:35:19"));
        assert!(report.contains("Date: 23/03/94"));
        assert!(report.contains("Satellites: 08"));
    }

    #[test]
    fn report_without_fix() {
        let report = status_report(&FixState::new());
        assert!(report.contains("WAITING"));
        assert!(!report.contains("Lon="));
    }
}
