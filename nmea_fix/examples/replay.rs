//! Replays a short capture through a parser that never allocates.

use nmea_fix::{FixContext, FixedLinearBuffer, Parser, SentenceKind};

const CAPTURE: &[u8] = b"\
$GPGSV,2,1,08,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*75\r\n\
$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n\
$GPRMC,123519,A,4807.038,N,01131.000,E,10.0,084.4,230394,003.1,W*5F\r\n\
$GPGGA,123521,4807.100,N,01131.100,E,1,09,0.9,550.0,M,46.9,M,,*46\r\n";

fn main() {
    let mut buf = [0u8; 96];
    let mut parser = Parser::new(FixedLinearBuffer::new(&mut buf));
    let mut ctx = FixContext::new();

    for byte in CAPTURE {
        if let Some(SentenceKind::Gga) = parser.feed(*byte, &mut ctx) {
            let fix = ctx.fix();
            println!(
                "{} X={:.2} Y={:.2} Z={:.2} sats={}",
                fix.local_time(),
                fix.x(),
                fix.y(),
                fix.z(),
                fix.satellites()
            );
        }
    }
    println!("{:?}", ctx.diagnostics());
}
