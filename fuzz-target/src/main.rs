#[macro_use]
extern crate afl;
extern crate nmea_fix;

use nmea_fix::{FixContext, FixedLinearBuffer, Parser, SentenceKind};

const GGA: &[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";

fn parse(bufsize: usize, chunksize: usize, data: &[u8]) {
    let mut buf = vec![0; bufsize];
    let buf = FixedLinearBuffer::new(&mut buf[..]);
    let mut parser = Parser::new(buf);
    let mut ctx = FixContext::new();
    for chunk in data.chunks(chunksize) {
        parser.consume(chunk, &mut ctx);
    }

    // A line break closes whatever the garbage left open, the sentence after it must apply
    parser.consume(b"\r\n", &mut ctx);
    let applied: Vec<SentenceKind> = GGA
        .iter()
        .filter_map(|b| parser.feed(*b, &mut ctx))
        .collect();
    assert_eq!(applied, [SentenceKind::Gga]);
    assert!(ctx.fix().is_valid());
    assert_eq!(ctx.fix().z(), 545.4);
    assert!(parser.is_buffer_empty());
}

fn main() {
    fuzz!(|data: &[u8]| {
        if data.len() > 2 {
            let bufsize = 82 + data[0] as usize;
            let chunksize = data[1] as usize;
            if chunksize != 0 {
                parse(bufsize, chunksize, &data[2..]);
            }
        }
    });
}
