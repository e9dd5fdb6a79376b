use std::{
    fs::File,
    io::{self, Read},
    sync::Arc,
    thread,
};

use anyhow::{Context, Result};
use log::{info, warn};
use nmea_fix::{FixContext, FixState, Parser, ParserBuilder, SentenceKind, SharedFix};

mod cli;
mod display;
mod port;

use cli::{Input, Options};
use port::ReadSource;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .format_timestamp(None)
        .parse_filters("nmea_fix=info,nmea_fix_cli=info")
        .parse_env("RUST_LOG")
        .init();

    let matches = cli::command().get_matches();
    let opts = Options::from_matches(&matches)?;

    let parser = ParserBuilder::new()
        .with_utc_offset(opts.utc_offset)
        .with_fixed_buffer::<{ nmea_fix::constants::NMEA_MAX_SENTENCE_LEN }>();

    match &opts.input {
        Input::Serial { port, baud } => run_serial(parser, port, *baud, &opts),
        Input::File(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            replay(parser, file, &opts)
        },
        Input::Stdin => replay(parser, io::stdin().lock(), &opts),
    }
}

fn print_fix(fix: &FixState, opts: &Options) -> Result<()> {
    if opts.json {
        println!("{}", serde_json::to_string(fix)?);
    } else if opts.compact {
        if fix.is_valid() {
            println!("{}", display::compact_line(fix));
        }
    } else {
        println!("{}", display::status_report(fix));
    }
    Ok(())
}

/// Polls the port every `poll_interval` and reports from a second thread every
/// `display_interval`, the way a receiver loop and a slower logger would share the fix.
fn run_serial(mut parser: Parser, port: &str, baud: u32, opts: &Options) -> Result<()> {
    let serial = cli::open_serialport(port, baud)?;
    info!("Reading NMEA from {} at {} baud", port, baud);

    let shared = Arc::new(SharedFix::new());
    {
        let shared = Arc::clone(&shared);
        let opts = opts.clone();
        thread::spawn(move || loop {
            thread::sleep(opts.display_interval);
            if let Err(e) = print_fix(&shared.snapshot(), &opts) {
                warn!("Could not print fix: {e}");
            }
        });
    }

    let mut source = ReadSource::new(serial, |port: &mut Box<dyn serialport::SerialPort>| {
        port.bytes_to_read()
            .map(|n| n as usize)
            .map_err(io::Error::from)
    });
    let mut ctx = FixContext::new();
    let mut was_valid = false;
    loop {
        if parser.poll(&mut source, &mut ctx) > 0 {
            shared.publish(ctx.fix());
        }
        if let Some(e) = source.take_error() {
            return Err(e).context("Serial port read failed");
        }
        if !was_valid && ctx.fix().is_valid() {
            info!("First fix acquired");
            was_valid = true;
        }
        thread::sleep(opts.poll_interval);
    }
}

/// Feeds a whole capture, reporting after every GGA in compact/JSON mode and once at the end.
fn replay<R: Read>(mut parser: Parser, mut reader: R, opts: &Options) -> Result<()> {
    let mut ctx = FixContext::new();
    let mut buf = [0u8; 4096];
    loop {
        let nbytes = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("Failed to read input"),
        };
        for byte in &buf[..nbytes] {
            let applied = parser.feed(*byte, &mut ctx);
            if applied == Some(SentenceKind::Gga) && (opts.compact || opts.json) {
                print_fix(ctx.fix(), opts)?;
            }
        }
    }

    if !opts.compact && !opts.json {
        print_fix(ctx.fix(), opts)?;
    }
    let diag = ctx.diagnostics();
    info!(
        "{} sentences applied, {} discarded, {} unsupported",
        diag.applied(),
        diag.discarded(),
        diag.unsupported_sentences
    );
    Ok(())
}
