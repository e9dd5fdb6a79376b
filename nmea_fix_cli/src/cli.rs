use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use nmea_fix::UtcOffset;
use serialport::{FlowControl as SerialFlowControl, SerialPort};

/// Where the sentence stream comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Serial { port: String, baud: u32 },
    File(PathBuf),
    Stdin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub input: Input,
    pub utc_offset: UtcOffset,
    pub poll_interval: Duration,
    pub display_interval: Duration,
    pub compact: bool,
    pub json: bool,
}

pub fn command() -> Command {
    Command::new("nmea_fix_cli")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Reads NMEA 0183 sentences and reports the derived GPS fix")
        .arg(
            Arg::new("port")
                .value_name("port")
                .short('p')
                .long("port")
                .required(false)
                .conflicts_with("file")
                .help("Serial port to open"),
        )
        .arg(
            Arg::new("baud")
                .value_name("baud")
                .short('s')
                .long("baud")
                .required(false)
                .default_value("9600")
                .value_parser(value_parser!(u32))
                .help("Baud rate of the port to open (8N1)"),
        )
        .arg(
            Arg::new("file")
                .value_name("file")
                .short('f')
                .long("file")
                .required(false)
                .value_parser(value_parser!(PathBuf))
                .help("Replay a capture file instead of a port; stdin when neither is given"),
        )
        .arg(
            Arg::new("utc-offset")
                .value_name("hours")
                .long("utc-offset")
                .default_value("-3")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i8).range(-12..=14))
                .help("Whole-hour offset from UTC for local time"),
        )
        .arg(
            Arg::new("poll-ms")
                .long("poll-ms")
                .default_value("30")
                .value_parser(value_parser!(u64))
                .help("Delay between two reads of the port"),
        )
        .arg(
            Arg::new("display-ms")
                .long("display-ms")
                .default_value("2000")
                .value_parser(value_parser!(u64))
                .help("Delay between two status reports"),
        )
        .arg(
            Arg::new("compact")
                .long("compact")
                .action(ArgAction::SetTrue)
                .help("Print the one-line compact form instead of the status block"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .conflicts_with("compact")
                .help("Print the fix as JSON"),
        )
}

impl Options {
    pub fn from_matches(cli: &ArgMatches) -> Result<Self> {
        let input = match (
            cli.get_one::<String>("port"),
            cli.get_one::<PathBuf>("file"),
        ) {
            (Some(port), _) => Input::Serial {
                port: port.clone(),
                baud: cli.get_one::<u32>("baud").copied().unwrap_or(9600),
            },
            (None, Some(path)) => Input::File(path.clone()),
            (None, None) => Input::Stdin,
        };
        let hours = cli.get_one::<i8>("utc-offset").copied().unwrap_or(-3);
        let utc_offset = UtcOffset::from_hours(hours)
            .with_context(|| format!("Unsupported UTC offset: {hours}"))?;

        Ok(Self {
            input,
            utc_offset,
            poll_interval: Duration::from_millis(
                cli.get_one::<u64>("poll-ms").copied().unwrap_or(30),
            ),
            display_interval: Duration::from_millis(
                cli.get_one::<u64>("display-ms").copied().unwrap_or(2000),
            ),
            compact: cli.get_flag("compact"),
            json: cli.get_flag("json"),
        })
    }
}

/// Opens the port with the receiver's 8N1 framing.
pub fn open_serialport(port: &str, baud: u32) -> Result<Box<dyn SerialPort>> {
    let builder = serialport::new(port, baud)
        .data_bits(serialport::DataBits::Eight)
        .stop_bits(serialport::StopBits::One)
        .parity(serialport::Parity::None)
        .timeout(Duration::from_millis(10))
        .flow_control(SerialFlowControl::None);

    log::debug!("{:?}", &builder);
    builder
        .open()
        .with_context(|| format!("Failed to open port: {}", port))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Options {
        let matches = command()
            .try_get_matches_from(std::iter::once("nmea_fix_cli").chain(args.iter().copied()))
            .unwrap();
        Options::from_matches(&matches).unwrap()
    }

    #[test]
    fn defaults_to_stdin() {
        let opts = parse(&[]);
        assert_eq!(opts.input, Input::Stdin);
        assert_eq!(opts.utc_offset, UtcOffset::DEFAULT);
        assert_eq!(opts.poll_interval, Duration::from_millis(30));
        assert_eq!(opts.display_interval, Duration::from_secs(2));
        assert!(!opts.compact);
    }

    #[test]
    fn serial_and_offset() {
        let opts = parse(&["-p", "/dev/ttyUSB0", "--utc-offset", "2", "--compact"]);
        assert_eq!(
            opts.input,
            Input::Serial {
                port: "/dev/ttyUSB0".to_string(),
                baud: 9600
            }
        );
        assert_eq!(opts.utc_offset.hours(), 2);
        assert!(opts.compact);
    }

    #[test]
    fn negative_offset() {
        let opts = parse(&["--utc-offset", "-5", "-f", "capture.nmea"]);
        assert_eq!(opts.utc_offset.hours(), -5);
        assert_eq!(opts.input, Input::File(PathBuf::from("capture.nmea")));
    }

    #[test]
    fn offset_out_of_range() {
        assert!(command()
            .try_get_matches_from(["nmea_fix_cli", "--utc-offset", "20"])
            .is_err());
    }
}
