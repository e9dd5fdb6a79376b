//! # nmea_fix
//!
//! A pure-rust, allocation free parser for the NMEA 0183 byte stream of a GPS receiver. It
//! keeps a position fix up to date from the `GGA` and `RMC` sentences and projects it onto a
//! local plane, in meters, around the first position the receiver reported.
//!
//! Parsing a stream
//! ================
//!
//! Create a `Parser` and a `FixContext`, then hand the parser bytes as they arrive, one at a
//! time with `feed()` or in chunks with `consume()`. The parser frames `$...<CR><LF>`
//! sentences, checks their checksum and applies them to the context:
//! ```
//! use nmea_fix::{FixContext, Parser, SentenceKind};
//!
//! let mut parser = Parser::default();
//! let mut ctx = FixContext::new();
//!
//! let data = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
//! for byte in data {
//!     if let Some(SentenceKind::Gga) = parser.feed(*byte, &mut ctx) {
//!         // The fix has just been updated
//!     }
//! }
//!
//! let fix = ctx.fix();
//! assert!(fix.is_valid());
//! assert_eq!(fix.z(), 545.4);
//! // The first fix is the origin of the local plane
//! assert_eq!((fix.x(), fix.y()), (0.0, 0.0));
//! ```
//!
//! Corrupted, oversized and unsupported sentences are dropped without touching the fix.
//! `FixContext::diagnostics()` counts them.
//!
//! Byte sources
//! ============
//!
//! A transport that can say whether a byte is waiting implements `ByteSource`; `poll()`
//! drains what is available and returns without blocking:
//! ```
//! use nmea_fix::{FixContext, Parser, SliceSource};
//!
//! let mut parser = Parser::default();
//! let mut ctx = FixContext::new();
//! let mut uart = SliceSource::new(b"$GPRMC,123519,A,4807.038,N,01131.000,E,10.0,084.4,230394,003.1,W*5F\r\n");
//! assert_eq!(parser.poll(&mut uart, &mut ctx), 1);
//! assert!((ctx.fix().velocity() - 18.52).abs() < 1e-6);
//! ```
//!
//! no_std Support
//! ==============
//!
//! The default parser stores sentences inline and never allocates. To use a buffer of your
//! own, wrap it in a FixedLinearBuffer:
//! ```
//! let mut buf = [0; 128];
//! let buf = nmea_fix::FixedLinearBuffer::new(&mut buf[..]);
//! let mut parser = nmea_fix::Parser::new(buf);
//! ```
//! A sentence longer than the buffer is discarded, so the buffer should hold at least the
//! 82 characters NMEA 0183 allows.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;
extern crate core;
#[cfg(feature = "serde")]
extern crate serde;

pub use crate::{
    config::{ParserBuilder, ParserConfig},
    coords::{decode_coordinate, parse_coordinate, project, Origin},
    diagnostics::Diagnostics,
    error::{DateTimeError, ParserError},
    fix::{FixContext, FixState, Updated},
    parser::{
        validate, validate_sentence, AssemblerState, FixedBuffer, FixedLinearBuffer,
        NmeaChecksumCalc, Parser, StreamAssembler, UnderlyingBuffer,
    },
    sentence::{
        dispatch, process_gga, process_rmc, Fields, GgaFields, RawSentence, RmcFields, Sentence,
        SentenceKind,
    },
    source::{ByteSource, SliceSource},
    time::{to_local, to_local_with_offset, LocalTime, UtcOffset},
};

#[cfg(feature = "std")]
pub use crate::fix::SharedFix;

mod config;
pub mod constants;
pub mod coords;
mod diagnostics;
mod error;
mod fix;
mod parser;
mod sentence;
mod source;
pub mod time;
