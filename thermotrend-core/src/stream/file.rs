//! Bench log producer
//!
//! Parses the text logs written by the thermistor bench recorder into
//! [`RawSample`]s.
//!
//! ## Line Format
//!
//! ```text
//! 14/03/20 15:09:26.250 C C T1=21.50 T2=21.44 T3=21.62 T4=21.38
//! ```
//!
//! Date is `DD/MM/YY` (two-digit years are 20xx), time is `HH:MM:SS.mmm`
//! (milliseconds are dropped), the two unit columns are ignored.
//!
//! ## Manual Annotations
//!
//! Operators mark the moment they switched the device by inserting a line
//! containing nine consecutive tabs. The annotation applies to the sample
//! read just before it: `off` anywhere in the line marks every channel
//! falling, otherwise rising. To attach it, samples leave the stream one line
//! late.
//!
//! ## Errors
//!
//! Malformed lines and bad dates are reported per line and counted in
//! [`LogStreamStats`]; the stream stays usable afterwards. With
//! [`LogStream::with_timestamp_fallback`] a bad date instead yields a sample
//! stamped [`FALLBACK_TIMESTAMP`] and a warning.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::{Stream, StreamError};
use crate::{
    constants::buffers::{MANUAL_MARKER, MAX_LINE_LEN, MIN_LINE_LEN},
    sample::{ChannelState, RawSample, CHANNEL_COUNT},
    time::{timestamp_from_parts, Timestamp, FALLBACK_TIMESTAMP},
};

const READ_CHUNK: usize = 4096;

/// Counters kept while reading a log
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LogStreamStats {
    /// Samples handed out
    pub samples_read: usize,
    /// Lines seen, blank ones included
    pub lines_processed: usize,
    /// Manual annotation lines seen
    pub annotations: usize,
    /// Lines rejected as malformed, too long, or with a bad date
    pub parse_errors: usize,
    /// Samples stamped with the fallback timestamp
    pub timestamp_fallbacks: usize,
    /// Bytes read from the source
    pub bytes_read: usize,
}

/// Log file parser yielding raw samples
///
/// ```rust,no_run
/// use thermotrend_core::stream::{LogStream, Stream};
///
/// let mut stream = LogStream::open("bench_run_2.txt")?
///     .with_timestamp_fallback(true);
///
/// while let Ok(sample) = stream.poll_next() {
///     // Classify sample
///     # let _ = sample;
/// }
/// # Ok::<(), thermotrend_core::stream::StreamError<std::io::Error>>(())
/// ```
pub struct LogStream<R = File> {
    reader: R,
    buffer: [u8; READ_CHUNK],
    buffer_pos: usize,
    buffer_len: usize,
    line_buffer: heapless::String<MAX_LINE_LEN>,
    eof: bool,
    /// Parsed sample waiting for a possible annotation on the next line
    pending: Option<RawSample>,
    timestamp_fallback: bool,
    stats: LogStreamStats,
}

impl LogStream<File> {
    /// Open a log file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StreamError<io::Error>> {
        let file = File::open(path).map_err(StreamError::Transport)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> LogStream<R> {
    /// Parse logs from any reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: [0; READ_CHUNK],
            buffer_pos: 0,
            buffer_len: 0,
            line_buffer: heapless::String::new(),
            eof: false,
            pending: None,
            timestamp_fallback: false,
            stats: LogStreamStats::default(),
        }
    }

    /// Substitute [`FALLBACK_TIMESTAMP`] for unparseable dates instead of failing
    pub fn with_timestamp_fallback(mut self, enabled: bool) -> Self {
        self.timestamp_fallback = enabled;
        self
    }

    /// Get statistics
    pub fn stats(&self) -> &LogStreamStats {
        &self.stats
    }

    /// Refill buffer from the reader
    fn refill_buffer(&mut self) -> Result<bool, StreamError<io::Error>> {
        if self.eof {
            return Ok(false);
        }

        let bytes_read = self
            .reader
            .read(&mut self.buffer)
            .map_err(StreamError::Transport)?;

        self.buffer_pos = 0;
        self.buffer_len = bytes_read;

        if bytes_read == 0 {
            self.eof = true;
            return Ok(false);
        }

        self.stats.bytes_read += bytes_read;
        Ok(true)
    }

    /// Read next line into `line_buffer`; `false` at end of input
    fn read_line(&mut self) -> Result<bool, StreamError<io::Error>> {
        self.line_buffer.clear();
        let mut overflowed = false;

        loop {
            while self.buffer_pos < self.buffer_len {
                let byte = self.buffer[self.buffer_pos];
                self.buffer_pos += 1;

                if byte == b'\n' {
                    self.stats.lines_processed += 1;
                    if overflowed {
                        self.stats.parse_errors += 1;
                        return Err(StreamError::Overflow);
                    }
                    return Ok(true);
                } else if byte != b'\r' && !overflowed && self.line_buffer.push(byte as char).is_err() {
                    overflowed = true;
                }
            }

            if !self.refill_buffer()? {
                if overflowed {
                    self.stats.lines_processed += 1;
                    self.stats.parse_errors += 1;
                    return Err(StreamError::Overflow);
                }
                if !self.line_buffer.is_empty() {
                    self.stats.lines_processed += 1;
                    return Ok(true);
                }
                return Ok(false);
            }
        }
    }

    /// Parse a sample line, counting failures
    fn parse_sample(&mut self, line: &str) -> Result<RawSample, StreamError<io::Error>> {
        let parsed = parse_line::<io::Error>(line);
        let (fields, readings) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => {
                self.stats.parse_errors += 1;
                log_warn!("skipping malformed log line {}: {}", self.stats.lines_processed, line);
                return Err(e);
            }
        };

        let timestamp = match fields.timestamp() {
            Ok(timestamp) => timestamp,
            Err(e) if self.timestamp_fallback => {
                self.stats.timestamp_fallbacks += 1;
                log_warn!(
                    "line {}: {}, using fallback timestamp {}",
                    self.stats.lines_processed, e, FALLBACK_TIMESTAMP
                );
                FALLBACK_TIMESTAMP
            }
            Err(e) => {
                self.stats.parse_errors += 1;
                return Err(e.into());
            }
        };

        Ok(RawSample::new(timestamp, readings))
    }
}

impl<R: Read> Stream for LogStream<R> {
    type Item = RawSample;
    type Error = StreamError<io::Error>;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        loop {
            if !self.read_line()? {
                return match self.pending.take() {
                    Some(sample) => {
                        self.stats.samples_read += 1;
                        Ok(sample)
                    }
                    None => Err(nb::Error::Other(StreamError::EndOfStream)),
                };
            }

            if self.line_buffer.len() < MIN_LINE_LEN {
                continue;
            }

            if self.line_buffer.contains(MANUAL_MARKER) {
                self.stats.annotations += 1;
                let state = if self.line_buffer.contains("off") {
                    ChannelState::Falling
                } else {
                    ChannelState::Rising
                };
                if let Some(pending) = self.pending.as_mut() {
                    pending.manual_override = [state; CHANNEL_COUNT];
                }
                continue;
            }

            let line = self.line_buffer.clone();
            let sample = self.parse_sample(line.as_str())?;

            if let Some(ready) = self.pending.replace(sample) {
                self.stats.samples_read += 1;
                return Ok(ready);
            }
        }
    }
}

/// Calendar fields of a log line
#[derive(Debug, Clone, Copy, PartialEq)]
struct LineTime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

impl LineTime {
    fn timestamp(&self) -> Result<Timestamp, crate::errors::TimestampError> {
        timestamp_from_parts(self.year, self.month, self.day, self.hour, self.minute, self.second)
    }
}

fn parse_line<E>(line: &str) -> Result<(LineTime, [f64; CHANNEL_COUNT]), StreamError<E>> {
    let mut fields = line.split_whitespace();
    let date = fields.next().ok_or(StreamError::Format("Missing date"))?;
    let time = fields.next().ok_or(StreamError::Format("Missing time"))?;

    // Two unit columns
    fields.next().ok_or(StreamError::Format("Missing unit column"))?;
    fields.next().ok_or(StreamError::Format("Missing unit column"))?;

    let mut date_parts = date.split('/');
    let day = parse_field::<u32, E>(date_parts.next(), "Invalid day")?;
    let month = parse_field::<u32, E>(date_parts.next(), "Invalid month")?;
    let mut year = parse_field::<i32, E>(date_parts.next(), "Invalid year")?;
    if year < 100 {
        year += 2000;
    }

    let mut time_parts = time.split(':');
    let hour = parse_field::<u32, E>(time_parts.next(), "Invalid hour")?;
    let minute = parse_field::<u32, E>(time_parts.next(), "Invalid minute")?;
    let seconds = time_parts.next().ok_or(StreamError::Format("Invalid second"))?;
    let second = parse_field::<u32, E>(seconds.split('.').next(), "Invalid second")?;

    let mut readings = [0.0; CHANNEL_COUNT];
    for (channel, reading) in readings.iter_mut().enumerate() {
        let field = fields.next().ok_or(StreamError::Format("Missing temperature"))?;
        let (label, value) = field
            .split_once('=')
            .ok_or(StreamError::Format("Invalid temperature field"))?;

        if label != CHANNEL_LABELS[channel] {
            return Err(StreamError::Format("Unexpected temperature label"));
        }
        *reading = value
            .parse::<f64>()
            .map_err(|_| StreamError::Format("Invalid temperature"))?;
    }

    let time = LineTime { year, month, day, hour, minute, second };
    Ok((time, readings))
}

const CHANNEL_LABELS: [&str; CHANNEL_COUNT] = ["T1", "T2", "T3", "T4"];

fn parse_field<T: core::str::FromStr, E>(
    field: Option<&str>,
    error: &'static str,
) -> Result<T, StreamError<E>> {
    field
        .and_then(|f| f.parse::<T>().ok())
        .ok_or(StreamError::Format(error))
}
