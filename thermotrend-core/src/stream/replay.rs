//! Offline replay: producer → engine → writer
//!
//! Pulls every sample from a [`Stream`], classifies it and writes the row.
//! Lines the producer could not parse are skipped and counted; a transport
//! failure on either side stops the replay.

use std::io::{self, Write};

use thiserror_no_std::Error;

use super::{OutputWriter, Stream, StreamError};
use crate::{
    engine::ClassificationEngine,
    sample::{DeviceState, RawSample},
};

/// Summary of a finished replay
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    /// Samples classified and written
    pub samples: usize,
    /// Samples classified ON
    pub device_on: usize,
    /// OFF → ON changes
    pub activations: usize,
    /// Producer items skipped as unparseable
    pub skipped: usize,
}

/// Fatal replay failures
#[derive(Error, Debug)]
pub enum ReplayError<E> {
    /// Producer transport failed
    #[error("source failed: {0}")]
    Source(E),

    /// Writing a row failed
    #[error("output failed: {0}")]
    Output(#[from] io::Error),
}

/// Replay a fully materialized source through `engine` into `output`
///
/// The source is expected to be finite; `WouldBlock` is simply polled again.
pub fn replay<S, E, W>(
    source: &mut S,
    engine: &mut ClassificationEngine,
    output: &mut OutputWriter<W>,
) -> Result<ReplayStats, ReplayError<E>>
where
    S: Stream<Item = RawSample, Error = StreamError<E>>,
    W: Write,
{
    let mut stats = ReplayStats::default();
    let mut last_state = DeviceState::Off;

    loop {
        let raw = match source.poll_next() {
            Ok(raw) => raw,
            Err(nb::Error::WouldBlock) => continue,
            Err(nb::Error::Other(StreamError::EndOfStream)) => break,
            Err(nb::Error::Other(StreamError::Transport(e))) => return Err(ReplayError::Source(e)),
            Err(nb::Error::Other(_)) => {
                stats.skipped += 1;
                continue;
            }
        };

        let (sample, state) = engine.classify(raw);
        output.write_sample(&sample)?;

        stats.samples += 1;
        if state.is_on() {
            stats.device_on += 1;
            if !last_state.is_on() {
                stats.activations += 1;
            }
        }
        last_state = state;
    }

    output.flush()?;

    log_info!(
        "replay finished: {} samples, {} ON, {} activations, {} skipped",
        stats.samples, stats.device_on, stats.activations, stats.skipped
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::EngineConfig, stream::MemoryStream, stream::LogStream};
    use std::io::Cursor;

    fn engine() -> ClassificationEngine {
        ClassificationEngine::with_config(
            EngineConfig::default()
                .with_history_capacity(128)
                .with_sma_window(2)
                .with_sampling_window(4),
        )
        .unwrap()
    }

    #[test]
    fn replays_memory_stream() {
        let samples: Vec<RawSample> = (0..13).map(|ts| RawSample::new(ts, [ts as f64; 4])).collect();
        let mut source = MemoryStream::new(&samples);
        let mut output = OutputWriter::new(Vec::new());

        let stats = replay(&mut source, &mut engine(), &mut output).unwrap();

        assert_eq!(stats.samples, 13);
        assert_eq!(stats.device_on, 5);
        assert_eq!(stats.activations, 1);
        assert_eq!(output.rows(), 13);
    }

    #[test]
    fn skips_malformed_log_lines() {
        let log = "\
14/03/20 15:09:26.250 C C T1=1 T2=2 T3=3 T4=4
garbage line here
14/03/20 15:09:27.250 C C T1=1 T2=2 T3=3 T4=4
";
        let mut source = LogStream::new(Cursor::new(log));
        let mut output = OutputWriter::new(Vec::new());

        let stats = replay(&mut source, &mut engine(), &mut output).unwrap();
        assert_eq!(stats.samples, 2);
        assert_eq!(stats.skipped, 1);

        let text = String::from_utf8(output.into_inner().unwrap()).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("1584198566 1.000000"));
    }
}
