//! Memory-based streams for testing and replay
//!
//! Feeds a slice of already-built samples through the [`Stream`] trait, for
//! unit tests, synthetic sequences and re-processing recorded data.

use super::{Stream, StreamError};
use crate::sample::RawSample;

/// Replays a slice of raw samples in order
///
/// ```rust
/// use thermotrend_core::stream::{MemoryStream, Stream};
/// use thermotrend_core::RawSample;
///
/// let samples = [
///     RawSample::new(0, [20.0; 4]),
///     RawSample::new(1, [20.5; 4]),
/// ];
///
/// let mut stream = MemoryStream::new(&samples);
/// while let Ok(sample) = stream.poll_next() {
///     // Classify sample
///     # let _ = sample;
/// }
/// ```
pub struct MemoryStream<'a> {
    samples: &'a [RawSample],
    position: usize,
}

impl<'a> MemoryStream<'a> {
    /// Create new memory stream from slice
    pub fn new(samples: &'a [RawSample]) -> Self {
        Self {
            samples,
            position: 0,
        }
    }

    /// Reset to beginning
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Get current position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if stream is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.samples.len()
    }
}

impl<'a> Stream for MemoryStream<'a> {
    type Item = RawSample;
    type Error = StreamError<()>;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        let sample = self
            .samples
            .get(self.position)
            .copied()
            .ok_or(nb::Error::Other(StreamError::EndOfStream))?;

        self.position += 1;
        Ok(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.samples.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}
