//! Sample producers and consumers around the engine
//!
//! The engine only sees [`RawSample`](crate::RawSample)s in and annotated
//! samples out. This module provides the plumbing on either side:
//! - [`Stream`] - pull-based producer trait (`nb::Result`, no async runtime)
//! - `memory` - replay a slice of samples
//! - `file` - parse bench log files (requires `std`)
//! - `output` - space-delimited result files for plotting (requires `std`)
//! - `replay` - drive a producer through an engine into a writer (requires `std`)

use core::fmt;

use crate::errors::TimestampError;

pub mod memory;

#[cfg(feature = "std")]
pub mod file;

#[cfg(feature = "std")]
pub mod output;

#[cfg(feature = "std")]
pub mod replay;

pub use memory::MemoryStream;

#[cfg(feature = "std")]
pub use file::{LogStream, LogStreamStats};

#[cfg(feature = "std")]
pub use output::OutputWriter;

#[cfg(feature = "std")]
pub use replay::{replay, ReplayError, ReplayStats};

/// Pull-based sample producer
///
/// - `Ok(item)` - next item available
/// - `Err(nb::Error::WouldBlock)` - nothing available yet
/// - `Err(nb::Error::Other(e))` - stream error; `EndOfStream` is sticky
pub trait Stream {
    /// Type of items produced by the stream
    type Item;

    /// Type of errors that can occur
    type Error;

    /// Attempt to pull the next item from the stream
    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error>;

    /// Bounds on remaining items, like `Iterator::size_hint`
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}

/// Errors that can occur while producing samples
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError<E> {
    /// Transport-level error (e.g., I/O error)
    Transport(E),
    /// Line could not be parsed
    Format(&'static str),
    /// Calendar fields did not form a valid timestamp
    Timestamp(TimestampError),
    /// End of stream reached
    EndOfStream,
    /// Line longer than the producer accepts
    Overflow,
}

impl<E: fmt::Display> fmt::Display for StreamError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::Format(msg) => write!(f, "Format error: {}", msg),
            Self::Timestamp(e) => write!(f, "Timestamp error: {}", e),
            Self::EndOfStream => write!(f, "End of stream"),
            Self::Overflow => write!(f, "Line too long"),
        }
    }
}

impl<E> From<TimestampError> for StreamError<E> {
    fn from(err: TimestampError) -> Self {
        Self::Timestamp(err)
    }
}
