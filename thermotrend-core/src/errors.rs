//! Error Types for Engine Construction and Sample Production
//!
//! ## Design Philosophy
//!
//! Classification itself never fails: every well-formed sample yields an
//! annotated sample and a definite ON/OFF decision. Errors only exist at the
//! edges of the engine:
//!
//! 1. **Construction**: the history store could not be reserved, or the
//!    configuration makes no sense (zero-sized windows, ratios outside [0, 1]).
//!
//! 2. **Production**: a producer could not turn calendar fields into a valid
//!    timestamp. That failure belongs to the producer and is reported with its
//!    own type so it never masquerades as an engine error.
//!
//! Both enums are `Copy` and carry only inline data and `&'static str`
//! reasons, so they can be returned from hot paths without allocation.
//!
//! ## Not Errors
//!
//! - Two samples with the same timestamp: the slope holds its last value.
//! - History store wrap-around: the oldest entry is overwritten.
//!
//! ```rust
//! use thermotrend_core::{ClassificationEngine, EngineConfig, EngineError};
//!
//! let config = EngineConfig::default().with_sampling_window(0);
//! match ClassificationEngine::with_config(config) {
//!     Err(EngineError::InvalidConfig { reason }) => {
//!         // Fix the configuration and try again
//!         # let _ = reason;
//!     }
//!     Err(EngineError::Allocation { .. }) => {
//!         // Not enough memory for the requested history
//!     }
//!     Ok(_) => unreachable!(),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for engine construction
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine construction errors
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum EngineError {
    /// History store could not be allocated
    #[error("Failed to allocate history store for {requested} samples")]
    Allocation {
        /// Number of samples the store was asked to hold
        requested: usize,
    },

    /// Configuration rejected before any allocation happened
    #[error("Invalid engine configuration: {reason}")]
    InvalidConfig {
        reason: &'static str,
    },
}

/// Calendar-to-timestamp normalization failures (producer side)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampError {
    /// Day, month or year do not form a real date
    #[error("Invalid date {year}-{month}-{day}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
    },

    /// Hour, minute or second out of range
    #[error("Invalid time {hour}:{minute}:{second}")]
    InvalidTime {
        hour: u32,
        minute: u32,
        second: u32,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for EngineError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Allocation { requested } =>
                defmt::write!(fmt, "Allocation failed for {} samples", requested),
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid config: {}", reason),
        }
    }
}
