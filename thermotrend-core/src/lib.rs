//! Streaming heating/cooling classifier for multi-sensor temperature logs
//!
//! Consumes a time-ordered stream of 4-channel temperature samples and decides,
//! sample by sample, whether the monitored device is actively heating (ON) or
//! not (OFF). Only a bounded window of recent history is ever consulted.
//!
//! Processing stages for every sample:
//! - smoothing: trailing simple moving average per channel
//! - slope: rate of change between consecutive smoothed points
//! - window vote: once per completed window, each channel votes rising/falling
//! - quorum: 3-of-4 rising channels turn the device ON
//!
//! ```no_run
//! use thermotrend_core::{ClassificationEngine, DeviceState, RawSample};
//!
//! let mut engine = ClassificationEngine::new()?;
//!
//! let raw = RawSample::new(1_600_000_000, [20.0, 20.1, 19.9, 20.0]);
//! let (sample, state) = engine.classify(raw);
//!
//! if state == DeviceState::On {
//!     // Device is heating
//! }
//! # let _ = sample;
//! # Ok::<(), thermotrend_core::EngineError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod buffer;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod quorum;
pub mod sample;
pub mod slope;
pub mod smoothing;
pub mod stream;
pub mod time;

// Public API
pub use config::EngineConfig;
pub use engine::ClassificationEngine;
pub use errors::{EngineError, EngineResult, TimestampError};
pub use sample::{ChannelState, DeviceState, RawSample, Sample, CHANNEL_COUNT};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
