//! Constants for ThermoTrend Core
//!
//! Every numeric value used by the classification stages lives here, with
//! its meaning and the behaviour it controls. `EngineConfig::default()` is
//! built from these values.
//!
//! ## Organization
//!
//! - **Classifier**: smoothing window, voting window, slope thresholds, vote ratio
//! - **Buffers**: history store capacity and producer line limits
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Include units in names where a unit applies
//! 3. Changing a default here changes classification output for existing logs

/// Smoothing, slope and voting parameters.
pub mod classifier;

/// History capacity and producer buffer limits.
pub mod buffers;

pub use classifier::{
    SMA_WINDOW, SAMPLING_WINDOW, SAMPLE_THRESHOLD,
    RISING_SLOPE_PER_S, FALLING_SLOPE_PER_S, QUORUM_MIN_SUM,
};

pub use buffers::{DEFAULT_HISTORY_CAPACITY, MAX_LINE_LEN, MANUAL_MARKER};
