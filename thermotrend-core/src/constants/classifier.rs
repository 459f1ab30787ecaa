//! Classification Parameters
//!
//! Defaults tuned on bench logs of a heater element with four contact
//! thermistors sampled roughly once per second.

// ===== SMOOTHING =====

/// Number of raw readings averaged into one smoothed point.
///
/// Higher values give a smoother line but respond later. At ~1 Hz this is
/// about 20 minutes of history, which flattens thermostat cycling noise.
/// Until more than this many samples have been stored, the smoothed value
/// is reported as 0.
pub const SMA_WINDOW: usize = 1200;

// ===== VOTING =====

/// Number of slopes inspected per vote.
///
/// A vote runs only at store indices that are a multiple of this value
/// (and strictly greater than it). Between votes the channel state is
/// carried forward.
pub const SAMPLING_WINDOW: usize = 120;

/// Fraction of slopes in a window that must agree for a channel to flip.
///
/// The comparison is strict: with 120 slopes, 118 rising slopes flip the
/// channel (118 > 117.6), 117 do not.
pub const SAMPLE_THRESHOLD: f64 = 0.98;

/// Slope above which a smoothed point counts as rising, in units per second.
pub const RISING_SLOPE_PER_S: f64 = 0.001;

/// Slope below which a smoothed point counts as falling, in units per second.
///
/// Slopes between the two thresholds are also counted as falling.
pub const FALLING_SLOPE_PER_S: f64 = -0.001;

// ===== QUORUM =====

/// Sum of the four channel states that must be exceeded for the device to
/// be ON. With states in {-1, 0, +1}, only three or four rising channels
/// (and no falling one) can exceed it.
pub const QUORUM_MIN_SUM: i8 = 2;
