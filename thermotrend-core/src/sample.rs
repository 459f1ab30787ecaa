//! Sample types flowing through the classifier
//!
//! A producer hands the engine a [`RawSample`]: a timestamp, four readings and
//! an optional manual annotation. The engine returns a [`Sample`] carrying the
//! derived fields (smoothed value, slope, per-channel state) next to the raw
//! ones, plus the device-level [`DeviceState`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Number of independent sensor channels per sample
pub const CHANNEL_COUNT: usize = 4;

/// Trend of a single channel
///
/// Encoded as -1/0/+1 so channel states can be summed for the quorum rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(i8)]
pub enum ChannelState {
    /// Smoothed signal is falling (or flat)
    Falling = -1,
    /// No vote has decided this channel yet
    #[default]
    Unchanged = 0,
    /// Smoothed signal is rising
    Rising = 1,
}

impl ChannelState {
    /// Signed value used in quorum sums and output files
    pub const fn as_i8(self) -> i8 {
        self as i8
    }
}

/// Manual annotations use the same tri-state encoding as channel states
pub type ManualOverride = ChannelState;

/// Device-level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeviceState {
    /// Device is not heating
    #[default]
    Off,
    /// Device is heating
    On,
}

impl DeviceState {
    /// Returns true for [`DeviceState::On`]
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

/// Reading as supplied by a producer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawSample {
    /// Seconds since the Unix epoch
    pub timestamp: Timestamp,
    /// One reading per channel
    pub readings: [f64; CHANNEL_COUNT],
    /// External annotation, passed through untouched
    pub manual_override: [ManualOverride; CHANNEL_COUNT],
}

impl RawSample {
    /// Create a raw sample with no manual annotation
    pub fn new(timestamp: Timestamp, readings: [f64; CHANNEL_COUNT]) -> Self {
        Self {
            timestamp,
            readings,
            manual_override: [ChannelState::Unchanged; CHANNEL_COUNT],
        }
    }

    /// Attach the same manual annotation to every channel
    pub fn with_manual_override(mut self, state: ManualOverride) -> Self {
        self.manual_override = [state; CHANNEL_COUNT];
        self
    }
}

/// Fully annotated sample as stored in history and returned to callers
///
/// `Default` is the zero-valued slot used to pre-fill the history store.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// Seconds since the Unix epoch
    pub timestamp: Timestamp,
    /// Raw reading per channel
    pub readings: [f64; CHANNEL_COUNT],
    /// Trailing moving average per channel, 0 during cold start
    pub smoothed: [f64; CHANNEL_COUNT],
    /// Rate of change of `smoothed` per second
    pub slope: [f64; CHANNEL_COUNT],
    /// Per-channel trend after voting and quorum
    pub channel_state: [ChannelState; CHANNEL_COUNT],
    /// Producer annotation; never read by the engine
    pub manual_override: [ManualOverride; CHANNEL_COUNT],
}

impl From<RawSample> for Sample {
    fn from(raw: RawSample) -> Self {
        Self {
            timestamp: raw.timestamp,
            readings: raw.readings,
            manual_override: raw.manual_override,
            ..Self::default()
        }
    }
}

impl Sample {
    /// Sum of the channel states, in [-4, 4]
    pub fn state_sum(&self) -> i8 {
        self.channel_state.iter().map(|s| s.as_i8()).sum()
    }
}
