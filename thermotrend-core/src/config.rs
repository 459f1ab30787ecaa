//! Engine configuration
//!
//! Window sizes and thresholds are fixed for the lifetime of an engine. They
//! are passed in once at construction so tests and deployments can use other
//! values without recompiling; `EngineConfig::default()` reproduces the
//! classic tuning from [`crate::constants`].
//!
//! ```rust
//! use thermotrend_core::EngineConfig;
//!
//! // Small store and short windows for a 10 Hz bench rig
//! let config = EngineConfig::default()
//!     .with_history_capacity(4096)
//!     .with_sma_window(100)
//!     .with_sampling_window(20);
//!
//! assert!(config.validate().is_ok());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        DEFAULT_HISTORY_CAPACITY, FALLING_SLOPE_PER_S, RISING_SLOPE_PER_S,
        SAMPLE_THRESHOLD, SAMPLING_WINDOW, SMA_WINDOW,
    },
    errors::{EngineError, EngineResult},
};

/// Classification parameters, fixed at engine construction
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Number of samples the history store holds before wrapping
    pub history_capacity: usize,

    /// Readings averaged per smoothed point
    pub sma_window: usize,

    /// Slopes inspected per vote; also the vote period
    pub sampling_window: usize,

    /// Slope strictly above this counts as rising (units/second)
    pub rising_slope: f64,

    /// Slope strictly below this counts as falling (units/second)
    pub falling_slope: f64,

    /// Fraction of a window that must agree before a channel flips
    pub vote_ratio: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            sma_window: SMA_WINDOW,
            sampling_window: SAMPLING_WINDOW,
            rising_slope: RISING_SLOPE_PER_S,
            falling_slope: FALLING_SLOPE_PER_S,
            vote_ratio: SAMPLE_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Set history store capacity
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set smoothing window
    pub fn with_sma_window(mut self, window: usize) -> Self {
        self.sma_window = window;
        self
    }

    /// Set voting window
    pub fn with_sampling_window(mut self, window: usize) -> Self {
        self.sampling_window = window;
        self
    }

    /// Set rising and falling slope thresholds
    pub fn with_slope_thresholds(mut self, rising: f64, falling: f64) -> Self {
        self.rising_slope = rising;
        self.falling_slope = falling;
        self
    }

    /// Set vote ratio
    pub fn with_vote_ratio(mut self, ratio: f64) -> Self {
        self.vote_ratio = ratio;
        self
    }

    /// Minimum number of agreeing slopes, exclusive, for a vote to flip a channel
    pub fn vote_threshold(&self) -> f64 {
        self.sampling_window as f64 * self.vote_ratio
    }

    /// Check the configuration before anything is allocated
    pub fn validate(&self) -> EngineResult<()> {
        if self.history_capacity == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "history capacity must be non-zero",
            });
        }

        if self.sma_window == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "smoothing window must be non-zero",
            });
        }

        if self.sampling_window == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "sampling window must be non-zero",
            });
        }

        if !self.vote_ratio.is_finite() || !(0.0..=1.0).contains(&self.vote_ratio) {
            return Err(EngineError::InvalidConfig {
                reason: "vote ratio must be within [0, 1]",
            });
        }

        if !self.rising_slope.is_finite() || !self.falling_slope.is_finite() {
            return Err(EngineError::InvalidConfig {
                reason: "slope thresholds must be finite",
            });
        }

        if self.falling_slope > self.rising_slope {
            return Err(EngineError::InvalidConfig {
                reason: "falling threshold exceeds rising threshold",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.sma_window, 1200);
        assert_eq!(config.sampling_window, 120);
        assert_eq!(config.vote_ratio, 0.98);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_vote_threshold_sits_between_counts() {
        let threshold = EngineConfig::default().vote_threshold();
        assert!(117.0 < threshold && threshold < 118.0);
    }

    #[test]
    fn rejects_zero_windows() {
        assert!(EngineConfig::default().with_sma_window(0).validate().is_err());
        assert!(EngineConfig::default().with_sampling_window(0).validate().is_err());
        assert!(EngineConfig::default().with_history_capacity(0).validate().is_err());
    }

    #[test]
    fn rejects_bad_ratio() {
        assert!(EngineConfig::default().with_vote_ratio(1.5).validate().is_err());
        assert!(EngineConfig::default().with_vote_ratio(-0.1).validate().is_err());
        assert!(EngineConfig::default().with_vote_ratio(f64::NAN).validate().is_err());
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let config = EngineConfig::default().with_slope_thresholds(-0.01, 0.01);
        assert_eq!(
            config.validate(),
            Err(EngineError::InvalidConfig {
                reason: "falling threshold exceeds rising threshold",
            })
        );
    }
}
