//! Rate of change between consecutive smoothed points
//!
//! `slope = (smoothed[i] - smoothed[i-1]) / (timestamp[i] - timestamp[i-1])`
//!
//! When no time has elapsed (duplicate timestamps) or time went backwards,
//! the previous sample's slope is held instead.

use crate::{
    sample::{Sample, CHANNEL_COUNT},
    time::{elapsed_secs, Timestamp},
};

/// Slope stage
#[derive(Debug, Clone, Copy, Default)]
pub struct SlopeEngine;

impl SlopeEngine {
    /// Create a slope stage
    pub fn new() -> Self {
        Self
    }

    /// Slopes for a sample with `smoothed` values taken at `timestamp`
    ///
    /// `previous` is the stored sample immediately before it.
    pub fn slope(
        &self,
        previous: &Sample,
        smoothed: &[f64; CHANNEL_COUNT],
        timestamp: Timestamp,
    ) -> [f64; CHANNEL_COUNT] {
        let dx = elapsed_secs(previous.timestamp, timestamp);
        if dx <= 0 {
            return previous.slope;
        }

        let mut slopes = [0.0; CHANNEL_COUNT];
        for (channel, slope) in slopes.iter_mut().enumerate() {
            let dy = smoothed[channel] - previous.smoothed[channel];
            *slope = dy / dx as f64;
        }
        slopes
    }
}
