//! Trailing simple moving average per channel
//!
//! The smoothed value at index `i` is the mean of the `window` most recent
//! raw readings, the current one included. Only past samples are used.
//!
//! Until more than `window` samples have been stored (`i <= window`) there is
//! no average at all: the smoothed value is the cold-start sentinel 0, not a
//! partial-window mean. The first real average therefore shows up as a
//! single large slope at index `window + 1`.

use crate::{
    buffer::HistoryStore,
    sample::CHANNEL_COUNT,
};

/// Value reported before a full window of history exists
pub const COLD_START_SMOOTHED: f64 = 0.0;

/// Moving-average stage
#[derive(Debug, Clone, Copy)]
pub struct SmoothingEngine {
    window: usize,
}

impl SmoothingEngine {
    /// Create a smoother averaging `window` readings
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Window length in samples
    pub fn window(&self) -> usize {
        self.window
    }

    /// Smoothed values for the sample about to be stored at `index`
    ///
    /// `current` holds that sample's raw readings; the `window - 1` readings
    /// before it are taken from `history`.
    pub fn smooth(
        &self,
        history: &HistoryStore,
        index: usize,
        current: &[f64; CHANNEL_COUNT],
    ) -> [f64; CHANNEL_COUNT] {
        if index <= self.window {
            return [COLD_START_SMOOTHED; CHANNEL_COUNT];
        }

        let mut sums = *current;
        for back in 1..self.window {
            let readings = &history.at(index - back).readings;
            for (sum, reading) in sums.iter_mut().zip(readings) {
                *sum += reading;
            }
        }

        sums.map(|sum| sum / self.window as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Sample;

    fn store_with(readings: &[f64]) -> HistoryStore {
        let mut store = HistoryStore::with_capacity(32).unwrap();
        for (ts, &value) in readings.iter().enumerate() {
            store.append(Sample {
                timestamp: ts as i64,
                readings: [value, value * 2.0, 0.0, -value],
                ..Sample::default()
            });
        }
        store
    }

    #[test]
    fn cold_start_returns_sentinel() {
        let store = store_with(&[1.0, 2.0, 3.0, 4.0]);
        let smoother = SmoothingEngine::new(4);

        // Indices up to and including the window length have no average
        for index in 0..=4 {
            assert_eq!(smoother.smooth(&store, index, &[9.0; 4]), [0.0; 4]);
        }
    }

    #[test]
    fn averages_window_including_current() {
        // Indices 0..=4 stored; sample 5 is being processed
        let store = store_with(&[100.0, 1.0, 2.0, 3.0, 4.0]);
        let smoother = SmoothingEngine::new(3);

        // Current reading 5.0 plus stored 4.0 and 3.0
        let smoothed = smoother.smooth(&store, 5, &[5.0, 10.0, 0.0, -5.0]);
        assert_eq!(smoothed, [4.0, 8.0, 0.0, -4.0]);
    }

    #[test]
    fn window_of_one_is_current_reading() {
        let store = store_with(&[1.0, 2.0, 3.0]);
        let smoother = SmoothingEngine::new(1);
        assert_eq!(smoother.smooth(&store, 3, &[7.0, 6.0, 5.0, 4.0]), [7.0, 6.0, 5.0, 4.0]);
    }
}
