//! Windowed majority vote per channel
//!
//! ## Vote Schedule
//!
//! A vote runs at store index `i` only when `i > window` and
//! `i % window == 0`, i.e. once per completed window aligned to the absolute
//! index. At every other index each channel keeps the state of the previous
//! sample.
//!
//! ## Vote Rule
//!
//! The `window` most recent slopes (indices `i` down to `i - window + 1`)
//! are sorted into rising and falling:
//!
//! | slope                         | counted as |
//! |-------------------------------|------------|
//! | `> rising_slope`              | rising     |
//! | `< falling_slope`             | falling    |
//! | anything else, NaN included   | falling    |
//!
//! The channel becomes [`ChannelState::Rising`] if the rising count is
//! strictly greater than `window * vote_ratio`, else
//! [`ChannelState::Falling`] if the falling count is, else it keeps its
//! previous state. There is no "undecided" outcome.

use crate::{
    buffer::HistoryStore,
    config::EngineConfig,
    sample::{ChannelState, CHANNEL_COUNT},
};

/// Slope counts for one channel over one window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowTally {
    /// Slopes above the rising threshold
    pub rising: usize,
    /// Slopes below the falling threshold
    pub falling: usize,
    /// Everything else; votes with `falling`
    pub flat: usize,
}

impl WindowTally {
    /// Votes on the falling side, flat slopes included
    pub fn falling_votes(&self) -> usize {
        self.falling + self.flat
    }

    /// Outcome of the vote, `None` when neither side clears `threshold`
    pub fn decide(&self, threshold: f64) -> Option<ChannelState> {
        if self.rising as f64 > threshold {
            Some(ChannelState::Rising)
        } else if self.falling_votes() as f64 > threshold {
            Some(ChannelState::Falling)
        } else {
            None
        }
    }
}

/// Voting stage
#[derive(Debug, Clone, Copy)]
pub struct WindowClassifier {
    window: usize,
    rising_slope: f64,
    falling_slope: f64,
    threshold: f64,
}

impl WindowClassifier {
    /// Build from the voting part of an engine configuration
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            window: config.sampling_window,
            rising_slope: config.rising_slope,
            falling_slope: config.falling_slope,
            threshold: config.vote_threshold(),
        }
    }

    /// True at indices where a vote runs
    pub fn is_vote_index(&self, index: usize) -> bool {
        index > self.window && index % self.window == 0
    }

    /// Sort a window of slopes into rising and falling
    pub fn tally<I>(&self, slopes: I) -> WindowTally
    where
        I: IntoIterator<Item = f64>,
    {
        let mut tally = WindowTally::default();
        for slope in slopes {
            if slope > self.rising_slope {
                tally.rising += 1;
            } else if slope < self.falling_slope {
                tally.falling += 1;
            } else {
                // NaN lands here too
                tally.flat += 1;
            }
        }
        tally
    }

    /// Channel states for the sample about to be stored at `index`
    ///
    /// `current` holds that sample's slopes; older slopes come from
    /// `history`. Off-schedule indices return `prior` untouched.
    pub fn classify(
        &self,
        history: &HistoryStore,
        index: usize,
        current: &[f64; CHANNEL_COUNT],
        prior: [ChannelState; CHANNEL_COUNT],
    ) -> [ChannelState; CHANNEL_COUNT] {
        if !self.is_vote_index(index) {
            return prior;
        }

        let mut states = prior;
        for (channel, state) in states.iter_mut().enumerate() {
            let window = core::iter::once(current[channel])
                .chain((1..self.window).map(|back| history.at(index - back).slope[channel]));

            let tally = self.tally(window);
            if let Some(decided) = tally.decide(self.threshold) {
                if decided != *state {
                    log_debug!(
                        "channel {} {:?} -> {:?} at index {} (rising {}, falling {}, flat {})",
                        channel, state, decided, index, tally.rising, tally.falling, tally.flat
                    );
                }
                *state = decided;
            }
        }
        states
    }
}
