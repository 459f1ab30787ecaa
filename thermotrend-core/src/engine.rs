//! Classification Engine
//!
//! ## Overview
//!
//! [`ClassificationEngine`] owns the history store and runs every incoming
//! sample through the four stages in order:
//!
//! ```text
//! RawSample ─▶ smoothing ─▶ slope ─▶ window vote ─▶ quorum ─▶ (Sample, DeviceState)
//!                  ▲           ▲          ▲                        │
//!                  └───────────┴── HistoryStore ◀──────────────────┘
//! ```
//!
//! Each stage reads only finalized samples from history and produces a new
//! value for the sample in flight; the sample is appended to history once all
//! stages are done, so history never holds a half-annotated sample.
//!
//! ## Lifecycle
//!
//! - construction (`new` / `with_config`) validates the configuration and
//!   reserves the whole store; this is the only fallible step
//! - `classify` is infallible and deterministic given prior history
//! - dropping the engine releases the store
//!
//! ## Bootstrap
//!
//! The sample stored at position 0 is kept as-is (zero smoothing, zero
//! slope, all channels [`Unchanged`](crate::ChannelState::Unchanged)) and classified OFF.
//! The same happens after the store wraps back to position 0.
//!
//! ```rust
//! use thermotrend_core::{ClassificationEngine, DeviceState, EngineConfig, RawSample};
//!
//! let config = EngineConfig::default()
//!     .with_history_capacity(1024)
//!     .with_sma_window(4)
//!     .with_sampling_window(4);
//! let mut engine = ClassificationEngine::with_config(config)?;
//!
//! let (sample, state) = engine.classify(RawSample::new(0, [20.0; 4]));
//! assert_eq!(state, DeviceState::Off);
//! assert_eq!(sample.smoothed, [0.0; 4]);
//! # Ok::<(), thermotrend_core::EngineError>(())
//! ```

use crate::{
    buffer::HistoryStore,
    classifier::WindowClassifier,
    config::EngineConfig,
    constants::QUORUM_MIN_SUM,
    errors::EngineResult,
    quorum::QuorumAggregator,
    sample::{DeviceState, RawSample, Sample},
    slope::SlopeEngine,
    smoothing::SmoothingEngine,
};

/// Streaming ON/OFF classifier with owned history
#[derive(Debug, Clone)]
pub struct ClassificationEngine {
    config: EngineConfig,
    history: HistoryStore,
    smoothing: SmoothingEngine,
    slope: SlopeEngine,
    classifier: WindowClassifier,
    quorum: QuorumAggregator,
    processed: u64,
}

impl ClassificationEngine {
    /// Engine with the default tuning and a full-size history store
    pub fn new() -> EngineResult<Self> {
        Self::with_config(EngineConfig::default())
    }

    /// Engine with explicit configuration
    pub fn with_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let history = HistoryStore::with_capacity(config.history_capacity)?;

        log_info!(
            "classification engine ready: capacity {}, sma window {}, sampling window {}, vote ratio {}",
            config.history_capacity, config.sma_window, config.sampling_window, config.vote_ratio
        );

        Ok(Self {
            config,
            history,
            smoothing: SmoothingEngine::new(config.sma_window),
            slope: SlopeEngine::new(),
            classifier: WindowClassifier::new(&config),
            quorum: QuorumAggregator::new(),
            processed: 0,
        })
    }

    /// Classify one sample
    ///
    /// Returns a copy of the fully annotated sample as stored in history,
    /// together with the device state for that sample.
    pub fn classify(&mut self, raw: RawSample) -> (Sample, DeviceState) {
        let index = self.history.next_index();
        let mut sample = Sample::from(raw);
        self.processed += 1;

        let previous = match self.history.previous(index) {
            Some(previous) => *previous,
            None => {
                if self.history.wraps() > 0 {
                    log_info!(
                        "history store wrapped after {} samples, restarting cold start",
                        self.processed - 1
                    );
                }
                self.history.append(sample);
                return (sample, DeviceState::Off);
            }
        };

        sample.smoothed = self.smoothing.smooth(&self.history, index, &sample.readings);
        sample.slope = self.slope.slope(&previous, &sample.smoothed, sample.timestamp);

        let voted = self.classifier.classify(
            &self.history,
            index,
            &sample.slope,
            previous.channel_state,
        );
        let (states, device) = self.quorum.aggregate(voted);
        sample.channel_state = states;

        if device.is_on() && previous.state_sum() <= QUORUM_MIN_SUM {
            log_debug!("quorum reached at index {} (ts {})", index, sample.timestamp);
        }

        let stored = self.history.append(sample);
        debug_assert_eq!(stored, index);

        (sample, device)
    }

    /// Configuration fixed at construction
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only view of stored samples
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Total samples classified since construction
    pub fn processed(&self) -> u64 {
        self.processed
    }
}

impl Drop for ClassificationEngine {
    fn drop(&mut self) {
        log_debug!(
            "releasing history store ({} slots, {} samples processed)",
            self.history.capacity(), self.processed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{ChannelState, CHANNEL_COUNT};

    fn small_engine(sma: usize, sampling: usize) -> ClassificationEngine {
        ClassificationEngine::with_config(
            EngineConfig::default()
                .with_history_capacity(256)
                .with_sma_window(sma)
                .with_sampling_window(sampling),
        )
        .unwrap()
    }

    #[test]
    fn first_sample_is_off_and_unchanged() {
        let mut engine = small_engine(4, 4);
        let (sample, state) = engine.classify(RawSample::new(10, [99.0; 4]));

        assert_eq!(state, DeviceState::Off);
        assert_eq!(sample.channel_state, [ChannelState::Unchanged; CHANNEL_COUNT]);
        assert_eq!(sample.smoothed, [0.0; CHANNEL_COUNT]);
        assert_eq!(sample.slope, [0.0; CHANNEL_COUNT]);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = ClassificationEngine::with_config(EngineConfig::default().with_sma_window(0));
        assert!(result.is_err());
    }

    #[test]
    fn stored_sample_matches_returned() {
        let mut engine = small_engine(2, 2);
        let mut last = Sample::default();
        for ts in 0..10 {
            let (sample, _) = engine.classify(RawSample::new(ts, [ts as f64; 4]));
            last = sample;
        }
        assert_eq!(engine.history().last(), Some(&last));
        assert_eq!(engine.processed(), 10);
    }

    #[test]
    fn smoothing_starts_after_window() {
        let mut engine = small_engine(3, 100);
        let mut smoothed = alloc::vec::Vec::new();
        for ts in 0..6 {
            let (sample, _) = engine.classify(RawSample::new(ts, [ts as f64; 4]));
            smoothed.push(sample.smoothed[0]);
        }
        // Index 4 averages readings 2, 3, 4; index 5 averages 3, 4, 5
        assert_eq!(smoothed, [0.0, 0.0, 0.0, 0.0, 3.0, 4.0]);
    }

    #[test]
    fn rising_on_all_channels_turns_device_on() {
        let mut engine = small_engine(2, 4);
        let mut states = alloc::vec::Vec::new();
        for ts in 0..13 {
            let (_, state) = engine.classify(RawSample::new(ts, [ts as f64; 4]));
            states.push(state);
        }

        // Slopes: index 3 jumps from the sentinel, index 4 onward is 1.0/s.
        // First vote at index 8 sees slopes 5..=8, all rising.
        assert!(states[..8].iter().all(|s| *s == DeviceState::Off));
        assert!(states[8..].iter().all(|s| *s == DeviceState::On));
    }
}
