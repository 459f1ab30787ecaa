//! Common test utilities for integration tests
//!
//! Synthetic 4-channel sequences built from simple per-channel signal shapes,
//! plus helpers to run them through a small engine.

#![allow(dead_code)]

use thermotrend_core::{
    ClassificationEngine, DeviceState, EngineConfig, RawSample, Sample, CHANNEL_COUNT,
};

/// Shape of one synthetic channel
#[derive(Debug, Clone, Copy)]
pub enum Signal {
    /// Same value every sample
    Constant(f64),
    /// `start + step * index`
    Ramp { start: f64, step: f64 },
    /// `center + amplitude` on even indices, `center - amplitude` on odd
    Alternating { center: f64, amplitude: f64 },
}

impl Signal {
    pub fn value(&self, index: usize) -> f64 {
        match *self {
            Signal::Constant(value) => value,
            Signal::Ramp { start, step } => start + step * index as f64,
            Signal::Alternating { center, amplitude } => {
                if index % 2 == 0 {
                    center + amplitude
                } else {
                    center - amplitude
                }
            }
        }
    }
}

/// Build `len` samples spaced `interval_s` seconds apart
pub fn sequence(len: usize, interval_s: i64, signals: [Signal; CHANNEL_COUNT]) -> Vec<RawSample> {
    (0..len)
        .map(|i| {
            let readings = signals.map(|signal| signal.value(i));
            RawSample::new(1_600_000_000 + i as i64 * interval_s, readings)
        })
        .collect()
}

/// Engine with a small store and custom windows, default thresholds
pub fn engine(sma_window: usize, sampling_window: usize) -> ClassificationEngine {
    ClassificationEngine::with_config(
        EngineConfig::default()
            .with_history_capacity(4096)
            .with_sma_window(sma_window)
            .with_sampling_window(sampling_window),
    )
    .expect("test engine config is valid")
}

/// Classify every sample in order
pub fn classify_all(
    engine: &mut ClassificationEngine,
    samples: &[RawSample],
) -> Vec<(Sample, DeviceState)> {
    samples.iter().map(|raw| engine.classify(*raw)).collect()
}
