//! 3-of-4 quorum over channel states
//!
//! The four channel states are summed (-1/0/+1 each). A sum above
//! [`QUORUM_MIN_SUM`] turns the device ON and forces every channel of that
//! sample to [`ChannelState::Rising`]. Anything else is OFF and the channel
//! states are left exactly as voted; a falling majority is never forced.
//!
//! Three rising channels only reach quorum when the fourth is not falling
//! (1 + 1 + 1 - 1 = 2).

use crate::{
    constants::QUORUM_MIN_SUM,
    sample::{ChannelState, DeviceState, CHANNEL_COUNT},
};

/// Quorum stage
#[derive(Debug, Clone, Copy, Default)]
pub struct QuorumAggregator;

impl QuorumAggregator {
    /// Create a quorum stage
    pub fn new() -> Self {
        Self
    }

    /// Decide the device state and return the normalized channel states
    pub fn aggregate(
        &self,
        states: [ChannelState; CHANNEL_COUNT],
    ) -> ([ChannelState; CHANNEL_COUNT], DeviceState) {
        let sum: i8 = states.iter().map(|s| s.as_i8()).sum();

        if sum > QUORUM_MIN_SUM {
            return ([ChannelState::Rising; CHANNEL_COUNT], DeviceState::On);
        }

        (states, DeviceState::Off)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::ChannelState::{Falling, Rising, Unchanged};

    #[test]
    fn three_rising_forces_all() {
        let (states, device) = QuorumAggregator::new().aggregate([Rising, Rising, Unchanged, Rising]);
        assert_eq!(device, DeviceState::On);
        assert_eq!(states, [Rising; CHANNEL_COUNT]);
    }

    #[test]
    fn three_rising_one_falling_is_off() {
        let (states, device) = QuorumAggregator::new().aggregate([Rising, Falling, Rising, Rising]);
        assert_eq!(device, DeviceState::Off);
        assert_eq!(states, [Rising, Falling, Rising, Rising]);
    }

    #[test]
    fn falling_majority_is_not_forced() {
        let (states, device) = QuorumAggregator::new().aggregate([Falling, Falling, Falling, Unchanged]);
        assert_eq!(device, DeviceState::Off);
        assert_eq!(states, [Falling, Falling, Falling, Unchanged]);
    }

    #[test]
    fn two_rising_is_off() {
        let (_, device) = QuorumAggregator::new().aggregate([Rising, Rising, Unchanged, Unchanged]);
        assert_eq!(device, DeviceState::Off);
    }
}
