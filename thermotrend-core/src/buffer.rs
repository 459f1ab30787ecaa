//! Fixed-Capacity History Store for Annotated Samples
//!
//! ## Overview
//!
//! Every processed [`Sample`] is kept in a ring buffer so the smoothing,
//! slope and voting stages can look back over recent history. The store is
//! sized once at construction and never grows: when it is full, the next
//! append wraps to position 0 and overwrites the oldest sample.
//!
//! ## Indexing
//!
//! Samples are addressed by their physical position, which is also the
//! logical index the classifier reasons about. After a wrap the index
//! restarts at 0, so the classifier sees a fresh cold start rather than an
//! index that grows without bound.
//!
//! ```text
//! capacity = 5, after 7 appends:
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │ s5  │ s6  │ s2  │ s3  │ s4  │  ← slots
//! └─────┴─────┴─────┴─────┴─────┘
//!          ↑     ↑
//!   newest ┘     └ oldest / next write
//! ```
//!
//! Position 0 has no previous sample, even after a wrap: the slot at
//! `capacity - 1` belongs to the previous lap and is never read as history.
//!
//! ## Memory
//!
//! All slots are reserved and zero-filled up front with a fallible
//! reservation, so running out of memory surfaces as
//! [`EngineError::Allocation`] at construction instead of an abort mid-run.
//!
//! ```rust
//! use thermotrend_core::buffer::HistoryStore;
//! use thermotrend_core::Sample;
//!
//! let mut store = HistoryStore::with_capacity(3)?;
//!
//! for ts in 0..4 {
//!     store.append(Sample { timestamp: ts, ..Sample::default() });
//! }
//!
//! // Fourth append wrapped to position 0
//! assert_eq!(store.at(0).timestamp, 3);
//! assert!(store.previous(0).is_none());
//! # Ok::<(), thermotrend_core::EngineError>(())
//! ```

use alloc::vec::Vec;

use crate::{
    errors::{EngineError, EngineResult},
    sample::Sample,
};

/// Ring buffer of finalized samples
///
/// ## Internal Invariants
///
/// - `slots.len() == capacity` (pre-filled with zeroed samples)
/// - `write_pos < capacity`
/// - `len <= capacity`
///
/// Not thread-safe; the owning engine is the only writer.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    /// Pre-filled storage, one slot per position
    slots: Vec<Sample>,

    /// Position the next append writes to
    write_pos: usize,

    /// Number of slots written at least once
    len: usize,

    /// How many times the write position has returned to 0
    wraps: u64,
}

impl HistoryStore {
    /// Allocate a zero-filled store
    pub fn with_capacity(capacity: usize) -> EngineResult<Self> {
        if capacity == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "history capacity must be non-zero",
            });
        }

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| EngineError::Allocation { requested: capacity })?;
        slots.resize(capacity, Sample::default());

        Ok(Self {
            slots,
            write_pos: 0,
            len: 0,
            wraps: 0,
        })
    }

    /// Store a sample and return the position it was written to
    pub fn append(&mut self, sample: Sample) -> usize {
        let index = self.write_pos;
        self.slots[index] = sample;

        self.write_pos = (index + 1) % self.slots.len();
        if self.write_pos == 0 {
            self.wraps += 1;
        }

        if self.len < self.slots.len() {
            self.len += 1;
        }

        index
    }

    /// Position the next append will write to
    pub fn next_index(&self) -> usize {
        self.write_pos
    }

    /// Sample at `index`, taken modulo the capacity
    pub fn at(&self, index: usize) -> &Sample {
        &self.slots[index % self.slots.len()]
    }

    /// Sample just before `index`, or `None` at position 0
    pub fn previous(&self, index: usize) -> Option<&Sample> {
        match index % self.slots.len() {
            0 => None,
            i => Some(&self.slots[i - 1]),
        }
    }

    /// Most recently appended sample
    pub fn last(&self) -> Option<&Sample> {
        if self.is_empty() {
            return None;
        }

        let capacity = self.slots.len();
        Some(&self.slots[(self.write_pos + capacity - 1) % capacity])
    }

    /// Number of stored samples, saturating at capacity
    pub fn len(&self) -> usize {
        self.len
    }

    /// True before the first append
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True once every slot has been written
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Fixed number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of completed laps around the buffer
    pub fn wraps(&self) -> u64 {
        self.wraps
    }

    /// Iterate stored samples from oldest to newest
    pub fn iter(&self) -> HistoryIter<'_> {
        HistoryIter {
            store: self,
            offset: 0,
        }
    }

    /// Translate a logical offset (0 = oldest) into a stored sample
    fn logical(&self, offset: usize) -> Option<&Sample> {
        if offset >= self.len {
            return None;
        }

        let physical = if self.is_full() {
            (self.write_pos + offset) % self.slots.len()
        } else {
            offset
        };

        self.slots.get(physical)
    }
}

/// Oldest-to-newest iterator over a [`HistoryStore`]
pub struct HistoryIter<'a> {
    store: &'a HistoryStore,
    offset: usize,
}

impl<'a> Iterator for HistoryIter<'a> {
    type Item = &'a Sample;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.store.logical(self.offset)?;
        self.offset += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.store.len().saturating_sub(self.offset);
        (remaining, Some(remaining))
    }
}
