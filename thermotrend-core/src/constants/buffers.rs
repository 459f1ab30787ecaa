//! Buffer Sizes and Producer Limits

// ===== HISTORY STORE =====

/// Default history store capacity in samples.
///
/// One million samples covers more than eleven days at 1 Hz. Each slot is
/// roughly 112 bytes, so the default store reserves about 112 MB. Embedded
/// targets should pass a smaller capacity through `EngineConfig`; anything
/// above the larger of the two windows keeps classification intact.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1_000_000;

// ===== LOG PRODUCER =====

/// Longest log line accepted by the log producer, in bytes.
pub const MAX_LINE_LEN: usize = 512;

/// Marker identifying a manual annotation line: nine consecutive tabs.
pub const MANUAL_MARKER: &str = "\t\t\t\t\t\t\t\t\t";

/// Lines shorter than this are treated as blank and skipped.
pub const MIN_LINE_LEN: usize = 5;
