//! Protocol timing configuration
//!
//! All windows of the pulse-distance protocol are configurable so the
//! decoder can be tuned to other remotes, but the defaults reproduce the
//! reference behavior exactly and should be left alone for Samsung-style
//! handsets.
//!
//! Times are in milliseconds throughout; the edge source is expected to
//! deliver sub-millisecond resolution (the narrowest window starts at
//! 0.350 ms).

use serde::{Deserialize, Serialize};

/// Timing windows for one pulse-distance protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Minimum idle gap separating frames
    #[serde(default = "default_idle_gap_min_ms")]
    pub idle_gap_min_ms: f64,

    /// Lower bound of the start marker / start space window
    #[serde(default = "default_start_min_ms")]
    pub start_min_ms: f64,

    /// Upper bound of the start marker / start space window
    #[serde(default = "default_start_max_ms")]
    pub start_max_ms: f64,

    /// Lower bound of the per-bit marker pulse (high phase)
    #[serde(default = "default_bit_mark_min_ms")]
    pub bit_mark_min_ms: f64,

    /// Upper bound of the per-bit marker pulse (high phase)
    #[serde(default = "default_bit_mark_max_ms")]
    pub bit_mark_max_ms: f64,

    /// Lower bound of the per-bit space (low phase)
    #[serde(default = "default_bit_space_min_ms")]
    pub bit_space_min_ms: f64,

    /// Upper bound of the per-bit space (low phase)
    #[serde(default = "default_bit_space_max_ms")]
    pub bit_space_max_ms: f64,

    /// Spaces shorter than this encode 0, longer (or equal) encode 1
    #[serde(default = "default_bit_one_threshold_ms")]
    pub bit_one_threshold_ms: f64,

    /// Number of data bits per frame
    #[serde(default = "default_frame_bits")]
    pub frame_bits: u8,

    /// Minimum re-trigger interval for an identical code (debounce)
    #[serde(default = "default_repeat_window_ms")]
    pub repeat_window_ms: f64,
}

fn default_idle_gap_min_ms() -> f64 {
    46.5
}

fn default_start_min_ms() -> f64 {
    4.0
}

fn default_start_max_ms() -> f64 {
    5.0
}

fn default_bit_mark_min_ms() -> f64 {
    0.350
}

fn default_bit_mark_max_ms() -> f64 {
    0.850
}

fn default_bit_space_min_ms() -> f64 {
    0.350
}

fn default_bit_space_max_ms() -> f64 {
    2.0
}

fn default_bit_one_threshold_ms() -> f64 {
    1.000
}

fn default_frame_bits() -> u8 {
    32
}

fn default_repeat_window_ms() -> f64 {
    1100.0
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            idle_gap_min_ms: default_idle_gap_min_ms(),
            start_min_ms: default_start_min_ms(),
            start_max_ms: default_start_max_ms(),
            bit_mark_min_ms: default_bit_mark_min_ms(),
            bit_mark_max_ms: default_bit_mark_max_ms(),
            bit_space_min_ms: default_bit_space_min_ms(),
            bit_space_max_ms: default_bit_space_max_ms(),
            bit_one_threshold_ms: default_bit_one_threshold_ms(),
            frame_bits: default_frame_bits(),
            repeat_window_ms: default_repeat_window_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_defaults() {
        let cfg = ProtocolConfig::default();
        assert_eq!(cfg.idle_gap_min_ms, 46.5);
        assert_eq!(cfg.start_min_ms, 4.0);
        assert_eq!(cfg.start_max_ms, 5.0);
        assert_eq!(cfg.bit_mark_min_ms, 0.350);
        assert_eq!(cfg.bit_mark_max_ms, 0.850);
        assert_eq!(cfg.bit_space_min_ms, 0.350);
        assert_eq!(cfg.bit_space_max_ms, 2.0);
        assert_eq!(cfg.bit_one_threshold_ms, 1.000);
        assert_eq!(cfg.frame_bits, 32);
        assert_eq!(cfg.repeat_window_ms, 1100.0);
    }
}
