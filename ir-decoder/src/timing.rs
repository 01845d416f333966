//! Timing classification
//!
//! Maps one `(level after transition, elapsed_ms)` pair onto a symbolic
//! pulse class using the protocol's timing windows. The classifier never
//! fails: anything outside every window is [`PulseClass::Invalid`], and it
//! is the frame assembler's job to react. Values are never rounded to the
//! nearest window.

use crate::config::ProtocolConfig;

/// Symbolic classification of one edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseClass {
    /// Long quiet period separating frames
    IdleGap,
    /// Start marker pulse ended (high phase in the start window)
    StartMark,
    /// Start space ended (low phase in the start window)
    StartSpace,
    /// Per-bit marker pulse ended
    BitMark,
    /// Bit space ended, short: data bit 0
    BitZero,
    /// Bit space ended, long: data bit 1
    BitOne,
    /// Outside every protocol window
    Invalid,
}

/// Classify one transition against the protocol windows
///
/// `level` is the logical level *after* the transition, so a falling edge
/// (`level == false`) terminates a high phase and a rising edge terminates
/// a low phase. The idle gap is checked first and applies regardless of
/// direction.
///
/// Window edge rules: start and bit-mark windows are closed on both ends;
/// the bit-space window splits at the one-threshold with zero taking
/// `[min, threshold)` and one taking `[threshold, max]`.
pub fn classify(cfg: &ProtocolConfig, level: bool, elapsed_ms: f64) -> PulseClass {
    if elapsed_ms >= cfg.idle_gap_min_ms {
        return PulseClass::IdleGap;
    }

    if !level {
        // Falling edge: a high phase just ended.
        if elapsed_ms >= cfg.start_min_ms && elapsed_ms <= cfg.start_max_ms {
            PulseClass::StartMark
        } else if elapsed_ms >= cfg.bit_mark_min_ms && elapsed_ms <= cfg.bit_mark_max_ms {
            PulseClass::BitMark
        } else {
            PulseClass::Invalid
        }
    } else {
        // Rising edge: a low phase just ended.
        if elapsed_ms >= cfg.start_min_ms && elapsed_ms <= cfg.start_max_ms {
            PulseClass::StartSpace
        } else if elapsed_ms >= cfg.bit_space_min_ms && elapsed_ms < cfg.bit_one_threshold_ms {
            PulseClass::BitZero
        } else if elapsed_ms >= cfg.bit_one_threshold_ms && elapsed_ms <= cfg.bit_space_max_ms {
            PulseClass::BitOne
        } else {
            PulseClass::Invalid
        }
    }
}
