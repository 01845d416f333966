//! Core types for the IR decoder library
//!
//! This module defines the types that flow through the decode pipeline:
//! raw edge events from the monitored line, the result of one blocking
//! edge wait, and the fully decoded key codes the library emits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// A single level transition on the monitored line
///
/// Produced by an [`EdgeSource`](crate::source::EdgeSource) once per
/// transition and consumed once by the decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeEvent {
    /// Logical level after the transition (true = high)
    pub level: bool,
    /// Elapsed time since the previous transition, in milliseconds
    pub elapsed_ms: f64,
}

/// One fully decoded key press
///
/// Immutable once assembled; compared bitwise against the previously
/// accepted code for repeat suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(pub u32);

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

impl From<u32> for Code {
    fn from(value: u32) -> Self {
        Code(value)
    }
}

/// Result of one blocking edge wait
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeRead {
    /// The line changed level
    Edge(EdgeEvent),
    /// A cancellation request arrived while waiting
    Cancelled,
}

/// Errors that can occur in the decode path
///
/// Timing violations and suppressed key repeats are *not* errors; they are
/// handled internally by resynchronizing the frame assembler or dropping
/// the code. Only edge-source failures and malformed input files surface
/// here.
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("GPIO edge source failed: {0}")]
    Gpio(String),

    #[error("Invalid key table entry: {0}")]
    KeyTable(String),

    #[error("Malformed dump data at line {line}: {reason}")]
    Replay { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_display_is_eight_hex_digits() {
        assert_eq!(format!("{}", Code(0xE0E040BF)), "E0E040BF");
        assert_eq!(format!("{}", Code(0x1A)), "0000001A");
    }

    #[test]
    fn test_code_equality_is_bitwise() {
        assert_eq!(Code(0xE0E040BF), Code::from(0xE0E040BF));
        assert_ne!(Code(0xE0E040BF), Code(0xE0E040BE));
    }
}
