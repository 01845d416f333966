//! Frame assembly state machine
//!
//! Consumes a stream of classified transitions and assembles fixed-width
//! binary codes. Any out-of-window timing silently resynchronizes the
//! machine to the idle-gap hunt; no partial code is ever emitted. The
//! signal carries no framing byte or error correction, so self-healing
//! resync is the only recovery strategy available.

use crate::timing::PulseClass;
use crate::types::Code;

/// Assembler states, in the order a well-formed frame walks them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Hunting for the inter-frame idle gap
    AwaitingGap,
    /// Gap seen; the next falling edge must close a start marker
    AwaitingStartMark,
    /// Start marker seen; the next rising edge must close the start space
    AwaitingStartSpace,
    /// Collecting bits: expecting the per-bit marker pulse
    AwaitingBitMark,
    /// Collecting bits: expecting the space that encodes the bit value
    AwaitingBitSpace,
}

/// Assembles classified transitions into fixed-width codes
pub struct FrameAssembler {
    frame_bits: u8,
    state: State,
    bits_collected: u8,
    accumulator: u32,
}

impl FrameAssembler {
    /// Create an assembler for frames of `frame_bits` data bits (max 32)
    pub fn new(frame_bits: u8) -> Self {
        Self {
            frame_bits: frame_bits.min(32),
            state: State::AwaitingGap,
            bits_collected: 0,
            accumulator: 0,
        }
    }

    /// Feed one classified transition; returns a code when a frame completes
    pub fn push(&mut self, class: PulseClass) -> Option<Code> {
        match self.state {
            State::AwaitingGap => {
                if class == PulseClass::IdleGap {
                    self.state = State::AwaitingStartMark;
                }
                None
            }
            State::AwaitingStartMark => {
                if class == PulseClass::StartMark {
                    self.state = State::AwaitingStartSpace;
                } else {
                    self.resync(class);
                }
                None
            }
            State::AwaitingStartSpace => {
                if class == PulseClass::StartSpace {
                    self.bits_collected = 0;
                    self.accumulator = 0;
                    self.state = State::AwaitingBitMark;
                } else {
                    self.resync(class);
                }
                None
            }
            State::AwaitingBitMark => {
                if class == PulseClass::BitMark {
                    self.state = State::AwaitingBitSpace;
                } else {
                    self.resync(class);
                }
                None
            }
            State::AwaitingBitSpace => match class {
                PulseClass::BitZero => self.shift_bit(0),
                PulseClass::BitOne => self.shift_bit(1),
                other => {
                    self.resync(other);
                    None
                }
            },
        }
    }

    /// Discard any in-progress frame and hunt for the next idle gap
    pub fn reset(&mut self) {
        self.state = State::AwaitingGap;
        self.bits_collected = 0;
        self.accumulator = 0;
    }

    /// Shift one bit in, MSB first; emit the code once the frame is full
    fn shift_bit(&mut self, bit: u32) -> Option<Code> {
        self.accumulator = (self.accumulator << 1) | bit;
        self.bits_collected += 1;

        if self.bits_collected >= self.frame_bits {
            let code = Code(self.accumulator);
            self.reset();
            Some(code)
        } else {
            self.state = State::AwaitingBitMark;
            None
        }
    }

    /// Abandon the current frame attempt
    ///
    /// The offending event is consumed and the machine drops back to the
    /// gap hunt unconditionally: even an idle gap observed mid-frame does
    /// not re-arm the start-marker wait, so the next frame must be
    /// preceded by its own fresh gap.
    fn resync(&mut self, class: PulseClass) {
        log::trace!("frame resync on {:?}", class);
        self.reset();
    }
}
