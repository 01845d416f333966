//! Edge source boundary
//!
//! The decoder consumes level transitions through the [`EdgeSource`]
//! trait: a blocking call that yields the next transition, a distinct
//! `Cancelled` result when a cooperative cancellation request is pending,
//! or a hard error when the underlying line fails. Sources must check
//! cancellation at the wait boundary rather than aborting out of a
//! blocking call.
//!
//! [`ReplaySource`] replays recorded `(elapsed_ms, level)` pairs, either
//! built in memory or parsed from the CLI dump format, so captures can be
//! decoded offline and tests can drive the full pipeline.

use crate::types::{DecoderError, EdgeEvent, EdgeRead, Result};
use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Yields level transitions on one monitored line
pub trait EdgeSource {
    /// Block until the next transition, a cancellation, or a line failure
    fn next_edge(&mut self) -> Result<EdgeRead>;
}

/// Clonable cooperative cancellation flag
///
/// Set from a signal handler or another thread; observed by edge sources
/// at the wait boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; safe to call from a signal handler
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Replays a recorded sequence of edge events
///
/// Reports `Cancelled` once the recording is exhausted, so a decode loop
/// over a replay terminates cleanly just like a cancelled live session.
#[derive(Debug)]
pub struct ReplaySource {
    events: VecDeque<EdgeEvent>,
}

impl ReplaySource {
    /// Replay an in-memory event sequence
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = EdgeEvent>,
    {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Parse the dump format: one `elapsed_ms <tab> level` pair per line
    ///
    /// This is exactly what the CLI's dump mode writes. Blank lines are
    /// skipped; anything else malformed is an error, not noise.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut events = VecDeque::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let (Some(ms), Some(level)) = (fields.next(), fields.next()) else {
                return Err(DecoderError::Replay {
                    line: idx + 1,
                    reason: format!("expected `elapsed_ms level`, got `{}`", line),
                });
            };

            let elapsed_ms: f64 = ms.parse().map_err(|_| DecoderError::Replay {
                line: idx + 1,
                reason: format!("bad elapsed time `{}`", ms),
            })?;

            let level = match level {
                "0" => false,
                "1" => true,
                other => {
                    return Err(DecoderError::Replay {
                        line: idx + 1,
                        reason: format!("bad level `{}` (expected 0 or 1)", other),
                    })
                }
            };

            // Only the plain dump format round-trips; gnuplot captures
            // carry a third column and must be rejected, not decoded.
            if fields.next().is_some() {
                return Err(DecoderError::Replay {
                    line: idx + 1,
                    reason: format!("unexpected trailing fields in `{}`", line),
                });
            }

            events.push_back(EdgeEvent { level, elapsed_ms });
        }

        Ok(Self { events })
    }

    /// Number of events remaining
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EdgeSource for ReplaySource {
    fn next_edge(&mut self) -> Result<EdgeRead> {
        Ok(match self.events.pop_front() {
            Some(event) => EdgeRead::Edge(event),
            None => EdgeRead::Cancelled,
        })
    }
}
