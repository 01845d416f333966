//! Raw edge dump modes
//!
//! Diagnostic output only; no decoding happens here. The plain format is
//! one `elapsed_ms <tab> level` pair per line and can be fed back through
//! `--replay`. The gnuplot format emits a step trace: two points at the
//! pre-transition level plus the new level annotated with the elapsed
//! time, ready for `plot "..." with lines`.

use ir_decoder::{EdgeRead, EdgeSource, Result};
use std::io::Write;

/// Dump edges from `source` until cancellation
pub fn run(source: &mut dyn EdgeSource, gnuplot: bool, out: &mut dyn Write) -> Result<()> {
    // Discard the first event; its elapsed time only measures how long
    // the line sat idle before the dump started.
    match source.next_edge()? {
        EdgeRead::Cancelled => return Ok(()),
        EdgeRead::Edge(_) => {}
    }

    let mut t = 0.0f64;

    loop {
        let event = match source.next_edge()? {
            EdgeRead::Cancelled => return Ok(()),
            EdgeRead::Edge(event) => event,
        };
        let v = i32::from(event.level);

        if !gnuplot {
            writeln!(out, "{:12.3}\t{}", event.elapsed_ms, v)?;
        } else {
            // Hold the previous level across the elapsed interval, then
            // step to the new one.
            writeln!(out, "{:12.3}\t{}", t, v ^ 1)?;
            t += event.elapsed_ms;
            writeln!(out, "{:12.3}\t{}", t, v ^ 1)?;
            writeln!(out, "{:12.3}\t{}\t{:12.3}", t, v, event.elapsed_ms)?;
        }
        out.flush()?;
    }
}
