//! End-to-end decode tests driving the public API with synthetic edge
//! streams, covering framing, noise recovery, debounce and cancellation.

use ir_decoder::source::ReplaySource;
use ir_decoder::{CancelToken, Code, EdgeEvent, EdgeRead, EdgeSource, IrDecoder, ProtocolConfig};
use std::time::{Duration, Instant};

/// Rising edge ending the inter-frame idle gap
fn gap() -> EdgeEvent {
    EdgeEvent {
        level: true,
        elapsed_ms: 50.0,
    }
}

/// Edge sequence for one well-formed 32-bit frame of `code`
fn frame(code: u32) -> Vec<EdgeEvent> {
    let mut edges = vec![
        gap(),
        // 4.5 ms start marker pulse, then 4.5 ms start space
        EdgeEvent {
            level: false,
            elapsed_ms: 4.5,
        },
        EdgeEvent {
            level: true,
            elapsed_ms: 4.5,
        },
    ];
    for i in (0..32).rev() {
        edges.push(EdgeEvent {
            level: false,
            elapsed_ms: 0.6,
        });
        edges.push(EdgeEvent {
            level: true,
            elapsed_ms: if (code >> i) & 1 == 1 { 1.69 } else { 0.56 },
        });
    }
    edges
}

/// Run every edge through the decoder at fixed `now`, collecting codes
fn decode_at(decoder: &mut IrDecoder, edges: &[EdgeEvent], now: Instant) -> Vec<Code> {
    edges
        .iter()
        .filter_map(|&e| decoder.handle_edge(e, now))
        .collect()
}

#[test]
fn round_trip_framing() {
    let mut decoder = IrDecoder::new(ProtocolConfig::default());
    let mut source = ReplaySource::from_events(frame(0xE0E040BF));

    assert_eq!(
        decoder.next_code(&mut source).unwrap(),
        Some(Code(0xE0E040BF))
    );
    assert_eq!(decoder.next_code(&mut source).unwrap(), None);
}

#[test]
fn all_zeros_and_all_ones_patterns() {
    for pattern in [0x0000_0000u32, 0xFFFF_FFFF] {
        let mut decoder = IrDecoder::new(ProtocolConfig::default());
        let mut source = ReplaySource::from_events(frame(pattern));
        assert_eq!(
            decoder.next_code(&mut source).unwrap(),
            Some(Code(pattern)),
            "pattern {:08X}",
            pattern
        );
    }
}

#[test]
fn spurious_pulse_after_gap_yields_no_code() {
    let mut decoder = IrDecoder::new(ProtocolConfig::default());
    // Idle gap, then a 0.1 ms blip that matches no start marker.
    let mut source = ReplaySource::from_events([
        gap(),
        EdgeEvent {
            level: false,
            elapsed_ms: 0.1,
        },
        EdgeEvent {
            level: true,
            elapsed_ms: 0.2,
        },
    ]);
    assert_eq!(decoder.next_code(&mut source).unwrap(), None);
}

#[test]
fn truncated_frame_emits_nothing() {
    let mut decoder = IrDecoder::new(ProtocolConfig::default());
    let mut edges = frame(0xE0E040BF);
    edges.truncate(3 + 2 * 20); // die 20 bits in
    let mut source = ReplaySource::from_events(edges);
    assert_eq!(decoder.next_code(&mut source).unwrap(), None);
}

#[test]
fn corrupted_frame_then_clean_frame_recovers() {
    let mut decoder = IrDecoder::new(ProtocolConfig::default());
    let mut edges = frame(0xE0E040BF);
    // Stretch one bit space past the window so the attempt aborts.
    edges[3 + 2 * 10 + 1].elapsed_ms = 3.0;
    edges.extend(frame(0xE0E0906F));

    let mut source = ReplaySource::from_events(edges);
    assert_eq!(
        decoder.next_code(&mut source).unwrap(),
        Some(Code(0xE0E0906F))
    );
    assert_eq!(decoder.next_code(&mut source).unwrap(), None);
}

#[test]
fn midframe_gap_aborts_and_next_frame_needs_its_own_gap() {
    let mut decoder = IrDecoder::new(ProtocolConfig::default());

    // A frame dies 10 bits in (right after a bit marker) and the line
    // goes idle; the follow-on frame arrives without a fresh gap and must
    // be dropped whole.
    let mut edges = frame(0xE0E040BF);
    edges.truncate(3 + 2 * 10 + 1);
    edges.push(gap());
    let gapless: Vec<EdgeEvent> = frame(0xE0E0906F).split_off(1);
    edges.extend(gapless);

    let mut source = ReplaySource::from_events(edges);
    assert_eq!(decoder.next_code(&mut source).unwrap(), None);

    // Properly gapped, the same frame decodes.
    let mut source = ReplaySource::from_events(frame(0xE0E0906F));
    assert_eq!(
        decoder.next_code(&mut source).unwrap(),
        Some(Code(0xE0E0906F))
    );
}

#[test]
fn identical_frames_inside_debounce_window_yield_one_code() {
    let mut decoder = IrDecoder::new(ProtocolConfig::default());
    let t0 = Instant::now();

    let first = decode_at(&mut decoder, &frame(0xE0E08877), t0);
    let second = decode_at(
        &mut decoder,
        &frame(0xE0E08877),
        t0 + Duration::from_millis(400),
    );

    assert_eq!(first, vec![Code(0xE0E08877)]);
    assert!(second.is_empty());
}

#[test]
fn identical_frames_past_debounce_window_yield_two_codes() {
    let mut decoder = IrDecoder::new(ProtocolConfig::default());
    let t0 = Instant::now();

    let first = decode_at(&mut decoder, &frame(0xE0E08877), t0);
    let second = decode_at(
        &mut decoder,
        &frame(0xE0E08877),
        t0 + Duration::from_millis(1200),
    );

    assert_eq!(first, vec![Code(0xE0E08877)]);
    assert_eq!(second, vec![Code(0xE0E08877)]);
}

#[test]
fn different_codes_are_never_debounced() {
    let mut decoder = IrDecoder::new(ProtocolConfig::default());
    let t0 = Instant::now();

    let first = decode_at(&mut decoder, &frame(0xE0E020DF), t0);
    let second = decode_at(
        &mut decoder,
        &frame(0xE0E0A05F),
        t0 + Duration::from_millis(100),
    );

    assert_eq!(first, vec![Code(0xE0E020DF)]);
    assert_eq!(second, vec![Code(0xE0E0A05F)]);
}

/// Source that checks its token at the wait boundary, emulating a
/// blocked wait interrupted by SIGINT. Cancels itself after a fixed
/// number of edges.
struct CancellableSource {
    token: CancelToken,
    cancel_after: usize,
    inner: ReplaySource,
}

impl EdgeSource for CancellableSource {
    fn next_edge(&mut self) -> ir_decoder::Result<EdgeRead> {
        if self.token.is_cancelled() {
            return Ok(EdgeRead::Cancelled);
        }
        if self.cancel_after == 0 {
            self.token.cancel();
            return Ok(EdgeRead::Cancelled);
        }
        self.cancel_after -= 1;
        self.inner.next_edge()
    }
}

#[test]
fn cancellation_terminates_decode_without_partial_code() {
    let token = CancelToken::new();

    // Cancellation lands mid-frame, 8 bits into the code.
    let mut source = CancellableSource {
        token: token.clone(),
        cancel_after: 3 + 2 * 8,
        inner: ReplaySource::from_events(frame(0xE0E040BF)),
    };

    let mut decoder = IrDecoder::new(ProtocolConfig::default());
    assert_eq!(decoder.next_code(&mut source).unwrap(), None);
    assert!(token.is_cancelled());
    // The partial frame must not leak out after cancellation either.
    assert_eq!(decoder.next_code(&mut source).unwrap(), None);
}

#[test]
fn replayed_dump_text_decodes() {
    // The same stream, serialized the way the CLI dump mode writes it.
    let mut text = String::new();
    for e in frame(0xE0E0609F) {
        text.push_str(&format!(
            "{:12.3}\t{}\n",
            e.elapsed_ms,
            if e.level { 1 } else { 0 }
        ));
    }

    let mut source = ReplaySource::from_reader(text.as_bytes()).unwrap();
    let mut decoder = IrDecoder::new(ProtocolConfig::default());
    assert_eq!(
        decoder.next_code(&mut source).unwrap(),
        Some(Code(0xE0E0609F))
    );
}
