//! Decode a recorded edge dump from a file.
//!
//! Usage: `cargo run --example decode_dump -- capture.dump`
//! (produce a capture with `ir-cli --dump > capture.dump`)

use ir_decoder::source::ReplaySource;
use ir_decoder::{IrDecoder, KeyTable, ProtocolConfig};
use std::fs::File;
use std::io::BufReader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: decode_dump <capture.dump>")?;

    let file = File::open(&path)?;
    let mut source = ReplaySource::from_reader(BufReader::new(file))?;

    let mut decoder = IrDecoder::new(ProtocolConfig::default());
    let keys = KeyTable::samsung();

    while let Some(code) = decoder.next_code(&mut source)? {
        match keys.lookup(code) {
            Some(text) => println!("{} -> {}", code, text.trim()),
            None => println!("{} -> (unrecognized)", code),
        }
    }

    Ok(())
}
