//! IR Remote Decoder CLI Application
//!
//! Command-line front end for the ir-decoder library. It adds what the
//! library deliberately leaves out:
//! - The Linux sysfs GPIO edge source
//! - SIGINT handling (mapped onto the library's cancellation token)
//! - TOML configuration loading (pin, timing windows, key table)
//! - The dump/gnuplot diagnostic modes and replay of recorded dumps
//! - Output formatting for decoded keys

use anyhow::{bail, Context, Result};
use clap::Parser;
use ir_decoder::source::ReplaySource;
use ir_decoder::{keymap, CancelToken, EdgeSource, IrDecoder, KeyTable};
use std::io::{self, Write};
use std::path::PathBuf;

mod config;
mod dump;
mod gpio;

/// IR Remote Decoder - read a pulse-distance IR remote on a GPIO line
#[derive(Parser, Debug)]
#[command(name = "ir-cli")]
#[command(about = "Decode pulse-distance IR remote-control signals", long_about = None)]
#[command(version)]
struct Args {
    /// GPIO input pin to monitor (default: 17)
    #[arg(short, long, value_name = "PIN")]
    pin: Option<u32>,

    /// Don't invert the GPIO input polarity
    #[arg(short = 'n', long)]
    no_invert: bool,

    /// Dump raw edge events instead of decoding
    #[arg(short, long)]
    dump: bool,

    /// Dump edge events as gnuplot step-trace data (implies --dump)
    #[arg(short, long)]
    gnuplot: bool,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Decode a recorded dump file instead of live GPIO
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("IR Remote Decoder CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", ir_decoder::VERSION);

    let app = config::load_or_default(args.config.as_deref())?;

    // CLI flags win over file values.
    let pin = args.pin.or(app.gpio.pin).unwrap_or(17);
    if pin >= 32 {
        bail!("GPIO pin {} out of range (expected 0..32)", pin);
    }
    let invert = if args.no_invert { false } else { app.gpio.invert };

    let keys = app.key_table()?;

    if let Some(replay_path) = &args.replay {
        // Offline decode of a recorded dump
        log::info!("Replaying recorded dump: {:?}", replay_path);
        let file = std::fs::File::open(replay_path)
            .with_context(|| format!("Failed to open dump file: {:?}", replay_path))?;
        let mut source = ReplaySource::from_reader(io::BufReader::new(file))?;
        let mut decoder = IrDecoder::new(app.protocol.clone());
        decode_loop(&mut decoder, &mut source, &keys)?;
    } else {
        // Live GPIO: SIGINT requests cooperative cancellation, observed
        // by the edge source at its wait boundary.
        let token = CancelToken::new();
        let handler_token = token.clone();
        ctrlc::set_handler(move || handler_token.cancel())
            .context("Failed to install SIGINT handler")?;

        println!("Monitoring GPIO {} for changes:", pin);
        let mut source = gpio::SysfsEdgeSource::open(pin, invert, token)?;

        if args.dump || args.gnuplot {
            dump::run(&mut source, args.gnuplot, &mut io::stdout().lock())?;
        } else {
            let mut decoder = IrDecoder::new(app.protocol.clone());
            decode_loop(&mut decoder, &mut source, &keys)?;
        }
    }

    println!("\nExit.");
    Ok(())
}

/// Remote control read loop: print mapped keys until EXIT or cancellation
fn decode_loop(
    decoder: &mut IrDecoder,
    source: &mut dyn EdgeSource,
    keys: &KeyTable,
) -> Result<()> {
    let mut stdout = io::stdout();

    while let Some(code) = decoder.next_code(source)? {
        match keys.lookup(code) {
            Some(text) => {
                stdout.write_all(text.as_bytes())?;
                stdout.flush()?;
                if text.trim() == keymap::EXIT_KEY {
                    break;
                }
            }
            None => {
                // Unrecognized but fully validated; policy here is to log
                // the raw value rather than print it.
                log::debug!("unrecognized code {}", code);
            }
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
