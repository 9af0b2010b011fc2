// enigma: encrypt or decrypt a message stream.
//
// Reads a machine configuration, then processes the input line by line.
// Lines beginning with `*` set up the machine; every other line is a
// message, written out converted in groups of five.
//
// Usage:
//   enigma <CONFIG> [INPUT] [OUTPUT] [OPTIONS]
//
// Logging goes to stderr; RUST_LOG is honoured when neither -v nor -d is
// given. Per-symbol rotor steps log at trace level (RUST_LOG=trace).

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Rotor cipher machine emulator.
#[derive(Parser, Debug)]
#[command(name = "enigma")]
#[command(version, about, long_about = None)]
struct Args {
    /// Machine configuration file
    config: PathBuf,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    output: Option<PathBuf>,

    /// Enable verbose logging (info level)
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Symbols per output group (0 disables grouping)
    #[arg(long, value_name = "N", default_value_t = enigma_cli::DEFAULT_GROUP)]
    group: usize,
}

fn init_logging(args: &Args) {
    let filter = match enigma_cli::log_directive(args.debug, args.verbose) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(io::stderr)
                .with_filter(filter),
        )
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = enigma_cli::load_config(&args.config)?;

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    enigma_cli::process(&config, input, output, args.group)
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
