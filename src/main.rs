use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tintly::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    tintly::app::run(args)
}

/// Log to stderr. `RUST_LOG` wins over the `-v` count.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tintly={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
