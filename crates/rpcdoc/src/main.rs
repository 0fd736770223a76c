//! rpcdoc CLI - JSON-RPC reference generator.
//!
//! Reads the rustdoc output of the RPC crates and writes one Markdown
//! reference covering every RPC method, error code and data type.

mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::GenerateArgs;
use output::Output;

/// rpcdoc - JSON-RPC reference generator.
#[derive(Parser)]
#[command(name = "rpcdoc", version, about)]
struct Cli {
    #[command(flatten)]
    args: GenerateArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.args.execute(&output) {
        output.error(&format!("Error: {err}"));
        if let Some(hint) = err.hint() {
            output.info(hint);
        }
        std::process::exit(err.exit_code());
    }
}
