//! Toedi E2E - browser checks for the Toedi web application
//!
//! Drives a WebDriver browser against a running Toedi server and reports
//! pass/fail through the process exit code.

use clap::Parser;
use toedi_e2e::{cli, commands, common::logging};
use commands::Commands;

#[derive(Parser)]
#[command(name = "toedi-e2e", about = "End-to-end browser checks for Toedi")]
#[command(version, long_about = None)]
struct Cli {
    /// Debug-level logging for this crate
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Also write logs to the data directory
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; the guard flushes the file writer on exit
    let log_guard = logging::init_cli(cli.verbose, cli.log_file);
    if let Some((_, path)) = &log_guard {
        tracing::debug!(path = %path.display(), "Writing log file");
    }

    let code = match cli::dispatch(cli.command, cli.verbose).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    };

    drop(log_guard);
    std::process::exit(code);
}
