//! Logging and tracing configuration
//!
//! Logs go to stderr so scenario output and `--json` reports on stdout stay
//! clean. A persistent log file can be added with `--log-file`.

use std::path::PathBuf;

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use super::paths;

/// Initialize tracing for the CLI
///
/// Logs are controlled by the `RUST_LOG` environment variable.
/// Default level is INFO for this crate (DEBUG with `verbose`), WARN for dependencies.
///
/// When `log_file` is set, a second non-ANSI layer appends to
/// `<data_dir>/logs/toedi-e2e.log`. The returned guard must be held until
/// exit so buffered lines are flushed.
pub fn init_cli(verbose: bool, log_file: bool) -> Option<(WorkerGuard, PathBuf)> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("toedi_e2e=debug,warn")
        } else {
            EnvFilter::new("toedi_e2e=info,warn")
        }
    });

    let log_dir = if log_file {
        match paths::ensure_log_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Warning: Could not create log directory: {}", e);
                None
            }
        }
    } else {
        None
    };

    if let Some(dir) = log_dir {
        let appender = tracing_appender::rolling::never(&dir, "toedi-e2e.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let file_layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(stderr_layer())
            .init();

        return Some((guard, dir.join("toedi-e2e.log")));
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer())
        .init();

    None
}

/// Compact human-readable layer on stderr
fn stderr_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
}
