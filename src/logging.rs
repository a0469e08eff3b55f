//! File logging setup.
//!
//! The TUI owns the terminal, so there is no console layer: everything goes
//! to `~/.config/paneldock/logs/paneldock.log` with daily rotation. Filter
//! with the usual RUST_LOG syntax, e.g. `RUST_LOG=paneldock=debug`.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber. Call before the terminal is put into
/// raw mode; a failure is reported on stderr and the process runs unlogged.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "paneldock.log");
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(file_appender)
                        .with_ansi(false)
                        .with_target(true)
                        .with_filter(filter),
                )
                .init();
        }
        Err(err) => {
            eprintln!("Warning: could not initialize file logging: {err}");
        }
    }
}
