//! Diagnostic logging setup.
//!
//! Logs go to stderr through a non-blocking writer; stdout carries only
//! command output. `RUST_LOG` overrides the verbosity flags.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for a `-v` count when `RUST_LOG` is unset.
#[must_use]
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,otpscope=debug,otpscope_core=debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes buffered log lines when dropped; keep it
/// alive until the process exits.
#[must_use = "dropping the guard stops log output"]
pub fn init(verbosity: u8) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity))),
        )
        .with(fmt::layer().with_writer(writer).with_target(false))
        .init();

    guard
}
