//! OTPSCOPE command-line front end.
//!
//! Parses arguments, resolves configuration, and hands off to
//! `otpscope-core`. Results go to the supplied writer; diagnostics go to
//! the tracing subscriber installed by [`logging::init`].

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod args;
pub mod commands;
pub mod logging;

use std::io::Write;

pub use args::Cli;
pub use commands::{Outcome, EXIT_ERROR, EXIT_REJECTED};

use args::Command;

/// Execute the parsed command, writing results to `out`.
///
/// # Errors
/// Returns any configuration, input or I/O error from the command.
pub fn run(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Command::Generate(args) => commands::generate::run(args, config_path, cli.json, out),
        Command::Verify(args) => commands::verify::run(args, config_path, cli.json, out),
        Command::Secret(args) => commands::secret::run(args, cli.json, out),
        Command::Convert(args) => commands::convert::run(args, cli.json, out),
    }
}
