use std::process::ExitCode;

use clap::Parser;

use otpscope::{logging, run, Cli, EXIT_ERROR};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.verbose);

    let stdout = std::io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
