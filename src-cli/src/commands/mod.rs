//! Subcommand handlers.
//!
//! Each handler resolves its inputs into core types, runs the core
//! operation, and writes either a human-readable report or JSON to `out`.
//! Nothing here touches stdout directly, so tests can capture output.

pub mod convert;
pub mod generate;
pub mod secret;
pub mod verify;

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use serde::Serialize;

use otpscope_core::{OtpConfig, OtpDigits, OtpSecret, TimeManager, TimeState};

use crate::args::{OtpParams, SecretSource, TimeArgs};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Exit status when a submitted code is rejected.
pub const EXIT_REJECTED: u8 = 1;

/// Exit status for errors (bad input, unreadable config, ...).
pub const EXIT_ERROR: u8 = 2;

/// How a successfully executed command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Command completed; for `verify`, the code was accepted.
    Success,
    /// `verify` ran but the code was not accepted.
    Rejected,
}

impl Outcome {
    /// Process exit status for this outcome.
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::Rejected => ExitCode::from(EXIT_REJECTED),
        }
    }
}

// ---------------------------------------------------------------------------
// Input resolution
// ---------------------------------------------------------------------------

/// Load `--config` (or defaults) and apply command-line overrides.
///
/// # Errors
/// Returns an error if the file cannot be loaded or the merged values are
/// invalid.
pub fn resolve_config(
    path: Option<&Path>,
    params: &OtpParams,
    window: Option<u32>,
) -> anyhow::Result<OtpConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => OtpConfig::default(),
    };

    if let Some(algorithm) = params.algorithm {
        config.algorithm = algorithm;
    }
    if let Some(digits) = params.digits {
        config.digits = OtpDigits::new(digits)?;
    }
    if let Some(step) = params.step {
        config.step = step;
    }
    if let Some(window) = window {
        config.window = window;
    }

    config.validate()?;
    tracing::debug!(?config, "resolved OTP configuration");
    Ok(config)
}

/// Read and validate a JSON configuration file.
///
/// A missing or corrupt file is an error; falling back to defaults would
/// silently change which codes are accepted.
///
/// # Errors
/// Returns an error if the file cannot be read or its contents are invalid.
pub fn load_config(path: &Path) -> anyhow::Result<OtpConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration {}", path.display()))?;
    let config = OtpConfig::from_json_str(&contents)
        .with_context(|| format!("failed to load configuration {}", path.display()))?;
    Ok(config)
}

/// Decode whichever of `--secret` / `--hex-secret` was given.
///
/// # Errors
/// Returns an error for malformed or empty input.
pub fn resolve_secret(source: &SecretSource) -> anyhow::Result<OtpSecret> {
    let secret = match (&source.secret, &source.hex_secret) {
        (Some(base32), _) => OtpSecret::from_base32(base32).context("invalid Base32 secret")?,
        (None, Some(hex)) => OtpSecret::from_hex(hex).context("invalid hex secret")?,
        (None, None) => anyhow::bail!("a secret is required (--secret or --hex-secret)"),
    };
    Ok(secret)
}

/// Build the clock for one invocation: configured step, then offset, then
/// an optional freeze.
///
/// # Errors
/// Returns an error for a zero step.
pub fn resolve_clock(config: &OtpConfig, time: &TimeArgs) -> anyhow::Result<TimeManager> {
    let mut clock = config.clock()?;
    if let Some(offset) = time.offset {
        clock.set_time_offset(offset);
    }
    if let Some(at) = time.at {
        clock.freeze_at(at);
    }
    Ok(clock)
}

/// Pin a live clock to a single sample so the reported time state and the
/// computed codes cannot straddle a step boundary.
///
/// The returned [`TimeState`] still reports whether the caller's clock was
/// frozen.
///
/// # Errors
/// Returns an error when the clock is before the epoch.
pub fn snapshot_clock(clock: &TimeManager) -> anyhow::Result<(TimeManager, TimeState)> {
    let mut pinned = clock.clone();
    pinned.freeze();
    let state = TimeState {
        is_frozen: clock.is_frozen(),
        ..pinned.state()?
    };
    Ok((pinned, state))
}

/// Write `value` as pretty JSON followed by a newline.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
