//! `otpscope generate`: the current code with its full derivation.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use otpscope_core::{bytes_to_hex, generate, TimeState, TotpResult};

use super::{resolve_clock, resolve_config, resolve_secret, snapshot_clock, write_json, Outcome};
use crate::args::GenerateArgs;

/// JSON shape of `generate --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReport {
    pub time: TimeState,
    pub result: TotpResult,
}

/// Run `generate`.
///
/// # Errors
/// Returns an error for invalid configuration, secret or clock.
pub fn run(
    args: &GenerateArgs,
    config_path: Option<&Path>,
    json: bool,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let config = resolve_config(config_path, &args.params, None)?;
    let secret = resolve_secret(&args.source)?;
    let clock = resolve_clock(&config, &args.time)?;
    let (pinned, time) = snapshot_clock(&clock)?;

    let result = generate(secret.expose(), config.algorithm, config.digits, &pinned)?;
    tracing::debug!(counter = result.counter, "generated OTP");

    let report = GenerateReport { time, result };
    if json {
        write_json(out, &report)?;
    } else {
        render(out, &report)?;
    }
    Ok(Outcome::Success)
}

/// Human-readable pipeline breakdown.
///
/// # Errors
/// Returns an error if the write fails.
pub fn render(out: &mut dyn Write, report: &GenerateReport) -> std::io::Result<()> {
    let GenerateReport { time, result } = report;
    let truncation = &result.truncation;

    writeln!(
        out,
        "Algorithm      {} / {} digits / {}s step",
        result.algorithm, result.digits, result.step
    )?;
    render_time(out, time)?;
    writeln!(
        out,
        "Counter        {} = floor({} / {})",
        result.counter, result.timestamp, result.step
    )?;
    writeln!(out, "Counter bytes  {}", bytes_to_hex(&result.counter_bytes))?;
    writeln!(out, "HMAC digest    {}", bytes_to_hex(&result.digest))?;
    writeln!(
        out,
        "Offset         {} (low 4 bits of the last digest byte)",
        truncation.offset
    )?;
    writeln!(
        out,
        "Selected bytes {} (digest[{}..{}])",
        bytes_to_hex(&truncation.selected_bytes),
        truncation.offset,
        u16::from(truncation.offset).saturating_add(4)
    )?;
    writeln!(out, "Binary value   {:#010x}", truncation.binary_value)?;
    writeln!(
        out,
        "Masked value   {} (& 0x7fffffff)",
        truncation.masked_value
    )?;
    writeln!(
        out,
        "OTP            {} = {} mod 10^{}",
        result.otp, truncation.masked_value, result.digits
    )?;
    Ok(())
}

/// The `Time` and `Remaining` lines shared with `verify`.
///
/// # Errors
/// Returns an error if the write fails.
pub fn render_time(out: &mut dyn Write, time: &TimeState) -> std::io::Result<()> {
    let mode = if time.is_frozen { "frozen" } else { "live" };
    if time.time_offset == 0 {
        writeln!(out, "Time           {} ({mode})", time.current_time)?;
    } else {
        writeln!(
            out,
            "Time           {} ({mode}, offset {:+}s)",
            time.current_time, time.time_offset
        )?;
    }
    writeln!(
        out,
        "Remaining      {}s of {}s",
        time.time_remaining, time.step
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
