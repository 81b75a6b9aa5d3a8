//! `otpscope verify`: check a code across the verification window.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use otpscope_core::{
    generate_at_counter, verify, TimeState, TotpConfig, VerifyAttempt, VerifyResult,
};

use super::generate::render_time;
use super::{resolve_clock, resolve_config, resolve_secret, snapshot_clock, write_json, Outcome};
use crate::args::VerifyArgs;

/// JSON shape of `verify --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyReport {
    pub time: TimeState,
    pub window: u32,
    /// Set when the candidate was rejected without checking any counter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_reason: Option<String>,
    #[serde(flatten)]
    pub result: VerifyResult,
    /// Every counter in the window with its code, for display. Unlike
    /// `result.attempts`, this does not stop at the first match.
    pub window_codes: Vec<VerifyAttempt>,
}

impl VerifyReport {
    /// Signed distance in steps between the matching counter and the
    /// current one.
    #[must_use]
    pub fn drift(&self) -> Option<i128> {
        self.result
            .matched_counter
            .map(|matched| i128::from(matched).saturating_sub(i128::from(self.time.counter)))
    }
}

/// Run `verify`.
///
/// # Errors
/// Returns an error for invalid configuration, secret or clock. A code
/// that simply does not match is [`Outcome::Rejected`], not an error.
pub fn run(
    args: &VerifyArgs,
    config_path: Option<&Path>,
    json: bool,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let config = resolve_config(config_path, &args.params, args.window)?;
    let secret = resolve_secret(&args.source)?;
    let clock = resolve_clock(&config, &args.time)?;
    let (pinned, time) = snapshot_clock(&clock)?;

    let candidate = args.otp.trim();
    let expected_len = usize::from(config.digits.value());
    let candidate_len = candidate.chars().count();

    let report = if candidate_len == expected_len {
        let bound = config.bind(secret.expose(), &pinned);
        let result = verify(&bound, candidate, config.window)?;
        let window_codes =
            window_codes(&bound, time.counter, config.window, result.matched_counter)?;
        VerifyReport {
            time,
            window: config.window,
            rejected_reason: None,
            result,
            window_codes,
        }
    } else {
        tracing::debug!(expected_len, candidate_len, "candidate length mismatch");
        VerifyReport {
            time,
            window: config.window,
            rejected_reason: Some(format!(
                "expected {expected_len} digits, got {candidate_len}"
            )),
            result: VerifyResult::default(),
            window_codes: Vec::new(),
        }
    };

    if json {
        write_json(out, &report)?;
    } else {
        render(out, &report)?;
    }

    Ok(if report.result.valid {
        Outcome::Success
    } else {
        Outcome::Rejected
    })
}

/// Codes for every counter in `current - window ..= current + window`,
/// flagging `matched` and the current counter. Counters outside `u64` are
/// skipped, as in [`verify`].
///
/// # Errors
/// Returns an error for an empty secret or zero step.
pub fn window_codes(
    config: &TotpConfig<'_>,
    current: u64,
    window: u32,
    matched: Option<u64>,
) -> anyhow::Result<Vec<VerifyAttempt>> {
    let step = config.clock.step();
    let span = i64::from(window);
    let mut rows = Vec::new();
    for delta in span.wrapping_neg()..=span {
        let Some(counter) = current.checked_add_signed(delta) else {
            continue;
        };
        let code =
            generate_at_counter(config.secret, config.algorithm, config.digits, counter, step)?;
        rows.push(VerifyAttempt {
            counter,
            otp: code.otp,
            matched: matched == Some(counter),
            current: delta == 0,
        });
    }
    Ok(rows)
}

/// Human-readable window table and verdict.
///
/// # Errors
/// Returns an error if the write fails.
pub fn render(out: &mut dyn Write, report: &VerifyReport) -> std::io::Result<()> {
    render_time(out, &report.time)?;
    writeln!(
        out,
        "Window         +/-{} around counter {}",
        report.window, report.time.counter
    )?;

    for attempt in &report.window_codes {
        let marker = if attempt.current { '>' } else { ' ' };
        let suffix = if attempt.matched { "  <- match" } else { "" };
        writeln!(out, "{marker} {:>20}  {}{suffix}", attempt.counter, attempt.otp)?;
    }

    match (&report.rejected_reason, report.result.matched_counter) {
        (Some(reason), _) => writeln!(out, "INVALID: {reason}"),
        (None, Some(counter)) => writeln!(
            out,
            "VALID at counter {counter} (drift {:+} steps)",
            report.drift().unwrap_or_default()
        ),
        (None, None) => writeln!(
            out,
            "INVALID: no match in {} counters",
            report.result.checked_counters.len()
        ),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
