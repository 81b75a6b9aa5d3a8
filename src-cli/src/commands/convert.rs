//! `otpscope convert`: show a secret in another encoding.

use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use otpscope_core::{OtpSecret, SecretEncoding};

use super::{write_json, Outcome};
use crate::args::ConvertArgs;

/// JSON shape of `convert --json`.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConvertReport {
    pub from: SecretEncoding,
    pub to: SecretEncoding,
    pub length: usize,
    pub output: String,
}

/// Run `convert`.
///
/// # Errors
/// Returns an error if `input` is not valid in the `--from` encoding.
pub fn run(args: &ConvertArgs, json: bool, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    let report = convert(args)?;
    if json {
        write_json(out, &report)?;
    } else {
        writeln!(out, "{}", report.output)?;
    }
    Ok(Outcome::Success)
}

fn convert(args: &ConvertArgs) -> anyhow::Result<ConvertReport> {
    let secret = OtpSecret::parse(&args.input, args.from)
        .with_context(|| format!("input is not valid {}", args.from))?;
    Ok(ConvertReport {
        from: args.from,
        to: args.to,
        length: secret.len(),
        output: secret.encode(args.to),
    })
}
