//! `otpscope secret`: a fresh random secret.

use std::io::Write;

use serde::Serialize;

use otpscope_core::{OtpSecret, SecretEncoding};

use super::{write_json, Outcome};
use crate::args::SecretArgs;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SecretReport<'a> {
    secret: &'a str,
    encoding: SecretEncoding,
    length: usize,
}

/// Run `secret`.
///
/// # Errors
/// Returns an error for a zero length or a CSPRNG failure.
pub fn run(args: &SecretArgs, json: bool, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    let secret = OtpSecret::random(args.length)?;
    let encoded = secret.encode(args.encoding);

    if json {
        write_json(
            out,
            &SecretReport {
                secret: &encoded,
                encoding: args.encoding,
                length: secret.len(),
            },
        )?;
    } else {
        writeln!(out, "{encoded}")?;
    }
    Ok(Outcome::Success)
}
