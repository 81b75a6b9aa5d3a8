//! Command-line surface (clap derive).

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use otpscope_core::{OtpAlgorithm, SecretEncoding, DEFAULT_SECRET_LENGTH};

/// Inspect every stage of HOTP/TOTP generation and verification.
#[derive(Parser, Debug)]
#[command(name = "otpscope", version, about, long_about = None)]
pub struct Cli {
    /// JSON configuration file (algorithm, digits, step, window).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` wins.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the current code and show how it was derived.
    Generate(GenerateArgs),
    /// Check a code against the counters around the current one.
    Verify(VerifyArgs),
    /// Print a fresh random secret.
    Secret(SecretArgs),
    /// Re-encode a secret between Base32 and hex.
    Convert(ConvertArgs),
}

/// Where the shared secret comes from. Exactly one is required.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SecretSource {
    /// Base32 secret (case-insensitive, spaces and padding ignored).
    #[arg(long, value_name = "BASE32")]
    pub secret: Option<String>,

    /// Hex secret.
    #[arg(long, value_name = "HEX")]
    pub hex_secret: Option<String>,
}

/// Overrides for the values in `--config`.
#[derive(Args, Debug, Default)]
pub struct OtpParams {
    /// HMAC algorithm: SHA-1, SHA-256 or SHA-512.
    #[arg(short, long)]
    pub algorithm: Option<OtpAlgorithm>,

    /// Code length (1-10).
    #[arg(short, long)]
    pub digits: Option<u32>,

    /// Step size in seconds.
    #[arg(long)]
    pub step: Option<u32>,
}

/// Clock control.
#[derive(Args, Debug, Default)]
pub struct TimeArgs {
    /// Freeze the clock at this Unix time.
    #[arg(long, value_name = "UNIX", allow_negative_numbers = true)]
    pub at: Option<i64>,

    /// Seconds added to the wall clock.
    #[arg(long, value_name = "SECS", allow_negative_numbers = true)]
    pub offset: Option<i64>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SecretSource,

    #[command(flatten)]
    pub params: OtpParams,

    #[command(flatten)]
    pub time: TimeArgs,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Code to check.
    pub otp: String,

    #[command(flatten)]
    pub source: SecretSource,

    #[command(flatten)]
    pub params: OtpParams,

    #[command(flatten)]
    pub time: TimeArgs,

    /// Counters checked either side of the current one.
    #[arg(short, long)]
    pub window: Option<u32>,
}

#[derive(Args, Debug)]
pub struct SecretArgs {
    /// Secret length in bytes.
    #[arg(short, long, default_value_t = DEFAULT_SECRET_LENGTH)]
    pub length: usize,

    /// Output encoding.
    #[arg(short, long, default_value_t = SecretEncoding::Base32)]
    pub encoding: SecretEncoding,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Secret to re-encode.
    pub input: String,

    /// Encoding of `input`.
    #[arg(long, default_value_t = SecretEncoding::Base32)]
    pub from: SecretEncoding,

    /// Encoding to print.
    #[arg(long, default_value_t = SecretEncoding::Hex)]
    pub to: SecretEncoding,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
