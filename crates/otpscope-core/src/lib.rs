//! `otpscope-core`: the HOTP/TOTP pipeline for OTPSCOPE.
//!
//! Counter derivation, HMAC, dynamic truncation, decimal formatting and
//! window verification, plus the Base32/hex secret codecs they need.
//! Zero network, zero async, zero file access.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod codec;
pub mod secret;

pub mod hmac;

pub mod clock;

pub mod totp;

pub mod config;

pub use clock::{counter_at, counter_bytes_for, TimeManager, TimeState, DEFAULT_STEP};
pub use codec::{
    base32_decode, base32_encode, bytes_to_hex, generate_secret, hex_to_bytes,
    DEFAULT_SECRET_LENGTH, MAX_SECRET_LENGTH,
};
pub use config::OtpConfig;
pub use error::OtpError;
pub use hmac::{hmac, OtpAlgorithm};
pub use secret::{OtpSecret, SecretEncoding, RECOMMENDED_MIN_SECRET_LENGTH};
pub use totp::{
    dynamic_truncation, format_otp, generate, generate_at_counter, generate_hotp, generate_totp,
    verify, OtpDigits, TotpConfig, TotpResult, TruncationResult, VerifyAttempt, VerifyResult,
    DEFAULT_WINDOW, MAX_DIGITS, MAX_VERIFY_WINDOW, MIN_DIGITS,
};
