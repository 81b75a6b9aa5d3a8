//! Error types for `otpscope-core`.

use thiserror::Error;

/// Errors produced by the OTP pipeline and its codecs.
///
/// Every variant is a permanent input error: retrying the same call with
/// the same arguments fails the same way.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OtpError {
    /// A character outside the RFC 4648 Base32 alphabet (`A-Z2-7`).
    #[error("invalid Base32 character {character:?} at position {position}")]
    InvalidBase32Character {
        /// The offending character, after whitespace removal and uppercasing.
        character: char,
        /// Zero-based index into the cleaned input.
        position: usize,
    },

    /// Odd-length input or a non-hex character.
    #[error("invalid hex input: {0}")]
    InvalidHexInput(String),

    /// Hash algorithm name not in {SHA-1, SHA-256, SHA-512}.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Digit count outside the supported range.
    #[error("invalid digit count {0}: expected {min}..={max}", min = crate::totp::MIN_DIGITS, max = crate::totp::MAX_DIGITS)]
    InvalidDigitCount(u32),

    /// Secret too short to be used as an HMAC key (zero length).
    #[error("invalid secret length: {0} bytes")]
    InvalidSecretLength(usize),

    /// Time step of zero seconds.
    #[error("time step must be > 0")]
    InvalidStep,

    /// Verification window above the supported maximum.
    #[error("verification window {0} exceeds maximum {max}", max = crate::totp::MAX_VERIFY_WINDOW)]
    InvalidWindow(u32),

    /// Current time is before the Unix epoch, so no counter exists.
    #[error("time {0} is before the Unix epoch; counter would be negative")]
    NegativeTime(i64),

    /// HMAC digest too short for RFC 4226 dynamic truncation.
    #[error("digest of {0} bytes is too short for dynamic truncation")]
    InvalidDigest(usize),

    /// The OS random number generator failed.
    #[error("CSPRNG failure: {0}")]
    Random(String),

    /// A configuration value or document could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}
