//! RFC 6238 TOTP and RFC 4226 HOTP generation and verification engine.
//!
//! The pipeline is `counter -> HMAC -> dynamic truncation -> decimal`.
//! [`generate`] returns every intermediate value as a [`TotpResult`] so a
//! host can show how a code was derived; [`generate_hotp`] and
//! [`generate_totp`] return only the code.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::clock::{counter_at, counter_bytes_for, TimeManager};
use crate::codec::bytes_to_hex;
use crate::error::OtpError;
use crate::hmac::{hmac, OtpAlgorithm};

/// Constant-time byte comparison for OTP codes.
///
/// Returns `true` iff both slices have equal length and identical contents.
/// The early return on length mismatch only reveals the digit count,
/// which is public configuration.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Serialize any byte container as lowercase hex.
fn serialize_hex<S, T>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<[u8]>,
{
    serializer.serialize_str(&bytes_to_hex(bytes.as_ref()))
}

// ── Constants ───────────────────────────────────────────────────────

/// Smallest accepted digit count.
pub const MIN_DIGITS: u32 = 1;

/// Largest accepted digit count. `10^10` still fits `u64`, and the
/// truncated value is below `2^31`, so more digits add only zeros.
pub const MAX_DIGITS: u32 = 10;

/// Default drift tolerance: one step either side (RFC 6238 §5.2).
pub const DEFAULT_WINDOW: u32 = 1;

/// Upper bound on the verification window.
pub const MAX_VERIFY_WINDOW: u32 = 1_000;

/// Shortest digest dynamic truncation accepts (SHA-1 output).
const MIN_DIGEST_LEN: usize = 20;

/// Mask clearing the sign bit of the truncated value.
const SIGN_MASK: u32 = 0x7FFF_FFFF;

// ── Types ───────────────────────────────────────────────────────────

/// Number of decimal digits in an OTP code, validated to `1..=10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct OtpDigits(u8);

impl OtpDigits {
    /// 6-digit code (standard).
    pub const SIX: Self = Self(6);
    /// 8-digit code.
    pub const EIGHT: Self = Self(8);

    /// Validate a digit count.
    ///
    /// # Errors
    /// Returns [`OtpError::InvalidDigitCount`] outside `1..=10`.
    pub fn new(digits: u32) -> Result<Self, OtpError> {
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
            return Err(OtpError::InvalidDigitCount(digits));
        }
        u8::try_from(digits)
            .map(Self)
            .map_err(|_| OtpError::InvalidDigitCount(digits))
    }

    /// Return the numeric digit count.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Return the modulus value (10^digits) for truncation.
    #[must_use]
    pub fn modulus(self) -> u64 {
        10u64.pow(u32::from(self.0))
    }
}

impl Default for OtpDigits {
    fn default() -> Self {
        Self::SIX
    }
}

impl TryFrom<u32> for OtpDigits {
    type Error = OtpError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OtpDigits> for u32 {
    fn from(digits: OtpDigits) -> Self {
        Self::from(digits.0)
    }
}

impl fmt::Display for OtpDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Intermediate values of RFC 4226 §5.3 dynamic truncation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruncationResult {
    /// Low nibble of the last digest byte, in `0..=15`.
    pub offset: u8,
    /// The four digest bytes starting at `offset`.
    #[serde(serialize_with = "serialize_hex")]
    pub selected_bytes: [u8; 4],
    /// `selected_bytes` read as a big-endian `u32`.
    pub binary_value: u32,
    /// `binary_value & 0x7FFFFFFF`.
    pub masked_value: u32,
}

/// Every stage of one OTP computation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotpResult {
    /// Final zero-padded decimal code.
    pub otp: String,
    /// HOTP moving factor.
    pub counter: u64,
    /// `counter` as the 8-byte big-endian HMAC message.
    #[serde(serialize_with = "serialize_hex")]
    pub counter_bytes: [u8; 8],
    /// Raw HMAC output (20, 32 or 64 bytes).
    #[serde(serialize_with = "serialize_hex")]
    pub digest: Vec<u8>,
    /// Dynamic truncation breakdown.
    pub truncation: TruncationResult,
    /// HMAC algorithm used.
    pub algorithm: OtpAlgorithm,
    /// Digit count of `otp`.
    pub digits: OtpDigits,
    /// Step size the counter was derived with.
    pub step: u32,
    /// Seconds since the epoch the counter was derived from.
    pub timestamp: i64,
}

/// Explicit per-call TOTP configuration.
#[derive(Clone, Copy)]
pub struct TotpConfig<'a> {
    /// Shared secret key bytes.
    pub secret: &'a [u8],
    /// HMAC algorithm.
    pub algorithm: OtpAlgorithm,
    /// Output digit count.
    pub digits: OtpDigits,
    /// Time source; never mutated by this module.
    pub clock: &'a TimeManager,
}

impl TotpConfig<'_> {
    /// Generate the code for the clock's current counter.
    ///
    /// # Errors
    /// See [`generate`].
    pub fn generate(&self) -> Result<TotpResult, OtpError> {
        generate(self.secret, self.algorithm, self.digits, self.clock)
    }
}

impl fmt::Debug for TotpConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TotpConfig")
            .field("secret", &"***")
            .field("algorithm", &self.algorithm)
            .field("digits", &self.digits)
            .field("clock", &self.clock)
            .finish()
    }
}

/// One counter visited during verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAttempt {
    /// Counter checked.
    pub counter: u64,
    /// Code generated for that counter.
    pub otp: String,
    /// Whether it equals the candidate.
    pub matched: bool,
    /// Whether this is the clock's current counter.
    pub current: bool,
}

/// Outcome of [`verify`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResult {
    /// `true` if some counter in the window produced the candidate.
    pub valid: bool,
    /// The counter that matched.
    pub matched_counter: Option<u64>,
    /// Counters tried, ascending, up to and including the match.
    pub checked_counters: Vec<u64>,
    /// Per-counter detail, parallel to `checked_counters`.
    pub attempts: Vec<VerifyAttempt>,
}

// ── Truncation ──────────────────────────────────────────────────────

/// RFC 4226 §5.3 dynamic truncation.
///
/// Pure over the digest bytes; the algorithm that produced them does not
/// matter.
///
/// # Errors
/// Returns [`OtpError::InvalidDigest`] for digests shorter than 20 bytes.
pub fn dynamic_truncation(digest: &[u8]) -> Result<TruncationResult, OtpError> {
    let too_short = || OtpError::InvalidDigest(digest.len());
    if digest.len() < MIN_DIGEST_LEN {
        return Err(too_short());
    }

    // offset = low-order 4 bits of last byte.
    let offset = digest.last().ok_or_else(too_short)? & 0x0F;
    let start = usize::from(offset);

    // offset <= 15 and len >= 20, so offset + 4 is always in bounds.
    let selected_bytes: [u8; 4] = digest
        .get(start..start.wrapping_add(4))
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(too_short)?;

    let binary_value = u32::from_be_bytes(selected_bytes);
    Ok(TruncationResult {
        offset,
        selected_bytes,
        binary_value,
        masked_value: binary_value & SIGN_MASK,
    })
}

/// `masked_value mod 10^digits`, left-padded with zeros to `digits`.
#[must_use]
pub fn format_otp(masked_value: u32, digits: OtpDigits) -> String {
    // modulus is at least 10 (never zero).
    #[allow(clippy::arithmetic_side_effects)]
    let code = u64::from(masked_value) % digits.modulus();
    let width = usize::from(digits.value());
    format!("{code:0>width$}")
}

// ── Generation ──────────────────────────────────────────────────────

fn run_pipeline(
    secret: &[u8],
    algorithm: OtpAlgorithm,
    digits: OtpDigits,
    counter: u64,
    step: u32,
    timestamp: i64,
) -> Result<TotpResult, OtpError> {
    if secret.is_empty() {
        return Err(OtpError::InvalidSecretLength(0));
    }

    // HMAC(K, C) where C is counter as 8-byte big-endian (RFC 4226 §5.2).
    let counter_bytes = counter_bytes_for(counter);
    let digest = hmac(secret, &counter_bytes, algorithm);
    let truncation = dynamic_truncation(&digest)?;
    let otp = format_otp(truncation.masked_value, digits);

    Ok(TotpResult {
        otp,
        counter,
        counter_bytes,
        digest,
        truncation,
        algorithm,
        digits,
        step,
        timestamp,
    })
}

/// Generate the TOTP for the clock's current counter, with every
/// intermediate value.
///
/// The clock is sampled once, so `timestamp`, `counter` and the code
/// always agree.
///
/// # Errors
/// Returns [`OtpError::InvalidSecretLength`] for an empty secret and
/// [`OtpError::NegativeTime`] when the clock is before the epoch.
pub fn generate(
    secret: &[u8],
    algorithm: OtpAlgorithm,
    digits: OtpDigits,
    clock: &TimeManager,
) -> Result<TotpResult, OtpError> {
    let timestamp = clock.current_time();
    let counter = counter_at(timestamp, clock.step())?;
    run_pipeline(secret, algorithm, digits, counter, clock.step(), timestamp)
}

/// Generate the TOTP for an explicit counter, as [`generate`] would at
/// the start of that counter's step.
///
/// # Errors
/// Returns [`OtpError::InvalidStep`] for a zero step and
/// [`OtpError::InvalidSecretLength`] for an empty secret.
pub fn generate_at_counter(
    secret: &[u8],
    algorithm: OtpAlgorithm,
    digits: OtpDigits,
    counter: u64,
    step: u32,
) -> Result<TotpResult, OtpError> {
    if step == 0 {
        return Err(OtpError::InvalidStep);
    }
    let timestamp = i64::try_from(counter.saturating_mul(u64::from(step))).unwrap_or(i64::MAX);
    run_pipeline(secret, algorithm, digits, counter, step, timestamp)
}

// ── HOTP (RFC 4226) ────────────────────────────────────────────────

/// Generate an HOTP code per RFC 4226.
///
/// # Errors
/// Returns [`OtpError::InvalidSecretLength`] if the secret is empty.
#[must_use = "OTP code should be used or stored"]
pub fn generate_hotp(
    secret: &[u8],
    counter: u64,
    digits: OtpDigits,
    algorithm: OtpAlgorithm,
) -> Result<String, OtpError> {
    run_pipeline(secret, algorithm, digits, counter, 0, 0).map(|result| result.otp)
}

// ── TOTP (RFC 6238) ────────────────────────────────────────────────

/// Generate a TOTP code for a Unix time per RFC 6238.
///
/// # Errors
/// Returns [`OtpError::InvalidStep`] if `step` is 0,
/// [`OtpError::NegativeTime`] for pre-epoch times and
/// [`OtpError::InvalidSecretLength`] if the secret is empty.
#[must_use = "OTP code should be used or stored"]
pub fn generate_totp(
    secret: &[u8],
    time: i64,
    digits: OtpDigits,
    step: u32,
    algorithm: OtpAlgorithm,
) -> Result<String, OtpError> {
    // T = floor(time / step) per RFC 6238 §4.
    let counter = counter_at(time, step)?;
    run_pipeline(secret, algorithm, digits, counter, step, time).map(|result| result.otp)
}

// ── Verification ────────────────────────────────────────────────────

/// Check `candidate` against the counters `c0 - window ..= c0 + window`.
///
/// Counters are visited in ascending order and the first match returns
/// immediately. Each neighbour is computed from its counter value alone,
/// so `config.clock` is never touched. Counters that would fall below
/// zero or above `u64::MAX` are skipped.
///
/// # Errors
/// Returns [`OtpError::InvalidWindow`] above [`MAX_VERIFY_WINDOW`],
/// [`OtpError::NegativeTime`] when the clock is before the epoch and
/// [`OtpError::InvalidSecretLength`] for an empty secret.
#[must_use = "validation result should be checked"]
pub fn verify(
    config: &TotpConfig<'_>,
    candidate: &str,
    window: u32,
) -> Result<VerifyResult, OtpError> {
    if window > MAX_VERIFY_WINDOW {
        return Err(OtpError::InvalidWindow(window));
    }

    let step = config.clock.step();
    let current = config.clock.counter()?;
    let span = i64::from(window);

    let mut result = VerifyResult::default();
    for delta in span.wrapping_neg()..=span {
        let Some(counter) = current.checked_add_signed(delta) else {
            continue;
        };

        let expected =
            generate_at_counter(config.secret, config.algorithm, config.digits, counter, step)?;
        let matched = constant_time_eq(expected.otp.as_bytes(), candidate.as_bytes());

        result.checked_counters.push(counter);
        result.attempts.push(VerifyAttempt {
            counter,
            otp: expected.otp,
            matched,
            current: delta == 0,
        });

        if matched {
            tracing::debug!(counter, delta, "OTP matched");
            result.valid = true;
            result.matched_counter = Some(counter);
            return Ok(result);
        }
    }

    tracing::debug!(
        current,
        checked = result.checked_counters.len(),
        "OTP did not match any counter in window"
    );
    Ok(result)
}

// ── Tests ───────────────────────────────────────────────────────────
