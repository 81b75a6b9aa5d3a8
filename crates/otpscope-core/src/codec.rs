//! Secret codecs: RFC 4648 Base32, hex, and CSPRNG byte generation.
//!
//! Base32 decoding is unpacked by hand with a fixed-width `u32` bit
//! accumulator so it stays lenient in the same ways authenticator apps are
//! (whitespace, lowercase, missing padding, trailing partial bits) while
//! rejecting anything outside the alphabet. Encoding and hex go through
//! `data_encoding`.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::OtpError;

// ── Constants ───────────────────────────────────────────────────────

/// Default secret length in bytes (160 bits, RFC 4226 §4 recommendation).
pub const DEFAULT_SECRET_LENGTH: usize = 20;

/// Largest secret [`generate_secret`] will produce, in bytes.
pub const MAX_SECRET_LENGTH: usize = 1024;

// ── Base32 ──────────────────────────────────────────────────────────

/// Map one uppercase Base32 character to its 5-bit value.
///
/// Both arms are bounded by their match ranges, so the casts and
/// subtractions cannot overflow.
#[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
const fn base32_value(c: char) -> Option<u8> {
    match c {
        'A'..='Z' => Some(c as u8 - b'A'),
        '2'..='7' => Some(c as u8 - b'2' + 26),
        _ => None,
    }
}

/// Decode a Base32 string into bytes.
///
/// Whitespace is removed, input is uppercased, and trailing `=` padding is
/// stripped before decoding. Leftover bits that do not fill a whole byte
/// are discarded.
///
/// # Errors
/// Returns [`OtpError::InvalidBase32Character`] for any character outside
/// `A-Z2-7`, including `=` that is not trailing padding.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
pub fn base32_decode(input: &str) -> Result<Vec<u8>, OtpError> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let cleaned = cleaned.trim_end_matches('=');

    let mut output = Vec::with_capacity(cleaned.len() * 5 / 8);
    // At most 12 bits are ever buffered (7 leftover + 5 new), so the
    // shifts below stay well inside `u32`.
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for (position, character) in cleaned.chars().enumerate() {
        let value = base32_value(character)
            .ok_or(OtpError::InvalidBase32Character { character, position })?;
        buffer = (buffer << 5) | u32::from(value);
        bits += 5;

        if bits >= 8 {
            bits -= 8;
            output.push(((buffer >> bits) & 0xFF) as u8);
            buffer &= (1 << bits) - 1;
        }
    }

    Ok(output)
}

/// Encode bytes as padded RFC 4648 Base32.
///
/// The output length is always a multiple of 8.
#[must_use]
pub fn base32_encode(bytes: &[u8]) -> String {
    data_encoding::BASE32.encode(bytes)
}

// ── Hex ─────────────────────────────────────────────────────────────

/// Encode bytes as lowercase hex, two digits per byte.
#[must_use]
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    data_encoding::HEXLOWER.encode(bytes)
}

/// Decode a hex string (either case) into bytes.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
/// Returns [`OtpError::InvalidHexInput`] on odd length or a non-hex
/// character.
pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>, OtpError> {
    data_encoding::HEXLOWER_PERMISSIVE
        .decode(input.trim().as_bytes())
        .map_err(|e| OtpError::InvalidHexInput(e.to_string()))
}

// ── Random ──────────────────────────────────────────────────────────

/// Fill `length` bytes from the OS CSPRNG.
///
/// # Errors
/// Returns [`OtpError::InvalidSecretLength`] when `length` is zero or
/// above [`MAX_SECRET_LENGTH`], and [`OtpError::Random`] if the OS RNG
/// fails.
pub fn generate_secret(length: usize) -> Result<Vec<u8>, OtpError> {
    if length == 0 || length > MAX_SECRET_LENGTH {
        return Err(OtpError::InvalidSecretLength(length));
    }
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| OtpError::Random(format!("CSPRNG fill failed: {e}")))?;
    Ok(bytes)
}

// ── Tests ───────────────────────────────────────────────────────────
