//! Shared-secret wrapper and its textual encodings.
//!
//! [`OtpSecret`] holds the HMAC key for the lifetime of a computation:
//! - Zeroed on drop (via `secrecy`'s built-in `Zeroize`)
//! - Masked `Debug` output (`OtpSecret(***)`)
//! - Never empty

use std::fmt;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretSlice};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::codec::{base32_decode, base32_encode, bytes_to_hex, generate_secret, hex_to_bytes};
use crate::error::OtpError;

/// Secrets shorter than this (128 bits) trigger a warning (RFC 4226 §4).
pub const RECOMMENDED_MIN_SECRET_LENGTH: usize = 16;

// ── Encoding ────────────────────────────────────────────────────────

/// Textual representation of a secret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretEncoding {
    /// RFC 4648 Base32 (what authenticator apps display).
    #[default]
    Base32,
    /// Lowercase hex.
    Hex,
}

impl SecretEncoding {
    /// Decode `input` in this representation.
    ///
    /// # Errors
    /// Returns the codec error for malformed input.
    pub fn decode(self, input: &str) -> Result<Vec<u8>, OtpError> {
        match self {
            Self::Base32 => base32_decode(input),
            Self::Hex => hex_to_bytes(input),
        }
    }

    /// Encode `bytes` in this representation.
    #[must_use]
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            Self::Base32 => base32_encode(bytes),
            Self::Hex => bytes_to_hex(bytes),
        }
    }
}

impl FromStr for SecretEncoding {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base32" | "b32" => Ok(Self::Base32),
            "hex" => Ok(Self::Hex),
            other => Err(OtpError::Config(format!("unknown secret encoding: {other}"))),
        }
    }
}

impl fmt::Display for SecretEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Base32 => "base32",
            Self::Hex => "hex",
        })
    }
}

// ── OtpSecret ───────────────────────────────────────────────────────

/// HMAC key shared between prover and verifier.
pub struct OtpSecret {
    inner: SecretSlice<u8>,
}

impl OtpSecret {
    /// Wrap raw key bytes. The caller should zeroize its own copy.
    ///
    /// # Errors
    /// Returns [`OtpError::InvalidSecretLength`] for an empty key.
    pub fn new(bytes: &[u8]) -> Result<Self, OtpError> {
        if bytes.is_empty() {
            return Err(OtpError::InvalidSecretLength(0));
        }
        if bytes.len() < RECOMMENDED_MIN_SECRET_LENGTH {
            tracing::warn!(
                len = bytes.len(),
                min = RECOMMENDED_MIN_SECRET_LENGTH,
                "secret is shorter than the recommended 128 bits"
            );
        }
        Ok(Self {
            inner: bytes.to_vec().into(),
        })
    }

    /// Generate a fresh random secret of `len` bytes.
    ///
    /// # Errors
    /// Returns [`OtpError::InvalidSecretLength`] for zero or a length above
    /// [`crate::codec::MAX_SECRET_LENGTH`], and [`OtpError::Random`] if the
    /// CSPRNG fails.
    pub fn random(len: usize) -> Result<Self, OtpError> {
        let mut bytes = generate_secret(len)?;
        let result = Self::new(&bytes);
        bytes.zeroize();
        result
    }

    /// Decode a Base32 secret.
    ///
    /// # Errors
    /// Returns [`OtpError::InvalidBase32Character`] or
    /// [`OtpError::InvalidSecretLength`] when nothing decodes.
    pub fn from_base32(input: &str) -> Result<Self, OtpError> {
        Self::parse(input, SecretEncoding::Base32)
    }

    /// Decode a hex secret.
    ///
    /// # Errors
    /// Returns [`OtpError::InvalidHexInput`] or
    /// [`OtpError::InvalidSecretLength`] when nothing decodes.
    pub fn from_hex(input: &str) -> Result<Self, OtpError> {
        Self::parse(input, SecretEncoding::Hex)
    }

    /// Decode a secret in the given representation.
    ///
    /// # Errors
    /// Returns the codec error, or [`OtpError::InvalidSecretLength`] when
    /// the input decodes to zero bytes.
    pub fn parse(input: &str, encoding: SecretEncoding) -> Result<Self, OtpError> {
        let mut bytes = encoding.decode(input)?;
        let result = Self::new(&bytes);
        bytes.zeroize();
        result
    }

    /// Expose the key bytes for an HMAC computation.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.inner.expose_secret()
    }

    /// Key length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expose().len()
    }

    /// Pairs with [`Self::len`] for `clippy::len_without_is_empty`.
    ///
    /// Never `true` in practice, since every constructor rejects empty
    /// keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }

    /// Render the key in the given representation.
    #[must_use]
    pub fn encode(&self, encoding: SecretEncoding) -> String {
        encoding.encode(self.expose())
    }

    /// Padded Base32 rendering.
    #[must_use]
    pub fn to_base32(&self) -> String {
        self.encode(SecretEncoding::Base32)
    }

    /// Lowercase hex rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.encode(SecretEncoding::Hex)
    }
}

impl Clone for OtpSecret {
    fn clone(&self) -> Self {
        Self {
            inner: self.expose().to_vec().into(),
        }
    }
}

impl fmt::Debug for OtpSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpSecret(***)")
    }
}

// ── Tests ───────────────────────────────────────────────────────────
