//! HMAC engine (RFC 2104) over SHA-1, SHA-256 and SHA-512.
//!
//! Thin layer over `ring::hmac`; key length is unrestricted and long keys
//! are hashed first by `ring` as the standard construction requires.

use std::fmt;
use std::str::FromStr;

use ring::hmac;
use serde::{Deserialize, Serialize};

use crate::error::OtpError;

/// HMAC algorithm used for OTP generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OtpAlgorithm {
    /// HMAC-SHA1 (default for most authenticator apps).
    #[default]
    #[serde(rename = "SHA-1")]
    Sha1,
    /// HMAC-SHA256.
    #[serde(rename = "SHA-256")]
    Sha256,
    /// HMAC-SHA512.
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl OtpAlgorithm {
    /// Every supported algorithm, in ascending digest size.
    pub const ALL: [Self; 3] = [Self::Sha1, Self::Sha256, Self::Sha512];

    /// Map to the corresponding `ring::hmac::Algorithm`.
    fn to_ring_algorithm(self) -> hmac::Algorithm {
        match self {
            Self::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            Self::Sha256 => hmac::HMAC_SHA256,
            Self::Sha512 => hmac::HMAC_SHA512,
        }
    }

    /// Digest length in bytes: 20, 32 or 64.
    #[must_use]
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    /// Canonical display name (`SHA-1`, `SHA-256`, `SHA-512`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha512 => "SHA-512",
        }
    }
}

impl fmt::Display for OtpAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OtpAlgorithm {
    type Err = OtpError;

    /// Accepts `SHA-1`/`SHA1`/`sha1` style spellings, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "SHA1" => Ok(Self::Sha1),
            "SHA256" => Ok(Self::Sha256),
            "SHA512" => Ok(Self::Sha512),
            _ => Err(OtpError::UnsupportedAlgorithm(s.to_owned())),
        }
    }
}

/// Compute `HMAC(key, message)` with the chosen hash.
///
/// The returned digest is always [`OtpAlgorithm::digest_len`] bytes.
#[must_use]
pub fn hmac(key: &[u8], message: &[u8], algorithm: OtpAlgorithm) -> Vec<u8> {
    let key = hmac::Key::new(algorithm.to_ring_algorithm(), key);
    hmac::sign(&key, message).as_ref().to_vec()
}

// ── Tests ───────────────────────────────────────────────────────────
