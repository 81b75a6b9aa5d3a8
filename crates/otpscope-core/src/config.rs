//! OTP configuration: algorithm, digit count, step, and verification window.
//!
//! Passed explicitly by the caller at every call site; there is no
//! process-wide default instance. The JSON form is camelCase; reading it
//! from disk is the host's job.

use serde::{Deserialize, Serialize};

use crate::clock::{TimeManager, DEFAULT_STEP};
use crate::error::OtpError;
use crate::hmac::OtpAlgorithm;
use crate::totp::{OtpDigits, TotpConfig, DEFAULT_WINDOW, MAX_VERIFY_WINDOW};

/// Parameters shared by generation and verification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OtpConfig {
    /// HMAC algorithm.
    #[serde(default)]
    pub algorithm: OtpAlgorithm,

    /// Output digit count (1-10, typically 6 or 8).
    #[serde(default)]
    pub digits: OtpDigits,

    /// Step size in seconds (typically 30).
    #[serde(default = "default_step")]
    pub step: u32,

    /// Counters checked either side of the current one when verifying.
    #[serde(default = "default_window")]
    pub window: u32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            algorithm: OtpAlgorithm::default(),
            digits: OtpDigits::default(),
            step: default_step(),
            window: default_window(),
        }
    }
}

const fn default_step() -> u32 {
    DEFAULT_STEP
}
const fn default_window() -> u32 {
    DEFAULT_WINDOW
}

impl OtpConfig {
    /// Check the fields `serde` cannot.
    ///
    /// # Errors
    /// Returns [`OtpError::InvalidStep`] for a zero step and
    /// [`OtpError::InvalidWindow`] above [`MAX_VERIFY_WINDOW`].
    pub fn validate(&self) -> Result<(), OtpError> {
        if self.step == 0 {
            return Err(OtpError::InvalidStep);
        }
        if self.window > MAX_VERIFY_WINDOW {
            return Err(OtpError::InvalidWindow(self.window));
        }
        Ok(())
    }

    /// A live clock using the configured step.
    ///
    /// # Errors
    /// Returns [`OtpError::InvalidStep`] for a zero step.
    pub fn clock(&self) -> Result<TimeManager, OtpError> {
        TimeManager::with_step(self.step)
    }

    /// Bind this configuration to a secret and clock for one call.
    ///
    /// The clock keeps its own step; build it with [`Self::clock`] to use
    /// the configured one.
    #[must_use]
    pub const fn bind<'a>(&self, secret: &'a [u8], clock: &'a TimeManager) -> TotpConfig<'a> {
        TotpConfig {
            secret,
            algorithm: self.algorithm,
            digits: self.digits,
            clock,
        }
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    /// Returns [`OtpError::Config`] for malformed JSON (including an
    /// out-of-range digit count or unknown algorithm) and the
    /// [`Self::validate`] errors.
    pub fn from_json_str(json: &str) -> Result<Self, OtpError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| OtpError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

// ── Tests ──────────────────────────────────────────────────────────
