//! Secret bytes must not leak through `Debug` formatting.

use otpscope_core::clock::TimeManager;
use otpscope_core::hmac::OtpAlgorithm;
use otpscope_core::secret::OtpSecret;
use otpscope_core::totp::{OtpDigits, TotpConfig};

const SECRET: &[u8] = b"12345678901234567890";

#[test]
fn otp_secret_debug_is_masked() {
    let secret = OtpSecret::new(SECRET).unwrap();
    let debug = format!("{secret:?}");
    assert_eq!(debug, "OtpSecret(***)");
    assert!(!debug.contains("GEZDGNBV"));
    assert!(!debug.contains("3132"));
}

#[test]
fn totp_config_debug_is_masked() {
    let clock = TimeManager::frozen_at(59, 30).unwrap();
    let config = TotpConfig {
        secret: SECRET,
        algorithm: OtpAlgorithm::Sha1,
        digits: OtpDigits::SIX,
        clock: &clock,
    };
    let debug = format!("{config:?}");
    assert!(!debug.contains("12345678901234567890"), "{debug}");
    assert!(!debug.contains("49, 50, 51"), "{debug}");
    assert!(debug.contains("Sha1"), "{debug}");
}

/// Cloning yields an independent copy of the same key.
#[test]
fn cloned_secret_matches_original() {
    let secret = OtpSecret::random(32).unwrap();
    let clone = secret.clone();
    assert_eq!(secret.expose(), clone.expose());
    drop(secret);
    assert_eq!(clone.len(), 32);
}
