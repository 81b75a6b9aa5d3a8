//! Integration tests for configuration-driven generation and verification.

use otpscope_core::config::OtpConfig;
use otpscope_core::hmac::OtpAlgorithm;
use otpscope_core::secret::OtpSecret;
use otpscope_core::totp::{generate, verify, OtpDigits};

/// A serialized configuration reproduces the RFC 6238 SHA-256 vector.
#[test]
fn serialized_config_drives_generation() {
    let json = serde_json::to_string(&OtpConfig {
        algorithm: OtpAlgorithm::Sha256,
        digits: OtpDigits::EIGHT,
        step: 30,
        window: 1,
    })
    .unwrap();

    let config = OtpConfig::from_json_str(&json).unwrap();
    let secret = OtpSecret::new(b"12345678901234567890123456789012").unwrap();
    let mut clock = config.clock().unwrap();
    clock.freeze_at(1_234_567_890);

    let bound = config.bind(secret.expose(), &clock);
    let generated = bound.generate().unwrap();
    assert_eq!(generated.otp, "91819424");

    let result = verify(&bound, &generated.otp, config.window).unwrap();
    assert!(result.valid);
}

/// The configured step reaches both the clock and the result.
#[test]
fn configured_step_flows_through() {
    let config = OtpConfig::from_json_str(r#"{"step": 60}"#).unwrap();
    let mut clock = config.clock().unwrap();
    clock.freeze_at(120);
    let result = generate(
        b"12345678901234567890",
        config.algorithm,
        config.digits,
        &clock,
    )
    .unwrap();
    assert_eq!(result.counter, 2);
    assert_eq!(result.step, 60);
}
