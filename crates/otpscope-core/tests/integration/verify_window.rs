//! Integration tests for window verification against a controlled clock.

use otpscope_core::clock::TimeManager;
use otpscope_core::error::OtpError;
use otpscope_core::hmac::OtpAlgorithm;
use otpscope_core::totp::{generate_hotp, verify, OtpDigits, TotpConfig, MAX_VERIFY_WINDOW};

const SECRET_20: &[u8] = b"12345678901234567890";

fn config(clock: &TimeManager) -> TotpConfig<'_> {
    TotpConfig {
        secret: SECRET_20,
        algorithm: OtpAlgorithm::Sha1,
        digits: OtpDigits::SIX,
        clock,
    }
}

fn hotp(counter: u64) -> String {
    generate_hotp(SECRET_20, counter, OtpDigits::SIX, OtpAlgorithm::Sha1).unwrap()
}

/// Previous and next counters are accepted with window 1.
#[test]
fn adjacent_counters_accepted_with_window_one() {
    // 300 / 30 = counter 10
    let clock = TimeManager::frozen_at(300, 30).unwrap();
    for counter in [9, 10, 11] {
        let result = verify(&config(&clock), &hotp(counter), 1).unwrap();
        assert!(result.valid, "counter {counter} should be accepted");
        assert_eq!(result.matched_counter, Some(counter));
    }
}

/// Two steps away is outside window 1 but inside window 2.
#[test]
fn two_steps_needs_window_two() {
    let clock = TimeManager::frozen_at(300, 30).unwrap();
    let code = hotp(12);

    let narrow = verify(&config(&clock), &code, 1).unwrap();
    assert!(!narrow.valid);
    assert_eq!(narrow.checked_counters, vec![9, 10, 11]);
    assert_eq!(narrow.attempts.len(), 3);
    assert!(narrow.attempts.iter().all(|a| !a.matched));

    let wide = verify(&config(&clock), &code, 2).unwrap();
    assert!(wide.valid);
    assert_eq!(wide.matched_counter, Some(12));
    assert_eq!(wide.checked_counters, vec![8, 9, 10, 11, 12]);
}

/// Verification stops at the first match.
#[test]
fn verification_returns_on_first_match() {
    let clock = TimeManager::frozen_at(300, 30).unwrap();
    let result = verify(&config(&clock), &hotp(9), 3).unwrap();
    assert!(result.valid);
    assert_eq!(result.checked_counters, vec![7, 8, 9]);
    let last = result.attempts.last().unwrap();
    assert!(last.matched);
    assert!(!last.current);
    assert_eq!(last.otp, hotp(9));
}

/// The attempt at the clock's own counter is flagged as current.
#[test]
fn current_attempt_is_flagged() {
    let clock = TimeManager::frozen_at(300, 30).unwrap();
    let result = verify(&config(&clock), "000000x", 2).unwrap();
    let current: Vec<u64> = result
        .attempts
        .iter()
        .filter(|a| a.current)
        .map(|a| a.counter)
        .collect();
    assert_eq!(current, vec![10]);
}

/// Near the epoch, counters below zero are skipped rather than wrapped.
#[test]
fn window_near_epoch_skips_negative_counters() {
    let clock = TimeManager::frozen_at(15, 30).unwrap();
    let result = verify(&config(&clock), "------", 2).unwrap();
    assert!(!result.valid);
    assert_eq!(result.checked_counters, vec![0, 1, 2]);
}

/// Verification never moves the clock.
#[test]
fn verification_leaves_clock_untouched() {
    let clock = TimeManager::frozen_at(300, 30).unwrap();
    let before = clock.clone();
    let _ = verify(&config(&clock), &hotp(11), 5).unwrap();
    assert_eq!(clock, before);
}

/// A shifted live clock verifies codes from its own frame of reference.
#[test]
fn offset_clock_verifies_shifted_code() {
    let mut clock = TimeManager::new();
    clock.set_time_offset(-1_000_000);
    let counter = clock.counter().unwrap();
    // Window 1 absorbs a step rollover between the two samples.
    let result = verify(&config(&clock), &hotp(counter), 1).unwrap();
    assert!(result.valid);
}

/// Oversized windows and pre-epoch clocks are errors, not silent failures.
#[test]
fn invalid_inputs_are_errors() {
    let clock = TimeManager::frozen_at(300, 30).unwrap();
    assert_eq!(
        verify(&config(&clock), "123456", MAX_VERIFY_WINDOW + 1),
        Err(OtpError::InvalidWindow(MAX_VERIFY_WINDOW + 1))
    );

    let before_epoch = TimeManager::frozen_at(-60, 30).unwrap();
    assert_eq!(
        verify(&config(&before_epoch), "123456", 1),
        Err(OtpError::NegativeTime(-60))
    );

    let empty = TotpConfig {
        secret: &[],
        ..config(&clock)
    };
    assert_eq!(
        verify(&empty, "123456", 1),
        Err(OtpError::InvalidSecretLength(0))
    );
}
