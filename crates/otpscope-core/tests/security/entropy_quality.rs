//! Entropy quality tests for generated secrets.
//!
//! Validates that `generate_secret()` and `OtpSecret::random()` produce
//! output with Shannon entropy appropriate for their sample size. This is
//! a smoke test that `OsRng` is functioning and not producing degenerate
//! output.
//!
//! Shannon entropy for uniform random bytes approaches 8.0 bits/byte as
//! the sample grows. Small samples read lower because not every byte value
//! appears:
//!
//! | Sample size | Expected entropy | Threshold |
//! |-------------|-----------------|-----------|
//! | 20 bytes    | ~4.25           | 3.5       |
//! | 1 KB        | ~7.81           | 7.5       |
//! | 64 KB       | ~7.997          | 7.99      |
//!
//! Single draws are capped at `MAX_SECRET_LENGTH`, so the 64 KB sample is
//! pooled from several draws.

use std::collections::HashSet;

use otpscope_core::codec::{generate_secret, DEFAULT_SECRET_LENGTH, MAX_SECRET_LENGTH};
use otpscope_core::secret::OtpSecret;

/// Shannon entropy of a byte slice (bits per byte).
///
/// H = -Σ p(x) * log2(p(x)) for each byte value x in [0, 255]
#[allow(clippy::cast_precision_loss)]
fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut freq = [0u64; 256];
    for &b in data {
        freq[b as usize] = freq[b as usize].saturating_add(1);
    }
    let len = data.len() as f64;
    freq.iter()
        .filter(|&&f| f > 0)
        .map(|&f| {
            let p = f as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[test]
fn generate_secret_1kb_entropy() {
    let bytes = generate_secret(1024).expect("CSPRNG should succeed");
    let entropy = shannon_entropy(&bytes);
    assert!(
        entropy > 7.5,
        "generate_secret(1024) entropy too low: {entropy:.4} (expected > 7.5)"
    );
}

/// 64 KB pooled from maximum-length draws.
#[test]
fn generate_secret_64kb_pooled_entropy() {
    let mut pooled = Vec::with_capacity(MAX_SECRET_LENGTH * 64);
    for _ in 0..64 {
        let bytes = generate_secret(MAX_SECRET_LENGTH).expect("CSPRNG should succeed");
        pooled.extend_from_slice(&bytes);
    }
    let entropy = shannon_entropy(&pooled);
    assert!(
        entropy > 7.99,
        "pooled generate_secret entropy too low: {entropy:.4} (expected > 7.99)"
    );
}

/// Default-length secrets, concatenated, behave like one large sample.
#[test]
fn default_length_secrets_aggregate_entropy() {
    let mut pooled = Vec::with_capacity(DEFAULT_SECRET_LENGTH * 256);
    for _ in 0..256 {
        let secret = OtpSecret::random(DEFAULT_SECRET_LENGTH).expect("CSPRNG should succeed");
        assert_eq!(secret.len(), DEFAULT_SECRET_LENGTH);
        pooled.extend_from_slice(secret.expose());
    }
    let entropy = shannon_entropy(&pooled);
    assert!(
        entropy > 7.9,
        "pooled OtpSecret::random entropy too low: {entropy:.4} (expected > 7.9)"
    );
}

/// A single 20-byte secret is not degenerate.
#[test]
fn single_secret_is_not_degenerate() {
    let bytes = generate_secret(DEFAULT_SECRET_LENGTH).expect("CSPRNG should succeed");
    let entropy = shannon_entropy(&bytes);
    assert!(
        entropy > 3.5,
        "generate_secret(20) entropy too low: {entropy:.4} (expected > 3.5)"
    );
}

/// Consecutive secrets never repeat.
#[test]
fn consecutive_secrets_are_unique() {
    let mut seen = HashSet::new();
    for _ in 0..1_000 {
        let bytes = generate_secret(DEFAULT_SECRET_LENGTH).expect("CSPRNG should succeed");
        assert!(seen.insert(bytes), "duplicate secret generated");
    }
}
