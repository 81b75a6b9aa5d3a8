//! Time-step counter derivation (RFC 6238 §4).
//!
//! [`TimeManager`] turns wall-clock time, optionally shifted by an offset
//! or frozen at a fixed instant, into the HOTP moving factor. The pure
//! helpers [`counter_at`] and [`counter_bytes_for`] do the same without
//! any mutable state and are what verification uses to visit neighbouring
//! counters.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::error::OtpError;

// ── Constants ───────────────────────────────────────────────────────

/// Default TOTP period in seconds (RFC 6238 §4).
pub const DEFAULT_STEP: u32 = 30;

// ── Pure helpers ────────────────────────────────────────────────────

/// `floor(time / step)`.
///
/// # Errors
/// Returns [`OtpError::InvalidStep`] for a zero step and
/// [`OtpError::NegativeTime`] for times before the epoch.
pub fn counter_at(time: i64, step: u32) -> Result<u64, OtpError> {
    if step == 0 {
        return Err(OtpError::InvalidStep);
    }
    let time = u64::try_from(time).map_err(|_| OtpError::NegativeTime(time))?;
    // step is validated non-zero above.
    #[allow(clippy::arithmetic_side_effects)]
    let counter = time / u64::from(step);
    Ok(counter)
}

/// Serialize a counter as the 8-byte big-endian HMAC message
/// (RFC 4226 §5.2).
#[must_use]
pub const fn counter_bytes_for(counter: u64) -> [u8; 8] {
    counter.to_be_bytes()
}

/// Seconds until the next step boundary, in `(0, step]`.
///
/// Uses the Euclidean remainder so pre-epoch times stay in range too.
fn time_remaining_at(time: i64, step: u32) -> u32 {
    let elapsed = time.rem_euclid(i64::from(step.max(1)));
    // 0 <= elapsed < step, so both conversions and the subtraction are exact.
    let elapsed = u32::try_from(elapsed).unwrap_or(0);
    step.saturating_sub(elapsed)
}

/// Wall-clock seconds since the Unix epoch (negative before it).
fn unix_now() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        Err(e) => i64::try_from(e.duration().as_secs()).map_or(i64::MIN, |s| s.saturating_neg()),
    }
}

// ── Types ───────────────────────────────────────────────────────────

/// Snapshot of a [`TimeManager`] at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeState {
    /// Seconds since the epoch (frozen or offset-adjusted).
    pub current_time: i64,
    /// `floor(current_time / step)`.
    pub counter: u64,
    /// Step size in seconds.
    pub step: u32,
    /// Seconds until the counter changes, in `(0, step]`.
    pub time_remaining: u32,
    /// Whether a frozen-time override is active.
    pub is_frozen: bool,
    /// Signed offset applied to the wall clock.
    pub time_offset: i64,
}

/// Source of the TOTP counter.
///
/// Holds a step size, an optional frozen instant and a signed offset
/// added to the wall clock. Mutations are explicit and synchronous; each
/// instance is independent, so simulations never leak between callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeManager {
    step: u32,
    frozen_time: Option<i64>,
    time_offset: i64,
}

impl Default for TimeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeManager {
    /// Live clock with the default 30-second step.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: DEFAULT_STEP,
            frozen_time: None,
            time_offset: 0,
        }
    }

    /// Live clock with a custom step.
    ///
    /// # Errors
    /// Returns [`OtpError::InvalidStep`] for a zero step.
    pub fn with_step(step: u32) -> Result<Self, OtpError> {
        let mut manager = Self::new();
        manager.set_step(step)?;
        Ok(manager)
    }

    /// Clock frozen at `time` with the given step.
    ///
    /// # Errors
    /// Returns [`OtpError::InvalidStep`] for a zero step.
    pub fn frozen_at(time: i64, step: u32) -> Result<Self, OtpError> {
        let mut manager = Self::with_step(step)?;
        manager.freeze_at(time);
        Ok(manager)
    }

    /// Frozen time if set, else wall clock plus offset.
    #[must_use]
    pub fn current_time(&self) -> i64 {
        self.frozen_time
            .unwrap_or_else(|| unix_now().saturating_add(self.time_offset))
    }

    /// Current counter value.
    ///
    /// # Errors
    /// Returns [`OtpError::NegativeTime`] when the current time is before
    /// the epoch (e.g. a large negative offset).
    pub fn counter(&self) -> Result<u64, OtpError> {
        counter_at(self.current_time(), self.step)
    }

    /// Seconds until the counter changes, always in `(0, step]`.
    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        time_remaining_at(self.current_time(), self.step)
    }

    /// Current counter as 8 big-endian bytes.
    ///
    /// # Errors
    /// Same as [`Self::counter`].
    pub fn counter_bytes(&self) -> Result<[u8; 8], OtpError> {
        self.counter().map(counter_bytes_for)
    }

    /// Pin the clock at the instant of the call.
    pub fn freeze(&mut self) {
        self.frozen_time = Some(self.current_time());
    }

    /// Pin the clock at an explicit instant.
    pub fn freeze_at(&mut self, time: i64) {
        self.frozen_time = Some(time);
    }

    /// Return to the live (offset-adjusted) clock.
    pub fn unfreeze(&mut self) {
        self.frozen_time = None;
    }

    /// Whether a frozen-time override is active.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.frozen_time.is_some()
    }

    /// The frozen instant, if any.
    #[must_use]
    pub const fn frozen_time(&self) -> Option<i64> {
        self.frozen_time
    }

    /// Step size in seconds.
    #[must_use]
    pub const fn step(&self) -> u32 {
        self.step
    }

    /// Change the step size.
    ///
    /// # Errors
    /// Returns [`OtpError::InvalidStep`] for zero; the step is unchanged.
    pub fn set_step(&mut self, step: u32) -> Result<(), OtpError> {
        if step == 0 {
            return Err(OtpError::InvalidStep);
        }
        self.step = step;
        Ok(())
    }

    /// Signed seconds added to the wall clock.
    #[must_use]
    pub const fn time_offset(&self) -> i64 {
        self.time_offset
    }

    /// Shift the live clock. Has no effect while frozen.
    pub fn set_time_offset(&mut self, offset: i64) {
        self.time_offset = offset;
    }

    /// Snapshot of the full time state, read from a single clock sample.
    ///
    /// # Errors
    /// Returns [`OtpError::NegativeTime`] before the epoch.
    pub fn state(&self) -> Result<TimeState, OtpError> {
        let current_time = self.current_time();
        Ok(TimeState {
            current_time,
            counter: counter_at(current_time, self.step)?,
            step: self.step,
            time_remaining: time_remaining_at(current_time, self.step),
            is_frozen: self.is_frozen(),
            time_offset: self.time_offset,
        })
    }
}

// ── Tests ───────────────────────────────────────────────────────────
