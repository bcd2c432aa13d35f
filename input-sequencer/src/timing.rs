//! Humanized timing between the down and up phase of a gesture.

use crate::errors::{InputError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;

/// Upper bound for any humanization delay (one minute)
pub const MAX_DELAY_MS: i64 = 60_000;

pub const DEFAULT_MIN_DELAY_MS: i64 = 50;
pub const DEFAULT_MAX_DELAY_MS: i64 = 300;

/// Check `0 <= min <= max <= MAX_DELAY_MS`.
pub fn validate_bounds(min_ms: i64, max_ms: i64) -> Result<()> {
    if min_ms < 0 {
        return Err(InputError::Configuration(format!(
            "minimum delay must be >= 0, got {min_ms}ms"
        )));
    }
    if max_ms > MAX_DELAY_MS {
        return Err(InputError::Configuration(format!(
            "maximum delay must be <= {MAX_DELAY_MS}ms, got {max_ms}ms"
        )));
    }
    if min_ms > max_ms {
        return Err(InputError::Configuration(format!(
            "minimum delay {min_ms}ms exceeds maximum delay {max_ms}ms"
        )));
    }
    Ok(())
}

/// Whether a delay is inserted between down and up, and its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingPolicy {
    /// Insert a random delay between the down and up phase of every gesture
    pub enabled: bool,

    /// Inclusive lower bound in milliseconds
    pub min_ms: i64,

    /// Upper bound in milliseconds; drawn delays stay below it unless it
    /// equals `min_ms`
    pub max_ms: i64,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            min_ms: DEFAULT_MIN_DELAY_MS,
            max_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}

impl TimingPolicy {
    /// Humanization on, with the given bounds
    pub fn new(min_ms: i64, max_ms: i64) -> Result<Self> {
        let policy = Self {
            enabled: true,
            min_ms,
            max_ms,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Down and up events are emitted back to back
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Bounds are checked even when humanization is off.
    pub fn validate(&self) -> Result<()> {
        validate_bounds(self.min_ms, self.max_ms)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Source of uniformly distributed delays.
///
/// Holds one generator for its whole lifetime. The generator sits behind a
/// mutex so a source shared between threads serializes draws; the lock is
/// only held while drawing, never while a caller sleeps.
#[derive(Debug)]
pub struct TimingSource {
    rng: Mutex<StdRng>,
}

impl Default for TimingSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingSource {
    /// Seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic source, for reproducible playback and tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draw a delay from `[min_ms, max_ms)`.
    ///
    /// `min_ms == max_ms` yields exactly `min_ms`.
    pub fn next_delay(&self, min_ms: i64, max_ms: i64) -> Result<Duration> {
        validate_bounds(min_ms, max_ms)?;
        if min_ms == max_ms {
            return Ok(Duration::from_millis(min_ms as u64));
        }

        // A panic while holding the lock cannot corrupt the generator state.
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let ms = rng.gen_range(min_ms..max_ms);
        Ok(Duration::from_millis(ms as u64))
    }

    /// Draw a delay for `policy`, or `None` when humanization is off.
    pub fn delay_for(&self, policy: &TimingPolicy) -> Result<Option<Duration>> {
        if !policy.enabled {
            return Ok(None);
        }
        self.next_delay(policy.min_ms, policy.max_ms).map(Some)
    }
}
