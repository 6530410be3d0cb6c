//! Delay schedules between fallback passes.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, FixedInterval};

/// Maps a pass index to the wait before the next pass begins.
///
/// The delay for pass `i` is applied after pass `i` exhausted every model and
/// before pass `i + 1` starts. No delay follows the final pass.
///
/// # Configuration
///
/// ```toml
/// [fallback.backoff]
/// kind = "exponential"
/// base_ms = 1000
/// factor = 2
/// max_delay_ms = 30_000   # optional cap
/// ```
///
/// ```toml
/// [fallback.backoff]
/// kind = "fixed"
/// delay_ms = 500
/// ```
///
/// # Examples
///
/// ```
/// use polyglot_retry::BackoffSchedule;
/// use std::time::Duration;
///
/// let schedule = BackoffSchedule::default();
/// assert_eq!(schedule.delay(0), Duration::from_secs(1));
/// assert_eq!(schedule.delay(1), Duration::from_secs(2));
/// assert_eq!(schedule.delay(2), Duration::from_secs(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackoffSchedule {
    /// Start the next pass immediately
    None,
    /// Same delay after every pass
    Fixed {
        /// Delay in milliseconds
        delay_ms: u64,
    },
    /// `base_ms * factor^pass`, optionally capped
    Exponential {
        /// Delay after the first pass, in milliseconds
        base_ms: u64,
        /// Growth factor per pass
        factor: u32,
        /// Upper bound for any single delay, in milliseconds
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_delay_ms: Option<u64>,
    },
}

impl Default for BackoffSchedule {
    /// One second, doubling each pass: 1 s, 2 s, 4 s, ...
    fn default() -> Self {
        BackoffSchedule::Exponential {
            base_ms: 1000,
            factor: 2,
            max_delay_ms: None,
        }
    }
}

impl BackoffSchedule {
    /// Delay to wait after pass `pass` (zero-based) before the next one.
    pub fn delay(&self, pass: usize) -> Duration {
        match *self {
            BackoffSchedule::None => Duration::ZERO,
            BackoffSchedule::Fixed { delay_ms } => FixedInterval::from_millis(delay_ms)
                .nth(pass)
                .unwrap_or(Duration::ZERO),
            BackoffSchedule::Exponential {
                base_ms,
                factor,
                max_delay_ms,
            } => {
                let cap = max_delay_ms.map_or(Duration::MAX, Duration::from_millis);
                // ExponentialBackoff yields base_ms * factor^(n + 1), so the
                // first pass gets base_ms ahead of it.
                std::iter::once(Duration::from_millis(base_ms))
                    .chain(
                        ExponentialBackoff::from_millis(u64::from(factor))
                            .factor(base_ms)
                            .max_delay(cap),
                    )
                    .map(|delay| delay.min(cap))
                    .nth(pass)
                    .unwrap_or(cap)
            }
        }
    }
}
