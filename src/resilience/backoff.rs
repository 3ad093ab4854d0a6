//! Exponential backoff with optional jitter.

use rand::Rng;
use std::time::Duration;

/// Calculate the delay to wait after failed attempt number `attempt`.
///
/// Attempt 1 waits `base_ms`, attempt 2 waits `base_ms * multiplier`, and so
/// on, capped at `max_ms`. `jitter_ratio` adds up to that fraction of the
/// capped delay at random.
pub fn calculate_backoff(
    attempt: u32,
    base_ms: u64,
    multiplier: f64,
    max_ms: u64,
    jitter_ratio: f64,
) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
    let delay_ms = (base_ms as f64) * multiplier.powi(exponent);
    let capped_delay = if delay_ms.is_finite() {
        (delay_ms as u64).min(max_ms)
    } else {
        max_ms
    };

    let jitter_range = (capped_delay as f64 * jitter_ratio.clamp(0.0, 1.0)) as u64;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay.saturating_add(jitter))
}

/// Longest total sleep of one retry sequence of `max_attempts` calls,
/// assuming maximal jitter.
pub fn worst_case_backoff(
    max_attempts: u32,
    base_ms: u64,
    multiplier: f64,
    max_ms: u64,
    jitter_ratio: f64,
) -> Duration {
    let mut total_ms: u64 = 0;
    for attempt in 1..max_attempts {
        let delay_ms = calculate_backoff(attempt, base_ms, multiplier, max_ms, 0.0).as_millis() as u64;
        if delay_ms >= max_ms {
            let remaining = u64::from(max_attempts - attempt);
            total_ms = total_ms.saturating_add(delay_ms.saturating_mul(remaining));
            break;
        }
        total_ms = total_ms.saturating_add(delay_ms);
    }

    let with_jitter = total_ms as f64 * (1.0 + jitter_ratio.clamp(0.0, 1.0));
    Duration::from_millis(with_jitter.min(u64::MAX as f64) as u64)
}
