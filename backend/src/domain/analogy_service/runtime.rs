//! Runtime helpers for the generation retry policy.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{BackoffJitter, GenerationSleeper};

/// Runtime helpers used by retry policy.
pub struct AnalogyServiceRuntime {
    /// Async sleep implementation.
    pub sleeper: Arc<dyn GenerationSleeper>,
    /// Jitter strategy for retry delays.
    pub jitter: Arc<dyn BackoffJitter>,
}

impl Default for AnalogyServiceRuntime {
    fn default() -> Self {
        Self {
            sleeper: Arc::new(TokioSleeper),
            jitter: Arc::new(AttemptJitter),
        }
    }
}

/// Tokio-based sleeper implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl GenerationSleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Default jitter strategy: adds up to a quarter of the base delay, seeded
/// from the clock's sub-second nanos.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttemptJitter;

impl BackoffJitter for AttemptJitter {
    fn jittered_delay(&self, base: Duration, attempt: u32, now: DateTime<Utc>) -> Duration {
        let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
        let max_extra = (base_ms / 4).max(1);
        let seed = u64::from(now.timestamp_subsec_nanos()) ^ u64::from(attempt);
        let extra = seed % (max_extra.saturating_add(1));
        Duration::from_millis(base_ms.saturating_add(extra))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1)]
    #[case(1, 2)]
    #[case(2, 3)]
    fn attempt_jitter_stays_within_a_quarter_of_base(#[case] nanos: u32, #[case] attempt: u32) {
        let now = Utc
            .timestamp_opt(1_700_000_000, nanos)
            .single()
            .expect("valid timestamp");
        let base = Duration::from_millis(400);
        let delay = AttemptJitter.jittered_delay(base, attempt, now);
        assert!(delay >= base);
        assert!(delay <= base + Duration::from_millis(100));
    }
}
