//! Domain orchestration service for analogy generation.
//!
//! The service owns input validation, prompt selection and retry policy
//! (immediate retry on malformed output, jittered exponential backoff on
//! retryable upstream failures). It never persists anything.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::normalizer::{self, preview};
use crate::domain::ports::{AnalogyCommand, TextGenerator, TextGeneratorError};
use crate::domain::prompt::{self, Prompt, PromptStrategy};
use crate::domain::{AnalogyRequest, AnalogyResult, GenerationError};

mod runtime;

pub use runtime::{AnalogyServiceRuntime, AttemptJitter, TokioSleeper};

/// Service configuration controlling prompt shape and retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalogyServiceConfig {
    /// Prompt strategy used for every generation.
    pub strategy: PromptStrategy,
    /// Maximum generation attempts per request (including the first).
    pub max_attempts: u32,
    /// Initial retry backoff after an upstream failure.
    pub initial_backoff: Duration,
    /// Maximum retry backoff cap.
    pub max_backoff: Duration,
}

impl Default for AnalogyServiceConfig {
    fn default() -> Self {
        Self {
            strategy: PromptStrategy::Single,
            max_attempts: 2,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(2),
        }
    }
}

/// Async clock-independent sleeping abstraction for retries.
#[async_trait]
pub trait GenerationSleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Retry backoff jitter abstraction.
pub trait BackoffJitter: Send + Sync {
    /// Return a jittered delay from the exponential base delay.
    ///
    /// ```rust
    /// use analogy_backend::domain::BackoffJitter;
    /// use chrono::{TimeZone, Utc};
    /// use std::time::Duration;
    /// struct DeterministicJitter;
    /// impl BackoffJitter for DeterministicJitter {
    ///     fn jittered_delay(&self, base: Duration, attempt: u32, _now: chrono::DateTime<chrono::Utc>) -> Duration {
    ///         base + Duration::from_millis(u64::from(attempt) * 5)
    ///     }
    /// }
    /// let now = Utc.with_ymd_and_hms(2026, 2, 26, 12, 0, 0).single().expect("valid time");
    /// let delay = DeterministicJitter.jittered_delay(Duration::from_millis(100), 2, now);
    /// assert_eq!(delay, Duration::from_millis(110));
    /// ```
    fn jittered_delay(&self, base: Duration, attempt: u32, now: DateTime<Utc>) -> Duration;
}

/// Outcome of a single failed attempt.
#[derive(Debug)]
enum AttemptError {
    /// The model answered but the answer was unusable.
    Output(GenerationError),
    /// The generative service call itself failed.
    Source(TextGeneratorError),
}

impl From<GenerationError> for AttemptError {
    fn from(value: GenerationError) -> Self {
        Self::Output(value)
    }
}

impl From<TextGeneratorError> for AttemptError {
    fn from(value: TextGeneratorError) -> Self {
        Self::Source(value)
    }
}

/// Analogy generation service implementing [`AnalogyCommand`].
pub struct AnalogyService {
    generator: Arc<dyn TextGenerator>,
    clock: Arc<dyn Clock>,
    sleeper: Arc<dyn GenerationSleeper>,
    jitter: Arc<dyn BackoffJitter>,
    config: AnalogyServiceConfig,
}

impl AnalogyService {
    /// Build a service using default runtime dependencies.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use analogy_backend::domain::ports::FixtureTextGenerator;
    /// use analogy_backend::domain::{AnalogyService, AnalogyServiceConfig};
    /// use mockable::DefaultClock;
    ///
    /// let _service = AnalogyService::new(
    ///     Arc::new(FixtureTextGenerator),
    ///     Arc::new(DefaultClock),
    ///     AnalogyServiceConfig::default(),
    /// );
    /// ```
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        clock: Arc<dyn Clock>,
        config: AnalogyServiceConfig,
    ) -> Self {
        Self::with_runtime(generator, clock, AnalogyServiceRuntime::default(), config)
    }

    /// Build a service with injected runtime abstractions.
    pub fn with_runtime(
        generator: Arc<dyn TextGenerator>,
        clock: Arc<dyn Clock>,
        runtime: AnalogyServiceRuntime,
        config: AnalogyServiceConfig,
    ) -> Self {
        Self {
            generator,
            clock,
            sleeper: runtime.sleeper,
            jitter: runtime.jitter,
            config,
        }
    }

    /// Generate an analogy for an already validated request.
    ///
    /// # Errors
    /// Returns [`GenerationError::MalformedModelOutput`] when every attempt
    /// produced unusable text, or [`GenerationError::UpstreamUnavailable`]
    /// when the service could not be reached or refused the request.
    pub async fn generate_for(
        &self,
        request: &AnalogyRequest,
    ) -> Result<AnalogyResult, GenerationError> {
        let max_attempts = self.config.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.run_single_attempt(request).await {
                Ok(result) => {
                    info!(
                        attempt,
                        mappings = result.raw_mapping.mappings.len(),
                        "analogy generated"
                    );
                    return Ok(result);
                }
                Err(AttemptError::Output(error)) => {
                    log_malformed(&error, attempt);
                    if attempt == max_attempts {
                        return Err(error);
                    }
                }
                Err(AttemptError::Source(error)) if error.is_retryable() && attempt < max_attempts => {
                    let base_delay = self.retry_base_delay(attempt);
                    let delay = self
                        .jitter
                        .jittered_delay(base_delay, attempt, self.clock.utc());
                    warn!(attempt, %error, delay_ms = delay.as_millis(), "retrying generative call");
                    self.sleeper.sleep(delay).await;
                }
                Err(AttemptError::Source(error)) => {
                    warn!(attempt, %error, "generative service unavailable");
                    return Err(GenerationError::upstream_unavailable(error.to_string()));
                }
            }
        }

        Err(GenerationError::upstream_unavailable(
            "generation attempts exhausted",
        ))
    }

    async fn run_single_attempt(
        &self,
        request: &AnalogyRequest,
    ) -> Result<AnalogyResult, AttemptError> {
        match self.config.strategy {
            PromptStrategy::Single => {
                let raw = self.complete(&prompt::single_call_prompt(request)).await?;
                Ok(normalizer::normalize(&raw, request)?)
            }
            PromptStrategy::TwoCall => {
                let raw = self.complete(&prompt::mapping_prompt(request)).await?;
                let raw_mapping = normalizer::normalize_mapping(&raw, request)?;
                let explainer = prompt::explanation_prompt(request, &raw_mapping).map_err(|err| {
                    GenerationError::malformed(format!("mapping could not be rendered: {err}"), &raw)
                })?;
                let narrative = self.complete(&explainer).await?;
                let analogy = normalizer::normalize_explanation(&narrative)?;
                Ok(AnalogyResult {
                    analogy,
                    raw_mapping,
                })
            }
        }
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, TextGeneratorError> {
        debug!(prompt_chars = prompt.as_str().chars().count(), "calling generative service");
        self.generator.complete(prompt).await
    }

    fn retry_base_delay(&self, attempt: u32) -> Duration {
        let exponent = 2_u32.saturating_pow(attempt.saturating_sub(1));
        let base_ms = u64::try_from(self.config.initial_backoff.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.config.max_backoff.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(base_ms.saturating_mul(u64::from(exponent)).min(max_ms))
    }
}

fn log_malformed(error: &GenerationError, attempt: u32) {
    if let GenerationError::MalformedModelOutput { reason, raw } = error {
        warn!(attempt, %reason, raw = %preview(raw), "model output was malformed");
    } else {
        warn!(attempt, %error, "generation attempt failed");
    }
}

#[async_trait]
impl AnalogyCommand for AnalogyService {
    async fn generate(
        &self,
        topic: &str,
        interest: &str,
    ) -> Result<AnalogyResult, GenerationError> {
        let request = AnalogyRequest::try_new(topic, interest)?;
        self.generate_for(&request).await
    }
}
