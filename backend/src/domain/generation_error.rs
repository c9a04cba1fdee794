//! Failure taxonomy for analogy generation.

use serde_json::json;

use super::{AnalogyValidationError, Error};

/// Reasons an analogy could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// The request failed validation; no model call was made.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] AnalogyValidationError),
    /// The model answered, but not with a usable result.
    #[error("model output was malformed: {reason}")]
    MalformedModelOutput {
        /// What the normalizer rejected.
        reason: String,
        /// Verbatim model text, kept for diagnostics only.
        raw: String,
    },
    /// The generative service failed or could not be reached.
    #[error("generative service unavailable: {message}")]
    UpstreamUnavailable {
        /// Transport or status description.
        message: String,
    },
}

impl GenerationError {
    /// Build a [`GenerationError::MalformedModelOutput`].
    pub fn malformed(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::MalformedModelOutput {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// Build a [`GenerationError::UpstreamUnavailable`].
    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
        }
    }

    /// Whether a fresh attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::MalformedModelOutput { .. } | Self::UpstreamUnavailable { .. }
        )
    }
}

impl From<GenerationError> for Error {
    fn from(value: GenerationError) -> Self {
        match value {
            GenerationError::InvalidInput(err) => Error::invalid_request(err.to_string())
                .with_details(json!({ "field": err.field(), "code": err.code() })),
            GenerationError::MalformedModelOutput { reason, .. } => {
                Error::generation_failed("Failed to generate analogy; please try again")
                    .with_details(json!({ "reason": reason, "code": "malformed_model_output" }))
            }
            GenerationError::UpstreamUnavailable { .. } => {
                Error::generation_failed("Failed to generate analogy; please try again")
                    .with_details(json!({ "code": "upstream_unavailable" }))
            }
        }
    }
}
