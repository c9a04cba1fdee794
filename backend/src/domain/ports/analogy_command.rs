//! Driving port for analogy generation.
//!
//! Inbound adapters pass the raw topic and interest straight through; the
//! implementation owns validation so every caller gets the same
//! `InvalidInput` behaviour.

use async_trait::async_trait;

use crate::domain::{AnalogyResult, GenerationError};

/// Domain use-case port for generating one analogy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalogyCommand: Send + Sync {
    /// Validate the inputs, call the model and return a normalised result.
    async fn generate(&self, topic: &str, interest: &str)
    -> Result<AnalogyResult, GenerationError>;
}
