//! Driven port for the generative text service.
//!
//! The domain only sees an opaque completion call: a prompt goes in and raw
//! model text comes out. Parsing that text is the normalizer's job.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde_json::json;

use super::define_port_error;
use crate::domain::Prompt;

define_port_error! {
    /// Errors surfaced while calling the generative service.
    pub enum TextGeneratorError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "generative service transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } =>
            "generative service timeout: {message}",
        /// The service rate-limited the request.
        RateLimited { message: String } =>
            "generative service rate limited request: {message}",
        /// The service refused the request (bad key, bad model, blocked prompt).
        Rejected { message: String } =>
            "generative service rejected request: {message}",
        /// The response envelope could not be decoded.
        Decode { message: String } =>
            "generative service response decode failed: {message}",
    }
}

impl TextGeneratorError {
    /// Return whether retrying this error is expected to help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

/// Port for single-shot text completion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` and return the model's raw text answer.
    async fn complete(&self, prompt: &Prompt) -> Result<String, TextGeneratorError>;
}

const SCHEMA_MARKER: &str = "\"technical_term\": \"Exact concept name\"";

static CONCEPT_RE: OnceLock<Regex> = OnceLock::new();
static DOMAIN_RE: OnceLock<Regex> = OnceLock::new();

fn echoed(re: &'static OnceLock<Regex>, key: &str, prompt: &str) -> String {
    re.get_or_init(|| {
        Regex::new(&format!(r#"(?m)^\s*"{key}": "(.*)",\s*$"#))
            .unwrap_or_else(|error| panic!("{key} regex failed to compile: {error}"))
    })
    .captures(prompt)
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str().to_owned())
    .unwrap_or_default()
}

/// Offline generator used when no API key is configured.
///
/// It reads the topic and interest back out of the prompt's schema template
/// and answers with a well-formed, fenced document, so the whole pipeline can
/// be exercised without network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureTextGenerator;

#[async_trait]
impl TextGenerator for FixtureTextGenerator {
    async fn complete(&self, prompt: &Prompt) -> Result<String, TextGeneratorError> {
        let text = prompt.as_str();
        let concept = echoed(&CONCEPT_RE, "concept", text);
        let domain = echoed(&DOMAIN_RE, "domain", text);
        // Only the schema-bearing prompts ask for JSON; the explainer wants prose.
        if !text.contains(SCHEMA_MARKER) {
            return Ok(format!("Think of {concept} as a story told through {domain}."));
        }

        let mappings = (1..=3)
            .map(|index| {
                json!({
                    "technical_term": format!("{concept} part {index}"),
                    "technical_definition": format!("Element {index} of {concept}."),
                    "analogy_term": format!("{domain} element {index}"),
                    "analogy_explanation": format!("Plays role {index} in both worlds."),
                    "code_analogy_left": format!("{concept}.step({index})"),
                    "code_analogy_right": format!("{domain}.step({index})"),
                })
            })
            .collect::<Vec<_>>();
        let raw_mapping = json!({
            "concept": concept,
            "domain": domain,
            "mappings": mappings,
        });
        let body = if text.contains("\"raw_mapping\"") {
            json!({
                "analogy": format!("{concept} works just like {domain}."),
                "raw_mapping": raw_mapping,
            })
        } else {
            raw_mapping
        };
        Ok(format!("```json\n{body}\n```"))
    }
}
