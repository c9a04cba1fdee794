//! Prompt construction for the generative model.
//!
//! Prompts are pure functions of the request. Each one names the exact output
//! schema, asks for JSON only, and embeds the topic and interest verbatim so
//! the model can echo them back into `raw_mapping`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{AnalogyRequest, RawMapping, TARGET_MAPPING_COUNT};

/// Instruction text sent to the generative service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Borrow the prompt text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many model calls a generation uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptStrategy {
    /// One prompt returns the full result.
    #[default]
    Single,
    /// A mapper prompt returns `raw_mapping`; an explainer prompt then writes
    /// the narrative from it.
    TwoCall,
}

/// Raised when a strategy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown prompt strategy '{0}'; expected single|two-call")]
pub struct UnknownPromptStrategy(String);

impl FromStr for PromptStrategy {
    type Err = UnknownPromptStrategy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "single" | "single-call" => Ok(Self::Single),
            "two-call" | "mapper-explainer" => Ok(Self::TwoCall),
            other => Err(UnknownPromptStrategy(other.to_owned())),
        }
    }
}

const MAPPING_ENTRY_SCHEMA: &str = r#"{
      "technical_term": "Exact concept name",
      "technical_definition": "A two-sentence precise definition.",
      "analogy_term": "Equivalent element in the interest domain",
      "analogy_explanation": "Why this correspondence holds.",
      "code_analogy_left": "Pseudo-code or equation for the technical side (e.g. F = ma)",
      "code_analogy_right": "Matching pseudo-code for the analogy side (e.g. Impact = Punch * Speed)"
    }"#;

const OUTPUT_RULES: &str = "Return JSON only. Do not wrap the JSON in Markdown or code fences. \
Do not add any prose before or after the JSON. Every field is required and must be non-empty text.";

/// Prompt for the single-call strategy.
///
/// # Examples
/// ```
/// use analogy_backend::domain::{AnalogyRequest, prompt::single_call_prompt};
///
/// let request = AnalogyRequest::try_new("Recursion", "Inception").expect("valid");
/// let prompt = single_call_prompt(&request);
/// assert!(prompt.as_str().contains("\"concept\": \"Recursion\""));
/// ```
pub fn single_call_prompt(request: &AnalogyRequest) -> Prompt {
    let topic = request.topic();
    let interest = request.interest();
    Prompt(format!(
        r#"You are an expert educational engine.
Explain the concept "{topic}" using a strict analogy to "{interest}".

{OUTPUT_RULES}
Produce exactly {TARGET_MAPPING_COUNT} entries in "mappings".
Use this structure:
{{
  "analogy": "An engaging paragraph explaining the connection like a story.",
  "raw_mapping": {{
    "concept": "{topic}",
    "domain": "{interest}",
    "mappings": [
    {MAPPING_ENTRY_SCHEMA}
    ]
  }}
}}"#
    ))
}

/// Mapper prompt for the two-call strategy; the answer is a bare `raw_mapping`.
pub fn mapping_prompt(request: &AnalogyRequest) -> Prompt {
    let topic = request.topic();
    let interest = request.interest();
    Prompt(format!(
        r#"You are an expert educational engine.
Map the concept "{topic}" onto "{interest}" as a strict analogy.

{OUTPUT_RULES}
Produce exactly {TARGET_MAPPING_COUNT} entries in "mappings".
Use this structure:
{{
  "concept": "{topic}",
  "domain": "{interest}",
  "mappings": [
    {MAPPING_ENTRY_SCHEMA}
  ]
}}"#
    ))
}

/// Explainer prompt for the two-call strategy.
///
/// The answer is a plain-text paragraph built from the supplied mapping.
///
/// # Errors
/// Returns the serialisation error when the mapping cannot be rendered as
/// JSON.
pub fn explanation_prompt(
    request: &AnalogyRequest,
    mapping: &RawMapping,
) -> Result<Prompt, serde_json::Error> {
    let rendered = serde_json::to_string_pretty(mapping)?;
    let topic = request.topic();
    let interest = request.interest();
    Ok(Prompt(format!(
        r#"You are an expert educational engine.
Write one engaging paragraph that explains "{topic}" through "{interest}" like a story.
Base it strictly on this mapping:
{rendered}

Return the paragraph as plain text only. Do not use Markdown, JSON, or code fences."#
    )))
}
