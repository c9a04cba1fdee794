//! DTOs for the Gemini `generateContent` request and response bodies.
//!
//! Only the fields the adapter reads are modelled; everything else in the
//! response envelope is ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct GenerateContentRequestDto<'a> {
    pub(super) contents: [ContentDto<'a>; 1],
}

impl<'a> GenerateContentRequestDto<'a> {
    pub(super) fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: [ContentDto {
                role: "user",
                parts: [PartDto { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ContentDto<'a> {
    pub(super) role: &'static str,
    pub(super) parts: [PartDto<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(super) struct PartDto<'a> {
    pub(super) text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentResponseDto {
    #[serde(default)]
    pub(super) candidates: Vec<CandidateDto>,
    pub(super) prompt_feedback: Option<PromptFeedbackDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CandidateDto {
    pub(super) content: Option<CandidateContentDto>,
    pub(super) finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidateContentDto {
    #[serde(default)]
    pub(super) parts: Vec<CandidatePartDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidatePartDto {
    #[serde(default)]
    pub(super) text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PromptFeedbackDto {
    pub(super) block_reason: Option<String>,
}

/// Why a decoded envelope carried no usable text.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum MissingText {
    Blocked(String),
    NoCandidates,
}

impl GenerateContentResponseDto {
    /// Concatenate the text parts of the first candidate.
    pub(super) fn into_text(self) -> Result<String, MissingText> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(match self.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => MissingText::Blocked(reason),
                None => MissingText::NoCandidates,
            });
        };
        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();
        if text.is_empty() {
            if let Some(reason) = candidate.finish_reason.filter(|r| r != "STOP") {
                return Err(MissingText::Blocked(reason));
            }
        }
        Ok(text)
    }
}
