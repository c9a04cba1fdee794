//! Reqwest-backed Gemini text generator.
//!
//! This adapter owns transport details only: request serialisation, timeout and
//! HTTP error mapping, and decoding the response envelope into raw model text.
//! Interpreting that text is left to the domain normalizer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{GenerateContentRequestDto, GenerateContentResponseDto, MissingText};
use crate::domain::Prompt;
use crate::domain::ports::{TextGenerator, TextGeneratorError};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for the Gemini adapter.
pub struct GeminiSettings {
    /// API base, for example `https://generativelanguage.googleapis.com/v1beta`.
    pub endpoint: String,
    /// Model name, for example `gemini-3-flash-preview`.
    pub model: String,
    /// API key sent in the `x-goog-api-key` header.
    pub api_key: Zeroizing<String>,
    /// Whole-request timeout.
    pub timeout: Duration,
}

/// Errors raised while constructing the adapter.
#[derive(Debug, thiserror::Error)]
pub enum GeminiClientError {
    /// Endpoint and model did not form a valid URL.
    #[error("invalid Gemini endpoint '{url}': {message}")]
    Endpoint {
        /// Offending URL.
        url: String,
        /// Parser message.
        message: String,
    },
    /// The API key contains characters not allowed in a header.
    #[error("Gemini API key is not a valid header value")]
    ApiKey,
    /// The HTTP client could not be built.
    #[error("failed to build Gemini HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Gemini adapter performing one `generateContent` POST per completion.
pub struct GeminiHttpSource {
    client: Client,
    url: Url,
}

impl GeminiHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is invalid, the key cannot be sent as a
    /// header, or the reqwest client cannot be constructed.
    pub fn new(settings: GeminiSettings) -> Result<Self, GeminiClientError> {
        let url = generate_content_url(&settings.endpoint, &settings.model)?;

        let mut key = HeaderValue::from_str(settings.api_key.as_str())
            .map_err(|_| GeminiClientError::ApiKey)?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .timeout(settings.timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl TextGenerator for GeminiHttpSource {
    async fn complete(&self, prompt: &Prompt) -> Result<String, TextGeneratorError> {
        let response = self
            .client
            .post(self.url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&GenerateContentRequestDto::from_prompt(prompt.as_str()))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        debug!(bytes = body.len(), "generative service answered");
        parse_text(body.as_ref())
    }
}

fn generate_content_url(endpoint: &str, model: &str) -> Result<Url, GeminiClientError> {
    let raw = format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model.trim()
    );
    Url::parse(&raw).map_err(|error| GeminiClientError::Endpoint {
        url: raw.clone(),
        message: error.to_string(),
    })
}

fn parse_text(body: &[u8]) -> Result<String, TextGeneratorError> {
    let decoded: GenerateContentResponseDto = serde_json::from_slice(body).map_err(|error| {
        TextGeneratorError::decode(format!("invalid generateContent payload: {error}"))
    })?;
    decoded.into_text().map_err(|missing| match missing {
        MissingText::Blocked(reason) => {
            TextGeneratorError::rejected(format!("generation blocked: {reason}"))
        }
        MissingText::NoCandidates => TextGeneratorError::decode("response carried no candidates"),
    })
}

fn map_transport_error(error: reqwest::Error) -> TextGeneratorError {
    if error.is_timeout() {
        TextGeneratorError::timeout(error.to_string())
    } else {
        TextGeneratorError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> TextGeneratorError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => TextGeneratorError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            TextGeneratorError::timeout(message)
        }
        _ if status.is_client_error() => TextGeneratorError::rejected(message),
        _ => TextGeneratorError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
