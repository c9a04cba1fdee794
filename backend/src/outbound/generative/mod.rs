//! Generative-text outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `TextGenerator`
//! port against the Gemini `generateContent` API.

mod dto;
mod gemini_source;

pub use gemini_source::{GeminiClientError, GeminiHttpSource, GeminiSettings};
