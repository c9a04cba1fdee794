//! Turns raw model text into a typed [`AnalogyResult`].
//!
//! Models routinely wrap JSON in Markdown code fences or pad it with
//! whitespace. The normalizer removes every fence marker that sits outside a
//! JSON string literal, trims, parses, and then validates the decoded value
//! against the request. Fences inside string values (a fenced snippet in
//! `code_analogy_left`, say) are content and survive untouched.
//! Anything it cannot accept becomes [`GenerationError::MalformedModelOutput`];
//! it never extracts a partial result and never retries.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use super::{AnalogyRequest, AnalogyResult, GenerationError, RawMapping, TARGET_MAPPING_COUNT};

const FENCE: &str = "```";

static FENCE_RE: OnceLock<Regex> = OnceLock::new();

fn fence_regex() -> &'static Regex {
    FENCE_RE.get_or_init(|| {
        // Triple backtick plus an optional language tag such as `json` or `c++`.
        let pattern = r"```[A-Za-z0-9_+\-]*";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("code fence regex failed to compile: {error}"))
    })
}

/// Remove every code-fence marker and trim surrounding whitespace.
///
/// Meant for plain text such as the explainer narrative; JSON answers go
/// through [`strip_json_fences`] instead.
///
/// # Examples
/// ```
/// use analogy_backend::domain::normalizer::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
/// assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
/// ```
pub fn strip_code_fences(raw: &str) -> String {
    fence_regex().replace_all(raw, "").trim().to_owned()
}

/// Remove code-fence markers lying outside JSON string literals, then trim.
///
/// # Examples
/// ```
/// use analogy_backend::domain::normalizer::strip_json_fences;
///
/// assert_eq!(strip_json_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
/// assert_eq!(
///     strip_json_fences("```json\n{\"a\":\"```rs\\nx\\n```\"}\n```"),
///     "{\"a\":\"```rs\\nx\\n```\"}"
/// );
/// ```
pub fn strip_json_fences(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    let mut in_string = false;
    let mut escaped = false;

    loop {
        if !in_string {
            if let Some(after) = rest.strip_prefix(FENCE) {
                rest = after.trim_start_matches(is_fence_tag_char);
                continue;
            }
        }
        let mut chars = rest.chars();
        let Some(ch) = chars.next() else {
            break;
        };
        rest = chars.as_str();
        out.push(ch);

        if !in_string {
            in_string = ch == '"';
        } else if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            in_string = false;
        }
    }

    out.trim().to_owned()
}

const fn is_fence_tag_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '+' | '-')
}

/// Parse and validate a single-call model answer.
///
/// # Errors
/// Returns [`GenerationError::MalformedModelOutput`] when the text is not JSON,
/// lacks required keys, carries blank fields or no mappings, or does not echo
/// the request topic and interest.
pub fn normalize(raw: &str, request: &AnalogyRequest) -> Result<AnalogyResult, GenerationError> {
    let cleaned = strip_json_fences(raw);
    let result: AnalogyResult = serde_json::from_str(&cleaned)
        .map_err(|error| GenerationError::malformed(parse_reason(&error), raw))?;
    result
        .validate()
        .map_err(|error| GenerationError::malformed(error.to_string(), raw))?;
    check_echo(&result.raw_mapping, request, raw)?;
    note_mapping_count(&result.raw_mapping);
    Ok(result)
}

/// Parse and validate the mapper answer of the two-call strategy.
///
/// # Errors
/// Same conditions as [`normalize`], applied to a bare `raw_mapping` object.
pub fn normalize_mapping(raw: &str, request: &AnalogyRequest) -> Result<RawMapping, GenerationError> {
    let cleaned = strip_json_fences(raw);
    let mapping: RawMapping = serde_json::from_str(&cleaned)
        .map_err(|error| GenerationError::malformed(parse_reason(&error), raw))?;
    mapping
        .validate()
        .map_err(|error| GenerationError::malformed(error.to_string(), raw))?;
    check_echo(&mapping, request, raw)?;
    note_mapping_count(&mapping);
    Ok(mapping)
}

/// Clean the explainer answer of the two-call strategy.
///
/// # Errors
/// Returns [`GenerationError::MalformedModelOutput`] when nothing but fences
/// and whitespace came back.
pub fn normalize_explanation(raw: &str) -> Result<String, GenerationError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(GenerationError::malformed("explanation was empty", raw));
    }
    Ok(cleaned)
}

/// Compact, bounded rendering of model text for log fields.
pub(crate) fn preview(raw: &str) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let clipped = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{clipped}...")
    } else {
        clipped
    }
}

fn parse_reason(error: &serde_json::Error) -> String {
    format!("response is not a valid analogy document: {error}")
}

/// Describe how `mapping` fails to echo the request, if it does.
///
/// Concept and domain are compared case-insensitively after trimming.
pub fn echo_mismatch(mapping: &RawMapping, request: &AnalogyRequest) -> Option<String> {
    if !same_text(&mapping.concept, request.topic()) {
        return Some(format!(
            "raw_mapping.concept '{}' does not match topic '{}'",
            mapping.concept,
            request.topic()
        ));
    }
    (!same_text(&mapping.domain, request.interest())).then(|| {
        format!(
            "raw_mapping.domain '{}' does not match interest '{}'",
            mapping.domain,
            request.interest()
        )
    })
}

fn check_echo(
    mapping: &RawMapping,
    request: &AnalogyRequest,
    raw: &str,
) -> Result<(), GenerationError> {
    echo_mismatch(mapping, request).map_or(Ok(()), |reason| {
        Err(GenerationError::malformed(reason, raw))
    })
}

fn same_text(echoed: &str, expected: &str) -> bool {
    echoed.trim().to_lowercase() == expected.trim().to_lowercase()
}

fn note_mapping_count(mapping: &RawMapping) {
    let count = mapping.mappings.len();
    if count != TARGET_MAPPING_COUNT {
        warn!(
            count,
            expected = TARGET_MAPPING_COUNT,
            "model returned an unexpected number of mappings"
        );
    }
}

#[cfg(test)]
#[path = "normalizer_tests.rs"]
mod tests;
