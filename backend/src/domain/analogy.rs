//! Analogy request and result types.
//!
//! An [`AnalogyRequest`] pairs a technical topic with a personal-interest
//! domain. A successful generation produces an [`AnalogyResult`]: a narrative
//! paragraph plus a structured [`RawMapping`] whose entries line up technical
//! terms with their counterparts in the interest domain.

use serde::{Deserialize, Serialize};

/// Maximum number of characters accepted for either request field.
pub const REQUEST_FIELD_MAX: usize = 500;

/// Number of mapping entries requested from the model.
pub const TARGET_MAPPING_COUNT: usize = 3;

/// Validation errors raised while constructing an [`AnalogyRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalogyValidationError {
    /// The topic was blank once trimmed.
    #[error("topic must not be empty")]
    EmptyTopic,
    /// The interest was blank once trimmed.
    #[error("interest must not be empty")]
    EmptyInterest,
    /// The topic exceeded [`REQUEST_FIELD_MAX`] characters.
    #[error("topic must be at most {max} characters")]
    TopicTooLong { max: usize },
    /// The interest exceeded [`REQUEST_FIELD_MAX`] characters.
    #[error("interest must be at most {max} characters")]
    InterestTooLong { max: usize },
}

impl AnalogyValidationError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTopic | Self::TopicTooLong { .. } => "topic",
            Self::EmptyInterest | Self::InterestTooLong { .. } => "interest",
        }
    }

    /// Machine-readable validation code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTopic | Self::EmptyInterest => "empty_field",
            Self::TopicTooLong { .. } | Self::InterestTooLong { .. } => "field_too_long",
        }
    }
}

/// Validated generation input.
///
/// ## Invariants
/// - `topic` and `interest` are trimmed and non-empty.
/// - Neither exceeds [`REQUEST_FIELD_MAX`] characters.
/// - Interior whitespace and punctuation are preserved verbatim.
///
/// # Examples
/// ```
/// use analogy_backend::domain::AnalogyRequest;
///
/// let request = AnalogyRequest::try_new("  Recursion ", "Movies").expect("valid request");
/// assert_eq!(request.topic(), "Recursion");
/// assert!(AnalogyRequest::try_new("   ", "Movies").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalogyRequest {
    topic: String,
    interest: String,
}

impl AnalogyRequest {
    /// Trim and validate both fields.
    pub fn try_new(
        topic: impl AsRef<str>,
        interest: impl AsRef<str>,
    ) -> Result<Self, AnalogyValidationError> {
        let topic = topic.as_ref().trim();
        let interest = interest.as_ref().trim();

        if topic.is_empty() {
            return Err(AnalogyValidationError::EmptyTopic);
        }
        if interest.is_empty() {
            return Err(AnalogyValidationError::EmptyInterest);
        }
        if topic.chars().count() > REQUEST_FIELD_MAX {
            return Err(AnalogyValidationError::TopicTooLong {
                max: REQUEST_FIELD_MAX,
            });
        }
        if interest.chars().count() > REQUEST_FIELD_MAX {
            return Err(AnalogyValidationError::InterestTooLong {
                max: REQUEST_FIELD_MAX,
            });
        }

        Ok(Self {
            topic: topic.to_owned(),
            interest: interest.to_owned(),
        })
    }

    /// Technical concept to explain.
    pub fn topic(&self) -> &str {
        self.topic.as_str()
    }

    /// Domain the explanation draws from.
    pub fn interest(&self) -> &str {
        self.interest.as_str()
    }
}

/// One technical term paired with its analogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Term from the technical topic.
    pub technical_term: String,
    /// Plain definition of the technical term.
    pub technical_definition: String,
    /// Corresponding element of the interest domain.
    pub analogy_term: String,
    /// Why the two correspond.
    pub analogy_explanation: String,
    /// Short code-like snippet for the technical side.
    pub code_analogy_left: String,
    /// Matching snippet for the analogy side.
    pub code_analogy_right: String,
}

impl MappingEntry {
    fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("technical_term", self.technical_term.as_str()),
            ("technical_definition", self.technical_definition.as_str()),
            ("analogy_term", self.analogy_term.as_str()),
            ("analogy_explanation", self.analogy_explanation.as_str()),
            ("code_analogy_left", self.code_analogy_left.as_str()),
            ("code_analogy_right", self.code_analogy_right.as_str()),
        ]
    }
}

/// Structured concept-to-domain mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMapping {
    /// Echo of the request topic.
    pub concept: String,
    /// Echo of the request interest.
    pub domain: String,
    /// Individual term mappings.
    pub mappings: Vec<MappingEntry>,
}

impl RawMapping {
    /// Check that every field carries non-blank text and at least one entry
    /// exists.
    pub fn validate(&self) -> Result<(), ResultValidationError> {
        require_text("raw_mapping.concept", &self.concept)?;
        require_text("raw_mapping.domain", &self.domain)?;
        if self.mappings.is_empty() {
            return Err(ResultValidationError::NoMappings);
        }
        for (index, entry) in self.mappings.iter().enumerate() {
            for (field, value) in entry.fields() {
                if value.trim().is_empty() {
                    return Err(ResultValidationError::EmptyMappingField { index, field });
                }
            }
        }
        Ok(())
    }
}

/// Complete generation output.
///
/// # Examples
/// ```
/// use analogy_backend::domain::AnalogyResult;
///
/// let json = r#"{
///     "analogy": "Recursion is a dream within a dream.",
///     "raw_mapping": {
///         "concept": "Recursion",
///         "domain": "Inception",
///         "mappings": [{
///             "technical_term": "base case",
///             "technical_definition": "stops the recursion",
///             "analogy_term": "the kick",
///             "analogy_explanation": "wakes the dreamer",
///             "code_analogy_left": "if n == 0",
///             "code_analogy_right": "if kick"
///         }]
///     }
/// }"#;
/// let result: AnalogyResult = serde_json::from_str(json).expect("valid shape");
/// assert!(result.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalogyResult {
    /// Narrative paragraph.
    pub analogy: String,
    /// Structured mapping backing the narrative.
    pub raw_mapping: RawMapping,
}

impl AnalogyResult {
    /// Check every textual field is non-blank and `mappings` is non-empty.
    pub fn validate(&self) -> Result<(), ResultValidationError> {
        require_text("analogy", &self.analogy)?;
        self.raw_mapping.validate()
    }
}

/// Structural problems found in a decoded result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResultValidationError {
    /// A top-level text field was blank.
    #[error("`{field}` must be non-empty text")]
    EmptyField { field: &'static str },
    /// `raw_mapping.mappings` contained no entries.
    #[error("`raw_mapping.mappings` must contain at least one entry")]
    NoMappings,
    /// A mapping entry field was blank.
    #[error("`raw_mapping.mappings[{index}].{field}` must be non-empty text")]
    EmptyMappingField { index: usize, field: &'static str },
}

fn require_text(field: &'static str, value: &str) -> Result<(), ResultValidationError> {
    if value.trim().is_empty() {
        Err(ResultValidationError::EmptyField { field })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn entry() -> MappingEntry {
        MappingEntry {
            technical_term: "stack frame".to_owned(),
            technical_definition: "state for one call".to_owned(),
            analogy_term: "dream level".to_owned(),
            analogy_explanation: "each level keeps its own world".to_owned(),
            code_analogy_left: "fn f(n) { f(n - 1) }".to_owned(),
            code_analogy_right: "dream(level) { dream(level + 1) }".to_owned(),
        }
    }

    #[fixture]
    fn result(entry: MappingEntry) -> AnalogyResult {
        AnalogyResult {
            analogy: "Recursion is like Inception.".to_owned(),
            raw_mapping: RawMapping {
                concept: "Recursion".to_owned(),
                domain: "Inception".to_owned(),
                mappings: vec![entry],
            },
        }
    }

    #[rstest]
    #[case("", "Movies", AnalogyValidationError::EmptyTopic)]
    #[case("Recursion", " \t", AnalogyValidationError::EmptyInterest)]
    fn rejects_blank_fields(
        #[case] topic: &str,
        #[case] interest: &str,
        #[case] expected: AnalogyValidationError,
    ) {
        assert_eq!(AnalogyRequest::try_new(topic, interest), Err(expected));
    }

    #[rstest]
    fn rejects_overlong_fields() {
        let long = "x".repeat(REQUEST_FIELD_MAX + 1);
        let topic_err = AnalogyRequest::try_new(&long, "Movies").expect_err("too long");
        assert_eq!(topic_err.field(), "topic");
        let interest_err = AnalogyRequest::try_new("Recursion", &long).expect_err("too long");
        assert_eq!(interest_err.code(), "field_too_long");
    }

    #[rstest]
    fn keeps_interior_text_verbatim() {
        let request = AnalogyRequest::try_new("  Big  O notation ", "\"Star Wars\"!").expect("valid");
        assert_eq!(request.topic(), "Big  O notation");
        assert_eq!(request.interest(), "\"Star Wars\"!");
    }

    #[rstest]
    fn accepts_well_formed_result(result: AnalogyResult) {
        assert_eq!(result.validate(), Ok(()));
    }

    #[rstest]
    fn rejects_empty_mappings(mut result: AnalogyResult) {
        result.raw_mapping.mappings.clear();
        assert_eq!(result.validate(), Err(ResultValidationError::NoMappings));
    }

    #[rstest]
    fn reports_first_blank_mapping_field(mut result: AnalogyResult, entry: MappingEntry) {
        let mut blank = entry;
        blank.code_analogy_right = "  ".to_owned();
        result.raw_mapping.mappings.push(blank);
        assert_eq!(
            result.validate(),
            Err(ResultValidationError::EmptyMappingField {
                index: 1,
                field: "code_analogy_right",
            })
        );
    }

    #[rstest]
    fn rejects_blank_analogy(mut result: AnalogyResult) {
        result.analogy = String::new();
        assert_eq!(
            result.validate(),
            Err(ResultValidationError::EmptyField { field: "analogy" })
        );
    }
}
