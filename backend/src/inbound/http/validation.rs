//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` error whose `details` carry the
//! offending `field` and a stable `code`.

use serde_json::json;

use crate::domain::{
    AnalogyValidationError, Error, HistoryEntryId, LoginValidationError, SignUpValidationError,
};

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(field, "missing_field", format!("missing required field: {field}"))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_uuid",
    }))
}

/// Parse a required history entry id from an optional query value.
pub(crate) fn parse_entry_id(value: Option<&str>, field: FieldName) -> Result<HistoryEntryId, Error> {
    let raw = value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| missing_field_error(field))?;
    uuid::Uuid::parse_str(raw)
        .map(HistoryEntryId::from_uuid)
        .map_err(|_| invalid_uuid_error(field, raw))
}

pub(crate) fn analogy_input_error(err: &AnalogyValidationError) -> Error {
    field_error(err.field(), err.code(), err.to_string())
}

pub(crate) fn sign_up_error(err: &SignUpValidationError) -> Error {
    field_error(err.field(), err.code(), err.to_string())
}

pub(crate) fn login_error(err: &LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyIdentifier => field_error(
            "identifier",
            "empty_identifier",
            "username or email must not be empty",
        ),
        LoginValidationError::EmptyPassword => {
            field_error("password", "empty_password", "password must not be empty")
        }
    }
}
