//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape so the generated document
//! matches what handlers actually send.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist or is not owned by the caller.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// The analogy could not be generated; retrying may succeed.
    #[schema(rename = "generation_failed")]
    GenerationFailed,
    /// A backing service is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "topic must not be empty")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "topic", "code": "empty_field"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::MappingEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::MappingEntry)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MappingEntrySchema {
    #[schema(example = "base case")]
    technical_term: String,
    technical_definition: String,
    #[schema(example = "the kick")]
    analogy_term: String,
    analogy_explanation: String,
    code_analogy_left: String,
    code_analogy_right: String,
}

/// OpenAPI schema for [`crate::domain::RawMapping`].
#[derive(ToSchema)]
#[schema(as = crate::domain::RawMapping)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RawMappingSchema {
    #[schema(example = "Recursion")]
    concept: String,
    #[schema(example = "Inception")]
    domain: String,
    mappings: Vec<MappingEntrySchema>,
}

/// OpenAPI schema for [`crate::domain::AnalogyResult`].
///
/// Keys are snake_case on the wire; clients render `raw_mapping` as cards.
#[derive(ToSchema)]
#[schema(as = crate::domain::AnalogyResult)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AnalogyResultSchema {
    /// Narrative analogy paragraph.
    analogy: String,
    /// Structured term-by-term mapping.
    raw_mapping: RawMappingSchema,
}
