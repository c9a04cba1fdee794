//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together with
//! the schema wrappers from [`crate::inbound::http::schemas`], which describe
//! domain types without making the domain depend on utoipa.

use crate::inbound::http::generate::GenerateRequest;
use crate::inbound::http::history::{
    HistoryEntryResponse, HistoryListResponse, HistorySavedResponse, SaveHistoryRequest,
};
use crate::inbound::http::schemas::{
    AnalogyResultSchema, ErrorCodeSchema, ErrorSchema, MappingEntrySchema, RawMappingSchema,
};
use crate::inbound::http::users::{AccountResponse, LoginRequest, SignUpRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI serves it in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Analogy backend API",
        description = "Generate technical analogies framed in a learner's interests and keep a per-user history."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::generate::generate,
        crate::inbound::http::history::list_history,
        crate::inbound::http::history::save_history,
        crate::inbound::http::history::delete_history,
        crate::inbound::http::users::sign_up,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        GenerateRequest,
        AnalogyResultSchema,
        RawMappingSchema,
        MappingEntrySchema,
        SaveHistoryRequest,
        HistoryEntryResponse,
        HistoryListResponse,
        HistorySavedResponse,
        SignUpRequest,
        LoginRequest,
        AccountResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "analogies", description = "Analogy generation"),
        (name = "history", description = "Per-user generation history"),
        (name = "users", description = "Accounts and sessions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
