//! Per-user history endpoints.
//!
//! ```text
//! GET    /api/v1/history?limit=20
//! POST   /api/v1/history {"topic":"Recursion","interest":"Inception","result":{...}}
//! DELETE /api/v1/history?id=3fa85f64-5717-4562-b3fc-2c963f66afa6
//! ```
//!
//! Every handler resolves the caller from the session first; the domain only
//! ever sees an explicit `UserId`.

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::normalizer::echo_mismatch;
use crate::domain::{AnalogyRequest, AnalogyResult, Error, HistoryEntry, HistoryLimit};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, analogy_input_error, missing_field_error, parse_entry_id,
};

/// Query parameters for `GET /api/v1/history`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct HistoryListQuery {
    /// Page size, clamped to 1..=100; defaults to 50.
    pub limit: Option<u32>,
}

/// Query parameters for `DELETE /api/v1/history`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct HistoryDeleteQuery {
    /// Identifier of the entry to delete.
    pub id: Option<String>,
}

/// Request body for `POST /api/v1/history`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SaveHistoryRequest {
    /// Topic the result was generated for.
    pub topic: Option<String>,
    /// Interest the result was generated for.
    pub interest: Option<String>,
    /// Previously generated analogy result.
    #[schema(value_type = Option<crate::inbound::http::schemas::AnalogyResultSchema>)]
    pub result: Option<serde_json::Value>,
}

/// History entry as returned to its owner.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryResponse {
    /// Entry identifier, used for deletion.
    pub id: Uuid,
    /// Owning account.
    pub user_id: Uuid,
    /// Topic as submitted.
    pub topic: String,
    /// Interest as submitted.
    pub interest: String,
    /// Stored result.
    #[schema(value_type = crate::inbound::http::schemas::AnalogyResultSchema)]
    pub result: AnalogyResult,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<HistoryEntry> for HistoryEntryResponse {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: *entry.id.as_uuid(),
            user_id: *entry.user_id.as_uuid(),
            topic: entry.topic,
            interest: entry.interest,
            result: entry.result,
            created_at: entry.created_at,
        }
    }
}

/// `{success: true, data: [...]}` envelope for history listings.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HistoryListResponse {
    /// Always `true`; failures use the error envelope.
    pub success: bool,
    /// Entries, newest first.
    pub data: Vec<HistoryEntryResponse>,
}

/// `{success: true, message, data}` envelope for a saved entry.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HistorySavedResponse {
    /// Always `true`.
    pub success: bool,
    /// Confirmation text.
    pub message: String,
    /// The stored entry.
    pub data: HistoryEntryResponse,
}

impl SaveHistoryRequest {
    fn into_parts(self) -> Result<(AnalogyRequest, AnalogyResult), Error> {
        let topic = self
            .topic
            .ok_or_else(|| missing_field_error(FieldName::new("topic")))?;
        let interest = self
            .interest
            .ok_or_else(|| missing_field_error(FieldName::new("interest")))?;
        let raw_result = self
            .result
            .ok_or_else(|| missing_field_error(FieldName::new("result")))?;

        let request =
            AnalogyRequest::try_new(&topic, &interest).map_err(|err| analogy_input_error(&err))?;
        let result: AnalogyResult = serde_json::from_value(raw_result)
            .map_err(|err| invalid_result(format!("result is not an analogy result: {err}")))?;
        result
            .validate()
            .map_err(|err| invalid_result(err.to_string()))?;
        if let Some(reason) = echo_mismatch(&result.raw_mapping, &request) {
            return Err(invalid_result(reason));
        }
        Ok((request, result))
    }
}

fn invalid_result(message: String) -> Error {
    Error::invalid_request(message)
        .with_details(json!({ "field": "result", "code": "invalid_result" }))
}

/// List the caller's history, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/history",
    params(HistoryListQuery),
    responses(
        (status = 200, description = "History entries", body = HistoryListResponse),
        (status = 401, description = "Login required", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "History store unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["history"],
    operation_id = "listHistory"
)]
#[get("/history")]
pub async fn list_history(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<HistoryListQuery>,
) -> ApiResult<web::Json<HistoryListResponse>> {
    let user_id = session.require_user_id()?;
    let limit = query.limit.map_or(state.history_limit, HistoryLimit::new);
    let entries = state.history_query.list(&user_id, limit).await?;
    Ok(web::Json(HistoryListResponse {
        success: true,
        data: entries.into_iter().map(HistoryEntryResponse::from).collect(),
    }))
}

/// Save a previously generated result to the caller's history.
#[utoipa::path(
    post,
    path = "/api/v1/history",
    request_body = SaveHistoryRequest,
    responses(
        (status = 200, description = "Entry saved", body = HistorySavedResponse),
        (status = 400, description = "Missing or invalid fields", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Login required", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["history"],
    operation_id = "saveHistory"
)]
#[post("/history")]
pub async fn save_history(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SaveHistoryRequest>,
) -> ApiResult<web::Json<HistorySavedResponse>> {
    let user_id = session.require_user_id()?;
    let (request, result) = payload.into_inner().into_parts()?;
    let entry = state.history.append(&user_id, request, result).await?;
    Ok(web::Json(HistorySavedResponse {
        success: true,
        message: "History saved successfully".to_owned(),
        data: entry.into(),
    }))
}

/// Delete one of the caller's entries.
///
/// Entries owned by someone else are reported exactly like missing ones.
#[utoipa::path(
    delete,
    path = "/api/v1/history",
    params(HistoryDeleteQuery),
    responses(
        (status = 200, description = "Entry deleted"),
        (status = 400, description = "Missing or invalid id", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Login required", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "No such entry for this user", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["history"],
    operation_id = "deleteHistory"
)]
#[delete("/history")]
pub async fn delete_history(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<HistoryDeleteQuery>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let id = parse_entry_id(query.id.as_deref(), FieldName::new("id"))?;
    state.history.delete(&user_id, &id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "History entry deleted successfully",
    })))
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
