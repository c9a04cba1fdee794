//! Analogy generation endpoint.
//!
//! ```text
//! POST /api/v1/generate {"topic":"Recursion","interest":"Inception","saveToHistory":true}
//! ```

use actix_web::{post, web};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{AnalogyRequest, AnalogyResult, Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, analogy_input_error, missing_field_error};

/// Request body for `POST /api/v1/generate`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Technical concept to explain.
    #[schema(example = "Recursion")]
    pub topic: Option<String>,
    /// Personal-interest domain to explain it through.
    #[schema(example = "Inception")]
    pub interest: Option<String>,
    /// Append the result to the caller's history when signed in.
    #[serde(default)]
    pub save_to_history: bool,
}

impl GenerateRequest {
    fn into_request(self) -> Result<AnalogyRequest, Error> {
        let topic = self
            .topic
            .ok_or_else(|| missing_field_error(FieldName::new("topic")))?;
        let interest = self
            .interest
            .ok_or_else(|| missing_field_error(FieldName::new("interest")))?;
        AnalogyRequest::try_new(&topic, &interest).map_err(|err| analogy_input_error(&err))
    }
}

/// Generate an analogy explaining `topic` through `interest`.
///
/// Anonymous callers may generate; `saveToHistory` is ignored without a
/// session. History write failures are logged and never fail the request.
#[utoipa::path(
    post,
    path = "/api/v1/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated analogy", body = crate::inbound::http::schemas::AnalogyResultSchema),
        (status = 400, description = "Missing or invalid fields", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Generation failed; try again", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["analogies"],
    operation_id = "generateAnalogy",
    security([], ("SessionCookie" = []))
)]
#[post("/generate")]
pub async fn generate(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<GenerateRequest>,
) -> ApiResult<web::Json<AnalogyResult>> {
    let payload = payload.into_inner();
    let save_to_history = payload.save_to_history;
    let request = payload.into_request()?;

    let result = state
        .analogies
        .generate(request.topic(), request.interest())
        .await?;

    if save_to_history {
        match session.user_id() {
            Ok(Some(user_id)) => save_best_effort(&state, &user_id, request, result.clone()).await,
            Ok(None) => debug!("saveToHistory requested without a session; skipping"),
            Err(error) => warn!(%error, "session unreadable; history not saved"),
        }
    }

    Ok(web::Json(result))
}

async fn save_best_effort(
    state: &HttpState,
    user_id: &UserId,
    request: AnalogyRequest,
    result: AnalogyResult,
) {
    if let Err(error) = state.history.append(user_id, request, result).await {
        warn!(%user_id, %error, "history save failed; generation result still returned");
    }
}
