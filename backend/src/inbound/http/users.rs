//! Account API handlers.
//!
//! ```text
//! POST /api/v1/sign-up {"username":"ada_l","email":"ada@example.com","password":"Str0ng&Secret"}
//! POST /api/v1/login {"identifier":"ada_l","password":"Str0ng&Secret"}
//! POST /api/v1/logout
//! GET /api/v1/users/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::{Account, Error, LoginCredentials, SignUp};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, login_error, missing_field_error, sign_up_error};

/// Sign-up request body for `POST /api/v1/sign-up`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SignUpRequest {
    /// 2 to 30 letters, digits or underscores.
    #[schema(example = "ada_l")]
    pub username: Option<String>,
    /// Email address, stored lowercased.
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    /// 8 to 100 characters with upper, lower, digit and one of `@$!%*?&`.
    #[schema(example = "Str0ng&Secret")]
    pub password: Option<String>,
}

impl SignUpRequest {
    fn into_sign_up(self) -> Result<SignUp, Error> {
        let username = required(self.username, "username")?;
        let email = required(self.email, "email")?;
        let password = required(self.password, "password")?;
        SignUp::try_from_parts(&username, &email, &password).map_err(|err| sign_up_error(&err))
    }
}

/// Login request body for `POST /api/v1/login`.
///
/// `identifier` may be a username or an email address; `username` and
/// `email` are accepted as aliases.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Username or email address.
    #[serde(alias = "username", alias = "email")]
    #[schema(example = "ada_l")]
    pub identifier: String,
    /// Account password.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.identifier, &value.password).map_err(|err| login_error(&err))
    }
}

/// Profile of the signed-in account.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Account identifier.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Normalised email address.
    pub email: String,
    /// Whether the email address has been verified.
    pub is_verified: bool,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: *account.id.as_uuid(),
            username: account.username.to_string(),
            email: account.email.to_string(),
            is_verified: account.is_verified,
        }
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| missing_field_error(FieldName::new(field)))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Username or email already registered", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signUp",
    security([])
)]
#[post("/sign-up")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<SignUpRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner().into_sign_up()?;
    let account = state.sign_up.sign_up(request).await?;
    info!(user_id = %account.id, "account created");
    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Account created successfully",
    })))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Invalid credentials or unverified email", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Return the signed-in account.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current account", body = AccountResponse),
        (status = 401, description = "Login required", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Account no longer exists", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AccountResponse>> {
    let user_id = session.require_user_id()?;
    let account = state.accounts.fetch_account(&user_id).await?;
    Ok(web::Json(account.into()))
}
