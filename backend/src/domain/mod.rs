//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers, plus the services that orchestrate analogy generation,
//! history and accounts. Nothing here knows about HTTP, cookies or SQL; the
//! caller's identity always arrives as an explicit [`UserId`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - AnalogyRequest / AnalogyResult: generation input and validated output.
//! - GenerationError: failure taxonomy of a generation.
//! - HistoryEntry / HistoryLimit: per-user history records and page size.
//! - Account / SignUp / LoginCredentials: account model and inputs.
//! - AnalogyService / HistoryService / AccountService: driving port
//!   implementations.

pub mod account;
pub mod analogy;
pub mod analogy_service;
pub mod auth;
pub mod error;
pub mod generation_error;
pub mod history;
pub mod normalizer;
pub mod ports;
pub mod prompt;
pub mod trace_id;
pub mod user;

mod account_service;
mod history_service;

pub use self::account::{
    Account, EmailAddress, Password, PasswordHash, SignUp, SignUpValidationError, Username,
};
pub use self::account_service::AccountService;
pub use self::analogy::{
    AnalogyRequest, AnalogyResult, AnalogyValidationError, MappingEntry, REQUEST_FIELD_MAX,
    RawMapping, ResultValidationError, TARGET_MAPPING_COUNT,
};
pub use self::analogy_service::{
    AnalogyService, AnalogyServiceConfig, AnalogyServiceRuntime, AttemptJitter, BackoffJitter,
    GenerationSleeper, TokioSleeper,
};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::generation_error::GenerationError;
pub use self::history::{HistoryEntry, HistoryEntryId, HistoryLimit, NewHistoryEntry};
pub use self::history_service::HistoryService;
pub use self::prompt::{Prompt, PromptStrategy, UnknownPromptStrategy};
pub use self::trace_id::TraceId;
pub use self::user::{UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use analogy_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
