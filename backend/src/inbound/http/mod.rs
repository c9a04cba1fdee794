//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate JSON bodies and session cookies into domain calls and
//! map domain errors onto the shared error envelope.

pub mod error;
pub mod generate;
pub mod health;
pub mod history;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
