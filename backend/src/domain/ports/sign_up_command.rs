//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Account, Error, SignUp};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignUpCommand: Send + Sync {
    /// Hash the password and store a new, verified account.
    async fn sign_up(&self, request: SignUp) -> Result<Account, Error>;
}
