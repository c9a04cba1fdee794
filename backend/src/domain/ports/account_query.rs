//! Driving port for reading the signed-in account.

use async_trait::async_trait;

use crate::domain::{Account, Error, UserId};

/// Domain use-case port for loading an account by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Return the account for `user_id`, or `not_found`.
    async fn fetch_account(&self, user_id: &UserId) -> Result<Account, Error>;
}
