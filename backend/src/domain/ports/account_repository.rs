//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Account, EmailAddress, UserId, Username};

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// Another account already uses the username.
        DuplicateUsername => "username already taken",
        /// Another account already uses the email address.
        DuplicateEmail => "email already registered",
    }
}

/// Port for creating and looking up accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account, enforcing username and email uniqueness.
    async fn create(&self, account: &Account) -> Result<(), AccountRepositoryError>;

    /// Fetch an account by exact username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    /// Fetch an account by normalised email address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountRepositoryError>;
}

/// Check for duplicates in the order the sign-up flow reports them.
///
/// Adapters that cannot rely on database constraints use this to produce the
/// same error the constraint mapping would.
pub(crate) fn duplicate_of(
    existing: &Account,
    username: &Username,
    email: &EmailAddress,
) -> Option<AccountRepositoryError> {
    if existing.username == *username {
        Some(AccountRepositoryError::duplicate_username())
    } else if existing.email == *email {
        Some(AccountRepositoryError::duplicate_email())
    } else {
        None
    }
}
