//! Account domain services: sign-up, login and the current-account lookup.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    AccountQuery, AccountRepository, AccountRepositoryError, LoginService, PasswordHasher,
    PasswordHasherError, SignUpCommand,
};
use crate::domain::{
    Account, EmailAddress, Error, LoginCredentials, Password, PasswordHash, SignUp, UserId,
};

/// Account service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountService<A> {
    accounts: Arc<A>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl<A> AccountService<A> {
    /// Create a new service with the given repository, hasher and clock.
    pub fn new(accounts: Arc<A>, hasher: Arc<dyn PasswordHasher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts,
            hasher,
            clock,
        }
    }
}

impl<A> AccountService<A>
where
    A: AccountRepository,
{
    fn map_repository_error(error: AccountRepositoryError) -> Error {
        match error {
            AccountRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("account store unavailable: {message}"))
            }
            AccountRepositoryError::Query { message } => {
                Error::internal(format!("account store error: {message}"))
            }
            AccountRepositoryError::DuplicateUsername => Error::conflict("Username already taken")
                .with_details(json!({ "field": "username", "code": "duplicate_username" })),
            AccountRepositoryError::DuplicateEmail => Error::conflict("Email already registered")
                .with_details(json!({ "field": "email", "code": "duplicate_email" })),
        }
    }

    fn map_hasher_error(error: &PasswordHasherError) -> Error {
        Error::internal(format!("credential check failed: {error}"))
    }

    fn invalid_credentials() -> Error {
        Error::unauthorized("invalid credentials")
    }

    async fn hash(&self, password: Password) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(|err| Self::map_hasher_error(&err))
    }

    async fn verify(&self, candidate: &str, hash: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let candidate = zeroize::Zeroizing::new(candidate.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(candidate.as_str(), &hash))
            .await
            .map_err(|err| Error::internal(format!("password check task failed: {err}")))?
            .map_err(|err| Self::map_hasher_error(&err))
    }

    async fn lookup(&self, credentials: &LoginCredentials) -> Result<Option<Account>, Error> {
        let found = if credentials.is_email() {
            match EmailAddress::new(credentials.identifier()) {
                Ok(email) => self.accounts.find_by_email(&email).await,
                Err(_) => return Ok(None),
            }
        } else {
            self.accounts.find_by_username(credentials.identifier()).await
        };
        found.map_err(Self::map_repository_error)
    }
}

#[async_trait]
impl<A> SignUpCommand for AccountService<A>
where
    A: AccountRepository,
{
    async fn sign_up(&self, request: SignUp) -> Result<Account, Error> {
        let SignUp {
            username,
            email,
            password,
        } = request;
        let password_hash = self.hash(password).await?;
        let account = Account {
            id: UserId::random(),
            username,
            email,
            password_hash,
            is_verified: true,
            created_at: self.clock.utc(),
        };
        self.accounts
            .create(&account)
            .await
            .map_err(Self::map_repository_error)?;
        info!(user_id = %account.id, username = %account.username, "account created");
        Ok(account)
    }
}

#[async_trait]
impl<A> LoginService for AccountService<A>
where
    A: AccountRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Some(account) = self.lookup(credentials).await? else {
            return Err(Self::invalid_credentials());
        };
        if !self
            .verify(credentials.password(), account.password_hash.clone())
            .await?
        {
            return Err(Self::invalid_credentials());
        }
        if !account.is_verified {
            warn!(user_id = %account.id, "login refused for unverified account");
            return Err(Error::unauthorized("email not verified"));
        }
        Ok(account.id)
    }
}

#[async_trait]
impl<A> AccountQuery for AccountService<A>
where
    A: AccountRepository,
{
    async fn fetch_account(&self, user_id: &UserId) -> Result<Account, Error> {
        self.accounts
            .find_by_id(user_id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("account not found"))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
