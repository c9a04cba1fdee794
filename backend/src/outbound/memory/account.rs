//! Mutex-guarded in-memory `AccountRepository`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{AccountRepository, AccountRepositoryError, duplicate_of};
use crate::domain::{Account, EmailAddress, UserId};

/// In-memory account store keyed by account id.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<UserId, Account>>,
}

impl InMemoryAccountRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, Account>>, AccountRepositoryError> {
        self.accounts
            .lock()
            .map_err(|_| AccountRepositoryError::connection("account store lock poisoned"))
    }

    fn find_where(
        &self,
        predicate: impl Fn(&Account) -> bool,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(self.lock()?.values().find(|account| predicate(account)).cloned())
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let mut guard = self.lock()?;
        // Check and insert under one lock so concurrent sign-ups cannot race.
        if let Some(duplicate) = guard
            .values()
            .find_map(|existing| duplicate_of(existing, &account.username, &account.email))
        {
            return Err(duplicate);
        }
        guard.insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        self.find_where(|account| account.username.as_ref() == username)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        self.find_where(|account| account.email == *email)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(self.lock()?.get(id).cloned())
    }
}
