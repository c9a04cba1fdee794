//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.
//!
//! Uniqueness is enforced by the `accounts_username_key` and
//! `accounts_email_key` constraints; violations map to the matching duplicate
//! error so concurrent sign-ups cannot both succeed.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, EmailAddress, PasswordHash, UserId, Username};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation_constraint,
};
use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

const USERNAME_CONSTRAINT: &str = "accounts_username_key";
const EMAIL_CONSTRAINT: &str = "accounts_email_key";

/// Diesel-backed implementation of the `AccountRepository` port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_one(
        &self,
        query: accounts::BoxedQuery<'static, Pg>,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AccountRow> = query
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    map_basic_pool_error(error, AccountRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    match unique_violation_constraint(&error) {
        Some(USERNAME_CONSTRAINT) => return AccountRepositoryError::duplicate_username(),
        Some(EMAIL_CONSTRAINT) => return AccountRepositoryError::duplicate_email(),
        _ => {}
    }
    map_basic_diesel_error(
        error,
        AccountRepositoryError::query,
        AccountRepositoryError::connection,
    )
}

fn row_to_account(row: AccountRow) -> Result<Account, AccountRepositoryError> {
    let corrupt = |field: &str, err: &dyn std::fmt::Display| {
        warn!(account_id = %row.id, field, error = %err, "stored account failed validation");
        AccountRepositoryError::query(format!("account {} has invalid {field}", row.id))
    };
    let username = Username::new(&row.username).map_err(|err| corrupt("username", &err))?;
    let email = EmailAddress::new(&row.email).map_err(|err| corrupt("email", &err))?;
    Ok(Account {
        id: UserId::from_uuid(row.id),
        username,
        email,
        password_hash: PasswordHash::new(row.password_hash),
        is_verified: row.is_verified,
        created_at: row.created_at,
    })
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn create(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let row = NewAccountRow {
            id: *account.id.as_uuid(),
            username: account.username.as_ref(),
            email: account.email.as_ref(),
            password_hash: account.password_hash.as_ref(),
            is_verified: account.is_verified,
            created_at: account.created_at,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(accounts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let query = accounts::table
            .filter(accounts::username.eq(username.to_owned()))
            .into_boxed();
        self.find_one(query).await
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let query = accounts::table
            .filter(accounts::email.eq(email.as_ref().to_owned()))
            .into_boxed();
        self.find_one(query).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, AccountRepositoryError> {
        let query = accounts::table
            .filter(accounts::id.eq(*id.as_uuid()))
            .into_boxed();
        self.find_one(query).await
    }
}

#[cfg(test)]
mod tests {
    //! Row mapping coverage for the account adapter.
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn row(username: &str, email: &str) -> AccountRow {
        AccountRow {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            email: email.to_owned(),
            password_hash: "$argon2id$v=19$stub".to_owned(),
            is_verified: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn maps_valid_rows() {
        let account = row_to_account(row("ada_l", "ada@example.com")).expect("valid row");
        assert_eq!(account.username.as_ref(), "ada_l");
        assert!(account.is_verified);
    }

    #[test]
    fn invalid_stored_values_are_query_errors() {
        let error = row_to_account(row("ada_l", "not-an-email")).expect_err("corrupt");
        assert!(matches!(error, AccountRepositoryError::Query { .. }));
    }
}
