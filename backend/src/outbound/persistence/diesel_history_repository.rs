//! PostgreSQL-backed `HistoryRepository` implementation using Diesel ORM.
//!
//! Results are stored as JSONB and decoded back through serde on read. A row
//! whose JSON no longer matches the result shape is reported as a query error
//! instead of being silently dropped.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{HistoryRepository, HistoryRepositoryError};
use crate::domain::{AnalogyResult, HistoryEntry, HistoryEntryId, HistoryLimit, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{HistoryEntryRow, NewHistoryEntryRow};
use super::pool::{DbPool, PoolError};
use super::schema::history_entries;

/// Diesel-backed implementation of the `HistoryRepository` port.
#[derive(Clone)]
pub struct DieselHistoryRepository {
    pool: DbPool,
}

impl DieselHistoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HistoryRepositoryError {
    map_basic_pool_error(error, HistoryRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> HistoryRepositoryError {
    map_basic_diesel_error(
        error,
        HistoryRepositoryError::query,
        HistoryRepositoryError::connection,
    )
}

fn row_to_entry(row: HistoryEntryRow) -> Result<HistoryEntry, HistoryRepositoryError> {
    let result: AnalogyResult = serde_json::from_value(row.result).map_err(|err| {
        warn!(entry_id = %row.id, error = %err, "stored history result failed to decode");
        HistoryRepositoryError::query(format!("history entry {} is corrupt: {err}", row.id))
    })?;
    Ok(HistoryEntry {
        id: HistoryEntryId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        topic: row.topic,
        interest: row.interest,
        result,
        created_at: row.created_at,
    })
}

#[async_trait]
impl HistoryRepository for DieselHistoryRepository {
    async fn append(&self, entry: &HistoryEntry) -> Result<(), HistoryRepositoryError> {
        let result = serde_json::to_value(&entry.result).map_err(|err| {
            HistoryRepositoryError::query(format!("failed to serialise result: {err}"))
        })?;
        let row = NewHistoryEntryRow {
            id: *entry.id.as_uuid(),
            user_id: *entry.user_id.as_uuid(),
            topic: entry.topic.as_str(),
            interest: entry.interest.as_str(),
            result,
            created_at: entry.created_at,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(history_entries::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: HistoryLimit,
    ) -> Result<Vec<HistoryEntry>, HistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<HistoryEntryRow> = history_entries::table
            .filter(history_entries::user_id.eq(user_id.as_uuid()))
            .order((history_entries::created_at.desc(), history_entries::id.desc()))
            .limit(i64::from(limit.get()))
            .select(HistoryEntryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_entry).collect()
    }

    async fn delete_for_owner(
        &self,
        id: &HistoryEntryId,
        user_id: &UserId,
    ) -> Result<bool, HistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Ownership and existence are one predicate so a foreign id and a
        // missing id are indistinguishable.
        let deleted = diesel::delete(
            history_entries::table
                .filter(history_entries::id.eq(id.as_uuid()))
                .filter(history_entries::user_id.eq(user_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
