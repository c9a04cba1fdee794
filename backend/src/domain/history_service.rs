//! History domain services.
//!
//! Implements the history driving ports on top of [`HistoryRepository`],
//! assigning ids and timestamps and translating repository failures into
//! transport-level errors.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    HistoryCommand, HistoryQuery, HistoryRepository, HistoryRepositoryError,
};
use crate::domain::{
    AnalogyRequest, AnalogyResult, Error, HistoryEntry, HistoryEntryId, HistoryLimit,
    NewHistoryEntry, UserId,
};

/// History service implementing [`HistoryCommand`] and [`HistoryQuery`].
#[derive(Clone)]
pub struct HistoryService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> HistoryService<R> {
    /// Create a new service with the given repository and clock.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

impl<R> HistoryService<R>
where
    R: HistoryRepository,
{
    fn map_repository_error(error: HistoryRepositoryError) -> Error {
        match error {
            HistoryRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("history store unavailable: {message}"))
            }
            HistoryRepositoryError::Query { message } => {
                Error::internal(format!("history store error: {message}"))
            }
        }
    }
}

#[async_trait]
impl<R> HistoryCommand for HistoryService<R>
where
    R: HistoryRepository,
{
    async fn append(
        &self,
        user_id: &UserId,
        request: AnalogyRequest,
        result: AnalogyResult,
    ) -> Result<HistoryEntry, Error> {
        let entry = HistoryEntry::from_new(
            NewHistoryEntry {
                user_id: user_id.clone(),
                request,
                result,
            },
            HistoryEntryId::random(),
            self.clock.utc(),
        );
        self.repository
            .append(&entry)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(entry)
    }

    async fn delete(&self, user_id: &UserId, id: &HistoryEntryId) -> Result<(), Error> {
        let deleted = self
            .repository
            .delete_for_owner(id, user_id)
            .await
            .map_err(Self::map_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found("History entry not found"))
        }
    }
}

#[async_trait]
impl<R> HistoryQuery for HistoryService<R>
where
    R: HistoryRepository,
{
    async fn list(
        &self,
        user_id: &UserId,
        limit: HistoryLimit,
    ) -> Result<Vec<HistoryEntry>, Error> {
        self.repository
            .list_for_user(user_id, limit)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[cfg(test)]
#[path = "history_service_tests.rs"]
mod tests;
