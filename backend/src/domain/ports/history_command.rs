//! Driving port for history mutations.

use async_trait::async_trait;

use crate::domain::{AnalogyRequest, AnalogyResult, Error, HistoryEntry, HistoryEntryId, UserId};

/// Domain use-case port for appending to and deleting from a user's history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryCommand: Send + Sync {
    /// Record a result for `user_id`, assigning the id and timestamp.
    async fn append(
        &self,
        user_id: &UserId,
        request: AnalogyRequest,
        result: AnalogyResult,
    ) -> Result<HistoryEntry, Error>;

    /// Remove an entry owned by `user_id`.
    ///
    /// Unknown ids and ids owned by another user both produce `not_found`.
    async fn delete(&self, user_id: &UserId, id: &HistoryEntryId) -> Result<(), Error>;
}
