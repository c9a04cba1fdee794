//! Driven port for per-user history persistence.
//!
//! Every operation is scoped by the owning [`UserId`]; adapters must never
//! return or remove another user's entries.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{HistoryEntry, HistoryEntryId, HistoryLimit, UserId};

define_port_error! {
    /// Persistence errors raised by history repository adapters.
    pub enum HistoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "history repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "history repository query failed: {message}",
    }
}

/// Port for storing and reading history entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Persist a fully materialised entry.
    async fn append(&self, entry: &HistoryEntry) -> Result<(), HistoryRepositoryError>;

    /// Return up to `limit` entries owned by `user_id`, newest first.
    ///
    /// Ties on `created_at` are broken by descending entry id so pages are
    /// stable.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: HistoryLimit,
    ) -> Result<Vec<HistoryEntry>, HistoryRepositoryError>;

    /// Delete the entry only when `user_id` owns it.
    ///
    /// Returns `false` when nothing matched, whether the id is unknown or
    /// belongs to someone else. The ownership check and the delete must be a
    /// single atomic operation.
    async fn delete_for_owner(
        &self,
        id: &HistoryEntryId,
        user_id: &UserId,
    ) -> Result<bool, HistoryRepositoryError>;
}
