//! Driving port for history reads.

use async_trait::async_trait;

use crate::domain::{Error, HistoryEntry, HistoryLimit, UserId};

/// Domain use-case port for listing a user's history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryQuery: Send + Sync {
    /// Return the newest `limit` entries for `user_id`.
    async fn list(&self, user_id: &UserId, limit: HistoryLimit)
    -> Result<Vec<HistoryEntry>, Error>;
}
