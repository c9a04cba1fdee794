//! Mutex-guarded in-memory `HistoryRepository`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{HistoryRepository, HistoryRepositoryError};
use crate::domain::{HistoryEntry, HistoryEntryId, HistoryLimit, UserId};

/// In-memory history store keyed by nothing but insertion order.
#[derive(Debug, Default)]
pub struct InMemoryHistoryRepository {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl InMemoryHistoryRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<HistoryEntry>>, HistoryRepositoryError> {
        self.entries
            .lock()
            .map_err(|_| HistoryRepositoryError::connection("history store lock poisoned"))
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn append(&self, entry: &HistoryEntry) -> Result<(), HistoryRepositoryError> {
        self.lock()?.push(entry.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: HistoryLimit,
    ) -> Result<Vec<HistoryEntry>, HistoryRepositoryError> {
        let guard = self.lock()?;
        let mut owned: Vec<HistoryEntry> = guard
            .iter()
            .filter(|entry| entry.user_id == *user_id)
            .cloned()
            .collect();
        drop(guard);
        owned.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        owned.truncate(limit.as_usize());
        Ok(owned)
    }

    async fn delete_for_owner(
        &self,
        id: &HistoryEntryId,
        user_id: &UserId,
    ) -> Result<bool, HistoryRepositoryError> {
        let mut guard = self.lock()?;
        let before = guard.len();
        guard.retain(|entry| !(entry.id == *id && entry.user_id == *user_id));
        Ok(guard.len() < before)
    }
}
