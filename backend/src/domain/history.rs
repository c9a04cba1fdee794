//! Per-user history of generated analogies.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{AnalogyRequest, AnalogyResult, UserId};

/// Identifier of a stored history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HistoryEntryId(Uuid);

impl HistoryEntryId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for HistoryEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HistoryEntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

/// Input for appending a history entry; id and timestamp are assigned on
/// append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryEntry {
    /// Owning user.
    pub user_id: UserId,
    /// Validated topic and interest.
    pub request: AnalogyRequest,
    /// Result being recorded.
    pub result: AnalogyResult,
}

/// A persisted history record.
///
/// Entries are append-only and belong to exactly one user. The only mutation
/// is deletion by that owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Entry identifier.
    pub id: HistoryEntryId,
    /// Owning user.
    pub user_id: UserId,
    /// Topic as submitted, trimmed.
    pub topic: String,
    /// Interest as submitted, trimmed.
    pub interest: String,
    /// Recorded result.
    pub result: AnalogyResult,
    /// Assigned at append time.
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Materialise a new entry from its input, id and timestamp.
    pub fn from_new(entry: NewHistoryEntry, id: HistoryEntryId, created_at: DateTime<Utc>) -> Self {
        let NewHistoryEntry {
            user_id,
            request,
            result,
        } = entry;
        Self {
            id,
            user_id,
            topic: request.topic().to_owned(),
            interest: request.interest().to_owned(),
            result,
            created_at,
        }
    }
}

/// Number of entries returned by a listing.
///
/// Values are clamped into `1..=MAX`, so callers can pass user input directly.
///
/// # Examples
/// ```
/// use analogy_backend::domain::HistoryLimit;
///
/// assert_eq!(HistoryLimit::default().get(), 50);
/// assert_eq!(HistoryLimit::new(0).get(), 1);
/// assert_eq!(HistoryLimit::new(10_000).get(), HistoryLimit::MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimit(u32);

impl HistoryLimit {
    /// Default page size.
    pub const DEFAULT: u32 = 50;
    /// Largest page size served.
    pub const MAX: u32 = 100;

    /// Clamp `value` into the accepted range.
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, Self::MAX))
    }

    /// The clamped value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The clamped value as a slice length.
    pub fn as_usize(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}

impl Default for HistoryLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}
