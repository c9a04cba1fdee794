//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{accounts, history_entries};

/// Row struct for reading from the accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the history_entries table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = history_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HistoryEntryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub topic: String,
    pub interest: String,
    pub result: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for appending history records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = history_entries)]
pub(crate) struct NewHistoryEntryRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub topic: &'a str,
    pub interest: &'a str,
    pub result: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
