//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes a table.

diesel::table! {
    /// Registered accounts.
    ///
    /// `username` and `email` carry unique constraints named
    /// `accounts_username_key` and `accounts_email_key`.
    accounts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique public handle (2 to 30 characters).
        username -> Varchar,
        /// Unique, lowercased email address.
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// Only verified accounts may log in.
        is_verified -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only analogy history, one row per saved generation.
    history_entries (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning account.
        user_id -> Uuid,
        /// Topic as submitted, trimmed.
        topic -> Text,
        /// Interest as submitted, trimmed.
        interest -> Text,
        /// Serialised analogy result.
        result -> Jsonb,
        /// Append timestamp; listings sort on it descending.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(history_entries -> accounts (user_id));
diesel::allow_tables_to_appear_in_same_query!(accounts, history_entries);
