//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **generative**: Gemini `generateContent` client behind `TextGenerator`
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: process-local repositories for database-less runs
//! - **password**: Argon2id credential hashing
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod generative;
pub mod memory;
pub mod password;
pub mod persistence;
