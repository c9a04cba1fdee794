//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the history and account
//! repository ports backed by PostgreSQL via the Diesel ORM with async support
//! through `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: All database errors are mapped to port error
//!   types; unique violations become duplicate-account errors.
//!
//! # Example
//!
//! ```ignore
//! use analogy_backend::outbound::persistence::{DbPool, DieselHistoryRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/analogies")).await?;
//! let repo = DieselHistoryRepository::new(pool);
//! ```

mod diesel_account_repository;
mod diesel_basic_error_mapping;
mod diesel_history_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_history_repository::DieselHistoryRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
