//! Process-local repository adapters.
//!
//! Used when no database is configured and by integration tests. Contents are
//! lost on restart; ownership rules match the PostgreSQL adapters exactly.

mod account;
mod history;

pub use account::InMemoryAccountRepository;
pub use history::InMemoryHistoryRepository;
