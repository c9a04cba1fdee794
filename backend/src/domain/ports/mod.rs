//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`TextGenerator`, `HistoryRepository`, `AccountRepository`,
//! `PasswordHasher`) are implemented by outbound adapters. Driving ports
//! (`AnalogyCommand`, `HistoryCommand`, `HistoryQuery`, `LoginService`,
//! `SignUpCommand`, `AccountQuery`) are implemented by domain services and
//! called from inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_query;
mod account_repository;
mod analogy_command;
mod history_command;
mod history_query;
mod history_repository;
mod login_service;
mod password_hasher;
mod sign_up_command;
mod text_generator;

pub use account_query::AccountQuery;
#[cfg(test)]
pub use account_query::MockAccountQuery;
pub(crate) use account_repository::duplicate_of;
#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
pub use analogy_command::AnalogyCommand;
#[cfg(test)]
pub use analogy_command::MockAnalogyCommand;
pub use history_command::HistoryCommand;
#[cfg(test)]
pub use history_command::MockHistoryCommand;
pub use history_query::HistoryQuery;
#[cfg(test)]
pub use history_query::MockHistoryQuery;
#[cfg(test)]
pub use history_repository::MockHistoryRepository;
pub use history_repository::{HistoryRepository, HistoryRepositoryError};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use sign_up_command::MockSignUpCommand;
pub use sign_up_command::SignUpCommand;
#[cfg(test)]
pub use text_generator::MockTextGenerator;
pub use text_generator::{FixtureTextGenerator, TextGenerator, TextGeneratorError};
