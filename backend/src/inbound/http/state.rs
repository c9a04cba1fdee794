//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::HistoryLimit;
use crate::domain::ports::{
    AccountQuery, AnalogyCommand, HistoryCommand, HistoryQuery, LoginService, SignUpCommand,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use analogy_backend::domain::ports::FixtureTextGenerator;
/// use analogy_backend::domain::{
///     AccountService, AnalogyService, AnalogyServiceConfig, HistoryLimit, HistoryService,
/// };
/// use analogy_backend::inbound::http::state::HttpState;
/// use analogy_backend::outbound::memory::{
///     InMemoryAccountRepository, InMemoryHistoryRepository,
/// };
/// use analogy_backend::outbound::password::Argon2PasswordHasher;
/// use mockable::DefaultClock;
///
/// let clock = Arc::new(DefaultClock);
/// let history = Arc::new(HistoryService::new(
///     Arc::new(InMemoryHistoryRepository::default()),
///     clock.clone(),
/// ));
/// let accounts = Arc::new(AccountService::new(
///     Arc::new(InMemoryAccountRepository::default()),
///     Arc::new(Argon2PasswordHasher),
///     clock.clone(),
/// ));
/// let state = HttpState {
///     analogies: Arc::new(AnalogyService::new(
///         Arc::new(FixtureTextGenerator),
///         clock,
///         AnalogyServiceConfig::default(),
///     )),
///     history: history.clone(),
///     history_query: history,
///     login: accounts.clone(),
///     sign_up: accounts.clone(),
///     accounts,
///     history_limit: HistoryLimit::default(),
/// };
/// let _login = state.login.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    /// Analogy generation.
    pub analogies: Arc<dyn AnalogyCommand>,
    /// History writes.
    pub history: Arc<dyn HistoryCommand>,
    /// History reads.
    pub history_query: Arc<dyn HistoryQuery>,
    /// Credential checks.
    pub login: Arc<dyn LoginService>,
    /// Account registration.
    pub sign_up: Arc<dyn SignUpCommand>,
    /// Account profile lookup.
    pub accounts: Arc<dyn AccountQuery>,
    /// Page size used when `GET /history` omits `limit`.
    pub history_limit: HistoryLimit,
}
