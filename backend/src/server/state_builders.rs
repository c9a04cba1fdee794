//! Builders wiring domain services onto outbound adapters.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use analogy_backend::domain::ports::{AccountRepository, HistoryRepository};
use analogy_backend::domain::{AccountService, AnalogyService, HistoryService};
use analogy_backend::inbound::http::state::HttpState;
use analogy_backend::outbound::memory::{InMemoryAccountRepository, InMemoryHistoryRepository};
use analogy_backend::outbound::password::Argon2PasswordHasher;
use analogy_backend::outbound::persistence::{DieselAccountRepository, DieselHistoryRepository};

use super::ServerConfig;

/// Build handler state, backed by PostgreSQL when a pool is configured and by
/// process memory otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            info!("storing accounts and history in PostgreSQL");
            wire_services(
                config,
                Arc::new(DieselAccountRepository::new(pool.clone())),
                Arc::new(DieselHistoryRepository::new(pool.clone())),
            )
        }
        None => {
            info!("no database configured; accounts and history live in memory");
            wire_services(
                config,
                Arc::new(InMemoryAccountRepository::default()),
                Arc::new(InMemoryHistoryRepository::default()),
            )
        }
    }
}

fn wire_services<A, R>(config: &ServerConfig, accounts: Arc<A>, history: Arc<R>) -> HttpState
where
    A: AccountRepository + 'static,
    R: HistoryRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let analogies = Arc::new(AnalogyService::new(
        config.generator.clone(),
        clock.clone(),
        config.analogy.clone(),
    ));
    let history = Arc::new(HistoryService::new(history, clock.clone()));
    let accounts = Arc::new(AccountService::new(
        accounts,
        Arc::new(Argon2PasswordHasher),
        clock,
    ));
    HttpState {
        analogies,
        history: history.clone(),
        history_query: history,
        login: accounts.clone(),
        sign_up: accounts.clone(),
        accounts,
        history_limit: config.history_limit,
    }
}
