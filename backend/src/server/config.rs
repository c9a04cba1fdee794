//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use analogy_backend::domain::ports::{FixtureTextGenerator, TextGenerator};
use analogy_backend::domain::{AnalogyServiceConfig, HistoryLimit};
use analogy_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) generator: Arc<dyn TextGenerator>,
    pub(crate) analogy: AnalogyServiceConfig,
    pub(crate) history_limit: HistoryLimit,
}

impl ServerConfig {
    /// Configuration with in-memory storage and the fixture generator.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            generator: Arc::new(FixtureTextGenerator),
            analogy: AnalogyServiceConfig::default(),
            history_limit: HistoryLimit::default(),
        }
    }

    /// Store accounts and history in PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Answer generations with `generator`.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Prompt strategy and retry policy for generations.
    #[must_use]
    pub fn with_analogy_config(mut self, config: AnalogyServiceConfig) -> Self {
        self.analogy = config;
        self
    }

    /// Page size for history listings without an explicit limit.
    #[must_use]
    pub fn with_history_limit(mut self, limit: HistoryLimit) -> Self {
        self.history_limit = limit;
        self
    }
}
