//! Application settings loaded via OrthoConfig.
//!
//! Values are layered from `ANALOGY_*` environment variables, an optional
//! configuration file and command-line flags. Everything is optional: the
//! accessors below supply defaults, and the absence of a database URL or a
//! Gemini key selects the in-memory and fixture adapters respectively.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::{AnalogyServiceConfig, HistoryLimit, PromptStrategy, UnknownPromptStrategy};
use crate::outbound::generative::GeminiSettings;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Top-level server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ANALOGY")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Gemini API key.
    pub gemini_api_key: Option<String>,
    /// Gemini model name.
    pub gemini_model: Option<String>,
    /// Gemini API base URL.
    pub gemini_endpoint: Option<String>,
    /// Whole-request timeout for generative calls, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Attempts per generation, including the first.
    pub max_attempts: Option<u32>,
    /// First retry delay after an upstream failure, in milliseconds.
    pub initial_backoff_ms: Option<u64>,
    /// Retry delay cap, in milliseconds.
    pub max_backoff_ms: Option<u64>,
    /// `single` or `two-call`.
    pub prompt_strategy: Option<String>,
    /// Page size for `GET /history` without `limit`.
    ///
    /// Carries a default so an empty environment still merges into a map.
    #[ortho_config(default = 50)]
    pub history_limit: u32,
}

/// Settings that parsed but do not make sense.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address '{value}': {message}")]
    BindAddr { value: String, message: String },
    /// `prompt_strategy` names no known strategy.
    #[error(transparent)]
    PromptStrategy(#[from] UnknownPromptStrategy),
}

impl AppSettings {
    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|error: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: error.to_string(),
        })
    }

    /// Pool settings, present only when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref().filter(|url| !url.trim().is_empty())?;
        Some(
            PoolConfig::new(url)
                .with_max_size(self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)),
        )
    }

    /// Gemini adapter settings, present only when an API key is configured.
    pub fn gemini_settings(&self) -> Option<GeminiSettings> {
        let key = self
            .gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())?;
        Some(GeminiSettings {
            endpoint: self
                .gemini_endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_owned()),
            model: self
                .gemini_model
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_owned()),
            api_key: Zeroizing::new(key.to_owned()),
            timeout: Duration::from_secs(
                self.request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        })
    }

    /// Generation retry and prompt settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::PromptStrategy`] for an unknown strategy name.
    pub fn analogy_config(&self) -> Result<AnalogyServiceConfig, SettingsError> {
        let defaults = AnalogyServiceConfig::default();
        let strategy = match self.prompt_strategy.as_deref() {
            Some(raw) => raw.parse()?,
            None => PromptStrategy::default(),
        };
        Ok(AnalogyServiceConfig {
            strategy,
            max_attempts: self.max_attempts.unwrap_or(defaults.max_attempts),
            initial_backoff: self
                .initial_backoff_ms
                .map_or(defaults.initial_backoff, Duration::from_millis),
            max_backoff: self
                .max_backoff_ms
                .map_or(defaults.max_backoff, Duration::from_millis),
        })
    }

    /// Default history page size.
    pub fn history_limit(&self) -> HistoryLimit {
        HistoryLimit::new(self.history_limit)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings layering and defaults.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 12] = [
        "ANALOGY_BIND_ADDR",
        "ANALOGY_DATABASE_URL",
        "ANALOGY_DB_MAX_CONNECTIONS",
        "ANALOGY_GEMINI_API_KEY",
        "ANALOGY_GEMINI_MODEL",
        "ANALOGY_GEMINI_ENDPOINT",
        "ANALOGY_REQUEST_TIMEOUT_SECS",
        "ANALOGY_MAX_ATTEMPTS",
        "ANALOGY_INITIAL_BACKOFF_MS",
        "ANALOGY_MAX_BACKOFF_MS",
        "ANALOGY_PROMPT_STRATEGY",
        "ANALOGY_HISTORY_LIMIT",
    ];

    fn load_with(overrides: &[(&'static str, &str)]) -> AppSettings {
        let _guard = lock_env(VARS.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        }));
        AppSettings::load_from_iter([OsString::from("analogy-backend")])
            .expect("settings should load")
    }

    #[rstest]
    fn defaults_select_fixture_and_memory_adapters() {
        let settings = load_with(&[]);

        assert_eq!(
            settings.bind_addr().expect("default bind"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.pool_config().is_none());
        assert!(settings.gemini_settings().is_none());
        assert_eq!(
            settings.analogy_config().expect("default config"),
            AnalogyServiceConfig::default()
        );
        assert_eq!(settings.history_limit(), HistoryLimit::default());
        assert_eq!(settings.history_limit, HistoryLimit::DEFAULT);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("ANALOGY_BIND_ADDR", "127.0.0.1:9000"),
            ("ANALOGY_DATABASE_URL", "postgres://analogy@localhost/analogy"),
            ("ANALOGY_GEMINI_API_KEY", "test-key"),
            ("ANALOGY_GEMINI_MODEL", "gemini-pro"),
            ("ANALOGY_MAX_ATTEMPTS", "4"),
            ("ANALOGY_INITIAL_BACKOFF_MS", "10"),
            ("ANALOGY_PROMPT_STRATEGY", "two-call"),
            ("ANALOGY_HISTORY_LIMIT", "500"),
        ]);

        assert_eq!(
            settings.bind_addr().expect("bind").port(),
            9000
        );
        assert_eq!(
            settings.pool_config().expect("pool").database_url(),
            "postgres://analogy@localhost/analogy"
        );
        let gemini = settings.gemini_settings().expect("gemini");
        assert_eq!(gemini.model, "gemini-pro");
        assert_eq!(gemini.endpoint, DEFAULT_GEMINI_ENDPOINT);
        let config = settings.analogy_config().expect("config");
        assert_eq!(config.max_attempts, 4);
        assert_eq!(config.initial_backoff, Duration::from_millis(10));
        assert_eq!(config.strategy, PromptStrategy::TwoCall);
        assert_eq!(settings.history_limit().get(), HistoryLimit::MAX);
    }

    #[rstest]
    #[case::blank_key("ANALOGY_GEMINI_API_KEY", "   ")]
    #[case::blank_url("ANALOGY_DATABASE_URL", "")]
    fn blank_values_disable_adapters(#[case] name: &'static str, #[case] value: &str) {
        let settings = load_with(&[(name, value)]);
        assert!(settings.gemini_settings().is_none());
        assert!(settings.pool_config().is_none());
    }

    #[rstest]
    fn invalid_values_are_reported() {
        let settings = load_with(&[
            ("ANALOGY_BIND_ADDR", "localhost"),
            ("ANALOGY_PROMPT_STRATEGY", "three-call"),
        ]);
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
        assert!(matches!(
            settings.analogy_config(),
            Err(SettingsError::PromptStrategy(_))
        ));
    }
}
