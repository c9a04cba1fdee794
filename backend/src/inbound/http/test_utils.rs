//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use mockable::DefaultClock;

use crate::domain::ports::FixtureTextGenerator;
use crate::domain::{
    AccountService, AnalogyService, AnalogyServiceConfig, HistoryLimit, HistoryService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryAccountRepository, InMemoryHistoryRepository};
use crate::outbound::password::Argon2PasswordHasher;

/// Build a session middleware configured for tests.
///
/// A fresh key per invocation, cookie name `session`, and no `Secure` flag so
/// plain-HTTP test requests carry the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Handler state wired to the fixture generator and in-memory repositories.
pub fn fixture_state() -> HttpState {
    let clock = Arc::new(DefaultClock);
    let analogies = Arc::new(AnalogyService::new(
        Arc::new(FixtureTextGenerator),
        clock.clone(),
        AnalogyServiceConfig::default(),
    ));
    let history = Arc::new(HistoryService::new(
        Arc::new(InMemoryHistoryRepository::default()),
        clock.clone(),
    ));
    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryAccountRepository::default()),
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
        history_limit: HistoryLimit::default(),
    }
}
