//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module assembles the same `/api/v1` surface the server binary exposes, over
//! in-memory adapters and an injectable text generator. The PostgreSQL
//! helpers back the Diesel repository suites.

#![allow(
    dead_code,
    unused_imports,
    reason = "each test crate uses a different subset"
)]

mod cluster_skip;
mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{migrate_schema, reset_database, seed_account};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use actix_session::SessionMiddleware;
use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;
use mockable::DefaultClock;
use serde_json::{Value, json};

use analogy_backend::Trace;
use analogy_backend::domain::ports::{TextGenerator, TextGeneratorError};
use analogy_backend::domain::{
    AccountService, AnalogyService, AnalogyServiceConfig, HistoryLimit, HistoryService, Prompt,
};
use analogy_backend::inbound::http::error::{json_config, query_config};
use analogy_backend::inbound::http::generate::generate;
use analogy_backend::inbound::http::history::{delete_history, list_history, save_history};
use analogy_backend::inbound::http::state::HttpState;
use analogy_backend::inbound::http::users::{current_user, login, logout, sign_up};
use analogy_backend::outbound::memory::{InMemoryAccountRepository, InMemoryHistoryRepository};
use analogy_backend::outbound::password::Argon2PasswordHasher;

pub const PASSWORD: &str = "Str0ng&Secret";

/// Generator replaying canned answers and recording every prompt it saw.
#[derive(Default)]
pub struct ScriptedGenerator {
    answers: Mutex<VecDeque<Result<String, TextGeneratorError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(answers: impl IntoIterator<Item = Result<String, TextGeneratorError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log").clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, prompt: &Prompt) -> Result<String, TextGeneratorError> {
        self.prompts
            .lock()
            .expect("prompt log")
            .push(prompt.as_str().to_owned());
        self.answers
            .lock()
            .expect("answer queue")
            .pop_front()
            .unwrap_or_else(|| Err(TextGeneratorError::transport("no scripted answer left")))
    }
}

/// Handler state over in-memory repositories and `generator`.
pub fn memory_state(generator: Arc<dyn TextGenerator>) -> HttpState {
    let clock = Arc::new(DefaultClock);
    let analogies = Arc::new(AnalogyService::new(
        generator,
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

/// The API scope as wired by the server, minus Swagger and probes.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .build();

    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session)
                .app_data(json_config())
                .app_data(query_config())
                .service(generate)
                .service(list_history)
                .service(save_history)
                .service(delete_history)
                .service(sign_up)
                .service(login)
                .service(logout)
                .service(current_user),
        )
}

/// The `session` cookie carried by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// A model answer for `concept`/`domain` wrapped in a fenced block with
/// surrounding whitespace, as chat models tend to produce.
pub fn fenced_answer(concept: &str, domain: &str) -> String {
    let mappings: Vec<Value> = [
        ("Base case", "The kick"),
        ("Call stack", "Dream levels"),
        ("Stack overflow", "Limbo"),
    ]
    .iter()
    .map(|(term, analogy)| {
        json!({
            "technical_term": term,
            "technical_definition": format!("{term} in {concept}."),
            "analogy_term": analogy,
            "analogy_explanation": format!("{analogy} plays the role of {term}."),
            "code_analogy_left": "f(n - 1)",
            "code_analogy_right": "dream(level + 1)",
        })
    })
    .collect();
    let body = json!({
        "analogy": format!("{concept} is a dream within a dream, as in {domain}."),
        "raw_mapping": { "concept": concept, "domain": domain, "mappings": mappings },
    });
    format!("\n```json\n{body:#}\n```\n  ")
}

/// Render a `postgres` error with its SQLSTATE, detail and hint.
///
/// `Display` alone collapses server errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!("postgres error {:?}: {}", db_error.code(), db_error.message());
    for (label, part) in [("detail", db_error.detail()), ("hint", db_error.hint())] {
        if let Some(text) = part {
            summary.push_str(&format!("; {label}: {text}"));
        }
    }
    summary
}
