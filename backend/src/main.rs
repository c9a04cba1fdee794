//! Backend entry-point: loads settings, prepares adapters and runs the server.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use analogy_backend::domain::ports::{FixtureTextGenerator, TextGenerator};
use analogy_backend::inbound::http::health::HealthState;
use analogy_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use analogy_backend::outbound::generative::GeminiHttpSource;
use analogy_backend::outbound::persistence::{DbPool, run_migrations};
use analogy_backend::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(std::io::Error::other)?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr().map_err(std::io::Error::other)?,
    )
    .with_generator(build_generator(&settings)?)
    .with_analogy_config(settings.analogy_config().map_err(std::io::Error::other)?)
    .with_history_limit(settings.history_limit());

    if let Some(pool_config) = settings.pool_config() {
        let url = pool_config.database_url().to_owned();
        web::block(move || run_migrations(&url))
            .await
            .map_err(std::io::Error::other)?
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!("analogy backend listening");
    let outcome = server.await;
    health_state.begin_draining();
    outcome
}

fn build_generator(settings: &AppSettings) -> std::io::Result<Arc<dyn TextGenerator>> {
    match settings.gemini_settings() {
        Some(gemini) => {
            info!(model = %gemini.model, "using Gemini text generator");
            let source = GeminiHttpSource::new(gemini).map_err(std::io::Error::other)?;
            Ok(Arc::new(source))
        }
        None => {
            warn!("no Gemini API key configured; answering with fixture analogies");
            Ok(Arc::new(FixtureTextGenerator))
        }
    }
}
