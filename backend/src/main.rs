//! Backend entry-point: loads settings, prepares persistence and serves the
//! enrollment API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use companion_backend::inbound::http::health::HealthState;
use companion_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use companion_backend::outbound::persistence::{DbPool, run_pending_migrations};
use companion_backend::settings::AppSettings;

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

    let settings = AppSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(session, settings.bind_addr());
    if let Some(pool_config) = settings.pool_config() {
        if settings.run_migrations {
            apply_migrations(pool_config.database_url().to_owned()).await?;
        }
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    } else {
        warn!("no database configured; serving fixture data");
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::build_metrics());

    info!(addr = %settings.bind_addr(), "starting server");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

async fn apply_migrations(database_url: String) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(std::io::Error::other)?
        .map(|_| ())
        .map_err(std::io::Error::other)
}
