//! Apply the embedded Diesel migrations to a database.
//!
//! ```text
//! companion-migrate --database-url postgres://localhost/companion
//! ```

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use companion_backend::outbound::persistence::run_pending_migrations;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(name = "companion-migrate", about = "Apply pending schema migrations")]
struct MigrateArgs {
    /// PostgreSQL connection URL.
    #[arg(long, env = "COMPANION_DATABASE_URL")]
    database_url: String,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = MigrateArgs::parse();
    let applied =
        run_pending_migrations(&args.database_url).wrap_err("apply pending migrations")?;
    if applied.is_empty() {
        info!("schema already up to date");
    }
    for version in applied {
        info!(%version, "migration applied");
    }
    Ok(())
}
