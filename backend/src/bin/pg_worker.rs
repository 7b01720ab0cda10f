//! Helper binary invoked by `pg_embedded_setup_unpriv` when tests run as root.
//!
//! Usage: `pg_worker <setup|start|stop> <payload.json>`. The payload is a
//! serialised [`pg_embedded_setup_unpriv::worker::WorkerPayload`].

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Report, Result};
use pg_embedded_setup_unpriv::worker::WorkerPayload;
use postgresql_embedded::PostgreSQL;
use tokio::runtime::Builder;

#[derive(Debug, Parser)]
#[command(name = "pg_worker", about = "Drive an embedded PostgreSQL lifecycle step")]
struct WorkerArgs {
    /// Lifecycle step to run.
    #[arg(value_enum)]
    operation: Operation,
    /// Path to the JSON worker payload.
    payload: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Operation {
    Setup,
    Start,
    Stop,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = WorkerArgs::parse();
    let payload = load_payload(&args.payload)?;
    execute(args.operation, payload)
}

fn load_payload(path: &Path) -> Result<WorkerPayload> {
    let raw = fs::read(path).with_context(|| format!("read worker payload {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("parse worker payload {}", path.display()))
}

fn execute(operation: Operation, payload: WorkerPayload) -> Result<()> {
    let settings = payload
        .settings
        .into_settings()
        .map_err(|err| Report::new(err).wrap_err("rebuild postgres settings"))?;
    for (key, value) in payload.environment {
        // SAFETY: single-threaded at this point; the runtime is built afterwards.
        match value {
            Some(value) => unsafe { std::env::set_var(&key, value.expose()) },
            None => unsafe { std::env::remove_var(&key) },
        }
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("build worker runtime")?;
    let mut postgres = PostgreSQL::new(settings);
    runtime
        .block_on(async move {
            match operation {
                Operation::Setup => postgres.setup().await,
                Operation::Start => postgres.start().await,
                Operation::Stop => postgres.stop().await,
            }
        })
        .with_context(|| format!("postgres {operation:?} failed"))
}
