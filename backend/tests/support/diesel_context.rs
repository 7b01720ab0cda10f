//! Embedded database plus a Diesel pool, shared by the adapter suites.

use companion_backend::outbound::persistence::{DbPool, PoolConfig};
use pg_embedded_setup_unpriv::{TemporaryDatabase, TestCluster};
use tokio::runtime::Runtime;

use super::embedded_postgres::provision_database;
use super::handle_cluster_setup_failure;
use super::pg_embed::test_cluster;

/// Field order is drop order: the pool closes before its database is dropped,
/// and the database before the cluster stops.
pub struct DieselContext {
    pub runtime: Runtime,
    pub pool: DbPool,
    pub database_url: String,
    _database: TemporaryDatabase,
    _cluster: TestCluster,
}

fn setup() -> Result<DieselContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database = provision_database(&cluster)?;
    let database_url = database.url().to_owned();

    let config = PoolConfig::new(&database_url)
        .with_max_size(4)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(DieselContext {
        runtime,
        pool,
        database_url,
        _database: database,
        _cluster: cluster,
    })
}

/// `None` when the cluster is unavailable and `SKIP_TEST_CLUSTER` is set.
pub fn diesel_context() -> Option<DieselContext> {
    match setup() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}
