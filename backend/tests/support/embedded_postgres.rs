//! Database provisioning and seeding against an embedded cluster.
//!
//! Schema setup runs the crate's embedded migrations; seeding and assertions
//! use `postgres` directly so they do not depend on the adapters under test.

use companion_backend::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::{TemporaryDatabase, TestCluster};
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;

/// Create a fresh database with the migrated schema.
pub fn provision_database(cluster: &TestCluster) -> Result<TemporaryDatabase, String> {
    let name = format!("companion_{}", Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("create database: {err:?}"))?;
    run_pending_migrations(database.url()).map_err(|err| err.to_string())?;
    Ok(database)
}

fn connect(url: &str) -> Client {
    Client::connect(url, NoTls)
        .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)))
}

/// Insert a travel row and return its number.
pub fn seed_travel(url: &str, host: i32, title: &str, max_person: i32, status: &str) -> i32 {
    let row = connect(url)
        .query_one(
            "INSERT INTO travels (user_number, title, max_person, status) \
             VALUES ($1, $2, $3, $4) RETURNING number",
            &[&host, &title, &max_person, &status],
        )
        .unwrap_or_else(|err| panic!("seed travel: {}", format_postgres_error(&err)));
    row.get(0)
}

/// Stored status of an enrollment.
pub fn enrollment_status(url: &str, enrollment_number: i64) -> String {
    let row = connect(url)
        .query_one(
            "SELECT status FROM enrollments WHERE number = $1",
            &[&enrollment_number],
        )
        .unwrap_or_else(|err| panic!("read status: {}", format_postgres_error(&err)));
    row.get(0)
}

/// `(receiver_user_number, kind, content)` for every notification of a travel.
pub fn notifications_for(url: &str, travel_number: i32) -> Vec<(i32, String, String)> {
    connect(url)
        .query(
            "SELECT receiver_user_number, kind, content FROM notifications \
             WHERE travel_number = $1 ORDER BY number",
            &[&travel_number],
        )
        .unwrap_or_else(|err| panic!("read notifications: {}", format_postgres_error(&err)))
        .into_iter()
        .map(|row| (row.get(0), row.get(1), row.get(2)))
        .collect()
}
