//! PostgreSQL persistence adapters using Diesel with `diesel-async` and a
//! `bb8` pool.
//!
//! Row structs and table definitions stay private to this module; adapters
//! translate them into domain snapshots and map every failure into the port's
//! error type.

mod diesel_basic_error_mapping;
mod diesel_companion_repository;
mod diesel_enrollment_repository;
mod diesel_travel_notifier;
mod diesel_travel_repository;
pub mod migrations;
mod models;
mod pool;
mod row_mapping;
mod schema;

pub use diesel_companion_repository::DieselCompanionRepository;
pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use diesel_travel_notifier::DieselTravelNotifier;
pub use diesel_travel_repository::DieselTravelRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
