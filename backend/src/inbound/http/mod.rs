//! HTTP inbound adapter exposing REST endpoints.

pub mod companions;
pub mod enrollments;
pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod travel_enrollments;
pub mod users;
pub mod validation;

pub use error::ApiResult;
