//! Outbound adapters implementing domain ports against infrastructure.
//!
//! Adapters translate between domain types and storage rows. They hold no
//! business rules.

pub mod persistence;
