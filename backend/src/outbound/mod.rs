//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **directory**: reqwest clients for the user and course services
//! - **persistence**: PostgreSQL-backed enrollment store using Diesel
//!
//! Adapters translate between domain types and wire or storage
//! representations. They contain no business logic.

pub mod directory;
pub mod persistence;
