//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module. Connections come from a `bb8` pool through
//! `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use enrollments::outbound::persistence::{DbPool, DieselEnrollmentRepository, PoolConfig};
//!
//! # async fn example() -> Result<(), enrollments::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/enrollments")).await?;
//! let _repo = DieselEnrollmentRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_enrollment_repository;
mod diesel_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
