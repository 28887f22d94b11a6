//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` connection pool.
//!
//! - Repositories only translate between Diesel rows and domain types.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Every operation is bounded by the caller's deadline and runs inside a
//!   transaction carrying a matching `statement_timeout`.
//!
//! # Example
//!
//! ```rust,no_run
//! use backend::outbound::persistence::{
//!     DatabaseSettings, DbPool, DieselWorkoutRepository, PoolConfig,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let url = DatabaseSettings::default().database_url()?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let repo = DieselWorkoutRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_user_repository;
mod diesel_workout_repository;
mod migrations;
mod models;
mod pool;
mod schema;
mod settings;

pub use diesel_user_repository::DieselUserRepository;
pub use diesel_workout_repository::DieselWorkoutRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_blocking,
};
pub use pool::{DbPool, PoolConfig, PoolError};
pub use settings::{DatabaseSettings, DatabaseSettingsError};
