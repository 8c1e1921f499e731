//! User store adapters.
//!
//! - [`DieselUserRepository`]: PostgreSQL via Diesel, `diesel-async`, and a
//!   `bb8` pool. Diesel row structs (`models.rs`) and table definitions
//!   (`schema.rs`) stay private to this module.
//! - [`InMemoryUserRepository`]: process-local store used when no database
//!   URL is configured.
//! - [`run_pending_migrations`]: applies the embedded schema migrations.
//!
//! # Example
//!
//! ```no_run
//! use user_registry::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repo = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_user_repository;
mod in_memory_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
