//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by SQLite via Diesel, driven asynchronously through
//! `diesel-async`'s `SyncConnectionWrapper` and pooled with `bb8`.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) never leave this module.
//! - **Embedded migrations**: the schema ships inside the binary and is
//!   applied at startup by [`run_migrations`].
//!
//! # Example
//!
//! ```ignore
//! use taskr::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig, run_migrations};
//!
//! run_migrations("taskr.db").await?;
//! let pool = DbPool::new(PoolConfig::new("taskr.db")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_task_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_task_repository::DieselTaskRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
