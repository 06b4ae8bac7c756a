//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between row structs (`models.rs`) and domain
//! entities; they carry no business rules. Connections come from a shared
//! [`DbPool`], and every Diesel or pool failure is folded into the owning
//! port's `Connection` or `Query` error.
//!
//! ```ignore
//! use conference_backend::outbound::persistence::{
//!     DbPool, DieselConferenceRepository, PoolConfig,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/conference")).await?;
//! let conferences = DieselConferenceRepository::new(pool.clone());
//! ```

mod diesel_basic_error_mapping;
mod diesel_conference_repository;
mod diesel_profile_repository;
mod diesel_registration_repository;
mod diesel_session_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_conference_repository::DieselConferenceRepository;
pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_registration_repository::DieselRegistrationRepository;
pub use diesel_session_repository::DieselSessionRepository;
pub use migrations::{MigrationError, run_pending_migrations, run_pending_migrations_async};
pub use pool::{DbPool, PoolConfig, PoolError};
