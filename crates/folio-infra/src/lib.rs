//! # Folio Infrastructure
//!
//! Concrete implementations of the ports defined in `folio-core`:
//! post storage, session storage and identity token verification.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL post storage via SeaORM
//! - `auth` - JWT identity token verification
//! - `redis` - Redis session store

pub mod database;
pub mod session;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryPostStore};
pub use session::InMemorySessionStore;

#[cfg(feature = "postgres")]
pub use database::PostgresPostStore;

#[cfg(feature = "auth")]
pub use auth::{IdpConfig, JwtIdentityVerifier};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use session::{RedisConfig, RedisSessionStore};
