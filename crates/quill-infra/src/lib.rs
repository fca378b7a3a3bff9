//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL post repository via SeaORM
//! - `minimal` - No external dependencies, in-memory only

pub mod database;
pub mod store;

pub use database::{DatabaseConfig, DatabaseConnections};
pub use store::InMemoryPostRepository;

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;
