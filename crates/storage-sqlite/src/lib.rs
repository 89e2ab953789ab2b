//! SQLite storage implementation for Bullionfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `bullionfolio-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users, rates, and investments
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel exists; the
//! core crate is database-agnostic and works with traits. The uniqueness of
//! closing rates per (commodity, day) is enforced here by a partial unique
//! index, so concurrent inserts are serialized by the constraint rather
//! than by an application-level existence check.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod investments;
pub mod rates;
pub mod users;

// Re-export database utilities
pub use db::{create_pool, get_connection, get_db_path, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from bullionfolio-core for convenience
pub use bullionfolio_core::errors::{DatabaseError, Error, Result};
