//! SQLite backend for the duo entity store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Each [`EntityStore::write`] call is one
//! SQLite transaction.
//!
//! [`EntityStore::write`]: duo_core::store::EntityStore::write

mod encode;
mod schema;
mod session;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
