//! Storage module
//!
//! SQLite connection handling, migrations, and the key-value gateway the
//! diary operations read and write through.

pub mod connection;
pub mod gateway;
pub mod migrations;

pub use connection::{Database, StoreError, StoreResult};
pub use gateway::{Gateway, MemoryStore, SqliteStore};
