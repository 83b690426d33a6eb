//! Key-value persistence gateway
//!
//! The diary layer reads and writes JSON blobs under string keys: ISO dates
//! for daily logs and fixed keys for settings. Absent keys are a normal
//! state (first use); callers construct empty defaults.
//!
//! A read-modify-write against the same key is last-write-wins. Two in-flight
//! writers to the same date key can drop each other's update; known
//! limitation, the gateway does not merge.

use std::collections::HashMap;
use std::sync::Mutex;

use rusqlite::params;
use serde_json::Value;

use super::connection::{Database, StoreResult};

/// Key for the persisted user profile
pub const PROFILE_KEY: &str = "userProfile";
/// Key for the weight history blob
pub const WEIGHT_HISTORY_KEY: &str = "weightHistory";
/// Key for water goal/cup-size settings
pub const WATER_SETTINGS_KEY: &str = "waterSettings";
/// Key holding the date the step goal notification last fired
pub const STEP_NOTIFIED_KEY: &str = "stepNotified";

/// Get/set/multi-get over JSON blobs keyed by strings
pub trait Gateway {
    /// Read a value; `None` when the key has never been written
    fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &Value) -> StoreResult<()>;

    /// Read several keys in one call, preserving request order
    fn multi_get(&self, keys: &[&str]) -> StoreResult<Vec<(String, Option<Value>)>>;
}

/// SQLite-backed gateway over the `kv` table
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Access the underlying database (for the local food provider)
    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl Gateway for SqliteStore {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;

            let result = stmt.query_row([key], |row| row.get::<_, String>(0));
            match result {
                Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn set(&self, key: &str, value: &Value) -> StoreResult<()> {
        let raw = serde_json::to_string(value)?;
        self.db.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO kv (key, value)
                VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = datetime('now')
                "#,
                params![key, raw],
            )?;
            Ok(())
        })
    }

    fn multi_get(&self, keys: &[&str]) -> StoreResult<Vec<(String, Option<Value>)>> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;

            let mut out = Vec::with_capacity(keys.len());
            for key in keys {
                let result = stmt.query_row([key], |row| row.get::<_, String>(0));
                let value = match result {
                    Ok(raw) => Some(serde_json::from_str(&raw)?),
                    Err(rusqlite::Error::QueryReturnedNoRows) => None,
                    Err(e) => return Err(e.into()),
                };
                out.push((key.to_string(), value));
            }
            Ok(out)
        })
    }
}

/// In-memory gateway used by tests
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Gateway for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> StoreResult<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn multi_get(&self, keys: &[&str]) -> StoreResult<Vec<(String, Option<Value>)>> {
        let entries = self.entries.lock().unwrap();
        Ok(keys
            .iter()
            .map(|key| (key.to_string(), entries.get(*key).cloned()))
            .collect())
    }
}
