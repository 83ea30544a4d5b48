//! Key-value storage for serialized records.
//!
//! The `Storage` trait is a flat string-to-string store with `get`, `set` and `remove`. Values
//! are JSON text. `Store` adds the key layout and typed access on top of any `Storage`.

mod memory;
mod migrations;
mod sqlite;
mod store;

use crate::error::Res;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;
pub use store::{Store, DEFAULT_NAMESPACE};

/// A flat key-value store. Implementations must be safe to share between tasks.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if there is none.
    async fn get(&self, key: &str) -> Res<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Res<()>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Res<()>;
}
