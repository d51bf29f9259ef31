//! Storage adapter trait and typed helpers.
//!
//! Two scopes exist at runtime: a session scope (token + user, dies with
//! the process) and a durable scope (employee list cache, survives
//! restarts). Both speak the same contract: reads never fail, writes are
//! best-effort, and the in-memory state stays authoritative regardless of
//! what storage does.

use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Session-scope key holding the bearer token.
pub const KEY_TOKEN: &str = "token";
/// Session-scope key holding the serialized user profile.
pub const KEY_USER: &str = "user";
/// Durable-scope key holding the serialized employee collection.
pub const KEY_EMPLOYEES: &str = "employees";

/// A key/value store scope.
///
/// # Implementation Notes
///
/// Implementations must uphold the degradation contract:
/// - `read` never errors: a missing key, corrupt value, or inaccessible
///   backing store all yield `None` (log and move on);
/// - `write` failures are swallowed after a diagnostic log entry;
/// - `clear` removes every key in the scope.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the raw value for `key`, or `None` if absent or unreadable.
    async fn read(&self, key: &str) -> Option<String>;

    /// Writes `value` under `key`, best-effort.
    async fn write(&self, key: &str, value: &str);

    /// Removes every key in this scope.
    async fn clear(&self);
}

/// Reads and deserializes a JSON value, degrading to `None` on any
/// failure (absent key or corrupt payload).
pub async fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.read(key).await?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, %err, "discarding corrupt stored value");
            None
        }
    }
}

/// Serializes and writes a JSON value, best-effort.
///
/// Returns `Err` only for a serialization failure on our side; callers at
/// the store boundary log and continue, since in-memory state is
/// authoritative either way.
pub async fn write_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.write(key, &raw).await;
    Ok(())
}
