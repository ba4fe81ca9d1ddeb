//! Durable key-value state shared by the history and saved-request stores

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::Result;

/// Key-value state scoped to the user, surviving restarts
pub trait StateStore: Send + Sync {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value stored under `key`
    fn update(&self, key: &str, value: Value) -> Result<()>;
}

/// Load a list stored under `key`; a missing key yields an empty list.
///
/// Entries that no longer match `T` are logged and skipped so one bad record
/// does not cost the rest of the list.
pub fn load_list<T: DeserializeOwned>(store: &dyn StateStore, key: &str) -> Result<Vec<T>> {
    let Some(value) = store.get(key)? else {
        return Ok(Vec::new());
    };
    let values: Vec<Value> = serde_json::from_value(value)?;

    let mut items = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(item) => items.push(item),
            Err(e) => tracing::warn!(key, index, error = %e, "Skipping unreadable entry"),
        }
    }
    Ok(items)
}

/// Persist a list under `key`
pub fn store_list<'a, T, I>(store: &dyn StateStore, key: &str, items: I) -> Result<()>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let values = items
        .into_iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    store.update(key, Value::Array(values))
}

/// Stores each key as `<dir>/<key>.json`
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStateStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Ensure state directory exists
    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }
}

impl StateStore for FileStateStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        match serde_json::from_str(&content) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                // keep the unreadable file around; the next update overwrites it
                let backup = path.with_extension("json.bak");
                fs::copy(&path, &backup)?;
                tracing::warn!(
                    path = %path.display(),
                    backup = %backup.display(),
                    "Unreadable state file"
                );
                Err(e.into())
            }
        }
    }

    fn update(&self, key: &str, value: Value) -> Result<()> {
        self.ensure_dir()?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&value)?)?;
        // rename replaces the old file in one step
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-process store, used by tests and embedders that bring their own persistence
#[derive(Default)]
pub struct MemoryStateStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn update(&self, key: &str, value: Value) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value);
        Ok(())
    }
}
