//! Durable key-value storage
//!
//! The client persists everything as JSON-serialized strings under a
//! handful of well-known keys (see [`keys`]). Backends only need
//! string get/set/remove.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult};

/// Storage keys
pub mod keys {
    /// Backend host, e.g. `"192.168.1.10:8080"`
    pub const SERVER_HOST: &str = "serverBEIP";
    pub const WAITER_CODE: &str = "waiterCode";
    pub const DEVICE_ID: &str = "deviceId";
    /// Activation flag (JSON boolean)
    pub const PERMISSION_MENU: &str = "permissionMenu";
    /// Cached menu snapshot (JSON array)
    pub const MENU_ITEMS: &str = "menuItems";
}

/// String-keyed durable store
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> ClientResult<()>;
    fn remove(&mut self, key: &str) -> ClientResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> ClientResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> ClientResult<()> {
        (**self).remove(key)
    }
}

/// Read and decode a JSON value
pub fn get_json<T, S>(store: &S, key: &str) -> ClientResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value
pub fn set_json<T, S>(store: &mut S, key: &str, value: &T) -> ClientResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, raw)
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> ClientResult<()> {
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ClientResult<()> {
        self.data.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file
///
/// Every mutation replaces the file atomically; memory is updated only
/// once the write has succeeded.
#[derive(Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
    data: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store, starting empty if the file does not exist yet
    pub fn open(path: impl AsRef<Path>) -> ClientResult<Self> {
        let file_path = path.as_ref().to_path_buf();

        let data = if file_path.exists() {
            let content = std::fs::read_to_string(&file_path)?;
            serde_json::from_str(&content).map_err(|e| {
                ClientError::Storage(format!("{}: {}", file_path.display(), e))
            })?
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %file_path.display(), keys = data.len(), "Key-value store opened");
        Ok(Self { file_path, data })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Atomic write: tmp file + rename
    fn write(&self, data: &BTreeMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(data)?;

        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, content)?;
        if let Err(e) = std::fs::rename(&tmp_path, &self.file_path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> ClientResult<()> {
        let mut data = self.data.clone();
        data.insert(key.to_string(), value);
        self.write(&data)?;
        self.data = data;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ClientResult<()> {
        if !self.data.contains_key(key) {
            return Ok(());
        }
        let mut data = self.data.clone();
        data.remove(key);
        self.write(&data)?;
        self.data = data;
        Ok(())
    }
}
