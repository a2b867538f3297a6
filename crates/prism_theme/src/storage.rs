//! Best-effort persistence for the selected mode and theme name
//!
//! Only two scalar keys are ever written. The resolved scheme is derived
//! state and is never persisted.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use thiserror::Error;

/// Persisted [`ThemeMode`](crate::ThemeMode)
pub const MODE_KEY: &str = "prism.theme.mode";
/// Persisted theme name
pub const NAME_KEY: &str = "prism.theme.name";

const STATE_APP_DIR: &str = "prism";
const STATE_FILE: &str = "state.json";

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// No backing store in this environment
    #[error("theme storage is unavailable: {0}")]
    Unavailable(String),

    #[error("failed to access theme state file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("theme state file {path} is corrupt")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A flat string key/value store
pub trait ThemeStorage {
    /// Read a key; `Ok(None)` when it was never written
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store. Clones share the same map, which lets a test drop a
/// controller and initialize a new one over the same data to simulate a
/// reload.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: Rc<RefCell<FxHashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a value directly, bypassing the trait
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// Write a value directly, e.g. to seed a corrupted entry in tests
    pub fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl ThemeStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set(key, value);
        Ok(())
    }
}

/// Storage that always fails, modelling sandboxed or headless contexts
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableStorage;

impl ThemeStorage for UnavailableStorage {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("no storage backend".to_string()))
    }

    fn store(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("no storage backend".to_string()))
    }
}

/// JSON object file, one entry per key
///
/// Keys this store does not own are preserved on write. A missing file
/// reads as empty.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_CONFIG_HOME/prism/state.json`, else `$HOME/.config/prism/state.json`
    pub fn in_config_dir() -> Result<Self, StorageError> {
        let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
        let home = std::env::var_os("HOME").map(PathBuf::from);
        state_path_with(xdg.as_deref(), home.as_deref()).map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl ThemeStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.read_map()?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })?;
        }

        // A corrupt file is replaced rather than blocking every later write.
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StorageError::Corrupt { .. }) => Map::new(),
            Err(err) => return Err(err),
        };
        map.insert(key.to_string(), Value::String(value.to_string()));

        let serialized =
            serde_json::to_string_pretty(&Value::Object(map)).map_err(|source| {
                StorageError::Corrupt {
                    path: self.path.clone(),
                    source,
                }
            })?;
        fs::write(&self.path, serialized).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn state_path_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Result<PathBuf, StorageError> {
    let base = match (xdg_config_home, home) {
        (Some(xdg), _) if !xdg.as_os_str().is_empty() => xdg.to_path_buf(),
        (_, Some(home)) if !home.as_os_str().is_empty() => home.join(".config"),
        _ => {
            return Err(StorageError::Unavailable(
                "neither XDG_CONFIG_HOME nor HOME is set".to_string(),
            ))
        }
    };
    Ok(base.join(STATE_APP_DIR).join(STATE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clones_share_state() {
        let mut a = MemoryStorage::new();
        let b = a.clone();
        a.store(MODE_KEY, "dark").unwrap();
        assert_eq!(b.load(MODE_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(b.load(NAME_KEY).unwrap(), None);
    }

    #[test]
    fn unavailable_always_fails() {
        let mut storage = UnavailableStorage;
        assert!(matches!(
            storage.load(MODE_KEY),
            Err(StorageError::Unavailable(_))
        ));
        assert!(storage.store(MODE_KEY, "dark").is_err());
    }

    #[test]
    fn file_storage_round_trip_preserves_foreign_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"other.app": "keep"}"#).unwrap();

        let mut storage = FileStorage::new(&path);
        storage.store(NAME_KEY, "ocean").unwrap();
        storage.store(MODE_KEY, "system").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.load(NAME_KEY).unwrap().as_deref(), Some("ocean"));
        assert_eq!(reopened.load(MODE_KEY).unwrap().as_deref(), Some("system"));
        assert_eq!(
            reopened.load("other.app").unwrap().as_deref(),
            Some("keep")
        );
    }

    #[test]
    fn file_storage_missing_file_reads_empty_and_creates_dirs_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("state.json");
        let mut storage = FileStorage::new(&path);
        assert_eq!(storage.load(MODE_KEY).unwrap(), None);
        storage.store(MODE_KEY, "light").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_errors_on_read_and_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let mut storage = FileStorage::new(&path);
        assert!(matches!(
            storage.load(MODE_KEY),
            Err(StorageError::Corrupt { .. })
        ));

        storage.store(MODE_KEY, "dark").unwrap();
        assert_eq!(storage.load(MODE_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn unreadable_file_is_left_untouched_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let bytes = b"{\"other.app\": \"\xff\"}".to_vec();
        fs::write(&path, &bytes).unwrap();

        let mut storage = FileStorage::new(&path);
        assert!(matches!(
            storage.store(MODE_KEY, "dark"),
            Err(StorageError::Io { .. })
        ));
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn non_string_values_read_as_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"prism.theme.mode": 3}"#).unwrap();
        assert_eq!(FileStorage::new(&path).load(MODE_KEY).unwrap(), None);
    }

    #[test]
    fn state_path_prefers_xdg() {
        let path = state_path_with(Some(Path::new("/xdg")), Some(Path::new("/home/u"))).unwrap();
        assert_eq!(path, PathBuf::from("/xdg/prism/state.json"));

        let path = state_path_with(None, Some(Path::new("/home/u"))).unwrap();
        assert_eq!(path, PathBuf::from("/home/u/.config/prism/state.json"));

        assert!(matches!(
            state_path_with(None, None),
            Err(StorageError::Unavailable(_))
        ));
    }
}
