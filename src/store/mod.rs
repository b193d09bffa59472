//! Flat JSON key-value files under the user's config directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::StoreError;

pub mod history;
pub mod preferences;
pub mod progress;

pub use history::HistoryStore;
pub use preferences::{Language, Preferences};
pub use progress::ProgressStore;

/// Overrides the data directory, mostly for tests and portable installs.
pub const DATA_DIR_ENV: &str = "NEUROBOOST_DATA_DIR";
const APP_DIR_NAME: &str = "neuroboost";
const HISTORY_FILE_NAME: &str = "history.json";
const PROGRESS_FILE_NAME: &str = "progress.json";
const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Root of the three stores.
#[derive(Clone, Debug)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Storage { root: root.into() }
    }

    pub fn open_default() -> Result<Self, StoreError> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(Self::open(dir));
        }
        let config_dir = dirs::config_dir().ok_or(StoreError::NoDataDir)?;
        Ok(Self::open(config_dir.join(APP_DIR_NAME)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn history(&self) -> HistoryStore {
        HistoryStore::new(KeyValueFile::new(self.root.join(HISTORY_FILE_NAME)))
    }

    pub fn progress(&self) -> ProgressStore {
        ProgressStore::new(KeyValueFile::new(self.root.join(PROGRESS_FILE_NAME)))
    }

    pub fn preferences(&self) -> Preferences {
        Preferences::new(KeyValueFile::new(self.root.join(PREFERENCES_FILE_NAME)))
    }
}

/// One JSON object on disk, read and rewritten whole.
#[derive(Clone, Debug)]
pub struct KeyValueFile {
    path: PathBuf,
}

impl KeyValueFile {
    pub fn new(path: PathBuf) -> Self {
        KeyValueFile { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file → empty map. A file that is not a JSON object is logged
    /// and treated as empty. Any other read error is returned.
    pub fn try_load(&self) -> Result<Map<String, Value>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => {
                tracing::warn!(path = %self.path.display(), "store is not a JSON object, ignoring");
                Ok(Map::new())
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "corrupt store, ignoring: {err}");
                Ok(Map::new())
            }
        }
    }

    /// Like [`Self::try_load`], but an unreadable file reads as empty.
    pub fn load(&self) -> Map<String, Value> {
        self.try_load().unwrap_or_else(|err| {
            tracing::warn!("failed to read store: {err}");
            Map::new()
        })
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.load().remove(key)
    }

    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).and_then(|value| value.as_bool()).unwrap_or(false)
    }

    /// Read-modify-write. A file that cannot be read is left untouched.
    pub fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut map = self.try_load()?;
        map.insert(key.to_string(), value);
        self.save(&map)
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.try_load()?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.save(&map)
    }

    fn save(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(map).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_atomic(&self.path, &data)
    }
}

fn write_atomic(path: &Path, data: &str) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, data).map_err(io_err)?;
    fs::rename(&tmp_path, path).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = KeyValueFile::new(dir.path().join("nothing.json"));
        assert!(file.load().is_empty());
        assert!(!file.get_bool("solved_math_1"));
        assert_eq!(file.get_str("language"), None);
    }

    #[test]
    fn put_creates_parent_dirs_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let file = KeyValueFile::new(dir.path().join("nested/store.json"));
        file.put("a", json!(true)).unwrap();
        file.put("b", json!("ko")).unwrap();
        assert!(file.get_bool("a"));
        assert_eq!(file.get_str("b").as_deref(), Some("ko"));
        assert!(!dir.path().join("nested/store.tmp").exists());
    }

    #[test]
    fn corrupt_file_reads_as_empty_and_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();
        let file = KeyValueFile::new(path);
        assert!(file.load().is_empty());
        file.put("k", json!(1)).unwrap();
        assert_eq!(file.get("k"), Some(json!(1)));
    }

    #[test]
    fn wrong_typed_values_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let file = KeyValueFile::new(dir.path().join("store.json"));
        file.put("flag", json!("yes")).unwrap();
        file.put("text", json!(3)).unwrap();
        assert!(!file.get_bool("flag"));
        assert_eq!(file.get_str("text"), None);
    }

    #[test]
    fn unreadable_file_blocks_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();
        let file = KeyValueFile::new(path.clone());

        assert!(matches!(file.try_load(), Err(StoreError::Io { .. })));
        assert!(file.load().is_empty());
        assert!(matches!(
            file.put("solved_card_1", json!(true)),
            Err(StoreError::Io { .. })
        ));
        assert!(matches!(file.remove("solved_math_1"), Err(StoreError::Io { .. })));
        assert!(path.join("keep").exists());
        assert!(!dir.path().join("progress.tmp").exists());
    }

    #[test]
    fn corrupt_file_loads_as_empty_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2]").unwrap();
        let file = KeyValueFile::new(path);
        assert!(file.try_load().unwrap().is_empty());
    }

    #[test]
    fn remove_missing_key_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let file = KeyValueFile::new(dir.path().join("store.json"));
        file.remove("absent").unwrap();
        assert!(!file.path().exists());
    }
}
