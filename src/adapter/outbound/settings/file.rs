//! JSON file settings store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::port::SettingsStore;

/// Settings persisted as one JSON object in a file.
///
/// A missing file reads as empty. Writes go through a sibling temp file
/// and a rename, so a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSettingsStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(err.into()),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::Settings(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(map)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "Settings written");
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let _guard = self.lock.lock();
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.lock.lock();
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value);
        self.write_map(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path().join("settings.json"));
        assert!(store.get("anything").unwrap().is_none());
    }

    #[test]
    fn set_creates_parent_dirs_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let store = FileSettingsStore::new(&path);

        store.set("a", json!(1)).unwrap();
        store.set("b", json!(["x"])).unwrap();

        let reopened = FileSettingsStore::new(&path);
        assert_eq!(reopened.get("a").unwrap(), Some(json!(1)));
        assert_eq!(reopened.get("b").unwrap(), Some(json!(["x"])));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn non_object_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2]").unwrap();

        let store = FileSettingsStore::new(&path);
        assert!(matches!(store.get("a"), Err(Error::Settings(_))));
    }
}
