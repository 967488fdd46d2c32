//! Key-value persistence for preferences.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::PreferenceError;

/// Key-value storage that survives restarts.
pub trait PreferenceBackend: Send + Sync {
    /// Stored value for `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Store `value` under `key`.
    fn save(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Backend holding values in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset a value.
    #[must_use]
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.write().unwrap().insert(key.into(), value.into());
        self
    }

    /// Change a value behind the store's back (another window writing).
    pub fn set_raw(&self, key: &str, value: Option<&str>) {
        let mut values = self.values.write().unwrap();
        match value {
            Some(value) => values.insert(key.to_owned(), value.to_owned()),
            None => values.remove(key),
        };
    }
}

impl PreferenceBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.read().unwrap().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values
            .write()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Backend storing a JSON object of key to value in one file.
///
/// Writes go to a temporary file in the same directory which then replaces
/// the preference file.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Create a backend over `path`; the file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Preference file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| PreferenceError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(values).map_err(|source| PreferenceError::Json {
            path: self.path.clone(),
            source,
        })?;

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.read_all()?;
        values.insert(key.to_owned(), value.to_owned());
        self.write_all(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memory_backend() {
        let backend = MemoryBackend::new().with_value("k", "npm");

        assert_eq!(backend.load("k").unwrap(), Some("npm".to_owned()));
        assert_eq!(backend.load("other").unwrap(), None);

        backend.save("k", "yarn").unwrap();
        assert_eq!(backend.load("k").unwrap(), Some("yarn".to_owned()));

        backend.set_raw("k", None);
        assert_eq!(backend.load("k").unwrap(), None);
    }

    #[test]
    fn test_file_backend_missing_file_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(temp.path().join("prefs.json"));

        assert_eq!(backend.load("k").unwrap(), None);
    }

    #[test]
    fn test_file_backend_round_trip_keeps_other_keys() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested/prefs.json");
        let backend = FileBackend::new(&path);

        backend.save("theme", "dark").unwrap();
        backend.save("pm", "yarn").unwrap();
        backend.save("pm", "npm").unwrap();

        assert_eq!(backend.load("pm").unwrap(), Some("npm".to_owned()));
        assert_eq!(backend.load("theme").unwrap(), Some("dark".to_owned()));
        assert!(!temp.path().join("nested/prefs.json.tmp").exists());

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.len(), 2);
    }

    #[test]
    fn test_file_backend_invalid_json() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();
        let backend = FileBackend::new(&path);

        assert!(matches!(backend.load("k"), Err(PreferenceError::Json { .. })));
        assert!(matches!(backend.save("k", "npm"), Err(PreferenceError::Json { .. })));
    }
}
