//! JSON-file persistence for the reading override table.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use quake_core::{OverrideStore, SourceError};
use tracing::warn;

/// Override store backed by a single JSON object on disk.
///
/// A missing file is an empty table. A file that fails to parse as a
/// string-to-string mapping is discarded with a warning and treated as
/// empty - ambient load never surfaces an error to the user.
pub struct FileOverrideStore {
    path: PathBuf,
}

impl FileOverrideStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl OverrideStore for FileOverrideStore {
    fn load(&self) -> Result<HashMap<String, String>, SourceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(HashMap::new());
            }
            Err(err) => {
                return Err(SourceError::Store(format!(
                    "read {}: {}",
                    self.path.display(),
                    err
                )));
            }
        };

        match serde_json::from_str(&text) {
            Ok(overrides) => Ok(overrides),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "discarding corrupt override store"
                );
                Ok(HashMap::new())
            }
        }
    }

    fn save(&self, overrides: &HashMap<String, String>) -> Result<(), SourceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    SourceError::Store(format!("create {}: {}", parent.display(), err))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(overrides)?;
        fs::write(&self.path, json).map_err(|err| {
            SourceError::Store(format!("write {}: {}", self.path.display(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> FileOverrideStore {
        let path = std::env::temp_dir().join(format!(
            "namazu-override-test-{}-{}.json",
            std::process::id(),
            name
        ));
        let _ = fs::remove_file(&path);
        FileOverrideStore::new(path)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = temp_store("missing");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let store = temp_store("round-trip");
        let mut overrides = HashMap::new();
        overrides.insert("福岡県_福岡市早良区".to_string(), String::new());
        overrides.insert("青森県_八戸市".to_string(), "はちのへし".to_string());

        store.save(&overrides).unwrap();
        assert_eq!(store.load().unwrap(), overrides);

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_corrupt_file_discarded() {
        let store = temp_store("corrupt");
        fs::write(store.path(), "[1, 2, 3]").unwrap();

        assert!(store.load().unwrap().is_empty());

        let _ = fs::remove_file(store.path());
    }
}
