//! Key-value persistence for non-critical client state.
//!
//! Values are serialized to JSON, one file per key, under an explicitly
//! supplied root directory. Every failure path degrades silently after
//! logging: persistence here is best-effort and must never take the
//! application down with it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first `set`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `value` under `key`. Failures are logged and swallowed.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string_pretty(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("failed to encode value for key {key:?}: {e}");
                return;
            }
        };

        if let Err(e) = fs::create_dir_all(&self.root) {
            tracing::error!("failed to create storage directory: {e}");
            return;
        }

        if let Err(e) = fs::write(self.key_path(key), json) {
            tracing::error!("failed to persist key {key:?}: {e}");
        }
    }

    /// Read the value stored under `key`. Absent keys return `None`;
    /// unreadable or corrupt entries are logged and also return `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = match fs::read_to_string(self.key_path(key)) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::error!("failed to read key {key:?}: {e}");
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("corrupt value for key {key:?}: {e}");
                None
            }
        }
    }

    /// Remove the value stored under `key`, if any. Failures are logged and
    /// swallowed.
    pub fn remove(&self, key: &str) {
        if let Err(e) = fs::remove_file(self.key_path(key)) {
            if e.kind() != ErrorKind::NotFound {
                tracing::error!("failed to remove key {key:?}: {e}");
            }
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", escape_key(key)))
    }
}

/// Keys are opaque strings; escape anything that is not filename-safe so a
/// key like "dashboard/filter" cannot wander out of the storage root.
fn escape_key(key: &str) -> String {
    let mut escaped = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'_' | b'-' => {
                escaped.push(byte as char);
            }
            _ => escaped.push_str(&format!("%{byte:02X}")),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        a: i32,
    }

    fn temp_store() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().join("store"));
        (dir, storage)
    }

    #[test]
    fn round_trips_values() {
        let (_dir, storage) = temp_store();
        storage.set("k", &Prefs { a: 1 });
        assert_eq!(storage.get::<Prefs>("k"), Some(Prefs { a: 1 }));
    }

    #[test]
    fn absent_key_is_none() {
        let (_dir, storage) = temp_store();
        assert_eq!(storage.get::<Prefs>("missing"), None);
    }

    #[test]
    fn remove_then_get_is_none() {
        let (_dir, storage) = temp_store();
        storage.set("k", &Prefs { a: 7 });
        storage.remove("k");
        assert_eq!(storage.get::<Prefs>("k"), None);
    }

    #[test]
    fn remove_of_missing_key_is_silent() {
        let (_dir, storage) = temp_store();
        storage.remove("never-set");
    }

    #[test]
    fn corrupt_entry_degrades_to_none() {
        let (_dir, storage) = temp_store();
        storage.set("k", &Prefs { a: 1 });
        fs::write(storage.key_path("k"), "{not json").unwrap();
        assert_eq!(storage.get::<Prefs>("k"), None);
    }

    #[test]
    fn keys_with_separators_stay_inside_root() {
        let (_dir, storage) = temp_store();
        storage.set("dashboard/filter one", &Prefs { a: 2 });
        assert_eq!(
            storage.get::<Prefs>("dashboard/filter one"),
            Some(Prefs { a: 2 })
        );
        assert!(storage
            .key_path("dashboard/filter one")
            .starts_with(storage.root()));
    }

    #[test]
    fn escape_key_is_stable() {
        assert_eq!(escape_key("plain-key_1.0"), "plain-key_1.0");
        assert_eq!(escape_key("a/b"), "a%2Fb");
        assert_eq!(escape_key("a b"), "a%20b");
    }
}
