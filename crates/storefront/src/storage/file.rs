//! File-backed key-value store.

use std::fmt::Write as _;
use std::fs;
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{PersistentKv, StorageError, StorageKey};

/// Key-value store keeping one JSON file per key under a directory.
///
/// Saves write a uniquely named temporary file in the same directory and
/// rename it over the target, so a reader sees either the previous snapshot
/// or the new one, and concurrent writers never share a temporary file.
#[derive(Debug, Clone)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    /// Create a store rooted at `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    #[must_use]
    pub fn path_for(&self, key: &StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", escape_file_name(&key.to_string())))
    }
}

impl PersistentKv for FileKv {
    fn load(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn save(&self, key: &StorageKey, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(key);
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let tmp_path = tmp.path().to_path_buf();

        tmp.write_all(value.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|source| StorageError::Io {
                path: tmp_path,
                source,
            })?;
        tmp.persist(&path).map_err(|e| StorageError::Io {
            path: path.clone(),
            source: e.error,
        })?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "Saved snapshot");
        Ok(())
    }
}

/// Percent-escape every byte outside `[A-Za-z0-9._-]`.
fn escape_file_name(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_file_name() {
        assert_eq!(
            escape_file_name("@RocketShoes:cart"),
            "%40RocketShoes%3Acart"
        );
        assert_eq!(escape_file_name("plain-key_1.0"), "plain-key_1.0");
        assert_eq!(escape_file_name("../up"), "..%2Fup");
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKv::new(dir.path());
        assert!(kv.load(&StorageKey::cart("@RocketShoes")).unwrap().is_none());
    }

    #[test]
    fn test_save_creates_dir_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKv::new(dir.path().join("nested"));
        let key = StorageKey::cart("@RocketShoes");

        kv.save(&key, "[]").unwrap();
        kv.save(&key, r#"[{"id":1}]"#).unwrap();

        assert_eq!(kv.load(&key).unwrap().as_deref(), Some(r#"[{"id":1}]"#));
        assert!(kv.path_for(&key).ends_with("%40RocketShoes%3Acart.json"));
        assert_eq!(fs::read_dir(kv.dir()).unwrap().count(), 1);
    }

    #[test]
    fn test_concurrent_saves_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKv::new(dir.path());
        let key = StorageKey::cart("@RocketShoes");

        std::thread::scope(|scope| {
            for writer in 0..8 {
                let (kv, key) = (&kv, &key);
                scope.spawn(move || {
                    for round in 0..25 {
                        kv.save(key, &format!("[{writer},{round}]")).unwrap();
                    }
                });
            }
        });

        let stored = kv.load(&key).unwrap().unwrap();
        assert!(stored.starts_with('[') && stored.ends_with(",24]"));
        assert_eq!(fs::read_dir(kv.dir()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let kv = FileKv::new(&blocker);
        let err = kv.save(&StorageKey::cart("ns"), "[]").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
