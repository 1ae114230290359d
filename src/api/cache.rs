use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::auth::CredentialRecord;
use crate::Error;

/// Where spotify tokens are kept between runs
pub trait CredentialStore: Send + Sync {
    /// Load the persisted record. A missing or unreadable cache is an empty record, it is the
    /// normal state of a first run.
    fn load(&self) -> CredentialRecord;

    /// Overwrite the persisted record
    fn save(&self, record: &CredentialRecord) -> Result<(), Error>;
}

/// JSON file cache, `spotify-auth.json` in the working directory by default
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCache {
    fn load(&self) -> CredentialRecord {
        let body = match std::fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(err) => {
                log::debug!("No cached spotify credentials at {}: {err}", self.path.display());
                return CredentialRecord::default();
            }
        };

        match serde_json::from_str(&body) {
            Ok(record) => record,
            Err(err) => {
                log::warn!("Ignoring malformed credential cache {}: {err}", self.path.display());
                CredentialRecord::default()
            }
        }
    }

    fn save(&self, record: &CredentialRecord) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(&self.path, serde_json::to_string(record)?)?;
        Ok(())
    }
}

/// Cache that lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryCache {
    record: Mutex<CredentialRecord>,
}

impl MemoryCache {
    pub fn new(record: CredentialRecord) -> Self {
        Self {
            record: Mutex::new(record),
        }
    }

    /// Snapshot of the currently stored record
    pub fn record(&self) -> CredentialRecord {
        self.record.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl CredentialStore for MemoryCache {
    fn load(&self) -> CredentialRecord {
        self.record()
    }

    fn save(&self, record: &CredentialRecord) -> Result<(), Error> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = record.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn file_cache_round_trip() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("spotify-auth.json"));
        let record = CredentialRecord::new("access", Some("refresh".into()));

        cache.save(&record).unwrap();
        assert_eq!(cache.load(), record);
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("nested/cache/spotify-auth.json"));

        cache.save(&CredentialRecord::new("access", None)).unwrap();
        assert!(cache.path().exists());
    }

    #[test]
    fn missing_file_loads_empty_record() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("spotify-auth.json"));

        assert!(cache.load().is_empty());
    }

    #[test]
    fn malformed_file_loads_empty_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spotify-auth.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(FileCache::new(&path).load().is_empty());
    }

    #[test]
    fn save_overwrites_previous_record() {
        let dir = tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("spotify-auth.json"));

        cache.save(&CredentialRecord::new("first", Some("refresh".into()))).unwrap();
        cache.save(&CredentialRecord::new("second", Some("refresh".into()))).unwrap();

        assert_eq!(cache.load().access_token.as_deref(), Some("second"));
    }

    #[test]
    fn memory_cache_round_trip() {
        let cache = MemoryCache::default();
        assert!(cache.load().is_empty());

        let record = CredentialRecord::new("access", Some("refresh".into()));
        cache.save(&record).unwrap();
        assert_eq!(cache.load(), record);
    }
}
