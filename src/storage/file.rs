use super::Store;
use crate::error::AppError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One `<key>.json` file per record under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    /// `~/.rps_arena`, or `./.rps_arena` when there is no home directory.
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rps_arena")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.record_path(key);

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            // Record doesn't exist yet
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::StorageFailure(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::StorageFailure(format!(
                "Failed to create data directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let path = self.record_path(key);
        fs::write(&path, value).map_err(|e| {
            AppError::StorageFailure(format!("Failed to write {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        let path = self.record_path(key);

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::StorageFailure(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_on_disk() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().join("data"));

        assert!(store.get("rps_scores").unwrap().is_none());
        store.set("rps_scores", "{\"playerScore\":1}").unwrap();
        assert!(store.record_path("rps_scores").exists());
        assert_eq!(
            store.get("rps_scores").unwrap().as_deref(),
            Some("{\"playerScore\":1}")
        );

        store.remove("rps_scores").unwrap();
        assert!(store.get("rps_scores").unwrap().is_none());
        store.remove("rps_scores").unwrap();
    }

    #[test]
    fn test_key_is_sanitised_into_file_name() {
        let store = FileStore::new("/tmp/rps");
        assert_eq!(
            store.record_path("a/b#c"),
            PathBuf::from("/tmp/rps/a_b_c.json")
        );
    }

    #[test]
    fn test_unwritable_directory_is_storage_failure() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut store = FileStore::new(blocker.join("nested"));
        assert!(matches!(
            store.set("rps_stats", "{}"),
            Err(AppError::StorageFailure(_))
        ));
    }
}
