pub mod file;
pub mod memory;

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const SCORES_KEY: &str = "rps_scores";
pub const HISTORY_KEY: &str = "rps_game_history";
pub const STATS_KEY: &str = "rps_stats";

pub const ALL_KEYS: [&str; 3] = [SCORES_KEY, HISTORY_KEY, STATS_KEY];

/// Key-value persistence collaborator. Values are JSON documents.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError>;

    fn remove(&mut self, key: &str) -> Result<(), AppError>;

    /// Remove every record this crate writes.
    fn clear(&mut self) -> Result<(), AppError> {
        for key in ALL_KEYS {
            self.remove(key)?;
        }
        Ok(())
    }
}

pub fn load_record<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Result<Option<T>, AppError> {
    match store.get(key)? {
        Some(json) => serde_json::from_str(&json).map(Some).map_err(|e| {
            AppError::StorageFailure(format!("Failed to parse record \"{}\": {}", key, e))
        }),
        None => Ok(None),
    }
}

pub fn save_record<T: Serialize>(store: &mut dyn Store, key: &str, value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        AppError::StorageFailure(format!("Failed to serialize record \"{}\": {}", key, e))
    })?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_record_helpers() {
        let mut store = MemoryStore::new();
        let mut record = BTreeMap::new();
        record.insert("wins".to_string(), 3u32);

        save_record(&mut store, STATS_KEY, &record).unwrap();
        let loaded: Option<BTreeMap<String, u32>> = load_record(&store, STATS_KEY).unwrap();
        assert_eq!(loaded, Some(record));

        let missing: Option<BTreeMap<String, u32>> = load_record(&store, SCORES_KEY).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_corrupt_record_is_storage_failure() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, "{not json").unwrap();
        let loaded: Result<Option<Vec<u32>>, _> = load_record(&store, HISTORY_KEY);
        assert!(matches!(loaded, Err(AppError::StorageFailure(_))));
    }

    #[test]
    fn test_clear_removes_known_keys() {
        let mut store = MemoryStore::new();
        for key in ALL_KEYS {
            store.set(key, "1").unwrap();
        }
        store.set("unrelated", "2").unwrap();
        store.clear().unwrap();
        for key in ALL_KEYS {
            assert!(store.get(key).unwrap().is_none());
        }
        assert_eq!(store.get("unrelated").unwrap().as_deref(), Some("2"));
    }
}
