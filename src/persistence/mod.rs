//! Save/load persistence
//!
//! Everything is stored as JSON strings under fixed keys:
//! - `PROGRESS_KEY`: the player's `ProgressState`
//! - `SETTINGS_KEY`: presentation `Settings`
//!
//! Backends:
//! - `MemoryStorage`: in-process map (tests, fallback)
//! - `FileStorage`: one JSON file per key (native)
//! - `LocalStorage`: browser LocalStorage (wasm32)

mod memory;
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
mod local;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Key for the saved progress blob
pub const PROGRESS_KEY: &str = "ahlulbaytHeroes_progress";
/// Key for saved settings
pub const SETTINGS_KEY: &str = "ahlulbaytHeroes_settings";

/// Key/value string store that survives restarts
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Read and parse the value under `key`. `Ok(None)` when nothing is stored.
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>> {
    match storage.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Serialize `value` and store it under `key`
pub fn save_json<T: Serialize>(storage: &mut dyn Storage, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    storage.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        a: u32,
    }

    #[test]
    fn test_load_missing_is_none() {
        let storage = MemoryStorage::new();
        let loaded: Option<Sample> = load_json(&storage, "missing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        save_json(&mut storage, "k", &Sample { a: 7 }).unwrap();
        let loaded: Option<Sample> = load_json(&storage, "k").unwrap();
        assert_eq!(loaded, Some(Sample { a: 7 }));
    }

    #[test]
    fn test_load_garbage_is_corrupt() {
        let mut storage = MemoryStorage::new();
        storage.set("k", "][").unwrap();
        let loaded: Result<Option<Sample>> = load_json(&storage, "k");
        assert!(matches!(loaded, Err(Error::CorruptPersistedState(_))));
    }
}
