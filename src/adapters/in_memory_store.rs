//! In-memory policy store for testing.
//!
//! This adapter keeps MessagePack-encoded envelopes in a shared map, so tests
//! exercise the same serialization path as the on-disk store without touching
//! the file system.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Result, error::Error, persistence::SavedPolicy, ports::PolicyStore};

/// In-memory store keyed by path.
///
/// All clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryPolicyStore {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryPolicyStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get the number of policies currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Clear all stored policies.
    pub fn clear(&self) {
        self.storage().clear();
    }
}

impl PolicyStore for InMemoryPolicyStore {
    fn save(&self, saved: &SavedPolicy, path: &Path) -> Result<()> {
        let key = path.to_string_lossy().to_string();

        let bytes = rmp_serde::to_vec(saved).map_err(|e| Error::SerializationContext {
            operation: "serialize policy for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(key, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedPolicy> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage();

        let bytes = storage.get(&key).ok_or_else(|| Error::PolicyNotFound {
            path: path.to_path_buf(),
        })?;

        let saved: SavedPolicy =
            rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize policy from in-memory storage".to_string(),
                message: e.to_string(),
            })?;
        saved.check_version()?;
        Ok(saved)
    }

    fn exists(&self, path: &Path) -> bool {
        let key = path.to_string_lossy().to_string();
        self.storage().contains_key(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        persistence::Method,
        tables::{Policy, QTable, RoleTables},
        tictactoe::{Action, BoardState},
    };

    fn sample() -> SavedPolicy {
        let state = BoardState::from_string("X...O....").unwrap();
        let action = Action::new(2, 2).unwrap();
        let mut policy = Policy::new();
        policy.insert(state, action);

        let mut x = QTable::new();
        x.set(state, action, 0.25);
        SavedPolicy::new(Method::MonteCarlo, policy).with_q_values(RoleTables {
            x,
            o: QTable::new(),
        })
    }

    #[test]
    fn test_in_memory_save_and_load() {
        let store = InMemoryPolicyStore::new();
        let path = Path::new("mc_policy");

        assert_eq!(store.count(), 0);
        assert!(!store.exists(path));

        store.save(&sample(), path).unwrap();
        assert_eq!(store.count(), 1);
        assert!(store.exists(path));

        assert_eq!(store.load(path).unwrap(), sample());
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let store = InMemoryPolicyStore::new();
        assert!(matches!(
            store.load(Path::new("nonexistent")),
            Err(Error::PolicyNotFound { .. })
        ));
    }

    #[test]
    fn test_clone_shares_storage() {
        let store = InMemoryPolicyStore::new();
        let other = store.clone();

        store.save(&sample(), Path::new("shared")).unwrap();
        assert!(other.exists(Path::new("shared")));

        other.clear();
        assert_eq!(store.count(), 0);
    }
}
