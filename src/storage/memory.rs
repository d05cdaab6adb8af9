//! In-memory progress storage.
//!
//! All three collections live behind a single `RwLock`, so every mutation
//! (including the multi-collection delete in `clear_user_data`) is atomic
//! with respect to other callers.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::{LearningPath, ResourceId, UserProfile};
use crate::error::{Result, TrailmapError};
use crate::storage::ProgressStore;

/// The store's collections, guarded together.
#[derive(Debug, Default)]
struct Inner {
    /// Profiles by user id.
    users: HashMap<String, UserProfile>,
    /// Path history by user id, oldest first.
    paths: HashMap<String, Vec<LearningPath>>,
    /// Completion flags by (user id, resource id).
    progress: HashMap<(String, ResourceId), bool>,
}

/// In-memory progress store.
///
/// Data lives for as long as the store does. Construct one per process (or
/// per test) and pass it to whatever needs it.
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    inner: RwLock<Inner>,
}

impl MemoryProgressStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| TrailmapError::invalid_state("progress store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| TrailmapError::invalid_state("progress store lock poisoned"))
    }

    /// Get the number of saved users.
    pub fn user_count(&self) -> Result<usize> {
        Ok(self.read()?.users.len())
    }

    /// Get the number of progress records across all users.
    pub fn record_count(&self) -> Result<usize> {
        Ok(self.read()?.progress.len())
    }

    /// Check if the store holds nothing at all.
    pub fn is_empty(&self) -> Result<bool> {
        let inner = self.read()?;
        Ok(inner.users.is_empty() && inner.paths.is_empty() && inner.progress.is_empty())
    }

    /// Drop every user, path and progress record.
    pub fn clear(&self) -> Result<()> {
        *self.write()? = Inner::default();
        Ok(())
    }
}

impl ProgressStore for MemoryProgressStore {
    fn save_user(&self, user_id: &str, profile: &UserProfile) -> Result<()> {
        let mut inner = self.write()?;
        inner.users.insert(user_id.to_string(), profile.clone());
        tracing::debug!(user_id, "user saved");
        Ok(())
    }

    fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.read()?.users.get(user_id).cloned())
    }

    fn save_learning_path(&self, user_id: &str, path: &LearningPath) -> Result<()> {
        let mut inner = self.write()?;
        inner
            .paths
            .entry(user_id.to_string())
            .or_default()
            .push(path.clone());
        tracing::debug!(user_id, path_id = %path.path_id, "learning path saved");
        Ok(())
    }

    fn get_learning_paths(&self, user_id: &str) -> Result<Vec<LearningPath>> {
        Ok(self
            .read()?
            .paths
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    fn update_progress(
        &self,
        user_id: &str,
        resource_id: ResourceId,
        completed: bool,
    ) -> Result<()> {
        let mut inner = self.write()?;
        inner
            .progress
            .insert((user_id.to_string(), resource_id), completed);
        tracing::debug!(user_id, resource_id, completed, "progress updated");
        Ok(())
    }

    fn get_progress(&self, user_id: &str, resource_id: ResourceId) -> Result<bool> {
        let inner = self.read()?;
        let completed = inner
            .progress
            .get(&(user_id.to_string(), resource_id))
            .copied()
            .unwrap_or(false);
        Ok(completed)
    }

    /// Scans every record in the store: O(total records), not O(user's records).
    fn get_all_progress(&self, user_id: &str) -> Result<BTreeMap<ResourceId, bool>> {
        let inner = self.read()?;
        Ok(inner
            .progress
            .iter()
            .filter(|((user, _), _)| user == user_id)
            .map(|((_, resource_id), completed)| (*resource_id, *completed))
            .collect())
    }

    fn clear_user_data(&self, user_id: &str) -> Result<()> {
        let mut inner = self.write()?;
        inner.users.remove(user_id);
        inner.paths.remove(user_id);
        inner.progress.retain(|(user, _), _| user != user_id);
        tracing::debug!(user_id, "user data cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Catalog, Experience};
    use crate::recommend::generate_path;
    use crate::storage::traits::tests::test_progress_store_contract;

    fn profile(name: &str) -> UserProfile {
        UserProfile::new(vec!["python".to_string()], Experience::Beginner).with_name(name)
    }

    #[test]
    fn test_memory_store_contract() {
        let store = MemoryProgressStore::new();
        test_progress_store_contract(&store);
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = MemoryProgressStore::new();
        assert!(store.is_empty().unwrap());
        assert_eq!(store.user_count().unwrap(), 0);
        assert_eq!(store.record_count().unwrap(), 0);
    }

    #[test]
    fn test_default_trait() {
        let store = MemoryProgressStore::default();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_save_user_last_write_wins() {
        let store = MemoryProgressStore::new();
        store.save_user("u1", &profile("First")).unwrap();
        store.save_user("u1", &profile("Second")).unwrap();

        assert_eq!(store.user_count().unwrap(), 1);
        assert_eq!(store.get_user("u1").unwrap().unwrap().name, "Second");
    }

    #[test]
    fn test_update_progress_idempotent() {
        let once = MemoryProgressStore::new();
        once.update_progress("u1", 4, true).unwrap();

        let twice = MemoryProgressStore::new();
        twice.update_progress("u1", 4, true).unwrap();
        twice.update_progress("u1", 4, true).unwrap();

        assert_eq!(
            once.get_all_progress("u1").unwrap(),
            twice.get_all_progress("u1").unwrap()
        );
        assert_eq!(twice.record_count().unwrap(), 1);
    }

    #[test]
    fn test_update_progress_last_write_wins() {
        let store = MemoryProgressStore::new();
        store.update_progress("u1", 2, true).unwrap();
        store.update_progress("u1", 2, false).unwrap();

        assert!(!store.get_progress("u1", 2).unwrap());
        assert_eq!(
            store.get_all_progress("u1").unwrap(),
            BTreeMap::from([(2, false)])
        );
    }

    #[test]
    fn test_get_all_progress_only_returns_that_user() {
        let store = MemoryProgressStore::new();
        store.update_progress("u1", 3, true).unwrap();
        store.update_progress("u2", 5, true).unwrap();
        store.update_progress("u10", 7, true).unwrap();

        assert_eq!(
            store.get_all_progress("u1").unwrap(),
            BTreeMap::from([(3, true)])
        );
    }

    #[test]
    fn test_user_ids_with_separators_do_not_collide() {
        let store = MemoryProgressStore::new();
        store.update_progress("a-1", 2, true).unwrap();
        store.update_progress("a", 1, true).unwrap();

        assert_eq!(
            store.get_all_progress("a").unwrap(),
            BTreeMap::from([(1, true)])
        );
        assert!(!store.get_progress("a", 2).unwrap());
    }

    #[test]
    fn test_clear_user_data_leaves_other_users() {
        let store = MemoryProgressStore::new();
        let catalog = Catalog::builtin();

        for user in ["u1", "u2"] {
            let p = profile(user);
            store.save_user(user, &p).unwrap();
            let path = generate_path(&p, catalog.resources()).unwrap();
            store.save_learning_path(user, &path).unwrap();
            store.update_progress(user, 4, true).unwrap();
            store.update_progress(user, 7, false).unwrap();
        }

        store.clear_user_data("u1").unwrap();

        assert!(store.get_learning_paths("u1").unwrap().is_empty());
        assert!(store.get_all_progress("u1").unwrap().is_empty());
        assert!(store.get_user("u1").unwrap().is_none());

        assert!(store.get_user("u2").unwrap().is_some());
        assert_eq!(store.get_learning_paths("u2").unwrap().len(), 1);
        assert_eq!(
            store.get_all_progress("u2").unwrap(),
            BTreeMap::from([(4, true), (7, false)])
        );
    }

    #[test]
    fn test_clear() {
        let store = MemoryProgressStore::new();
        store.save_user("u1", &profile("A")).unwrap();
        store.update_progress("u1", 1, true).unwrap();

        store.clear().unwrap();

        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemoryProgressStore::new());
        let mut handles = vec![];

        for i in 0..10u32 {
            let store_clone = Arc::clone(&store);
            let handle = thread::spawn(move || {
                let user = format!("u{}", i);
                store_clone.save_user(&user, &profile(&user)).unwrap();
                store_clone.update_progress(&user, i, true).unwrap();
                store_clone.get_progress(&user, i).unwrap();
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.user_count().unwrap(), 10);
        assert_eq!(store.record_count().unwrap(), 10);
    }

    // =========================================================================
    // Property-based tests
    // =========================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_ops() -> impl Strategy<Value = Vec<(u8, ResourceId, bool)>> {
            prop::collection::vec((0u8..3, 0u32..8, any::<bool>()), 0..40)
        }

        proptest! {
            // Property: unseen (user, resource) pairs read as false
            #[test]
            fn prop_unseen_pair_is_false(user in "[a-z]{1,8}", resource_id in any::<u32>()) {
                let store = MemoryProgressStore::new();
                prop_assert!(!store.get_progress(&user, resource_id).unwrap());
            }

            // Property: get_all_progress reflects the last write per resource
            #[test]
            fn prop_all_progress_is_last_write(ops in arb_ops()) {
                let store = MemoryProgressStore::new();
                let mut expected: BTreeMap<ResourceId, bool> = BTreeMap::new();

                for (user, resource_id, completed) in &ops {
                    let user_id = format!("u{}", user);
                    store.update_progress(&user_id, *resource_id, *completed).unwrap();
                    if *user == 0 {
                        expected.insert(*resource_id, *completed);
                    }
                }

                prop_assert_eq!(store.get_all_progress("u0").unwrap(), expected);
            }

            // Property: clearing one user never touches another
            #[test]
            fn prop_clear_isolated(ops in arb_ops()) {
                let store = MemoryProgressStore::new();
                for (user, resource_id, completed) in &ops {
                    store
                        .update_progress(&format!("u{}", user), *resource_id, *completed)
                        .unwrap();
                }
                let before_u1 = store.get_all_progress("u1").unwrap();

                store.clear_user_data("u0").unwrap();

                prop_assert!(store.get_all_progress("u0").unwrap().is_empty());
                prop_assert_eq!(store.get_all_progress("u1").unwrap(), before_u1);
            }
        }
    }
}
