//! Progress storage traits for trailmap.
//!
//! This module defines the `ProgressStore` trait: users, their generated
//! paths and per-resource completion flags.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::{LearningPath, ResourceId, UserProfile};
use crate::error::Result;

/// Trait for progress storage backends.
///
/// Lookups of unknown users or resources are not errors: they return
/// `None`, an empty collection or `false`. Errors are reserved for the
/// backend itself failing.
pub trait ProgressStore: Send + Sync {
    /// Save a user's profile. Last write wins.
    fn save_user(&self, user_id: &str, profile: &UserProfile) -> Result<()>;

    /// Retrieve a user's profile.
    ///
    /// Returns `Ok(None)` if the user doesn't exist.
    fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Append a path to the user's path history.
    ///
    /// Earlier paths are kept; nothing is replaced.
    fn save_learning_path(&self, user_id: &str, path: &LearningPath) -> Result<()>;

    /// All paths saved for the user, oldest first.
    fn get_learning_paths(&self, user_id: &str) -> Result<Vec<LearningPath>>;

    /// Set the completion flag for (user, resource). Last write wins.
    fn update_progress(&self, user_id: &str, resource_id: ResourceId, completed: bool)
        -> Result<()>;

    /// The completion flag for (user, resource), `false` if never set.
    fn get_progress(&self, user_id: &str, resource_id: ResourceId) -> Result<bool>;

    /// Every completion flag recorded for the user.
    fn get_all_progress(&self, user_id: &str) -> Result<BTreeMap<ResourceId, bool>>;

    /// Remove the user, their path history and all their progress records.
    ///
    /// Returns `Ok(())` even if the user doesn't exist.
    fn clear_user_data(&self, user_id: &str) -> Result<()>;
}

/// Blanket implementation of ProgressStore for Arc-wrapped stores.
///
/// Lets a planner and a test share one store.
impl<T: ProgressStore + ?Sized> ProgressStore for Arc<T> {
    fn save_user(&self, user_id: &str, profile: &UserProfile) -> Result<()> {
        (**self).save_user(user_id, profile)
    }

    fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>> {
        (**self).get_user(user_id)
    }

    fn save_learning_path(&self, user_id: &str, path: &LearningPath) -> Result<()> {
        (**self).save_learning_path(user_id, path)
    }

    fn get_learning_paths(&self, user_id: &str) -> Result<Vec<LearningPath>> {
        (**self).get_learning_paths(user_id)
    }

    fn update_progress(
        &self,
        user_id: &str,
        resource_id: ResourceId,
        completed: bool,
    ) -> Result<()> {
        (**self).update_progress(user_id, resource_id, completed)
    }

    fn get_progress(&self, user_id: &str, resource_id: ResourceId) -> Result<bool> {
        (**self).get_progress(user_id, resource_id)
    }

    fn get_all_progress(&self, user_id: &str) -> Result<BTreeMap<ResourceId, bool>> {
        (**self).get_all_progress(user_id)
    }

    fn clear_user_data(&self, user_id: &str) -> Result<()> {
        (**self).clear_user_data(user_id)
    }
}

/// Test utilities for ProgressStore implementations.
#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::core::{Catalog, Experience};
    use crate::recommend::generate_path;

    /// Exercise the full ProgressStore contract against `store`.
    pub fn test_progress_store_contract<S: ProgressStore>(store: &S) {
        let profile = UserProfile::new(vec!["javascript".to_string()], Experience::Beginner)
            .with_name("Ada");

        // Unknown user reads are benign
        assert!(store.get_user("u1").unwrap().is_none());
        assert!(store.get_learning_paths("u1").unwrap().is_empty());
        assert!(!store.get_progress("u1", 3).unwrap());
        assert!(store.get_all_progress("u1").unwrap().is_empty());

        // Users
        store.save_user("u1", &profile).unwrap();
        assert_eq!(store.get_user("u1").unwrap().unwrap().name, "Ada");

        // Paths accumulate in order
        let catalog = Catalog::builtin();
        let first = generate_path(&profile, catalog.resources()).unwrap();
        let second = generate_path(&profile, catalog.resources()).unwrap();
        store.save_learning_path("u1", &first).unwrap();
        store.save_learning_path("u1", &second).unwrap();

        let paths = store.get_learning_paths("u1").unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].path_id, first.path_id);
        assert_eq!(paths[1].path_id, second.path_id);

        // Progress
        store.update_progress("u1", 3, true).unwrap();
        assert!(store.get_progress("u1", 3).unwrap());
        assert_eq!(
            store.get_all_progress("u1").unwrap(),
            BTreeMap::from([(3, true)])
        );

        // Clearing removes everything for the user
        store.clear_user_data("u1").unwrap();
        assert!(store.get_user("u1").unwrap().is_none());
        assert!(store.get_learning_paths("u1").unwrap().is_empty());
        assert!(store.get_all_progress("u1").unwrap().is_empty());
        assert!(!store.get_progress("u1", 3).unwrap());

        // Clearing again succeeds
        store.clear_user_data("u1").unwrap();
    }
}
