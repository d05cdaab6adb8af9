//! The synchronous API surface over the generator and the progress store.
//!
//! A `Planner` owns a catalog and a store. Callers hand it profiles and
//! completion changes; it hands back paths and progress.

use std::collections::BTreeMap;

use crate::core::{Catalog, LearningPath, ResourceId, UserProfile};
use crate::error::Result;
use crate::recommend::generate_path;
use crate::stats::{summarize, PathProgress};
use crate::storage::ProgressStore;

/// Path generation and progress tracking over one catalog and one store.
pub struct Planner<S: ProgressStore> {
    catalog: Catalog,
    store: S,
}

impl<S: ProgressStore> Planner<S> {
    /// Create a planner.
    pub fn new(catalog: Catalog, store: S) -> Self {
        Self { catalog, store }
    }

    /// The catalog paths are generated from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generate a path for `profile` without saving anything.
    ///
    /// # Errors
    ///
    /// Returns `InvalidProfile` if the profile has no usable interests.
    pub fn generate_path(&self, profile: &UserProfile) -> Result<LearningPath> {
        generate_path(profile, self.catalog.resources())
    }

    /// Save the user, generate a path and append it to their history.
    ///
    /// Nothing is saved if the profile is invalid.
    pub fn onboard(&self, user_id: &str, profile: &UserProfile) -> Result<LearningPath> {
        let path = self.generate_path(profile)?;
        self.store.save_user(user_id, profile)?;
        self.store.save_learning_path(user_id, &path)?;
        tracing::info!(
            user_id,
            path_id = %path.path_id,
            resources = path.resources.len(),
            "user onboarded"
        );
        Ok(path)
    }

    /// Mark a resource complete or incomplete for a user.
    pub fn record_completion(
        &self,
        user_id: &str,
        resource_id: ResourceId,
        completed: bool,
    ) -> Result<()> {
        self.store.update_progress(user_id, resource_id, completed)
    }

    /// Whether the user has completed the resource.
    pub fn query_progress(&self, user_id: &str, resource_id: ResourceId) -> Result<bool> {
        self.store.get_progress(user_id, resource_id)
    }

    /// Every completion flag recorded for the user.
    pub fn query_all_progress(&self, user_id: &str) -> Result<BTreeMap<ResourceId, bool>> {
        self.store.get_all_progress(user_id)
    }

    /// The user's path history, oldest first.
    pub fn list_paths(&self, user_id: &str) -> Result<Vec<LearningPath>> {
        self.store.get_learning_paths(user_id)
    }

    /// The user's most recently generated path.
    pub fn latest_path(&self, user_id: &str) -> Result<Option<LearningPath>> {
        Ok(self.store.get_learning_paths(user_id)?.pop())
    }

    /// Remove everything stored for the user.
    pub fn reset_user(&self, user_id: &str) -> Result<()> {
        self.store.clear_user_data(user_id)?;
        tracing::info!(user_id, "user reset");
        Ok(())
    }

    /// Derived progress metrics for `path` from the user's stored flags.
    pub fn path_progress(&self, user_id: &str, path: &LearningPath) -> Result<PathProgress> {
        let progress = self.store.get_all_progress(user_id)?;
        Ok(summarize(path, &progress))
    }
}
