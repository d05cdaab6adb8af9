//! Candidate selection for learning paths.
//!
//! A resource is a candidate when it passes two independent rules:
//!
//! - **Interest match**: some profile interest is a case-insensitive
//!   substring of some resource topic ("script" matches "javascript").
//! - **Admissibility**: the resource's difficulty tier is at least the
//!   learner's experience tier. Material below the learner's tier is
//!   dropped; harder material always passes.
//!
//! Candidates are ordered by rating, highest first. Equal ratings keep
//! catalog order.

use crate::core::{Experience, Resource, UserProfile};

/// Whether any of `interests` is a substring of any of the resource's topics.
pub fn matches_interest(interests: &[String], resource: &Resource) -> bool {
    interests
        .iter()
        .any(|interest| resource.has_topic_containing(interest))
}

/// Whether the resource is not below the learner's experience tier.
///
/// Note the direction: `difficulty >= experience`. A beginner is offered
/// advanced material; an expert is only offered advanced material.
pub fn is_admissible(resource: &Resource, experience: Experience) -> bool {
    resource.difficulty.score() >= experience.score()
}

/// Filter `catalog` to the profile's candidates, highest rated first.
///
/// The sort is stable, so resources with equal ratings appear in the same
/// relative order as in the catalog.
pub fn rank_candidates<'a>(profile: &UserProfile, catalog: &'a [Resource]) -> Vec<&'a Resource> {
    let mut candidates: Vec<&Resource> = catalog
        .iter()
        .filter(|r| matches_interest(&profile.interests, r))
        .filter(|r| is_admissible(r, profile.experience))
        .collect();

    // total_cmp keeps the comparator a total order even for NaN ratings.
    // Adding 0.0 folds -0.0 into 0.0 so the two compare equal.
    candidates.sort_by(|a, b| (b.rating + 0.0).total_cmp(&(a.rating + 0.0)));
    candidates
}
