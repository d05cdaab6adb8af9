//! Learning path generation.
//!
//! Generation is a pure function of a profile and a catalog. It keeps no
//! state between calls apart from the process-wide path id sequence.

use chrono::{DateTime, Utc};

use crate::core::{generate_milestones, generate_path_id, LearningPath, Resource, UserProfile};
use crate::error::Result;
use crate::recommend::scoring::rank_candidates;

/// Maximum number of resources in a generated path.
pub const MAX_PATH_RESOURCES: usize = 6;

/// Generate a learning path for `profile` from `catalog`.
///
/// # Errors
///
/// Returns `InvalidProfile` when the profile has no interests or a blank
/// interest. A profile that matches nothing is not an error: it yields a
/// path with no resources and an estimated duration of "0 hours".
pub fn generate_path(profile: &UserProfile, catalog: &[Resource]) -> Result<LearningPath> {
    generate_path_at(profile, catalog, Utc::now())
}

/// Generate a learning path using `now` as the generation time.
///
/// Milestone due dates are computed from `now`.
pub fn generate_path_at(
    profile: &UserProfile,
    catalog: &[Resource],
    now: DateTime<Utc>,
) -> Result<LearningPath> {
    profile.validate()?;

    let candidates = rank_candidates(profile, catalog);
    let candidate_count = candidates.len();

    let resources: Vec<Resource> = candidates
        .into_iter()
        .take(MAX_PATH_RESOURCES)
        .cloned()
        .collect();

    let estimated_hours = resources
        .iter()
        .fold(0u32, |total, r| total.saturating_add(r.duration_hours()));

    let milestones = generate_milestones(&resources, now);

    // validate() guarantees at least one interest
    let first_interest = &profile.interests[0];

    tracing::debug!(
        candidates = candidate_count,
        selected = resources.len(),
        estimated_hours,
        "generated learning path"
    );

    Ok(LearningPath {
        path_id: generate_path_id(now),
        title: format!("{} Learning Journey", first_interest),
        description: format!(
            "Personalized path for mastering {}",
            profile.interests.join(", ")
        ),
        estimated_hours,
        resources,
        milestones,
        generated_at: now,
    })
}
