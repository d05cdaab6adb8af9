//! Derived progress metrics for a learning path.
//!
//! Metrics are never stored. They are recomputed by joining a path's
//! resources with the user's completion flags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::{LearningPath, Resource, ResourceId};

/// Progress through one learning path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathProgress {
    /// The path these metrics describe.
    pub path_id: String,
    /// Number of resources in the path.
    pub total_resources: usize,
    /// Number of path resources marked complete.
    pub completed_resources: usize,
    /// Completed share of the path, 0-100. An empty path is 0.
    pub percent_complete: f64,
    /// Hours of completed resources.
    pub hours_studied: u32,
    /// Hours of resources not yet completed.
    pub hours_remaining: u32,
    /// Milestones with their completion joined in.
    pub milestones: Vec<MilestoneStatus>,
}

impl PathProgress {
    /// Percent complete rounded to a whole number.
    pub fn rounded_percent(&self) -> u32 {
        self.percent_complete.round() as u32
    }

    /// Check if every resource in a non-empty path is complete.
    pub fn is_finished(&self) -> bool {
        self.total_resources > 0 && self.completed_resources == self.total_resources
    }

    /// The first milestone not yet completed.
    pub fn next_milestone(&self) -> Option<&MilestoneStatus> {
        self.milestones.iter().find(|m| !m.completed)
    }
}

/// A milestone with its resource's completion flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MilestoneStatus {
    /// Milestone id (1-based position).
    pub id: u32,
    /// The resource this milestone tracks.
    pub resource_id: ResourceId,
    /// Milestone title.
    pub title: String,
    /// Whether the resource is complete.
    pub completed: bool,
    /// When the milestone is due.
    pub due_date: DateTime<Utc>,
}

/// Join a path with a user's completion flags.
///
/// Milestones are matched to resources by position, so a milestone is
/// complete exactly when the resource at the same position is. Flags for
/// resources outside the path are ignored.
pub fn summarize(path: &LearningPath, progress: &BTreeMap<ResourceId, bool>) -> PathProgress {
    let is_done = |id: ResourceId| progress.get(&id).copied().unwrap_or(false);

    let (studied, remaining): (Vec<_>, Vec<_>) =
        path.resources.iter().partition(|r| is_done(r.id));

    let total_resources = path.resources.len();
    let completed_resources = studied.len();
    let percent_complete = if total_resources == 0 {
        0.0
    } else {
        completed_resources as f64 / total_resources as f64 * 100.0
    };

    let milestones = path
        .milestones
        .iter()
        .zip(&path.resources)
        .map(|(milestone, resource)| MilestoneStatus {
            id: milestone.id,
            resource_id: resource.id,
            title: milestone.title.clone(),
            completed: is_done(resource.id),
            due_date: milestone.due_date,
        })
        .collect();

    PathProgress {
        path_id: path.path_id.clone(),
        total_resources,
        completed_resources,
        percent_complete,
        hours_studied: sum_hours(&studied),
        hours_remaining: sum_hours(&remaining),
        milestones,
    }
}

fn sum_hours(resources: &[&Resource]) -> u32 {
    resources
        .iter()
        .fold(0u32, |total, r| total.saturating_add(r.duration_hours()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Catalog, Experience, UserProfile};
    use crate::recommend::generate_path_at;
    use chrono::TimeZone;

    fn javascript_path() -> LearningPath {
        let profile = UserProfile::new(vec!["javascript".to_string()], Experience::Beginner);
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap();
        // Resources 1 (40h), 6 (15h), 2 (12h), 8 (20h)
        generate_path_at(&profile, Catalog::builtin().resources(), now).unwrap()
    }

    #[test]
    fn test_no_progress() {
        let path = javascript_path();
        let summary = summarize(&path, &BTreeMap::new());

        assert_eq!(summary.total_resources, 4);
        assert_eq!(summary.completed_resources, 0);
        assert_eq!(summary.rounded_percent(), 0);
        assert_eq!(summary.hours_studied, 0);
        assert_eq!(summary.hours_remaining, 87);
        assert!(!summary.is_finished());
        assert_eq!(summary.next_milestone().unwrap().resource_id, 1);
    }

    #[test]
    fn test_partial_progress() {
        let path = javascript_path();
        let progress = BTreeMap::from([(6, true), (8, true), (2, false)]);
        let summary = summarize(&path, &progress);

        assert_eq!(summary.completed_resources, 2);
        assert!((summary.percent_complete - 50.0).abs() < f64::EPSILON);
        assert_eq!(summary.hours_studied, 35);
        assert_eq!(summary.hours_remaining, 52);

        let completed: Vec<bool> = summary.milestones.iter().map(|m| m.completed).collect();
        assert_eq!(completed, vec![false, true, false, true]);
        assert_eq!(summary.next_milestone().unwrap().id, 1);
    }

    #[test]
    fn test_rounded_percent() {
        let path = javascript_path();
        let progress = BTreeMap::from([(1, true)]);
        let summary = summarize(&path, &progress);
        assert_eq!(summary.rounded_percent(), 25);

        let three = BTreeMap::from([(1, true), (6, true), (2, true)]);
        assert_eq!(summarize(&path, &three).rounded_percent(), 75);
    }

    #[test]
    fn test_finished_path() {
        let path = javascript_path();
        let progress: BTreeMap<ResourceId, bool> =
            path.resource_ids().into_iter().map(|id| (id, true)).collect();
        let summary = summarize(&path, &progress);

        assert!(summary.is_finished());
        assert!((summary.percent_complete - 100.0).abs() < f64::EPSILON);
        assert_eq!(summary.hours_remaining, 0);
        assert!(summary.next_milestone().is_none());
    }

    #[test]
    fn test_progress_outside_path_ignored() {
        let path = javascript_path();
        let progress = BTreeMap::from([(3, true), (10, true)]);
        let summary = summarize(&path, &progress);

        assert_eq!(summary.completed_resources, 0);
        assert_eq!(summary.hours_studied, 0);
    }

    #[test]
    fn test_empty_path_is_zero_percent() {
        let profile = UserProfile::new(vec!["knitting".to_string()], Experience::Beginner);
        let path = generate_path_at(&profile, Catalog::builtin().resources(), Utc::now()).unwrap();
        let summary = summarize(&path, &BTreeMap::from([(1, true)]));

        assert_eq!(summary.total_resources, 0);
        assert_eq!(summary.percent_complete, 0.0);
        assert!(!summary.is_finished());
        assert!(summary.milestones.is_empty());
    }

    #[test]
    fn test_milestone_due_dates_carried_over() {
        let path = javascript_path();
        let summary = summarize(&path, &BTreeMap::new());

        for (status, milestone) in summary.milestones.iter().zip(&path.milestones) {
            assert_eq!(status.due_date, milestone.due_date);
            assert_eq!(status.title, milestone.title);
        }
    }
}
