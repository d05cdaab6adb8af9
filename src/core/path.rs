//! Learning path and milestone types.
//!
//! A learning path is generated once per profile and never changes
//! afterwards. Completion is tracked outside the path, in the progress store.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::resource::{Resource, ResourceId};

/// Days between consecutive milestone due dates.
pub const MILESTONE_INTERVAL_DAYS: i64 = 7;

/// Process-wide sequence appended to path ids.
///
/// Never reset, so two paths generated within the same millisecond still
/// receive different ids.
static PATH_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// A generated learning path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LearningPath {
    /// Unique identifier (format: lp_<unix-millis>_<seq>).
    pub path_id: String,
    /// Display title, derived from the first interest.
    pub title: String,
    /// Description listing every interest.
    pub description: String,
    /// Sum of the selected resources' durations, in hours.
    pub estimated_hours: u32,
    /// Selected resources, highest rated first.
    pub resources: Vec<Resource>,
    /// One milestone per resource, in the same order.
    pub milestones: Vec<Milestone>,
    /// When the path was generated.
    pub generated_at: DateTime<Utc>,
}

impl LearningPath {
    /// Estimated duration rendered as "<n> hours".
    pub fn estimated_duration(&self) -> String {
        format!("{} hours", self.estimated_hours)
    }

    /// Whether the path contains the given resource.
    pub fn contains_resource(&self, resource_id: ResourceId) -> bool {
        self.resources.iter().any(|r| r.id == resource_id)
    }

    /// Ids of the path's resources, in path order.
    pub fn resource_ids(&self) -> Vec<ResourceId> {
        self.resources.iter().map(|r| r.id).collect()
    }

    /// Check if the path selected nothing.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// A checkpoint in a learning path, one per resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    /// 1-based position within the path.
    pub id: u32,
    /// "Complete <resource title>".
    pub title: String,
    /// Copy of the resource description.
    pub description: String,
    /// Always false at generation time. The progress store is authoritative.
    pub completed: bool,
    /// Generation time plus `id` intervals of seven days, clamped to the
    /// latest representable instant.
    pub due_date: DateTime<Utc>,
}

impl Milestone {
    /// Build the milestone for the resource at 1-based `position`.
    pub fn for_resource(resource: &Resource, position: u32, generated_at: DateTime<Utc>) -> Self {
        Self {
            id: position,
            title: format!("Complete {}", resource.title),
            description: resource.description.clone(),
            completed: false,
            due_date: generated_at
                .checked_add_signed(Duration::days(
                    i64::from(position) * MILESTONE_INTERVAL_DAYS,
                ))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

/// Build milestones aligned 1:1 with `resources`.
pub fn generate_milestones(resources: &[Resource], generated_at: DateTime<Utc>) -> Vec<Milestone> {
    resources
        .iter()
        .zip(1u32..)
        .map(|(resource, position)| Milestone::for_resource(resource, position, generated_at))
        .collect()
}

/// Generate a process-unique path id.
pub fn generate_path_id(now: DateTime<Utc>) -> String {
    let seq = PATH_SEQUENCE.fetch_add(1, Ordering::SeqCst);
    format!("lp_{}_{:04}", now.timestamp_millis(), seq)
}
