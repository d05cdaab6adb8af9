//! Core types for trailmap.
//!
//! Resources and the catalog that holds them, learner profiles, and the
//! learning paths generated from the two.

pub mod catalog;
pub mod path;
pub mod profile;
pub mod resource;

pub use catalog::{Catalog, MAX_RATING};
pub use path::{
    generate_milestones, generate_path_id, LearningPath, Milestone, MILESTONE_INTERVAL_DAYS,
};
pub use profile::{Experience, LearningStyle, UserProfile};
pub use resource::{parse_duration_hours, Difficulty, Resource, ResourceId, ResourceType};
