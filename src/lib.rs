//! trailmap - personalized learning paths
//!
//! trailmap turns a learner profile into a short, rating-ordered learning
//! path drawn from a resource catalog, and tracks per-resource completion
//! so progress through the path can be reported.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod planner;
pub mod recommend;
pub mod stats;
pub mod storage;
pub mod util;

pub use config::Config;
pub use core::{
    Catalog, Difficulty, Experience, LearningPath, LearningStyle, Milestone, Resource, ResourceId,
    ResourceType, UserProfile,
};
pub use error::{Result, TrailmapError};
pub use planner::Planner;
pub use recommend::{generate_path, MAX_PATH_RESOURCES};
pub use stats::{summarize, MilestoneStatus, PathProgress};
pub use storage::{MemoryProgressStore, ProgressStore};

// CLI commands
pub use cli::{CatalogCommand, GenerateCommand, TrackCommand};
