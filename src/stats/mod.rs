//! Progress metrics for trailmap.
//!
//! Percent complete, hours studied and per-milestone completion are derived
//! on demand from a path and the progress store; nothing here is persisted.

pub mod progress;

pub use progress::{summarize, MilestoneStatus, PathProgress};
