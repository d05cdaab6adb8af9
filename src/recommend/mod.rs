//! Recommendation engine for trailmap.
//!
//! This module turns a learner profile and a resource catalog into a
//! learning path. Everything here is a pure function: no I/O and no shared
//! mutable state.

pub mod generator;
pub mod scoring;

pub use generator::{generate_path, generate_path_at, MAX_PATH_RESOURCES};
pub use scoring::{is_admissible, matches_interest, rank_candidates};
