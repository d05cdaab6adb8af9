//! Progress storage for trailmap.
//!
//! This module provides the keyed store for users, generated paths and
//! per-resource completion flags. The in-memory backend is the only one;
//! durable storage is left to embedders implementing `ProgressStore`.

pub mod memory;
pub mod traits;

pub use memory::MemoryProgressStore;
pub use traits::ProgressStore;
