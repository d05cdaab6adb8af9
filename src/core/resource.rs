//! Catalog resource types.
//!
//! A resource is one immutable catalog entry: a course, video, article or
//! project tagged with topics and a difficulty tier.

use serde::{Deserialize, Serialize};

/// Identifier of a catalog resource.
pub type ResourceId = u32;

/// A learning resource from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    /// Unique identifier within the catalog.
    pub id: ResourceId,
    /// Display title.
    pub title: String,
    /// Kind of resource.
    #[serde(rename = "type")]
    pub kind: ResourceType,
    /// Who publishes the resource.
    pub provider: String,
    /// Duration as written in the catalog, e.g. "40 hours".
    pub duration: String,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Lowercase topic tags.
    pub topics: Vec<String>,
    /// Average rating on a 0-5 scale.
    pub rating: f64,
    /// Short description.
    pub description: String,
    /// Where to find the resource.
    pub url: String,
}

impl Resource {
    /// Duration in whole hours, 0 when the duration string is malformed.
    pub fn duration_hours(&self) -> u32 {
        parse_duration_hours(&self.duration)
    }

    /// Whether any topic contains `needle`, ignoring case.
    pub fn has_topic_containing(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.topics
            .iter()
            .any(|topic| topic.to_lowercase().contains(&needle))
    }
}

/// Kind of learning resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Course,
    Video,
    Article,
    Project,
}

impl ResourceType {
    /// Get the display name for this resource type.
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceType::Course => "course",
            ResourceType::Video => "video",
            ResourceType::Article => "article",
            ResourceType::Project => "project",
        }
    }
}

/// Difficulty tier of a resource.
///
/// Unrecognised tiers deserialize as [`Difficulty::Unknown`] and score like
/// beginner material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    #[serde(other)]
    Unknown,
}

impl Difficulty {
    /// Numeric tier used by the admissibility filter.
    ///
    /// beginner = 1, intermediate = 2, advanced = 3, anything else = 1.
    pub fn score(&self) -> u8 {
        match self {
            Difficulty::Beginner => 1,
            Difficulty::Intermediate => 2,
            Difficulty::Advanced => 3,
            Difficulty::Unknown => 1,
        }
    }

    /// Get the display name for this difficulty.
    pub fn display_name(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Unknown => "unknown",
        }
    }
}

/// Parse the leading hour count out of a duration string.
///
/// Reads the integer prefix after optional leading whitespace and an
/// optional `+`: "40 hours" is 40, "2h" is 2. Anything without a leading
/// non-negative integer, or too large for `u32`, is 0.
pub fn parse_duration_hours(duration: &str) -> u32 {
    let trimmed = duration.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    unsigned[..digits_end].parse::<u32>().unwrap_or(0)
}
