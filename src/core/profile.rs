//! Learner profile types.
//!
//! A profile is the caller-owned input to path generation: what the learner
//! wants to study, what they already know and how experienced they are.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{Result, TrailmapError};
use crate::util::read_to_string_limited;

/// A learner's self-reported profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Topics of interest, most important first.
    pub interests: Vec<String>,
    /// Skills the learner already has.
    pub current_skills: BTreeSet<String>,
    /// Preferred way of learning.
    pub learning_style: LearningStyle,
    /// Free-text goals.
    pub goals: String,
    /// Self-assessed experience tier.
    pub experience: Experience,
    /// Weekly time budget, e.g. "5-10".
    pub time_commitment: String,
}

impl UserProfile {
    /// Create a profile with the given interests and experience.
    pub fn new(interests: Vec<String>, experience: Experience) -> Self {
        Self {
            interests,
            experience,
            ..Default::default()
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the current skills.
    pub fn with_skills(mut self, skills: impl IntoIterator<Item = String>) -> Self {
        self.current_skills = skills.into_iter().collect();
        self
    }

    /// Set the learning style.
    pub fn with_learning_style(mut self, style: LearningStyle) -> Self {
        self.learning_style = style;
        self
    }

    /// Set the goals.
    pub fn with_goals(mut self, goals: impl Into<String>) -> Self {
        self.goals = goals.into();
        self
    }

    /// Set the weekly time commitment.
    pub fn with_time_commitment(mut self, time_commitment: impl Into<String>) -> Self {
        self.time_commitment = time_commitment.into();
        self
    }

    /// Check the preconditions for path generation.
    ///
    /// Interests must be non-empty, and no interest may be blank: an empty
    /// needle is a substring of every topic and would match the whole
    /// catalog.
    pub fn validate(&self) -> Result<()> {
        if self.interests.is_empty() {
            return Err(TrailmapError::invalid_profile(
                "at least one interest is required",
            ));
        }

        if let Some(index) = self.interests.iter().position(|i| i.trim().is_empty()) {
            return Err(TrailmapError::invalid_profile(format!(
                "interest #{} is blank",
                index + 1
            )));
        }

        Ok(())
    }

    /// Load a profile from a JSON or TOML file, chosen by extension.
    ///
    /// Files without a `.toml` extension are parsed as JSON.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = read_to_string_limited(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Ok(toml::from_str(&content)?)
        } else {
            Ok(serde_json::from_str(&content)?)
        }
    }
}

/// Preferred learning style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStyle {
    #[default]
    Visual,
    Auditory,
    Kinesthetic,
    Reading,
}

/// Self-assessed experience tier.
///
/// Unrecognised tiers deserialize as [`Experience::Unknown`] and score like
/// a beginner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    #[default]
    Beginner,
    Intermediate,
    Expert,
    #[serde(other)]
    Unknown,
}

impl Experience {
    /// Numeric tier used by the admissibility filter.
    ///
    /// beginner = 1, intermediate = 2, expert = 3, anything else = 1.
    pub fn score(&self) -> u8 {
        match self {
            Experience::Beginner => 1,
            Experience::Intermediate => 2,
            Experience::Expert => 3,
            Experience::Unknown => 1,
        }
    }
}
