//! CLI commands for trailmap.
//!
//! - **catalog**: list and filter catalog resources
//! - **generate**: generate a learning path from a profile
//! - **track**: onboard a profile, record completions and report progress

pub mod catalog;
pub mod generate;
pub mod track;

pub use catalog::CatalogCommand;
pub use generate::GenerateCommand;
pub use track::TrackCommand;

use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::core::{Experience, LearningStyle, UserProfile};
use crate::error::Result;

/// Default `chrono` format for due dates.
const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Profile fields given on the command line.
///
/// A profile file, when present, is loaded first and the flags override it
/// field by field. Interests and skills given as flags replace the file's
/// lists rather than extending them.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    /// JSON or TOML profile file.
    pub file: Option<PathBuf>,
    /// Display name.
    pub name: Option<String>,
    /// Topics of interest, in priority order.
    pub interests: Vec<String>,
    /// Skills already held.
    pub skills: Vec<String>,
    /// Preferred learning style.
    pub learning_style: Option<LearningStyle>,
    /// Free-text goals.
    pub goals: Option<String>,
    /// Experience tier.
    pub experience: Option<Experience>,
    /// Weekly time budget.
    pub time_commitment: Option<String>,
}

impl ProfileInput {
    /// Build the profile, reading the profile file first if one is given.
    ///
    /// The result is not validated; path generation does that.
    pub fn resolve(&self) -> Result<UserProfile> {
        let mut profile = match &self.file {
            Some(path) => UserProfile::load_from_file(path)?,
            None => UserProfile::default(),
        };

        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if !self.interests.is_empty() {
            profile.interests = self.interests.clone();
        }
        if !self.skills.is_empty() {
            profile.current_skills = self.skills.iter().cloned().collect();
        }
        if let Some(style) = self.learning_style {
            profile.learning_style = style;
        }
        if let Some(goals) = &self.goals {
            profile.goals = goals.clone();
        }
        if let Some(experience) = self.experience {
            profile.experience = experience;
        }
        if let Some(time) = &self.time_commitment {
            profile.time_commitment = time.clone();
        }

        Ok(profile)
    }
}

/// Format a due date, falling back to `%Y-%m-%d` if `format` is not a
/// valid `chrono` format string.
pub fn format_date(date: &DateTime<Utc>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_ok() {
        return out;
    }
    tracing::warn!(format, "invalid date format, using default");
    date.format(DEFAULT_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_from_flags_only() {
        let input = ProfileInput {
            name: Some("Ada".to_string()),
            interests: vec!["rust".to_string(), "python".to_string()],
            skills: vec!["git".to_string()],
            experience: Some(Experience::Intermediate),
            learning_style: Some(LearningStyle::Reading),
            ..Default::default()
        };

        let profile = input.resolve().unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.interests, vec!["rust", "python"]);
        assert!(profile.current_skills.contains("git"));
        assert_eq!(profile.experience, Experience::Intermediate);
        assert_eq!(profile.learning_style, LearningStyle::Reading);
    }

    #[test]
    fn test_resolve_flags_override_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(
            &path,
            r#"{"name":"Grace","interests":["python"],"experience":"expert","goals":"ship"}"#,
        )
        .unwrap();

        let input = ProfileInput {
            file: Some(path),
            interests: vec!["javascript".to_string()],
            experience: Some(Experience::Beginner),
            ..Default::default()
        };

        let profile = input.resolve().unwrap();
        assert_eq!(profile.name, "Grace");
        assert_eq!(profile.goals, "ship");
        assert_eq!(profile.interests, vec!["javascript"]);
        assert_eq!(profile.experience, Experience::Beginner);
    }

    #[test]
    fn test_resolve_missing_file() {
        let input = ProfileInput {
            file: Some(PathBuf::from("/nonexistent/profile.json")),
            ..Default::default()
        };
        assert!(input.resolve().is_err());
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2026, 3, 9, 12, 0, 0).unwrap();
        assert_eq!(format_date(&date, "%Y-%m-%d"), "2026-03-09");
        assert_eq!(format_date(&date, "%d/%m"), "09/03");
    }

    #[test]
    fn test_format_date_invalid_format_falls_back() {
        let date = Utc.with_ymd_and_hms(2026, 3, 9, 12, 0, 0).unwrap();
        assert_eq!(format_date(&date, "%Q"), "2026-03-09");
    }
}
