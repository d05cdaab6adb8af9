//! Track command for trailmap.
//!
//! Runs one tracking session against an in-memory store: onboard the
//! profile, apply completion changes, then report progress through the
//! generated path. Nothing outlives the process.

use serde::{Deserialize, Serialize};

use crate::cli::generate::format_path;
use crate::cli::{format_date, ProfileInput};
use crate::core::{LearningPath, ResourceId};
use crate::error::Result;
use crate::planner::Planner;
use crate::stats::PathProgress;
use crate::storage::ProgressStore;

/// User id used when none is given.
pub const DEFAULT_USER_ID: &str = "local";

/// Options for the track command.
#[derive(Debug, Clone, Default)]
pub struct TrackOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// The learner profile.
    pub profile: ProfileInput,
    /// User id to track under. Defaults to [`DEFAULT_USER_ID`].
    pub user_id: Option<String>,
    /// Resources to mark complete.
    pub complete: Vec<ResourceId>,
    /// Resources to mark incomplete, applied after `complete`.
    pub incomplete: Vec<ResourceId>,
}

/// Output format for the track command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackOutput {
    /// Whether tracking was successful.
    pub success: bool,
    /// The user progress was recorded for.
    pub user_id: String,
    /// The path generated at onboarding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<LearningPath>,
    /// Progress through the path after the changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<PathProgress>,
    /// Recorded resource ids that are not part of the path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outside_path: Vec<ResourceId>,
    /// Error message if tracking failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TrackOutput {
    /// Create a successful output.
    pub fn success(
        user_id: impl Into<String>,
        path: LearningPath,
        progress: PathProgress,
        outside_path: Vec<ResourceId>,
    ) -> Self {
        Self {
            success: true,
            user_id: user_id.into(),
            path: Some(path),
            progress: Some(progress),
            outside_path,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(user_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            user_id: user_id.into(),
            path: None,
            progress: None,
            outside_path: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The track command implementation.
pub struct TrackCommand<S: ProgressStore> {
    planner: Planner<S>,
    date_format: String,
}

impl<S: ProgressStore> TrackCommand<S> {
    /// Create a new track command.
    pub fn new(planner: Planner<S>, date_format: impl Into<String>) -> Self {
        Self {
            planner,
            date_format: date_format.into(),
        }
    }

    /// Run the track command.
    pub fn run(&self, options: &TrackOptions) -> TrackOutput {
        let user_id = options.user_id.as_deref().unwrap_or(DEFAULT_USER_ID);

        if user_id.trim().is_empty() {
            return TrackOutput::failure(user_id, "user id must not be blank");
        }

        match self.track(user_id, options) {
            Ok((path, progress, outside_path)) => {
                TrackOutput::success(user_id, path, progress, outside_path)
            }
            Err(e) => TrackOutput::failure(user_id, e.to_string()),
        }
    }

    fn track(
        &self,
        user_id: &str,
        options: &TrackOptions,
    ) -> Result<(LearningPath, PathProgress, Vec<ResourceId>)> {
        let profile = options.profile.resolve()?;
        let path = self.planner.onboard(user_id, &profile)?;

        let changes = options
            .complete
            .iter()
            .map(|&id| (id, true))
            .chain(options.incomplete.iter().map(|&id| (id, false)));

        let mut outside_path = Vec::new();
        for (resource_id, completed) in changes {
            self.planner
                .record_completion(user_id, resource_id, completed)?;
            if !path.contains_resource(resource_id) && !outside_path.contains(&resource_id) {
                outside_path.push(resource_id);
            }
        }

        let progress = self.planner.path_progress(user_id, &path)?;
        Ok((path, progress, outside_path))
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &TrackOutput, options: &TrackOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    /// Format output as human-readable text.
    fn format_human_readable(&self, output: &TrackOutput) -> String {
        let (path, progress) = match (&output.path, &output.progress, output.success) {
            (Some(path), Some(progress), true) => (path, progress),
            _ => {
                return format!(
                    "Tracking failed: {}\n",
                    output.error.as_deref().unwrap_or("unknown error")
                )
            }
        };

        let mut lines = vec![format_path(path, &self.date_format)];

        lines.push(format!("Progress for {}:", output.user_id));
        lines.push(format!(
            "  {}/{} resources complete ({}%)",
            progress.completed_resources,
            progress.total_resources,
            progress.rounded_percent()
        ));
        lines.push(format!(
            "  {} hours studied, {} hours remaining",
            progress.hours_studied, progress.hours_remaining
        ));

        if progress.is_finished() {
            lines.push("  Path complete.".to_string());
        } else if let Some(next) = progress.next_milestone() {
            lines.push(format!(
                "  Next: {} (due {})",
                next.title,
                format_date(&next.due_date, &self.date_format)
            ));
        }

        if !output.outside_path.is_empty() {
            let ids: Vec<String> = output.outside_path.iter().map(|id| id.to_string()).collect();
            lines.push(format!(
                "  Recorded but not in this path: {}",
                ids.join(", ")
            ));
        }

        lines.push(String::new());
        lines.join("\n")
    }
}
