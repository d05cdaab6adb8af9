//! Generate command for trailmap.
//!
//! Builds a profile from a file and/or flags and prints the learning path
//! generated for it. Nothing is saved.

use serde::{Deserialize, Serialize};

use crate::cli::{format_date, ProfileInput};
use crate::core::{Catalog, LearningPath};
use crate::recommend::generate_path;

/// Options for the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// The learner profile.
    pub profile: ProfileInput,
}

/// Output format for the generate command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    /// Whether generation was successful.
    pub success: bool,
    /// The generated path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<LearningPath>,
    /// Error message if generation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateOutput {
    /// Create a successful output.
    pub fn success(path: LearningPath) -> Self {
        Self {
            success: true,
            path: Some(path),
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            path: None,
            error: Some(error.into()),
        }
    }
}

/// The generate command implementation.
pub struct GenerateCommand {
    catalog: Catalog,
    date_format: String,
}

impl GenerateCommand {
    /// Create a new generate command.
    pub fn new(catalog: Catalog, date_format: impl Into<String>) -> Self {
        Self {
            catalog,
            date_format: date_format.into(),
        }
    }

    /// Run the generate command.
    pub fn run(&self, options: &GenerateOptions) -> GenerateOutput {
        let profile = match options.profile.resolve() {
            Ok(profile) => profile,
            Err(e) => return GenerateOutput::failure(e.to_string()),
        };

        match generate_path(&profile, self.catalog.resources()) {
            Ok(path) => GenerateOutput::success(path),
            Err(e) => GenerateOutput::failure(e.to_string()),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &GenerateOutput, options: &GenerateOptions) -> String {
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
    fn format_human_readable(&self, output: &GenerateOutput) -> String {
        match (&output.path, output.success) {
            (Some(path), true) => format_path(path, &self.date_format),
            _ => format!(
                "Path generation failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}

/// Render a path as text: header, resources, then milestones.
pub(crate) fn format_path(path: &LearningPath, date_format: &str) -> String {
    let mut lines = vec![
        path.title.clone(),
        path.description.clone(),
        format!(
            "Estimated duration: {} | ID: {}",
            path.estimated_duration(),
            path.path_id
        ),
        String::new(),
    ];

    if path.is_empty() {
        lines.push("No resources match this profile.".to_string());
        lines.push(String::new());
        return lines.join("\n");
    }

    lines.push("Resources:".to_string());
    for (i, resource) in path.resources.iter().enumerate() {
        lines.push(format!(
            "{}. [{}] {} ({}) {} | rating {:.1}",
            i + 1,
            resource.id,
            resource.title,
            resource.difficulty.display_name(),
            resource.duration,
            resource.rating
        ));
    }

    lines.push(String::new());
    lines.push("Milestones:".to_string());
    for milestone in &path.milestones {
        lines.push(format!(
            "{}. {} (due {})",
            milestone.id,
            milestone.title,
            format_date(&milestone.due_date, date_format)
        ));
    }
    lines.push(String::new());

    lines.join("\n")
}
