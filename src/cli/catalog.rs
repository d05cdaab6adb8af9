//! Catalog command for trailmap.
//!
//! Lists catalog resources, optionally filtered by topic and difficulty.

use serde::{Deserialize, Serialize};

use crate::core::{Catalog, Difficulty, Resource, ResourceId};

/// Options for the catalog command.
#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Keep resources with a topic containing this text.
    pub topic: Option<String>,
    /// Keep resources of this difficulty.
    pub difficulty: Option<Difficulty>,
}

/// Output format for the catalog command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogOutput {
    /// Whether the listing was successful.
    pub success: bool,
    /// Number of resources listed.
    pub count: usize,
    /// The resources.
    pub resources: Vec<ResourceInfo>,
    /// Error message if listing failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Simplified resource info for output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceInfo {
    pub id: ResourceId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub provider: String,
    pub duration: String,
    pub difficulty: String,
    pub rating: f64,
    pub topics: Vec<String>,
    pub url: String,
}

impl From<&Resource> for ResourceInfo {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.id,
            title: resource.title.clone(),
            kind: resource.kind.display_name().to_string(),
            provider: resource.provider.clone(),
            duration: resource.duration.clone(),
            difficulty: resource.difficulty.display_name().to_string(),
            rating: resource.rating,
            topics: resource.topics.clone(),
            url: resource.url.clone(),
        }
    }
}

impl CatalogOutput {
    /// Create a successful output.
    pub fn success(resources: Vec<ResourceInfo>) -> Self {
        Self {
            success: true,
            count: resources.len(),
            resources,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            count: 0,
            resources: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The catalog command implementation.
pub struct CatalogCommand {
    catalog: Catalog,
}

impl CatalogCommand {
    /// Create a new catalog command.
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Run the catalog command.
    pub fn run(&self, options: &CatalogOptions) -> CatalogOutput {
        if options
            .topic
            .as_deref()
            .is_some_and(|topic| topic.trim().is_empty())
        {
            return CatalogOutput::failure("topic filter must not be blank");
        }

        let resources = self
            .catalog
            .search(options.topic.as_deref().map(str::trim), options.difficulty)
            .into_iter()
            .map(ResourceInfo::from)
            .collect();

        CatalogOutput::success(resources)
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &CatalogOutput, options: &CatalogOptions) -> String {
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
    fn format_human_readable(&self, output: &CatalogOutput) -> String {
        if !output.success {
            return format!(
                "Catalog listing failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        if output.resources.is_empty() {
            return "No resources match.\n".to_string();
        }

        let mut lines = vec![format!("Found {} resource(s):\n", output.count)];

        for resource in &output.resources {
            lines.push(format!(
                "{:>3}. {} ({}, {})",
                resource.id, resource.title, resource.kind, resource.provider
            ));
            lines.push(format!(
                "     {} | {} | rating {:.1}",
                resource.difficulty, resource.duration, resource.rating
            ));
            lines.push(format!("     Topics: {}", resource.topics.join(", ")));
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> CatalogCommand {
        CatalogCommand::new(Catalog::builtin())
    }

    #[test]
    fn test_catalog_output_failure() {
        let output = CatalogOutput::failure("bad filter");

        assert!(!output.success);
        assert_eq!(output.count, 0);
        assert_eq!(output.error, Some("bad filter".to_string()));
    }

    #[test]
    fn test_catalog_lists_everything() {
        let output = command().run(&CatalogOptions::default());

        assert!(output.success);
        assert_eq!(output.count, 10);
        let ids: Vec<ResourceId> = output.resources.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_catalog_filters() {
        let options = CatalogOptions {
            topic: Some("JavaScript".to_string()),
            difficulty: Some(Difficulty::Beginner),
            ..Default::default()
        };
        let output = command().run(&options);

        assert!(output.success);
        assert!(output.count > 0);
        assert!(output.resources.iter().all(|r| r.difficulty == "beginner"
            && r.topics.iter().any(|t| t.contains("javascript"))));
    }

    #[test]
    fn test_catalog_blank_topic_fails() {
        let options = CatalogOptions {
            topic: Some("  ".to_string()),
            ..Default::default()
        };
        let output = command().run(&options);

        assert!(!output.success);
    }

    #[test]
    fn test_format_output_json() {
        let cmd = command();
        let output = cmd.run(&CatalogOptions::default());
        let options = CatalogOptions {
            json: true,
            ..Default::default()
        };

        let formatted = cmd.format_output(&output, &options);
        assert!(formatted.contains("\"success\": true"));
        assert!(formatted.contains("\"type\": \"course\""));
    }

    #[test]
    fn test_format_output_quiet() {
        let cmd = command();
        let output = cmd.run(&CatalogOptions::default());
        let options = CatalogOptions {
            quiet: true,
            ..Default::default()
        };

        assert!(cmd.format_output(&output, &options).is_empty());
    }

    #[test]
    fn test_format_output_human_readable() {
        let cmd = command();
        let output = cmd.run(&CatalogOptions::default());

        let formatted = cmd.format_output(&output, &CatalogOptions::default());
        assert!(formatted.contains("Found 10 resource(s)"));
        assert!(formatted.contains("Topics:"));
    }

    #[test]
    fn test_format_output_no_match() {
        let cmd = command();
        let options = CatalogOptions {
            topic: Some("knitting".to_string()),
            ..Default::default()
        };
        let output = cmd.run(&options);

        assert!(output.success);
        assert!(cmd
            .format_output(&output, &options)
            .contains("No resources match"));
    }
}
