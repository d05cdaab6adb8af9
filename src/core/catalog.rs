//! The resource catalog.
//!
//! The catalog is read-only for the life of the process. It is either the
//! built-in fixture or a replacement loaded from a JSON or TOML file.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::core::resource::{Difficulty, Resource, ResourceId, ResourceType};
use crate::error::{Result, TrailmapError};
use crate::util::read_to_string_limited;

/// Highest valid rating.
pub const MAX_RATING: f64 = 5.0;

/// A validated, immutable collection of resources.
///
/// Serializes as a bare array of resources. Deserializing goes through
/// [`Catalog::new`], so a decoded catalog is validated too.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<Resource>", into = "Vec<Resource>")]
pub struct Catalog {
    resources: Vec<Resource>,
}

impl Catalog {
    /// Build a catalog, validating ids and ratings.
    ///
    /// Ids must be unique. Ratings must be finite and within 0-5. Topics are
    /// normalized to lowercase.
    pub fn new(mut resources: Vec<Resource>) -> Result<Self> {
        let mut seen = HashSet::new();
        for resource in &mut resources {
            if !seen.insert(resource.id) {
                return Err(TrailmapError::catalog(format!(
                    "duplicate resource id {}",
                    resource.id
                )));
            }
            if !resource.rating.is_finite() || !(0.0..=MAX_RATING).contains(&resource.rating) {
                return Err(TrailmapError::catalog(format!(
                    "resource {} has rating {} outside 0-{}",
                    resource.id, resource.rating, MAX_RATING
                )));
            }
            // -0.0 sorts below 0.0 under total_cmp
            resource.rating += 0.0;
            for topic in &mut resource.topics {
                *topic = topic.to_lowercase();
            }
        }

        Ok(Self { resources })
    }

    /// The built-in catalog fixture.
    pub fn builtin() -> Self {
        Self {
            resources: builtin_resources(),
        }
    }

    /// Load a catalog from a JSON or TOML file, chosen by extension.
    ///
    /// JSON files hold either a bare array of resources or an object with a
    /// `resources` array. TOML files use `[[resources]]` tables.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = read_to_string_limited(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let resources = if is_toml {
            toml::from_str::<CatalogFile>(&content)?.resources
        } else {
            match serde_json::from_str::<CatalogDocument>(&content)? {
                CatalogDocument::List(resources) => resources,
                CatalogDocument::Wrapped(file) => file.resources,
            }
        };

        tracing::debug!(
            path = %path.display(),
            count = resources.len(),
            "loaded catalog file"
        );

        Self::new(resources)
    }

    /// All resources in catalog order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Look up a resource by id.
    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Resources with a topic containing `topic` (case-insensitive),
    /// optionally restricted to one difficulty tier.
    pub fn search(&self, topic: Option<&str>, difficulty: Option<Difficulty>) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|r| topic.is_none_or(|t| r.has_topic_containing(t)))
            .filter(|r| difficulty.is_none_or(|d| r.difficulty == d))
            .collect()
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl TryFrom<Vec<Resource>> for Catalog {
    type Error = TrailmapError;

    fn try_from(resources: Vec<Resource>) -> Result<Self> {
        Self::new(resources)
    }
}

impl From<Catalog> for Vec<Resource> {
    fn from(catalog: Catalog) -> Self {
        catalog.resources
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    resources: Vec<Resource>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<Resource>),
    Wrapped(CatalogFile),
}

#[allow(clippy::too_many_arguments)]
fn resource(
    id: ResourceId,
    title: &str,
    kind: ResourceType,
    provider: &str,
    duration: &str,
    difficulty: Difficulty,
    topics: &[&str],
    rating: f64,
    description: &str,
    url: &str,
) -> Resource {
    Resource {
        id,
        title: title.to_string(),
        kind,
        provider: provider.to_string(),
        duration: duration.to_string(),
        difficulty,
        topics: topics.iter().map(|t| t.to_string()).collect(),
        rating,
        description: description.to_string(),
        url: url.to_string(),
    }
}

fn builtin_resources() -> Vec<Resource> {
    use Difficulty::*;
    use ResourceType::*;

    vec![
        resource(
            1,
            "Introduction to Web Development",
            Course,
            "FreeCodeCamp",
            "40 hours",
            Beginner,
            &["html", "css", "javascript", "web development"],
            4.8,
            "Learn the fundamentals of web development",
            "https://freecodecamp.org",
        ),
        resource(
            2,
            "React.js Complete Guide",
            Video,
            "YouTube",
            "12 hours",
            Intermediate,
            &["react", "javascript", "frontend"],
            4.7,
            "Comprehensive React.js tutorial series",
            "https://youtube.com",
        ),
        resource(
            3,
            "Data Structures and Algorithms",
            Course,
            "Coursera",
            "60 hours",
            Intermediate,
            &["algorithms", "data structures", "computer science"],
            4.9,
            "Master fundamental CS concepts",
            "https://coursera.org",
        ),
        resource(
            4,
            "Python for Data Science",
            Article,
            "Medium",
            "2 hours",
            Beginner,
            &["python", "data science", "machine learning"],
            4.5,
            "Getting started with Python for data analysis",
            "https://medium.com",
        ),
        resource(
            5,
            "UI/UX Design Principles",
            Course,
            "Udemy",
            "25 hours",
            Beginner,
            &["design", "ui", "ux", "figma"],
            4.6,
            "Learn modern design principles and tools",
            "https://udemy.com",
        ),
        resource(
            6,
            "Advanced JavaScript Concepts",
            Project,
            "GitHub",
            "15 hours",
            Advanced,
            &["javascript", "advanced", "async", "closures"],
            4.8,
            "Build projects to master advanced JS concepts",
            "https://github.com",
        ),
        resource(
            7,
            "Machine Learning Fundamentals",
            Course,
            "Coursera",
            "45 hours",
            Intermediate,
            &["machine learning", "ai", "python", "data science"],
            4.7,
            "Introduction to machine learning algorithms and applications",
            "https://coursera.org",
        ),
        resource(
            8,
            "Mobile App Development with React Native",
            Video,
            "YouTube",
            "20 hours",
            Intermediate,
            &["mobile development", "react native", "javascript"],
            4.6,
            "Build cross-platform mobile apps",
            "https://youtube.com",
        ),
        resource(
            9,
            "Cybersecurity Basics",
            Course,
            "edX",
            "30 hours",
            Beginner,
            &["cybersecurity", "network security", "encryption"],
            4.5,
            "Learn cybersecurity fundamentals and best practices",
            "https://edx.org",
        ),
        resource(
            10,
            "Cloud Computing with AWS",
            Course,
            "AWS Training",
            "35 hours",
            Intermediate,
            &["cloud computing", "aws", "devops"],
            4.8,
            "Master AWS cloud services and deployment",
            "https://aws.amazon.com/training",
        ),
    ]
}
