//! Project and project image models.

use serde::{Deserialize, Serialize};

/// Showcase category of a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProjectCategory {
    Residential,
    Commercial,
    Hospitality,
    #[serde(rename = "Mixed-Use")]
    MixedUse,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 4] = [
        ProjectCategory::Residential,
        ProjectCategory::Commercial,
        ProjectCategory::Hospitality,
        ProjectCategory::MixedUse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Residential => "Residential",
            ProjectCategory::Commercial => "Commercial",
            ProjectCategory::Hospitality => "Hospitality",
            ProjectCategory::MixedUse => "Mixed-Use",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Additional gallery image attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectImage {
    pub id: String,
    pub project_id: String,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    pub sort_order: i64,
    pub created_at: String,
}

/// Insert payload for a project image row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProjectImage {
    pub project_id: String,
    pub image_url: String,
    pub alt_text: Option<String>,
    pub sort_order: i64,
}

/// A showcased project with its embedded gallery rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub category: ProjectCategory,
    pub location: String,
    pub year: String,
    pub description: String,
    pub details: String,
    pub client: String,
    pub area: String,
    pub duration: String,
    pub featured: bool,
    pub main_image: String,
    pub created_at: String,
    pub updated_at: String,
    /// Ordered by `sort_order` ascending.
    #[serde(default)]
    pub project_images: Vec<ProjectImage>,
}

/// Scalar columns of a project, written as a whole on create and update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectFields {
    pub title: String,
    pub category: ProjectCategory,
    pub location: String,
    pub year: String,
    pub description: String,
    pub details: String,
    pub client: String,
    pub area: String,
    pub duration: String,
    pub featured: bool,
    pub main_image: String,
}
