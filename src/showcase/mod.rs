//! Public project detail view.
//!
//! Builds the gallery and the related-projects strip shown on a project page.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::Project;

/// How many related projects a detail page shows.
pub const RELATED_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    /// Main image first, then the stored images by sort order, no repeats.
    pub gallery: Vec<String>,
    pub related: Vec<Project>,
}

impl ProjectDetail {
    pub fn build(project: Project, all: &[Project]) -> Self {
        let gallery = compose_gallery(&project);
        let related = related_projects(&project, all);
        Self {
            project,
            gallery,
            related,
        }
    }
}

/// Display gallery for a project.
///
/// Empty URLs are skipped and a URL seen earlier is not repeated.
pub fn compose_gallery(project: &Project) -> Vec<String> {
    let mut images: Vec<_> = project.project_images.iter().collect();
    images.sort_by_key(|img| img.sort_order);

    let mut seen = HashSet::new();
    std::iter::once(project.main_image.as_str())
        .chain(images.into_iter().map(|img| img.image_url.as_str()))
        .filter(|url| !url.is_empty())
        .filter(|url| seen.insert(*url))
        .map(str::to_string)
        .collect()
}

/// Up to [`RELATED_LIMIT`] other projects of the same category, in `all` order.
pub fn related_projects(project: &Project, all: &[Project]) -> Vec<Project> {
    all.iter()
        .filter(|p| p.id != project.id && p.category == project.category)
        .take(RELATED_LIMIT)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectCategory, ProjectImage};

    fn project(id: &str, category: ProjectCategory, main: &str, images: &[(&str, i64)]) -> Project {
        Project {
            id: id.to_string(),
            title: format!("Project {}", id),
            category,
            location: "Lisbon".to_string(),
            year: "2024".to_string(),
            description: String::new(),
            details: String::new(),
            client: String::new(),
            area: String::new(),
            duration: String::new(),
            featured: false,
            main_image: main.to_string(),
            created_at: String::new(),
            updated_at: String::new(),
            project_images: images
                .iter()
                .map(|(url, order)| ProjectImage {
                    id: format!("{}-{}", id, order),
                    project_id: id.to_string(),
                    image_url: url.to_string(),
                    alt_text: None,
                    sort_order: *order,
                    created_at: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_gallery_orders_by_sort_order() {
        let p = project(
            "1",
            ProjectCategory::Residential,
            "main.jpg",
            &[("c.jpg", 3), ("a.jpg", 1), ("b.jpg", 2)],
        );
        assert_eq!(
            compose_gallery(&p),
            vec!["main.jpg", "a.jpg", "b.jpg", "c.jpg"]
        );
    }

    #[test]
    fn test_gallery_drops_repeats_of_main_image() {
        let p = project("1", ProjectCategory::Residential, "x", &[("x", 1), ("y", 2)]);
        assert_eq!(compose_gallery(&p), vec!["x", "y"]);
    }

    #[test]
    fn test_gallery_skips_empty_urls() {
        let p = project("1", ProjectCategory::Residential, "", &[("", 1), ("y", 2)]);
        assert_eq!(compose_gallery(&p), vec!["y"]);
    }

    #[test]
    fn test_related_same_category_excluding_self() {
        let all = vec![
            project("1", ProjectCategory::Commercial, "m", &[]),
            project("2", ProjectCategory::Commercial, "m", &[]),
            project("3", ProjectCategory::Residential, "m", &[]),
            project("4", ProjectCategory::Commercial, "m", &[]),
            project("5", ProjectCategory::Commercial, "m", &[]),
            project("6", ProjectCategory::Commercial, "m", &[]),
        ];
        let related = related_projects(&all[0], &all);
        let ids: Vec<_> = related.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4", "5"]);
    }

    #[test]
    fn test_detail_build() {
        let all = vec![
            project("1", ProjectCategory::Hospitality, "m.jpg", &[("g.jpg", 1)]),
            project("2", ProjectCategory::Hospitality, "n.jpg", &[]),
        ];
        let detail = ProjectDetail::build(all[0].clone(), &all);
        assert_eq!(detail.gallery, vec!["m.jpg", "g.jpg"]);
        assert_eq!(detail.related.len(), 1);
    }
}
