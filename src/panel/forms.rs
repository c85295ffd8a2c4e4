//! Editable form state held by the admin panel between requests.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{
    ContactField, HeroSlideField, Project, ProjectCategory, ProjectFields, SocialField,
    StatField, TeamMemberFields, TestimonialFields, MAX_RATING, MIN_RATING,
};

/// A form plus the record it edits, if any.
#[derive(Debug, Clone)]
pub struct Editor<F, R> {
    pub open: bool,
    /// Record as it was at the last load; `None` means the form creates.
    pub editing: Option<R>,
    pub form: F,
}

impl<F: Default, R> Default for Editor<F, R> {
    fn default() -> Self {
        Self {
            open: false,
            editing: None,
            form: F::default(),
        }
    }
}

impl<F: Default, R> Editor<F, R> {
    pub fn open_new(&mut self) {
        self.open = true;
        self.editing = None;
        self.form = F::default();
    }

    pub fn open_existing(&mut self, record: R, form: F) {
        self.open = true;
        self.editing = Some(record);
        self.form = form;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.editing = None;
        self.form = F::default();
    }
}

impl<F, R> Editor<F, R> {
    /// `Validation` error naming the form when it is closed.
    pub fn ensure_open(&self, name: &str) -> Result<(), AppError> {
        if self.open {
            Ok(())
        } else {
            Err(AppError::Validation(format!("No {} form is open", name)))
        }
    }
}

/// Serializable view of an [`Editor`].
#[derive(Debug, Clone, Serialize)]
pub struct EditorView<F> {
    pub open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editing_id: Option<String>,
    pub form: F,
}

/// In-memory project form.
///
/// `additional_images` is the desired gallery, excluding the main image,
/// in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectForm {
    pub title: String,
    pub category: Option<ProjectCategory>,
    pub location: String,
    pub year: String,
    pub description: String,
    pub details: String,
    pub client: String,
    pub area: String,
    pub duration: String,
    pub featured: bool,
    pub main_image: String,
    pub additional_images: Vec<String>,
}

/// Scalar project form fields sent by the editor. The gallery list is
/// managed separately.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectFormInput {
    pub title: String,
    pub category: Option<ProjectCategory>,
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

impl ProjectForm {
    /// Pre-populate from a loaded project, gallery in its stored order.
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            category: Some(project.category),
            location: project.location.clone(),
            year: project.year.clone(),
            description: project.description.clone(),
            details: project.details.clone(),
            client: project.client.clone(),
            area: project.area.clone(),
            duration: project.duration.clone(),
            featured: project.featured,
            main_image: project.main_image.clone(),
            additional_images: project
                .project_images
                .iter()
                .map(|img| img.image_url.clone())
                .collect(),
        }
    }

    /// Overwrite the scalar fields, keeping the gallery list.
    pub fn apply_input(&mut self, input: ProjectFormInput) {
        self.title = input.title;
        self.category = input.category;
        self.location = input.location;
        self.year = input.year;
        self.description = input.description;
        self.details = input.details;
        self.client = input.client;
        self.area = input.area;
        self.duration = input.duration;
        self.featured = input.featured;
        self.main_image = input.main_image;
    }

    /// Check required fields and produce the row to write.
    pub fn to_fields(&self) -> Result<ProjectFields, AppError> {
        let required = [
            ("Title", &self.title),
            ("Location", &self.location),
            ("Year", &self.year),
            ("Client", &self.client),
            ("Area", &self.area),
            ("Duration", &self.duration),
            ("Description", &self.description),
            ("Details", &self.details),
        ];
        require_all(&required)?;

        let category = self
            .category
            .ok_or_else(|| AppError::Validation("Category is required".to_string()))?;
        if self.main_image.trim().is_empty() {
            return Err(AppError::Validation("Main image is required".to_string()));
        }

        Ok(ProjectFields {
            title: self.title.clone(),
            category,
            location: self.location.clone(),
            year: self.year.clone(),
            description: self.description.clone(),
            details: self.details.clone(),
            client: self.client.clone(),
            area: self.area.clone(),
            duration: self.duration.clone(),
            featured: self.featured,
            main_image: self.main_image.clone(),
        })
    }
}

pub(crate) fn validate_team_member(form: &TeamMemberFields) -> Result<(), AppError> {
    require_all(&[("Name", &form.name), ("Position", &form.position)])?;
    if form.image_url.trim().is_empty() {
        return Err(AppError::Validation("Profile image is required".to_string()));
    }
    Ok(())
}

pub(crate) fn validate_testimonial(form: &TestimonialFields) -> Result<(), AppError> {
    require_all(&[
        ("Client name", &form.client_name),
        ("Client position", &form.client_position),
        ("Testimonial text", &form.testimonial_text),
    ])?;
    if !(MIN_RATING..=MAX_RATING).contains(&form.rating) {
        return Err(AppError::Validation(format!(
            "Rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )));
    }
    Ok(())
}

fn require_all(fields: &[(&str, &String)]) -> Result<(), AppError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((label, _)) => Err(AppError::Validation(format!("{} is required", label))),
        None => Ok(()),
    }
}

/// Where an uploaded image ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    ProjectMainImage,
    ProjectAdditionalImage,
    TeamMemberImage,
    HeroSlide(usize),
}

/// A single-field edit to the in-memory site settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum SettingsEdit {
    /// `value` is raw form input; non-numeric input is stored as 0.
    Stats { field: StatField, value: String },
    ContactInfo { field: ContactField, value: String },
    SocialLinks { field: SocialField, value: String },
}

/// A single-field edit to one hero slide.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HeroSlideEdit {
    pub field: HeroSlideField,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> ProjectForm {
        ProjectForm {
            title: "Harbor House".to_string(),
            category: Some(ProjectCategory::Residential),
            location: "Porto".to_string(),
            year: "2024".to_string(),
            description: "Renovation".to_string(),
            details: "Full renovation of a harbor house".to_string(),
            client: "Private".to_string(),
            area: "300 m2".to_string(),
            duration: "1 year".to_string(),
            featured: true,
            main_image: "https://cdn.example/main.jpg".to_string(),
            additional_images: vec!["a.jpg".to_string()],
        }
    }

    #[test]
    fn test_complete_form_converts() {
        let fields = complete_form().to_fields().unwrap();
        assert_eq!(fields.title, "Harbor House");
        assert_eq!(fields.category, ProjectCategory::Residential);
        assert!(fields.featured);
    }

    #[test]
    fn test_main_image_is_required() {
        let mut form = complete_form();
        form.main_image.clear();
        assert_eq!(
            form.to_fields(),
            Err(AppError::Validation("Main image is required".to_string()))
        );
    }

    #[test]
    fn test_category_and_text_fields_are_required() {
        let mut form = complete_form();
        form.category = None;
        assert!(form.to_fields().is_err());

        let mut form = complete_form();
        form.duration = "   ".to_string();
        assert_eq!(
            form.to_fields(),
            Err(AppError::Validation("Duration is required".to_string()))
        );
    }

    #[test]
    fn test_apply_input_keeps_gallery() {
        let mut form = complete_form();
        form.apply_input(ProjectFormInput {
            title: "Renamed".to_string(),
            ..Default::default()
        });
        assert_eq!(form.title, "Renamed");
        assert_eq!(form.additional_images, vec!["a.jpg".to_string()]);
        assert_eq!(form.category, None);
    }

    #[test]
    fn test_testimonial_rating_range() {
        let mut form = TestimonialFields {
            client_name: "Ana".to_string(),
            client_position: "Owner".to_string(),
            testimonial_text: "Great".to_string(),
            ..Default::default()
        };
        assert!(validate_testimonial(&form).is_ok());
        form.rating = 0;
        assert!(validate_testimonial(&form).is_err());
        form.rating = 6;
        assert!(validate_testimonial(&form).is_err());
    }

    #[test]
    fn test_settings_edit_wire_format() {
        let edit: SettingsEdit = serde_json::from_str(
            r#"{"section":"stats","field":"happyClients","value":"abc"}"#,
        )
        .unwrap();
        assert_eq!(
            edit,
            SettingsEdit::Stats {
                field: StatField::HappyClients,
                value: "abc".to_string()
            }
        );
    }
}
