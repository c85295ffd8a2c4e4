//! Project editor actions and the gallery sync.

use super::{AdminPanel, ProjectForm, ProjectFormInput};
use crate::db::Gateway;
use crate::errors::AppError;
use crate::models::{NewProjectImage, Project, ProjectFields, ProjectImage};

const DENIED: &str = "You do not have permission to modify projects.";
pub(super) const FORM: &str = "project";
const SAVE_FAILED: &str = "Error saving project. Please try again.";
const DELETE_FAILED: &str = "Error deleting project. Please try again.";

/// Write a project and replace its gallery with `gallery`.
///
/// Steps run in this order and stop at the first failure, leaving whatever
/// already succeeded in place:
/// 1. delete each image row of `existing`, one call per row;
/// 2. update `existing`, or create a new project when there is none;
/// 3. insert one image row per entry of `gallery`, in list order, with
///    `sort_order` starting at 1.
///
/// `gallery` may repeat URLs; each entry gets its own row. On failure the
/// returned [`SyncFailure`] describes what is left in storage.
pub async fn sync_project(
    gateway: &dyn Gateway,
    existing: Option<&Project>,
    fields: &ProjectFields,
    gallery: &[String],
) -> Result<Project, SyncFailure> {
    let old_images = existing
        .map(|p| p.project_images.as_slice())
        .unwrap_or_default();
    for (deleted, image) in old_images.iter().enumerate() {
        if let Err(error) = gateway.delete_project_image(&image.id).await {
            let stored = existing.map(|p| with_images(p, old_images[deleted..].to_vec()));
            return Err(SyncFailure { error, stored });
        }
    }

    let saved = match existing {
        Some(project) => gateway.update_project(&project.id, fields).await,
        None => gateway.create_project(fields).await,
    };
    let mut saved = match saved {
        Ok(saved) => saved,
        Err(error) => {
            let stored = existing.map(|p| with_images(p, Vec::new()));
            return Err(SyncFailure { error, stored });
        }
    };

    saved.project_images.clear();
    for (index, image_url) in gallery.iter().enumerate() {
        let image = NewProjectImage {
            project_id: saved.id.clone(),
            image_url: image_url.clone(),
            // The main image is image 1 on the public page.
            alt_text: Some(format!("{} - Image {}", saved.title, index + 2)),
            sort_order: index as i64 + 1,
        };
        match gateway.create_project_image(&image).await {
            Ok(row) => saved.project_images.push(row),
            Err(error) => {
                return Err(SyncFailure {
                    error,
                    stored: Some(saved),
                })
            }
        }
    }

    Ok(saved)
}

/// A gallery sync that stopped part way.
#[derive(Debug, PartialEq)]
pub struct SyncFailure {
    pub error: AppError,
    /// The project as it now stands in storage, with the image rows that
    /// still exist. `None` when no project row exists.
    pub stored: Option<Project>,
}

fn with_images(project: &Project, project_images: Vec<ProjectImage>) -> Project {
    Project {
        project_images,
        ..project.clone()
    }
}

impl AdminPanel {
    /// Open an empty project form.
    pub fn new_project_form(&mut self) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        self.project_editor.open_new();
        Ok(())
    }

    /// Open the form pre-populated from the project as last loaded.
    pub fn edit_project(&mut self, id: &str) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        let project = self
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Project not found: {}", id)))?;

        let form = ProjectForm::from_project(&project);
        self.project_editor.open_existing(project, form);
        Ok(())
    }

    pub fn update_project_form(&mut self, input: ProjectFormInput) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        self.project_editor.ensure_open(FORM)?;
        self.project_editor.form.apply_input(input);
        Ok(())
    }

    /// Append a URL to the desired gallery.
    pub fn add_additional_image(&mut self, image_url: String) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        self.project_editor.ensure_open(FORM)?;
        if image_url.trim().is_empty() {
            return Err(AppError::Validation("Image URL is required".to_string()));
        }
        self.project_editor.form.additional_images.push(image_url);
        Ok(())
    }

    /// Drop the gallery entry at `index`. Later entries shift down by one;
    /// an index past the end leaves the list unchanged.
    pub fn remove_additional_image(&mut self, index: usize) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        self.project_editor.ensure_open(FORM)?;
        let images = &mut self.project_editor.form.additional_images;
        if index < images.len() {
            images.remove(index);
        }
        Ok(())
    }

    /// Persist the open form and its gallery, then reload.
    ///
    /// On failure the form stays open with its contents untouched. When the
    /// sync got as far as writing something, the form is pointed at what
    /// was stored so a resubmit replaces exactly those rows.
    pub async fn submit_project(&mut self) -> Result<&'static str, AppError> {
        self.ensure_can_edit(DENIED)?;
        self.project_editor.ensure_open(FORM)?;

        let fields = self.project_editor.form.to_fields()?;
        let gateway = self.gateway.clone();
        let result = sync_project(
            gateway.as_ref(),
            self.project_editor.editing.as_ref(),
            &fields,
            &self.project_editor.form.additional_images,
        )
        .await;

        let saved = match result {
            Ok(saved) => saved,
            Err(SyncFailure { error, stored }) => {
                tracing::error!(error = %error, "Error saving project");
                if let Some(stored) = stored {
                    self.project_editor.editing = Some(stored);
                    self.refresh().await;
                }
                return Err(AppError::ActionFailed(SAVE_FAILED.to_string()));
            }
        };

        let updated = self.project_editor.editing.is_some();
        tracing::info!(project_id = %saved.id, updated, "Saved project");

        self.refresh().await;
        self.project_editor.close();

        Ok(if updated {
            "Project updated successfully!"
        } else {
            "Project created successfully!"
        })
    }

    pub fn cancel_project_form(&mut self) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        self.project_editor.close();
        Ok(())
    }

    /// Delete a project; its images go with it.
    pub async fn delete_project(&mut self, id: &str) -> Result<&'static str, AppError> {
        self.ensure_can_edit(DENIED)?;
        if let Err(e) = self.gateway.delete_project(id).await {
            tracing::error!(error = %e, project_id = %id, "Error deleting project");
            return Err(AppError::ActionFailed(DELETE_FAILED.to_string()));
        }

        self.refresh().await;
        Ok("Project deleted successfully!")
    }
}
