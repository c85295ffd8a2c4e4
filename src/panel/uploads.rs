//! Image uploads routed into the open forms.

use super::{projects, team, AdminPanel, UploadTarget};
use crate::errors::AppError;

const DENIED: &str = "You do not have permission to upload images.";
const UPLOAD_FAILED: &str = "Error uploading image. Please try again.";

impl AdminPanel {
    /// Store an image and put its URL where `target` says.
    ///
    /// The target form or hero slide is checked before anything is stored.
    pub async fn upload_image(
        &mut self,
        target: UploadTarget,
        bytes: Vec<u8>,
    ) -> Result<String, AppError> {
        self.ensure_can_edit(DENIED)?;
        match target {
            UploadTarget::ProjectMainImage | UploadTarget::ProjectAdditionalImage => {
                self.project_editor.ensure_open(projects::FORM)?
            }
            UploadTarget::TeamMemberImage => self.team_editor.ensure_open(team::FORM)?,
            UploadTarget::HeroSlide(index) => {
                self.hero_slide_mut(index)?;
            }
        }

        let url = match self.storage.upload(bytes).await {
            Ok(url) => url,
            Err(AppError::Validation(msg)) => return Err(AppError::Validation(msg)),
            Err(e) => {
                tracing::error!(error = %e, "Error uploading image");
                return Err(AppError::ActionFailed(UPLOAD_FAILED.to_string()));
            }
        };

        match target {
            UploadTarget::ProjectMainImage => self.project_editor.form.main_image = url.clone(),
            UploadTarget::ProjectAdditionalImage => {
                self.project_editor.form.additional_images.push(url.clone())
            }
            UploadTarget::TeamMemberImage => self.team_editor.form.image_url = url.clone(),
            UploadTarget::HeroSlide(index) => self.hero_slide_mut(index)?.image = url.clone(),
        }

        tracing::debug!(url = %url, ?target, "Stored uploaded image");
        Ok(url)
    }

    /// Remove a previously uploaded image by its public URL.
    pub async fn delete_uploaded_image(&mut self, url: &str) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        self.storage.delete(url).await
    }
}
