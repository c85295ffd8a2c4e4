//! Admin project editor endpoints.

use std::sync::Arc;

use axum::{extract::Path, Extension, Json};
use serde::Deserialize;

use super::{panel_response, ApiResult};
use crate::auth::Session;
use crate::panel::{PanelSnapshot, ProjectFormInput};

#[derive(Debug, Deserialize)]
pub struct AddImageRequest {
    pub image_url: String,
}

/// POST /api/admin/projects/form - Open an empty project form.
pub async fn open_project_form(
    Extension(session): Extension<Arc<Session>>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.new_project_form()?;
    panel_response(&panel, None)
}

/// POST /api/admin/projects/{id}/edit - Open the form for an existing project.
pub async fn edit_project(
    Extension(session): Extension<Arc<Session>>,
    Path(id): Path<String>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.edit_project(&id)?;
    panel_response(&panel, None)
}

/// PUT /api/admin/projects/form - Replace the form's scalar fields.
pub async fn update_project_form(
    Extension(session): Extension<Arc<Session>>,
    Json(input): Json<ProjectFormInput>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.update_project_form(input)?;
    panel_response(&panel, None)
}

/// POST /api/admin/projects/form/images - Append a gallery image URL.
pub async fn add_project_image(
    Extension(session): Extension<Arc<Session>>,
    Json(request): Json<AddImageRequest>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.add_additional_image(request.image_url)?;
    panel_response(&panel, None)
}

/// DELETE /api/admin/projects/form/images/{index} - Drop a gallery entry.
pub async fn remove_project_image(
    Extension(session): Extension<Arc<Session>>,
    Path(index): Path<usize>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.remove_additional_image(index)?;
    panel_response(&panel, None)
}

/// POST /api/admin/projects/form/submit - Save the form and its gallery.
pub async fn submit_project(
    Extension(session): Extension<Arc<Session>>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    let message = panel.submit_project().await?;
    panel_response(&panel, Some(message))
}

/// DELETE /api/admin/projects/form - Close the form without saving.
pub async fn cancel_project_form(
    Extension(session): Extension<Arc<Session>>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.cancel_project_form()?;
    panel_response(&panel, None)
}

/// DELETE /api/admin/projects/{id} - Delete a project and its images.
pub async fn delete_project(
    Extension(session): Extension<Arc<Session>>,
    Path(id): Path<String>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    let message = panel.delete_project(&id).await?;
    panel_response(&panel, Some(message))
}
