//! Admin testimonial editor endpoints.

use std::sync::Arc;

use axum::{extract::Path, Extension, Json};

use super::{panel_response, ApiResult};
use crate::auth::Session;
use crate::models::TestimonialFields;
use crate::panel::PanelSnapshot;

/// POST /api/admin/testimonials/form
pub async fn open_testimonial_form(
    Extension(session): Extension<Arc<Session>>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.new_testimonial_form()?;
    panel_response(&panel, None)
}

/// POST /api/admin/testimonials/{id}/edit
pub async fn edit_testimonial(
    Extension(session): Extension<Arc<Session>>,
    Path(id): Path<String>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.edit_testimonial(&id)?;
    panel_response(&panel, None)
}

/// PUT /api/admin/testimonials/form
pub async fn update_testimonial_form(
    Extension(session): Extension<Arc<Session>>,
    Json(fields): Json<TestimonialFields>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.update_testimonial_form(fields)?;
    panel_response(&panel, None)
}

/// POST /api/admin/testimonials/form/submit
pub async fn submit_testimonial(
    Extension(session): Extension<Arc<Session>>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    let message = panel.submit_testimonial().await?;
    panel_response(&panel, Some(message))
}

/// DELETE /api/admin/testimonials/form
pub async fn cancel_testimonial_form(
    Extension(session): Extension<Arc<Session>>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.cancel_testimonial_form()?;
    panel_response(&panel, None)
}

/// DELETE /api/admin/testimonials/{id}
pub async fn delete_testimonial(
    Extension(session): Extension<Arc<Session>>,
    Path(id): Path<String>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    let message = panel.delete_testimonial(&id).await?;
    panel_response(&panel, Some(message))
}
