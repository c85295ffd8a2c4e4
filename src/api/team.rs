//! Admin team member editor endpoints.

use std::sync::Arc;

use axum::{extract::Path, Extension, Json};
use serde::Deserialize;

use super::{panel_response, ApiResult};
use crate::auth::Session;
use crate::models::TeamMemberFields;
use crate::panel::PanelSnapshot;

#[derive(Debug, Deserialize)]
pub struct SortOrderRequest {
    /// Raw form input; parsed leniently.
    pub value: String,
}

/// POST /api/admin/team/form
pub async fn open_team_member_form(
    Extension(session): Extension<Arc<Session>>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.new_team_member_form()?;
    panel_response(&panel, None)
}

/// POST /api/admin/team/{id}/edit
pub async fn edit_team_member(
    Extension(session): Extension<Arc<Session>>,
    Path(id): Path<String>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.edit_team_member(&id)?;
    panel_response(&panel, None)
}

/// PUT /api/admin/team/form
pub async fn update_team_member_form(
    Extension(session): Extension<Arc<Session>>,
    Json(fields): Json<TeamMemberFields>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.update_team_member_form(fields)?;
    panel_response(&panel, None)
}

/// PUT /api/admin/team/form/sort-order
pub async fn set_team_sort_order(
    Extension(session): Extension<Arc<Session>>,
    Json(request): Json<SortOrderRequest>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.set_team_sort_order(&request.value)?;
    panel_response(&panel, None)
}

/// POST /api/admin/team/form/submit
pub async fn submit_team_member(
    Extension(session): Extension<Arc<Session>>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    let message = panel.submit_team_member().await?;
    panel_response(&panel, Some(message))
}

/// DELETE /api/admin/team/form
pub async fn cancel_team_member_form(
    Extension(session): Extension<Arc<Session>>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.cancel_team_member_form()?;
    panel_response(&panel, None)
}

/// DELETE /api/admin/team/{id}
pub async fn delete_team_member(
    Extension(session): Extension<Arc<Session>>,
    Path(id): Path<String>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    let message = panel.delete_team_member(&id).await?;
    panel_response(&panel, Some(message))
}
