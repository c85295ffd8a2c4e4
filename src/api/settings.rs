//! Admin site settings endpoints.

use std::sync::Arc;

use axum::{extract::Path, Extension, Json};

use super::{panel_response, ApiResult};
use crate::auth::Session;
use crate::panel::{HeroSlideEdit, PanelSnapshot, SettingsEdit};

/// PATCH /api/admin/settings - Edit one stats, contact or social field.
pub async fn edit_setting(
    Extension(session): Extension<Arc<Session>>,
    Json(edit): Json<SettingsEdit>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.edit_setting(edit)?;
    panel_response(&panel, None)
}

/// POST /api/admin/settings/hero-slides - Append an empty slide.
pub async fn add_hero_slide(
    Extension(session): Extension<Arc<Session>>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.add_hero_slide()?;
    panel_response(&panel, None)
}

/// PATCH /api/admin/settings/hero-slides/{index}
pub async fn update_hero_slide(
    Extension(session): Extension<Arc<Session>>,
    Path(index): Path<usize>,
    Json(edit): Json<HeroSlideEdit>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.update_hero_slide(index, edit)?;
    panel_response(&panel, None)
}

/// DELETE /api/admin/settings/hero-slides/{index}
pub async fn remove_hero_slide(
    Extension(session): Extension<Arc<Session>>,
    Path(index): Path<usize>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.remove_hero_slide(index)?;
    panel_response(&panel, None)
}

/// POST /api/admin/settings/save - Persist all four settings.
pub async fn save_site_settings(
    Extension(session): Extension<Arc<Session>>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    let message = panel.save_site_settings().await?;
    panel_response(&panel, Some(message))
}
