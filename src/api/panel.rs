//! Admin panel state endpoints.

use std::sync::Arc;

use axum::Extension;

use super::{panel_response, ApiResult};
use crate::auth::Session;
use crate::panel::PanelSnapshot;

/// GET /api/admin/panel - Current panel state.
pub async fn get_panel(Extension(session): Extension<Arc<Session>>) -> ApiResult<PanelSnapshot> {
    let panel = session.panel.lock().await;
    panel_response(&panel, None)
}

/// POST /api/admin/reload - Reload lists and settings.
pub async fn reload_panel(
    Extension(session): Extension<Arc<Session>>,
) -> ApiResult<PanelSnapshot> {
    let mut panel = session.panel.lock().await;
    panel.load_data().await?;
    panel_response(&panel, None)
}
