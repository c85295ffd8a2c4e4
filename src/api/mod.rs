//! REST API module.
//!
//! Public read endpoints for the website, login, and the admin panel
//! endpoints that drive a session's [`AdminPanel`](crate::panel::AdminPanel).

mod auth;
mod panel;
mod projects;
mod public;
mod settings;
mod team;
mod testimonials;
mod uploads;
mod users;

pub use auth::*;
pub use panel::*;
pub use projects::*;
pub use public::*;
pub use settings::*;
pub use team::*;
pub use testimonials::*;
pub use uploads::*;
pub use users::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::panel::{AdminPanel, PanelSnapshot};

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    /// User-facing confirmation of a completed action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Panel state after an action, with the action's confirmation if any.
fn panel_response(panel: &AdminPanel, message: Option<&str>) -> ApiResult<PanelSnapshot> {
    let snapshot = panel.snapshot();
    Ok(match message {
        Some(message) => ApiResponse::with_message(snapshot, message),
        None => ApiResponse::new(snapshot),
    })
}
