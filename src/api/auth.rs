//! Login, logout and current-operator endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    Extension, Json,
};
use serde::Serialize;

use super::{success, ApiResponse, ApiResult};
use crate::auth::{token_from_headers, Session};
use crate::db::Gateway;
use crate::errors::AppError;
use crate::models::{LoginRequest, Operator};
use crate::panel::AdminPanel;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Operator,
}

/// POST /api/auth/login - Exchange credentials for a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    let Some(user) = state
        .repo
        .authenticate(request.username.trim(), &request.password)
        .await?
    else {
        tracing::info!(username = %request.username, "Failed login attempt");
        return Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    };

    let operator = Operator::from(&user);
    let gateway: Arc<dyn Gateway> = state.repo.clone();
    let mut panel = AdminPanel::new(operator.clone(), gateway, state.storage.clone());
    // A failed initial load is reported through the panel's banner.
    let _ = panel.load_data().await;

    let session = state.sessions.create(operator.clone(), panel).await;
    tracing::info!(username = %operator.username, role = operator.role.as_str(), "Operator logged in");

    Ok(ApiResponse::with_message(
        LoginResponse {
            token: session.token.clone(),
            user: operator,
        },
        "Logged in",
    ))
}

/// POST /api/auth/logout - End the current session.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<()> {
    if let Some(token) = token_from_headers(&headers) {
        state.sessions.remove(&token).await;
    }
    Ok(ApiResponse::with_message((), "Logged out"))
}

/// GET /api/auth/me - The operator behind the current session.
pub async fn current_operator(Extension(session): Extension<Arc<Session>>) -> ApiResult<Operator> {
    success(session.operator.clone())
}
