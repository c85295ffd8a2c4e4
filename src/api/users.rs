//! Operator account management. Super admins only.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::{success, ApiResponse, ApiResult};
use crate::auth::Session;
use crate::errors::AppError;
use crate::models::{AdminUser, CreateAdminUserRequest, Role, UpdateAdminUserRequest};
use crate::AppState;

fn require_super_admin(session: &Session) -> Result<(), AppError> {
    if session.operator.role == Role::SuperAdmin {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You do not have permission to manage admin users.".to_string(),
        ))
    }
}

/// GET /api/admin/users
pub async fn list_admin_users(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
) -> ApiResult<Vec<AdminUser>> {
    require_super_admin(&session)?;
    success(state.repo.list_admin_users().await?)
}

/// POST /api/admin/users
pub async fn create_admin_user(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    Json(request): Json<CreateAdminUserRequest>,
) -> ApiResult<AdminUser> {
    require_super_admin(&session)?;
    if request.username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    let user = state.repo.create_admin_user(&request).await?;
    tracing::info!(username = %user.username, role = user.role.as_str(), "Created admin user");
    Ok(ApiResponse::with_message(user, "Admin user created"))
}

/// PUT /api/admin/users/{id}
///
/// Deactivating an account or changing its role ends its open sessions.
pub async fn update_admin_user(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAdminUserRequest>,
) -> ApiResult<AdminUser> {
    require_super_admin(&session)?;
    if matches!(request.username.as_deref(), Some(name) if name.trim().is_empty()) {
        return Err(AppError::Validation("Username cannot be empty".to_string()));
    }
    if matches!(request.password.as_deref(), Some("")) {
        return Err(AppError::Validation("Password cannot be empty".to_string()));
    }

    let user = state.repo.update_admin_user(&id, &request).await?;
    if request.active == Some(false) || request.role.is_some() {
        let revoked = state.sessions.revoke_operator(&user.id).await;
        tracing::info!(user_id = %user.id, revoked, "Revoked sessions after account change");
    }
    Ok(ApiResponse::with_message(user, "Admin user updated"))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_admin_user(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    require_super_admin(&session)?;
    if session.operator.id == id {
        return Err(AppError::Validation(
            "You cannot delete your own account".to_string(),
        ));
    }

    state.repo.delete_admin_user(&id).await?;
    state.sessions.revoke_operator(&id).await;
    Ok(ApiResponse::with_message((), "Admin user deleted"))
}
