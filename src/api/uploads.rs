//! Admin image upload endpoints.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    Extension,
};
use serde::{Deserialize, Serialize};

use super::{ApiResponse, ApiResult};
use crate::auth::Session;
use crate::errors::AppError;
use crate::panel::{PanelSnapshot, UploadTarget};
use crate::AppState;

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// One of `main`, `additional`, `team`, `hero`.
    pub target: String,
    /// Slide index, required for `hero`.
    pub slide: Option<usize>,
}

impl UploadQuery {
    fn upload_target(&self) -> Result<UploadTarget, AppError> {
        match (self.target.as_str(), self.slide) {
            ("main", _) => Ok(UploadTarget::ProjectMainImage),
            ("additional", _) => Ok(UploadTarget::ProjectAdditionalImage),
            ("team", _) => Ok(UploadTarget::TeamMemberImage),
            ("hero", Some(index)) => Ok(UploadTarget::HeroSlide(index)),
            ("hero", None) => Err(AppError::BadRequest(
                "Hero slide uploads need a slide index".to_string(),
            )),
            (other, _) => Err(AppError::BadRequest(format!(
                "Unknown upload target: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteUploadQuery {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct UploadedImage {
    pub url: String,
    pub panel: PanelSnapshot,
}

/// POST /api/admin/uploads?target=... - Store an image and place its URL.
pub async fn upload_image(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> ApiResult<UploadedImage> {
    let target = query.upload_target()?;

    let mut bytes = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Multipart error: {}", e);
        AppError::BadRequest("Malformed multipart body".to_string())
    })? {
        if field.name() == Some(FILE_FIELD) {
            let data = field.bytes().await.map_err(|e| {
                tracing::warn!("Failed to read upload bytes: {}", e);
                AppError::BadRequest("Failed to read uploaded file".to_string())
            })?;
            bytes = Some(data.to_vec());
            break;
        }
    }

    let bytes = bytes.ok_or_else(|| {
        AppError::Validation(format!("Missing multipart field '{}'", FILE_FIELD))
    })?;
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if bytes.len() > state.config.max_upload_bytes {
        return Err(AppError::Validation(format!(
            "Image exceeds the {} byte limit",
            state.config.max_upload_bytes
        )));
    }

    let mut panel = session.panel.lock().await;
    let url = panel.upload_image(target, bytes).await?;

    Ok(ApiResponse::with_message(
        UploadedImage {
            url,
            panel: panel.snapshot(),
        },
        "Image uploaded successfully!",
    ))
}

/// DELETE /api/admin/uploads?url=... - Remove a stored image.
pub async fn delete_upload(
    Extension(session): Extension<Arc<Session>>,
    Query(query): Query<DeleteUploadQuery>,
) -> ApiResult<()> {
    let mut panel = session.panel.lock().await;
    panel.delete_uploaded_image(&query.url).await?;
    Ok(ApiResponse::with_message((), "Image deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(target: &str, slide: Option<usize>) -> UploadQuery {
        UploadQuery {
            target: target.to_string(),
            slide,
        }
    }

    #[test]
    fn test_upload_targets() {
        assert_eq!(
            query("main", None).upload_target(),
            Ok(UploadTarget::ProjectMainImage)
        );
        assert_eq!(
            query("hero", Some(2)).upload_target(),
            Ok(UploadTarget::HeroSlide(2))
        );
        assert!(query("hero", None).upload_target().is_err());
        assert!(query("banner", None).upload_target().is_err());
    }
}
