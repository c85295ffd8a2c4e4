//! Disk-backed object store served by the static `/uploads` route.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::{ImageKind, ObjectStore};
use crate::errors::AppError;

/// URL path under which uploaded files are served.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Writes images to a local directory and hands out URLs below `public_url`.
#[derive(Debug, Clone)]
pub struct DiskObjectStore {
    root: PathBuf,
    url_prefix: String,
}

impl DiskObjectStore {
    pub fn new(root: PathBuf, public_url: &str) -> Self {
        Self {
            root,
            url_prefix: format!("{}{}/", public_url.trim_end_matches('/'), UPLOADS_ROUTE),
        }
    }

    /// Map a public URL back to a file name this store owns.
    fn file_name_for(&self, public_url: &str) -> Result<String, AppError> {
        let name = public_url
            .strip_prefix(&self.url_prefix)
            .ok_or_else(|| AppError::Validation(format!("Not an uploaded image: {}", public_url)))?;

        if name.is_empty()
            || name.contains("..")
            || name.contains('/')
            || name.contains('\\')
            || name.contains('\0')
        {
            return Err(AppError::Validation(format!(
                "Invalid image path: {}",
                public_url
            )));
        }
        Ok(name.to_string())
    }
}

#[async_trait]
impl ObjectStore for DiskObjectStore {
    async fn upload(&self, bytes: Vec<u8>) -> Result<String, AppError> {
        let kind = ImageKind::detect(&bytes).ok_or_else(|| {
            AppError::Validation("Only JPEG, PNG, GIF and WebP images are accepted".to_string())
        })?;

        fs::create_dir_all(&self.root).await?;

        let name = format!("{}.{}", uuid::Uuid::new_v4(), kind.extension());
        fs::write(self.root.join(&name), &bytes).await?;

        tracing::info!(file = %name, size = bytes.len(), "Image uploaded");
        Ok(format!("{}{}", self.url_prefix, name))
    }

    async fn delete(&self, public_url: &str) -> Result<(), AppError> {
        let name = self.file_name_for(public_url)?;

        match fs::remove_file(self.root.join(&name)).await {
            Ok(()) => {
                tracing::info!(file = %name, "Image deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
