//! Object storage for uploaded images.
//!
//! An upload hands back a public URL and images are later deleted by that
//! same URL, so callers never deal with storage paths.

mod disk;

pub use disk::{DiskObjectStore, UPLOADS_ROUTE};

use async_trait::async_trait;

use crate::errors::AppError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store an image and return its public URL.
    async fn upload(&self, bytes: Vec<u8>) -> Result<String, AppError>;

    /// Remove a previously uploaded image. Missing files are not an error.
    async fn delete(&self, public_url: &str) -> Result<(), AppError>;
}

/// Supported image formats, detected from the leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageKind {
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0xFF, 0xD8, 0xFF, ..] => Some(ImageKind::Jpeg),
            [0x89, 0x50, 0x4E, 0x47, ..] => Some(ImageKind::Png),
            [0x47, 0x49, 0x46, 0x38, ..] => Some(ImageKind::Gif),
            [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => {
                Some(ImageKind::Webp)
            }
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
            ImageKind::Gif => "gif",
            ImageKind::Webp => "webp",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_image_kind() {
        assert_eq!(ImageKind::detect(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageKind::Jpeg));
        assert_eq!(
            ImageKind::detect(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            Some(ImageKind::Png)
        );
        assert_eq!(ImageKind::detect(b"GIF89a"), Some(ImageKind::Gif));
        assert_eq!(ImageKind::detect(b"RIFF\0\0\0\0WEBPVP8 "), Some(ImageKind::Webp));
        assert_eq!(ImageKind::detect(b"%PDF-1.7"), None);
        assert_eq!(ImageKind::detect(&[]), None);
    }
}
