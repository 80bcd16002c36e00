//! Image data models.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Accepted source image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    Png,
    Jpeg,
    Webp,
}

impl ImageKind {
    /// Parse a declared MIME type or bare format name.
    ///
    /// Anything outside the accepted set is a whole-batch validation
    /// failure at the ingestion boundary.
    pub fn from_declared(identifier: &str, declared: &str) -> Result<Self, ValidationError> {
        let normalized = declared
            .trim()
            .strip_prefix("image/")
            .unwrap_or(declared.trim())
            .to_ascii_lowercase();
        match normalized.as_str() {
            "png" => Ok(ImageKind::Png),
            "jpeg" | "jpg" => Ok(ImageKind::Jpeg),
            "webp" => Ok(ImageKind::Webp),
            _ => Err(ValidationError::UnsupportedType {
                identifier: identifier.to_string(),
                declared: declared.to_string(),
            }),
        }
    }

    /// Map a file extension to a kind, if it is one we accept.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageKind::Png),
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            "webp" => Some(ImageKind::Webp),
            _ => None,
        }
    }

    pub fn as_format(self) -> image::ImageFormat {
        match self {
            ImageKind::Png => image::ImageFormat::Png,
            ImageKind::Jpeg => image::ImageFormat::Jpeg,
            ImageKind::Webp => image::ImageFormat::WebP,
        }
    }
}

/// One admitted image: full-resolution source and its reduced preview
/// held together in a single record, so reordering and deletion can
/// never drive the two out of alignment.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    /// Unique identifier derived from the original filename.
    pub identifier: String,

    /// Declared source format.
    pub kind: ImageKind,

    /// Full-resolution source bytes, used for composition.
    pub full_data: Vec<u8>,

    /// Reduced working copy, used by preview surfaces.
    pub preview_data: Vec<u8>,

    /// Intrinsic pixel dimensions, measured lazily from decoded pixel
    /// data at conversion time. `None` until resolved.
    pub dimensions: Option<(u32, u32)>,
}

impl ImageEntry {
    pub fn new(identifier: String, kind: ImageKind, full_data: Vec<u8>, preview_data: Vec<u8>) -> Self {
        Self {
            identifier,
            kind,
            full_data,
            preview_data,
            dimensions: None,
        }
    }
}

/// An image whose intrinsic dimensions have been resolved, ready for
/// placement. Produced by the composition engine's resolution pass.
///
/// Keeps both the raw source bytes (JPEG sources embed into the PDF
/// untouched) and the decoded pixels the dimensions came from.
#[derive(Debug, Clone)]
pub struct ResolvedImage {
    pub identifier: String,
    pub kind: ImageKind,
    pub data: Vec<u8>,
    pub pixels: image::DynamicImage,
}

impl ResolvedImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_declared_mime() {
        assert_eq!(ImageKind::from_declared("a.png", "image/png").unwrap(), ImageKind::Png);
        assert_eq!(ImageKind::from_declared("a.jpg", "image/jpeg").unwrap(), ImageKind::Jpeg);
        assert_eq!(ImageKind::from_declared("a.webp", "webp").unwrap(), ImageKind::Webp);
        assert_eq!(ImageKind::from_declared("a.jpg", "JPG").unwrap(), ImageKind::Jpeg);
    }

    #[test]
    fn test_kind_rejects_gif() {
        let err = ImageKind::from_declared("anim.gif", "image/gif").unwrap_err();
        match err {
            ValidationError::UnsupportedType { identifier, declared } => {
                assert_eq!(identifier, "anim.gif");
                assert_eq!(declared, "image/gif");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(ImageKind::from_extension("JPEG"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_extension("gif"), None);
    }
}
