//! Content probing for attachable assets.
//!
//! Image planes only need intrinsic dimensions to size themselves, so paths
//! are probed by header (`image::image_dimensions`) rather than decoded.

use crate::error::{SceneError, SceneResult};
use image::{DynamicImage, GenericImageView};
use std::path::Path;

/// File extensions accepted as plane images
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Pixel dimensions of loaded content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentDimensions {
    pub width: u32,
    pub height: u32,
}

impl ContentDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width / height, or `None` when either dimension is zero.
    pub fn aspect(&self) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(self.width as f64 / self.height as f64)
        }
    }
}

impl From<&DynamicImage> for ContentDimensions {
    fn from(image: &DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Read an image's dimensions from its header.
pub fn probe_image(path: &Path) -> SceneResult<ContentDimensions> {
    if !is_supported_image(path) {
        return Err(SceneError::invalid(
            "src",
            format!("{} is not a PNG or JPEG file", path.display()),
        ));
    }
    let (width, height) = image::image_dimensions(path)?;
    Ok(ContentDimensions { width, height })
}
