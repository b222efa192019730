use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::pipeline::collect::PixelGrid;

/// Decode an image file into a pixel grid. Every pixel is kept; there is no
/// resizing, so the collector sees the exact colors of the file.
pub fn load_grid(path: &Path) -> Result<PixelGrid> {
    let img = image::open(path).with_context(|| {
        if !path.exists() {
            format!("file not found: {}", path.display())
        } else {
            format!(
                "unsupported or corrupt image: {}. Supported formats: PNG, JPEG, WebP, BMP, TIFF, GIF",
                path.display()
            )
        }
    })?;

    let rgb_img = img.to_rgb8();
    debug!(
        path = %path.display(),
        width = rgb_img.width(),
        height = rgb_img.height(),
        "decoded image"
    );
    let grid = PixelGrid::from_rgb_image(&rgb_img)
        .with_context(|| format!("image has no pixels: {}", path.display()))?;
    Ok(grid)
}
