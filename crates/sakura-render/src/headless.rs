//! Headless output: write canvas frames to PNG

use crate::canvas::Canvas;
use sakura_core::{Color, Result, SakuraError};
use std::path::Path;

/// Backdrop colour the effect is designed to sit on
pub const NIGHT_SKY: u32 = 0x0b1026;

/// Encode the canvas as PNG, flattened onto `background` when given
pub fn save_png(canvas: &Canvas, path: impl AsRef<Path>, background: Option<Color>) -> Result<()> {
    let path = path.as_ref();
    if canvas.pixel_width() == 0 || canvas.pixel_height() == 0 {
        return Err(SakuraError::ImageError(format!(
            "cannot encode an empty {}x{} canvas",
            canvas.pixel_width(),
            canvas.pixel_height()
        )));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    canvas
        .to_rgba_image(background)
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| SakuraError::ImageError(format!("failed to write '{}': {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "frame written");
    Ok(())
}
