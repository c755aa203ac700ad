//! Color patterns loaded from images for deterministic clustering

use crate::io::configuration::PATTERN_LUMA_THRESHOLD;
use crate::io::error::{PercolationError, Result};
use crate::spatial::lattice::Color;
use image::GrayImage;
use ndarray::Array2;
use std::path::Path;

/// Load a PNG as a two-color pattern
///
/// Pixels darker than [`PATTERN_LUMA_THRESHOLD`] become black cells and all
/// others white. Transparency is ignored.
///
/// # Errors
///
/// Returns an error if:
/// - The image file cannot be loaded
/// - The image has no pixels
pub fn load_pattern(path: &Path) -> Result<Array2<Color>> {
    let img = image::open(path).map_err(|e| PercolationError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    let pattern = pattern_from_luma(&img.to_luma8());
    if pattern.is_empty() {
        return Err(PercolationError::InvalidParameter {
            parameter: "pattern",
            value: path.display().to_string(),
            reason: "image has no pixels".to_string(),
        });
    }

    Ok(pattern)
}

/// Convert a grayscale image into a pattern of rows × columns
pub fn pattern_from_luma(img: &GrayImage) -> Array2<Color> {
    let (width, height) = img.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(row, col)| {
        let luma = img
            .get_pixel_checked(col as u32, row as u32)
            .map_or(u8::MAX, |pixel| pixel.0[0]);
        Color::from(luma < PATTERN_LUMA_THRESHOLD)
    })
}
