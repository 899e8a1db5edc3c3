//! Aspect-ratio fit of a source image inside a drawing surface

use crate::{MemeError, Result};
use serde::{Deserialize, Serialize};

/// The axis that limited the scale of a fitted image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Scaled size and top-left placement of an image inside a surface
///
/// Serialized with the camelCase names used by the browser side
/// (`startX`, `startY`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitResult {
    /// Scaled image width
    pub width: f64,
    /// Scaled image height
    pub height: f64,
    /// Left offset of the scaled image within the surface
    pub start_x: f64,
    /// Top offset of the scaled image within the surface
    pub start_y: f64,
}

/// Integer placement for raster drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl FitResult {
    /// Axis that was filled completely by the scaled image
    ///
    /// Portrait sources bind vertically; square and landscape sources bind
    /// horizontally.
    pub fn binding_axis(&self) -> Axis {
        if self.start_y == 0.0 && self.start_x != 0.0 {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }

    /// Round the placement to whole pixels
    ///
    /// Size is never rounded below one pixel so a very thin source still
    /// produces something drawable.
    pub fn pixel_rect(&self) -> PixelRect {
        PixelRect {
            x: self.start_x.round() as i64,
            y: self.start_y.round() as i64,
            width: (self.width.round() as u32).max(1),
            height: (self.height.round() as u32).max(1),
        }
    }
}

fn check_dimension(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(MemeError::InvalidDimensions { name, value })
    }
}

/// Calculate how to scale and center an image inside a surface
///
/// The whole image stays visible, its aspect ratio is preserved, and the
/// leftover space on the unconstrained axis is split evenly. A square source
/// takes the width-constrained branch (the portrait test is a strict `< 1`).
///
/// # Arguments
/// * `surface_width` - Width of the drawing surface
/// * `surface_height` - Height of the drawing surface
/// * `image_width` - Natural width of the source image
/// * `image_height` - Natural height of the source image
///
/// # Errors
/// Returns [`MemeError::InvalidDimensions`] if any argument is zero, negative
/// or not finite, or if the arguments are so far apart that the scaled size
/// collapses to zero.
pub fn fit(
    surface_width: f64,
    surface_height: f64,
    image_width: f64,
    image_height: f64,
) -> Result<FitResult> {
    let surface_width = check_dimension("surface_width", surface_width)?;
    let surface_height = check_dimension("surface_height", surface_height)?;
    let image_width = check_dimension("image_width", image_width)?;
    let image_height = check_dimension("image_height", image_height)?;

    // Extreme ratios can underflow to zero or overflow to infinity
    let aspect_ratio = check_dimension("aspect_ratio", image_width / image_height)?;

    let result = if aspect_ratio < 1.0 {
        let width = surface_height * aspect_ratio;
        FitResult {
            width,
            height: surface_height,
            start_x: (surface_width - width) / 2.0,
            start_y: 0.0,
        }
    } else {
        let height = surface_width / aspect_ratio;
        FitResult {
            width: surface_width,
            height,
            start_x: 0.0,
            start_y: (surface_height - height) / 2.0,
        }
    };

    check_dimension("width", result.width)?;
    check_dimension("height", result.height)?;
    Ok(result)
}
