//! Meme Core - Image fitting and compositing
//!
//! This crate provides functionality for:
//! - Aspect-preserving fit of a source image into a fixed drawing surface
//! - Decoding JPEG/PNG source images
//! - Loading TrueType fonts for captions
//! - Wrapping and placing caption text
//! - Compositing everything onto an RGBA surface
//!
//! # Example
//!
//! ```ignore
//! use meme_core::{fit, Color, MemeCanvas, SourceImage};
//!
//! let source = SourceImage::from_bytes(&std::fs::read("cat.jpg")?)?;
//! let placement = fit(400.0, 400.0, source.width() as f64, source.height() as f64)?;
//!
//! let mut canvas = MemeCanvas::new(400, 400)?;
//! canvas.fill(Color::black());
//! canvas.draw_image(&source, &placement);
//! std::fs::write("meme.png", canvas.to_png()?)?;
//! ```

mod canvas;
mod fit;
mod font;
mod source;
mod text;

pub use canvas::{Color, MemeCanvas};
pub use fit::{fit, Axis, FitResult, PixelRect};
pub use font::CaptionFont;
pub use source::SourceImage;
pub use text::{
    centered_x, layout_caption, wrap_to_width, CaptionAnchor, CaptionLine, CaptionMetrics,
};

use thiserror::Error;

/// Errors that can occur while fitting and compositing
#[derive(Debug, Error)]
pub enum MemeError {
    #[error("Invalid dimension: {name} must be positive and finite (got {value})")]
    InvalidDimensions { name: &'static str, value: f64 },

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for meme operations
pub type Result<T> = std::result::Result<T, MemeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_message() {
        let err = MemeError::InvalidDimensions {
            name: "image_width",
            value: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimension: image_width must be positive and finite (got 0)"
        );
    }
}
