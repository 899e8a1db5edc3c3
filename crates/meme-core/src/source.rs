//! Source image handling

use crate::{MemeError, Result};
use image::{DynamicImage, ImageFormat, RgbaImage};
use log::debug;

impl From<image::ImageError> for MemeError {
    fn from(err: image::ImageError) -> Self {
        MemeError::ImageError(err.to_string())
    }
}

/// Formats accepted from the file picker
const ACCEPTED_FORMATS: [ImageFormat; 2] = [ImageFormat::Jpeg, ImageFormat::Png];

/// A decoded image selected by the user
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
}

impl SourceImage {
    /// Decode a JPEG or PNG file
    ///
    /// Other formats are rejected even when `image` could decode them.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let format = image::guess_format(data)?;
        if !ACCEPTED_FORMATS.contains(&format) {
            return Err(MemeError::ImageError(format!(
                "Unsupported image format: {format:?}"
            )));
        }

        let image = image::load_from_memory_with_format(data, format)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(MemeError::ImageError("Image has no pixels".to_string()));
        }

        debug!(
            "decoded {:?} source image {}x{}",
            format,
            image.width(),
            image.height()
        );
        Ok(Self { image })
    }

    /// Wrap an already decoded image
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Natural size as `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Convert to 8-bit RGBA for compositing
    pub fn to_rgba8(&self) -> RgbaImage {
        self.image.to_rgba8()
    }
}
