//! Caption font handling

use crate::{MemeError, Result};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use std::fmt;
use std::path::Path;

/// A TrueType/OpenType font used to draw captions
pub struct CaptionFont {
    /// Font name/identifier
    name: String,
    face: FontVec,
}

impl fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptionFont")
            .field("name", &self.name)
            .field("glyphs", &self.face.glyph_count())
            .finish()
    }
}

impl CaptionFont {
    /// Create a font from TTF/OTF bytes
    ///
    /// # Arguments
    /// * `name` - Font identifier
    /// * `data` - Font file bytes
    pub fn from_bytes(name: &str, data: Vec<u8>) -> Result<Self> {
        let face = FontVec::try_from_vec(data)
            .map_err(|e| MemeError::FontParseError(format!("{name}: {e}")))?;
        Ok(Self {
            name: name.to_string(),
            face,
        })
    }

    /// Load a font file from disk, naming it after the file stem
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("caption");
        Self::from_bytes(name, data)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn face(&self) -> &FontVec {
        &self.face
    }

    /// Check if font has a glyph for the given character
    pub fn has_glyph(&self, c: char) -> bool {
        self.face.glyph_id(c).0 != 0
    }

    /// Advance width of `text` in pixels at `size`, including kerning
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let scaled = self.face.as_scaled(PxScale::from(size));
        let mut width = 0.0;
        let mut previous = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }

    /// Distance from the top of a line to its baseline, in pixels
    pub fn ascent(&self, size: f32) -> f32 {
        self.face.as_scaled(PxScale::from(size)).ascent()
    }

    /// Recommended distance between consecutive baselines, in pixels
    pub fn line_height(&self, size: f32) -> f32 {
        let scaled = self.face.as_scaled(PxScale::from(size));
        scaled.height() + scaled.line_gap()
    }
}
