//! Meme generator configuration
//!
//! Every field has a default, so `{}` is a valid configuration describing the
//! classic 400x400 black-background page.

use crate::{AppError, Result};
use meme_core::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemeConfig {
    pub surface: SurfaceConfig,
    pub caption: CaptionStyle,
    pub speech: SpeechConfig,
}

/// Drawing surface settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    /// Fill drawn behind the image; shows as bars around non-matching aspect ratios
    pub background: Color,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            background: Color::black(),
        }
    }
}

/// How captions are drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaptionStyle {
    /// Font size in pixels
    pub font_size: f32,
    pub fill: Color,
    pub stroke: Color,
    /// Outline thickness in pixels, 0 disables the outline
    pub stroke_width: u32,
    /// Gap between a caption and its surface edge
    pub margin: f32,
    pub uppercase: bool,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_size: 40.0,
            fill: Color::white(),
            stroke: Color::black(),
            stroke_width: 2,
            margin: 10.0,
            uppercase: true,
        }
    }
}

/// Read-aloud defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpeechConfig {
    /// Initial volume, 0-100
    pub volume: u8,
    /// Preferred voice name; the platform default is used when absent
    pub voice: Option<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            volume: 100,
            voice: None,
        }
    }
}

impl MemeConfig {
    /// Parse configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize configuration to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check values that deserialize fine but cannot be rendered
    pub fn validate(&self) -> Result<()> {
        if self.surface.width == 0 || self.surface.height == 0 {
            return Err(AppError::ConfigError(format!(
                "surface must be non-empty (got {}x{})",
                self.surface.width, self.surface.height
            )));
        }
        if !(self.caption.font_size.is_finite() && self.caption.font_size > 0.0) {
            return Err(AppError::ConfigError(format!(
                "caption fontSize must be positive (got {})",
                self.caption.font_size
            )));
        }
        if !(self.caption.margin.is_finite() && self.caption.margin >= 0.0) {
            return Err(AppError::ConfigError(format!(
                "caption margin must not be negative (got {})",
                self.caption.margin
            )));
        }
        if self.speech.volume > 100 {
            return Err(AppError::ConfigError(format!(
                "speech volume must be 0-100 (got {})",
                self.speech.volume
            )));
        }
        Ok(())
    }
}
