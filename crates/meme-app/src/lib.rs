//! Meme App - everything between the page and the compositor
//!
//! This crate provides:
//! - JSON configuration (surface size, colors, caption style, speech defaults)
//! - The meme session: selected image, captions, and control enable/disable state
//! - Rendering of the session onto a drawing surface
//! - Speech planning: volume levels, voice selection, utterance order
//!
//! # Example
//!
//! ```ignore
//! use meme_app::{MemeConfig, MemeSession};
//!
//! let config = MemeConfig::from_json(config_json)?;
//! let mut session = MemeSession::new(config);
//! session.select_image(&image_bytes)?;
//! session.generate("top text", "bottom text");
//! let canvas = session.render(Some(&font))?;
//! ```

pub mod config;
mod renderer;
mod session;
pub mod speech;

pub use config::{CaptionStyle, MemeConfig, SpeechConfig, SurfaceConfig};
pub use renderer::MemeRenderer;
pub use session::{Captions, ControlState, MemeSession};
pub use speech::{SpeechSynthesizer, Utterance, Voice, Volume, VolumeLevel};

use thiserror::Error;

/// Errors that can occur in the meme session
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("No image selected")]
    NoImage,

    #[error("No captions generated")]
    NoCaptions,

    #[error("No caption font loaded")]
    NoFont,

    #[error("Speech error: {0}")]
    SpeechError(String),

    #[error("Meme error: {0}")]
    Core(#[from] meme_core::MemeError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, AppError>;
