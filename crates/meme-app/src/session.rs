//! Meme session state
//!
//! Holds what the page holds: the selected image, the generated captions and
//! which of the generate / clear / read-aloud controls are usable.

use crate::config::MemeConfig;
use crate::renderer::MemeRenderer;
use crate::speech::{plan_utterances, select_voice, SpeechSynthesizer, Volume, VolumeLevel};
use crate::{AppError, Result};
use log::{debug, info};
use meme_core::{fit, CaptionFont, FitResult, MemeCanvas, SourceImage};

/// Generated caption pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captions {
    pub top: String,
    pub bottom: String,
}

/// Enabled state of the three page controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub generate: bool,
    pub clear: bool,
    pub read_aloud: bool,
}

impl ControlState {
    /// Nothing generated yet: only generate is usable
    pub fn ready() -> Self {
        Self {
            generate: true,
            clear: false,
            read_aloud: false,
        }
    }

    /// Captions are showing: generate is locked until cleared
    pub fn generated() -> Self {
        Self {
            generate: false,
            clear: true,
            read_aloud: true,
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::ready()
    }
}

/// One meme being edited
pub struct MemeSession {
    config: MemeConfig,
    image: Option<(SourceImage, FitResult)>,
    captions: Option<Captions>,
    controls: ControlState,
    volume: Volume,
    voice: Option<String>,
}

impl MemeSession {
    pub fn new(config: MemeConfig) -> Self {
        let volume = Volume::new(config.speech.volume);
        let voice = config.speech.voice.clone();
        Self {
            config,
            image: None,
            captions: None,
            controls: ControlState::ready(),
            volume,
            voice,
        }
    }

    pub fn config(&self) -> &MemeConfig {
        &self.config
    }

    /// Decode a newly selected image and fit it to the surface
    ///
    /// Any captions from the previous image are dropped and the controls
    /// return to their initial state. On error the session is left unchanged.
    pub fn select_image(&mut self, data: &[u8]) -> Result<FitResult> {
        let source = SourceImage::from_bytes(data)?;
        let placement = fit(
            self.config.surface.width as f64,
            self.config.surface.height as f64,
            source.width() as f64,
            source.height() as f64,
        )?;

        debug!(
            "fitted {}x{} image at ({}, {}) size {}x{}",
            source.width(),
            source.height(),
            placement.start_x,
            placement.start_y,
            placement.width,
            placement.height
        );

        self.image = Some((source, placement));
        self.captions = None;
        self.controls = ControlState::ready();
        Ok(placement)
    }

    /// Placement of the current image, if one is selected
    pub fn placement(&self) -> Option<FitResult> {
        self.image.as_ref().map(|(_, placement)| *placement)
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Store the captions and lock generation
    ///
    /// Returns `false` without changing anything when both captions are
    /// empty strings or generation is currently locked. Whitespace counts as
    /// text here.
    pub fn generate(&mut self, top: &str, bottom: &str) -> bool {
        if !self.controls.generate {
            debug!("generate ignored: captions already generated");
            return false;
        }
        if top.is_empty() && bottom.is_empty() {
            debug!("generate ignored: both captions empty");
            return false;
        }

        self.captions = Some(Captions {
            top: top.to_string(),
            bottom: bottom.to_string(),
        });
        self.controls = ControlState::generated();
        true
    }

    /// Wipe the surface, captions and image
    pub fn clear(&mut self) {
        self.image = None;
        self.captions = None;
        self.controls = ControlState::ready();
    }

    pub fn captions(&self) -> Option<&Captions> {
        self.captions.as_ref()
    }

    pub fn controls(&self) -> ControlState {
        self.controls
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Set the read-aloud volume, returning the icon level to show
    pub fn set_volume(&mut self, volume: Volume) -> VolumeLevel {
        self.volume = volume;
        volume.level()
    }

    /// Preferred voice name for reading aloud
    pub fn set_voice(&mut self, name: Option<String>) {
        self.voice = name;
    }

    pub fn voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }

    /// Speak the top caption, then the bottom caption
    ///
    /// Anything still being spoken is cancelled first. Returns the number of
    /// utterances queued.
    pub fn read_aloud(&self, synth: &mut dyn SpeechSynthesizer) -> Result<usize> {
        let captions = match (&self.captions, self.controls.read_aloud) {
            (Some(captions), true) => captions,
            _ => return Err(AppError::NoCaptions),
        };

        let voices = synth.voices();
        let voice = select_voice(&voices, self.voice.as_deref());
        let plan = plan_utterances(&captions.top, &captions.bottom, voice, self.volume);

        synth.cancel();
        for utterance in &plan {
            synth.speak(utterance)?;
        }

        info!(
            "reading {} caption(s) aloud with voice {:?} at volume {}",
            plan.len(),
            voice.map(|v| v.name.as_str()),
            self.volume.value()
        );
        Ok(plan.len())
    }

    /// Draw the current state onto a fresh surface
    ///
    /// `font` is needed only when captions have been generated.
    pub fn render(&self, font: Option<&CaptionFont>) -> Result<MemeCanvas> {
        let mut renderer = MemeRenderer::new(&self.config);
        if let Some(font) = font {
            renderer = renderer.with_font(font);
        }
        renderer.render(
            self.image.as_ref().map(|(source, placement)| (source, placement)),
            self.captions.as_ref(),
        )
    }

    /// Render and encode the meme as PNG for download
    pub fn to_png(&self, font: Option<&CaptionFont>) -> Result<Vec<u8>> {
        if self.image.is_none() {
            return Err(AppError::NoImage);
        }
        Ok(self.render(font)?.to_png()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::{Utterance, Voice};
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([9, 9, 9, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[derive(Default)]
    struct RecordingSynth {
        voices: Vec<Voice>,
        spoken: Vec<Utterance>,
        cancels: usize,
    }

    impl SpeechSynthesizer for RecordingSynth {
        fn voices(&self) -> Vec<Voice> {
            self.voices.clone()
        }

        fn speak(&mut self, utterance: &Utterance) -> Result<()> {
            self.spoken.push(utterance.clone());
            Ok(())
        }

        fn cancel(&mut self) {
            self.cancels += 1;
        }
    }

    #[test]
    fn test_initial_controls() {
        let session = MemeSession::new(MemeConfig::default());
        assert_eq!(session.controls(), ControlState::ready());
        assert!(session.captions().is_none());
        assert!(!session.has_image());
    }

    #[test]
    fn test_generate_toggles_controls() {
        let mut session = MemeSession::new(MemeConfig::default());
        assert!(session.generate("top", ""));
        assert_eq!(session.controls(), ControlState::generated());
        assert_eq!(
            session.captions(),
            Some(&Captions {
                top: "top".to_string(),
                bottom: String::new(),
            })
        );
    }

    #[test]
    fn test_generate_with_empty_captions_is_noop() {
        let mut session = MemeSession::new(MemeConfig::default());
        assert!(!session.generate("", ""));
        assert_eq!(session.controls(), ControlState::ready());
        assert!(session.captions().is_none());
    }

    #[test]
    fn test_generate_accepts_whitespace_caption() {
        let mut session = MemeSession::new(MemeConfig::default());
        assert!(session.generate(" ", ""));
        assert_eq!(session.controls(), ControlState::generated());
        assert_eq!(session.captions().unwrap().top, " ");

        // Nothing worth speaking, but reading aloud is still allowed
        let mut synth = RecordingSynth::default();
        assert_eq!(session.read_aloud(&mut synth).unwrap(), 0);
        assert_eq!(synth.cancels, 1);
    }

    #[test]
    fn test_generate_locked_until_clear() {
        let mut session = MemeSession::new(MemeConfig::default());
        assert!(session.generate("first", "pair"));
        assert!(!session.generate("second", "pair"));
        assert_eq!(session.captions().unwrap().top, "first");

        session.clear();
        assert_eq!(session.controls(), ControlState::ready());
        assert!(session.generate("second", "pair"));
        assert_eq!(session.captions().unwrap().top, "second");
    }

    #[test]
    fn test_select_image_fits_and_resets() {
        let mut session = MemeSession::new(MemeConfig::default());
        session.generate("old", "captions");

        let placement = session.select_image(&png(800, 400)).unwrap();
        assert_eq!(placement.width, 400.0);
        assert_eq!(placement.height, 200.0);
        assert_eq!(placement.start_y, 100.0);
        assert_eq!(session.placement(), Some(placement));
        assert!(session.captions().is_none());
        assert_eq!(session.controls(), ControlState::ready());
    }

    #[test]
    fn test_select_bad_image_keeps_state() {
        let mut session = MemeSession::new(MemeConfig::default());
        session.select_image(&png(10, 20)).unwrap();
        session.generate("keep", "me");

        assert!(session.select_image(b"not an image at all").is_err());
        assert!(session.has_image());
        assert_eq!(session.captions().unwrap().top, "keep");
        assert_eq!(session.controls(), ControlState::generated());
    }

    #[test]
    fn test_clear_drops_image() {
        let mut session = MemeSession::new(MemeConfig::default());
        session.select_image(&png(10, 10)).unwrap();
        session.clear();
        assert!(!session.has_image());
        assert_eq!(session.placement(), None);
    }

    #[test]
    fn test_read_aloud_requires_captions() {
        let session = MemeSession::new(MemeConfig::default());
        let mut synth = RecordingSynth::default();
        assert!(matches!(
            session.read_aloud(&mut synth),
            Err(AppError::NoCaptions)
        ));
        assert!(synth.spoken.is_empty());
    }

    #[test]
    fn test_read_aloud_order_voice_and_volume() {
        let mut session = MemeSession::new(MemeConfig::default());
        session.generate("top caption", "bottom caption");
        session.set_voice(Some("Karen".to_string()));
        assert_eq!(session.set_volume(Volume::new(25)), VolumeLevel::Low);

        let mut synth = RecordingSynth {
            voices: vec![
                Voice {
                    name: "Alex".to_string(),
                    lang: "en-US".to_string(),
                    default: true,
                },
                Voice {
                    name: "Karen".to_string(),
                    lang: "en-AU".to_string(),
                    default: false,
                },
            ],
            ..Default::default()
        };

        assert_eq!(session.read_aloud(&mut synth).unwrap(), 2);
        assert_eq!(synth.cancels, 1);
        let texts: Vec<_> = synth.spoken.iter().map(|u| u.text.as_str()).collect();
        assert_eq!(texts, vec!["top caption", "bottom caption"]);
        assert!(synth
            .spoken
            .iter()
            .all(|u| u.voice.as_deref() == Some("Karen") && u.volume == 0.25));
    }

    #[test]
    fn test_volume_from_config() {
        let mut config = MemeConfig::default();
        config.speech.volume = 50;
        let session = MemeSession::new(config);
        assert_eq!(session.volume(), Volume::new(50));
    }

    #[test]
    fn test_render_without_anything_is_blank() {
        let session = MemeSession::new(MemeConfig::default());
        let canvas = session.render(None).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (400, 400));
        assert!(canvas.as_raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_png_export_needs_image() {
        let mut session = MemeSession::new(MemeConfig::default());
        assert!(matches!(session.to_png(None), Err(AppError::NoImage)));

        session.select_image(&png(30, 60)).unwrap();
        let bytes = session.to_png(None).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (400, 400));
    }

    #[test]
    fn test_render_captions_without_font_fails() {
        let mut session = MemeSession::new(MemeConfig::default());
        session.generate("needs", "a font");
        assert!(matches!(session.render(None), Err(AppError::NoFont)));
    }
}
