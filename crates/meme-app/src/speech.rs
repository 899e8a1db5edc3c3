//! Read-aloud planning
//!
//! The platform owns the actual voices and audio. This module decides what is
//! spoken, in which order, with which voice and at what volume, and hands the
//! result to a [`SpeechSynthesizer`].

use crate::Result;
use serde::{Deserialize, Serialize};

/// A synthetic voice offered by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    /// BCP 47 language tag, e.g. "en-US"
    pub lang: String,
    /// Whether the platform marks this as its default voice
    #[serde(default)]
    pub default: bool,
}

impl Voice {
    /// Label shown in the voice picker, e.g. "Alex (en-US) -- DEFAULT"
    pub fn label(&self) -> String {
        if self.default {
            format!("{} ({}) -- DEFAULT", self.name, self.lang)
        } else {
            format!("{} ({})", self.name, self.lang)
        }
    }
}

/// Speaker icon shown next to the volume slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeLevel {
    Muted,
    Low,
    Medium,
    High,
}

impl VolumeLevel {
    /// Icon level, 0 (muted) through 3
    pub fn icon_index(self) -> u8 {
        match self {
            VolumeLevel::Muted => 0,
            VolumeLevel::Low => 1,
            VolumeLevel::Medium => 2,
            VolumeLevel::High => 3,
        }
    }
}

/// Read-aloud volume on the slider's 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Volume(u8);

impl Volume {
    pub const MAX: Volume = Volume(100);

    /// Create a volume, clamping anything above 100
    pub fn new(value: u8) -> Self {
        Volume(value.min(100))
    }

    /// Create a volume from a raw slider value, clamping into 0-100
    pub fn from_slider(value: f64) -> Self {
        if value.is_nan() {
            return Volume(0);
        }
        Volume(value.round().clamp(0.0, 100.0) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Icon thresholds: 0 muted, 1-33 low, 34-66 medium, 67-100 high
    pub fn level(self) -> VolumeLevel {
        match self.0 {
            0 => VolumeLevel::Muted,
            1..=33 => VolumeLevel::Low,
            34..=66 => VolumeLevel::Medium,
            _ => VolumeLevel::High,
        }
    }

    /// Volume on the synthesizer's 0.0-1.0 scale
    pub fn gain(self) -> f32 {
        self.0 as f32 / 100.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::MAX
    }
}

/// One piece of text queued for speaking
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Voice name; `None` lets the platform choose
    pub voice: Option<String>,
    /// 0.0-1.0
    pub volume: f32,
}

/// Platform speech backend
pub trait SpeechSynthesizer {
    /// Voices currently offered by the platform
    fn voices(&self) -> Vec<Voice>;

    /// Queue an utterance; utterances are spoken in the order they are queued
    fn speak(&mut self, utterance: &Utterance) -> Result<()>;

    /// Drop anything still queued or speaking
    fn cancel(&mut self) {}
}

/// Resolve the voice to use for reading aloud
///
/// An exact name match wins, then the platform's default voice, then the
/// first voice listed. Returns `None` when the platform reports no voices.
pub fn select_voice<'a>(voices: &'a [Voice], preferred: Option<&str>) -> Option<&'a Voice> {
    preferred
        .and_then(|name| voices.iter().find(|v| v.name == name))
        .or_else(|| voices.iter().find(|v| v.default))
        .or_else(|| voices.first())
}

/// Build the utterances for a top/bottom caption pair
///
/// The top caption is spoken first. Blank captions are skipped.
pub fn plan_utterances(
    top: &str,
    bottom: &str,
    voice: Option<&Voice>,
    volume: Volume,
) -> Vec<Utterance> {
    [top, bottom]
        .iter()
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .map(|text| Utterance {
            text: text.to_string(),
            voice: voice.map(|v| v.name.clone()),
            volume: volume.gain(),
        })
        .collect()
}
