//! Web Speech API backend

use meme_app::{AppError, SpeechSynthesizer, Utterance, Voice};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice};

fn speech_error(err: JsValue) -> AppError {
    AppError::SpeechError(
        err.as_string()
            .unwrap_or_else(|| "speech synthesis unavailable".to_string()),
    )
}

/// `window.speechSynthesis` behind the session's synthesizer trait
pub struct WebSpeech {
    synth: SpeechSynthesis,
}

impl WebSpeech {
    /// Connect to the page's speech synthesis
    pub fn from_window() -> meme_app::Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| AppError::SpeechError("no window".to_string()))?;
        let synth = window.speech_synthesis().map_err(speech_error)?;
        Ok(Self { synth })
    }

    fn platform_voices(&self) -> Vec<SpeechSynthesisVoice> {
        let voices: js_sys::Array = self.synth.get_voices();
        voices
            .iter()
            .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
            .collect()
    }
}

impl SpeechSynthesizer for WebSpeech {
    fn voices(&self) -> Vec<Voice> {
        self.platform_voices()
            .iter()
            .map(|v| Voice {
                name: v.name(),
                lang: v.lang(),
                default: v.default(),
            })
            .collect()
    }

    fn speak(&mut self, utterance: &Utterance) -> meme_app::Result<()> {
        let js_utterance =
            SpeechSynthesisUtterance::new_with_text(&utterance.text).map_err(speech_error)?;
        js_utterance.set_volume(utterance.volume);

        if let Some(ref name) = utterance.voice {
            let voice = self
                .platform_voices()
                .into_iter()
                .find(|v| &v.name() == name);
            js_utterance.set_voice(voice.as_ref());
        }

        self.synth.speak(&js_utterance);
        Ok(())
    }

    fn cancel(&mut self) {
        self.synth.cancel();
    }
}
