//! WASM bindings for memegen
//!
//! This crate provides JavaScript-friendly API for:
//! - Fitting an image to the canvas (`getDimensions`)
//! - Driving the meme page: image selection, generate, clear, read aloud
//! - Drawing the composited meme onto a 2D canvas
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { MemeGenerator, getDimensions } from 'memegen-wasm';
//!
//! await init();
//!
//! const meme = new MemeGenerator();
//! meme.loadFont(fontBytes);
//!
//! imgInput.addEventListener('change', async (e) => {
//!   const bytes = new Uint8Array(await e.target.files[0].arrayBuffer());
//!   meme.selectImage(bytes);
//!   meme.drawTo(canvas.getContext('2d'));
//! });
//!
//! submitBtn.addEventListener('click', (e) => {
//!   e.preventDefault();
//!   if (meme.generate(form.textTop.value, form.textBottom.value)) {
//!     meme.drawTo(canvas.getContext('2d'));
//!   }
//!   submitBtn.disabled = !meme.canGenerate;
//!   clearBtn.disabled = !meme.canClear;
//!   readTextBtn.disabled = !meme.canReadAloud;
//! });
//! ```

mod logger;
mod speech;

use log::LevelFilter;
use meme_app::{MemeConfig, MemeSession, SpeechSynthesizer, Volume};
use meme_core::CaptionFont;
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::{CanvasRenderingContext2d, ImageData};

pub use speech::WebSpeech;

// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::init(LevelFilter::Info);
}

/// Turn on debug logging in the browser console
#[wasm_bindgen(js_name = enableDebugLogging)]
pub fn enable_debug_logging() {
    logger::init(LevelFilter::Debug);
}

/// Calculate how an image fits inside the canvas
///
/// @param canvasWidth - Width of the canvas
/// @param canvasHeight - Height of the canvas
/// @param imageWidth - Natural width of the image
/// @param imageHeight - Natural height of the image
/// @returns `{ width, height, startX, startY }`
#[wasm_bindgen(js_name = getDimensions)]
pub fn get_dimensions(
    canvas_width: f64,
    canvas_height: f64,
    image_width: f64,
    image_height: f64,
) -> Result<JsValue, JsValue> {
    let result = meme_core::fit(canvas_width, canvas_height, image_width, image_height)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(serde_wasm_bindgen::to_value(&result)?)
}

/// Icon level for a volume slider value
///
/// @param value - Slider value (0-100)
/// @returns 0 (muted), 1, 2 or 3
#[wasm_bindgen(js_name = volumeLevel)]
pub fn volume_level(value: f64) -> u8 {
    Volume::from_slider(value).level().icon_index()
}

/// The meme page state and compositor
#[wasm_bindgen]
pub struct MemeGenerator {
    session: MemeSession,
    font: Option<CaptionFont>,
}

#[wasm_bindgen]
impl MemeGenerator {
    /// Create a generator with the default 400x400 configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> MemeGenerator {
        MemeGenerator {
            session: MemeSession::new(MemeConfig::default()),
            font: None,
        }
    }

    /// Create a generator from a JSON configuration
    ///
    /// @param json - Configuration JSON string
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<MemeGenerator, JsValue> {
        let config = MemeConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(MemeGenerator {
            session: MemeSession::new(config),
            font: None,
        })
    }

    /// Load the caption font
    ///
    /// @param data - TTF/OTF file bytes (Uint8Array)
    #[wasm_bindgen(js_name = loadFont)]
    pub fn load_font(&mut self, data: &[u8]) -> Result<(), JsValue> {
        let font = CaptionFont::from_bytes("caption", data.to_vec())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.font = Some(font);
        Ok(())
    }

    /// Select a new image; clears any generated captions
    ///
    /// @param data - JPEG or PNG file bytes (Uint8Array)
    /// @returns `{ width, height, startX, startY }`
    #[wasm_bindgen(js_name = selectImage)]
    pub fn select_image(&mut self, data: &[u8]) -> Result<JsValue, JsValue> {
        let placement = self
            .session
            .select_image(data)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&placement)?)
    }

    /// Generate captions
    ///
    /// @returns false when both captions are empty or already generated
    pub fn generate(&mut self, top: &str, bottom: &str) -> bool {
        self.session.generate(top, bottom)
    }

    /// Clear captions and image
    pub fn clear(&mut self) {
        self.session.clear();
    }

    #[wasm_bindgen(getter, js_name = canGenerate)]
    pub fn can_generate(&self) -> bool {
        self.session.controls().generate
    }

    #[wasm_bindgen(getter, js_name = canClear)]
    pub fn can_clear(&self) -> bool {
        self.session.controls().clear
    }

    #[wasm_bindgen(getter, js_name = canReadAloud)]
    pub fn can_read_aloud(&self) -> bool {
        self.session.controls().read_aloud
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.session.config().surface.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.session.config().surface.height
    }

    /// Render the meme as raw RGBA pixels
    ///
    /// @returns Uint8Array of width * height * 4 bytes
    pub fn render(&self) -> Result<Vec<u8>, JsValue> {
        let canvas = self
            .session
            .render(self.font.as_ref())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(canvas.as_raw().to_vec())
    }

    /// Render the meme and put it on a 2D canvas context at (0, 0)
    #[wasm_bindgen(js_name = drawTo)]
    pub fn draw_to(&self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        let canvas = self
            .session
            .render(self.font.as_ref())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(canvas.as_raw()),
            canvas.width(),
            canvas.height(),
        )?;
        ctx.put_image_data(&data, 0.0, 0.0)
    }

    /// Render the meme as PNG for download
    ///
    /// @returns PNG bytes (Uint8Array)
    #[wasm_bindgen(js_name = toPng)]
    pub fn to_png(&self) -> Result<Vec<u8>, JsValue> {
        self.session
            .to_png(self.font.as_ref())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Set the read-aloud volume
    ///
    /// @param value - Slider value (0-100)
    /// @returns Icon level 0-3
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, value: f64) -> u8 {
        self.session
            .set_volume(Volume::from_slider(value))
            .icon_index()
    }

    /// Choose the voice by name; `undefined` uses the platform default
    #[wasm_bindgen(js_name = setVoice)]
    pub fn set_voice(&mut self, name: Option<String>) {
        self.session.set_voice(name);
    }

    /// Voices offered by the browser
    ///
    /// @returns Array of `{ name, lang, default }`
    pub fn voices(&self) -> Result<JsValue, JsValue> {
        let speech = WebSpeech::from_window().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&speech.voices())?)
    }

    /// Speak the top caption, then the bottom caption
    ///
    /// @returns Number of captions queued
    #[wasm_bindgen(js_name = readAloud)]
    pub fn read_aloud(&self) -> Result<usize, JsValue> {
        let mut speech =
            WebSpeech::from_window().map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session
            .read_aloud(&mut speech)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for MemeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
