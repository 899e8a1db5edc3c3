//! Integration tests for meme-app

use image::{Rgba, RgbaImage};
use meme_app::{
    AppError, ControlState, MemeConfig, MemeSession, Result, SpeechSynthesizer, Utterance, Voice,
    Volume, VolumeLevel,
};
use meme_core::CaptionFont;
use pretty_assertions::assert_eq;
use std::io::Cursor;

fn load_test_font() -> CaptionFont {
    CaptionFont::from_file("../../fonts/DejaVuSansMono-Bold.ttf")
        .expect("Failed to read test font file")
}

fn create_test_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba(rgba));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[derive(Default)]
struct FakeSpeech {
    voices: Vec<Voice>,
    queue: Vec<Utterance>,
}

impl SpeechSynthesizer for FakeSpeech {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<()> {
        self.queue.push(utterance.clone());
        Ok(())
    }

    fn cancel(&mut self) {
        self.queue.clear();
    }
}

#[test]
fn test_page_flow() {
    let config = MemeConfig::from_json(r#"{ "speech": { "volume": 80 } }"#).unwrap();
    let mut session = MemeSession::new(config);

    // New image: drawn letterboxed, only generate usable
    let placement = session
        .select_image(&create_test_png(400, 800, [50, 60, 70, 255]))
        .unwrap();
    assert_eq!(placement.width, 200.0);
    assert_eq!(placement.start_x, 100.0);
    assert_eq!(session.controls(), ControlState::ready());

    let canvas = session.render(None).unwrap();
    assert_eq!(canvas.image().get_pixel(10, 200), &Rgba([0, 0, 0, 255]));
    assert_eq!(canvas.image().get_pixel(200, 200), &Rgba([50, 60, 70, 255]));

    // Empty form: nothing happens
    assert!(!session.generate("", ""));
    assert_eq!(session.controls(), ControlState::ready());

    // Generate
    assert!(session.generate("when the code compiles", "on the first try"));
    assert_eq!(session.controls(), ControlState::generated());

    // Read aloud at the configured volume with the default voice
    let mut speech = FakeSpeech {
        voices: vec![Voice {
            name: "Alex".to_string(),
            lang: "en-US".to_string(),
            default: true,
        }],
        ..Default::default()
    };
    assert_eq!(session.volume().level(), VolumeLevel::High);
    assert_eq!(session.read_aloud(&mut speech).unwrap(), 2);
    assert_eq!(speech.queue[0].text, "when the code compiles");
    assert_eq!(speech.queue[1].text, "on the first try");
    assert_eq!(speech.queue[0].volume, 0.8);
    assert_eq!(speech.queue[0].voice.as_deref(), Some("Alex"));

    // Clear: blank surface, read aloud no longer possible
    session.clear();
    assert_eq!(session.controls(), ControlState::ready());
    assert!(session.render(None).unwrap().as_raw().iter().all(|&b| b == 0));
    assert!(matches!(
        session.read_aloud(&mut speech),
        Err(AppError::NoCaptions)
    ));
}

#[test]
fn test_muted_read_aloud_still_queues() {
    let mut session = MemeSession::new(MemeConfig::default());
    session.generate("", "bottom only");
    assert_eq!(session.set_volume(Volume::new(0)), VolumeLevel::Muted);

    let mut speech = FakeSpeech::default();
    assert_eq!(session.read_aloud(&mut speech).unwrap(), 1);
    assert_eq!(speech.queue[0].volume, 0.0);
    assert_eq!(speech.queue[0].voice, None);
}

#[test]
fn test_captions_drawn_over_image() {
    let font = load_test_font();

    let mut session = MemeSession::new(MemeConfig::default());
    session
        .select_image(&create_test_png(400, 400, [0, 0, 255, 255]))
        .unwrap();

    let plain = session.render(Some(&font)).unwrap();
    session.generate("TOP", "BOTTOM");
    let captioned = session.render(Some(&font)).unwrap();

    let changed_rows = |from: u32, to: u32| {
        (from..to).any(|y| {
            (0..400).any(|x| plain.image().get_pixel(x, y) != captioned.image().get_pixel(x, y))
        })
    };

    // Text lands near the top and bottom edges, the middle is untouched
    assert!(changed_rows(0, 80));
    assert!(changed_rows(320, 400));
    assert!(!changed_rows(180, 220));

    // White fill appears somewhere
    assert!(captioned
        .image()
        .pixels()
        .any(|p| p == &Rgba([255, 255, 255, 255])));
}

#[test]
fn test_long_caption_wraps_inside_surface() {
    let font = load_test_font();

    let config = MemeConfig::from_json(r#"{ "caption": { "fontSize": 30 } }"#).unwrap();
    let mut session = MemeSession::new(config);
    session
        .select_image(&create_test_png(10, 10, [0, 0, 0, 255]))
        .unwrap();
    session.generate(
        "this caption is far too long to fit on a single line of the meme",
        "",
    );

    let canvas = session.render(Some(&font)).unwrap();
    // Several lines of text reach well below one line height
    let lowest_white = canvas
        .image()
        .enumerate_pixels()
        .filter(|(_, _, p)| **p == Rgba([255, 255, 255, 255]))
        .map(|(_, y, _)| y)
        .max()
        .unwrap();
    assert!(lowest_white > 60);
}
