//! Meme Composer
//!
//! Renders a captioned meme from an image and a font, the same way the page
//! does, and writes it as PNG.
//!
//! Usage:
//!   cargo run -p meme-app --example compose -- <image> <font.ttf> <top> <bottom> [output.png] [config.json]
//!
//! Examples:
//!   cargo run -p meme-app --example compose -- cat.jpg Impact.ttf "i can has" "cheezburger"
//!   RUST_LOG=debug cargo run -p meme-app --example compose -- dog.png DejaVuSans-Bold.ttf "" "such wow" out/dog.png

use anyhow::{bail, Context};
use log::{info, LevelFilter};
use meme_app::{MemeConfig, MemeSession};
use meme_core::CaptionFont;
use std::path::Path;

fn setup_logger() -> anyhow::Result<()> {
    let level = match std::env::var("RUST_LOG").as_deref() {
        Ok("trace") => LevelFilter::Trace,
        Ok("debug") => LevelFilter::Debug,
        Ok("warn") => LevelFilter::Warn,
        Ok("error") => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] {}: {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    setup_logger()?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 5 {
        eprintln!(
            "Usage: {} <image> <font.ttf> <top> <bottom> [output.png] [config.json]",
            args[0]
        );
        std::process::exit(1);
    }

    let image_path = &args[1];
    let font_path = &args[2];
    let output_path = args.get(5).cloned().unwrap_or_else(|| {
        let stem = Path::new(image_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("meme");
        format!("output/{}_meme.png", stem)
    });

    let config = match args.get(6) {
        Some(path) => {
            MemeConfig::from_file(path).with_context(|| format!("Failed to load config '{path}'"))?
        }
        None => MemeConfig::default(),
    };

    let font = CaptionFont::from_file(font_path)
        .with_context(|| format!("Failed to load font '{font_path}'"))?;
    let image_bytes =
        std::fs::read(image_path).with_context(|| format!("Failed to read image '{image_path}'"))?;

    let mut session = MemeSession::new(config);
    let placement = session.select_image(&image_bytes)?;
    info!(
        "image placed at ({:.1}, {:.1}) size {:.1}x{:.1}",
        placement.start_x, placement.start_y, placement.width, placement.height
    );

    if !session.generate(&args[3], &args[4]) {
        bail!("Both captions are empty");
    }

    let png = session.to_png(Some(&font))?;

    if let Some(parent) = Path::new(&output_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&output_path, png)?;

    println!("Generated: {}", output_path);
    Ok(())
}
