//! Meme rendering

use crate::config::{CaptionStyle, MemeConfig};
use crate::session::Captions;
use crate::{AppError, Result};
use log::{debug, warn};
use meme_core::{
    layout_caption, CaptionAnchor, CaptionFont, CaptionMetrics, FitResult, MemeCanvas, SourceImage,
};

/// Composites background, image and captions onto a surface
pub struct MemeRenderer<'a> {
    config: &'a MemeConfig,
    font: Option<&'a CaptionFont>,
}

impl<'a> MemeRenderer<'a> {
    pub fn new(config: &'a MemeConfig) -> Self {
        Self { config, font: None }
    }

    /// Set the font used for captions
    pub fn with_font(mut self, font: &'a CaptionFont) -> Self {
        self.font = Some(font);
        self
    }

    /// Render a surface
    ///
    /// With neither image nor captions the surface stays transparent.
    /// Otherwise the background is filled, the image drawn at its placement,
    /// and the captions drawn over the top.
    pub fn render(
        &self,
        image: Option<(&SourceImage, &FitResult)>,
        captions: Option<&Captions>,
    ) -> Result<MemeCanvas> {
        let surface = &self.config.surface;
        let mut canvas = MemeCanvas::new(surface.width, surface.height)?;

        if image.is_none() && captions.is_none() {
            return Ok(canvas);
        }

        canvas.fill(surface.background);

        if let Some((source, placement)) = image {
            canvas.draw_image(source, placement);
        }

        if let Some(captions) = captions {
            let font = self.font.ok_or(AppError::NoFont)?;
            let style = &self.config.caption;
            draw_caption(&mut canvas, font, style, &captions.top, CaptionAnchor::Top);
            draw_caption(
                &mut canvas,
                font,
                style,
                &captions.bottom,
                CaptionAnchor::Bottom,
            );
        }

        Ok(canvas)
    }
}

fn draw_caption(
    canvas: &mut MemeCanvas,
    font: &CaptionFont,
    style: &CaptionStyle,
    text: &str,
    anchor: CaptionAnchor,
) {
    let text = if style.uppercase {
        text.to_uppercase()
    } else {
        text.to_string()
    };

    if let Some(c) = text.chars().find(|c| !c.is_whitespace() && !font.has_glyph(*c)) {
        warn!("font '{}' has no glyph for {:?}", font.name(), c);
    }

    let size = style.font_size;
    let metrics = CaptionMetrics {
        ascent: font.ascent(size),
        line_height: font.line_height(size),
    };
    let surface = (canvas.width() as f32, canvas.height() as f32);
    let lines = layout_caption(&text, anchor, surface, style.margin, metrics, |s| {
        font.text_width(s, size)
    });

    let stroke = (style.stroke_width > 0).then_some((style.stroke, style.stroke_width));
    for line in &lines {
        canvas.draw_text(
            font,
            &line.text,
            size,
            line.x,
            line.baseline_y,
            style.fill,
            stroke,
        );
    }
    debug!("drew {:?} caption in {} line(s)", anchor, lines.len());
}
