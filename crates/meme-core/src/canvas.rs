//! RGBA drawing surface

use crate::fit::FitResult;
use crate::font::CaptionFont;
use crate::source::SourceImage;
use crate::{MemeError, Result};
use ab_glyph::{point, Font, PxScale, ScaleFont};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    /// Create an opaque color
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with alpha
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Fully transparent
    pub fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    fn to_pixel(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Fixed-size RGBA surface that a meme is composited onto
#[derive(Debug, Clone)]
pub struct MemeCanvas {
    pixels: RgbaImage,
}

impl MemeCanvas {
    /// Create a transparent surface
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MemeError::InvalidDimensions {
                name: if width == 0 { "surface_width" } else { "surface_height" },
                value: 0.0,
            });
        }
        Ok(Self {
            pixels: RgbaImage::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Reset every pixel to transparent
    pub fn clear(&mut self) {
        self.fill(Color::transparent());
    }

    /// Replace every pixel with `color`
    pub fn fill(&mut self, color: Color) {
        let px = color.to_pixel();
        for p in self.pixels.pixels_mut() {
            *p = px;
        }
    }

    /// Scale `source` to the fitted size and draw it at the fitted offset
    ///
    /// Parts of the image that fall outside the surface are clipped.
    pub fn draw_image(&mut self, source: &SourceImage, placement: &FitResult) {
        let rect = placement.pixel_rect();
        let scaled = imageops::resize(
            &source.to_rgba8(),
            rect.width,
            rect.height,
            FilterType::Triangle,
        );
        imageops::overlay(&mut self.pixels, &scaled, rect.x, rect.y);
    }

    /// Draw a single line of text with its baseline at `baseline_y`
    ///
    /// `x` is the left edge of the line. An outline of `stroke_width` pixels
    /// is drawn first in `stroke`, then the glyphs are filled with `fill`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        font: &CaptionFont,
        text: &str,
        size: f32,
        x: f32,
        baseline_y: f32,
        fill: Color,
        stroke: Option<(Color, u32)>,
    ) {
        if let Some((stroke_color, width)) = stroke {
            let w = width as i32;
            for dy in -w..=w {
                for dx in -w..=w {
                    if (dx == 0 && dy == 0) || dx * dx + dy * dy > w * w {
                        continue;
                    }
                    self.draw_glyphs(
                        font,
                        text,
                        size,
                        x + dx as f32,
                        baseline_y + dy as f32,
                        stroke_color,
                    );
                }
            }
        }
        self.draw_glyphs(font, text, size, x, baseline_y, fill);
    }

    fn draw_glyphs(
        &mut self,
        font: &CaptionFont,
        text: &str,
        size: f32,
        x: f32,
        baseline_y: f32,
        color: Color,
    ) {
        let face = font.face();
        let scaled = face.as_scaled(PxScale::from(size));
        let (width, height) = (self.width() as i32, self.height() as i32);

        let mut caret = x;
        let mut previous = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(size, point(caret, baseline_y));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = face.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let pixels = &mut self.pixels;
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                if px < 0 || py < 0 || px >= width || py >= height {
                    return;
                }
                let dst = pixels.get_pixel_mut(px as u32, py as u32);
                blend(dst, color, coverage);
            });
        }
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Borrow the underlying image buffer
    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Encode the surface as PNG
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

/// Source-over blend of `color` scaled by glyph coverage
fn blend(dst: &mut Rgba<u8>, color: Color, coverage: f32) {
    let src_a = (color.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    let channel = |s: u8, d: u8| -> u8 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        let v = (s * src_a + d * dst_a * (1.0 - src_a)) / out_a;
        (v * 255.0).round() as u8
    };

    *dst = Rgba([
        channel(color.r, dst[0]),
        channel(color.g, dst[1]),
        channel(color.b, dst[2]),
        (out_a * 255.0).round() as u8,
    ]);
}
