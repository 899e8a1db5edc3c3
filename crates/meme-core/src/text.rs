//! Caption layout utilities

/// Which edge of the surface a caption hangs from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionAnchor {
    Top,
    Bottom,
}

/// Vertical font metrics in pixels at the caption size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionMetrics {
    /// Distance from the top of a line to its baseline
    pub ascent: f32,
    /// Distance between consecutive baselines
    pub line_height: f32,
}

/// A positioned line of caption text
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionLine {
    pub text: String,
    /// Left edge of the line
    pub x: f32,
    pub baseline_y: f32,
}

/// Left edge that centers a line of `text_width` pixels in `container_width`
///
/// Negative when the line is wider than the container.
pub fn centered_x(text_width: f32, container_width: f32) -> f32 {
    (container_width - text_width) / 2.0
}

/// Split text into lines no wider than `max_width`
///
/// Splits on whitespace. A single word wider than `max_width` is kept on its
/// own line rather than broken. Blank input yields no lines.
pub fn wrap_to_width<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
            continue;
        }

        let candidate = format!("{current_line} {word}");
        if measure(&candidate) <= max_width {
            current_line = candidate;
        } else {
            lines.push(std::mem::replace(&mut current_line, word.to_string()));
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Wrap and position a caption against the top or bottom edge
///
/// Lines are centered horizontally and kept `margin` pixels away from the
/// anchored edge; a bottom caption grows upward.
pub fn layout_caption<F>(
    text: &str,
    anchor: CaptionAnchor,
    surface: (f32, f32),
    margin: f32,
    metrics: CaptionMetrics,
    measure: F,
) -> Vec<CaptionLine>
where
    F: Fn(&str) -> f32,
{
    let (surface_width, surface_height) = surface;
    let lines = wrap_to_width(text, (surface_width - 2.0 * margin).max(0.0), &measure);
    let count = lines.len();
    let descent = metrics.line_height - metrics.ascent;

    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let baseline_y = match anchor {
                CaptionAnchor::Top => margin + metrics.ascent + i as f32 * metrics.line_height,
                CaptionAnchor::Bottom => {
                    surface_height
                        - margin
                        - descent
                        - (count - 1 - i) as f32 * metrics.line_height
                }
            };
            let x = centered_x(measure(&line), surface_width);
            CaptionLine {
                text: line,
                x,
                baseline_y,
            }
        })
        .collect()
}
