use super::{FontStyle, GlyphMetricsCache, TextLine, TextType};
use crate::units::Pt;
use crate::PDFError;

/// A horizontal stroke drawn under a fragment
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Underline {
    pub x1: Pt,
    pub x2: Pt,
    pub y: Pt,
    pub stroke_width: Pt,
}

/// A fragment of a line with its horizontal extent on the page
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFragment {
    pub text: String,
    pub style: FontStyle,
    pub start_x: Pt,
    pub end_x: Pt,
    pub underline: Option<Underline>,
}

impl ResolvedFragment {
    pub fn width(&self) -> Pt {
        self.end_x - self.start_x
    }
}

/// Thickness of underlines for `text_type`, relative to a heading's 1pt stroke
pub fn underline_stroke_width(text_type: TextType) -> Pt {
    Pt(text_type.font_size().0 / TextType::Heading.font_size().0)
}

/// Computes where each fragment of `line` starts and ends when the line is set
/// on the baseline `cursor_y`. Fragments follow each other without gaps starting
/// at the line's `x_start`; underlined fragments get a stroke two stroke widths
/// below the baseline spanning exactly the fragment.
pub fn resolve_fragments(
    line: &TextLine,
    cursor_y: Pt,
    metrics: &GlyphMetricsCache,
) -> Result<Vec<ResolvedFragment>, PDFError> {
    let text_type = line.text_type();
    let mut chars = line.text().chars();
    let mut x = line.x_start();
    let mut resolved = Vec::with_capacity(line.fragments().len());

    for fragment in line.fragments() {
        let text: String = chars.by_ref().take(fragment.char_count).collect();
        let start_x = x;
        let end_x = start_x + metrics.width_of_str(&text, text_type)?;

        let underline = fragment.underlined.then(|| {
            let stroke_width = underline_stroke_width(text_type);
            Underline {
                x1: start_x,
                x2: end_x,
                y: cursor_y - stroke_width * 2.0,
                stroke_width,
            }
        });

        resolved.push(ResolvedFragment {
            text,
            style: fragment.style,
            start_x,
            end_x,
            underline,
        });
        x = end_x;
    }

    Ok(resolved)
}
