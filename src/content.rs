//! PDF content stream rendering of laid out pages.

use crate::error::RenderError;
use crate::font::Font;
use crate::layout::{FontStyle, TextType};
use crate::render::PageRenderer;
use crate::units::Pt;
use std::io::Write;
use std::sync::Arc;

/// A [PageRenderer] producing one PDF content stream per page. Text is drawn
/// with the Identity-H encoded fonts registered with
/// [PdfSerializer](crate::PdfSerializer), regular text as `/F0` and bold text
/// as `/F1`, so the two must be given the same fonts.
#[derive(Default)]
pub struct PdfRenderer {
    fonts: [Option<Arc<Font>>; 2],
    content: Vec<u8>,
}

impl PdfRenderer {
    pub fn new(regular: Arc<Font>) -> PdfRenderer {
        PdfRenderer::default().with_font(FontStyle::Regular, regular)
    }

    pub fn with_font(mut self, style: FontStyle, font: Arc<Font>) -> PdfRenderer {
        self.fonts[style.font_index()] = Some(font);
        self
    }

    fn font(&self, style: FontStyle) -> Result<&Font, RenderError> {
        self.fonts[style.font_index()]
            .as_deref()
            .ok_or(RenderError::MissingFont(style))
    }
}

impl PageRenderer for PdfRenderer {
    fn begin_page(&mut self, _width: Pt, _height: Pt) -> Result<(), RenderError> {
        self.content.clear();
        Ok(())
    }

    #[allow(clippy::write_with_newline)]
    fn draw_text_line(
        &mut self,
        text: &str,
        x: Pt,
        y: Pt,
        text_type: TextType,
        style: FontStyle,
    ) -> Result<(), RenderError> {
        let font = self.font(style)?;
        let mut glyphs = String::with_capacity(text.len() * 4);
        for ch in text.chars() {
            let gid = font.glyph_or_replacement(ch).unwrap_or_default();
            glyphs.push_str(&format!("{gid:04x}"));
        }

        let content = &mut self.content;
        write!(content, "BT\n")?;
        write!(
            content,
            "/F{} {} Tf\n",
            style.font_index(),
            text_type.font_size().0
        )?;
        write!(content, "{} {} Td\n", x.0, y.0)?;
        write!(content, "<{glyphs}> Tj\n")?;
        write!(content, "ET\n")?;
        Ok(())
    }

    #[allow(clippy::write_with_newline)]
    fn draw_underline(
        &mut self,
        x1: Pt,
        x2: Pt,
        y: Pt,
        stroke_width: Pt,
    ) -> Result<(), RenderError> {
        let content = &mut self.content;
        write!(content, "q\n")?;
        write!(content, "{} w\n", stroke_width.0)?;
        write!(content, "{} {} m\n", x1.0, y.0)?;
        write!(content, "{} {} l\n", x2.0, y.0)?;
        write!(content, "S\n")?;
        write!(content, "Q\n")?;
        Ok(())
    }

    fn end_page(&mut self) -> Result<Vec<u8>, RenderError> {
        Ok(std::mem::take(&mut self.content))
    }
}
