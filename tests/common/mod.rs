#![allow(dead_code)]

use pdf_flow::layout::{FontMetricsProvider, FontStyle, GlyphMetricsCache, Margins, TextType};
use pdf_flow::{Document, MetricsError, PageRenderer, Pt, RenderError};
use std::sync::Arc;

/// Every glyph is half an em wide
pub struct HalfEm;

impl FontMetricsProvider for HalfEm {
    fn char_width(&self, _ch: char) -> Result<f32, MetricsError> {
        Ok(0.5)
    }
}

pub fn document() -> Document {
    Document::new(Arc::new(GlyphMetricsCache::new(HalfEm)), Margins::all(Pt(50.0)))
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Begin,
    Text {
        text: String,
        x: Pt,
        y: Pt,
        text_type: TextType,
        style: FontStyle,
    },
    Underline {
        x1: Pt,
        x2: Pt,
        y: Pt,
    },
    End,
}

/// Remembers every drawing call. Each page renders to the text drawn on it,
/// one line per span.
#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Vec<Call>,
    page: Vec<String>,
}

impl RecordingRenderer {
    pub fn texts(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Text { .. }))
            .collect()
    }

    pub fn underlines(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Underline { .. }))
            .collect()
    }
}

impl PageRenderer for RecordingRenderer {
    fn begin_page(&mut self, _width: Pt, _height: Pt) -> Result<(), RenderError> {
        self.page.clear();
        self.calls.push(Call::Begin);
        Ok(())
    }

    fn draw_text_line(
        &mut self,
        text: &str,
        x: Pt,
        y: Pt,
        text_type: TextType,
        style: FontStyle,
    ) -> Result<(), RenderError> {
        self.page.push(text.to_string());
        self.calls.push(Call::Text {
            text: text.to_string(),
            x,
            y,
            text_type,
            style,
        });
        Ok(())
    }

    fn draw_underline(
        &mut self,
        x1: Pt,
        x2: Pt,
        y: Pt,
        _stroke_width: Pt,
    ) -> Result<(), RenderError> {
        self.calls.push(Call::Underline { x1, x2, y });
        Ok(())
    }

    fn end_page(&mut self) -> Result<Vec<u8>, RenderError> {
        self.calls.push(Call::End);
        Ok(self.page.join("\n").into_bytes())
    }
}

pub fn approx(a: Pt, b: Pt) -> bool {
    (a.0 - b.0).abs() < 0.01
}

/// Half an em wide, except for `Z` which the font lacks
pub struct MissingZ;

impl FontMetricsProvider for MissingZ {
    fn char_width(&self, ch: char) -> Result<f32, MetricsError> {
        match ch {
            'Z' => Err(MetricsError::MissingGlyph(ch)),
            _ => Ok(0.5),
        }
    }
}

/// Fails as soon as anything is drawn
pub struct FailingRenderer;

impl PageRenderer for FailingRenderer {
    fn begin_page(&mut self, _width: Pt, _height: Pt) -> Result<(), RenderError> {
        Ok(())
    }

    fn draw_text_line(
        &mut self,
        _text: &str,
        _x: Pt,
        _y: Pt,
        _text_type: TextType,
        _style: FontStyle,
    ) -> Result<(), RenderError> {
        Err(RenderError::Other("out of paper".to_string()))
    }

    fn draw_underline(
        &mut self,
        _x1: Pt,
        _x2: Pt,
        _y: Pt,
        _stroke_width: Pt,
    ) -> Result<(), RenderError> {
        Ok(())
    }

    fn end_page(&mut self) -> Result<Vec<u8>, RenderError> {
        Ok(Vec::new())
    }
}
