use crate::error::RenderError;
use crate::layout::{resolve_fragments, FontStyle, GlyphMetricsCache, Margins, TextLine, TextType, Underline};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::render::PageRenderer;
use crate::units::Pt;
use crate::PDFError;

/// A run of text placed on a page, drawn in a single font
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub text_type: TextType,
    pub style: FontStyle,
    /// Start of the baseline
    pub coords: (Pt, Pt),
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(SpanLayout),
    Underline(Underline),
}

/// A laid out page: everything placed on it, in drawing order
#[derive(Debug, Clone)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    pub contents: Vec<PageContents>,
    placed_lines: usize,
}

impl Page {
    pub fn new(size: PageSize, margins: &Margins) -> Page {
        Page {
            media_box: Rect::from_page_size(size),
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: size.0 - margins.right,
                y2: size.1 - margins.top,
            },
            contents: Vec::default(),
            placed_lines: 0,
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.x2 - self.media_box.x1
    }

    pub fn height(&self) -> Pt {
        self.media_box.y2 - self.media_box.y1
    }

    /// Place a line of body content with its baseline at `y`
    pub fn place_line(
        &mut self,
        line: &TextLine,
        y: Pt,
        metrics: &GlyphMetricsCache,
    ) -> Result<(), PDFError> {
        self.draw_line(line, y, metrics)?;
        self.placed_lines += 1;
        Ok(())
    }

    /// Place a header or footer line; these don't count as content
    pub fn decorate(
        &mut self,
        line: &TextLine,
        y: Pt,
        metrics: &GlyphMetricsCache,
    ) -> Result<(), PDFError> {
        self.draw_line(line, y, metrics)
    }

    fn draw_line(
        &mut self,
        line: &TextLine,
        y: Pt,
        metrics: &GlyphMetricsCache,
    ) -> Result<(), PDFError> {
        for fragment in resolve_fragments(line, y, metrics)? {
            if !fragment.text.is_empty() {
                self.contents.push(PageContents::Text(SpanLayout {
                    text: fragment.text,
                    text_type: line.text_type(),
                    style: fragment.style,
                    coords: (fragment.start_x, y),
                }));
            }
            if let Some(underline) = fragment.underline {
                self.contents.push(PageContents::Underline(underline));
            }
        }
        Ok(())
    }

    /// The number of body content lines placed on this page
    pub fn placed_lines(&self) -> usize {
        self.placed_lines
    }

    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Text(span) => Some(span),
            PageContents::Underline(_) => None,
        })
    }

    pub fn underlines(&self) -> impl Iterator<Item = &Underline> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Underline(underline) => Some(underline),
            PageContents::Text(_) => None,
        })
    }

    /// Draw the page's contents, returning the bytes the renderer produced
    pub fn render<R: PageRenderer + ?Sized>(&self, renderer: &mut R) -> Result<Vec<u8>, RenderError> {
        renderer.begin_page(self.width(), self.height())?;
        for content in self.contents.iter() {
            match content {
                PageContents::Text(span) => renderer.draw_text_line(
                    &span.text,
                    span.coords.0,
                    span.coords.1,
                    span.text_type,
                    span.style,
                )?,
                PageContents::Underline(u) => {
                    renderer.draw_underline(u.x1, u.x2, u.y, u.stroke_width)?
                }
            }
        }
        renderer.end_page()
    }
}
