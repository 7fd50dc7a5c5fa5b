//! The seams between the layout engine and whatever produces the final bytes.

use crate::error::RenderError;
use crate::info::DocumentInfo;
use crate::layout::{FontStyle, TextType};
use crate::units::Pt;
use std::collections::VecDeque;

/// Draws laid out pages. A page is opened with `begin_page`, drawn into and
/// closed with `end_page`, which hands back the page's bytes.
pub trait PageRenderer {
    fn begin_page(&mut self, width: Pt, height: Pt) -> Result<(), RenderError>;

    /// Draw `text` with its baseline starting at (`x`, `y`)
    fn draw_text_line(
        &mut self,
        text: &str,
        x: Pt,
        y: Pt,
        text_type: TextType,
        style: FontStyle,
    ) -> Result<(), RenderError>;

    fn draw_underline(&mut self, x1: Pt, x2: Pt, y: Pt, stroke_width: Pt)
        -> Result<(), RenderError>;

    fn end_page(&mut self) -> Result<Vec<u8>, RenderError>;
}

/// One page of the finished document
#[derive(Debug, Clone, PartialEq)]
pub enum PageBlock {
    /// A page laid out and drawn by a [PageRenderer]
    Rendered(Vec<u8>),
    /// A block supplied from outside, passed through untouched
    Spliced(Vec<u8>),
}

impl PageBlock {
    pub fn bytes(&self) -> &[u8] {
        match self {
            PageBlock::Rendered(bytes) | PageBlock::Spliced(bytes) => bytes,
        }
    }
}

/// Turns the ordered pages of a document into its final byte stream
pub trait DocumentSerializer {
    /// Returns `None` when `pages` is empty
    fn assemble(
        &mut self,
        pages: Vec<PageBlock>,
        info: Option<&DocumentInfo>,
    ) -> Result<Option<Vec<u8>>, RenderError>;
}

/// Supplies pre-rendered page blocks, one per call, until it runs dry
pub trait ExternalPageSource {
    fn next_block(&mut self) -> Result<Option<Vec<u8>>, RenderError>;
}

impl ExternalPageSource for VecDeque<Vec<u8>> {
    fn next_block(&mut self) -> Result<Option<Vec<u8>>, RenderError> {
        Ok(self.pop_front())
    }
}

impl ExternalPageSource for std::vec::IntoIter<Vec<u8>> {
    fn next_block(&mut self) -> Result<Option<Vec<u8>>, RenderError> {
        Ok(self.next())
    }
}
