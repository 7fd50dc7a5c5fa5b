use super::{GlyphMetricsCache, TextLine};
use crate::page::Page;
use crate::units::Pt;
use crate::PDFError;

/// Lines repeated on every page: the header stacks down from the top edge of
/// the page, the footer stacks up from the bottom edge.
#[derive(Debug, Default, Clone)]
pub struct HeaderFooter {
    header: Vec<TextLine>,
    footer: Vec<TextLine>,
}

impl HeaderFooter {
    pub fn new() -> HeaderFooter {
        HeaderFooter::default()
    }

    /// Replaces any previous header
    pub fn set_header(&mut self, lines: Vec<TextLine>) {
        self.header = lines;
    }

    /// Replaces any previous footer
    pub fn set_footer(&mut self, lines: Vec<TextLine>) {
        self.footer = lines;
    }

    pub fn header(&self) -> &[TextLine] {
        &self.header
    }

    pub fn footer(&self) -> &[TextLine] {
        &self.footer
    }

    /// Draw the header and footer onto `page`
    pub fn apply(&self, page: &mut Page, metrics: &GlyphMetricsCache) -> Result<(), PDFError> {
        let mut cursor = page.height();
        for line in self.header.iter() {
            cursor -= line.text_type().leading();
            page.decorate(line, cursor, metrics)?;
        }

        // the last line sits on the bottom, earlier lines stack above it
        let mut cursor = Pt(0.0);
        for line in self.footer.iter().rev() {
            cursor += line.text_type().leading();
            page.decorate(line, cursor, metrics)?;
        }

        Ok(())
    }
}
