use crate::info::DocumentInfo;
use crate::layout::{
    split_fragments, wrap_text, ContentQueue, Emphasis, FlowEvent, FontFragment,
    GlyphMetricsCache, HeaderFooter, Margins, PageFlowEngine, TextLine, TextType,
};
use crate::pagesize::{PageSize, A4};
use crate::render::{DocumentSerializer, ExternalPageSource, PageBlock, PageRenderer};
use crate::units::Pt;
use crate::PDFError;
use std::sync::Arc;

/// A document is built up by adding text to it, which is wrapped into lines
/// and queued immediately. Nothing is placed on pages until the document is
/// rendered with [Document::render] or written with [Document::write], at which
/// point the queue is flowed onto as many pages as needed.
///
/// ```
/// use pdf_flow::layout::{Emphasis, FontMetricsProvider, GlyphMetricsCache, Margins};
/// use pdf_flow::{Document, MetricsError, Pt};
/// use std::sync::Arc;
///
/// struct Monospace;
///
/// impl FontMetricsProvider for Monospace {
///     fn char_width(&self, _ch: char) -> Result<f32, MetricsError> {
///         Ok(0.6)
///     }
/// }
///
/// let metrics = Arc::new(GlyphMetricsCache::new(Monospace));
/// let mut doc = Document::new(metrics, Margins::all(Pt(50.0)));
/// doc.add_heading("Report", Emphasis::BOLD).expect("can measure text");
/// doc.add_paragraph("Everything went fine.", Emphasis::PLAIN).expect("can measure text");
///
/// let pages = doc.flow().collect::<Result<Vec<_>, _>>().expect("can lay out");
/// assert_eq!(pages.len(), 1);
/// ```
pub struct Document {
    page_size: PageSize,
    margins: Margins,
    metrics: Arc<GlyphMetricsCache>,
    queue: ContentQueue,
    header_footer: HeaderFooter,
    info: Option<DocumentInfo>,
}

/// The ordered pages of a laid out document, ready to be serialized
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub pages: Vec<PageBlock>,
    pub info: Option<DocumentInfo>,
}

impl Document {
    /// Create an empty A4 document measuring its text with `metrics`. The
    /// metrics cache can be shared by any number of documents.
    pub fn new(metrics: Arc<GlyphMetricsCache>, margins: Margins) -> Document {
        Document {
            page_size: A4,
            margins,
            metrics,
            queue: ContentQueue::new(),
            header_footer: HeaderFooter::new(),
            info: None,
        }
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Document {
        self.page_size = page_size;
        self
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn margins(&self) -> &Margins {
        &self.margins
    }

    /// Everything queued so far
    pub fn queue(&self) -> &ContentQueue {
        &self.queue
    }

    fn wrap(
        &self,
        text: &str,
        x_start: Pt,
        text_type: TextType,
        fragments: &[FontFragment],
    ) -> Result<Vec<TextLine>, PDFError> {
        let lines = wrap_text(
            text,
            x_start,
            text_type,
            self.page_size.0,
            self.margins.right,
            &self.metrics,
        )?;
        let split = split_fragments(text, fragments, &lines);

        lines
            .into_iter()
            .zip(split)
            .map(|(line, fragments)| TextLine::new(line.text, x_start, text_type, fragments))
            .collect()
    }

    /// Wrap `text` and queue the resulting lines. `fragments` describe `text`
    /// as given, and are redistributed over the wrapped lines.
    pub fn add_fragments(
        &mut self,
        text: &str,
        x_start: Pt,
        text_type: TextType,
        fragments: &[FontFragment],
    ) -> Result<(), PDFError> {
        for line in self.wrap(text, x_start, text_type, fragments)? {
            self.queue.push_line(line);
        }
        Ok(())
    }

    fn add_text(
        &mut self,
        text: &str,
        x_start: Pt,
        text_type: TextType,
        emphasis: Emphasis,
    ) -> Result<(), PDFError> {
        let fragment = emphasis.fragment(text.chars().count());
        self.add_fragments(text, x_start, text_type, &[fragment])
    }

    pub fn add_heading(&mut self, text: &str, emphasis: Emphasis) -> Result<(), PDFError> {
        self.add_text(text, self.margins.left, TextType::Heading, emphasis)
    }

    pub fn add_sub_heading(&mut self, text: &str, emphasis: Emphasis) -> Result<(), PDFError> {
        self.add_text(text, self.margins.left, TextType::SubHeading, emphasis)
    }

    pub fn add_paragraph(&mut self, text: &str, emphasis: Emphasis) -> Result<(), PDFError> {
        self.add_text(text, self.margins.left, TextType::Paragraph, emphasis)
    }

    /// Queue one list entry per item, each prefixed with `delimiter` and
    /// indented by `indent` from the left margin
    pub fn add_list<I, S>(
        &mut self,
        items: I,
        emphasis: Emphasis,
        delimiter: &str,
        indent: Pt,
    ) -> Result<(), PDFError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let x_start = self.margins.left + indent;
        for item in items {
            let entry = format!("{delimiter}{}", item.as_ref());
            self.add_text(&entry, x_start, TextType::List, emphasis)?;
        }
        Ok(())
    }

    /// Like [Document::add_list], with one item per line of `lines`. Trailing
    /// empty lines don't make items.
    pub fn add_list_lines(
        &mut self,
        lines: &str,
        emphasis: Emphasis,
        delimiter: &str,
        indent: Pt,
    ) -> Result<(), PDFError> {
        let mut items: Vec<&str> = lines.split('\n').collect();
        while items.len() > 1 && items.last().is_some_and(|item| item.is_empty()) {
            items.pop();
        }
        self.add_list(items, emphasis, delimiter, indent)
    }

    /// Queue a "title: value" paragraph, the title drawn in `title_emphasis`
    /// and the rest plain
    pub fn add_title_value(
        &mut self,
        title: &str,
        value: &str,
        title_emphasis: Emphasis,
    ) -> Result<(), PDFError> {
        let line = format!("{title}: {value}");
        let title_len = title.chars().count();
        let fragments = [
            title_emphasis.fragment(title_len),
            Emphasis::PLAIN.fragment(line.chars().count() - title_len),
        ];
        self.add_fragments(&line, self.margins.left, TextType::Paragraph, &fragments)
    }

    pub fn add_underlined_title_colon_value(
        &mut self,
        title: &str,
        value: &str,
    ) -> Result<(), PDFError> {
        self.add_title_value(title, value, Emphasis::UNDERLINED)
    }

    /// Leave a blank line
    pub fn add_newline(&mut self) {
        self.queue.push_newline();
    }

    /// Continue on a new page
    pub fn add_page_break(&mut self) {
        self.queue.push_page_break();
    }

    /// Splice a pre-rendered page block in at this position. The block is
    /// passed to the serializer untouched.
    pub fn add_new_pages<B: Into<Vec<u8>>>(&mut self, block: B) {
        self.queue.push_insert(block.into());
    }

    /// Splice in every block `source` supplies, returning how many there were
    pub fn add_pages_from<S: ExternalPageSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<usize, PDFError> {
        let mut count = 0;
        while let Some(block) = source.next_block()? {
            self.queue.push_insert(block);
            count += 1;
        }
        Ok(count)
    }

    /// Set the header shown at the top of every page, replacing any previous one
    pub fn set_header(&mut self, text: &str, emphasis: Emphasis) -> Result<(), PDFError> {
        let fragment = emphasis.fragment(text.chars().count());
        let lines = self.wrap(text, self.margins.left, TextType::Header, &[fragment])?;
        self.header_footer.set_header(lines);
        Ok(())
    }

    /// Set the footer shown at the bottom of every page, replacing any previous one
    pub fn set_footer(&mut self, text: &str, emphasis: Emphasis) -> Result<(), PDFError> {
        let fragment = emphasis.fragment(text.chars().count());
        let lines = self.wrap(text, self.margins.left, TextType::Footer, &[fragment])?;
        self.header_footer.set_footer(lines);
        Ok(())
    }

    /// Sets information about the document. The information can only be set
    /// once; trying again fails and leaves the first information in place.
    pub fn set_info(&mut self, info: DocumentInfo) -> Result<(), PDFError> {
        if self.info.is_some() {
            return Err(PDFError::State("document information"));
        }
        self.info = Some(info);
        Ok(())
    }

    pub fn info(&self) -> Option<&DocumentInfo> {
        self.info.as_ref()
    }

    /// Flow the queued content onto pages without drawing them
    pub fn flow(self) -> PageFlowEngine {
        PageFlowEngine::new(
            self.queue,
            self.header_footer,
            self.metrics,
            self.page_size,
            self.margins,
        )
    }

    /// Lay out and draw every page, in queue order. Spliced blocks end up
    /// exactly where they were added.
    pub fn render<R: PageRenderer + ?Sized>(
        self,
        renderer: &mut R,
    ) -> Result<RenderedDocument, PDFError> {
        let info = self.info.clone();
        let mut pages: Vec<PageBlock> = Vec::new();

        for event in self.flow() {
            match event? {
                FlowEvent::Page(page) => pages.push(PageBlock::Rendered(page.render(renderer)?)),
                FlowEvent::Insert(block) => pages.push(PageBlock::Spliced(block)),
            }
        }

        log::debug!("document laid out into {} pages", pages.len());
        Ok(RenderedDocument { pages, info })
    }

    /// Render the document and serialize it. Returns `None` when the document
    /// ended up without any pages.
    pub fn write<R, S>(self, renderer: &mut R, serializer: &mut S) -> Result<Option<Vec<u8>>, PDFError>
    where
        R: PageRenderer + ?Sized,
        S: DocumentSerializer + ?Sized,
    {
        let RenderedDocument { pages, info } = self.render(renderer)?;
        if pages.is_empty() {
            return Ok(None);
        }

        Ok(serializer.assemble(pages, info.as_ref())?)
    }
}
