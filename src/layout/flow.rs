use super::{ContentQueue, DocText, GlyphMetricsCache, HeaderFooter, Margins, TextType};
use crate::page::Page;
use crate::pagesize::PageSize;
use crate::units::Pt;
use crate::PDFError;
use std::sync::Arc;

/// What the [PageFlowEngine] produces, in document order
#[derive(Debug)]
pub enum FlowEvent {
    /// A laid out page with at least one line of content on it
    Page(Page),
    /// A raw page block to splice in at this position
    Insert(Vec<u8>),
}

/// Flows the lines of a [ContentQueue] onto pages.
///
/// Every page starts with the cursor on the top margin. Lines are placed at the
/// cursor, which then moves down by the line's leading; once the cursor reaches
/// the bottom margin (or a page break forces it to zero) the page is closed,
/// decorated with the header and footer, and emitted. Pages on which no line
/// was placed are never emitted.
///
/// An insert marker closes the current page and yields its block right after
/// it. If nothing was placed on the current page yet, the block is yielded
/// straight away instead, so inserting never leaves a blank page behind.
pub struct PageFlowEngine {
    queue: ContentQueue,
    header_footer: HeaderFooter,
    metrics: Arc<GlyphMetricsCache>,
    page_size: PageSize,
    margins: Margins,
    cursor: Pt,
    pending_insert: Option<Vec<u8>>,
}

impl PageFlowEngine {
    pub fn new(
        queue: ContentQueue,
        header_footer: HeaderFooter,
        metrics: Arc<GlyphMetricsCache>,
        page_size: PageSize,
        margins: Margins,
    ) -> PageFlowEngine {
        let cursor = page_size.1 - margins.top;
        PageFlowEngine {
            queue,
            header_footer,
            metrics,
            page_size,
            margins,
            cursor,
            pending_insert: None,
        }
    }

    /// Where the first line of every page is placed
    pub fn page_top(&self) -> Pt {
        self.page_size.1 - self.margins.top
    }

    /// Current vertical position on the page being laid out
    pub fn cursor(&self) -> Pt {
        self.cursor
    }

    /// Lay out a single page from the front of the queue. Returns `None` when
    /// nothing was placed, either because the queue ran dry or because an
    /// insert is due before anything else.
    pub fn layout_page(&mut self) -> Result<Option<Page>, PDFError> {
        self.cursor = self.page_top();
        let mut page = Page::new(self.page_size, &self.margins);

        while let Some(entry) = self.queue.pop() {
            match entry {
                DocText::PageBreak => self.cursor = Pt(0.0),
                DocText::Newline => self.cursor -= TextType::Newline.leading(),
                DocText::InsertPage => {
                    let block = self
                        .queue
                        .pop_insert()
                        .ok_or(PDFError::InsertQueueExhausted)?;
                    self.pending_insert = Some(block);

                    if page.placed_lines() == 0 {
                        // nothing on this page yet, insert directly
                        return Ok(None);
                    }
                    self.cursor = Pt(0.0);
                }
                DocText::Line(line) => {
                    page.place_line(&line, self.cursor, &self.metrics)?;
                    self.cursor -= line.text_type().leading();
                }
            }

            if self.queue.is_empty() || self.cursor <= self.margins.bottom {
                break;
            }
        }

        if page.placed_lines() == 0 {
            log::debug!("dropping page without content");
            return Ok(None);
        }

        self.header_footer.apply(&mut page, &self.metrics)?;
        log::debug!(
            "closing page with {} lines, {} entries left",
            page.placed_lines(),
            self.queue.len()
        );
        Ok(Some(page))
    }
}

impl Iterator for PageFlowEngine {
    type Item = Result<FlowEvent, PDFError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(block) = self.pending_insert.take() {
                log::debug!("splicing in a {} byte page block", block.len());
                return Some(Ok(FlowEvent::Insert(block)));
            }

            if self.queue.is_empty() {
                return None;
            }

            match self.layout_page() {
                Ok(Some(page)) => return Some(Ok(FlowEvent::Page(page))),
                Ok(None) => continue,
                Err(e) => {
                    // partial layouts can't be resumed
                    self.queue.clear();
                    self.pending_insert = None;
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetricsError;
    use crate::layout::metrics::tests::half_em_cache;
    use crate::layout::{Emphasis, FontMetricsProvider, TextLine};
    use crate::pagesize::A4;

    /// Half an em wide, but has nothing for `Z`
    struct NoZ;

    impl FontMetricsProvider for NoZ {
        fn char_width(&self, ch: char) -> Result<f32, MetricsError> {
            match ch {
                'Z' => Err(MetricsError::MissingGlyph(ch)),
                _ => Ok(0.5),
            }
        }
    }

    fn line(text: &str) -> TextLine {
        TextLine::single(text, Pt(50.0), TextType::Paragraph, Emphasis::PLAIN)
    }

    fn engine(queue: ContentQueue) -> PageFlowEngine {
        PageFlowEngine::new(
            queue,
            HeaderFooter::new(),
            Arc::new(half_em_cache()),
            A4,
            Margins::all(Pt(50.0)),
        )
    }

    fn events(queue: ContentQueue) -> Vec<FlowEvent> {
        engine(queue).collect::<Result<Vec<_>, _>>().unwrap()
    }

    fn page_texts(event: &FlowEvent) -> Vec<String> {
        match event {
            FlowEvent::Page(page) => page.spans().map(|s| s.text.clone()).collect(),
            FlowEvent::Insert(_) => panic!("expected a page"),
        }
    }

    #[test]
    fn empty_queue_produces_nothing() {
        assert!(events(ContentQueue::new()).is_empty());
    }

    #[test]
    fn lines_are_stacked_from_the_top_margin() {
        let mut queue = ContentQueue::new();
        queue.push_line(line("first"));
        queue.push_newline();
        queue.push_line(line("second"));

        let events = events(queue);
        assert_eq!(events.len(), 1);
        let FlowEvent::Page(page) = &events[0] else {
            panic!("expected a page");
        };

        let top = A4.1 - Pt(50.0);
        let spans: Vec<_> = page.spans().collect();
        assert_eq!(spans[0].coords, (Pt(50.0), top));
        let expected = top - TextType::Paragraph.leading() - TextType::Newline.leading();
        assert!(spans[1].coords.1.distance(expected) < Pt(1e-3));
    }

    #[test]
    fn every_line_is_placed_exactly_once() {
        let mut queue = ContentQueue::new();
        for i in 0..200 {
            queue.push_line(line(&format!("line {i}")));
        }

        let events = events(queue);
        // (841.89 - 50 - 50) / 15.96 rounds up to 47 lines per page
        assert_eq!(events.len(), 5);

        let placed: Vec<String> = events.iter().flat_map(page_texts).collect();
        let expected: Vec<String> = (0..200).map(|i| format!("line {i}")).collect();
        assert_eq!(placed, expected);

        for event in events.iter() {
            let FlowEvent::Page(page) = event else {
                panic!("expected a page");
            };
            assert!(page.spans().all(|s| s.coords.1 > Pt(50.0)));
        }
    }

    #[test]
    fn page_break_closes_the_page() {
        let mut queue = ContentQueue::new();
        queue.push_line(line("before"));
        queue.push_page_break();
        queue.push_line(line("after"));

        let events = events(queue);
        assert_eq!(events.len(), 2);
        assert_eq!(page_texts(&events[0]), vec!["before"]);
        assert_eq!(page_texts(&events[1]), vec!["after"]);
    }

    #[test]
    fn trailing_page_break_adds_no_blank_page() {
        let mut queue = ContentQueue::new();
        queue.push_line(line("only"));
        queue.push_page_break();
        queue.push_page_break();

        assert_eq!(events(queue).len(), 1);
    }

    #[test]
    fn insert_at_page_start_leaves_no_blank_page() {
        let mut queue = ContentQueue::new();
        queue.push_insert(b"spliced".to_vec());
        queue.push_line(line("after"));

        let events = events(queue);
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], FlowEvent::Insert(block) if block == b"spliced"));
        assert_eq!(page_texts(&events[1]), vec!["after"]);
    }

    #[test]
    fn insert_closes_a_started_page() {
        let mut queue = ContentQueue::new();
        queue.push_line(line("before"));
        queue.push_insert(b"one".to_vec());
        queue.push_insert(b"two".to_vec());
        queue.push_line(line("after"));

        let events = events(queue);
        assert_eq!(events.len(), 4);
        assert_eq!(page_texts(&events[0]), vec!["before"]);
        assert!(matches!(&events[1], FlowEvent::Insert(block) if block == b"one"));
        assert!(matches!(&events[2], FlowEvent::Insert(block) if block == b"two"));
        assert_eq!(page_texts(&events[3]), vec!["after"]);
    }

    #[test]
    fn insert_after_only_markers_emits_no_blank_page() {
        let mut queue = ContentQueue::new();
        queue.push_newline();
        queue.push_insert(b"block".to_vec());

        let events = events(queue);
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], FlowEvent::Insert(_)));
    }

    #[test]
    fn header_and_footer_decorate_each_page() {
        let mut header_footer = HeaderFooter::new();
        header_footer.set_footer(vec![TextLine::single(
            "footer",
            Pt(50.0),
            TextType::Footer,
            Emphasis::PLAIN,
        )]);

        let mut queue = ContentQueue::new();
        queue.push_line(line("a"));
        queue.push_page_break();
        queue.push_line(line("b"));

        let engine = PageFlowEngine::new(
            queue,
            header_footer,
            Arc::new(half_em_cache()),
            A4,
            Margins::all(Pt(50.0)),
        );
        let pages: Vec<_> = engine.collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(pages.len(), 2);
        for event in pages.iter() {
            let texts = page_texts(event);
            assert_eq!(texts.len(), 2);
            assert_eq!(texts[1], "footer");
        }
    }

    #[test]
    fn lines_that_do_not_move_the_cursor_still_keep_their_page() {
        let mut queue = ContentQueue::new();
        queue.push_line(TextLine::single(
            "visible",
            Pt(50.0),
            TextType::PageBreak,
            Emphasis::PLAIN,
        ));
        queue.push_insert(b"block".to_vec());

        let events = events(queue);
        assert_eq!(events.len(), 2);
        assert_eq!(page_texts(&events[0]), vec!["visible"]);
        assert!(matches!(&events[1], FlowEvent::Insert(block) if block == b"block"));
    }

    #[test]
    fn nothing_follows_a_layout_error() {
        let mut header_footer = HeaderFooter::new();
        header_footer.set_header(vec![TextLine::single(
            "Z",
            Pt(50.0),
            TextType::Header,
            Emphasis::PLAIN,
        )]);

        let mut queue = ContentQueue::new();
        queue.push_line(line("a"));
        queue.push_insert(b"block".to_vec());
        queue.push_line(line("b"));

        let mut engine = PageFlowEngine::new(
            queue,
            header_footer,
            Arc::new(GlyphMetricsCache::new(NoZ)),
            A4,
            Margins::all(Pt(50.0)),
        );

        let err = engine.next().expect("an event").unwrap_err();
        assert!(matches!(err, PDFError::Layout { ch: 'Z', .. }));
        assert!(engine.next().is_none());
    }
}
