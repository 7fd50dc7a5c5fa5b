use super::{DocText, TextLine};
use std::collections::VecDeque;

/// FIFO of raw page blocks waiting to be spliced into the output. The n-th
/// block belongs to the n-th [DocText::InsertPage] marker of the content queue.
#[derive(Debug, Default, Clone)]
pub struct PageInsertQueue {
    blocks: VecDeque<Vec<u8>>,
}

impl PageInsertQueue {
    pub fn push(&mut self, block: Vec<u8>) {
        self.blocks.push_back(block);
    }

    pub fn pop(&mut self) -> Option<Vec<u8>> {
        self.blocks.pop_front()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// FIFO of everything that still has to be laid out
#[derive(Debug, Default, Clone)]
pub struct ContentQueue {
    entries: VecDeque<DocText>,
    inserts: PageInsertQueue,
}

impl ContentQueue {
    pub fn new() -> ContentQueue {
        ContentQueue::default()
    }

    pub fn push_line(&mut self, line: TextLine) {
        self.entries.push_back(DocText::Line(line));
    }

    pub fn push_newline(&mut self) {
        self.entries.push_back(DocText::Newline);
    }

    pub fn push_page_break(&mut self) {
        self.entries.push_back(DocText::PageBreak);
    }

    /// Queue a raw page block together with the marker that splices it in
    pub fn push_insert(&mut self, block: Vec<u8>) {
        self.inserts.push(block);
        self.entries.push_back(DocText::InsertPage);
    }

    pub fn pop(&mut self) -> Option<DocText> {
        self.entries.pop_front()
    }

    /// The block for the [DocText::InsertPage] marker that was just popped
    pub fn pop_insert(&mut self) -> Option<Vec<u8>> {
        self.inserts.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pending_inserts(&self) -> usize {
        self.inserts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocText> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.inserts = PageInsertQueue::default();
    }
}
