use crate::error::RenderError;
use crate::font::Font;
use crate::info::DocumentInfo;
use crate::layout::FontStyle;
use crate::pagesize::{PageSize, A4};
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::render::{DocumentSerializer, PageBlock};
use pdf_writer::{Finish, Name, Pdf, Ref};
use std::sync::Arc;

/// Writes the pages of a document out as a complete PDF.
///
/// Every block becomes the content stream of one page: rendered pages as drawn
/// by [PdfRenderer](crate::PdfRenderer), spliced blocks exactly as they were
/// supplied. All pages share the registered fonts as `/F0` (regular) and `/F1`
/// (bold).
///
/// The whole document is assembled in memory before it is returned.
pub struct PdfSerializer {
    page_size: PageSize,
    fonts: [Option<Arc<Font>>; 2],
}

impl Default for PdfSerializer {
    fn default() -> Self {
        PdfSerializer {
            page_size: A4,
            fonts: [None, None],
        }
    }
}

impl PdfSerializer {
    pub fn new(page_size: PageSize) -> PdfSerializer {
        PdfSerializer {
            page_size,
            ..PdfSerializer::default()
        }
    }

    pub fn with_font(mut self, style: FontStyle, font: Arc<Font>) -> PdfSerializer {
        self.fonts[style.font_index()] = Some(font);
        self
    }
}

impl DocumentSerializer for PdfSerializer {
    fn assemble(
        &mut self,
        pages: Vec<PageBlock>,
        info: Option<&DocumentInfo>,
    ) -> Result<Option<Vec<u8>>, RenderError> {
        if pages.is_empty() {
            return Ok(None);
        }

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        for (index, font) in self.fonts.iter().enumerate() {
            if let Some(font) = font {
                font.write(&mut refs, index, &mut writer);
            }
        }

        let media_box: pdf_writer::Rect = Rect::from_page_size(self.page_size).into();
        for (index, block) in pages.iter().enumerate() {
            let content_id = refs.gen(RefType::ContentForPage(index));

            let mut page = writer.page(page_refs[index]);
            page.media_box(media_box);
            page.parent(page_tree_id);
            page.contents(content_id);

            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for font_index in 0..self.fonts.len() {
                if let Some(font_ref) = refs.get(RefType::Font(font_index)) {
                    fonts.pair(Name(format!("F{font_index}").as_bytes()), font_ref);
                }
            }
            fonts.finish();
            resources.finish();
            page.finish();

            if let PageBlock::Spliced(bytes) = block {
                log::debug!("page {index} is a spliced block of {} bytes", bytes.len());
            }
            writer.stream(content_id, block.bytes());
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        Ok(Some(writer.finish()))
    }
}
