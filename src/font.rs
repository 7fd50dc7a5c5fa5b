use crate::error::MetricsError;
use crate::layout::FontMetricsProvider;
use crate::refs::{ObjectReferences, RefType};
use crate::PDFError;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

/// A parsed TrueType / OpenType font. Fonts are embedded in their entirety in
/// the generated PDF, so large fonts may dramatically increase its size.
///
/// A document uses one font for regular text and optionally one for bold text.
/// The regular font usually also serves as the [FontMetricsProvider] for
/// wrapping, wrapped in a [GlyphMetricsCache](crate::layout::GlyphMetricsCache).
pub struct Font {
    pub face: OwnedFace,
}

/// A glyph of the font's unicode cmap, with its horizontal advance in font units
struct GlyphEntry {
    ch: char,
    advance: u16,
    height: i16,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn name_entry(&self, name_id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.glyph_id('\u{FFFD}').or_else(|| self.glyph_id('?'))
    }

    /// The glyph drawn for `ch`, falling back to the replacement glyph
    pub fn glyph_or_replacement(&self, ch: char) -> Option<u16> {
        self.glyph_id(ch).or_else(|| {
            log::warn!("font has no glyph for {ch:?}, using the replacement glyph");
            self.replacement_glyph_id()
        })
    }

    /// All glyphs reachable through a unicode cmap, keyed by glyph id
    fn glyph_table(&self) -> BTreeMap<u16, GlyphEntry> {
        let face = self.face();
        let mut table: BTreeMap<u16, GlyphEntry> = BTreeMap::new();

        let Some(cmap) = face.tables().cmap else {
            return table;
        };

        for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) else {
                    return;
                };
                let Some(advance) = face.glyph_hor_advance(gid) else {
                    return;
                };
                let height = face
                    .glyph_bounding_box(gid)
                    .map(|bbox| {
                        bbox.y_max
                            .saturating_sub(bbox.y_min)
                            .saturating_sub(face.descender())
                    })
                    .unwrap_or(1000);
                table.entry(gid.0).or_insert(GlyphEntry {
                    ch,
                    advance,
                    height,
                });
            });
        }

        table
    }

    fn scaling(&self) -> f32 {
        1000.0 / self.face().units_per_em() as f32
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, GlyphEntry>,
        writer: &mut Pdf,
    ) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, glyphs, writer);
        let id = refs.gen(RefType::CidFont(font_index));
        let scaling = self.scaling();

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);

        // runs of consecutive glyph ids share one widths entry
        let mut widths = cid_font.widths();
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        for (&gid, glyph) in glyphs.iter() {
            let contiguous = run_start.is_some_and(|start| gid as usize == start as usize + run.len());
            if !contiguous {
                if let Some(start) = run_start {
                    widths.consecutive(start, run.drain(..));
                }
                run_start = Some(gid);
            }
            run.push(glyph.advance as f32 * scaling);
        }
        if let Some(start) = run_start {
            widths.consecutive(start, run.drain(..));
        }
        widths.finish();

        let default_width = glyphs
            .values()
            .map(|g| g.advance)
            .max()
            .map(|w| w as f32 * scaling)
            .unwrap_or(1000.0);
        cid_font.default_width(default_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, GlyphEntry>,
        writer: &mut Pdf,
    ) -> Ref {
        let data_id = refs.gen(RefType::FontData(font_index));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face();
        let scaling = self.scaling();
        let max_width = glyphs.values().map(|g| g.advance).max().unwrap_or_default() as f32;
        let max_height = glyphs.values().map(|g| g.height).max().unwrap_or_default() as f32;
        let avg_width = if glyphs.is_empty() {
            0.0
        } else {
            glyphs.values().map(|g| g.advance as f32).sum::<f32>() / glyphs.len() as f32
        };

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let fallback_name = format!("F{font_index}");
        let name = self.name().unwrap_or_else(|| fallback_name.clone());
        let family = self.family().unwrap_or(fallback_name);

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);

        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: (bbox.y_max as f32).max(max_height) * scaling,
        });
        // nominal slant, the exact angle only matters to font substitution
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        let cap_height = face.capital_height().map(|h| h as f32 * scaling);
        descriptor.cap_height(cap_height.unwrap_or(1000.0));
        descriptor.x_height(
            face.x_height()
                .map(|h| h as f32 * scaling)
                .or(cap_height)
                .unwrap_or_default(),
        );
        // TODO: derive the stem width from the OS/2 weight class instead of a constant
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width * scaling);
        descriptor.missing_width(max_width * scaling);
        descriptor.font_file2(data_id);

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, GlyphEntry>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo\n\
             << /Registry (Adobe)\n\
             /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries sharing a common high byte
        let entries: Vec<(u16, char)> = glyphs.iter().map(|(&gid, g)| (gid, g.ch)).collect();
        for block in entries.chunk_by(|a, b| a.0 >> 8 == b.0 >> 8) {
            for chunk in block.chunks(100) {
                map.push_str(&format!("{} beginbfchar\n", chunk.len()));
                for (gid, ch) in chunk {
                    map.push_str(&format!("<{gid:04x}> <{:04x}>\n", u32::from(*ch)));
                }
                map.push_str("endbfchar\n");
            }
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(pdf_writer::Filter::FlateDecode);

        id
    }

    /// Embed the font as the Type0 font resource `F{font_index}`
    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let glyphs = self.glyph_table();
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, &glyphs, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, &glyphs, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}

impl FontMetricsProvider for Font {
    /// The advance of `ch` (or of the replacement glyph) in ems
    fn char_width(&self, ch: char) -> Result<f32, MetricsError> {
        let gid = self
            .glyph_or_replacement(ch)
            .ok_or(MetricsError::MissingGlyph(ch))?;
        let advance = self
            .face()
            .glyph_hor_advance(GlyphId(gid))
            .unwrap_or_default();
        Ok(advance as f32 / self.face().units_per_em() as f32)
    }
}
