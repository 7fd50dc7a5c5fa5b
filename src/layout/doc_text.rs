use super::TextType;
use crate::units::Pt;
use crate::PDFError;

/// Which of the document's fonts a run of text is drawn in
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
}

impl FontStyle {
    /// Position of the style's font within the document's font resources
    pub fn font_index(self) -> usize {
        self as usize
    }
}

/// How text passed to [Document](crate::Document) should be emphasised
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Emphasis {
    pub bold: bool,
    pub underlined: bool,
}

impl Emphasis {
    pub const PLAIN: Emphasis = Emphasis {
        bold: false,
        underlined: false,
    };
    pub const BOLD: Emphasis = Emphasis {
        bold: true,
        underlined: false,
    };
    pub const UNDERLINED: Emphasis = Emphasis {
        bold: false,
        underlined: true,
    };

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn underlined(mut self) -> Self {
        self.underlined = true;
        self
    }

    pub fn font_style(&self) -> FontStyle {
        if self.bold {
            FontStyle::Bold
        } else {
            FontStyle::Regular
        }
    }

    /// A single fragment spanning `char_count` characters in this emphasis
    pub fn fragment(&self, char_count: usize) -> FontFragment {
        FontFragment {
            char_count,
            style: self.font_style(),
            underlined: self.underlined,
        }
    }
}

/// A run of `char_count` consecutive characters sharing a font and underline
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FontFragment {
    pub char_count: usize,
    pub style: FontStyle,
    pub underlined: bool,
}

/// One laid out line of text, waiting to be placed on a page. The fragments
/// always cover the text exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    text: String,
    x_start: Pt,
    text_type: TextType,
    fragments: Vec<FontFragment>,
}

impl TextLine {
    pub fn new<S: Into<String>>(
        text: S,
        x_start: Pt,
        text_type: TextType,
        fragments: Vec<FontFragment>,
    ) -> Result<TextLine, PDFError> {
        if text_type.is_marker() {
            return Err(PDFError::MarkerLine(text_type));
        }

        let text = text.into();
        let expected = text.chars().count();
        let actual = fragments.iter().map(|f| f.char_count).sum();
        if expected != actual {
            return Err(PDFError::FragmentMismatch { expected, actual });
        }

        Ok(TextLine {
            text,
            x_start,
            text_type,
            fragments,
        })
    }

    /// A line drawn entirely in one emphasis
    #[cfg(test)]
    pub(crate) fn single<S: Into<String>>(
        text: S,
        x_start: Pt,
        text_type: TextType,
        emphasis: Emphasis,
    ) -> TextLine {
        let text = text.into();
        let fragments = vec![emphasis.fragment(text.chars().count())];
        TextLine {
            text,
            x_start,
            text_type,
            fragments,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn x_start(&self) -> Pt {
        self.x_start
    }

    pub fn text_type(&self) -> TextType {
        self.text_type
    }

    pub fn fragments(&self) -> &[FontFragment] {
        &self.fragments
    }
}

/// An entry of the [ContentQueue](super::ContentQueue): either a line of text or
/// a marker steering the page flow
#[derive(Debug, Clone, PartialEq)]
pub enum DocText {
    Line(TextLine),
    Newline,
    PageBreak,
    InsertPage,
}

impl DocText {
    pub fn text_type(&self) -> TextType {
        match self {
            DocText::Line(line) => line.text_type(),
            DocText::Newline => TextType::Newline,
            DocText::PageBreak => TextType::PageBreak,
            DocText::InsertPage => TextType::InsertPage,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DocText::Line(line) => Some(line.text()),
            _ => None,
        }
    }
}
