use crate::units::Pt;

/// The ratio between a font size and the vertical advance of one line set in it
pub const LEADING_FACTOR: f32 = 1.33;

/// The kind of a queued text entry. Text kinds carry the size the line is set
/// in, the last three kinds are control markers which are never drawn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextType {
    Heading,
    SubHeading,
    Paragraph,
    List,
    Header,
    Footer,
    PageNumber,
    Newline,
    PageBreak,
    InsertPage,
}

/// Size information for one [TextType]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StyleMetrics {
    pub font_size: Pt,
}

impl StyleMetrics {
    /// Vertical distance between the baselines of two adjacent lines
    pub fn leading(&self) -> Pt {
        self.font_size * LEADING_FACTOR
    }
}

/// Indexed by `TextType as usize`
static STYLES: [StyleMetrics; 10] = [
    StyleMetrics { font_size: Pt(16.0) },
    StyleMetrics { font_size: Pt(15.0) },
    StyleMetrics { font_size: Pt(12.0) },
    StyleMetrics { font_size: Pt(11.0) },
    StyleMetrics { font_size: Pt(8.0) },
    StyleMetrics { font_size: Pt(8.0) },
    StyleMetrics { font_size: Pt(10.0) },
    // a blank line advances like an 18pt line
    StyleMetrics { font_size: Pt(18.0) },
    StyleMetrics { font_size: Pt(0.0) },
    StyleMetrics { font_size: Pt(0.0) },
];

impl TextType {
    pub const ALL: [TextType; 10] = [
        TextType::Heading,
        TextType::SubHeading,
        TextType::Paragraph,
        TextType::List,
        TextType::Header,
        TextType::Footer,
        TextType::PageNumber,
        TextType::Newline,
        TextType::PageBreak,
        TextType::InsertPage,
    ];

    pub fn metrics(self) -> &'static StyleMetrics {
        &STYLES[self as usize]
    }

    pub fn font_size(self) -> Pt {
        self.metrics().font_size
    }

    pub fn leading(self) -> Pt {
        self.metrics().leading()
    }

    /// Whether this kind only steers the page flow and never carries text
    pub fn is_marker(self) -> bool {
        matches!(
            self,
            TextType::Newline | TextType::PageBreak | TextType::InsertPage
        )
    }
}
