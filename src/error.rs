use crate::layout::{FontStyle, TextType};
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error("could not measure the width of {ch:?}")]
    /// The font metrics could not be obtained for a character. Layout cannot
    /// continue without widths, so the whole document build is aborted.
    Layout {
        ch: char,
        #[source]
        source: MetricsError,
    },

    #[error("{0} can be configured once")]
    /// Something that may only be configured once was configured again
    State(&'static str),

    #[error(transparent)]
    /// The page renderer or the document serializer failed
    Render(#[from] RenderError),

    #[error("font fragments cover {actual} characters, but the line has {expected}")]
    /// The fragments of a text line don't add up to the line's length
    FragmentMismatch { expected: usize, actual: usize },

    #[error("an inserted page was requested but no page block is queued")]
    /// An insert marker was dequeued without a matching page block
    InsertQueueExhausted,

    #[error("{0:?} is a flow marker and cannot carry text")]
    /// A text line was given a marker type, which has no size to draw with
    MarkerLine(TextType),

    #[error(transparent)]
    /// [ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),
}

/// Failures of a [FontMetricsProvider](crate::layout::FontMetricsProvider)
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("font has no glyph for {0:?}")]
    MissingGlyph(char),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures of a [PageRenderer](crate::PageRenderer) or
/// [DocumentSerializer](crate::DocumentSerializer)
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("no font was registered for {0:?} text")]
    MissingFont(FontStyle),

    #[error("{0}")]
    Other(String),
}
