mod content;
pub use content::*;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Text measurement, wrapping and the flowing of queued text onto pages
pub mod layout;

mod page;
pub use page::*;

/// Common page sizes and orientations
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod render;
pub use render::*;

mod serializer;
pub use serializer::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
