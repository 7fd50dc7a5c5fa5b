//! Flowing text onto pages.
//!
//! Text handed to a [`Document`](crate::Document) is wrapped into lines right
//! away and queued in a [`ContentQueue`], together with markers for blank
//! lines, page breaks and spliced-in pages. The [`PageFlowEngine`] then walks
//! the queue, placing one line after the other from the top margin down and
//! starting a new page whenever the bottom margin is reached.
//!
//! # Example
//!
//! ```
//! use pdf_flow::layout::{
//!     wrap_text, FontMetricsProvider, GlyphMetricsCache, TextType,
//! };
//! use pdf_flow::{MetricsError, Pt};
//!
//! struct Monospace;
//!
//! impl FontMetricsProvider for Monospace {
//!     fn char_width(&self, _ch: char) -> Result<f32, MetricsError> {
//!         Ok(0.6)
//!     }
//! }
//!
//! let metrics = GlyphMetricsCache::new(Monospace);
//! let lines = wrap_text(
//!     "Hello, world! This line is too long to fit.",
//!     Pt(10.0),
//!     TextType::Paragraph,
//!     Pt(200.0),
//!     Pt(10.0),
//!     &metrics,
//! )
//! .expect("can measure text");
//! assert_eq!(lines.len(), 2);
//! ```

mod doc_text;
mod flow;
mod fragments;
mod header_footer;
mod margins;
pub(crate) mod metrics;
mod queue;
mod text_type;
mod wrap;

pub use doc_text::*;
pub use flow::*;
pub use fragments::*;
pub use header_footer::*;
pub use margins::*;
pub use metrics::{FontMetricsProvider, GlyphMetricsCache};
pub use queue::*;
pub use text_type::*;
pub use wrap::*;
