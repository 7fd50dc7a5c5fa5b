use super::TextType;
use crate::error::MetricsError;
use crate::units::Pt;
use crate::PDFError;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Supplies the advance width of single characters, normalized to an em
/// (i.e. the width the character has when set at a font size of 1pt).
pub trait FontMetricsProvider: Send + Sync {
    fn char_width(&self, ch: char) -> Result<f32, MetricsError>;
}

impl<T: FontMetricsProvider + ?Sized> FontMetricsProvider for Arc<T> {
    fn char_width(&self, ch: char) -> Result<f32, MetricsError> {
        (**self).char_width(ch)
    }
}

/// Read-through cache of normalized character widths.
///
/// A cache is meant to be created once per font and shared (usually behind an
/// [Arc]) by every document laid out with that font, including documents built
/// on other threads. Widths are filled lazily on a miss; two threads missing the
/// same character at once may both ask the provider, and the first stored value
/// wins. A width is only ever stored once fully computed.
pub struct GlyphMetricsCache {
    provider: Box<dyn FontMetricsProvider>,
    widths: RwLock<HashMap<char, f32>>,
}

impl GlyphMetricsCache {
    pub fn new<P: FontMetricsProvider + 'static>(provider: P) -> GlyphMetricsCache {
        GlyphMetricsCache {
            provider: Box::new(provider),
            widths: RwLock::new(HashMap::with_capacity(128)),
        }
    }

    /// The width of `ch` at a font size of 1pt. Provider failures are not
    /// cached and abort the layout.
    pub fn base_width(&self, ch: char) -> Result<f32, PDFError> {
        if let Some(width) = self
            .widths
            .read()
            .ok()
            .and_then(|widths| widths.get(&ch).copied())
        {
            return Ok(width);
        }

        log::trace!("measuring {ch:?}");
        let width = self
            .provider
            .char_width(ch)
            .map_err(|source| PDFError::Layout { ch, source })?;

        // a poisoned lock only costs us the memoization
        if let Ok(mut widths) = self.widths.write() {
            return Ok(*widths.entry(ch).or_insert(width));
        }
        Ok(width)
    }

    /// The width of `ch` when set in the font size of `text_type`
    pub fn width_of(&self, ch: char, text_type: TextType) -> Result<Pt, PDFError> {
        Ok(text_type.font_size() * self.base_width(ch)?)
    }

    /// The summed width of all characters of `text` set in `text_type`
    pub fn width_of_str(&self, text: &str, text_type: TextType) -> Result<Pt, PDFError> {
        text.chars()
            .map(|ch| self.width_of(ch, text_type))
            .sum::<Result<Pt, PDFError>>()
    }

    /// The number of characters measured so far
    pub fn len(&self) -> usize {
        self.widths.read().map(|w| w.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for GlyphMetricsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphMetricsCache")
            .field("cached", &self.len())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Every character is half an em wide, except `W` which is a full em
    pub(crate) struct HalfEm;

    impl FontMetricsProvider for HalfEm {
        fn char_width(&self, ch: char) -> Result<f32, MetricsError> {
            Ok(if ch == 'W' { 1.0 } else { 0.5 })
        }
    }

    pub(crate) fn half_em_cache() -> GlyphMetricsCache {
        GlyphMetricsCache::new(HalfEm)
    }

    struct Counting(Arc<AtomicUsize>);

    impl FontMetricsProvider for Counting {
        fn char_width(&self, _ch: char) -> Result<f32, MetricsError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(0.25)
        }
    }

    struct Broken;

    impl FontMetricsProvider for Broken {
        fn char_width(&self, ch: char) -> Result<f32, MetricsError> {
            Err(MetricsError::MissingGlyph(ch))
        }
    }

    #[test]
    fn widths_scale_with_font_size() {
        let cache = half_em_cache();
        assert_eq!(cache.width_of('a', TextType::Paragraph).unwrap(), Pt(6.0));
        assert_eq!(cache.width_of('a', TextType::Heading).unwrap(), Pt(8.0));
        assert_eq!(cache.width_of('W', TextType::Heading).unwrap(), Pt(16.0));
        assert_eq!(
            cache.width_of_str("abc", TextType::Paragraph).unwrap(),
            Pt(18.0)
        );
    }

    #[test]
    fn provider_is_asked_once_per_character() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = GlyphMetricsCache::new(Counting(calls.clone()));

        cache.width_of_str("abcabcabc", TextType::List).unwrap();
        cache.width_of_str("cab", TextType::Heading).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn provider_failure_is_fatal() {
        let cache = GlyphMetricsCache::new(Broken);
        let err = cache.width_of('x', TextType::Paragraph).unwrap_err();
        assert!(matches!(err, PDFError::Layout { ch: 'x', .. }));
        assert!(cache.is_empty());
    }

    #[test]
    fn shared_between_threads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = GlyphMetricsCache::new(Counting(calls.clone()));
        let text = lipsum::lipsum(50);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let width = cache.width_of_str(&text, TextType::Paragraph).unwrap();
                    assert_eq!(width, Pt(3.0) * text.chars().count() as f32);
                });
            }
        });

        let distinct = text
            .chars()
            .collect::<std::collections::HashSet<_>>()
            .len();
        assert_eq!(cache.len(), distinct);
        // racing threads may measure a character more than once, never less
        assert!(calls.load(Ordering::SeqCst) >= distinct);
    }
}
