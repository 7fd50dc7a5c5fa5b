use super::{Emphasis, FontFragment, GlyphMetricsCache, TextType};
use crate::units::Pt;
use crate::PDFError;

const TABSIZE: usize = 4;

/// One line produced by [wrap_text]
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    /// The line's text, without surrounding whitespace
    pub text: String,
    /// Character index of the line's first character within the wrapped text
    /// after tab expansion (newlines included)
    pub offset: usize,
}

/// Replace tabs with spaces; not every font carries a tab glyph
pub fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TABSIZE))
}

fn expanded_len(ch: char) -> usize {
    if ch == '\t' {
        TABSIZE
    } else {
        1
    }
}

/// Wraps `text` into lines no wider than the space between `x_start` and the
/// right margin of the page.
///
/// Explicit newlines always start a new line. Within a line, characters are
/// measured one by one; as soon as the measured width reaches the available
/// width the line is cut after the last space seen since the previous cut, or,
/// if the overflowing run contains no space at all, right before the
/// overflowing character. A cut always advances by at least one character, so
/// a glyph wider than the whole line ends up on a line of its own.
///
/// Every physical line ends with its remaining tail, so an empty `text` results
/// in a single empty line.
pub fn wrap_text(
    text: &str,
    x_start: Pt,
    text_type: TextType,
    page_width: Pt,
    margin_right: Pt,
    metrics: &GlyphMetricsCache,
) -> Result<Vec<WrappedLine>, PDFError> {
    let available = page_width - x_start - margin_right;
    let text = expand_tabs(text);

    let mut lines: Vec<WrappedLine> = Vec::new();
    let mut line_offset = 0usize;

    for physical in text.split('\n') {
        let chars: Vec<char> = physical.chars().collect();
        let mut width = Pt(0.0);
        let mut break_at = 0usize;
        let mut index = 0usize;

        while index < chars.len() {
            width += metrics.width_of(chars[index], text_type)?;
            if width < available {
                index += 1;
                continue;
            }

            // too long: chop it down to the last fitting word and continue
            let next = match chars[break_at..index].iter().rposition(|&ch| ch == ' ') {
                Some(space) => break_at + space + 1,
                None => index,
            }
            .max(break_at + 1);

            log::trace!("breaking line at {} (overflow at {index})", line_offset + next);
            push_trimmed(&mut lines, &chars[break_at..next], line_offset + break_at, false);

            width = Pt(0.0);
            break_at = next;
            index = next;
        }

        push_trimmed(&mut lines, &chars[break_at..], line_offset + break_at, true);
        line_offset += chars.len() + 1;
    }

    Ok(lines)
}

fn push_trimmed(lines: &mut Vec<WrappedLine>, chars: &[char], offset: usize, keep_empty: bool) {
    let leading = chars.iter().take_while(|ch| ch.is_whitespace()).count();
    let trailing = chars[leading..]
        .iter()
        .rev()
        .take_while(|ch| ch.is_whitespace())
        .count();
    let kept = &chars[leading..chars.len() - trailing];

    if kept.is_empty() && !keep_empty {
        return;
    }

    lines.push(WrappedLine {
        text: kept.iter().collect(),
        offset: offset + leading,
    });
}

/// Distributes the fragments describing `source` over the lines `source` was
/// wrapped into. The fragments of each returned line cover exactly that line's
/// characters; characters of `source` not covered by any fragment continue the
/// last fragment.
pub fn split_fragments(
    source: &str,
    fragments: &[FontFragment],
    lines: &[WrappedLine],
) -> Vec<Vec<FontFragment>> {
    // (start, end) of every fragment, in tab-expanded characters
    let mut runs: Vec<(usize, usize, FontFragment)> = Vec::with_capacity(fragments.len() + 1);
    let mut chars = source.chars();
    let mut position = 0usize;
    for fragment in fragments {
        let len: usize = chars
            .by_ref()
            .take(fragment.char_count)
            .map(expanded_len)
            .sum();
        runs.push((position, position + len, *fragment));
        position += len;
    }

    let rest: usize = chars.map(expanded_len).sum();
    if rest > 0 {
        match runs.last_mut() {
            Some(last) => last.1 += rest,
            None => runs.push((position, position + rest, Emphasis::PLAIN.fragment(0))),
        }
    }

    lines
        .iter()
        .map(|line| {
            let start = line.offset;
            let end = start + line.text.chars().count();

            let mut pieces: Vec<FontFragment> = runs
                .iter()
                .filter_map(|&(run_start, run_end, fragment)| {
                    let overlap = end.min(run_end).saturating_sub(start.max(run_start));
                    (overlap > 0).then_some(FontFragment {
                        char_count: overlap,
                        ..fragment
                    })
                })
                .collect();

            if pieces.is_empty() {
                let style = runs
                    .iter()
                    .find(|&&(run_start, run_end, _)| run_start <= start && start < run_end)
                    .or(runs.first())
                    .map(|&(_, _, fragment)| fragment)
                    .unwrap_or(Emphasis::PLAIN.fragment(0));
                pieces.push(FontFragment {
                    char_count: 0,
                    ..style
                });
            }

            pieces
        })
        .collect()
}
