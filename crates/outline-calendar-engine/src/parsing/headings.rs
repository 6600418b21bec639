use super::{index::DocumentIndex, rope::Span};

/// A heading as reported by the document index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading text without the `#` markers.
    pub text: String,
    /// Outline depth, 1 = top.
    pub level: u8,
    /// Span of the heading line(s), without the trailing line break.
    pub span: Span,
}

/// Computes the range of text owned by the first heading whose text equals
/// `heading_text`.
///
/// The range starts at the end of the heading itself and stops at the start of
/// the next heading of the same or a higher level; deeper headings stay inside
/// the section. A heading with no such successor owns the rest of the document
/// up to `text_len`. Returns `None` when no heading matches.
pub fn resolve_heading_range(heading_text: &str, headings: &[Heading], text_len: usize) -> Option<Span> {
    let idx = headings.iter().position(|h| h.text == heading_text)?;
    let opening = &headings[idx];
    let end = headings[idx + 1..]
        .iter()
        .find(|h| h.level <= opening.level)
        .map_or(text_len, |h| h.span.start);
    Some(Span::new(opening.span.end, end))
}

/// Keeps the spans that start strictly after `range.start` and end no later
/// than `range.end`, in their original order.
pub fn filter_spans_within_range(range: Span, spans: &[Span]) -> Vec<Span> {
    spans.iter().copied().filter(|s| range.encloses(*s)).collect()
}

/// List items of the section under `heading_text`, or nothing if the heading
/// does not exist.
pub fn list_items_under_heading(heading_text: &str, index: &DocumentIndex) -> Vec<Span> {
    match resolve_heading_range(heading_text, &index.headings, index.text_len) {
        Some(range) => filter_spans_within_range(range, &index.list_items),
        None => Vec::new(),
    }
}
