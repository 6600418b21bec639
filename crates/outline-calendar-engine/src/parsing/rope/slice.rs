use xi_rope::Rope;

use super::{lines::LineRef, span::Span};

/// Extracts the text for a span from the rope as an owned String.
///
/// This allocates; prefer working with spans where possible.
pub fn slice_to_string(rope: &Rope, sp: Span) -> String {
    rope.slice_to_cow(sp.range()).into_owned()
}

/// Materializes the text of every span, one result per span in input order.
///
/// Duplicate and overlapping spans are kept as given. Every span must lie within
/// the rope; out-of-range offsets are a caller error.
pub fn extract_spans(rope: &Rope, spans: &[Span]) -> Vec<LineRef> {
    spans
        .iter()
        .map(|&span| LineRef {
            span,
            text: slice_to_string(rope, span),
        })
        .collect()
}

/// Extracts text for a span, truncating to `max` bytes with "..." suffix if needed.
///
/// Used for human-readable log output.
pub fn preview(rope: &Rope, sp: Span, max: usize) -> String {
    let mut s = slice_to_string(rope, sp);
    if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s
}
