use xi_rope::Rope;

use super::span::Span;

/// A piece of document text together with the span it was sliced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// Byte span of the text in the rope.
    pub span: Span,
    /// The sliced text.
    pub text: String,
}

impl LineRef {
    /// Span of the line without its trailing `\n` / `\r\n`.
    pub fn content_span(&self) -> Span {
        let content = self.text.trim_end_matches(['\r', '\n']);
        Span::new(self.span.start, self.span.start + content.len())
    }
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` to preserve newline characters so consecutive spans tile the
/// whole rope without gaps.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).map(move |line| {
        let start = offset;
        let len = line.len();
        offset += len;
        LineRef {
            span: Span { start, end: offset },
            text: line.into_owned(),
        }
    })
}
