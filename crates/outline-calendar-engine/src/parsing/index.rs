//! Headings and list-item spans of a document, the structure extraction reads.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use xi_rope::Rope;

use super::{
    headings::Heading,
    rope::{Span, lines_with_spans},
};

/// Structural index of one document text.
///
/// Like every span, the index is only valid for the text it was built from and
/// must be rebuilt after a write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentIndex {
    /// Headings in document order.
    pub headings: Vec<Heading>,
    /// One span per list item: the item's first line, from the start of the line
    /// (indentation included) to just before its line break.
    pub list_items: Vec<Span>,
    /// Length of the indexed text in bytes.
    pub text_len: usize,
}

/// Raw line spans (terminator included) paired with their content spans.
struct LineTable {
    lines: Vec<(Span, Span)>,
}

impl LineTable {
    fn new(rope: &Rope) -> Self {
        Self {
            lines: lines_with_spans(rope)
                .map(|lr| (lr.span, lr.content_span()))
                .collect(),
        }
    }

    /// Content span of the line containing byte `offset`.
    fn line_at(&self, offset: usize) -> Option<Span> {
        let idx = self
            .lines
            .partition_point(|(raw, _)| raw.start <= offset)
            .checked_sub(1)?;
        self.lines.get(idx).map(|(_, content)| *content)
    }
}

impl DocumentIndex {
    /// Indexes `rope` with pulldown-cmark. Headings and list markers inside code
    /// blocks are not structure and are ignored.
    pub fn build(rope: &Rope) -> Self {
        let text = rope.to_string();
        let table = LineTable::new(rope);

        let mut headings = Vec::new();
        let mut list_items = Vec::new();
        // (level, start offset, accumulated text)
        let mut open_heading: Option<(u8, usize, String)> = None;

        for (event, range) in Parser::new(&text).into_offset_iter() {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    open_heading = Some((level as u8, range.start, String::new()));
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, start, heading_text)) = open_heading.take()
                        && let Some(first) = table.line_at(start)
                        && let Some(last) = table.line_at(range.end.saturating_sub(1).max(start))
                    {
                        headings.push(Heading {
                            text: heading_text.trim().to_string(),
                            level,
                            span: Span::new(first.start, last.end.max(first.start)),
                        });
                    }
                }
                Event::Text(t) | Event::Code(t) => {
                    if let Some((_, _, heading_text)) = open_heading.as_mut() {
                        heading_text.push_str(&t);
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    if let Some((_, _, heading_text)) = open_heading.as_mut() {
                        heading_text.push(' ');
                    }
                }
                Event::Start(Tag::Item) => {
                    // `- - inner` opens two items on one line
                    if let Some(line) = table.line_at(range.start)
                        && list_items.last() != Some(&line)
                    {
                        list_items.push(line);
                    }
                }
                _ => {}
            }
        }

        Self {
            headings,
            list_items,
            text_len: text.len(),
        }
    }
}
