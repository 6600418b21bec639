//! # Outline Parsing
//!
//! Reads calendar events out of plain outline text.
//!
//! ## Pipeline
//!
//! 1. **Index** (`index`): headings and list-item spans of a document
//! 2. **Section filter** (`headings`): the list items owned by one heading
//! 3. **Slice** (`rope`): materialize the text of each candidate span
//! 4. **Extract** (`events`): inline tags + checklist syntax, validated into
//!    [`EventRecord`](crate::models::EventRecord)s paired with their spans
//!
//! ## Modules
//!
//! - **`rope`**: `Span`, line iteration and span slicing over an `xi_rope::Rope`
//! - **`attributes`**: `[name:: value]` tag parsing and generation
//! - **`checklist`**: bullet / checkbox recognition and title stripping
//! - **`headings`**: heading-owned ranges and span containment
//! - **`index`**: pulldown-cmark based `DocumentIndex`
//! - **`events`**: `extract_event()` and `extract_all_events()`
//!
//! Every operation is a pure function of its input text and spans. Spans go
//! stale when the text is rewritten, so indexes are rebuilt per read.

pub mod attributes;
pub mod checklist;
pub mod events;
pub mod headings;
pub mod index;
pub mod rope;

pub use attributes::{
    AttrValue, AttributeError, InlineAttributes, generate_inline_attributes,
    parse_inline_attributes,
};
pub use checklist::{ListLine, completion_marker, is_checklist_line, strip_bullet_and_attributes};
pub use events::{extract_all_events, extract_event};
pub use headings::{Heading, filter_spans_within_range, list_items_under_heading, resolve_heading_range};
pub use index::DocumentIndex;
pub use rope::{LineRef, Span, extract_spans};
