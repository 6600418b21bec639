pub mod calendars;
pub mod editing;
pub mod io;
pub mod models;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use calendars::{Calendar, CalendarError, CalendarSource};
pub use editing::{CompletionEdit, EventPatch, RewriteError, rewrite_list_item};
pub use io::*;
pub use models::{Completion, DayOfWeek, EventRecord, EventTiming, LocatedEvent};
pub use parsing::{
    DocumentIndex, InlineAttributes, Span, extract_all_events, extract_event,
    generate_inline_attributes, parse_inline_attributes,
};
