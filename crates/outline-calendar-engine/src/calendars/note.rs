use xi_rope::Rope;

use crate::editing::EventPatch;
use crate::models::LocatedEvent;
use crate::parsing::{DocumentIndex, InlineAttributes, Span, extract_all_events};

use super::{Calendar, CalendarError, NoteDocument};

/// Events from every list item of a note, regardless of headings.
#[derive(Debug, Clone)]
pub struct NoteCalendar {
    note: NoteDocument,
    color: Option<String>,
}

impl NoteCalendar {
    pub(crate) fn new(note: NoteDocument, color: Option<String>) -> Self {
        Self { note, color }
    }
}

fn all_items(rope: &Rope) -> Vec<Span> {
    DocumentIndex::build(rope).list_items
}

impl Calendar for NoteCalendar {
    fn kind(&self) -> &'static str {
        "note"
    }

    fn identifier(&self) -> String {
        self.note.path().to_string()
    }

    fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    fn events(&self) -> Result<Vec<LocatedEvent>, CalendarError> {
        let rope = self.note.load()?;
        Ok(extract_all_events(&rope, &all_items(&rope), &InlineAttributes::new()))
    }

    fn modify_event(
        &self,
        span: Span,
        patch: &EventPatch,
        suppress: &[&str],
    ) -> Result<bool, CalendarError> {
        self.note.rewrite_line(all_items, span, patch, suppress)
    }
}
