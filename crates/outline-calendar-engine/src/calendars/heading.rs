use xi_rope::Rope;

use crate::editing::EventPatch;
use crate::models::LocatedEvent;
use crate::parsing::{
    DocumentIndex, InlineAttributes, Span, extract_all_events, list_items_under_heading,
};

use super::{Calendar, CalendarError, NoteDocument};

/// Events listed under one heading of a note, e.g. the `# Events` section of a
/// daily note.
#[derive(Debug, Clone)]
pub struct HeadingCalendar {
    note: NoteDocument,
    heading: String,
    color: Option<String>,
}

impl HeadingCalendar {
    pub(crate) fn new(note: NoteDocument, heading: String, color: Option<String>) -> Self {
        Self {
            note,
            heading,
            color,
        }
    }

    fn section_items(&self, rope: &Rope) -> Vec<Span> {
        list_items_under_heading(&self.heading, &DocumentIndex::build(rope))
    }
}

impl Calendar for HeadingCalendar {
    fn kind(&self) -> &'static str {
        "heading"
    }

    fn identifier(&self) -> String {
        format!("{}#{}", self.note.path(), self.heading)
    }

    fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    fn events(&self) -> Result<Vec<LocatedEvent>, CalendarError> {
        let rope = self.note.load()?;
        let spans = self.section_items(&rope);
        Ok(extract_all_events(&rope, &spans, &InlineAttributes::new()))
    }

    fn modify_event(
        &self,
        span: Span,
        patch: &EventPatch,
        suppress: &[&str],
    ) -> Result<bool, CalendarError> {
        self.note
            .rewrite_line(|rope| self.section_items(rope), span, patch, suppress)
    }
}
