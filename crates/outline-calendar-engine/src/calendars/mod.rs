//! Calendar sources backed by notes.
//!
//! A calendar is a view over one note that turns some of its list items into
//! events. [`CalendarSource`] is the serializable description stored in the
//! config file; [`CalendarSource::open`] binds it to a notes root.

mod heading;
mod note;

pub use heading::HeadingCalendar;
pub use note::NoteCalendar;

use std::path::{Path, PathBuf};

use relative_path::{RelativePath, RelativePathBuf};
use serde::{Deserialize, Serialize};
use xi_rope::Rope;

use crate::editing::{EventPatch, RewriteError, rewrite_list_item};
use crate::io::{IoError, read_file, write_file};
use crate::models::LocatedEvent;
use crate::parsing::Span;

/// Joins a calendar's kind and identifier into its id.
pub const ID_SEPARATOR: &str = "::";

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}

pub trait Calendar {
    /// Short name of the source kind, e.g. `heading`.
    fn kind(&self) -> &'static str;

    /// Identifies this calendar among calendars of the same kind.
    fn identifier(&self) -> String;

    fn id(&self) -> String {
        format!("{}{}{}", self.kind(), ID_SEPARATOR, self.identifier())
    }

    fn color(&self) -> Option<&str>;

    /// Reads the backing note and returns its events in document order.
    fn events(&self) -> Result<Vec<LocatedEvent>, CalendarError>;

    /// Rewrites the event line at `span` from `patch`, dropping `suppress`ed
    /// keys from the written tags.
    ///
    /// Returns `Ok(false)` without touching the note when `span` is not one of
    /// this calendar's list items in the current text.
    fn modify_event(
        &self,
        span: Span,
        patch: &EventPatch,
        suppress: &[&str],
    ) -> Result<bool, CalendarError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CalendarSource {
    /// List items under one heading of a note.
    Heading {
        path: RelativePathBuf,
        heading: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    /// Every list item of a note.
    Note {
        path: RelativePathBuf,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
}

impl CalendarSource {
    pub fn open(&self, notes_root: &Path) -> Box<dyn Calendar> {
        match self {
            CalendarSource::Heading {
                path,
                heading,
                color,
            } => Box::new(HeadingCalendar::new(
                NoteDocument::new(path.clone(), notes_root),
                heading.clone(),
                color.clone(),
            )),
            CalendarSource::Note { path, color } => Box::new(NoteCalendar::new(
                NoteDocument::new(path.clone(), notes_root),
                color.clone(),
            )),
        }
    }
}

/// One note on disk, read and written whole.
#[derive(Debug, Clone)]
pub(crate) struct NoteDocument {
    path: RelativePathBuf,
    notes_root: PathBuf,
}

impl NoteDocument {
    pub(crate) fn new(path: RelativePathBuf, notes_root: &Path) -> Self {
        Self {
            path,
            notes_root: notes_root.to_path_buf(),
        }
    }

    pub(crate) fn path(&self) -> &RelativePath {
        &self.path
    }

    pub(crate) fn load(&self) -> Result<Rope, CalendarError> {
        Ok(Rope::from(read_file(&self.path, &self.notes_root)?))
    }

    /// Read-rewrite-write of a single line. `candidates` lists the spans the
    /// caller accepts as event lines in the freshly read text.
    pub(crate) fn rewrite_line(
        &self,
        candidates: impl FnOnce(&Rope) -> Vec<Span>,
        span: Span,
        patch: &EventPatch,
        suppress: &[&str],
    ) -> Result<bool, CalendarError> {
        let rope = self.load()?;
        if !candidates(&rope).contains(&span) {
            log::warn!(
                "No list item at {}..{} in {}, not modifying",
                span.start,
                span.end,
                self.path
            );
            return Ok(false);
        }

        let Some(new_text) = rewrite_list_item(&rope, span, patch, suppress)? else {
            return Ok(false);
        };
        write_file(&self.path, &self.notes_root, &new_text.to_string())?;
        log::info!("Updated event at {}..{} in {}", span.start, span.end, self.path);
        Ok(true)
    }
}
