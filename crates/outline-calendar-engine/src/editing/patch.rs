use chrono::NaiveTime;

use crate::models::{
    Completion, DATE_FORMAT, DayOfWeek, EventRecord, EventTiming, TIME_FORMAT, keys,
};
use crate::parsing::attributes::{AttrValue, InlineAttributes};

/// What a patch does to a line's checkbox.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CompletionEdit {
    /// Leave the existing checkbox (or its absence) exactly as it is.
    #[default]
    Keep,
    /// Write a checkbox with this state.
    Set(Completion),
    /// Turn the line into a plain bullet.
    Remove,
}

/// A partial event used to rewrite a list line.
///
/// `title` and `completed` are rendered positionally; every other field becomes
/// an inline tag. A field set to `None` is an explicit null and is not written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    /// Replacement title; `None` keeps the line's current title.
    pub title: Option<String>,
    pub completed: CompletionEdit,
    fields: Vec<(String, Option<AttrValue>)>,
}

impl EventPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_completion(mut self, completion: Completion) -> Self {
        self.completed = CompletionEdit::Set(completion);
        self
    }

    pub fn without_checkbox(mut self) -> Self {
        self.completed = CompletionEdit::Remove;
        self
    }

    /// Sets a field, replacing an earlier value for the same key in place.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.put(key.into(), Some(value.into()));
        self
    }

    /// Marks a field as explicitly null.
    pub fn clear(mut self, key: impl Into<String>) -> Self {
        self.put(key.into(), None);
        self
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_ref())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&AttrValue>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    fn put(&mut self, key: String, value: Option<AttrValue>) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    fn set_opt(self, key: &str, value: Option<String>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self.clear(key),
        }
    }

    /// The attributes a rewrite writes as tags: positional fields, `suppress`ed
    /// keys and nulls are dropped, and so is `allDay` when it is `false`.
    pub(crate) fn tag_attributes(&self, suppress: &[&str]) -> InlineAttributes {
        self.fields
            .iter()
            .filter(|(k, _)| k != keys::TITLE && k != keys::COMPLETED)
            .filter(|(k, _)| !suppress.contains(&k.as_str()))
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.as_str(), v)))
            .filter(|(k, v)| !(*k == keys::ALL_DAY && **v == AttrValue::Bool(false)))
            .map(|(k, v)| (k, v.clone()))
            .collect()
    }
}

fn format_time(time: Option<NaiveTime>) -> Option<String> {
    time.map(|t| t.format(TIME_FORMAT).to_string())
}

impl From<&EventRecord> for EventPatch {
    /// A patch that writes the whole record back: title, checkbox, schema
    /// fields in canonical order, then extras in their original order.
    fn from(record: &EventRecord) -> Self {
        let mut patch = EventPatch::new().with_title(record.title.clone());
        patch.completed = match &record.completed {
            Some(c) => CompletionEdit::Set(c.clone()),
            None => CompletionEdit::Remove,
        };

        patch = match &record.timing {
            EventTiming::Single {
                date,
                start_time,
                end_time,
            } => patch
                .set(keys::DATE, date.format(DATE_FORMAT).to_string())
                .set_opt(keys::START_TIME, format_time(*start_time))
                .set_opt(keys::END_TIME, format_time(*end_time)),
            EventTiming::Recurring {
                days_of_week,
                start_date,
                end_date,
                start_time,
                end_time,
            } => patch
                .set(keys::TYPE, "recurring")
                .set(keys::DAYS_OF_WEEK, DayOfWeek::format_list(days_of_week))
                .set_opt(
                    keys::START_DATE,
                    start_date.map(|d| d.format(DATE_FORMAT).to_string()),
                )
                .set_opt(
                    keys::END_DATE,
                    end_date.map(|d| d.format(DATE_FORMAT).to_string()),
                )
                .set_opt(keys::START_TIME, format_time(*start_time))
                .set_opt(keys::END_TIME, format_time(*end_time)),
        };

        patch = patch.set(keys::ALL_DAY, record.all_day);
        for (key, value) in record.extra.iter() {
            patch = patch.set(key, value.clone());
        }
        patch
    }
}
