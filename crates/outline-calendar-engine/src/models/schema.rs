//! Validation of merged line fields into an [`EventRecord`].

use chrono::{NaiveDate, NaiveTime};

use crate::parsing::attributes::{AttrValue, InlineAttributes};

use super::event::{
    Completion, DATE_FORMAT, DayOfWeek, EventRecord, EventTiming, TIME_FORMAT, keys,
};

/// Why a set of fields is not an event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    Missing(&'static str),
    #[error("field `{field}` is not a valid {expected}: {value:?}")]
    Invalid {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("unknown event type {0:?}")]
    UnknownType(String),
    #[error("title is empty")]
    EmptyTitle,
    #[error("event is not all-day but has no `startTime`")]
    MissingStartTime,
}

impl EventRecord {
    /// Builds a record from merged fields, keeping unknown keys as extras.
    ///
    /// `type` defaults to `recurring` when `daysOfWeek` is present and to
    /// `single` otherwise. `allDay` defaults to "has no start time".
    pub fn from_fields(fields: InlineAttributes) -> Result<Self, ValidationError> {
        let title = required_text(&fields, keys::TITLE)?.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let completed = match fields.get(keys::COMPLETED) {
            None => None,
            Some(AttrValue::Bool(false)) => Some(Completion::Todo),
            Some(AttrValue::Bool(true)) => Some(Completion::Done("x".to_string())),
            Some(AttrValue::Text(s)) => Some(Completion::Done(s.clone())),
        };

        let start_time = optional(&fields, keys::START_TIME, "time", parse_time)?;
        let end_time = optional(&fields, keys::END_TIME, "time", parse_time)?;

        let all_day = match fields.get(keys::ALL_DAY) {
            None => start_time.is_none(),
            Some(AttrValue::Bool(b)) => *b,
            Some(other) => return Err(invalid(keys::ALL_DAY, "boolean", other)),
        };
        if !all_day && start_time.is_none() {
            return Err(ValidationError::MissingStartTime);
        }

        let kind = match fields.get(keys::TYPE) {
            None if fields.contains_key(keys::DAYS_OF_WEEK) => "recurring",
            None => "single",
            Some(AttrValue::Text(t)) => t.as_str(),
            Some(other) => return Err(ValidationError::UnknownType(other.to_string())),
        };

        let timing = match kind {
            "single" => EventTiming::Single {
                date: optional(&fields, keys::DATE, "date", parse_date)?
                    .ok_or(ValidationError::Missing(keys::DATE))?,
                start_time,
                end_time,
            },
            "recurring" => EventTiming::Recurring {
                days_of_week: optional(&fields, keys::DAYS_OF_WEEK, "day list", DayOfWeek::parse_list)?
                    .ok_or(ValidationError::Missing(keys::DAYS_OF_WEEK))?,
                start_date: optional(&fields, keys::START_DATE, "date", parse_date)?,
                end_date: optional(&fields, keys::END_DATE, "date", parse_date)?,
                start_time,
                end_time,
            },
            other => return Err(ValidationError::UnknownType(other.to_string())),
        };

        let extra = fields
            .into_iter()
            .filter(|(k, _)| !keys::SCHEMA.contains(&k.as_str()))
            .collect();

        Ok(EventRecord {
            title,
            completed,
            all_day,
            timing,
            extra,
        })
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Accepts `HH:MM` and `HH:MM:SS`.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

fn invalid(field: &'static str, expected: &'static str, value: &AttrValue) -> ValidationError {
    ValidationError::Invalid {
        field,
        expected,
        value: value.to_string(),
    }
}

fn required_text<'a>(
    fields: &'a InlineAttributes,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match fields.get(field) {
        None => Err(ValidationError::Missing(field)),
        Some(AttrValue::Text(s)) => Ok(s),
        Some(other) => Err(invalid(field, "string", other)),
    }
}

/// Parses an optional text field; present-but-unparseable is an error.
fn optional<T>(
    fields: &InlineAttributes,
    field: &'static str,
    expected: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, ValidationError> {
    match fields.get(field) {
        None => Ok(None),
        Some(value @ AttrValue::Bool(_)) => Err(invalid(field, expected, value)),
        Some(value @ AttrValue::Text(s)) => parse(s)
            .map(Some)
            .ok_or_else(|| invalid(field, expected, value)),
    }
}
