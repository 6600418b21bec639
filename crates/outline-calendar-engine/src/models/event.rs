use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

use crate::parsing::{attributes::InlineAttributes, rope::Span};

/// Attribute names of the fixed event schema.
pub mod keys {
    pub const TITLE: &str = "title";
    pub const COMPLETED: &str = "completed";
    pub const TYPE: &str = "type";
    pub const DATE: &str = "date";
    pub const START_DATE: &str = "startDate";
    pub const END_DATE: &str = "endDate";
    pub const START_TIME: &str = "startTime";
    pub const END_TIME: &str = "endTime";
    pub const ALL_DAY: &str = "allDay";
    pub const DAYS_OF_WEEK: &str = "daysOfWeek";

    /// Every key the schema interprets; anything else is carried as an extra.
    pub const SCHEMA: [&str; 10] = [
        TITLE,
        COMPLETED,
        TYPE,
        DATE,
        START_DATE,
        END_DATE,
        START_TIME,
        END_TIME,
        ALL_DAY,
        DAYS_OF_WEEK,
    ];
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Checklist state of an event line.
///
/// An event that is not a checklist line at all has no `Completion`
/// (`Option::None`), which is different from an unchecked box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// `[ ]`
    Todo,
    /// Checked, with the marker or completion string that was recorded.
    Done(String),
}

impl Completion {
    pub fn from_marker(marker: char) -> Self {
        if marker == ' ' {
            Completion::Todo
        } else {
            Completion::Done(marker.to_string())
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Completion::Done(_))
    }

    /// The character to write inside `[c]`. Single-character markers are kept,
    /// anything else is written as `x`.
    pub fn checkbox_marker(&self) -> char {
        match self {
            Completion::Todo => ' ',
            Completion::Done(marker) => {
                let mut chars = marker.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c != ' ' && c != ']' => c,
                    _ => 'x',
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Single-letter code: `U M T W R F S`.
    pub fn code(self) -> char {
        match self {
            DayOfWeek::Sunday => 'U',
            DayOfWeek::Monday => 'M',
            DayOfWeek::Tuesday => 'T',
            DayOfWeek::Wednesday => 'W',
            DayOfWeek::Thursday => 'R',
            DayOfWeek::Friday => 'F',
            DayOfWeek::Saturday => 'S',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }

    /// Parses a list of day codes such as `M,W,F`, `M W F` or `MWF`.
    ///
    /// Duplicates are dropped, first occurrence order is kept. Returns `None`
    /// for an unknown code or an empty list.
    pub fn parse_list(raw: &str) -> Option<Vec<DayOfWeek>> {
        let mut days = Vec::new();
        for code in raw.chars().filter(|c| *c != ',' && !c.is_whitespace()) {
            let day = Self::from_code(code)?;
            if !days.contains(&day) {
                days.push(day);
            }
        }
        (!days.is_empty()).then_some(days)
    }

    pub fn format_list(days: &[DayOfWeek]) -> String {
        days.iter()
            .map(|d| d.code().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn weekday(self) -> Weekday {
        match self {
            DayOfWeek::Sunday => Weekday::Sun,
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
        }
    }
}

/// When an event happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTiming {
    Single {
        date: NaiveDate,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
    },
    Recurring {
        days_of_week: Vec<DayOfWeek>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
    },
}

/// A calendar event read from, or destined for, one outline line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub title: String,
    pub completed: Option<Completion>,
    pub all_day: bool,
    pub timing: EventTiming,
    /// Attributes outside the fixed schema, kept in line order.
    pub extra: InlineAttributes,
}

impl EventRecord {
    /// The `type` discriminant: `single` or `recurring`.
    pub fn kind(&self) -> &'static str {
        match self.timing {
            EventTiming::Single { .. } => "single",
            EventTiming::Recurring { .. } => "recurring",
        }
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        match &self.timing {
            EventTiming::Single { start_time, .. } | EventTiming::Recurring { start_time, .. } => {
                *start_time
            }
        }
    }

    pub fn end_time(&self) -> Option<NaiveTime> {
        match &self.timing {
            EventTiming::Single { end_time, .. } | EventTiming::Recurring { end_time, .. } => {
                *end_time
            }
        }
    }

    /// Whether the event falls on `day`. Recurring events honour their optional
    /// start and end dates, both inclusive.
    pub fn occurs_on(&self, day: NaiveDate) -> bool {
        match &self.timing {
            EventTiming::Single { date, .. } => *date == day,
            EventTiming::Recurring {
                days_of_week,
                start_date,
                end_date,
                ..
            } => {
                start_date.is_none_or(|start| start <= day)
                    && end_date.is_none_or(|end| day <= end)
                    && days_of_week.iter().any(|d| d.weekday() == day.weekday())
            }
        }
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(completion) = &self.completed {
            write!(f, "[{}] ", completion.checkbox_marker())?;
        }
        match &self.timing {
            EventTiming::Single { date, .. } => write!(f, "{}", date.format(DATE_FORMAT))?,
            EventTiming::Recurring { days_of_week, .. } => {
                write!(f, "every {}", DayOfWeek::format_list(days_of_week))?
            }
        }
        if !self.all_day
            && let Some(start) = self.start_time()
        {
            write!(f, " {}", start.format(TIME_FORMAT))?;
            if let Some(end) = self.end_time() {
                write!(f, "-{}", end.format(TIME_FORMAT))?;
            }
        }
        write!(f, " {}", self.title)
    }
}

/// An extracted event together with the span of the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedEvent {
    pub event: EventRecord,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, TIME_FORMAT).unwrap()
    }

    #[rstest]
    #[case("MWF", vec![DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Friday])]
    #[case("M, W ,F", vec![DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Friday])]
    #[case("U,S,U", vec![DayOfWeek::Sunday, DayOfWeek::Saturday])]
    #[case("R", vec![DayOfWeek::Thursday])]
    fn parses_day_lists(#[case] raw: &str, #[case] expected: Vec<DayOfWeek>) {
        assert_eq!(DayOfWeek::parse_list(raw), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case(" , ")]
    #[case("Monday")]
    #[case("mwf")]
    fn rejects_bad_day_lists(#[case] raw: &str) {
        assert_eq!(DayOfWeek::parse_list(raw), None);
    }

    #[test]
    fn day_list_formats_with_commas() {
        let days = DayOfWeek::parse_list("TRS").unwrap();
        assert_eq!(DayOfWeek::format_list(&days), "T,R,S");
    }

    #[rstest]
    #[case(Completion::Todo, ' ')]
    #[case(Completion::Done("x".into()), 'x')]
    #[case(Completion::Done("-".into()), '-')]
    #[case(Completion::Done("2024-01-01".into()), 'x')]
    #[case(Completion::Done(String::new()), 'x')]
    fn checkbox_markers(#[case] completion: Completion, #[case] marker: char) {
        assert_eq!(completion.checkbox_marker(), marker);
    }

    #[test]
    fn recurring_occurrence_respects_bounds() {
        let event = EventRecord {
            title: "Gym".into(),
            completed: None,
            all_day: false,
            timing: EventTiming::Recurring {
                days_of_week: vec![DayOfWeek::Monday],
                start_date: Some(date("2024-01-08")),
                end_date: Some(date("2024-01-22")),
                start_time: Some(time("18:00")),
                end_time: None,
            },
            extra: InlineAttributes::new(),
        };
        // 2024-01-01 and 2024-01-29 are Mondays outside the range.
        assert!(!event.occurs_on(date("2024-01-01")));
        assert!(event.occurs_on(date("2024-01-08")));
        assert!(!event.occurs_on(date("2024-01-09")));
        assert!(event.occurs_on(date("2024-01-22")));
        assert!(!event.occurs_on(date("2024-01-29")));
    }

    #[test]
    fn display_single_timed_event() {
        let event = EventRecord {
            title: "Dentist".into(),
            completed: Some(Completion::Todo),
            all_day: false,
            timing: EventTiming::Single {
                date: date("2024-03-05"),
                start_time: Some(time("09:30")),
                end_time: Some(time("10:00")),
            },
            extra: InlineAttributes::new(),
        };
        assert_eq!(event.to_string(), "[ ] 2024-03-05 09:30-10:00 Dentist");
        assert_eq!(event.kind(), "single");
    }
}
