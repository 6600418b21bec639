use xi_rope::Rope;

use crate::models::{Completion, EventRecord, LocatedEvent, keys};

use super::{
    attributes::{AttrValue, InlineAttributes, parse_inline_attributes},
    checklist::{completion_marker, strip_bullet_and_attributes},
    rope::{Span, extract_spans},
};

/// Turns one outline line into an event.
///
/// Fields are merged in three layers, later layers winning: what the line's
/// syntax implies (`title`, and `completed` for checklist lines), then
/// `inherited` defaults from the enclosing document or section, then the
/// line's own inline tags.
///
/// A line without any inline tag is never an event. Lines whose merged fields
/// do not validate are skipped silently; ordinary notes with incidental
/// brackets are not errors.
pub fn extract_event(line: &str, inherited: &InlineAttributes) -> Option<EventRecord> {
    let attrs = parse_inline_attributes(line);
    if attrs.is_empty() {
        return None;
    }

    let mut fields = InlineAttributes::new();
    fields.insert(keys::TITLE, strip_bullet_and_attributes(line));
    match completion_marker(line) {
        Some(Completion::Todo) => {
            fields.insert(keys::COMPLETED, false);
        }
        Some(Completion::Done(marker)) => {
            fields.insert(keys::COMPLETED, AttrValue::Text(marker));
        }
        None => {}
    }
    fields.extend(inherited.clone());
    fields.extend(attrs);

    match EventRecord::from_fields(fields) {
        Ok(event) => Some(event),
        Err(err) => {
            log::debug!("Skipping line {line:?}: {err}");
            None
        }
    }
}

/// Extracts events from every candidate span, keeping only the lines that are
/// events, each paired with its original span, in input order.
pub fn extract_all_events(
    rope: &Rope,
    spans: &[Span],
    inherited: &InlineAttributes,
) -> Vec<LocatedEvent> {
    extract_spans(rope, spans)
        .into_iter()
        .filter_map(|line| {
            extract_event(&line.text, inherited).map(|event| LocatedEvent {
                event,
                span: line.span,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventTiming, parse_date, parse_time};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn no_defaults() -> InlineAttributes {
        InlineAttributes::new()
    }

    #[rstest]
    #[case("- Buy milk")]
    #[case("- [ ] Buy milk")]
    #[case("- [x] Done thing: with colon")]
    #[case("Paragraph text")]
    #[case("")]
    fn lines_without_tags_are_not_events(#[case] line: &str) {
        let defaults: InlineAttributes = [("date", "2024-01-01")].into_iter().collect();
        assert_eq!(extract_event(line, &defaults), None);
        assert_eq!(extract_event(line, &no_defaults()), None);
    }

    #[test]
    fn unchecked_checklist_event() {
        let event = extract_event("- [ ] Buy milk [date:: 2024-01-01]", &no_defaults()).unwrap();
        assert_eq!(event.title, "Buy milk");
        assert_eq!(event.completed, Some(Completion::Todo));
        assert!(event.all_day);
        assert_eq!(
            event.timing,
            EventTiming::Single {
                date: parse_date("2024-01-01").unwrap(),
                start_time: None,
                end_time: None,
            }
        );
    }

    #[test]
    fn checked_marker_is_kept() {
        let event = extract_event("- [x] Task [date:: 2024-01-01]", &no_defaults()).unwrap();
        assert_eq!(event.completed, Some(Completion::Done("x".into())));
    }

    #[test]
    fn plain_bullet_has_no_completion() {
        let event = extract_event("- Meeting [date:: 2024-01-01] [startTime:: 10:00]", &no_defaults())
            .unwrap();
        assert_eq!(event.completed, None);
        assert_eq!(event.start_time(), parse_time("10:00"));
        assert!(!event.all_day);
    }

    #[test]
    fn line_tags_override_inherited_defaults() {
        let defaults: InlineAttributes = [("date", "2024-01-01"), ("calendar", "work")]
            .into_iter()
            .collect();
        let event = extract_event("- Review [date:: 2024-02-02]", &defaults).unwrap();
        assert_eq!(
            event.timing,
            EventTiming::Single {
                date: parse_date("2024-02-02").unwrap(),
                start_time: None,
                end_time: None,
            }
        );
        assert_eq!(event.extra.get("calendar"), Some(&AttrValue::from("work")));
    }

    #[test]
    fn inherited_defaults_fill_missing_fields() {
        let defaults: InlineAttributes = [("date", "2024-01-01")].into_iter().collect();
        let event = extract_event("- Lunch [room:: 4]", &defaults).unwrap();
        assert_eq!(event.kind(), "single");
        assert_eq!(event.extra.get("room"), Some(&AttrValue::from("4")));
    }

    #[test]
    fn completed_tag_overrides_checkbox() {
        let event = extract_event(
            "- [ ] Filed [date:: 2024-01-01] [completed:: 2024-01-03]",
            &no_defaults(),
        )
        .unwrap();
        assert_eq!(event.completed, Some(Completion::Done("2024-01-03".into())));
    }

    #[rstest]
    #[case("- [date:: 2024-01-01]")]
    #[case("- [ ]  [date:: 2024-01-01]")]
    #[case("- Something [foo:: bar]")]
    #[case("- Bad date [date:: someday]")]
    #[case("- Weekly [type:: recurring]")]
    fn invalid_events_are_skipped(#[case] line: &str) {
        assert_eq!(extract_event(line, &no_defaults()), None);
    }

    #[test]
    fn recurring_event_line() {
        let event = extract_event(
            "- Standup [daysOfWeek:: M,T,W,R,F] [startTime:: 09:00] [endTime:: 09:15]",
            &no_defaults(),
        )
        .unwrap();
        assert_eq!(event.kind(), "recurring");
        assert_eq!(event.to_string(), "every M,T,W,R,F 09:00-09:15 Standup");
    }

    #[test]
    fn extract_all_keeps_only_events_with_their_spans() {
        let md = "- one [date:: 2024-01-01]\n- not an event\n- [x] two [date:: 2024-01-02]";
        let rope = Rope::from(md);
        let spans = [Span::new(0, 25), Span::new(26, 40), Span::new(41, md.len())];
        let events = extract_all_events(&rope, &spans, &no_defaults());

        let summary: Vec<_> = events
            .iter()
            .map(|e| (e.event.title.as_str(), e.span))
            .collect();
        assert_eq!(summary, vec![("one", spans[0]), ("two", spans[2])]);
    }

    #[test]
    fn extract_all_preserves_input_order() {
        let md = "- a [date:: 2024-01-01]\n- b [date:: 2024-01-02]";
        let rope = Rope::from(md);
        let spans = [Span::new(24, md.len()), Span::new(0, 23)];
        let titles: Vec<_> = extract_all_events(&rope, &spans, &no_defaults())
            .into_iter()
            .map(|e| e.event.title)
            .collect();
        assert_eq!(titles, vec!["b", "a"]);
    }
}
