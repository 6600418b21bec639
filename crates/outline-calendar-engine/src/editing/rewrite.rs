use xi_rope::Rope;

use crate::parsing::{
    attributes::{AttributeError, generate_inline_attributes},
    checklist::{ListLine, strip_bullet_and_attributes},
    rope::{Span, preview, slice_to_string},
};

use super::patch::{CompletionEdit, EventPatch};

#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error(transparent)]
    Attribute(#[from] AttributeError),
    #[error("title {0:?} cannot be written on a single list line")]
    InvalidTitle(String),
}

/// Rewrites the list line at `span` from `patch` and returns the whole new text.
///
/// The line keeps its indentation and, unless the patch says otherwise, its
/// title and checkbox. Its inline tags are replaced by the patch's fields minus
/// the `suppress`ed keys. Nothing outside `span` changes.
///
/// Returns `Ok(None)` and logs a warning when `span` does not address a `-`
/// bulleted line, which is what a position computed against an older version
/// of the text looks like. Callers should re-index and retry rather than treat
/// it as fatal.
pub fn rewrite_list_item(
    rope: &Rope,
    span: Span,
    patch: &EventPatch,
    suppress: &[&str],
) -> Result<Option<Rope>, RewriteError> {
    let line = slice_to_string(rope, span);
    let Some(list_line) = ListLine::parse(&line) else {
        log::warn!(
            "Tried modifying a list item at {}..{} that isn't a list item: {:?}",
            span.start,
            span.end,
            preview(rope, span, 60)
        );
        return Ok(None);
    };

    let old_title = strip_bullet_and_attributes(&line);
    let title = match patch.title.as_deref().map(str::trim) {
        Some(new_title) if !new_title.is_empty() => new_title,
        _ => old_title.as_str(),
    };

    let checkbox = match &patch.completed {
        CompletionEdit::Keep => list_line.checkbox,
        CompletionEdit::Set(completion) => Some(completion.checkbox_marker()),
        CompletionEdit::Remove => None,
    };
    let tags = generate_inline_attributes(&patch.tag_attributes(suppress))?;

    let mut new_line = format!("{}- ", list_line.indent);
    if let Some(marker) = checkbox {
        new_line.push('[');
        new_line.push(marker);
        new_line.push_str("] ");
    }
    new_line.push_str(title);
    check_title(&new_line, title)?;
    if !tags.is_empty() {
        new_line.push(' ');
        new_line.push_str(&tags);
    }

    Ok(Some(replace_at_span(rope, span, &new_line)))
}

/// Returns a copy of `rope` with `span` replaced by `replacement`.
pub fn replace_at_span(rope: &Rope, span: Span, replacement: &str) -> Rope {
    let mut out = rope.clone();
    out.edit(span.range(), replacement);
    out
}

/// A title must read back as itself from the line written so far: one line,
/// no tags, and no checkbox-like prefix unless a real checkbox precedes it.
fn check_title(line: &str, title: &str) -> Result<(), RewriteError> {
    if title.contains(['\n', '\r']) || strip_bullet_and_attributes(line) != title {
        return Err(RewriteError::InvalidTitle(title.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Completion;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// Rewrites the only line of `line` and returns the new text.
    fn rewrite_line(line: &str, patch: &EventPatch) -> String {
        let rope = Rope::from(line);
        rewrite_list_item(&rope, Span::new(0, line.len()), patch, &[])
            .unwrap()
            .unwrap()
            .to_string()
    }

    #[test]
    fn keeps_checked_marker_when_completion_omitted() {
        let patch = EventPatch::new().set("date", "2024-01-02");
        assert_eq!(
            rewrite_line("- [x] Task [date:: 2024-01-01]", &patch),
            "- [x] Task [date:: 2024-01-02]"
        );
    }

    #[test]
    fn keeps_plain_bullet_when_completion_omitted() {
        let patch = EventPatch::new().set("date", "2024-01-02");
        assert_eq!(
            rewrite_line("- Task [date:: 2024-01-01]", &patch),
            "- Task [date:: 2024-01-02]"
        );
    }

    #[rstest]
    #[case(Completion::Todo, "- [ ] Task [date:: 2024-01-01]")]
    #[case(Completion::Done("x".into()), "- [x] Task [date:: 2024-01-01]")]
    #[case(Completion::Done("-".into()), "- [-] Task [date:: 2024-01-01]")]
    #[case(Completion::Done("2024-01-03".into()), "- [x] Task [date:: 2024-01-01]")]
    fn sets_checkbox(#[case] completion: Completion, #[case] expected: &str) {
        let patch = EventPatch::new()
            .with_completion(completion)
            .set("date", "2024-01-01");
        assert_eq!(rewrite_line("- Task [date:: 2024-01-01]", &patch), expected);
    }

    #[test]
    fn removes_checkbox_on_request() {
        let patch = EventPatch::new().without_checkbox().set("date", "2024-01-01");
        assert_eq!(
            rewrite_line("- [ ] Task [date:: 2024-01-01]", &patch),
            "- Task [date:: 2024-01-01]"
        );
    }

    #[test]
    fn preserves_indentation_and_replaces_title() {
        let patch = EventPatch::new().with_title("Renamed").set("date", "2024-05-01");
        assert_eq!(
            rewrite_line("\t  - [ ] Old [date:: 2024-01-01]", &patch),
            "\t  - [ ] Renamed [date:: 2024-05-01]"
        );
    }

    #[test]
    fn blank_title_falls_back_to_old_title() {
        let patch = EventPatch::new().with_title("   ").set("date", "2024-05-01");
        assert_eq!(
            rewrite_line("- Old [date:: 2024-01-01]", &patch),
            "- Old [date:: 2024-05-01]"
        );
    }

    #[test]
    fn old_tags_are_replaced_by_patch_fields() {
        let patch = EventPatch::new()
            .set("date", "2024-01-01")
            .set("allDay", false)
            .set("startTime", "10:00")
            .clear("endTime")
            .set("calendar", "work");
        let rope = Rope::from("- Sync [date:: 2023-12-31] [endTime:: 11:00]");
        let out = rewrite_list_item(&rope, Span::new(0, rope.len()), &patch, &["calendar"])
            .unwrap()
            .unwrap();
        assert_eq!(
            out.to_string(),
            "- Sync [date:: 2024-01-01]  [startTime:: 10:00]"
        );
    }

    #[test]
    fn empty_patch_leaves_bare_line() {
        assert_eq!(rewrite_line("- [x] Task [date:: 2024-01-01]", &EventPatch::new()), "- [x] Task");
    }

    #[test]
    fn splices_only_the_addressed_line() {
        let md = "# Events\n- one [date:: 2024-01-01]\n- two [date:: 2024-01-02]\n";
        let rope = Rope::from(md);
        let span = Span::new(9, 34);
        assert_eq!(slice_to_string(&rope, span), "- one [date:: 2024-01-01]");

        let patch = EventPatch::new().with_title("uno").set("date", "2024-02-01");
        let out = rewrite_list_item(&rope, span, &patch, &[]).unwrap().unwrap();
        assert_eq!(
            out.to_string(),
            "# Events\n- uno [date:: 2024-02-01]\n- two [date:: 2024-01-02]\n"
        );
    }

    #[test]
    fn non_list_line_is_left_alone() {
        let md = "Not a list item\n- keep [date:: 2024-01-01]";
        let rope = Rope::from(md);
        let patch = EventPatch::new().set("date", "2024-02-01");
        let out = rewrite_list_item(&rope, Span::new(0, 15), &patch, &[]).unwrap();
        assert!(out.is_none());
        assert_eq!(rope.to_string(), md);
    }

    #[rstest]
    #[case("two\nlines")]
    #[case("has [tag:: inside]")]
    #[case("[x] looks checked")]
    fn rejects_titles_that_would_not_read_back(#[case] title: &str) {
        let rope = Rope::from("- Task");
        let patch = EventPatch::new().with_title(title);
        assert!(matches!(
            rewrite_list_item(&rope, Span::new(0, 6), &patch, &[]),
            Err(RewriteError::InvalidTitle(_))
        ));
    }

    #[test]
    fn bracketed_title_after_checkbox_can_be_rewritten() {
        let patch = EventPatch::new().set("date", "2024-01-02");
        assert_eq!(
            rewrite_line("- [x] [ ] sub [date:: 2024-01-01]", &patch),
            "- [x] [ ] sub [date:: 2024-01-02]"
        );
    }

    #[test]
    fn bracketed_title_cannot_lose_its_checkbox() {
        let rope = Rope::from("- [x] [ ] sub [date:: 2024-01-01]");
        let patch = EventPatch::new().without_checkbox().set("date", "2024-01-01");
        assert!(matches!(
            rewrite_list_item(&rope, Span::new(0, rope.len()), &patch, &[]),
            Err(RewriteError::InvalidTitle(title)) if title == "[ ] sub"
        ));
    }

    #[test]
    fn rejects_unrepresentable_values() {
        let rope = Rope::from("- Task");
        let patch = EventPatch::new().set("note", "a ] b");
        assert!(matches!(
            rewrite_list_item(&rope, Span::new(0, 6), &patch, &[]),
            Err(RewriteError::Attribute(AttributeError::UnrepresentableValue { .. }))
        ));
    }

    #[test]
    fn replace_at_span_inserts_and_deletes() {
        let rope = Rope::from("abcdef");
        assert_eq!(replace_at_span(&rope, Span::new(2, 4), "XYZ").to_string(), "abXYZef");
        assert_eq!(replace_at_span(&rope, Span::new(6, 6), "!").to_string(), "abcdef!");
    }
}
