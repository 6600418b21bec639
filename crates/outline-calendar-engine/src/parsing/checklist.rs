use std::sync::LazyLock;

use regex::Regex;

use crate::models::Completion;

use super::attributes::FIELD_RE;

/// Bullet prefix: indentation, `-`, whitespace, then an optional `[c]` checkbox.
static LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)-\s+(\[(.)\]\s+)?").expect("list item pattern is valid")
});

static CHECKBOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s+\[(.)\]\s+").expect("checkbox pattern is valid"));

/// The bullet syntax of one outline line, borrowed from the line itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLine<'a> {
    /// Leading whitespace before the `-`.
    pub indent: &'a str,
    /// The character inside `[c]`, if the line has a checkbox.
    pub checkbox: Option<char>,
    /// Everything after the bullet and checkbox prefix.
    pub rest: &'a str,
}

impl<'a> ListLine<'a> {
    /// Returns `None` unless `line` starts with a `-` bullet.
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = LIST_RE.captures(line)?;
        let prefix = caps.get(0)?;
        Some(Self {
            indent: caps.get(1).map_or("", |m| m.as_str()),
            checkbox: caps.get(3).and_then(|m| m.as_str().chars().next()),
            rest: &line[prefix.end()..],
        })
    }
}

/// True for `-` bulleted lines, with or without a checkbox.
pub fn is_checklist_line(line: &str) -> bool {
    LIST_RE.is_match(line)
}

/// Reads the checkbox of a bulleted line.
///
/// `[ ]` is [`Completion::Todo`]; any other single character is kept verbatim as
/// [`Completion::Done`] so non-binary states such as `[-]` or `[>]` survive.
/// Lines without a checkbox return `None`.
pub fn completion_marker(line: &str) -> Option<Completion> {
    let caps = CHECKBOX_RE.captures(line)?;
    let marker = caps.get(1)?.as_str().chars().next()?;
    Some(Completion::from_marker(marker))
}

/// The line's title: bullet, checkbox and every inline tag removed, then trimmed.
pub fn strip_bullet_and_attributes(line: &str) -> String {
    let without_bullet = LIST_RE.replace(line, "");
    FIELD_RE
        .replace_all(&without_bullet, "")
        .trim()
        .to_string()
}
