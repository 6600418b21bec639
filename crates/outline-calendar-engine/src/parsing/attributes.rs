//! Inline `[name:: value]` tags, the miniature key-value store embedded in a line.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Matches one inline tag. The value runs to the first `]`; there is no escaping.
pub(crate) static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+):: ?([^\]]+)\]").expect("inline field pattern is valid")
});

const TAG_SEPARATOR: &str = "  ";

/// The value of an inline attribute.
///
/// Only the literal words `true` and `false` become booleans; everything else,
/// numbers included, stays text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    Bool(bool),
}

impl AttrValue {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "true" => AttrValue::Bool(true),
            "false" => AttrValue::Bool(false),
            other => AttrValue::Text(other.to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            AttrValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            AttrValue::Text(_) => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

/// Insertion-ordered attribute map with unique keys.
///
/// Re-inserting an existing key replaces its value but keeps its original
/// position, so iteration order is the order keys were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineAttributes {
    entries: Vec<(String, AttrValue)>,
}

impl InlineAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Sets `key`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for InlineAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = InlineAttributes::new();
        attrs.extend(iter);
        attrs
    }
}

impl<K: Into<String>, V: Into<AttrValue>> Extend<(K, V)> for InlineAttributes {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for InlineAttributes {
    type Item = (String, AttrValue);
    type IntoIter = std::vec::IntoIter<(String, AttrValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// An attribute that cannot be written as an inline tag and read back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    #[error("attribute name must not be empty")]
    EmptyKey,
    #[error("attribute `{key}` has an empty value")]
    EmptyValue { key: String },
    #[error("attribute name {0:?} cannot be written as an inline tag")]
    UnrepresentableKey(String),
    #[error("value {value:?} of attribute `{key}` cannot be written as an inline tag")]
    UnrepresentableValue { key: String, value: String },
}

/// Parses every inline tag in `line`, left to right. A repeated key keeps the
/// last value.
pub fn parse_inline_attributes(line: &str) -> InlineAttributes {
    FIELD_RE
        .captures_iter(line)
        .map(|caps| (caps[1].to_string(), AttrValue::parse(&caps[2])))
        .collect()
}

/// Renders attributes as `[name:: value]` tags in iteration order, joined by two
/// spaces.
///
/// Keys and values that would not survive [`parse_inline_attributes`] (a `]`,
/// a line break, a `::` separator, or nothing at all) are rejected.
pub fn generate_inline_attributes(attrs: &InlineAttributes) -> Result<String, AttributeError> {
    let tags = attrs
        .iter()
        .map(|(key, value)| {
            check_key(key)?;
            let value = value.to_string();
            check_value(key, &value)?;
            Ok(format!("[{key}:: {value}]"))
        })
        .collect::<Result<Vec<_>, AttributeError>>()?;
    Ok(tags.join(TAG_SEPARATOR))
}

fn breaks_tag(s: &str) -> bool {
    s.contains([']', '\n', '\r']) || s.contains("::")
}

fn check_key(key: &str) -> Result<(), AttributeError> {
    if key.is_empty() {
        return Err(AttributeError::EmptyKey);
    }
    if breaks_tag(key) || key.ends_with(':') {
        return Err(AttributeError::UnrepresentableKey(key.to_string()));
    }
    Ok(())
}

fn check_value(key: &str, value: &str) -> Result<(), AttributeError> {
    if value.is_empty() {
        return Err(AttributeError::EmptyValue {
            key: key.to_string(),
        });
    }
    if breaks_tag(value) {
        return Err(AttributeError::UnrepresentableValue {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}
