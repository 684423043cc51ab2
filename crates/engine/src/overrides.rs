use crate::directive::Directive;
use serde::{Serialize, Serializer};

/// Ordered tag -> directive mapping for a single file.
///
/// Iteration order is insertion order, which callers build from the column
/// order of the override table. When several tags are prefixes of the same
/// line, the earliest one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideMapping {
    entries: Vec<(String, Directive)>,
}

#[derive(Serialize)]
struct MappingEntry<'a> {
    tag: &'a str,
    directive: &'a Directive,
}

impl OverrideMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw `(tag, cell)` pairs, skipping blank cells.
    pub fn from_cells<I, K, V>(cells: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut mapping = Self::new();
        for (tag, value) in cells {
            mapping.insert_cell(tag, value.as_ref());
        }
        mapping
    }

    /// Insert a raw cell value. Blank values are excluded and return `false`.
    pub fn insert_cell(&mut self, tag: impl Into<String>, value: &str) -> bool {
        if value.trim().is_empty() {
            return false;
        }
        self.insert(tag, Directive::parse(value));
        true
    }

    /// Insert or replace a directive. Replacing keeps the tag's original
    /// position in the iteration order.
    pub fn insert(&mut self, tag: impl Into<String>, directive: Directive) {
        let tag = tag.into();
        if let Some(slot) = self.entries.iter_mut().find(|(key, _)| *key == tag) {
            slot.1 = directive;
        } else {
            self.entries.push((tag, directive));
        }
    }

    pub fn get(&self, tag: &str) -> Option<&Directive> {
        self.entries
            .iter()
            .find(|(key, _)| key == tag)
            .map(|(_, directive)| directive)
    }

    /// First tag (in mapping order) that prefixes `line`.
    pub fn first_match(&self, line: &str) -> Option<(&str, &Directive)> {
        self.entries
            .iter()
            .find(|(key, _)| line.starts_with(key.as_str()))
            .map(|(key, directive)| (key.as_str(), directive))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Directive)> {
        self.entries.iter().map(|(key, d)| (key.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every directive is `KEEP`.
    pub fn is_keep_only(&self) -> bool {
        self.entries.iter().all(|(_, d)| *d == Directive::Keep)
    }
}

impl<K: Into<String>> FromIterator<(K, Directive)> for OverrideMapping {
    fn from_iter<T: IntoIterator<Item = (K, Directive)>>(iter: T) -> Self {
        let mut mapping = Self::new();
        for (tag, directive) in iter {
            mapping.insert(tag, directive);
        }
        mapping
    }
}

/// Serialized as an ordered list of `{ "tag", "directive" }` objects.
impl Serialize for OverrideMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            self.entries
                .iter()
                .map(|(tag, directive)| MappingEntry { tag, directive }),
        )
    }
}
