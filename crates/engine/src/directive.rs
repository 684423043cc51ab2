use serde::{Serialize, Serializer};

/// Cell value that deletes the matched line
pub const REMOVE: &str = "REMOVE";

/// Cell value that leaves the matched line untouched
pub const KEEP: &str = "KEEP";

/// What to do with a line whose prefix matched a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Drop the line from the output
    Remove,
    /// Emit the line unchanged
    Keep,
    /// Emit `"<tag> <value>"` in place of the line
    Replace(String),
}

impl Directive {
    /// Interpret a raw table cell.
    ///
    /// Matching of `REMOVE` and `KEEP` is exact and case-sensitive. A blank
    /// value keeps the line, though blank cells are normally filtered out
    /// before a mapping is built.
    pub fn parse(raw: &str) -> Self {
        match raw {
            REMOVE => Self::Remove,
            KEEP => Self::Keep,
            value if value.trim().is_empty() => Self::Keep,
            value => Self::Replace(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Remove => REMOVE,
            Self::Keep => KEEP,
            Self::Replace(value) => value,
        }
    }
}

/// Serialized as the cell text it was parsed from.
impl Serialize for Directive {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
