use crate::error::{EngineError, Result};
use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;

const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso_8859-1",
    "iso88591",
    "latin1",
    "latin-1",
    "l1",
];

/// Encoding tried when the bytes are not valid UTF-8
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackEncoding {
    /// Exact ISO-8859-1: every byte maps to the code point of the same value
    #[default]
    Latin1,
    /// Any other WHATWG encoding, decoded strictly
    Whatwg(&'static Encoding),
}

impl FallbackEncoding {
    /// Resolve an encoding label such as `iso-8859-1` or `shift_jis`.
    ///
    /// Latin-1 labels are kept as true ISO-8859-1 instead of the WHATWG
    /// windows-1252 alias.
    pub fn from_label(label: &str) -> Result<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        if LATIN1_LABELS.contains(&normalized.as_str()) {
            return Ok(Self::Latin1);
        }
        Encoding::for_label(normalized.as_bytes())
            .map(Self::Whatwg)
            .ok_or_else(|| EngineError::UnknownEncoding(label.to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Latin1 => "ISO-8859-1",
            Self::Whatwg(encoding) => encoding.name(),
        }
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            Self::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes)),
            Self::Whatwg(encoding) => {
                encoding.decode_without_bom_handling_and_without_replacement(bytes)
            }
        }
    }
}

/// Decode file bytes: strict UTF-8 first, then the fallback encoding.
pub fn decode_text(bytes: &[u8], fallback: FallbackEncoding) -> Result<String> {
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        return Ok(text.into_owned());
    }
    log::debug!("input is not UTF-8, retrying as {}", fallback.name());
    fallback
        .decode(bytes)
        .map(Cow::into_owned)
        .ok_or_else(|| EngineError::decode(fallback.name()))
}

/// Split decoded text into lines without their terminators.
///
/// `\r\n`, `\n` and a bare `\r` each end a line, so classic Mac files split
/// the same way as DOS and Unix ones. A final terminator does not add an
/// empty last line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let Some(end) = rest.find(|c: char| c == '\r' || c == '\n') else {
            lines.push(rest.to_string());
            break;
        };
        lines.push(rest[..end].to_string());
        let width = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + width..];
    }
    lines
}
