use crate::decode::{decode_text, split_lines, FallbackEncoding};
use crate::directive::Directive;
use crate::error::Result;
use crate::naming::{output_name, DEFAULT_RENAME_SUFFIX, DEFAULT_RENAME_TAG};
use crate::overrides::OverrideMapping;
use serde::Serialize;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Tag whose replacement value becomes the rename key
    pub rename_tag: String,

    /// Suffix appended to the rename key for the output name
    pub rename_suffix: String,

    /// Encoding tried when a file is not valid UTF-8
    pub fallback: FallbackEncoding,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rename_tag: DEFAULT_RENAME_TAG.to_string(),
            rename_suffix: DEFAULT_RENAME_SUFFIX.to_string(),
            fallback: FallbackEncoding::default(),
        }
    }
}

/// Per-file line counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RewriteStats {
    pub lines_in: usize,
    pub lines_out: usize,
    pub replaced: usize,
    pub removed: usize,
    pub kept: usize,
}

/// Result of applying an override mapping to a sequence of lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub lines: Vec<String>,
    pub rename_key: Option<String>,
    pub stats: RewriteStats,
}

/// A fully rewritten file, ready for the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRewrite {
    pub entry_name: String,
    pub contents: Vec<u8>,
    pub rename_key: Option<String>,
    pub stats: RewriteStats,
}

#[derive(Debug, Clone, Default)]
pub struct OverrideEngine {
    config: EngineConfig,
}

impl OverrideEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Apply `overrides` to `lines`, preserving order.
    ///
    /// Each line gets at most one directive: the first tag in mapping order
    /// that prefixes it. Replacement lines keep the terminator of the line
    /// they replace.
    pub fn apply<S: AsRef<str>>(&self, lines: &[S], overrides: &OverrideMapping) -> Rewrite {
        let mut out = Vec::with_capacity(lines.len());
        let mut rename_key = None;
        let mut stats = RewriteStats {
            lines_in: lines.len(),
            ..RewriteStats::default()
        };

        for line in lines {
            let line = line.as_ref();
            match overrides.first_match(line) {
                Some((_, Directive::Remove)) => stats.removed += 1,
                Some((_, Directive::Keep)) => {
                    stats.kept += 1;
                    out.push(line.to_string());
                }
                Some((tag, Directive::Replace(value))) => {
                    if tag == self.config.rename_tag {
                        rename_key = Some(value.clone());
                    }
                    stats.replaced += 1;
                    out.push(format!("{tag} {value}{}", line_terminator(line)));
                }
                None => out.push(line.to_string()),
            }
        }

        stats.lines_out = out.len();
        Rewrite {
            lines: out,
            rename_key,
            stats,
        }
    }

    /// Decode, rewrite and re-join one input file.
    ///
    /// Output lines are joined with a single `\n` and encoded as UTF-8.
    pub fn rewrite_file(
        &self,
        name: &str,
        bytes: &[u8],
        overrides: &OverrideMapping,
    ) -> Result<FileRewrite> {
        let text = decode_text(bytes, self.config.fallback)?;
        let lines = split_lines(&text);
        let Rewrite {
            lines,
            rename_key,
            stats,
        } = self.apply(&lines, overrides);

        let entry_name = output_name(rename_key.as_deref(), name, &self.config.rename_suffix);
        log::debug!(
            "{name} -> {entry_name}: {} replaced, {} removed, {} kept",
            stats.replaced,
            stats.removed,
            stats.kept
        );

        Ok(FileRewrite {
            entry_name,
            contents: lines.join("\n").into_bytes(),
            rename_key,
            stats,
        })
    }
}

/// Apply `overrides` with the default rename tag.
pub fn apply_overrides<S: AsRef<str>>(
    lines: &[S],
    overrides: &OverrideMapping,
) -> (Vec<String>, Option<String>) {
    let rewrite = OverrideEngine::default().apply(lines, overrides);
    (rewrite.lines, rewrite.rename_key)
}

fn line_terminator(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else if line.ends_with('\r') {
        "\r"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn replacement_keeps_crlf() {
        let overrides = OverrideMapping::from_cells([("[TESTLAB]", "ACME")]);
        let (lines, _) = apply_overrides(&["[TESTLAB] OLD\r\n", "TILT=NONE\r\n"], &overrides);
        assert_eq!(lines, vec!["[TESTLAB] ACME\r\n", "TILT=NONE\r\n"]);
    }

    #[test]
    fn rename_key_only_from_replacement() {
        let keep = OverrideMapping::from_cells([("[LUMCAT]", "KEEP")]);
        let (_, key) = apply_overrides(&["[LUMCAT] X1"], &keep);
        assert_eq!(key, None);

        let remove = OverrideMapping::from_cells([("[LUMCAT]", "REMOVE")]);
        let (lines, key) = apply_overrides(&["[LUMCAT] X1"], &remove);
        assert!(lines.is_empty());
        assert_eq!(key, None);
    }

    #[test]
    fn last_rename_key_wins() {
        let overrides = OverrideMapping::from_cells([("[LUMCAT]", "C2")]);
        let (lines, key) = apply_overrides(&["[LUMCAT] a", "[LUMCAT] b"], &overrides);
        assert_eq!(lines, vec!["[LUMCAT] C2", "[LUMCAT] C2"]);
        assert_eq!(key.as_deref(), Some("C2"));
    }

    #[test]
    fn custom_rename_tag() {
        let engine = OverrideEngine::new(EngineConfig {
            rename_tag: "[LUMINAIRE]".to_string(),
            ..EngineConfig::default()
        });
        let overrides =
            OverrideMapping::from_cells([("[LUMCAT]", "C1"), ("[LUMINAIRE]", "Panel")]);
        let rewrite = engine.apply(&["[LUMCAT] a", "[LUMINAIRE] b"], &overrides);
        assert_eq!(rewrite.rename_key.as_deref(), Some("Panel"));
    }

    #[test]
    fn stats_count_each_outcome() {
        let overrides = OverrideMapping::from_cells([
            ("[MANUFAC]", "LEDFLEX"),
            ("[TEST]", "REMOVE"),
            ("[TESTLAB]", "KEEP"),
        ]);
        let rewrite = OverrideEngine::default().apply(
            &["[MANUFAC] a", "[TEST] b", "[TESTLAB] c", "1 2 3"],
            &overrides,
        );
        assert_eq!(
            rewrite.stats,
            RewriteStats {
                lines_in: 4,
                lines_out: 3,
                replaced: 1,
                removed: 1,
                kept: 1,
            }
        );
    }

    #[test]
    fn rewrite_file_joins_with_newline() {
        let overrides = OverrideMapping::from_cells([("[LUMCAT]", "C01181523")]);
        let out = OverrideEngine::default()
            .rewrite_file("foo.ies", b"IESNA:LM-63-2002\r\n[LUMCAT] OLD\r\n", &overrides)
            .unwrap();
        assert_eq!(out.entry_name, "C01181523_IES.IES");
        assert_eq!(out.contents, b"IESNA:LM-63-2002\n[LUMCAT] C01181523".to_vec());
    }

    #[test]
    fn rewrite_file_splits_classic_mac_line_endings() {
        let input = b"[MANUFAC] OLD\r[TEST] x\r[OTHER] y\rTILT=NONE\r";

        let replace = OverrideMapping::from_cells([("[MANUFAC]", "LEDFLEX")]);
        let out = OverrideEngine::default()
            .rewrite_file("mac.ies", input, &replace)
            .unwrap();
        assert_eq!(out.stats.lines_in, 4);
        assert_eq!(
            String::from_utf8(out.contents).unwrap(),
            "[MANUFAC] LEDFLEX\n[TEST] x\n[OTHER] y\nTILT=NONE"
        );

        let remove = OverrideMapping::from_cells([("[TEST]", "REMOVE")]);
        let out = OverrideEngine::default()
            .rewrite_file("mac.ies", input, &remove)
            .unwrap();
        assert_eq!(out.stats.lines_out, 3);
        assert_eq!(
            String::from_utf8(out.contents).unwrap(),
            "[MANUFAC] OLD\n[OTHER] y\nTILT=NONE"
        );
    }

    #[test]
    fn replacement_keeps_bare_carriage_return() {
        let overrides = OverrideMapping::from_cells([("[TESTLAB]", "ACME")]);
        let (lines, _) = apply_overrides(&["[TESTLAB] OLD\r", "TILT=NONE\r"], &overrides);
        assert_eq!(lines, vec!["[TESTLAB] ACME\r", "TILT=NONE\r"]);
    }
}
