use ies_engine::RewriteStats;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ProcessedEntry {
    pub input: String,
    pub entry: String,
    pub rename_key: Option<String>,
    #[serde(flatten)]
    pub stats: RewriteStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedInput {
    pub input: String,
    pub error: String,
}

/// Outcome of one `apply` run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub archive: Option<String>,
    pub processed: Vec<ProcessedEntry>,
    /// Inputs with no row in the override table
    pub skipped: Vec<String>,
    pub failed: Vec<FailedInput>,
    /// Entry names written more than once; the last input won
    pub replaced_entries: Vec<String>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.replaced_entries.is_empty()
    }
}

pub fn render_summary(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Processed {} file(s), skipped {}, failed {}\n",
        report.processed.len(),
        report.skipped.len(),
        report.failed.len()
    ));
    if let Some(archive) = &report.archive {
        out.push_str(&format!("Archive: {archive}\n"));
    }

    if !report.processed.is_empty() {
        out.push('\n');
        for entry in &report.processed {
            out.push_str(&format!(
                "  {} -> {} ({} replaced, {} removed, {} kept)\n",
                entry.input,
                entry.entry,
                entry.stats.replaced,
                entry.stats.removed,
                entry.stats.kept
            ));
        }
    }
    if !report.skipped.is_empty() {
        out.push_str("\nNo table row:\n");
        for name in &report.skipped {
            out.push_str(&format!("  {name}\n"));
        }
    }
    if !report.failed.is_empty() {
        out.push_str("\nFailed:\n");
        for failed in &report.failed {
            out.push_str(&format!("  {}: {}\n", failed.input, failed.error));
        }
    }
    if !report.replaced_entries.is_empty() {
        out.push_str("\nOverwritten archive entries:\n");
        for name in &report.replaced_entries {
            out.push_str(&format!("  {name}\n"));
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_every_section() {
        let report = RunReport {
            archive: Some("out.zip".to_string()),
            processed: vec![ProcessedEntry {
                input: "foo.ies".to_string(),
                entry: "C01181523_IES.IES".to_string(),
                rename_key: Some("C01181523".to_string()),
                stats: RewriteStats {
                    lines_in: 3,
                    lines_out: 2,
                    replaced: 1,
                    removed: 1,
                    kept: 0,
                },
            }],
            skipped: vec!["orphan.ies".to_string()],
            failed: vec![FailedInput {
                input: "bad.ies".to_string(),
                error: "Decode error".to_string(),
            }],
            replaced_entries: Vec::new(),
        };

        let text = render_summary(&report);
        assert!(text.starts_with("Processed 1 file(s), skipped 1, failed 1"));
        assert!(text.contains("foo.ies -> C01181523_IES.IES (1 replaced, 1 removed, 0 kept)"));
        assert!(text.contains("No table row:\n  orphan.ies"));
        assert!(text.contains("bad.ies: Decode error"));
        assert!(!text.contains("Overwritten"));
        assert!(!report.is_clean());
    }
}
