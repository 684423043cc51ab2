use crate::archive::ArchiveSink;
use crate::inputs::InputFile;
use crate::report::{FailedInput, ProcessedEntry, RunReport};
use anyhow::{Context as AnyhowContext, Result};
use ies_engine::{FileRewrite, OverrideEngine};
use ies_table::OverrideTable;
use std::fs;

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Record per-file failures in the report instead of aborting
    pub keep_going: bool,
}

/// Rewrite every input that has a table row and add it to `sink`.
///
/// Inputs are processed one at a time, in order. Files without a row are
/// skipped; the archive itself is written by the caller.
pub fn run_batch(
    inputs: &[InputFile],
    table: &OverrideTable,
    engine: &OverrideEngine,
    sink: &mut ArchiveSink,
    options: BatchOptions,
) -> Result<RunReport> {
    let mut report = RunReport::default();

    for input in inputs {
        let Some(overrides) = table.lookup(&input.name) else {
            log::info!("Skipping {}: no row in override table", input.name);
            report.skipped.push(input.name.clone());
            continue;
        };

        let rewritten = fs::read(&input.path)
            .with_context(|| format!("Failed to read {}", input.path.display()))
            .and_then(|bytes| {
                engine
                    .rewrite_file(&input.name, &bytes, overrides)
                    .with_context(|| format!("Failed to rewrite {}", input.name))
            });

        let FileRewrite {
            entry_name,
            contents,
            rename_key,
            stats,
        } = match rewritten {
            Ok(file) => file,
            Err(err) if options.keep_going => {
                log::warn!("{err:#}");
                report.failed.push(FailedInput {
                    input: input.name.clone(),
                    error: format!("{err:#}"),
                });
                continue;
            }
            Err(err) => return Err(err),
        };

        if sink.add(entry_name.clone(), contents) {
            log::warn!(
                "Archive entry {entry_name} written twice; keeping output of {}",
                input.name
            );
            report.replaced_entries.push(entry_name.clone());
        }
        log::info!("{} -> {entry_name}", input.name);
        report.processed.push(ProcessedEntry {
            input: input.name.clone(),
            entry: entry_name,
            rename_key,
            stats,
        });
    }

    Ok(report)
}
