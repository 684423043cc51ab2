use anyhow::{bail, Context as AnyhowContext, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One file to process. `name` is the table join key (file name only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub path: PathBuf,
}

impl InputFile {
    fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("Input has no file name: {}", path.display()))?;
        Ok(Self {
            name,
            path: path.to_path_buf(),
        })
    }
}

/// Expand command-line inputs into files.
///
/// Explicit files are taken as given, in order. Directories contribute their
/// files whose extension matches `extensions` (case-insensitive), sorted by
/// path; subdirectories only with `recursive`.
pub fn collect_inputs(
    paths: &[PathBuf],
    extensions: &[String],
    recursive: bool,
) -> Result<Vec<InputFile>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(InputFile::from_path(path)?);
            continue;
        }
        if !path.is_dir() {
            bail!("Input not found: {}", path.display());
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        let before = files.len();
        for entry in WalkDir::new(path)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
        {
            let entry =
                entry.with_context(|| format!("Failed to scan directory {}", path.display()))?;
            if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                files.push(InputFile::from_path(entry.path())?);
            }
        }
        log::debug!(
            "Found {} input file(s) in {}",
            files.len() - before,
            path.display()
        );
    }
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}
