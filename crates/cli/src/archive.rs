use anyhow::{Context as AnyhowContext, Result};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Collects rewritten files and writes them out as one zip archive.
///
/// Entry names are unique: adding a name twice replaces the earlier contents
/// in place.
pub struct ArchiveSink {
    entries: Vec<(String, Vec<u8>)>,
    compression: CompressionMethod,
}

impl ArchiveSink {
    pub fn new(compression: CompressionMethod) -> Self {
        Self {
            entries: Vec::new(),
            compression,
        }
    }

    /// Add an entry. Returns `true` if it replaced an existing one.
    pub fn add(&mut self, name: impl Into<String>, contents: Vec<u8>) -> bool {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = contents;
            return true;
        }
        self.entries.push((name, contents));
        false
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default()
            .compression_method(self.compression)
            .unix_permissions(0o644);
        for (name, contents) in &self.entries {
            zip.start_file(name.as_str(), options)
                .with_context(|| format!("Failed to start archive entry {name}"))?;
            zip.write_all(contents)
                .with_context(|| format!("Failed to write archive entry {name}"))?;
        }
        zip.finish().context("Failed to finalize archive")
    }

    pub fn write_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create archive {}", path.display()))?;
        let mut writer = self.write_to(BufWriter::new(file))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush archive {}", path.display()))
    }
}
