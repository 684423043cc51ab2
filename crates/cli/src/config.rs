use anyhow::{Context as AnyhowContext, Result};
use ies_engine::{EngineConfig, FallbackEncoding, DEFAULT_RENAME_SUFFIX, DEFAULT_RENAME_TAG};
use ies_table::TableOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "ies-batch.toml";
pub const DEFAULT_ARCHIVE_NAME: &str = "Processed_IES_Files.zip";

/// Settings read from `ies-batch.toml`; every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub rename_tag: String,
    pub rename_suffix: String,
    pub fallback_encoding: String,
    pub key_column: Option<String>,
    pub sheet: Option<String>,
    pub archive_name: String,
    pub extensions: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rename_tag: DEFAULT_RENAME_TAG.to_string(),
            rename_suffix: DEFAULT_RENAME_SUFFIX.to_string(),
            fallback_encoding: "iso-8859-1".to_string(),
            key_column: None,
            sheet: None,
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            extensions: vec!["ies".to_string()],
        }
    }
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(Into::into)
    }

    /// Load the explicit config file, or `ies-batch.toml` from `cwd` if present.
    ///
    /// A broken explicit file is an error; a broken discovered file is
    /// logged and ignored.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config = Self::from_toml(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))?;
            return Ok((config, Some(path.to_path_buf())));
        }

        let candidate = cwd.join(CONFIG_FILE_NAME);
        if !candidate.is_file() {
            return Ok((Self::default(), None));
        }
        let parsed = fs::read_to_string(&candidate)
            .map_err(anyhow::Error::from)
            .and_then(|text| Self::from_toml(&text));
        match parsed {
            Ok(config) => Ok((config, Some(candidate))),
            Err(err) => {
                log::warn!(
                    "Config parse error {}: {err:#}; using defaults",
                    candidate.display()
                );
                Ok((Self::default(), None))
            }
        }
    }

    pub fn engine_config(&self) -> Result<EngineConfig> {
        let fallback = FallbackEncoding::from_label(&self.fallback_encoding)
            .context("Invalid fallback_encoding")?;
        Ok(EngineConfig {
            rename_tag: self.rename_tag.clone(),
            rename_suffix: self.rename_suffix.clone(),
            fallback,
        })
    }

    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            key_column: self.key_column.clone(),
            sheet: self.sheet.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::from_toml("rename_tag = \"[LUMINAIRE]\"\nsheet = \"Changes\"").unwrap();
        assert_eq!(config.rename_tag, "[LUMINAIRE]");
        assert_eq!(config.sheet.as_deref(), Some("Changes"));
        assert_eq!(config.rename_suffix, DEFAULT_RENAME_SUFFIX);
        assert_eq!(config.extensions, vec!["ies".to_string()]);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(AppConfig::from_toml("rename_tagg = \"x\"").is_err());
    }

    #[test]
    fn discovered_broken_config_falls_back() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "rename_tag = [").unwrap();
        let (config, path) = AppConfig::load(None, temp.path()).unwrap();
        assert!(path.is_none());
        assert_eq!(config.rename_tag, DEFAULT_RENAME_TAG);
    }

    #[test]
    fn explicit_broken_config_fails() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("custom.toml");
        fs::write(&path, "rename_tag = [").unwrap();
        assert!(AppConfig::load(Some(&path), temp.path()).is_err());
    }

    #[test]
    fn bad_encoding_label_fails_engine_config() {
        let config = AppConfig {
            fallback_encoding: "klingon".to_string(),
            ..AppConfig::default()
        };
        assert!(config.engine_config().is_err());
    }
}
