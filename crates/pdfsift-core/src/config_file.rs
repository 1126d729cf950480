use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub recovery: Option<RecoveryConfig>,
    pub inference: Option<InferenceSection>,
    pub admission: Option<AdmissionConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryConfig {
    pub min_text_length: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferenceSection {
    pub max_entities_per_kind: Option<usize>,
    pub max_structured_records: Option<usize>,
    pub top_words: Option<usize>,
    pub min_word_length: Option<usize>,
    pub min_record_fields: Option<usize>,
    pub min_table_columns: Option<usize>,
    pub max_table_columns: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdmissionConfig {
    pub max_file_size_mb: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub color: Option<bool>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write config: {0}")]
    Io(#[from] std::io::Error),
}

/// Platform config directory path: `<config_dir>/pdfsift/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdfsift").join("config.toml"))
}

/// Load config by cascading CWD `.pdfsift.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pdfsift.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let recovery = match (base.recovery, overlay.recovery) {
        (Some(b), Some(o)) => Some(RecoveryConfig {
            min_text_length: o.min_text_length.or(b.min_text_length),
        }),
        (b, o) => o.or(b),
    };

    let inference = match (base.inference, overlay.inference) {
        (Some(b), Some(o)) => Some(InferenceSection {
            max_entities_per_kind: o.max_entities_per_kind.or(b.max_entities_per_kind),
            max_structured_records: o.max_structured_records.or(b.max_structured_records),
            top_words: o.top_words.or(b.top_words),
            min_word_length: o.min_word_length.or(b.min_word_length),
            min_record_fields: o.min_record_fields.or(b.min_record_fields),
            min_table_columns: o.min_table_columns.or(b.min_table_columns),
            max_table_columns: o.max_table_columns.or(b.max_table_columns),
        }),
        (b, o) => o.or(b),
    };

    let admission = match (base.admission, overlay.admission) {
        (Some(b), Some(o)) => Some(AdmissionConfig {
            max_file_size_mb: o.max_file_size_mb.or(b.max_file_size_mb),
        }),
        (b, o) => o.or(b),
    };

    let output = match (base.output, overlay.output) {
        (Some(b), Some(o)) => Some(OutputConfig {
            format: o.format.or(b.format),
            color: o.color.or(b.color),
        }),
        (b, o) => o.or(b),
    };

    ConfigFile {
        recovery,
        inference,
        admission,
        output,
    }
}

/// Save the config to the platform config directory.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to_path(config, &path)?;
    Ok(path)
}

/// Save the config to an explicit path, creating parent directories.
pub fn save_to_path(config: &ConfigFile, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_parses() {
        let toml_str = "[inference]\ntop_words = 5\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.inference.unwrap().top_words, Some(5));
        assert!(parsed.recovery.is_none());
    }

    #[test]
    fn merge_overlay_wins_per_field() {
        let base = ConfigFile {
            inference: Some(InferenceSection {
                top_words: Some(10),
                max_entities_per_kind: Some(3),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            inference: Some(InferenceSection {
                top_words: Some(25),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay).inference.unwrap();
        assert_eq!(merged.top_words, Some(25));
        assert_eq!(merged.max_entities_per_kind, Some(3));
    }

    #[test]
    fn merge_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            admission: Some(AdmissionConfig {
                max_file_size_mb: Some(20),
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(merged.admission.unwrap().max_file_size_mb, Some(20));
        assert!(merged.output.is_none());
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = ConfigFile {
            output: Some(OutputConfig {
                format: Some("csv".into()),
                color: Some(false),
            }),
            ..Default::default()
        };
        save_to_path(&config, &path).unwrap();
        assert_eq!(load_from_path(&path), Some(config));
    }

    #[test]
    fn unparsable_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[inference\ntop_words = ").unwrap();
        assert!(load_from_path(&path).is_none());
    }
}
