use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use verdant_core::config::ScoringConfig;
use verdant_core::request::SchemeSelections;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct IntegrationSection {
    #[serde(rename = "samples-per-segment", alias = "samples_per_segment")]
    pub samples_per_segment: Option<usize>,
}

/// Optional `--config` TOML file.
///
/// ```toml
/// [integration]
/// samples-per-segment = 2000
///
/// [schemes]
/// stage = "Eco_Friendly"
/// final = "Equal"
/// ```
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub integration: IntegrationSection,
    /// Defaults for scheme slots a method file leaves unset.
    #[serde(default)]
    pub schemes: SchemeSelections,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Read `path` if given, otherwise use built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn scoring_config(&self) -> Result<ScoringConfig> {
        let mut config = ScoringConfig::default();
        if let Some(samples) = self.integration.samples_per_segment {
            config.samples_per_segment = samples;
        }
        config
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verdant.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_path_gives_defaults() {
        let cfg = FileConfig::load(None).unwrap();
        assert_eq!(cfg.scoring_config().unwrap(), ScoringConfig::default());
        assert_eq!(cfg.schemes, SchemeSelections::default());
    }

    #[test]
    fn reads_integration_and_schemes() {
        let (_dir, path) = write_config(
            r#"
            [integration]
            samples-per-segment = 250

            [schemes]
            stage = "Eco_Friendly"
            final = "Equal"
            "#,
        );
        let cfg = FileConfig::from_file(&path).unwrap();
        assert_eq!(cfg.scoring_config().unwrap().samples_per_segment, 250);
        assert_eq!(cfg.schemes.instrument_stage(), "Eco_Friendly");
        assert_eq!(cfg.schemes.final_scheme(), "Equal");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let (_dir, path) = write_config("[integration]\nsamples = 10\n");
        let err = FileConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CliError::Toml { .. }));
    }

    #[test]
    fn too_few_samples_is_a_config_error() {
        let (_dir, path) = write_config("[integration]\nsamples-per-segment = 1\n");
        let cfg = FileConfig::from_file(&path).unwrap();
        assert!(matches!(cfg.scoring_config(), Err(CliError::Config(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
