//! Top-level configuration, loadable from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dictionary::DictionaryConfig;
use crate::error::{DibieError, Result};
use crate::input::ParserConfig;
use crate::quality::QualityConfig;

/// Configuration for a full analysis run.
///
/// Every section is optional in the JSON file; missing sections and fields take
/// their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DibieConfig {
    pub parser: ParserConfig,
    pub dictionary: DictionaryConfig,
    pub quality: QualityConfig,
}

impl DibieConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| DibieError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: DibieConfig = serde_json::from_str(&content)
            .map_err(|e| DibieError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.parser.validate()?;
        self.dictionary.validate()?;
        self.quality.validate()?;
        Ok(())
    }
}
