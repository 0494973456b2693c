use std::collections::BTreeMap;

use serde::Deserialize;

use crate::decode::DecoderOptions;
use crate::diagnostics::DEFAULT_MAX_SAMPLES;
use crate::error::ReconError;
use crate::model::SourceFormat;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconConfig {
    pub name: String,
    pub sources: BTreeMap<String, SourceConfig>,
    pub cross: CrossConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub format: SourceFormat,
    /// Path to the extract, relative to the config file.
    pub file: String,
    /// Appended to payroll employer addresses.
    #[serde(default)]
    pub province: Option<String>,
}

impl SourceConfig {
    pub fn decoder_options(&self) -> DecoderOptions {
        DecoderOptions {
            province: self.province.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Cross-reference
// ---------------------------------------------------------------------------

/// Records of `primary` are reported when their identifier is absent from
/// `secondary`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrossConfig {
    pub primary: String,
    pub secondary: String,
}

// ---------------------------------------------------------------------------
// Diagnostics + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsConfig {
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            max_samples: DEFAULT_MAX_SAMPLES,
        }
    }
}

fn default_max_samples() -> usize {
    DEFAULT_MAX_SAMPLES
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
    #[serde(default)]
    pub csv: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be empty".into()));
        }

        if self.sources.len() < 2 {
            return Err(ReconError::ConfigValidation(
                "at least 2 sources are required".into(),
            ));
        }

        for (source_name, source) in &self.sources {
            if source.file.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "source '{source_name}': file must not be empty"
                )));
            }
        }

        if !self.sources.contains_key(&self.cross.primary) {
            return Err(ReconError::UnknownSource(format!(
                "cross: primary source '{}' not found",
                self.cross.primary
            )));
        }
        if !self.sources.contains_key(&self.cross.secondary) {
            return Err(ReconError::UnknownSource(format!(
                "cross: secondary source '{}' not found",
                self.cross.secondary
            )));
        }
        if self.cross.primary == self.cross.secondary {
            return Err(ReconError::ConfigValidation(format!(
                "cross: primary and secondary are both '{}'",
                self.cross.primary
            )));
        }

        Ok(())
    }

    /// Source named by `cross.primary`. Panics on a config that has not
    /// passed [`ReconConfig::validate`].
    pub fn primary(&self) -> &SourceConfig {
        &self.sources[&self.cross.primary]
    }

    pub fn secondary(&self) -> &SourceConfig {
        &self.sources[&self.cross.secondary]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
