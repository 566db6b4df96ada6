use crate::error::{CliError, Result};
use polysim::engine::config::{ChainSpec, PipelineConfig};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileIntegratorConfig {
    pub timestep: Option<f64>,
    pub substeps: Option<usize>,
}

/// A simulation configuration file. Every section is optional; missing values
/// fall back to the built-in defaults.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub seed: Option<u64>,
    pub frames: Option<usize>,
    pub integrator: Option<FileIntegratorConfig>,
    pub chains: Option<Vec<ChainSpec>>,
    pub pipeline: Option<PipelineConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
