use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_UPLOAD_INCREMENT, DEFAULT_UPLOAD_TICK_MS};
use crate::error::{MedvisError, Result};
use crate::pipeline::config::ScriptedConfig;
use crate::upload::UploadPolicy;

/// Timing of the simulated upload phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    pub upload_tick_ms: u64,
    /// Phase progress added per tick.
    pub upload_increment: u32,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            upload_tick_ms: DEFAULT_UPLOAD_TICK_MS,
            upload_increment: DEFAULT_UPLOAD_INCREMENT,
        }
    }
}

impl SequencerConfig {
    pub fn upload_tick(&self) -> Duration {
        Duration::from_millis(self.upload_tick_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.upload_increment == 0 || self.upload_increment > 100 {
            return Err(MedvisError::Config(format!(
                "upload_increment {} outside 1..=100",
                self.upload_increment
            )));
        }
        Ok(())
    }
}

/// Everything the sequencer and the scripted pipeline can be tuned with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MedvisConfig {
    #[serde(default)]
    pub upload: UploadPolicy,
    #[serde(default)]
    pub sequencer: SequencerConfig,
    #[serde(default)]
    pub pipeline: ScriptedConfig,
}

impl MedvisConfig {
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| MedvisError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| MedvisError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        self.sequencer.validate()?;
        self.pipeline.validate()
    }

    /// Same script with every delay cut to a few milliseconds.
    pub fn fast(mut self) -> Self {
        self.sequencer.upload_tick_ms = 1;
        self.pipeline.step_interval_ms = 1;
        self.pipeline.finalize_delay_ms = 1;
        self
    }
}
