use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_FILL_RGBA, DEFAULT_FINALIZE_DELAY_MS, DEFAULT_FINDING_LABEL, DEFAULT_MAX_FINDINGS,
    DEFAULT_MAX_RADIUS, DEFAULT_MIN_FINDINGS, DEFAULT_MIN_RADIUS, DEFAULT_OUTLINE_RGBA,
    DEFAULT_OUTLINE_WIDTH, DEFAULT_PLACEMENT_MARGIN, DEFAULT_PROCESSING_STEPS,
    DEFAULT_STEP_INTERVAL_MS,
};
use crate::error::{MedvisError, Result};

/// Message swapped in when the scripted run reaches `step`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub step: u32,
    pub message: String,
}

impl Checkpoint {
    pub fn new(step: u32, message: impl Into<String>) -> Self {
        Self {
            step,
            message: message.into(),
        }
    }
}

fn default_checkpoints() -> Vec<Checkpoint> {
    vec![
        Checkpoint::new(3, "Detecting structures..."),
        Checkpoint::new(5, "Segmenting regions of interest..."),
        Checkpoint::new(8, "Identifying anomalies..."),
    ]
}

/// Timing and script of the mock processing phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptedConfig {
    pub steps: u32,
    pub step_interval_ms: u64,
    pub finalize_delay_ms: u64,
    pub checkpoints: Vec<Checkpoint>,
    pub overlay: OverlayStyle,
}

impl Default for ScriptedConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_PROCESSING_STEPS,
            step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
            finalize_delay_ms: DEFAULT_FINALIZE_DELAY_MS,
            checkpoints: default_checkpoints(),
            overlay: OverlayStyle::default(),
        }
    }
}

impl ScriptedConfig {
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    pub fn finalize_delay(&self) -> Duration {
        Duration::from_millis(self.finalize_delay_ms)
    }

    /// Phase progress after `step` of `steps` equal steps.
    pub fn progress_at(&self, step: u32) -> u32 {
        if self.steps == 0 {
            return 100;
        }
        step.min(self.steps) * 100 / self.steps
    }

    pub fn checkpoint_message(&self, step: u32) -> Option<&str> {
        self.checkpoints
            .iter()
            .find(|c| c.step == step)
            .map(|c| c.message.as_str())
    }

    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(MedvisError::Config("pipeline.steps must be at least 1".into()));
        }
        if let Some(c) = self
            .checkpoints
            .iter()
            .find(|c| c.step == 0 || c.step > self.steps)
        {
            return Err(MedvisError::Config(format!(
                "checkpoint step {} outside 1..={}",
                c.step, self.steps
            )));
        }
        self.overlay.validate()
    }
}

/// Look of the stamped anomaly markers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub min_findings: u32,
    /// Inclusive.
    pub max_findings: u32,
    pub min_radius: f32,
    /// Exclusive.
    pub max_radius: f32,
    /// Fraction of each axis kept free of centres on both sides.
    pub margin: f32,
    pub fill: [u8; 4],
    pub outline: [u8; 4],
    pub outline_width: u32,
    pub label: String,
    /// TrueType/OpenType font for label text, overriding the bundled
    /// DejaVu Sans.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_font: Option<PathBuf>,
    /// Fixed RNG seed for reproducible placement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            min_findings: DEFAULT_MIN_FINDINGS,
            max_findings: DEFAULT_MAX_FINDINGS,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
            margin: DEFAULT_PLACEMENT_MARGIN,
            fill: DEFAULT_FILL_RGBA,
            outline: DEFAULT_OUTLINE_RGBA,
            outline_width: DEFAULT_OUTLINE_WIDTH,
            label: DEFAULT_FINDING_LABEL.to_string(),
            label_font: None,
            seed: None,
        }
    }
}

impl OverlayStyle {
    pub fn validate(&self) -> Result<()> {
        if self.min_findings > self.max_findings {
            return Err(MedvisError::Config(format!(
                "min_findings ({}) exceeds max_findings ({})",
                self.min_findings, self.max_findings
            )));
        }
        if !(self.min_radius > 0.0 && self.min_radius <= self.max_radius) {
            return Err(MedvisError::Config(format!(
                "invalid radius range {}..{}",
                self.min_radius, self.max_radius
            )));
        }
        if !(0.0..0.5).contains(&self.margin) {
            return Err(MedvisError::Config(format!(
                "margin {} outside [0, 0.5)",
                self.margin
            )));
        }
        Ok(())
    }
}
