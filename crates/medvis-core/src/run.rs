use std::fmt;

use crate::consts::UPLOAD_PHASE_SHARE;

/// Identifier of a single submission. Monotonic per sequencer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProcessingStatus {
    #[default]
    Idle,
    Uploading,
    Processing,
    Success,
    Error,
}

impl ProcessingStatus {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Uploading | Self::Processing)
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Ready to process"),
            Self::Uploading => write!(f, "Uploading..."),
            Self::Processing => write!(f, "Processing..."),
            Self::Success => write!(f, "Processing complete"),
            Self::Error => write!(f, "Error processing image"),
        }
    }
}

/// Snapshot of the current run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProcessingRun {
    pub run_id: RunId,
    pub status: ProcessingStatus,
    /// Overall progress across both phases, 0..=100, never decreasing.
    pub progress: u32,
    /// Progress of the current phase, 0..=100.
    pub phase_progress: u32,
    pub message: String,
    /// Technical reason, set only when `status == Error`.
    pub failure: Option<String>,
}

impl ProcessingRun {
    pub fn started(run_id: RunId, message: &str) -> Self {
        Self {
            run_id,
            status: ProcessingStatus::Uploading,
            progress: 0,
            phase_progress: 0,
            message: message.to_string(),
            failure: None,
        }
    }

    /// Record phase progress and fold it into the overall figure.
    ///
    /// Overall progress is clamped so it never moves backwards.
    pub fn set_phase_progress(&mut self, phase_progress: u32) {
        let phase_progress = phase_progress.min(100);
        self.phase_progress = phase_progress;
        let overall = overall_progress(self.status, phase_progress);
        self.progress = self.progress.max(overall);
    }

    /// Move to the processing phase; phase progress restarts at zero.
    pub fn enter_processing(&mut self, message: &str) {
        self.status = ProcessingStatus::Processing;
        self.phase_progress = 0;
        self.progress = self.progress.max(UPLOAD_PHASE_SHARE);
        self.message = message.to_string();
    }

    pub fn succeed(&mut self, message: &str) {
        self.status = ProcessingStatus::Success;
        self.phase_progress = 100;
        self.progress = 100;
        self.message = message.to_string();
        self.failure = None;
    }

    pub fn fail(&mut self, message: &str, reason: String) {
        self.status = ProcessingStatus::Error;
        self.message = message.to_string();
        self.failure = Some(reason);
    }
}

/// Map phase progress onto the overall 0..=100 scale.
fn overall_progress(status: ProcessingStatus, phase_progress: u32) -> u32 {
    match status {
        ProcessingStatus::Uploading => phase_progress * UPLOAD_PHASE_SHARE / 100,
        ProcessingStatus::Processing => {
            UPLOAD_PHASE_SHARE + phase_progress * (100 - UPLOAD_PHASE_SHARE) / 100
        }
        ProcessingStatus::Success => 100,
        ProcessingStatus::Idle | ProcessingStatus::Error => 0,
    }
}
