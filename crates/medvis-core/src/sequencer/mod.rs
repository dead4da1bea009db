//! Upload/processing state machine.
//!
//! The [`Sequencer`] lives on the UI thread. Each accepted submission runs on
//! its own worker thread and reports back over a per-run channel; the UI
//! drains that channel with [`Sequencer::poll`] (or blocks on
//! [`Sequencer::wait_update`] in headless use). A new submission or a
//! [`Sequencer::reset`] drops the previous run's channel and cancel handle,
//! so nothing from a superseded run can reach the current state.

mod worker;

use std::sync::mpsc::{RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{MedvisConfig, SequencerConfig};
use crate::consts::{MSG_ANALYZING, MSG_FAILURE, MSG_PREPARING, MSG_SUCCESS};
use crate::error::{MedvisError, Result};
use crate::pipeline::{AnalysisPipeline, DerivedImage, ScriptedPipeline};
use crate::run::{ProcessingRun, ProcessingStatus, RunId};
use crate::upload::{SelectedFile, UploadPolicy, UploadedImage};

pub use worker::RunHandle;

use worker::{spawn_run, ActiveRun, RunMessage};

pub struct Sequencer {
    policy: UploadPolicy,
    config: SequencerConfig,
    pipeline: Arc<dyn AnalysisPipeline>,
    run: ProcessingRun,
    original: Option<UploadedImage>,
    derived: Option<DerivedImage>,
    active: Option<ActiveRun>,
    last_run_id: u64,
}

impl Sequencer {
    /// Fails with `Config` when the upload timing could never complete a run.
    pub fn new(
        policy: UploadPolicy,
        config: SequencerConfig,
        pipeline: Arc<dyn AnalysisPipeline>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            policy,
            config,
            pipeline,
            run: ProcessingRun::default(),
            original: None,
            derived: None,
            active: None,
            last_run_id: 0,
        })
    }

    /// Sequencer backed by the scripted mock pipeline.
    pub fn scripted(config: &MedvisConfig) -> Result<Self> {
        config.validate()?;
        let pipeline = ScriptedPipeline::new(config.pipeline.clone())?;
        Self::new(
            config.upload.clone(),
            config.sequencer.clone(),
            Arc::new(pipeline),
        )
    }

    pub fn run(&self) -> &ProcessingRun {
        &self.run
    }

    pub fn status(&self) -> ProcessingStatus {
        self.run.status
    }

    pub fn progress(&self) -> u32 {
        self.run.progress
    }

    pub fn message(&self) -> &str {
        &self.run.message
    }

    pub fn original(&self) -> Option<&UploadedImage> {
        self.original.as_ref()
    }

    pub fn derived(&self) -> Option<&DerivedImage> {
        self.derived.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_run_id(&self) -> Option<RunId> {
        self.active.as_ref().map(|a| a.handle.run_id())
    }

    /// Validate `file` and start a new run, superseding any run in flight.
    ///
    /// Type and size violations are returned synchronously and leave the
    /// current state untouched.
    pub fn submit(&mut self, file: SelectedFile) -> Result<RunId> {
        let image = UploadedImage::accept(file, &self.policy)?;

        self.cancel_active();
        self.release_upload();
        self.derived = None;

        self.last_run_id += 1;
        let run_id = RunId(self.last_run_id);
        self.run = ProcessingRun::started(run_id, MSG_PREPARING);
        self.original = Some(image.clone());

        info!(
            run = %run_id,
            image = %image.id(),
            name = image.name(),
            size = image.size(),
            pipeline = self.pipeline.name(),
            "run started"
        );

        match spawn_run(run_id, image, self.pipeline.clone(), self.config.clone()) {
            Ok(active) => {
                self.active = Some(active);
                Ok(run_id)
            }
            Err(e) => {
                self.run.fail(MSG_FAILURE, e.to_string());
                Err(e)
            }
        }
    }

    /// Cancel any run, release the upload and return to `Idle`.
    pub fn reset(&mut self) {
        self.cancel_active();
        self.release_upload();
        self.derived = None;
        self.run = ProcessingRun::default();
        info!("sequencer reset");
    }

    /// Apply every update the worker has produced so far. Returns the
    /// snapshots in order.
    pub fn poll(&mut self) -> Vec<ProcessingRun> {
        let mut applied = Vec::new();
        while let Some(active) = self.active.as_ref() {
            match active.rx.try_recv() {
                Ok(msg) => applied.push(self.apply(msg)),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    applied.push(self.worker_lost());
                    break;
                }
            }
        }
        applied
    }

    /// Block up to `timeout` for the next update. `None` on timeout or when
    /// no run is active.
    pub fn wait_update(&mut self, timeout: Duration) -> Option<ProcessingRun> {
        let active = self.active.as_ref()?;
        match active.rx.recv_timeout(timeout) {
            Ok(msg) => Some(self.apply(msg)),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(self.worker_lost()),
        }
    }

    /// Block until the current run ends or `timeout` passes between updates.
    pub fn wait_terminal(&mut self, timeout: Duration) -> ProcessingStatus {
        while self.active.is_some() {
            if self.wait_update(timeout).is_none() {
                break;
            }
        }
        self.run.status
    }

    fn apply(&mut self, msg: RunMessage) -> ProcessingRun {
        match msg {
            RunMessage::Upload { phase_progress } => {
                self.run.set_phase_progress(phase_progress);
            }
            RunMessage::ProcessingStarted => {
                debug!(run = %self.run.run_id, "upload complete, processing");
                self.run.enter_processing(MSG_ANALYZING);
            }
            RunMessage::Phase {
                phase_progress,
                message,
            } => {
                self.run.set_phase_progress(phase_progress);
                if let Some(message) = message {
                    self.run.message = message;
                }
            }
            RunMessage::Finished(outcome) => {
                self.active = None;
                self.finish(outcome);
            }
        }
        self.run.clone()
    }

    fn finish(&mut self, outcome: Result<DerivedImage>) {
        match outcome {
            Ok(derived) => {
                info!(
                    run = %self.run.run_id,
                    width = derived.width(),
                    height = derived.height(),
                    findings = derived.findings().len(),
                    "run complete"
                );
                self.derived = Some(derived);
                self.run.succeed(MSG_SUCCESS);
            }
            Err(e) => {
                warn!(run = %self.run.run_id, error = %e, "run failed");
                self.derived = None;
                self.run.fail(MSG_FAILURE, e.to_string());
            }
        }
    }

    fn worker_lost(&mut self) -> ProcessingRun {
        self.active = None;
        self.finish(Err(MedvisError::RenderFailure(
            "worker stopped before reporting a result".into(),
        )));
        self.run.clone()
    }

    fn cancel_active(&mut self) {
        if let Some(active) = self.active.take() {
            // Dropping the receiver first guarantees no late message is read.
            drop(active.rx);
            active.handle.cancel();
        }
    }

    fn release_upload(&mut self) {
        if let Some(image) = self.original.take() {
            debug!(image = %image.id(), "upload released");
        }
    }
}

impl Drop for Sequencer {
    fn drop(&mut self) {
        self.cancel_active();
    }
}
