use std::sync::mpsc;
use std::sync::Arc;

use tracing::debug;

use crate::config::SequencerConfig;
use crate::error::{MedvisError, Result};
use crate::pipeline::{AnalysisPipeline, CancelSignal, CancelToken, DerivedImage, PhaseReporter};
use crate::run::RunId;
use crate::upload::UploadedImage;

/// Messages sent from a run's worker thread to the sequencer.
pub(crate) enum RunMessage {
    Upload { phase_progress: u32 },
    ProcessingStarted,
    Phase {
        phase_progress: u32,
        message: Option<String>,
    },
    Finished(Result<DerivedImage>),
}

/// Owned, cancelable handle to a running worker.
///
/// Dropping the handle cancels the run: the cancel channel disconnects,
/// which wakes any pending timer immediately.
pub struct RunHandle {
    run_id: RunId,
    signal: CancelSignal,
}

impl RunHandle {
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Cancel without waiting for the thread to exit.
    pub fn cancel(self) {
        debug!(run = %self.run_id, "run cancelled");
        self.signal.cancel();
    }
}

/// A spawned run: its handle plus the receiving end of its update channel.
pub(crate) struct ActiveRun {
    pub handle: RunHandle,
    pub rx: mpsc::Receiver<RunMessage>,
}

struct ChannelReporter {
    tx: mpsc::Sender<RunMessage>,
}

impl PhaseReporter for ChannelReporter {
    fn report(&self, phase_progress: u32, message: Option<&str>) {
        let _ = self.tx.send(RunMessage::Phase {
            phase_progress,
            message: message.map(str::to_string),
        });
    }
}

/// Spawn the worker thread for one run.
pub(crate) fn spawn_run(
    run_id: RunId,
    image: UploadedImage,
    pipeline: Arc<dyn AnalysisPipeline>,
    config: SequencerConfig,
) -> Result<ActiveRun> {
    let (tx, rx) = mpsc::channel();
    let (signal, cancel) = CancelToken::new();

    std::thread::Builder::new()
        .name(format!("medvis-{run_id}"))
        .spawn(move || worker_main(run_id, image, pipeline, config, cancel, tx))?;

    Ok(ActiveRun {
        handle: RunHandle { run_id, signal },
        rx,
    })
}

fn worker_main(
    run_id: RunId,
    image: UploadedImage,
    pipeline: Arc<dyn AnalysisPipeline>,
    config: SequencerConfig,
    cancel: CancelToken,
    tx: mpsc::Sender<RunMessage>,
) {
    match drive(&image, pipeline.as_ref(), &config, &cancel, &tx) {
        Err(MedvisError::Cancelled) => debug!(run = %run_id, "worker stopped"),
        outcome => {
            let _ = tx.send(RunMessage::Finished(outcome));
        }
    }
}

fn send(tx: &mpsc::Sender<RunMessage>, msg: RunMessage) -> Result<()> {
    // A dropped receiver means the run was superseded.
    tx.send(msg).map_err(|_| MedvisError::Cancelled)
}

fn drive(
    image: &UploadedImage,
    pipeline: &dyn AnalysisPipeline,
    config: &SequencerConfig,
    cancel: &CancelToken,
    tx: &mpsc::Sender<RunMessage>,
) -> Result<DerivedImage> {
    let mut uploaded = 0;
    while uploaded < 100 {
        cancel.sleep(config.upload_tick())?;
        uploaded = (uploaded + config.upload_increment).min(100);
        send(tx, RunMessage::Upload {
            phase_progress: uploaded,
        })?;
    }

    send(tx, RunMessage::ProcessingStarted)?;
    let reporter = ChannelReporter { tx: tx.clone() };
    pipeline.run(image, &reporter, cancel)
}
