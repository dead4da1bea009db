use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use image::RgbaImage;

use crate::error::{MedvisError, Result};
use crate::io::image_io::{encode_png, save_png};
use crate::upload::UploadedImage;

use super::overlay::Finding;

/// Rendered result of a successful run.
///
/// Same pixel dimensions as the decoded source. Cloning shares the raster.
#[derive(Clone, Debug)]
pub struct DerivedImage {
    image: Arc<RgbaImage>,
    findings: Arc<[Finding]>,
}

impl DerivedImage {
    pub fn new(image: RgbaImage, findings: Vec<Finding>) -> Self {
        Self {
            image: Arc::new(image),
            findings: findings.into(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Encode as an RGBA8 PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_png(&self.image)
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        save_png(&self.image, path)
    }
}

/// Receives phase progress from an [`AnalysisPipeline`].
///
/// Default implementations are no-ops.
pub trait PhaseReporter {
    /// `phase_progress` is in 0..=100. `message` replaces the advisory text
    /// when present.
    fn report(&self, _phase_progress: u32, _message: Option<&str>) {}
}

/// Reporter that discards every update.
pub struct NoOpReporter;
impl PhaseReporter for NoOpReporter {}

/// Processing strategy behind the sequencer.
///
/// The scripted mock and any real backend implement this same contract:
/// report progress while working, return the derived image or an error.
/// Implementations must return [`MedvisError::Cancelled`] promptly once
/// `cancel` fires.
pub trait AnalysisPipeline: Send + Sync {
    fn name(&self) -> &str;

    fn run(
        &self,
        image: &UploadedImage,
        reporter: &dyn PhaseReporter,
        cancel: &CancelToken,
    ) -> Result<DerivedImage>;
}

/// Owning side of a cancellation pair. Dropping it cancels.
#[derive(Debug)]
pub struct CancelSignal {
    _tx: mpsc::Sender<()>,
}

impl CancelSignal {
    pub fn cancel(self) {}
}

/// Worker side of a cancellation pair. All waits go through it.
#[derive(Debug)]
pub struct CancelToken {
    rx: mpsc::Receiver<()>,
}

impl CancelToken {
    pub fn new() -> (CancelSignal, CancelToken) {
        let (tx, rx) = mpsc::channel();
        (CancelSignal { _tx: tx }, CancelToken { rx })
    }

    /// Wait for `duration`, waking early with `Cancelled` once the signal is gone.
    pub fn sleep(&self, duration: Duration) -> Result<()> {
        match self.rx.recv_timeout(duration) {
            Err(RecvTimeoutError::Timeout) => Ok(()),
            Ok(()) | Err(RecvTimeoutError::Disconnected) => Err(MedvisError::Cancelled),
        }
    }

    pub fn check(&self) -> Result<()> {
        match self.rx.try_recv() {
            Err(TryRecvError::Empty) => Ok(()),
            Ok(()) | Err(TryRecvError::Disconnected) => Err(MedvisError::Cancelled),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.check().is_err()
    }
}
