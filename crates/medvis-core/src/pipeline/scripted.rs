use ab_glyph::FontArc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::error::{MedvisError, Result};
use crate::upload::UploadedImage;

use super::config::ScriptedConfig;
use super::overlay::derive_image;
use super::types::{AnalysisPipeline, CancelToken, DerivedImage, PhaseReporter};

/// Label face used unless the overlay style names another font.
const DEFAULT_LABEL_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Mock analysis: a fixed, timed script of progress steps followed by a
/// synthetic overlay render. Stands in for a real backend call.
pub struct ScriptedPipeline {
    config: ScriptedConfig,
    font: FontArc,
}

impl ScriptedPipeline {
    pub fn new(config: ScriptedConfig) -> Result<Self> {
        config.validate()?;
        let font = match config.overlay.label_font {
            Some(ref path) => {
                let data = std::fs::read(path)?;
                FontArc::try_from_vec(data).map_err(|e| {
                    MedvisError::Config(format!("invalid label font {}: {e}", path.display()))
                })?
            }
            None => FontArc::try_from_slice(DEFAULT_LABEL_FONT)
                .map_err(|e| MedvisError::Config(format!("invalid bundled label font: {e}")))?,
        };
        Ok(Self { config, font })
    }

    fn rng(&self) -> StdRng {
        match self.config.overlay.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl AnalysisPipeline for ScriptedPipeline {
    fn name(&self) -> &str {
        "scripted"
    }

    fn run(
        &self,
        image: &UploadedImage,
        reporter: &dyn PhaseReporter,
        cancel: &CancelToken,
    ) -> Result<DerivedImage> {
        let steps = self.config.steps;
        for step in 1..=steps {
            cancel.sleep(self.config.step_interval())?;
            reporter.report(
                self.config.progress_at(step),
                self.config.checkpoint_message(step),
            );
        }
        debug!(image = %image.id(), steps, "scripted steps complete");

        cancel.sleep(self.config.finalize_delay())?;
        cancel.check()?;

        let mut rng = self.rng();
        derive_image(image, &self.config.overlay, Some(&self.font), &mut rng)
    }
}
