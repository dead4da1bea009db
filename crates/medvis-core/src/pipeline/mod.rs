pub mod config;
mod overlay;
mod scripted;
mod types;

pub use overlay::{derive_image, place_findings, render_findings, Finding};
pub use scripted::ScriptedPipeline;
pub use types::{
    AnalysisPipeline, CancelSignal, CancelToken, DerivedImage, NoOpReporter, PhaseReporter,
};
