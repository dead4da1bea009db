use std::time::Duration;

/// MIME prefix every accepted upload must start with.
pub const ACCEPTED_TYPE_PREFIX: &str = "image/";

/// Default upload size limit in megabytes.
pub const DEFAULT_MAX_UPLOAD_MB: u32 = 10;

/// Bytes per megabyte used for the upload size limit.
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Interval between simulated upload progress ticks.
pub const DEFAULT_UPLOAD_TICK_MS: u64 = 200;

/// Phase progress added per upload tick.
pub const DEFAULT_UPLOAD_INCREMENT: u32 = 10;

/// Number of equal steps in the scripted processing phase.
pub const DEFAULT_PROCESSING_STEPS: u32 = 10;

/// Interval between scripted processing steps.
pub const DEFAULT_STEP_INTERVAL_MS: u64 = 300;

/// Pause after the last processing step before the result is rendered.
pub const DEFAULT_FINALIZE_DELAY_MS: u64 = 500;

/// Share of the overall run progress covered by the upload phase.
/// The processing phase covers the remainder.
pub const UPLOAD_PHASE_SHARE: u32 = 50;

/// Fewest anomalies stamped on a derived image.
pub const DEFAULT_MIN_FINDINGS: u32 = 2;

/// Most anomalies stamped on a derived image (inclusive).
pub const DEFAULT_MAX_FINDINGS: u32 = 4;

/// Smallest anomaly radius in pixels.
pub const DEFAULT_MIN_RADIUS: f32 = 20.0;

/// Largest anomaly radius in pixels (exclusive).
pub const DEFAULT_MAX_RADIUS: f32 = 60.0;

/// Fraction of each axis excluded on both sides when placing anomaly centres.
pub const DEFAULT_PLACEMENT_MARGIN: f32 = 0.1;

/// Translucent red fill, rgba(255, 0, 0, 0.3).
pub const DEFAULT_FILL_RGBA: [u8; 4] = [255, 0, 0, 77];

/// Near-opaque white outline, rgba(255, 255, 255, 0.8).
pub const DEFAULT_OUTLINE_RGBA: [u8; 4] = [255, 255, 255, 204];

/// Outline stroke width in pixels.
pub const DEFAULT_OUTLINE_WIDTH: u32 = 2;

/// Label text stamped next to every anomaly.
pub const DEFAULT_FINDING_LABEL: &str = "Anomaly";

/// Label font size in pixels.
pub const LABEL_FONT_PX: f32 = 12.0;

/// Label anchor offset from the circle centre (x) and from its top (y).
pub const LABEL_OFFSET_X: f32 = 25.0;
pub const LABEL_OFFSET_Y: f32 = 5.0;

/// Largest canvas edge the renderer will allocate.
pub const MAX_CANVAS_DIMENSION: u32 = 16_384;

/// Viewport zoom bounds and step, in percent.
pub const MIN_ZOOM_PERCENT: f32 = 10.0;
pub const MAX_ZOOM_PERCENT: f32 = 400.0;
pub const DEFAULT_ZOOM_PERCENT: f32 = 100.0;
pub const ZOOM_STEP_PERCENT: f32 = 20.0;

/// Rotation step in degrees.
pub const ROTATION_STEP_DEG: u16 = 90;

/// Initial reveal slider position, in percent of the container width.
pub const DEFAULT_SLIDER_PERCENT: f32 = 50.0;

/// Duration of eased, non-drag transform changes.
pub const TRANSFORM_EASE: Duration = Duration::from_millis(200);

pub const MSG_PREPARING: &str = "Preparing image...";
pub const MSG_ANALYZING: &str = "Analyzing image...";
pub const MSG_SUCCESS: &str = "Image processed successfully";
pub const MSG_FAILURE: &str = "Failed to process image. Please try again.";
