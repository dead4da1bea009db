#![allow(dead_code)]

use std::io::Cursor;
use std::time::Duration;

use image::{ImageFormat, Rgba, RgbaImage};

use medvis_core::config::MedvisConfig;
use medvis_core::upload::SelectedFile;

/// Generous per-update wait for tests; runs use millisecond ticks.
pub const UPDATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Encode a solid-colour RGBA image as PNG bytes.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([40, 80, 120, 255]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).expect("encode png");
    buf.into_inner()
}

pub fn png_file(width: u32, height: u32) -> SelectedFile {
    SelectedFile::new("scan.png", "image/png", png_bytes(width, height))
}

/// Default script with every delay cut to a millisecond and a fixed seed.
pub fn fast_config() -> MedvisConfig {
    let mut config = MedvisConfig::default().fast();
    config.pipeline.overlay.seed = Some(42);
    config
}

/// Same as [`fast_config`] but slow enough that a test can act mid-run.
pub fn slow_config() -> MedvisConfig {
    let mut config = fast_config();
    config.sequencer.upload_tick_ms = 20;
    config.pipeline.step_interval_ms = 20;
    config.pipeline.finalize_delay_ms = 20;
    config
}
