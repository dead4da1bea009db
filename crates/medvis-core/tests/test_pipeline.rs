mod common;

use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use common::{fast_config, png_file};
use medvis_core::error::MedvisError;
use medvis_core::pipeline::config::ScriptedConfig;
use medvis_core::pipeline::{
    derive_image, AnalysisPipeline, CancelToken, NoOpReporter, PhaseReporter, ScriptedPipeline,
};
use medvis_core::upload::{UploadPolicy, UploadedImage};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct RecordingReporter {
    updates: Mutex<Vec<(u32, Option<String>)>>,
}

impl PhaseReporter for RecordingReporter {
    fn report(&self, phase_progress: u32, message: Option<&str>) {
        self.updates
            .lock()
            .unwrap()
            .push((phase_progress, message.map(str::to_string)));
    }
}

fn upload(width: u32, height: u32) -> UploadedImage {
    UploadedImage::accept(png_file(width, height), &UploadPolicy::default()).unwrap()
}

fn fast_script() -> ScriptedConfig {
    fast_config().pipeline
}

#[test]
fn test_scripted_reports_every_step() {
    let pipeline = ScriptedPipeline::new(fast_script()).unwrap();
    let reporter = RecordingReporter::default();
    let (_signal, token) = CancelToken::new();

    let derived = pipeline.run(&upload(20, 10), &reporter, &token).unwrap();
    assert_eq!(derived.dimensions(), (20, 10));

    let updates = reporter.updates.into_inner().unwrap();
    let progress: Vec<u32> = updates.iter().map(|(p, _)| *p).collect();
    assert_eq!(progress, (1..=10).map(|i| i * 10).collect::<Vec<_>>());

    let messages: Vec<(u32, &str)> = updates
        .iter()
        .filter_map(|(p, m)| m.as_deref().map(|m| (*p, m)))
        .collect();
    assert_eq!(
        messages,
        vec![
            (30, "Detecting structures..."),
            (50, "Segmenting regions of interest..."),
            (80, "Identifying anomalies..."),
        ]
    );
}

#[test]
fn test_dropping_signal_cancels_run_promptly() {
    let mut script = fast_script();
    script.step_interval_ms = 10_000;
    let pipeline = ScriptedPipeline::new(script).unwrap();
    let image = upload(8, 8);
    let (signal, token) = CancelToken::new();

    let started = Instant::now();
    let worker = thread::spawn(move || pipeline.run(&image, &NoOpReporter, &token));
    thread::sleep(Duration::from_millis(20));
    signal.cancel();

    let result = worker.join().unwrap();
    assert!(matches!(result, Err(MedvisError::Cancelled)));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_cancel_token_reports_state() {
    let (signal, token) = CancelToken::new();
    assert!(!token.is_cancelled());
    assert!(token.sleep(Duration::from_millis(1)).is_ok());
    drop(signal);
    assert!(token.is_cancelled());
    assert!(matches!(
        token.sleep(Duration::from_secs(60)),
        Err(MedvisError::Cancelled)
    ));
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let script = fast_script();
    let image = upload(40, 40);
    let a = derive_image(&image, &script.overlay, None, &mut StdRng::seed_from_u64(5)).unwrap();
    let b = derive_image(&image, &script.overlay, None, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(a.findings(), b.findings());
    assert_eq!(a.image(), b.image());
}

#[test]
fn test_derived_differs_from_source_but_keeps_size() {
    let image = upload(120, 90);
    let source = medvis_core::io::image_io::decode_rgba(image.bytes()).unwrap();
    let derived = derive_image(
        &image,
        &fast_script().overlay,
        None,
        &mut StdRng::seed_from_u64(1),
    )
    .unwrap();

    assert_eq!(derived.dimensions(), source.dimensions());
    assert_ne!(derived.image(), &source);
    for f in derived.findings() {
        let (x, y) = f.center;
        assert!((12.0..=108.0).contains(&x));
        assert!((9.0..=81.0).contains(&y));
    }
}

#[test]
fn test_undecodable_upload_fails_with_decode_error() {
    let file = medvis_core::upload::SelectedFile::new("x.png", "image/png", vec![1, 2, 3]);
    let image = UploadedImage::accept(file, &UploadPolicy::default()).unwrap();
    let err = derive_image(
        &image,
        &fast_script().overlay,
        None,
        &mut StdRng::seed_from_u64(1),
    )
    .unwrap_err();
    assert!(matches!(err, MedvisError::DecodeFailure(_)));
}

#[test]
fn test_missing_label_font_fails_construction() {
    let mut script = fast_script();
    script.overlay.label_font = Some(PathBuf::from("/no/such/font.ttf"));
    assert!(matches!(
        ScriptedPipeline::new(script),
        Err(MedvisError::Io(_))
    ));
}

#[test]
fn test_garbage_label_font_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("font.ttf");
    std::fs::write(&path, b"not a font").unwrap();

    let mut script = fast_script();
    script.overlay.label_font = Some(path);
    assert!(matches!(
        ScriptedPipeline::new(script),
        Err(MedvisError::Config(_))
    ));
}

#[test]
fn test_invalid_script_is_rejected() {
    let script = ScriptedConfig {
        steps: 0,
        ..ScriptedConfig::default()
    };
    assert!(ScriptedPipeline::new(script).is_err());
    assert_eq!(
        ScriptedPipeline::new(ScriptedConfig::default()).unwrap().name(),
        "scripted"
    );
}

#[test]
fn test_default_config_writes_label_text() {
    let mut script = fast_script();
    script.overlay.min_findings = 1;
    script.overlay.max_findings = 1;
    script.overlay.fill = [255, 0, 0, 0];
    script.overlay.outline = [255, 255, 255, 0];
    // Keep the label inside the canvas.
    script.overlay.min_radius = 20.0;
    script.overlay.max_radius = 20.0;
    script.overlay.margin = 0.4;
    assert!(script.overlay.label_font.is_none());

    let pipeline = ScriptedPipeline::new(script).unwrap();
    let (_signal, token) = CancelToken::new();
    let image = upload(160, 160);
    let derived = pipeline.run(&image, &NoOpReporter, &token).unwrap();

    // Only the label can change pixels; it must be white text over the
    // (40, 80, 120) background.
    let source = medvis_core::io::image_io::decode_rgba(image.bytes()).unwrap();
    assert_ne!(derived.image(), &source);
    let bright = derived
        .image()
        .pixels()
        .filter(|p| p[0] > 200 && p[1] > 200 && p[2] > 200)
        .count();
    assert!(bright > 10, "expected white glyph pixels, got {bright}");
}
