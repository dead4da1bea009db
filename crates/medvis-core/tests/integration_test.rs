mod common;

use tempfile::TempDir;

use medvis_core::config::MedvisConfig;
use medvis_core::io::image_io::{decode_rgba, probe_dimensions};
use medvis_core::run::ProcessingStatus;
use medvis_core::sequencer::Sequencer;
use medvis_core::upload::SelectedFile;
use medvis_core::viewport::{ContainerRect, Point, PointerButton, Viewport};

use common::{fast_config, png_bytes, UPDATE_TIMEOUT};

/// Full flow as the binaries drive it: config from TOML, file from disk,
/// headless run, viewport over the result, PNG written back out.
#[test]
fn test_full_flow_from_disk() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("knee.png");
    std::fs::write(&input, png_bytes(96, 72)).unwrap();

    let config_path = dir.path().join("medvis.toml");
    std::fs::write(&config_path, fast_config().to_toml().unwrap()).unwrap();
    let config = MedvisConfig::load(&config_path).unwrap();
    assert_eq!(config.pipeline.overlay.seed, Some(42));

    let mut seq = Sequencer::scripted(&config).unwrap();
    let file = SelectedFile::from_path(&input).unwrap();
    assert_eq!(file.mime, "image/png");
    seq.submit(file).unwrap();
    assert_eq!(seq.wait_terminal(UPDATE_TIMEOUT), ProcessingStatus::Success);
    assert_eq!(seq.progress(), 100);

    let mut viewport = Viewport::new();
    assert!(!viewport.show_slider());
    viewport.set_has_derived(seq.derived().is_some());
    assert!(viewport.show_slider());

    let container = ContainerRect::new(0.0, 0.0, 800.0, 600.0);
    assert!(viewport.slider_pointer_down());
    viewport.pointer_moved(Point::new(200.0, 300.0), container);
    viewport.pointer_up();
    let clip = viewport.reveal_clip(container).unwrap();
    assert_eq!(clip.width, 200.0);

    viewport.pointer_down(Point::new(10.0, 10.0), PointerButton::Primary);
    viewport.pointer_moved(Point::new(15.0, 12.0), container);
    viewport.pointer_up();
    assert_eq!(viewport.state().pan, Point::new(5.0, 2.0));

    let output = dir.path().join("derived.png");
    let derived = seq.derived().unwrap();
    derived.save_png(&output).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(probe_dimensions(&bytes).unwrap(), (96, 72));
    assert_eq!(&decode_rgba(&bytes).unwrap(), derived.image());

    seq.reset();
    viewport.set_has_derived(seq.derived().is_some());
    assert!(!viewport.show_derived_layer());
    assert_eq!(seq.status(), ProcessingStatus::Idle);
}
