use approx::assert_relative_eq;

use medvis_core::viewport::{
    ContainerRect, DragSession, Point, PointerButton, Transition, Viewport, ViewportState,
};

const CONTAINER: ContainerRect = ContainerRect::new(100.0, 50.0, 400.0, 300.0);

fn with_derived() -> Viewport {
    let mut vp = Viewport::new();
    vp.set_has_derived(true);
    vp
}

// ---------------------------------------------------------------------------
// Zoom
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_steps_by_twenty() {
    let mut vp = Viewport::new();
    vp.zoom_in();
    assert_relative_eq!(vp.state().zoom, 120.0);
    vp.zoom_out();
    vp.zoom_out();
    assert_relative_eq!(vp.state().zoom, 80.0);
}

#[test]
fn test_zoom_in_saturates_at_400() {
    let mut vp = Viewport::new();
    for _ in 0..25 {
        vp.zoom_in();
    }
    assert_relative_eq!(vp.state().zoom, 400.0);
}

#[test]
fn test_zoom_out_saturates_at_10() {
    let mut vp = Viewport::new();
    for _ in 0..25 {
        vp.zoom_out();
    }
    assert_relative_eq!(vp.state().zoom, 10.0);
}

#[test]
fn test_set_zoom_clamps_and_ignores_nan() {
    let mut vp = Viewport::new();
    vp.set_zoom(1000.0);
    assert_relative_eq!(vp.state().zoom, 400.0);
    vp.set_zoom(-5.0);
    assert_relative_eq!(vp.state().zoom, 10.0);
    vp.set_zoom(f32::NAN);
    assert_relative_eq!(vp.state().zoom, 10.0);
    vp.set_zoom(155.0);
    assert_relative_eq!(vp.state().zoom, 155.0);
}

// ---------------------------------------------------------------------------
// Rotation
// ---------------------------------------------------------------------------

#[test]
fn test_rotation_stays_normalized() {
    let mut vp = Viewport::new();
    vp.rotate_left();
    assert_eq!(vp.state().rotation, 270);
    vp.rotate_left();
    assert_eq!(vp.state().rotation, 180);
    for _ in 0..7 {
        vp.rotate_right();
        assert!([0, 90, 180, 270].contains(&vp.state().rotation));
    }
}

#[test]
fn test_four_right_rotations_return_home_with_zero_pan() {
    let mut vp = Viewport::new();
    vp.pointer_down(Point::new(10.0, 10.0), PointerButton::Primary);
    vp.pointer_moved(Point::new(40.0, 30.0), CONTAINER);
    vp.pointer_up();
    assert_eq!(vp.state().pan, Point::new(30.0, 20.0));

    for _ in 0..4 {
        vp.rotate_right();
    }
    assert_eq!(vp.state().rotation, 0);
    assert_eq!(vp.state().pan, Point::ZERO);
}

// ---------------------------------------------------------------------------
// Pan
// ---------------------------------------------------------------------------

#[test]
fn test_pan_follows_pointer_from_existing_offset() {
    let mut vp = Viewport::new();
    assert!(vp.pointer_down(Point::new(0.0, 0.0), PointerButton::Primary));
    vp.pointer_moved(Point::new(15.0, -5.0), CONTAINER);
    vp.pointer_up();

    assert!(vp.pointer_down(Point::new(200.0, 200.0), PointerButton::Primary));
    vp.pointer_moved(Point::new(210.0, 190.0), CONTAINER);
    assert_eq!(vp.state().pan, Point::new(25.0, -15.0));

    // Far outside the container: still tracked.
    vp.pointer_moved(Point::new(-900.0, 2000.0), CONTAINER);
    assert_eq!(vp.state().pan, Point::new(-1085.0, 1795.0));
    vp.pointer_up();

    vp.pointer_moved(Point::new(0.0, 0.0), CONTAINER);
    assert_eq!(vp.state().pan, Point::new(-1085.0, 1795.0));
}

#[test]
fn test_only_primary_button_pans() {
    let mut vp = Viewport::new();
    assert!(!vp.pointer_down(Point::ZERO, PointerButton::Secondary));
    assert!(!vp.pointer_down(Point::ZERO, PointerButton::Middle));
    assert!(vp.drag_session().is_none());
    vp.pointer_moved(Point::new(50.0, 50.0), CONTAINER);
    assert_eq!(vp.state().pan, Point::ZERO);
}

#[test]
fn test_transition_is_instant_while_panning() {
    let mut vp = Viewport::new();
    assert!(matches!(vp.transition(), Transition::Ease(d) if d.as_millis() == 200));
    vp.pointer_down(Point::ZERO, PointerButton::Primary);
    assert_eq!(vp.transition(), Transition::None);
    vp.pointer_up();
    assert_eq!(vp.transition().duration().as_millis(), 200);
}

// ---------------------------------------------------------------------------
// Reveal slider
// ---------------------------------------------------------------------------

#[test]
fn test_slider_tracks_pointer_and_clamps() {
    let mut vp = with_derived();
    assert!(vp.slider_pointer_down());
    vp.pointer_moved(Point::new(200.0, 10.0), CONTAINER);
    assert_relative_eq!(vp.state().slider_position, 25.0);
    vp.pointer_moved(Point::new(5000.0, 10.0), CONTAINER);
    assert_relative_eq!(vp.state().slider_position, 100.0);
    vp.pointer_moved(Point::new(-20.0, 10.0), CONTAINER);
    assert_relative_eq!(vp.state().slider_position, 0.0);
    vp.pointer_up();
    assert!(vp.drag_session().is_none());
}

#[test]
fn test_slider_drag_never_pans() {
    let mut vp = with_derived();
    assert!(vp.slider_pointer_down());
    assert!(!vp.pointer_down(Point::new(300.0, 100.0), PointerButton::Primary));
    vp.pointer_moved(Point::new(400.0, 120.0), CONTAINER);

    assert_eq!(vp.drag_session(), Some(&DragSession::Slider));
    assert_eq!(vp.state().pan, Point::ZERO);
    assert_relative_eq!(vp.state().slider_position, 75.0);
}

#[test]
fn test_pan_blocks_slider_press() {
    let mut vp = with_derived();
    vp.pointer_down(Point::ZERO, PointerButton::Primary);
    assert!(!vp.slider_pointer_down());
    assert!(vp.is_panning());
}

#[test]
fn test_reveal_clip_spans_left_edge_to_slider() {
    let mut vp = with_derived();
    let clip = vp.reveal_clip(CONTAINER).unwrap();
    assert_relative_eq!(clip.left, 100.0);
    assert_relative_eq!(clip.width, 200.0);
    assert_relative_eq!(clip.height, 300.0);
    assert_relative_eq!(vp.slider_x(CONTAINER), 300.0);

    vp.toggle_derived_layer();
    assert!(vp.reveal_clip(CONTAINER).is_none());
}

// ---------------------------------------------------------------------------
// Derived layer
// ---------------------------------------------------------------------------

#[test]
fn test_without_derived_slider_and_toggle_are_noops() {
    let mut vp = Viewport::new();
    assert!(!vp.show_slider());
    assert!(!vp.show_derived_layer());
    assert!(!vp.slider_pointer_down());
    assert!(vp.toggle_derived_layer());
    assert_eq!(vp.state(), &ViewportState::default());
}

#[test]
fn test_toggle_preserves_slider_position() {
    let mut vp = with_derived();
    vp.slider_pointer_down();
    vp.pointer_moved(Point::new(180.0, 0.0), CONTAINER);
    vp.pointer_up();

    assert!(!vp.toggle_derived_layer());
    assert!(!vp.show_derived_layer());
    assert!(vp.show_slider());
    assert_relative_eq!(vp.state().slider_position, 20.0);

    assert!(vp.toggle_derived_layer());
    assert_relative_eq!(vp.state().slider_position, 20.0);
}

#[test]
fn test_losing_derived_ends_slider_drag() {
    let mut vp = with_derived();
    vp.slider_pointer_down();
    vp.set_has_derived(false);
    assert!(vp.drag_session().is_none());
}

// ---------------------------------------------------------------------------
// Reset and transform
// ---------------------------------------------------------------------------

#[test]
fn test_reset_view_keeps_slider_and_visibility() {
    let mut vp = with_derived();
    vp.zoom_in();
    vp.rotate_right();
    vp.pointer_down(Point::ZERO, PointerButton::Primary);
    vp.pointer_moved(Point::new(12.0, 34.0), CONTAINER);
    vp.pointer_up();
    vp.slider_pointer_down();
    vp.pointer_moved(Point::new(140.0, 0.0), CONTAINER);
    vp.pointer_up();
    vp.toggle_derived_layer();

    vp.reset_view();
    let state = vp.state();
    assert_relative_eq!(state.zoom, 100.0);
    assert_eq!(state.rotation, 0);
    assert_eq!(state.pan, Point::ZERO);
    assert_relative_eq!(state.slider_position, 10.0);
    assert!(!state.derived_layer_visible);
}

#[test]
fn test_transform_rotates_scales_then_translates() {
    let mut vp = Viewport::new();
    vp.zoom_in();
    vp.zoom_in();
    vp.zoom_in();
    vp.zoom_in();
    vp.zoom_in(); // 200%
    vp.rotate_right();
    vp.pointer_down(Point::ZERO, PointerButton::Primary);
    vp.pointer_moved(Point::new(10.0, 0.0), CONTAINER);
    vp.pointer_up();

    let t = vp.transform();
    assert_relative_eq!(t.scale, 2.0);
    assert_eq!(t.rotation_deg, 90);
    let p = t.apply(Point::new(1.0, 0.0));
    assert_relative_eq!(p.x, 10.0, epsilon = 1e-5);
    assert_relative_eq!(p.y, 2.0, epsilon = 1e-5);
}
