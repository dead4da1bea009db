//! Comparison viewport state: shared pan / zoom / rotation for the original
//! and derived layers, plus the reveal slider and derived-layer toggle.
//!
//! Everything here is synchronous; the presentation layer renders from
//! [`Viewport::transform`] after each call.

mod drag;
mod transform;

pub use drag::{DragSession, Point, PointerButton};
pub use transform::{ClipRect, ContainerRect, Transform, Transition};

use crate::consts::{
    DEFAULT_SLIDER_PERCENT, DEFAULT_ZOOM_PERCENT, MAX_ZOOM_PERCENT, MIN_ZOOM_PERCENT,
    ROTATION_STEP_DEG, TRANSFORM_EASE, ZOOM_STEP_PERCENT,
};

#[derive(Clone, Debug, PartialEq)]
pub struct ViewportState {
    /// Percent, within [10, 400].
    pub zoom: f32,
    /// Degrees, one of 0, 90, 180, 270.
    pub rotation: u16,
    pub pan: Point,
    /// Percent of the container width, within [0, 100].
    pub slider_position: f32,
    pub derived_layer_visible: bool,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM_PERCENT,
            rotation: 0,
            pan: Point::ZERO,
            slider_position: DEFAULT_SLIDER_PERCENT,
            derived_layer_visible: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Viewport {
    state: ViewportState,
    has_derived: bool,
    drag: Option<DragSession>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_panning(&self) -> bool {
        self.drag.as_ref().is_some_and(DragSession::is_pan)
    }

    pub fn is_dragging_slider(&self) -> bool {
        self.drag.as_ref().is_some_and(DragSession::is_slider)
    }

    pub fn has_derived(&self) -> bool {
        self.has_derived
    }

    /// Tell the viewport whether a derived image is available. Losing it
    /// ends a slider drag; slider position and visibility are kept.
    pub fn set_has_derived(&mut self, has_derived: bool) {
        self.has_derived = has_derived;
        if !has_derived && self.is_dragging_slider() {
            self.drag = None;
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.state.zoom + ZOOM_STEP_PERCENT);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.state.zoom - ZOOM_STEP_PERCENT);
    }

    /// Continuous zoom input, clamped to [10, 400]. Non-finite input is ignored.
    pub fn set_zoom(&mut self, percent: f32) {
        if percent.is_finite() {
            self.state.zoom = percent.clamp(MIN_ZOOM_PERCENT, MAX_ZOOM_PERCENT);
        }
    }

    pub fn rotate_left(&mut self) {
        self.set_rotation(self.state.rotation + 360 - ROTATION_STEP_DEG);
    }

    pub fn rotate_right(&mut self) {
        self.set_rotation(self.state.rotation + ROTATION_STEP_DEG);
    }

    // Rotating about a stale pan offset is disorienting, so pan restarts at zero.
    fn set_rotation(&mut self, degrees: u16) {
        self.state.rotation = degrees % 360;
        self.state.pan = Point::ZERO;
    }

    /// Pointer pressed over the image area. Opens a pan session for the
    /// primary button when no other session is open.
    pub fn pointer_down(&mut self, pos: Point, button: PointerButton) -> bool {
        if button != PointerButton::Primary || self.drag.is_some() {
            return false;
        }
        self.drag = Some(DragSession::Pan {
            origin: pos - self.state.pan,
        });
        true
    }

    /// Pointer pressed on the slider handle. The press is consumed here and
    /// never starts a pan.
    pub fn slider_pointer_down(&mut self) -> bool {
        if !self.has_derived || self.drag.is_some() {
            return false;
        }
        self.drag = Some(DragSession::Slider);
        true
    }

    /// Pointer moved anywhere in the window. The most recent position wins.
    pub fn pointer_moved(&mut self, pos: Point, container: ContainerRect) {
        match self.drag {
            Some(DragSession::Pan { origin }) => self.state.pan = pos - origin,
            Some(DragSession::Slider) => {
                self.state.slider_position = container.percent_x(pos.x);
            }
            None => {}
        }
    }

    /// Pointer released anywhere in the window.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// No-op without a derived image. Returns the new visibility.
    pub fn toggle_derived_layer(&mut self) -> bool {
        if self.has_derived {
            self.state.derived_layer_visible = !self.state.derived_layer_visible;
        }
        self.state.derived_layer_visible
    }

    /// Zoom, rotation and pan back to defaults. Slider and visibility stay.
    pub fn reset_view(&mut self) {
        self.state.zoom = DEFAULT_ZOOM_PERCENT;
        self.state.rotation = 0;
        self.state.pan = Point::ZERO;
    }

    pub fn show_derived_layer(&self) -> bool {
        self.has_derived && self.state.derived_layer_visible
    }

    pub fn show_slider(&self) -> bool {
        self.has_derived
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translate: self.state.pan,
            scale: self.state.zoom / 100.0,
            rotation_deg: self.state.rotation,
        }
    }

    pub fn transition(&self) -> Transition {
        if self.is_panning() {
            Transition::None
        } else {
            Transition::Ease(TRANSFORM_EASE)
        }
    }

    /// Part of the container where the derived layer shows: from the left
    /// edge to the slider. `None` when the layer is hidden.
    pub fn reveal_clip(&self, container: ContainerRect) -> Option<ClipRect> {
        if !self.show_derived_layer() {
            return None;
        }
        Some(ContainerRect::new(
            container.left,
            container.top,
            container.width * self.state.slider_position / 100.0,
            container.height,
        ))
    }

    /// Screen x of the slider handle.
    pub fn slider_x(&self, container: ContainerRect) -> f32 {
        container.left + container.width * self.state.slider_position / 100.0
    }
}
