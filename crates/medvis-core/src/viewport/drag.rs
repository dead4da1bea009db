use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A position or offset in container (screen) pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// An in-progress pointer gesture. At most one exists at a time.
///
/// Opened on pointer-down over its target; while open, pointer motion and
/// release are tracked for the whole window, not just the element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragSession {
    /// Image pan. `origin` is pointer position minus pan at press time.
    Pan { origin: Point },
    /// Reveal slider.
    Slider,
}

impl DragSession {
    pub fn is_pan(&self) -> bool {
        matches!(self, Self::Pan { .. })
    }

    pub fn is_slider(&self) -> bool {
        matches!(self, Self::Slider)
    }
}
