use std::time::Duration;

use super::drag::Point;

/// Screen-space rectangle of the viewport container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ContainerRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Horizontal position of `x` as a percentage of the width, clamped to [0, 100].
    pub fn percent_x(&self, x: f32) -> f32 {
        if self.width <= 0.0 {
            return 0.0;
        }
        ((x - self.left) / self.width * 100.0).clamp(0.0, 100.0)
    }
}

/// Region of the container in which the derived layer is drawn.
pub type ClipRect = ContainerRect;

/// Affine transform shared by both layers, applied about the container centre:
/// rotate, then scale, then translate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate: Point,
    pub scale: f32,
    pub rotation_deg: u16,
}

impl Transform {
    pub fn rotation_radians(&self) -> f32 {
        (self.rotation_deg as f32).to_radians()
    }

    /// Map a point given relative to the image centre to a container offset
    /// from the centre.
    pub fn apply(&self, p: Point) -> Point {
        let (sin, cos) = self.rotation_radians().sin_cos();
        let rotated = Point::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos);
        Point::new(
            rotated.x * self.scale + self.translate.x,
            rotated.y * self.scale + self.translate.y,
        )
    }
}

/// How a transform change should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Apply at once; used while dragging so the image tracks the pointer.
    None,
    Ease(Duration),
}

impl Transition {
    pub fn duration(&self) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Ease(d) => *d,
        }
    }
}
