//! Rectangles, bounds checks and aiming.

use glam::Vec2;

use crate::consts::{HEIGHT, WIDTH};

/// Axis-aligned rectangle stored as a center point plus half-extents.
///
/// Every entity owns one; it is used both for draw placement and collision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Rect {
            center,
            half: size / 2.0,
        }
    }

    pub fn from_center(x: f32, y: f32, (w, h): (f32, f32)) -> Self {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    /// The whole visible area.
    pub fn screen() -> Self {
        Rect::from_center(WIDTH / 2.0, HEIGHT / 2.0, (WIDTH, HEIGHT))
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }

    pub fn size(&self) -> Vec2 {
        self.half * 2.0
    }

    /// Returns a copy moved by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Rect {
            center: self.center + delta,
            half: self.half,
        }
    }

    /// Strict overlap test: rectangles that merely share an edge do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Per-axis containment in the visible area: `(horizontal, vertical)`.
///
/// An axis is `true` only when the rectangle lies entirely inside
/// `[0, WIDTH]` (resp. `[0, HEIGHT]`).
pub fn within_bounds(rect: &Rect) -> (bool, bool) {
    let horizontal = rect.left() >= 0.0 && rect.right() <= WIDTH;
    let vertical = rect.top() >= 0.0 && rect.bottom() <= HEIGHT;
    (horizontal, vertical)
}

/// Convenience for the common "fully on screen" check.
pub fn on_screen(rect: &Rect) -> bool {
    within_bounds(rect) == (true, true)
}

/// Unit vector from the center of `origin` to the center of `target`.
///
/// Coincident centers have no direction; the result then falls back to
/// straight down `(0, 1)` so a shot still falls off the screen.
pub fn direction_to(origin: &Rect, target: &Rect) -> Vec2 {
    (target.center - origin.center)
        .try_normalize()
        .unwrap_or(Vec2::Y)
}
