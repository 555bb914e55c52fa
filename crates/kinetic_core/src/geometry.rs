//! Geometry value types shared by every motion controller
//!
//! All coordinates are CSS-style pixels with the origin at the top-left of
//! the viewport and y growing downwards.

use serde::{Deserialize, Serialize};

/// 2D vector (also used for points and per-axis factors)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Vec2) -> f32 {
        (*self - other).length()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// 2D rectangle as reported by a host (viewport-relative)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Axis-aligned bounds of a container.
///
/// Always built through [`ContainerBounds::from_rect`] or
/// [`ContainerBounds::viewport`], so `right == left + width` and
/// `bottom == top + height` hold by construction. Bounds are recomputed,
/// never mutated in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ContainerBounds {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ContainerBounds {
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            top: rect.y,
            left: rect.x,
            width: rect.width,
            height: rect.height,
            right: rect.x + rect.width,
            bottom: rect.y + rect.height,
        }
    }

    /// Bounds of the whole viewport
    pub fn viewport(size: Size) -> Self {
        Self::from_rect(Rect::new(0.0, 0.0, size.width, size.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_edges_derived_from_rect() {
        let bounds = ContainerBounds::from_rect(Rect::new(10.0, 20.0, 300.0, 150.0));
        assert_eq!(bounds.left, 10.0);
        assert_eq!(bounds.top, 20.0);
        assert_eq!(bounds.right, bounds.left + bounds.width);
        assert_eq!(bounds.bottom, bounds.top + bounds.height);
    }

    #[test]
    fn test_viewport_bounds() {
        let bounds = ContainerBounds::viewport(Size::new(1280.0, 720.0));
        assert_eq!(
            bounds,
            ContainerBounds {
                top: 0.0,
                left: 0.0,
                width: 1280.0,
                height: 720.0,
                right: 1280.0,
                bottom: 720.0,
            }
        );
    }

    #[test]
    fn test_vector_ops() {
        let a = Vec2::new(3.0, 4.0);
        assert_eq!(a.length(), 5.0);
        assert_eq!(a.distance(Vec2::ZERO), 5.0);
        assert_eq!(a - Vec2::ONE, Vec2::new(2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(6.0, 8.0));
        assert_eq!(Rect::new(0.0, 0.0, 10.0, 20.0).center(), Vec2::new(5.0, 10.0));
    }
}
