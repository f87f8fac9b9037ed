// crates/slotframe-core/src/geometry.rs
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in layout space.
///
/// The size is never negative once it has been stored by an element; raw
/// rectangles built by callers are not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        position: Vec2::ZERO,
        size: Vec2::ZERO,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    /// Inclusive on all four edges.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + self.size.x
            && point.y >= self.position.y
            && point.y <= self.position.y + self.size.y
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() < other.position.x
            || other.right() < self.position.x
            || self.bottom() < other.position.y
            || other.bottom() < self.position.y)
    }

    /// Overlapping area of two rectangles, `None` when they only touch or miss.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.position.x.max(other.position.x);
        let top = self.position.y.max(other.position.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > left && bottom > top {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    pub fn min(&self) -> Vec2 {
        self.position
    }

    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    pub fn area(&self) -> f32 {
        self.size.x * self.size.y
    }
}

/// Applies a size request per axis, keeping the previous value on any axis
/// whose requested component is negative (or NaN).
pub fn accept_size(previous: Vec2, requested: Vec2) -> Vec2 {
    Vec2::new(
        if requested.x >= 0.0 { requested.x } else { previous.x },
        if requested.y >= 0.0 { requested.y } else { previous.y },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_is_inclusive() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!(rect.contains_point(Vec2::new(10.0, 20.0)));
        assert!(rect.contains_point(Vec2::new(40.0, 60.0)));
        assert!(rect.contains_point(Vec2::new(25.0, 30.0)));
        assert!(!rect.contains_point(Vec2::new(9.9, 30.0)));
        assert!(!rect.contains_point(Vec2::new(25.0, 60.1)));
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 50.0);
        let b = Rect::new(80.0, 10.0, 50.0, 50.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(80.0, 10.0, 20.0, 40.0)));

        let touching = Rect::new(100.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&touching));
        assert_eq!(a.intersection(&touching), None);
    }

    #[test]
    fn test_accept_size_ignores_negative_axes() {
        let previous = Vec2::new(5.0, 6.0);
        assert_eq!(accept_size(previous, Vec2::new(-1.0, 8.0)), Vec2::new(5.0, 8.0));
        assert_eq!(accept_size(previous, Vec2::new(3.0, -2.0)), Vec2::new(3.0, 6.0));
        assert_eq!(accept_size(previous, Vec2::new(f32::NAN, 0.0)), Vec2::new(5.0, 0.0));
    }
}
