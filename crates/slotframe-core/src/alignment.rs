// crates/slotframe-core/src/alignment.rs
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rect;

/// How content is placed inside its slot on one axis.
///
/// A single enum covers both axes so setters can receive any value and
/// silently drop the ones that make no sense for the axis (`Top` on X, `Left`
/// on Y). `Keep` is only meaningful as a container default alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Right,
    Top,
    Bottom,
    Center,
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Alignment {
    /// Valid element alignment on the X axis.
    pub fn is_horizontal(self) -> bool {
        matches!(
            self,
            Alignment::None | Alignment::Left | Alignment::Right | Alignment::Center
        )
    }

    /// Valid element alignment on the Y axis.
    pub fn is_vertical(self) -> bool {
        matches!(
            self,
            Alignment::None | Alignment::Top | Alignment::Bottom | Alignment::Center
        )
    }

    pub fn is_valid_for(self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.is_horizontal(),
            Axis::Vertical => self.is_vertical(),
        }
    }

    /// Valid container default alignment: any element alignment plus `Keep`.
    pub fn is_valid_default_for(self, axis: Axis) -> bool {
        self == Alignment::Keep || self.is_valid_for(axis)
    }

    /// Leading edge of the axis (`Left` or `Top`).
    pub fn is_start(self) -> bool {
        matches!(self, Alignment::Left | Alignment::Top)
    }

    /// Trailing edge of the axis (`Right` or `Bottom`).
    pub fn is_end(self) -> bool {
        matches!(self, Alignment::Right | Alignment::Bottom)
    }
}

/// Alignment an element ends up with after a container forces `default` on it.
pub fn resolve_default(current: Alignment, default: Alignment, axis: Axis) -> Alignment {
    if default != Alignment::Keep && default.is_valid_for(axis) {
        default
    } else {
        current
    }
}

/// Position of content along one axis of its slot.
///
/// `None`, `Keep` and values that belong to the other axis leave `current`
/// untouched.
pub fn align_axis(
    axis: Axis,
    mode: Alignment,
    slot_start: f32,
    slot_len: f32,
    content_len: f32,
    current: f32,
) -> f32 {
    if !mode.is_valid_for(axis) {
        return current;
    }
    match mode {
        Alignment::Center => slot_start + (slot_len - content_len) / 2.0,
        m if m.is_start() => slot_start,
        m if m.is_end() => slot_start + slot_len - content_len,
        _ => current,
    }
}

/// The alignment algorithm: where content of the given rect lands inside `slot`.
pub fn aligned_position(slot: Rect, content: Rect, align_x: Alignment, align_y: Alignment) -> Vec2 {
    Vec2::new(
        align_axis(
            Axis::Horizontal,
            align_x,
            slot.position.x,
            slot.size.x,
            content.size.x,
            content.position.x,
        ),
        align_axis(
            Axis::Vertical,
            align_y,
            slot.position.y,
            slot.size.y,
            content.size.y,
            content.position.y,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_axis_validity() {
        assert!(Alignment::Left.is_horizontal());
        assert!(!Alignment::Top.is_horizontal());
        assert!(Alignment::Bottom.is_vertical());
        assert!(!Alignment::Right.is_vertical());
        assert!(!Alignment::Keep.is_horizontal());
        assert!(Alignment::Keep.is_valid_default_for(Axis::Vertical));
    }

    #[test]
    fn test_aligned_position_modes() {
        let slot = Rect::new(10.0, 20.0, 100.0, 50.0);
        let content = Rect::new(0.0, 0.0, 40.0, 10.0);

        let pos = aligned_position(slot, content, Alignment::Left, Alignment::Top);
        assert_eq!(pos, Vec2::new(10.0, 20.0));

        let pos = aligned_position(slot, content, Alignment::Right, Alignment::Bottom);
        assert_eq!(pos, Vec2::new(70.0, 60.0));

        let pos = aligned_position(slot, content, Alignment::Center, Alignment::Center);
        assert_eq!(pos, Vec2::new(40.0, 40.0));

        let pos = aligned_position(slot, content, Alignment::None, Alignment::None);
        assert_eq!(pos, Vec2::ZERO);
    }

    #[test]
    fn test_wrong_axis_modes_leave_position() {
        let slot = Rect::new(10.0, 20.0, 100.0, 50.0);
        let content = Rect::new(3.0, 4.0, 40.0, 10.0);
        let pos = aligned_position(slot, content, Alignment::Top, Alignment::Left);
        assert_eq!(pos, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_resolve_default() {
        assert_eq!(
            resolve_default(Alignment::Right, Alignment::Keep, Axis::Horizontal),
            Alignment::Right
        );
        assert_eq!(
            resolve_default(Alignment::Right, Alignment::Center, Axis::Horizontal),
            Alignment::Center
        );
        assert_eq!(
            resolve_default(Alignment::Top, Alignment::Left, Axis::Vertical),
            Alignment::Top
        );
    }

    proptest! {
        #[test]
        fn center_leaves_symmetric_margins(
            start in -500.0f32..500.0,
            slot_len in 0.0f32..500.0,
            content_len in 0.0f32..500.0,
        ) {
            let pos = align_axis(Axis::Horizontal, Alignment::Center, start, slot_len, content_len, 0.0);
            let leading = pos - start;
            let trailing = (start + slot_len) - (pos + content_len);
            prop_assert!((leading - trailing).abs() < 1e-3);
        }
    }
}
