// crates/slotframe-layout/src/arrangement.rs
use slotframe_core::Rect;

/// Strategy a container uses to hand out slot rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arrangement {
    /// Slots are placed by hand; the container never touches them.
    #[default]
    Free,
    /// Equal-width columns spanning the full content height.
    Horizontal,
    /// Equal-height rows spanning the full content width.
    Vertical,
    /// Row-major grid. Size is always `rows * columns`.
    Table { rows: usize, columns: usize },
}

impl Arrangement {
    /// Bounds of slot `index` out of `count` inside `content`.
    ///
    /// `None` means "leave the current bounds alone": free layouts, and any
    /// arrangement that would otherwise divide by zero.
    pub fn slot_bounds(&self, content: Rect, index: usize, count: usize) -> Option<Rect> {
        match *self {
            Arrangement::Free => None,
            Arrangement::Horizontal => {
                if count == 0 {
                    return None;
                }
                let width = content.size.x / count as f32;
                Some(Rect::new(
                    content.position.x + index as f32 * width,
                    content.position.y,
                    width,
                    content.size.y,
                ))
            }
            Arrangement::Vertical => {
                if count == 0 {
                    return None;
                }
                let height = content.size.y / count as f32;
                Some(Rect::new(
                    content.position.x,
                    content.position.y + index as f32 * height,
                    content.size.x,
                    height,
                ))
            }
            Arrangement::Table { rows, columns } => {
                if rows == 0 || columns == 0 {
                    return None;
                }
                let width = content.size.x / columns as f32;
                let height = content.size.y / rows as f32;
                let row = index / columns;
                let column = index % columns;
                Some(Rect::new(
                    content.position.x + column as f32 * width,
                    content.position.y + row as f32 * height,
                    width,
                    height,
                ))
            }
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Arrangement::Table { .. })
    }

    /// Number of slots a table arrangement dictates. `None` for other
    /// arrangements and for grids whose cell count overflows `usize`.
    pub fn table_size(&self) -> Option<usize> {
        match *self {
            Arrangement::Table { rows, columns } => rows.checked_mul(columns),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Arrangement::Free => "free",
            Arrangement::Horizontal => "horizontal",
            Arrangement::Vertical => "vertical",
            Arrangement::Table { .. } => "table",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_columns() {
        let content = Rect::new(0.0, 0.0, 200.0, 100.0);
        let arrangement = Arrangement::Horizontal;
        assert_eq!(
            arrangement.slot_bounds(content, 0, 2),
            Some(Rect::new(0.0, 0.0, 100.0, 100.0))
        );
        assert_eq!(
            arrangement.slot_bounds(content, 1, 2),
            Some(Rect::new(100.0, 0.0, 100.0, 100.0))
        );
    }

    #[test]
    fn test_vertical_rows() {
        let content = Rect::new(10.0, 20.0, 300.0, 400.0);
        assert_eq!(
            Arrangement::Vertical.slot_bounds(content, 2, 4),
            Some(Rect::new(10.0, 220.0, 300.0, 100.0))
        );
    }

    #[test]
    fn test_table_cells() {
        let content = Rect::new(0.0, 0.0, 300.0, 200.0);
        let table = Arrangement::Table { rows: 2, columns: 3 };
        // index 4 -> row 1, column 1
        assert_eq!(
            table.slot_bounds(content, 4, 6),
            Some(Rect::new(100.0, 100.0, 100.0, 100.0))
        );
        assert_eq!(table.table_size(), Some(6));
        assert_eq!(
            Arrangement::Table { rows: usize::MAX, columns: 2 }.table_size(),
            None
        );
    }

    #[test]
    fn test_zero_divisors_short_circuit() {
        let content = Rect::new(0.0, 0.0, 300.0, 200.0);
        assert_eq!(Arrangement::Horizontal.slot_bounds(content, 0, 0), None);
        assert_eq!(Arrangement::Vertical.slot_bounds(content, 0, 0), None);
        assert_eq!(
            Arrangement::Table { rows: 0, columns: 3 }.slot_bounds(content, 0, 0),
            None
        );
        assert_eq!(Arrangement::Free.slot_bounds(content, 0, 5), None);
    }
}
