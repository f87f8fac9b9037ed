//! Property-based invariant tests for container slots and alignment.
//!
//! 1. Slot bookkeeping survives any sequence of adds and removes.
//! 2. Aligned content sits where its alignment mode says.
//! 3. Horizontal and vertical containers partition their content exactly.
//! 4. Table slots map row-major onto the grid.

use glam::Vec2;
use proptest::prelude::*;
use slotframe_core::{Alignment, EngineConfig};
use slotframe_layout::{ElementId, ElementTree};

const EPSILON: f32 = 1e-2;

#[derive(Debug, Clone)]
enum SlotOp {
    Add(usize),
    AddLowest,
    Remove(usize),
    Resize(usize),
}

fn slot_op_strategy() -> impl Strategy<Value = SlotOp> {
    prop_oneof![
        (0usize..12).prop_map(SlotOp::Add),
        Just(SlotOp::AddLowest),
        (0usize..12).prop_map(SlotOp::Remove),
        (0usize..12).prop_map(SlotOp::Resize),
    ]
}

fn align_x_strategy() -> impl Strategy<Value = Alignment> {
    prop_oneof![
        Just(Alignment::None),
        Just(Alignment::Left),
        Just(Alignment::Right),
        Just(Alignment::Center),
    ]
}

fn align_y_strategy() -> impl Strategy<Value = Alignment> {
    prop_oneof![
        Just(Alignment::None),
        Just(Alignment::Top),
        Just(Alignment::Bottom),
        Just(Alignment::Center),
    ]
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON * (1.0 + a.abs().max(b.abs()) / 1000.0)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Slot bookkeeping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bookkeeping_matches_model(ops in prop::collection::vec(slot_op_strategy(), 0..60)) {
        let mut tree = ElementTree::new().with_config(EngineConfig::strict());
        let container = tree.create_horizontal("row");
        tree.set_content_size(container, 240.0, 40.0).unwrap();
        let mut model: Vec<Option<ElementId>> = Vec::new();

        for op in ops {
            match op {
                SlotOp::Add(index) => {
                    let leaf = tree.create_leaf("leaf");
                    let evicted = tree.add_element_at(container, leaf, index).unwrap();
                    if index >= model.len() {
                        model.resize(index + 1, None);
                    }
                    prop_assert_eq!(evicted, model[index]);
                    model[index] = Some(leaf);
                }
                SlotOp::AddLowest => {
                    let leaf = tree.create_leaf("leaf");
                    tree.add_element(container, leaf).unwrap();
                    let index = model.iter().position(Option::is_none).unwrap_or(model.len());
                    if index == model.len() {
                        model.push(None);
                    }
                    model[index] = Some(leaf);
                }
                SlotOp::Remove(index) => {
                    let removed = tree.remove_element_at(container, index).unwrap();
                    let expected = model.get_mut(index).and_then(Option::take);
                    prop_assert_eq!(removed, expected);
                }
                SlotOp::Resize(size) => {
                    let evicted = tree.set_size(container, size).unwrap();
                    let expected: Vec<ElementId> = if size < model.len() {
                        model.drain(size..).flatten().collect()
                    } else {
                        model.resize(size, None);
                        Vec::new()
                    };
                    prop_assert_eq!(evicted, expected);
                }
            }

            let layout = tree.container(container).unwrap();
            prop_assert_eq!(layout.slots(), model.as_slice());
            prop_assert_eq!(layout.element_count(), model.iter().flatten().count());
            prop_assert_eq!(
                layout.lowest_empty_slot(),
                model.iter().position(Option::is_none).unwrap_or(model.len())
            );
            prop_assert_eq!(layout.highest_full_slot(), model.iter().rposition(Option::is_some));
            prop_assert!(tree.verify_container(container).unwrap());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Alignment
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn aligned_content_respects_mode(
        slot in (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..400.0, 0.0f32..400.0),
        content in (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..400.0, 0.0f32..400.0),
        align_x in align_x_strategy(),
        align_y in align_y_strategy(),
    ) {
        let mut tree = ElementTree::new();
        let leaf = tree.create_leaf("leaf");
        tree.set_content_position(leaf, content.0, content.1).unwrap();
        tree.set_content_size(leaf, content.2, content.3).unwrap();
        tree.set_slot_position(leaf, slot.0, slot.1).unwrap();
        tree.set_slot_size(leaf, slot.2, slot.3).unwrap();
        tree.align_to(leaf, align_x, align_y).unwrap();

        let element = tree.get(leaf).unwrap();
        let (s, c) = (element.slot(), element.content());
        match align_x {
            Alignment::Left => prop_assert!(close(c.x(), s.x())),
            Alignment::Right => prop_assert!(close(c.right(), s.right())),
            Alignment::Center => prop_assert!(close(c.x() - s.x(), s.right() - c.right())),
            _ => prop_assert_eq!(c.x(), content.0),
        }
        match align_y {
            Alignment::Top => prop_assert!(close(c.y(), s.y())),
            Alignment::Bottom => prop_assert!(close(c.bottom(), s.bottom())),
            Alignment::Center => prop_assert!(close(c.y() - s.y(), s.bottom() - c.bottom())),
            _ => prop_assert_eq!(c.y(), content.1),
        }
        prop_assert_eq!(c.size, Vec2::new(content.2, content.3));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Horizontal / vertical partition
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn horizontal_partitions_width(count in 1usize..12, width in 1.0f32..2000.0, height in 0.0f32..500.0) {
        let mut tree = ElementTree::new();
        let row = tree.create_horizontal("row");
        tree.set_content_size(row, width, height).unwrap();
        let leaves: Vec<ElementId> = (0..count)
            .map(|_| {
                let leaf = tree.create_leaf("leaf");
                tree.add_element(row, leaf).unwrap();
                leaf
            })
            .collect();

        let mut total = 0.0;
        for (i, leaf) in leaves.iter().enumerate() {
            let slot = tree.get(*leaf).unwrap().slot();
            prop_assert!(close(slot.x(), i as f32 * width / count as f32));
            prop_assert_eq!(slot.height(), height);
            total += slot.width();
        }
        prop_assert!(close(total, width));
    }

    #[test]
    fn vertical_partitions_height(count in 1usize..12, width in 0.0f32..500.0, height in 1.0f32..2000.0) {
        let mut tree = ElementTree::new();
        let column = tree.create_vertical("column");
        tree.set_content_size(column, width, height).unwrap();
        tree.set_size(column, count).unwrap();
        let leaves: Vec<ElementId> = (0..count)
            .map(|_| {
                let leaf = tree.create_leaf("leaf");
                tree.add_element(column, leaf).unwrap();
                leaf
            })
            .collect();

        let mut total = 0.0;
        for (i, leaf) in leaves.iter().enumerate() {
            let slot = tree.get(*leaf).unwrap().slot();
            prop_assert!(close(slot.y(), i as f32 * height / count as f32));
            prop_assert_eq!(slot.width(), width);
            total += slot.height();
        }
        prop_assert!(close(total, height));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Table mapping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn table_maps_row_major(rows in 1usize..6, columns in 1usize..6, fill in prop::collection::vec(any::<bool>(), 36)) {
        let mut tree = ElementTree::new();
        let table = tree.create_table("grid", rows, columns);
        tree.set_content_size(table, 600.0, 300.0).unwrap();
        for index in 0..rows * columns {
            if fill[index] {
                let leaf = tree.create_leaf("cell");
                tree.add_element_at(table, leaf, index).unwrap();
            }
        }

        let layout = tree.container(table).unwrap();
        prop_assert_eq!(layout.size(), rows * columns);
        let cell_width = 600.0 / columns as f32;
        let cell_height = 300.0 / rows as f32;
        for row in 0..rows {
            for column in 0..columns {
                let index = row * columns + column;
                prop_assert_eq!(layout.element_at_cell(row, column), layout.element_at(index));
                if let Some(leaf) = layout.element_at(index) {
                    let slot = tree.get(leaf).unwrap().slot();
                    prop_assert!(close(slot.x(), column as f32 * cell_width));
                    prop_assert!(close(slot.y(), row as f32 * cell_height));
                }
            }
        }
    }
}
