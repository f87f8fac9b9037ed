// crates/slotframe-layout/src/container.rs
use slotframe_core::{Alignment, ElementId};

use crate::Arrangement;

/// Slot bookkeeping for an element that holds children.
///
/// Counts and the lowest/highest markers are maintained incrementally by
/// [`Container::place`] and [`Container::take`]; nothing here rescans the whole
/// slot array on a normal add or remove.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub(crate) slots: Vec<Option<ElementId>>,
    pub(crate) element_count: usize,
    pub(crate) lowest_empty_slot: usize,
    pub(crate) highest_full_slot: Option<usize>,
    pub(crate) elastic: bool,
    pub(crate) default_align_x: Alignment,
    pub(crate) default_align_y: Alignment,
    pub(crate) arrangement: Arrangement,
}

impl Container {
    pub(crate) fn new(arrangement: Arrangement) -> Self {
        let size = arrangement.table_size().unwrap_or(0);
        Self {
            slots: vec![None; size],
            element_count: 0,
            lowest_empty_slot: 0,
            highest_full_slot: None,
            elastic: !arrangement.is_table(),
            default_align_x: Alignment::Left,
            default_align_y: Alignment::Top,
            arrangement,
        }
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// First empty slot, or `size()` when every slot is occupied.
    pub fn lowest_empty_slot(&self) -> usize {
        self.lowest_empty_slot
    }

    /// Last occupied slot, `None` when the container is empty.
    pub fn highest_full_slot(&self) -> Option<usize> {
        self.highest_full_slot
    }

    pub fn is_elastic(&self) -> bool {
        self.elastic
    }

    pub fn default_alignment_x(&self) -> Alignment {
        self.default_align_x
    }

    pub fn default_alignment_y(&self) -> Alignment {
        self.default_align_y
    }

    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    pub fn is_empty(&self) -> bool {
        self.element_count == 0
    }

    pub fn is_slot_full(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    pub fn element_at(&self, index: usize) -> Option<ElementId> {
        self.slots.get(index).copied().flatten()
    }

    /// Raw slot array, empty slots included.
    pub fn slots(&self) -> &[Option<ElementId>] {
        &self.slots
    }

    /// Occupied slots in ascending slot order.
    pub fn children(&self) -> impl Iterator<Item = (usize, ElementId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|id| (index, id)))
    }

    pub fn child_ids(&self) -> Vec<ElementId> {
        self.children().map(|(_, id)| id).collect()
    }

    pub fn rows(&self) -> Option<usize> {
        match self.arrangement {
            Arrangement::Table { rows, .. } => Some(rows),
            _ => None,
        }
    }

    pub fn columns(&self) -> Option<usize> {
        match self.arrangement {
            Arrangement::Table { columns, .. } => Some(columns),
            _ => None,
        }
    }

    /// Flat slot index of a table cell. `None` outside the grid or for
    /// non-table containers.
    pub fn cell_index(&self, row: usize, column: usize) -> Option<usize> {
        match self.arrangement {
            Arrangement::Table { rows, columns } if row < rows && column < columns => {
                Some(row * columns + column)
            }
            _ => None,
        }
    }

    pub fn element_at_cell(&self, row: usize, column: usize) -> Option<ElementId> {
        self.cell_index(row, column)
            .and_then(|index| self.element_at(index))
    }

    pub fn is_cell_full(&self, row: usize, column: usize) -> bool {
        self.cell_index(row, column)
            .map(|index| self.is_slot_full(index))
            .unwrap_or(false)
    }

    /// Puts `id` into `index`, returning whatever occupied it. `index` must be
    /// inside the slot array.
    pub(crate) fn place(&mut self, index: usize, id: ElementId) -> Option<ElementId> {
        let previous = self.slots[index].replace(id);
        if previous.is_none() {
            self.element_count += 1;
        }
        if index == self.lowest_empty_slot {
            self.lowest_empty_slot = self.next_empty_from(index + 1);
        }
        if self.highest_full_slot.map_or(true, |highest| index > highest) {
            self.highest_full_slot = Some(index);
        }
        previous
    }

    /// Empties `index`, returning the occupant if there was one.
    pub(crate) fn take(&mut self, index: usize) -> Option<ElementId> {
        let removed = self.slots.get_mut(index)?.take()?;
        self.element_count -= 1;
        if index < self.lowest_empty_slot {
            self.lowest_empty_slot = index;
        }
        if self.highest_full_slot == Some(index) {
            self.highest_full_slot = self.last_full_from(index);
        }
        Some(removed)
    }

    /// Changes the slot count. Occupants past the new end are returned in slot
    /// order; the caller is responsible for unlinking them.
    pub(crate) fn resize(&mut self, size: usize) -> Vec<ElementId> {
        let old_size = self.slots.len();
        let evicted: Vec<ElementId> = if size < old_size {
            self.slots.drain(size..).flatten().collect()
        } else {
            self.slots.resize(size, None);
            Vec::new()
        };

        self.element_count -= evicted.len();
        if self.lowest_empty_slot > size || self.lowest_empty_slot == old_size {
            self.lowest_empty_slot = self.next_empty_from(self.lowest_empty_slot.min(size));
        }
        if let Some(highest) = self.highest_full_slot {
            if highest >= size {
                self.highest_full_slot = self.last_full_from(size);
            }
        }
        evicted
    }

    fn next_empty_from(&self, start: usize) -> usize {
        (start..self.slots.len())
            .find(|&i| self.slots[i].is_none())
            .unwrap_or(self.slots.len())
    }

    /// Highest occupied index strictly below `end`.
    fn last_full_from(&self, end: usize) -> Option<usize> {
        (0..end.min(self.slots.len()))
            .rev()
            .find(|&i| self.slots[i].is_some())
    }

    /// Recomputes the cached markers from scratch and compares.
    pub(crate) fn verify(&self) -> bool {
        let count = self.slots.iter().filter(|slot| slot.is_some()).count();
        let lowest = self.next_empty_from(0);
        let highest = self.last_full_from(self.slots.len());
        count == self.element_count
            && lowest == self.lowest_empty_slot
            && highest == self.highest_full_slot
    }
}
