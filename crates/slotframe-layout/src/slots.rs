// crates/slotframe-layout/src/slots.rs
//! Container slot operations on [`ElementTree`].

use slotframe_core::{resolve_default, Alignment, Axis, ElementId, LayoutError, Result};
use tracing::debug;

use crate::{Arrangement, Element, ElementTree};

impl ElementTree {
    /// Adds `element` to the lowest empty slot of `container`.
    ///
    /// An elastic container that is full grows by one slot.
    pub fn add_element(&mut self, container: ElementId, element: ElementId) -> Result<Option<ElementId>> {
        let index = self.container(container)?.lowest_empty_slot();
        self.add_element_at(container, element, index)
    }

    /// Adds `element` at slot `index`.
    ///
    /// The element takes the container's default alignment (`Keep` leaves an
    /// axis alone) and the bounds of its slot. A container being added also
    /// inherits both defaults verbatim, so a `Keep` axis stops forcing its own
    /// children too. If the slot was occupied, the previous
    /// occupant is unlinked and returned.
    pub fn add_element_at(
        &mut self,
        container: ElementId,
        element: ElementId,
        index: usize,
    ) -> Result<Option<ElementId>> {
        let (size, elastic) = {
            let layout = self.container(container)?;
            (layout.size(), layout.elastic)
        };
        let child = self.get(element)?;
        if element == container || self.is_ancestor(element, container) {
            return Err(LayoutError::CyclicInsertion(element));
        }
        if child.parent.is_some() {
            self.config
                .report_rejection(&format!("element {} already has a parent", element));
            return Err(LayoutError::AlreadyParented(element));
        }
        if index >= size && !elastic {
            self.config
                .report_rejection(&format!("slot {} on container {} of size {}", index, container, size));
            return Err(LayoutError::SlotOutOfRange { index, size });
        }

        if index >= size {
            let grown = index
                .checked_add(1)
                .ok_or(LayoutError::SlotOutOfRange { index, size })?;
            debug!("Growing container {} from {} to {} slots", container, size, grown);
            self.container_mut(container)?.resize(grown);
            self.relayout_children(container)?;
        }

        let evicted = self.container_mut(container)?.place(index, element);
        if let Some(previous) = evicted {
            debug!("Evicting element {} from slot {} of container {}", previous, index, container);
            self.unlink(previous)?;
        }

        self.apply_default_alignment(container, element)?;
        let child = self.get_mut(element)?;
        child.parent = Some(container);
        child.slot_index = Some(index);
        self.place_in_slot(container, index, element)?;

        debug!("Added element {} to slot {} of container {}", element, index, container);
        self.check_container(container);
        Ok(evicted)
    }

    fn apply_default_alignment(&mut self, container: ElementId, element: ElementId) -> Result<()> {
        let (default_x, default_y) = {
            let layout = self.container(container)?;
            (layout.default_align_x, layout.default_align_y)
        };
        let child = self.get_mut(element)?;
        child.align_x = resolve_default(child.align_x, default_x, Axis::Horizontal);
        child.align_y = resolve_default(child.align_y, default_y, Axis::Vertical);
        // A nested container takes the defaults as they are, `Keep` included.
        if let Some(nested) = child.as_container_mut() {
            nested.default_align_x = default_x;
            nested.default_align_y = default_y;
        }
        Ok(())
    }

    pub(crate) fn unlink(&mut self, id: ElementId) -> Result<()> {
        let element = self.get_mut(id)?;
        element.parent = None;
        element.slot_index = None;
        Ok(())
    }

    /// Puts `child` into `index` without touching its geometry or alignment.
    pub(crate) fn link(&mut self, container: ElementId, index: usize, child: ElementId) -> Result<()> {
        let layout = self.container_mut(container)?;
        if index >= layout.size() {
            let grown = index.checked_add(1).ok_or(LayoutError::SlotOutOfRange {
                index,
                size: layout.size(),
            })?;
            layout.resize(grown);
        }
        if let Some(previous) = layout.place(index, child) {
            self.unlink(previous)?;
        }
        let element = self.get_mut(child)?;
        element.parent = Some(container);
        element.slot_index = Some(index);
        Ok(())
    }

    /// Empties slot `index` and returns its former occupant, which becomes a
    /// root. Empty or out-of-range slots yield `None`.
    pub fn remove_element_at(&mut self, container: ElementId, index: usize) -> Result<Option<ElementId>> {
        let removed = self.container_mut(container)?.take(index);
        match removed {
            Some(id) => {
                self.unlink(id)?;
                debug!("Removed element {} from slot {} of container {}", id, index, container);
                self.check_container(container);
            }
            None => self
                .config
                .report_rejection(&format!("removal of empty slot {} on container {}", index, container)),
        }
        Ok(removed)
    }

    /// Removes `element` from whichever container directly holds it, provided
    /// that container is `container` or one of its descendants.
    pub fn remove_element(&mut self, container: ElementId, element: ElementId) -> Result<ElementId> {
        self.container(container)?;
        let child = self.get(element)?;
        let (parent, index) = match (child.parent, child.slot_index) {
            (Some(parent), Some(index)) if self.is_ancestor(container, element) => (parent, index),
            _ => return Err(LayoutError::NotInContainer { element, container }),
        };
        self.remove_element_at(parent, index)?;
        Ok(element)
    }

    /// Changes the slot count, keeping occupants at their indices. Occupants
    /// of dropped slots are unlinked and returned.
    ///
    /// Tables are sized through [`ElementTree::set_table_size`]; calling this on
    /// one changes nothing.
    pub fn set_size(&mut self, container: ElementId, size: usize) -> Result<Vec<ElementId>> {
        if self.container(container)?.arrangement.is_table() {
            self.config
                .report_rejection(&format!("set_size on table {}", container));
            return Ok(Vec::new());
        }
        self.resize_slots(container, size)
    }

    fn resize_slots(&mut self, container: ElementId, size: usize) -> Result<Vec<ElementId>> {
        let evicted = self.container_mut(container)?.resize(size);
        for &id in &evicted {
            self.unlink(id)?;
        }
        if !evicted.is_empty() {
            debug!("Shrinking container {} evicted {:?}", container, evicted);
        }
        self.relayout_children(container)?;
        self.check_container(container);
        Ok(evicted)
    }

    /// Tables are never elastic; calling this on one changes nothing.
    pub fn set_elasticity(&mut self, container: ElementId, elastic: bool) -> Result<()> {
        let layout = self.container_mut(container)?;
        if layout.arrangement.is_table() {
            self.config
                .report_rejection(&format!("set_elasticity on table {}", container));
            return Ok(());
        }
        layout.elastic = elastic;
        Ok(())
    }

    pub fn set_default_alignment(&mut self, container: ElementId, align_x: Alignment, align_y: Alignment) -> Result<()> {
        self.set_default_alignment_x(container, align_x)?;
        self.set_default_alignment_y(container, align_y)
    }

    pub fn set_default_alignment_x(&mut self, container: ElementId, align_x: Alignment) -> Result<()> {
        let layout = self.container_mut(container)?;
        if align_x.is_valid_default_for(Axis::Horizontal) {
            layout.default_align_x = align_x;
        } else {
            self.config
                .report_rejection(&format!("default alignment {:?} on X", align_x));
        }
        Ok(())
    }

    pub fn set_default_alignment_y(&mut self, container: ElementId, align_y: Alignment) -> Result<()> {
        let layout = self.container_mut(container)?;
        if align_y.is_valid_default_for(Axis::Vertical) {
            layout.default_align_y = align_y;
        } else {
            self.config
                .report_rejection(&format!("default alignment {:?} on Y", align_y));
        }
        Ok(())
    }

    /// Depth-first search below `container` in ascending slot order.
    pub fn find_by_id(&self, container: ElementId, target: ElementId) -> Result<Option<ElementId>> {
        self.find_below(container, &|element| element.id == target)
    }

    /// First element below `container` carrying `name`, depth first.
    pub fn find_by_name(&self, container: ElementId, name: &str) -> Result<Option<ElementId>> {
        self.find_below(container, &|element| element.name == name)
    }

    fn find_below(
        &self,
        container: ElementId,
        matches: &dyn Fn(&Element) -> bool,
    ) -> Result<Option<ElementId>> {
        for (_, child) in self.container(container)?.children() {
            let element = self.get(child)?;
            if matches(element) {
                return Ok(Some(child));
            }
            if element.is_container() {
                if let Some(found) = self.find_below(child, matches)? {
                    return Ok(Some(found));
                }
            }
        }
        Ok(None)
    }

    // Tables

    fn table_dimensions(&self, table: ElementId) -> Result<(usize, usize)> {
        match self.container(table)?.arrangement {
            Arrangement::Table { rows, columns } => Ok((rows, columns)),
            _ => Err(LayoutError::NotATable(table)),
        }
    }

    /// Resizes a table to `rows * columns` slots. Occupants keep their flat
    /// index, so changing the column count reflows them across rows.
    pub fn set_table_size(&mut self, table: ElementId, rows: usize, columns: usize) -> Result<Vec<ElementId>> {
        self.table_dimensions(table)?;
        let arrangement = Arrangement::Table { rows, columns };
        let size = arrangement
            .table_size()
            .ok_or(LayoutError::TableTooLarge { rows, columns })?;
        self.container_mut(table)?.arrangement = arrangement;
        debug!("Table {} is now {}x{}", table, rows, columns);
        self.resize_slots(table, size)
    }

    pub fn set_rows(&mut self, table: ElementId, rows: usize) -> Result<Vec<ElementId>> {
        let (_, columns) = self.table_dimensions(table)?;
        self.set_table_size(table, rows, columns)
    }

    pub fn set_columns(&mut self, table: ElementId, columns: usize) -> Result<Vec<ElementId>> {
        let (rows, _) = self.table_dimensions(table)?;
        self.set_table_size(table, rows, columns)
    }

    fn cell(&self, table: ElementId, row: usize, column: usize) -> Result<usize> {
        let (_, columns) = self.table_dimensions(table)?;
        let layout = self.container(table)?;
        layout.cell_index(row, column).ok_or(LayoutError::SlotOutOfRange {
            index: row.saturating_mul(columns).saturating_add(column),
            size: layout.size(),
        })
    }

    pub fn add_element_at_cell(
        &mut self,
        table: ElementId,
        element: ElementId,
        row: usize,
        column: usize,
    ) -> Result<Option<ElementId>> {
        let index = self.cell(table, row, column)?;
        self.add_element_at(table, element, index)
    }

    pub fn remove_element_at_cell(&mut self, table: ElementId, row: usize, column: usize) -> Result<Option<ElementId>> {
        let index = self.cell(table, row, column)?;
        self.remove_element_at(table, index)
    }

    /// Removes the occupant of `index` and deletes it. Its children become
    /// roots. Returns whether anything was deleted.
    pub fn delete_element_at(&mut self, container: ElementId, index: usize) -> Result<bool> {
        match self.remove_element_at(container, index)? {
            Some(id) => {
                self.delete(id)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes the occupant of `index` and deletes its whole subtree. Returns
    /// the number of elements deleted.
    pub fn recursive_delete_element_at(&mut self, container: ElementId, index: usize) -> Result<usize> {
        match self.remove_element_at(container, index)? {
            Some(id) => self.recursive_delete(id),
            None => Ok(0),
        }
    }
}
