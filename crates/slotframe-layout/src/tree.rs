// crates/slotframe-layout/src/tree.rs
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use glam::Vec2;
use slotframe_core::{
    accept_size, aligned_position, Alignment, Axis, DrawTarget, ElementId, EngineConfig,
    IdAllocator, LayoutError, Rect, Result, Visual,
};
use tracing::{debug, trace};

use crate::{Arrangement, Container, Element, ElementKind, Event};

/// Arena owning every element of an interface.
///
/// Elements refer to each other by id. A container owns the children in its
/// slots; an element with no parent is a root. Every mutator recomputes the
/// geometry it affects before returning: moving or resizing a container's
/// content re-derives its slot bounds, and every slot change re-aligns the
/// content placed in it, all the way down.
#[derive(Debug)]
pub struct ElementTree {
    elements: HashMap<ElementId, Element>,
    ids: Arc<IdAllocator>,
    pub(crate) config: EngineConfig,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    pub fn new() -> Self {
        Self::with_allocator(Arc::new(IdAllocator::new()))
    }

    /// Shares an id allocator with other trees so ids never collide.
    pub fn with_allocator(ids: Arc<IdAllocator>) -> Self {
        Self {
            elements: HashMap::new(),
            ids,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn allocator(&self) -> &Arc<IdAllocator> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn get(&self, id: ElementId) -> Result<&Element> {
        self.elements.get(&id).ok_or(LayoutError::UnknownElement(id))
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.elements
            .get_mut(&id)
            .ok_or(LayoutError::UnknownElement(id))
    }

    pub fn container(&self, id: ElementId) -> Result<&Container> {
        self.get(id)?
            .as_container()
            .ok_or(LayoutError::NotAContainer(id))
    }

    pub(crate) fn container_mut(&mut self, id: ElementId) -> Result<&mut Container> {
        self.get_mut(id)?
            .as_container_mut()
            .ok_or(LayoutError::NotAContainer(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Elements without a parent, by ascending id.
    pub fn roots(&self) -> Vec<ElementId> {
        let mut roots: Vec<ElementId> = self
            .elements
            .values()
            .filter(|element| element.parent.is_none())
            .map(Element::id)
            .collect();
        roots.sort_unstable();
        roots
    }

    pub(crate) fn insert(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.insert(id, element);
        id
    }

    pub(crate) fn remove_from_arena(&mut self, id: ElementId) -> Option<Element> {
        self.elements.remove(&id)
    }

    pub(crate) fn next_id(&self) -> ElementId {
        self.ids.next_id()
    }

    // Creation

    pub fn create_leaf(&mut self, name: impl Into<String>) -> ElementId {
        let id = self.next_id();
        self.insert(Element::new(id, name, ElementKind::Leaf))
    }

    /// New container with no slots (or `rows * columns` for a table).
    ///
    /// Containers start elastic, except tables, with Left/Top default alignment.
    /// A table whose cell count overflows is created as an empty 0x0 grid.
    pub fn create_container(&mut self, name: impl Into<String>, mut arrangement: Arrangement) -> ElementId {
        let id = self.next_id();
        let name = name.into();
        if arrangement.is_table() && arrangement.table_size().is_none() {
            self.config
                .report_rejection(&format!("{:?} for container {}", arrangement, id));
            arrangement = Arrangement::Table { rows: 0, columns: 0 };
        }
        debug!("Creating {} container {} '{}'", arrangement.name(), id, name);
        self.insert(Element::new(
            id,
            name,
            ElementKind::Container(Container::new(arrangement)),
        ))
    }

    pub fn create_free(&mut self, name: impl Into<String>) -> ElementId {
        self.create_container(name, Arrangement::Free)
    }

    pub fn create_horizontal(&mut self, name: impl Into<String>) -> ElementId {
        self.create_container(name, Arrangement::Horizontal)
    }

    pub fn create_vertical(&mut self, name: impl Into<String>) -> ElementId {
        self.create_container(name, Arrangement::Vertical)
    }

    pub fn create_table(&mut self, name: impl Into<String>, rows: usize, columns: usize) -> ElementId {
        self.create_container(name, Arrangement::Table { rows, columns })
    }

    // Geometry

    /// Places content explicitly. No alignment runs; a container re-derives
    /// its slot bounds.
    pub fn set_content_position(&mut self, id: ElementId, x: f32, y: f32) -> Result<()> {
        let element = self.get_mut(id)?;
        element.content.position = Vec2::new(x, y);
        if element.is_container() {
            self.relayout_children(id)?;
        }
        Ok(())
    }

    /// Negative or NaN components are ignored per axis. No alignment runs.
    pub fn set_content_size(&mut self, id: ElementId, width: f32, height: f32) -> Result<()> {
        let requested = Vec2::new(width, height);
        let element = self.get_mut(id)?;
        let accepted = accept_size(element.content.size, requested);
        element.content.size = accepted;
        let is_container = element.is_container();
        if accepted != requested {
            self.config
                .report_rejection(&format!("content size {:?} on element {}", requested, id));
        }
        if is_container {
            self.relayout_children(id)?;
        }
        Ok(())
    }

    pub fn set_slot_position(&mut self, id: ElementId, x: f32, y: f32) -> Result<()> {
        self.get_mut(id)?.slot.position = Vec2::new(x, y);
        self.align(id)
    }

    /// Negative or NaN components are ignored per axis.
    pub fn set_slot_size(&mut self, id: ElementId, width: f32, height: f32) -> Result<()> {
        let requested = Vec2::new(width, height);
        let element = self.get_mut(id)?;
        let accepted = accept_size(element.slot.size, requested);
        element.slot.size = accepted;
        if accepted != requested {
            self.config
                .report_rejection(&format!("slot size {:?} on element {}", requested, id));
        }
        self.align(id)
    }

    /// Moves and resizes the slot in one step, aligning once.
    pub(crate) fn set_slot_bounds(&mut self, id: ElementId, bounds: Rect) -> Result<()> {
        let element = self.get_mut(id)?;
        element.slot.position = bounds.position;
        element.slot.size = accept_size(element.slot.size, bounds.size);
        self.align(id)
    }

    /// Copies the slot rect onto the content rect, bypassing alignment.
    pub fn match_content_to_slot(&mut self, id: ElementId) -> Result<()> {
        let element = self.get_mut(id)?;
        element.content = element.slot;
        if element.is_container() {
            self.relayout_children(id)?;
        }
        Ok(())
    }

    /// Copies the content rect onto the slot rect, bypassing alignment.
    pub fn match_slot_to_content(&mut self, id: ElementId) -> Result<()> {
        let element = self.get_mut(id)?;
        element.slot = element.content;
        Ok(())
    }

    // Alignment

    /// Sets both axes and re-aligns. Values invalid for an axis keep the
    /// previous alignment on that axis.
    pub fn set_alignment(&mut self, id: ElementId, align_x: Alignment, align_y: Alignment) -> Result<()> {
        self.store_alignment(id, align_x, Axis::Horizontal)?;
        self.store_alignment(id, align_y, Axis::Vertical)?;
        self.align(id)
    }

    pub fn set_alignment_x(&mut self, id: ElementId, align_x: Alignment) -> Result<()> {
        self.store_alignment(id, align_x, Axis::Horizontal)?;
        self.align(id)
    }

    pub fn set_alignment_y(&mut self, id: ElementId, align_y: Alignment) -> Result<()> {
        self.store_alignment(id, align_y, Axis::Vertical)?;
        self.align(id)
    }

    fn store_alignment(&mut self, id: ElementId, alignment: Alignment, axis: Axis) -> Result<()> {
        if !alignment.is_valid_for(axis) {
            self.get(id)?;
            self.config
                .report_rejection(&format!("{:?} alignment {:?} on element {}", axis, alignment, id));
            return Ok(());
        }
        let element = self.get_mut(id)?;
        match axis {
            Axis::Horizontal => element.align_x = alignment,
            Axis::Vertical => element.align_y = alignment,
        }
        Ok(())
    }

    /// Positions the content inside the slot according to the element's
    /// alignment. A container whose content moves re-derives its slots.
    pub fn align(&mut self, id: ElementId) -> Result<()> {
        let element = self.get_mut(id)?;
        let position = aligned_position(element.slot, element.content, element.align_x, element.align_y);
        if element.content.position == position {
            return Ok(());
        }
        element.content.position = position;
        trace!("Aligned element {} to {:?}", id, position);
        if element.is_container() {
            self.relayout_children(id)?;
        }
        Ok(())
    }

    /// `set_alignment` followed by `align`.
    pub fn align_to(&mut self, id: ElementId, align_x: Alignment, align_y: Alignment) -> Result<()> {
        self.set_alignment(id, align_x, align_y)
    }

    // Presentation

    pub fn set_name(&mut self, id: ElementId, name: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_depth(&mut self, id: ElementId, depth: i32) -> Result<()> {
        self.get_mut(id)?.depth = depth;
        Ok(())
    }

    pub fn set_visibility(&mut self, id: ElementId, visible: bool) -> Result<()> {
        self.get_mut(id)?.visible = visible;
        Ok(())
    }

    pub fn set_content_visibility(&mut self, id: ElementId, visible: bool) -> Result<()> {
        self.get_mut(id)?.content_visible = visible;
        Ok(())
    }

    pub fn set_background_visibility(&mut self, id: ElementId, visible: bool) -> Result<()> {
        self.get_mut(id)?.background_visible = visible;
        Ok(())
    }

    /// Content visual of a leaf. Containers draw their children instead and
    /// ignore it.
    pub fn set_visual(&mut self, id: ElementId, visual: Option<Visual>) -> Result<()> {
        self.get_mut(id)?.visual = visual;
        Ok(())
    }

    pub fn set_background(&mut self, id: ElementId, background: Option<Visual>) -> Result<()> {
        self.get_mut(id)?.background = background;
        Ok(())
    }

    pub fn set_draw_target(&mut self, id: ElementId, target: Option<DrawTarget>) -> Result<()> {
        self.get_mut(id)?.draw_target = target;
        Ok(())
    }

    // Events

    /// Attaches `event` under its own name, replacing any event of that name.
    pub fn insert_event(&mut self, id: ElementId, event: Rc<Event>) -> Result<Option<Rc<Event>>> {
        let element = self.get_mut(id)?;
        Ok(element.events.insert(event.name().to_string(), event))
    }

    pub fn remove_event(&mut self, id: ElementId, name: &str) -> Result<Option<Rc<Event>>> {
        Ok(self.get_mut(id)?.events.remove(name))
    }

    // Slot geometry

    /// Re-derives every occupied slot of a container from its content rect.
    pub(crate) fn relayout_children(&mut self, id: ElementId) -> Result<()> {
        let content = self.get(id)?.content;
        let container = self.container(id)?;
        let arrangement = container.arrangement;
        if arrangement == Arrangement::Free {
            return Ok(());
        }
        let count = container.size();
        let children: Vec<(usize, ElementId)> = container.children().collect();
        for (index, child) in children {
            if let Some(bounds) = arrangement.slot_bounds(content, index, count) {
                self.set_slot_bounds(child, bounds)?;
            }
        }
        Ok(())
    }

    /// Gives `child` the bounds of slot `index` of `container` and aligns it.
    /// Free containers leave the slot as it is.
    pub(crate) fn place_in_slot(&mut self, container: ElementId, index: usize, child: ElementId) -> Result<()> {
        let content = self.get(container)?.content;
        let layout = self.container(container)?;
        let bounds = layout.arrangement.slot_bounds(content, index, layout.size());
        match bounds {
            Some(bounds) => self.set_slot_bounds(child, bounds),
            None => self.align(child),
        }
    }

    /// Checks slot bookkeeping and parent links of a container.
    pub fn verify_container(&self, id: ElementId) -> Result<bool> {
        let container = self.container(id)?;
        let links_hold = container.children().all(|(index, child)| {
            self.elements
                .get(&child)
                .map(|element| element.parent == Some(id) && element.slot_index == Some(index))
                .unwrap_or(false)
        });
        Ok(container.verify() && links_hold)
    }

    pub(crate) fn check_container(&self, id: ElementId) {
        if self.config.check_invariants {
            debug_assert!(
                matches!(self.verify_container(id), Ok(true)),
                "slot bookkeeping broken on container {}",
                id
            );
        }
    }

    pub(crate) fn is_ancestor(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = self.elements.get(&id).and_then(|element| element.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.elements.get(&parent).and_then(|element| element.parent);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_unique_and_monotonic() {
        let mut tree = ElementTree::new();
        let a = tree.create_leaf("a");
        let b = tree.create_free("b");
        let c = tree.create_leaf("a");
        assert!(a < b && b < c);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.roots(), vec![a, b, c]);
    }

    #[test]
    fn test_shared_allocator_across_trees() {
        let ids = Arc::new(IdAllocator::new());
        let mut first = ElementTree::with_allocator(ids.clone());
        let mut second = ElementTree::with_allocator(ids);
        let a = first.create_leaf("a");
        let b = second.create_leaf("b");
        assert_ne!(a, b);
    }

    #[test]
    fn test_unknown_element() {
        let mut tree = ElementTree::new();
        assert_eq!(
            tree.set_depth(42, 1),
            Err(LayoutError::UnknownElement(42))
        );
        let leaf = tree.create_leaf("leaf");
        assert_eq!(tree.container(leaf).err(), Some(LayoutError::NotAContainer(leaf)));
    }

    #[test]
    fn test_negative_sizes_ignored_per_axis() {
        let mut tree = ElementTree::new();
        let leaf = tree.create_leaf("leaf");
        tree.set_content_size(leaf, 10.0, 20.0).unwrap();
        tree.set_content_size(leaf, -1.0, 5.0).unwrap();
        assert_eq!(tree.get(leaf).unwrap().content().size, Vec2::new(10.0, 5.0));

        tree.set_slot_size(leaf, 30.0, 40.0).unwrap();
        tree.set_slot_size(leaf, 12.0, -3.0).unwrap();
        assert_eq!(tree.get(leaf).unwrap().slot().size, Vec2::new(12.0, 40.0));
    }

    #[test]
    fn test_slot_changes_realign_content() {
        let mut tree = ElementTree::new();
        let leaf = tree.create_leaf("leaf");
        tree.set_content_size(leaf, 20.0, 10.0).unwrap();
        tree.set_alignment(leaf, Alignment::Right, Alignment::Center).unwrap();
        tree.set_slot_size(leaf, 100.0, 50.0).unwrap();
        assert_eq!(tree.get(leaf).unwrap().content().position, Vec2::new(80.0, 20.0));

        tree.set_slot_position(leaf, 10.0, 10.0).unwrap();
        assert_eq!(tree.get(leaf).unwrap().content().position, Vec2::new(90.0, 30.0));
    }

    #[test]
    fn test_content_changes_do_not_realign() {
        let mut tree = ElementTree::new();
        let leaf = tree.create_leaf("leaf");
        tree.set_alignment(leaf, Alignment::Left, Alignment::Top).unwrap();
        tree.set_slot_position(leaf, 50.0, 50.0).unwrap();
        tree.set_content_position(leaf, 3.0, 4.0).unwrap();
        tree.set_content_size(leaf, 10.0, 10.0).unwrap();
        assert_eq!(tree.get(leaf).unwrap().content().position, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_invalid_alignment_is_ignored() {
        let mut tree = ElementTree::new();
        let leaf = tree.create_leaf("leaf");
        tree.set_alignment(leaf, Alignment::Center, Alignment::Bottom).unwrap();
        tree.set_alignment(leaf, Alignment::Top, Alignment::Keep).unwrap();
        let element = tree.get(leaf).unwrap();
        assert_eq!(element.alignment_x(), Alignment::Center);
        assert_eq!(element.alignment_y(), Alignment::Bottom);

        tree.set_alignment_y(leaf, Alignment::Left).unwrap();
        assert_eq!(tree.get(leaf).unwrap().alignment_y(), Alignment::Bottom);
    }

    #[test]
    fn test_match_rects() {
        let mut tree = ElementTree::new();
        let leaf = tree.create_leaf("leaf");
        tree.set_slot_position(leaf, 5.0, 6.0).unwrap();
        tree.set_slot_size(leaf, 70.0, 80.0).unwrap();
        tree.match_content_to_slot(leaf).unwrap();
        assert_eq!(tree.get(leaf).unwrap().content(), Rect::new(5.0, 6.0, 70.0, 80.0));

        tree.set_content_position(leaf, 1.0, 2.0).unwrap();
        tree.match_slot_to_content(leaf).unwrap();
        assert_eq!(tree.get(leaf).unwrap().slot(), Rect::new(1.0, 2.0, 70.0, 80.0));
    }

    #[test]
    fn test_event_keyed_by_name() {
        let mut tree = ElementTree::new();
        let leaf = tree.create_leaf("leaf");
        let event = Rc::new(Event::new("onClick"));
        assert!(tree.insert_event(leaf, event.clone()).unwrap().is_none());
        assert!(tree.insert_event(leaf, event).unwrap().is_some());
        assert!(tree.get(leaf).unwrap().event("onClick").is_some());
        assert!(tree.remove_event(leaf, "onClick").unwrap().is_some());
        assert!(tree.get(leaf).unwrap().event("onClick").is_none());
    }
}
