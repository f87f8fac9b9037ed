// crates/slotframe-layout/src/element.rs
use std::collections::HashMap;
use std::rc::Rc;

use slotframe_core::{Alignment, DrawTarget, ElementId, Rect, Visual};

use crate::{Container, Event};

#[derive(Debug)]
pub enum ElementKind {
    Leaf,
    Container(Container),
}

/// A node of the element tree.
///
/// Fields are only writable through [`crate::ElementTree`], which keeps the
/// slot and parent links consistent.
#[derive(Debug)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) name: String,

    // Geometry
    pub(crate) content: Rect,
    pub(crate) slot: Rect,
    pub(crate) align_x: Alignment,
    pub(crate) align_y: Alignment,

    // Presentation
    pub(crate) depth: i32,
    pub(crate) visible: bool,
    pub(crate) content_visible: bool,
    pub(crate) visual: Option<Visual>,
    pub(crate) background: Option<Visual>,
    pub(crate) background_visible: bool,
    pub(crate) draw_target: Option<DrawTarget>,

    // Relationship
    pub(crate) parent: Option<ElementId>,
    pub(crate) slot_index: Option<usize>,

    pub(crate) events: HashMap<String, Rc<Event>>,
    pub(crate) kind: ElementKind,
}

impl Element {
    pub(crate) fn new(id: ElementId, name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id,
            name: name.into(),
            content: Rect::ZERO,
            slot: Rect::ZERO,
            align_x: Alignment::None,
            align_y: Alignment::None,
            depth: 0,
            visible: true,
            content_visible: true,
            visual: None,
            background: None,
            background_visible: true,
            draw_target: None,
            parent: None,
            slot_index: None,
            events: HashMap::new(),
            kind,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> Rect {
        self.content
    }

    pub fn slot(&self) -> Rect {
        self.slot
    }

    pub fn alignment_x(&self) -> Alignment {
        self.align_x
    }

    pub fn alignment_y(&self) -> Alignment {
        self.align_y
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_content_visible(&self) -> bool {
        self.content_visible
    }

    pub fn visual(&self) -> Option<&Visual> {
        self.visual.as_ref()
    }

    pub fn background(&self) -> Option<&Visual> {
        self.background.as_ref()
    }

    pub fn is_background_visible(&self) -> bool {
        self.background_visible
    }

    pub fn draw_target(&self) -> Option<DrawTarget> {
        self.draw_target
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn slot_index(&self) -> Option<usize> {
        self.slot_index
    }

    pub fn event(&self, name: &str) -> Option<&Rc<Event>> {
        self.events.get(name)
    }

    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, ElementKind::Container(_))
    }

    pub fn as_container(&self) -> Option<&Container> {
        match &self.kind {
            ElementKind::Container(container) => Some(container),
            ElementKind::Leaf => None,
        }
    }

    pub(crate) fn as_container_mut(&mut self) -> Option<&mut Container> {
        match &mut self.kind {
            ElementKind::Container(container) => Some(container),
            ElementKind::Leaf => None,
        }
    }

    /// Copies every attribute except identity, links and children.
    pub(crate) fn copy_attributes_to(&self, target: &mut Element) {
        target.name = self.name.clone();
        target.content = self.content;
        target.slot = self.slot;
        target.align_x = self.align_x;
        target.align_y = self.align_y;
        target.depth = self.depth;
        target.visible = self.visible;
        target.content_visible = self.content_visible;
        target.visual = self.visual.clone();
        target.background = self.background.clone();
        target.background_visible = self.background_visible;
        target.draw_target = self.draw_target;
        target.events = self.events.clone();
    }

    /// Detached copy with a new id. Containers come back with the same slot
    /// count but no children.
    pub(crate) fn shallow_clone(&self, id: ElementId) -> Element {
        let kind = match &self.kind {
            ElementKind::Leaf => ElementKind::Leaf,
            ElementKind::Container(container) => {
                let mut empty = Container::new(container.arrangement);
                empty.resize(container.size());
                empty.elastic = container.elastic;
                empty.default_align_x = container.default_align_x;
                empty.default_align_y = container.default_align_y;
                ElementKind::Container(empty)
            }
        };
        let mut clone = Element::new(id, String::new(), kind);
        self.copy_attributes_to(&mut clone);
        clone
    }
}
