// src/viewer.rs
//! A small eye-colour picker built on the engine: a "previous" and a "next"
//! button cycle the eye shown on the right, a dot marks the hovered button
//! and a quit button asks the host to close.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use slotframe_core::{Alignment, DrawMode, DrawTarget, ElementId, EventArgs, Value, Visual};
use slotframe_layout::{pointer_in_slot, ElementTree, Event};
use slotframe_render::{CommandRenderer, Renderer};
use slotframe_runtime::{Interface, PointerEvent, ON_CLICK, ON_HOVER};

/// Resources cycled through by the previous/next buttons.
pub const EYE_RESOURCES: [&str; 4] = ["eye-gray", "eye-blue", "eye-green", "eye-brown"];

pub const VIEWER_TARGET: DrawTarget = DrawTarget(0);

/// Handles to the elements of the viewer scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerIds {
    pub outer: ElementId,
    pub buttons: ElementId,
    pub prev_layout: ElementId,
    pub prev_dot: ElementId,
    pub prev_text: ElementId,
    pub next_layout: ElementId,
    pub next_dot: ElementId,
    pub next_text: ElementId,
    pub quit: ElementId,
    pub eye: ElementId,
}

/// Builds the viewer tree filling a `size` window.
///
/// The outer layout splits the window into a button column and the eye. Each
/// button row is a free layout holding a dot and a text placed by hand.
pub fn build_scene(size: Vec2) -> anyhow::Result<(ElementTree, ViewerIds)> {
    let mut tree = ElementTree::new();

    let outer = tree.create_horizontal("outer");
    tree.set_slot_size(outer, size.x, size.y)?;
    tree.set_default_alignment(outer, Alignment::Center, Alignment::Center)?;
    tree.match_content_to_slot(outer)?;

    let buttons = tree.create_vertical("buttons");
    let eye = tree.create_leaf("eye");
    tree.add_element(outer, buttons)?;
    tree.add_element(outer, eye)?;

    tree.set_content_size(buttons, 300.0, 450.0)?;
    tree.align(buttons)?;

    let prev_layout = tree.create_free("prev");
    let next_layout = tree.create_free("next");
    let quit = tree.create_leaf("quit");
    tree.add_element(buttons, prev_layout)?;
    tree.add_element(buttons, next_layout)?;
    tree.add_element(buttons, quit)?;

    let (prev_dot, prev_text) = build_button(&mut tree, prev_layout, "previous")?;
    let (next_dot, next_text) = build_button(&mut tree, next_layout, "next")?;

    tree.set_visual(quit, Some(Visual::new("quit", 40.0, 40.0)))?;
    tree.set_content_size(quit, 40.0, 40.0)?;
    tree.align(quit)?;

    tree.set_visual(eye, Some(Visual::new(EYE_RESOURCES[0], 350.0, 350.0)))?;
    tree.set_content_size(eye, 350.0, 350.0)?;
    tree.align_to(eye, Alignment::Center, Alignment::Center)?;
    let background = Visual::new("background", 64.0, 64.0)
        .with_mode(DrawMode::Repeat, DrawMode::Repeat)
        .with_alignment(Alignment::Center, Alignment::Center);
    tree.set_background(eye, Some(background))?;

    tree.recursive_align(outer)?;
    tree.recursive_set_draw_target(outer, Some(VIEWER_TARGET))?;

    let ids = ViewerIds {
        outer,
        buttons,
        prev_layout,
        prev_dot,
        prev_text,
        next_layout,
        next_dot,
        next_text,
        quit,
        eye,
    };
    Ok((tree, ids))
}

/// Fills a free layout with a dot in its left quarter and a cropped text
/// in the rest.
fn build_button(tree: &mut ElementTree, layout: ElementId, text: &str) -> anyhow::Result<(ElementId, ElementId)> {
    tree.match_content_to_slot(layout)?;
    let frame = tree.get(layout)?.content();

    let dot = tree.create_leaf(format!("{}-dot", text));
    tree.add_element(layout, dot)?;
    tree.set_visual(dot, Some(Visual::new("blue-dot", 30.0, 30.0)))?;
    tree.set_slot_position(dot, frame.x(), frame.y())?;
    tree.set_slot_size(dot, frame.width() / 4.0, frame.height())?;
    tree.set_content_size(dot, 30.0, 30.0)?;
    tree.align(dot)?;

    let label = tree.create_leaf(format!("{}-text", text));
    tree.add_element(layout, label)?;
    let sprite = Visual::new(text, 200.0, 60.0)
        .with_mode(DrawMode::Crop, DrawMode::Crop)
        .with_alignment(Alignment::Left, Alignment::Center);
    tree.set_visual(label, Some(sprite))?;
    tree.align_to(label, Alignment::Left, Alignment::Keep)?;
    tree.set_slot_position(label, frame.x() + frame.width() / 4.0, frame.y())?;
    tree.set_slot_size(label, frame.width() * 3.0 / 4.0, frame.height())?;
    tree.match_content_to_slot(label)?;

    Ok((dot, label))
}

/// The viewer scene wired to an [`Interface`].
pub struct EyeViewer<R: CommandRenderer> {
    interface: Interface<R>,
    ids: ViewerIds,
    eye_index: Rc<Cell<usize>>,
    quit_requested: Rc<Cell<bool>>,
}

impl<R: CommandRenderer> EyeViewer<R> {
    pub fn new(backend: R) -> anyhow::Result<Self> {
        let (tree, ids) = build_scene(backend.viewport_size())?;
        let mut interface = Interface::new(tree, ids.outer, backend)?;
        let eye_index = Rc::new(Cell::new(0));
        let quit_requested = Rc::new(Cell::new(false));

        for (text, dot, step) in [(ids.prev_text, ids.prev_dot, -1i64), (ids.next_text, ids.next_dot, 1)] {
            let index = eye_index.clone();
            let eye = ids.eye;
            let change_eye = Event::new(ON_CLICK)
                .with_condition(pointer_in_slot)
                .with_effect(move |tree, args| {
                    let Some(step) = args.get("move").and_then(Value::as_int) else {
                        return;
                    };
                    let count = EYE_RESOURCES.len() as i64;
                    let next = (index.get() as i64 + step).rem_euclid(count) as usize;
                    index.set(next);
                    let visual = Visual::new(EYE_RESOURCES[next], 350.0, 350.0);
                    if let Err(err) = tree.set_visual(eye, Some(visual)) {
                        tracing::warn!("Failed to change eye: {}", err);
                    }
                })
                .with_effect_defaults(EventArgs::new().with("move", step));
            interface.on_event(text, change_eye)?;

            let show_dot = Event::new(ON_HOVER)
                .with_condition(pointer_in_slot)
                .with_effect(|tree, args| {
                    if let Ok(dot) = args.element("dot") {
                        tree.set_content_visibility(dot, true).ok();
                    }
                })
                .with_effect_defaults(EventArgs::new().with("dot", Value::Element(dot)));
            interface.on_event(text, show_dot)?;
        }

        let quit = quit_requested.clone();
        interface.on_click(ids.quit, move |_, _| quit.set(true))?;

        let mut viewer = Self {
            interface,
            ids,
            eye_index,
            quit_requested,
        };
        viewer.reset()?;
        Ok(viewer)
    }

    pub fn ids(&self) -> &ViewerIds {
        &self.ids
    }

    pub fn interface(&self) -> &Interface<R> {
        &self.interface
    }

    pub fn interface_mut(&mut self) -> &mut Interface<R> {
        &mut self.interface
    }

    pub fn eye_index(&self) -> usize {
        self.eye_index.get()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested.get()
    }

    /// Hides both dots; hover shows them again on the frames they apply.
    pub fn reset(&mut self) -> anyhow::Result<()> {
        let tree = self.interface.tree_mut();
        tree.set_content_visibility(self.ids.prev_dot, false)?;
        tree.set_content_visibility(self.ids.next_dot, false)?;
        Ok(())
    }

    /// Runs one frame: reset, pointer at `cursor`, the given presses, then a
    /// render. Returns the number of draw commands of the frame.
    pub fn frame(&mut self, cursor: Vec2, pressed: bool) -> anyhow::Result<usize> {
        self.reset()?;
        self.interface.queue_pointer(PointerEvent::Moved { position: cursor });
        if pressed {
            self.interface.queue_pointer(PointerEvent::Pressed { position: cursor });
        }
        self.interface.update()?;
        self.interface.render()
    }
}
