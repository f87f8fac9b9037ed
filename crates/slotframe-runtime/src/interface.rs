// crates/slotframe-runtime/src/interface.rs
use std::rc::Rc;

use glam::Vec2;
use slotframe_core::{ElementId, EventArgs};
use slotframe_layout::{pointer_in_content, pointer_in_slot, ElementTree, Event};
use slotframe_render::{CommandRenderer, SceneRenderer};

use crate::{ElementHandler, PointerEvent, PointerQueue, ON_CLICK, ON_HOVER};

/// Ties a tree, its event registry and a renderer together.
///
/// Input is queued with [`Interface::queue_pointer`] and dispatched on the
/// next [`Interface::update`]; [`Interface::render`] draws the tree below
/// the root when something changed since the last frame.
pub struct Interface<R: CommandRenderer> {
    tree: ElementTree,
    handler: ElementHandler,
    pointer: PointerQueue,
    renderer: SceneRenderer<R>,
    root: ElementId,
    needs_render: bool,
    frame_count: u64,
}

impl<R: CommandRenderer> Interface<R> {
    pub fn new(tree: ElementTree, root: ElementId, backend: R) -> anyhow::Result<Self> {
        tree.get(root)?;
        let mut interface = Self {
            tree,
            handler: ElementHandler::new(),
            pointer: PointerQueue::new(),
            renderer: SceneRenderer::new(backend),
            root,
            needs_render: true,
            frame_count: 0,
        };
        let viewport = interface.renderer.viewport_size();
        interface.fit_root(viewport)?;
        Ok(interface)
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    /// Mutable access to the tree. Assumes the caller changes something.
    pub fn tree_mut(&mut self) -> &mut ElementTree {
        self.needs_render = true;
        &mut self.tree
    }

    pub fn handler(&self) -> &ElementHandler {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut ElementHandler {
        &mut self.handler
    }

    pub fn renderer(&self) -> &SceneRenderer<R> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut SceneRenderer<R> {
        &mut self.renderer
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.renderer.viewport_size()
    }

    pub fn mark_needs_render(&mut self) {
        self.needs_render = true;
    }

    /// Registers every element below the root.
    pub fn register_all(&mut self) -> anyhow::Result<usize> {
        Ok(self.handler.recursive_register(&self.tree, self.root)?)
    }

    /// Attaches `event` to `id` and registers the element.
    pub fn on_event(&mut self, id: ElementId, event: Event) -> anyhow::Result<()> {
        self.tree.insert_event(id, Rc::new(event))?;
        self.handler.register(&self.tree, id)?;
        Ok(())
    }

    /// Runs `effect` when a press lands inside the element's content rect.
    pub fn on_click<F>(&mut self, id: ElementId, effect: F) -> anyhow::Result<()>
    where
        F: Fn(&mut ElementTree, &EventArgs) + 'static,
    {
        let event = Event::new(ON_CLICK)
            .with_condition(pointer_in_content)
            .with_effect(effect);
        self.on_event(id, event)
    }

    /// Runs `effect` while the pointer moves inside the element's slot rect.
    pub fn on_hover<F>(&mut self, id: ElementId, effect: F) -> anyhow::Result<()>
    where
        F: Fn(&mut ElementTree, &EventArgs) + 'static,
    {
        let event = Event::new(ON_HOVER)
            .with_condition(pointer_in_slot)
            .with_effect(effect);
        self.on_event(id, event)
    }

    pub fn queue_pointer(&mut self, event: PointerEvent) {
        self.pointer.queue_event(event);
    }

    /// Dispatches queued input. Returns how many effects ran.
    pub fn update(&mut self) -> anyhow::Result<usize> {
        let fired = self.pointer.update(&mut self.handler, &mut self.tree);
        if fired > 0 {
            self.needs_render = true;
        }
        // An effect may have deleted the root itself.
        self.tree.get(self.root)?;
        Ok(fired)
    }

    /// Draws a frame if anything changed. Returns the number of commands
    /// executed, zero when the frame was skipped.
    pub fn render(&mut self) -> anyhow::Result<usize> {
        if !self.needs_render {
            return Ok(0);
        }
        let commands = self.renderer.render_frame(&self.tree, self.root)?;
        self.needs_render = false;
        self.frame_count += 1;
        if self.frame_count % 60 == 0 {
            tracing::debug!("Rendered {} frames", self.frame_count);
        }
        Ok(commands)
    }

    /// Resizes the backend and stretches the root to the new viewport.
    pub fn resize(&mut self, size: Vec2) -> anyhow::Result<()> {
        self.renderer.resize(size)?;
        self.fit_root(size)
    }

    fn fit_root(&mut self, size: Vec2) -> anyhow::Result<()> {
        self.tree.set_slot_position(self.root, 0.0, 0.0)?;
        self.tree.set_slot_size(self.root, size.x, size.y)?;
        self.tree.match_content_to_slot(self.root)?;
        self.needs_render = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotframe_core::{DrawTarget, Visual};
    use slotframe_render::{RecordingRenderer, Renderer};

    fn interface() -> (Interface<RecordingRenderer>, ElementId) {
        let mut tree = ElementTree::new();
        let root = tree.create_horizontal("root");
        let button = tree.create_leaf("button");
        tree.set_content_size(button, 20.0, 20.0).unwrap();
        tree.set_visual(button, Some(Visual::new("button", 20.0, 20.0))).unwrap();
        tree.add_element(root, button).unwrap();
        tree.recursive_set_draw_target(root, Some(DrawTarget(0))).unwrap();
        let backend = RecordingRenderer::initialize(Vec2::new(100.0, 40.0)).unwrap();
        (Interface::new(tree, root, backend).unwrap(), button)
    }

    #[test]
    fn test_root_fills_viewport() {
        let (mut ui, _) = interface();
        let root = ui.root();
        assert_eq!(ui.tree().get(root).unwrap().content().size, Vec2::new(100.0, 40.0));

        ui.resize(Vec2::new(200.0, 80.0)).unwrap();
        assert_eq!(ui.viewport_size(), Vec2::new(200.0, 80.0));
        assert_eq!(ui.tree().get(root).unwrap().slot().size, Vec2::new(200.0, 80.0));
    }

    #[test]
    fn test_click_hides_button_and_rerenders() {
        let (mut ui, button) = interface();
        assert_eq!(ui.render().unwrap(), 1);
        assert_eq!(ui.render().unwrap(), 0);

        ui.on_click(button, |tree, args| {
            if let Ok(id) = args.element("element") {
                tree.set_visibility(id, false).ok();
            }
        })
        .unwrap();

        ui.queue_pointer(PointerEvent::Pressed { position: Vec2::new(90.0, 39.0) });
        assert_eq!(ui.update().unwrap(), 0);

        ui.queue_pointer(PointerEvent::Pressed { position: Vec2::new(5.0, 5.0) });
        assert_eq!(ui.update().unwrap(), 1);
        assert!(!ui.tree().get(button).unwrap().is_visible());
        assert_eq!(ui.render().unwrap(), 0);
        assert_eq!(ui.frame_count(), 2);
    }

    #[test]
    fn test_update_fails_when_root_deleted() {
        let (mut ui, button) = interface();
        let root = ui.root();
        ui.on_click(button, move |tree, _| {
            tree.recursive_delete(root).ok();
        })
        .unwrap();
        ui.queue_pointer(PointerEvent::Pressed { position: Vec2::new(1.0, 1.0) });
        assert!(ui.update().is_err());
    }
}
