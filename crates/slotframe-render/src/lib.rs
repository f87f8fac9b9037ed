// crates/slotframe-render/src/lib.rs

use glam::Vec2;
use slotframe_core::{DrawTarget, ElementId, LayoutError, Rect, Visual};
use slotframe_layout::{ElementKind, ElementTree};
use tracing::trace;

pub mod recording;
pub mod sprite;

pub use recording::*;
pub use sprite::*;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Renderer initialization failed: {0}")]
    InitializationFailed(String),
    #[error("Unknown draw target: {0:?}")]
    UnknownTarget(DrawTarget),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// A surface that element visuals are drawn onto.
///
/// A frame is bracketed by `begin_frame` and `end_frame`; the context carries
/// whatever the backend accumulates in between. The viewport size is what the
/// root element of a scene is stretched to.
pub trait Renderer {
    type Surface;
    type Context;

    fn initialize(surface: Self::Surface) -> RenderResult<Self>
    where
        Self: Sized;

    fn begin_frame(&mut self) -> RenderResult<Self::Context>;

    /// Finishes the frame started by `begin_frame`.
    fn end_frame(&mut self, context: Self::Context) -> RenderResult<()>;

    fn resize(&mut self, new_size: Vec2) -> RenderResult<()>;

    fn viewport_size(&self) -> Vec2;
}

/// Which part of an element a draw belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Drawn into the slot rect before anything else of the element.
    Background,
    /// Drawn into the content rect.
    Content,
}

/// A draw produced by walking an element tree. `source` is the region of
/// `resource` shown in `dest`, both already resolved from the visual's modes.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    DrawImage {
        target: DrawTarget,
        element: ElementId,
        layer: Layer,
        resource: String,
        dest: Rect,
        source: Rect,
    },
}

impl RenderCommand {
    pub fn element(&self) -> ElementId {
        match self {
            RenderCommand::DrawImage { element, .. } => *element,
        }
    }

    pub fn dest(&self) -> Rect {
        match self {
            RenderCommand::DrawImage { dest, .. } => *dest,
        }
    }
}

/// Backend fed with the flat command list of a scene, in painter order.
pub trait CommandRenderer: Renderer {
    /// Draws `commands` in order. Later commands cover earlier ones.
    fn execute_commands(&mut self, context: &mut Self::Context, commands: &[RenderCommand]) -> RenderResult<()>;
}

/// Walks an element tree top-down and turns it into draw commands.
///
/// An element is skipped with its whole subtree when it is invisible or has no
/// draw target. Otherwise its background goes into the slot rect, then either
/// its visual into the content rect (leaves) or its visible children from the
/// highest depth down (containers). `content_visible = false` keeps the
/// background but suppresses the rest.
pub fn build_commands(tree: &ElementTree, root: ElementId) -> RenderResult<Vec<RenderCommand>> {
    let mut commands = Vec::new();
    collect_commands(tree, root, &mut commands)?;
    Ok(commands)
}

fn collect_commands(tree: &ElementTree, id: ElementId, commands: &mut Vec<RenderCommand>) -> RenderResult<()> {
    let element = tree.get(id)?;
    let Some(target) = element.draw_target() else {
        trace!("Element {} has no draw target", id);
        return Ok(());
    };
    if !element.is_visible() {
        return Ok(());
    }

    if element.is_background_visible() {
        if let Some(background) = element.background() {
            push_visual(commands, target, id, Layer::Background, element.slot(), background);
        }
    }
    if !element.is_content_visible() {
        return Ok(());
    }

    match element.kind() {
        ElementKind::Leaf => {
            if let Some(visual) = element.visual() {
                push_visual(commands, target, id, Layer::Content, element.content(), visual);
            }
        }
        ElementKind::Container(_) => {
            for child in tree.paint_order(id)? {
                collect_commands(tree, child, commands)?;
            }
        }
    }
    Ok(())
}

fn push_visual(
    commands: &mut Vec<RenderCommand>,
    target: DrawTarget,
    element: ElementId,
    layer: Layer,
    frame: Rect,
    visual: &Visual,
) {
    for patch in fit_visual(frame, visual) {
        commands.push(RenderCommand::DrawImage {
            target,
            element,
            layer,
            resource: visual.resource.clone(),
            dest: patch.dest,
            source: patch.source,
        });
    }
}

/// Draws an element tree through a [`CommandRenderer`] backend.
pub struct SceneRenderer<R: CommandRenderer> {
    backend: R,
    viewport_size: Vec2,
}

impl<R: CommandRenderer> SceneRenderer<R> {
    pub fn new(backend: R) -> Self {
        let viewport_size = backend.viewport_size();
        Self {
            backend,
            viewport_size,
        }
    }

    /// Draws the tree below `root` as one frame. Returns the number of
    /// commands executed.
    pub fn render_frame(&mut self, tree: &ElementTree, root: ElementId) -> RenderResult<usize> {
        let commands = build_commands(tree, root)?;
        let mut context = self.backend.begin_frame()?;
        self.backend.execute_commands(&mut context, &commands)?;
        self.backend.end_frame(context)?;
        trace!("Rendered element {} with {} commands", root, commands.len());
        Ok(commands.len())
    }

    pub fn resize(&mut self, new_size: Vec2) -> RenderResult<()> {
        self.viewport_size = new_size;
        self.backend.resize(new_size)
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    pub fn backend(&self) -> &R {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut R {
        &mut self.backend
    }
}
