// crates/slotframe-render/src/recording.rs
use std::collections::HashSet;

use glam::Vec2;
use slotframe_core::DrawTarget;
use tracing::debug;

use crate::{CommandRenderer, RenderCommand, RenderError, RenderResult, Renderer};

/// Backend that keeps every frame's commands instead of drawing them.
///
/// Used by tests and by tooling that inspects what a scene would draw.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    viewport_size: Vec2,
    targets: Option<HashSet<DrawTarget>>,
    frames: Vec<Vec<RenderCommand>>,
}

impl RecordingRenderer {
    /// Only accept commands for the given targets; anything else fails the
    /// frame with [`RenderError::UnknownTarget`].
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = DrawTarget>) -> Self {
        self.targets = Some(targets.into_iter().collect());
        self
    }

    pub fn frames(&self) -> &[Vec<RenderCommand>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[RenderCommand]> {
        self.frames.last().map(Vec::as_slice)
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Renderer for RecordingRenderer {
    type Surface = Vec2;
    type Context = Vec<RenderCommand>;

    fn initialize(surface: Vec2) -> RenderResult<Self> {
        if surface.x < 0.0 || surface.y < 0.0 {
            return Err(RenderError::InitializationFailed(format!(
                "negative viewport {:?}",
                surface
            )));
        }
        debug!("Recording renderer initialized with viewport {:?}", surface);
        Ok(Self {
            viewport_size: surface,
            ..Self::default()
        })
    }

    fn begin_frame(&mut self) -> RenderResult<Self::Context> {
        Ok(Vec::new())
    }

    fn end_frame(&mut self, context: Self::Context) -> RenderResult<()> {
        self.frames.push(context);
        Ok(())
    }

    fn resize(&mut self, new_size: Vec2) -> RenderResult<()> {
        self.viewport_size = new_size;
        Ok(())
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }
}

impl CommandRenderer for RecordingRenderer {
    fn execute_commands(&mut self, context: &mut Self::Context, commands: &[RenderCommand]) -> RenderResult<()> {
        if let Some(targets) = &self.targets {
            for command in commands {
                let RenderCommand::DrawImage { target, .. } = command;
                if !targets.contains(target) {
                    return Err(RenderError::UnknownTarget(*target));
                }
            }
        }
        context.extend_from_slice(commands);
        Ok(())
    }
}
