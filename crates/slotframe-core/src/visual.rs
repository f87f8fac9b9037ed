// crates/slotframe-core/src/visual.rs
use serde::{Deserialize, Serialize};

use crate::{Alignment, Axis, Rect};

/// How a visual is fitted into its frame on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawMode {
    /// Natural size, aligned, allowed to spill out of the frame.
    Full,
    /// Natural size, aligned, clipped to the frame.
    Crop,
    /// Stretched to cover the frame exactly.
    #[default]
    Adjust,
    /// Tiled at natural size from the aligned origin, edges clipped.
    Repeat,
}

/// Opaque handle naming the surface an element draws into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawTarget(pub u32);

/// Drawing configuration for one piece of visual content.
///
/// `resource` names whatever the backend loads (a texture key, an atlas
/// entry). `source` is the region of that resource to use, its size is the
/// natural size of the visual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visual {
    pub resource: String,
    pub source: Rect,
    mode_x: DrawMode,
    mode_y: DrawMode,
    align_x: Alignment,
    align_y: Alignment,
}

impl Visual {
    pub fn new(resource: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            resource: resource.into(),
            source: Rect::new(0.0, 0.0, width.max(0.0), height.max(0.0)),
            mode_x: DrawMode::Adjust,
            mode_y: DrawMode::Adjust,
            align_x: Alignment::Left,
            align_y: Alignment::Top,
        }
    }

    pub fn with_source(mut self, source: Rect) -> Self {
        self.source = source;
        self
    }

    pub fn with_mode(mut self, mode_x: DrawMode, mode_y: DrawMode) -> Self {
        self.set_mode(mode_x, mode_y);
        self
    }

    pub fn with_alignment(mut self, align_x: Alignment, align_y: Alignment) -> Self {
        self.set_alignment(align_x, align_y);
        self
    }

    pub fn mode_x(&self) -> DrawMode {
        self.mode_x
    }

    pub fn mode_y(&self) -> DrawMode {
        self.mode_y
    }

    pub fn alignment_x(&self) -> Alignment {
        self.align_x
    }

    pub fn alignment_y(&self) -> Alignment {
        self.align_y
    }

    pub fn set_mode(&mut self, mode_x: DrawMode, mode_y: DrawMode) {
        self.mode_x = mode_x;
        self.mode_y = mode_y;
    }

    /// Only Left/Right/Center on X and Top/Bottom/Center on Y are accepted;
    /// anything else keeps the current value for that axis.
    pub fn set_alignment(&mut self, align_x: Alignment, align_y: Alignment) {
        if is_visual_alignment(align_x, Axis::Horizontal) {
            self.align_x = align_x;
        }
        if is_visual_alignment(align_y, Axis::Vertical) {
            self.align_y = align_y;
        }
    }
}

fn is_visual_alignment(alignment: Alignment, axis: Axis) -> bool {
    alignment != Alignment::None && alignment.is_valid_for(axis)
}
