// crates/slotframe-render/src/sprite.rs
//! Fitting a visual into a frame according to its draw modes.

use glam::Vec2;
use slotframe_core::{align_axis, Alignment, Axis, DrawMode, Rect, Visual};
use tracing::warn;

/// Upper bound on repeated tiles along one axis of a single visual.
pub const MAX_TILES_PER_AXIS: usize = 1024;

/// One piece of a visual: where it goes and which region of the resource it
/// shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpritePatch {
    pub dest: Rect,
    pub source: Rect,
}

/// A 1D interval of the destination paired with the source interval it maps.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    dest_start: f32,
    dest_len: f32,
    src_start: f32,
    src_len: f32,
}

/// Resolves `visual` inside `frame` into the patches a backend has to draw.
///
/// Each axis is resolved on its own; the patches are the product of both.
/// Visuals with an empty source produce nothing.
pub fn fit_visual(frame: Rect, visual: &Visual) -> Vec<SpritePatch> {
    let horizontal = axis_spans(
        Axis::Horizontal,
        frame.x(),
        frame.width(),
        visual.source.x(),
        visual.source.width(),
        visual.mode_x(),
        visual.alignment_x(),
    );
    let vertical = axis_spans(
        Axis::Vertical,
        frame.y(),
        frame.height(),
        visual.source.y(),
        visual.source.height(),
        visual.mode_y(),
        visual.alignment_y(),
    );

    let mut patches = Vec::with_capacity(horizontal.len() * vertical.len());
    for y in &vertical {
        for x in &horizontal {
            patches.push(SpritePatch {
                dest: Rect::from_position_size(
                    Vec2::new(x.dest_start, y.dest_start),
                    Vec2::new(x.dest_len, y.dest_len),
                ),
                source: Rect::from_position_size(
                    Vec2::new(x.src_start, y.src_start),
                    Vec2::new(x.src_len, y.src_len),
                ),
            });
        }
    }
    patches
}

fn axis_spans(
    axis: Axis,
    frame_start: f32,
    frame_len: f32,
    src_start: f32,
    src_len: f32,
    mode: DrawMode,
    alignment: Alignment,
) -> Vec<Span> {
    if src_len <= 0.0 || !src_len.is_finite() {
        return Vec::new();
    }
    let aligned = align_axis(axis, alignment, frame_start, frame_len, src_len, frame_start);
    let frame_end = frame_start + frame_len;

    match mode {
        DrawMode::Adjust => vec![Span {
            dest_start: frame_start,
            dest_len: frame_len,
            src_start,
            src_len,
        }],
        DrawMode::Full => vec![Span {
            dest_start: aligned,
            dest_len: src_len,
            src_start,
            src_len,
        }],
        DrawMode::Crop => clip(aligned, src_start, src_len, frame_start, frame_end)
            .into_iter()
            .collect(),
        DrawMode::Repeat => {
            if frame_len <= 0.0 {
                return Vec::new();
            }
            // Step back from the aligned tile to the first one touching the frame.
            let behind = ((aligned - frame_start) / src_len).ceil().max(0.0);
            let first = aligned - behind * src_len;
            let needed = ((frame_end - first) / src_len).ceil();
            if needed.is_nan() || needed <= 0.0 {
                return Vec::new();
            }
            let count = if needed > MAX_TILES_PER_AXIS as f32 {
                warn!(
                    "Repeating a {} tile over {} needs {} tiles, drawing the first {}",
                    src_len, frame_len, needed, MAX_TILES_PER_AXIS
                );
                MAX_TILES_PER_AXIS
            } else {
                needed as usize
            };
            (0..count)
                .filter_map(|i| clip(first + i as f32 * src_len, src_start, src_len, frame_start, frame_end))
                .collect()
        }
    }
}

/// Clips a natural-size tile starting at `tile_start` to the frame.
fn clip(tile_start: f32, src_start: f32, src_len: f32, frame_start: f32, frame_end: f32) -> Option<Span> {
    let start = tile_start.max(frame_start);
    let end = (tile_start + src_len).min(frame_end);
    if end <= start {
        return None;
    }
    Some(Span {
        dest_start: start,
        dest_len: end - start,
        src_start: src_start + (start - tile_start),
        src_len: end - start,
    })
}
