// crates/slotframe-runtime/src/pointer.rs
use glam::Vec2;
use slotframe_layout::ElementTree;

use crate::ElementHandler;

/// Event name dispatched for pointer movement.
pub const ON_HOVER: &str = "onHover";
/// Event name dispatched for pointer presses.
pub const ON_CLICK: &str = "onClick";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved { position: Vec2 },
    Pressed { position: Vec2 },
}

impl PointerEvent {
    pub fn position(&self) -> Vec2 {
        match self {
            PointerEvent::Moved { position } | PointerEvent::Pressed { position } => *position,
        }
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            PointerEvent::Moved { .. } => ON_HOVER,
            PointerEvent::Pressed { .. } => ON_CLICK,
        }
    }
}

/// Pointer input collected between two updates.
#[derive(Debug, Default)]
pub struct PointerQueue {
    event_queue: Vec<PointerEvent>,
}

impl PointerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_event(&mut self, event: PointerEvent) {
        self.event_queue.push(event);
    }

    pub fn pending(&self) -> usize {
        self.event_queue.len()
    }

    /// Dispatches everything queued. All movement is handled before any
    /// press, so hover state is current when clicks are evaluated. Returns
    /// the number of effects that ran.
    pub fn update(&mut self, handler: &mut ElementHandler, tree: &mut ElementTree) -> usize {
        let events: Vec<_> = self.event_queue.drain(..).collect();
        let (moves, presses): (Vec<_>, Vec<_>) = events
            .into_iter()
            .partition(|event| matches!(event, PointerEvent::Moved { .. }));

        let mut fired = 0;
        for event in moves.iter().chain(presses.iter()) {
            tracing::trace!("Pointer {} at {:?}", event.event_name(), event.position());
            fired += handler.dispatch_pointer(tree, event.event_name(), event.position());
        }
        fired
    }
}
