// crates/slotframe-layout/src/lib.rs

pub mod arrangement;
pub mod container;
pub mod element;
pub mod events;
pub mod tree;

mod recursive;
mod slots;

pub use arrangement::*;
pub use container::*;
pub use element::*;
pub use events::*;
pub use tree::*;

pub use slotframe_core::{ElementId, LayoutError, Result};
