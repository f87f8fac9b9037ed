// crates/slotframe-runtime/src/lib.rs
pub mod handler;
pub mod interface;
pub mod pointer;

pub use handler::*;
pub use interface::*;
pub use pointer::*;

pub use slotframe_core::{ElementId, EventArgs, LayoutError};
pub use slotframe_layout::{ElementTree, Event};
