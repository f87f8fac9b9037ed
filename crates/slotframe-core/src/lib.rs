// crates/slotframe-core/src/lib.rs
pub mod alignment;
pub mod config;
pub mod geometry;
pub mod ids;
pub mod value;
pub mod visual;

pub use alignment::*;
pub use config::*;
pub use geometry::*;
pub use ids::*;
pub use value::*;
pub use visual::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Element {0} already belongs to a container")]
    AlreadyParented(ElementId),

    #[error("Slot {index} is out of range for a container of size {size}")]
    SlotOutOfRange { index: usize, size: usize },

    #[error("A {rows}x{columns} table has more cells than can be addressed")]
    TableTooLarge { rows: usize, columns: usize },

    #[error("Missing event argument: {0}")]
    MissingArgument(String),

    #[error("Event argument '{key}' is not a {expected}")]
    ArgumentType { key: String, expected: &'static str },

    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),

    #[error("Element {0} is not a container")]
    NotAContainer(ElementId),

    #[error("Element {0} is not a table container")]
    NotATable(ElementId),

    #[error("Element {element} is not inside container {container}")]
    NotInContainer {
        element: ElementId,
        container: ElementId,
    },

    #[error("Container {0} cannot be placed inside its own subtree")]
    CyclicInsertion(ElementId),

    #[error("Elements {source_id} and {target_id} are of different kinds")]
    KindMismatch {
        source_id: ElementId,
        target_id: ElementId,
    },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
