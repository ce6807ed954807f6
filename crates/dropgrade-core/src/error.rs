//! Task definition error types.
//!
//! A task definition that references elements or drop zones it does not
//! contain is rejected at construction time, so grading never has to guess
//! what a dangling index was supposed to mean.

use thiserror::Error;

use crate::model::{ElementId, ZoneId};

/// Contract violations detected while building a [`TaskDefinition`].
///
/// [`TaskDefinition`]: crate::model::TaskDefinition
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaskError {
    /// An element lists a drop zone that does not exist.
    #[error("element {element} lists unknown drop zone {zone}")]
    UnknownDropZone { element: ElementId, zone: ZoneId },

    /// A drop zone lists a correct element that does not exist.
    #[error("drop zone {zone} lists unknown element {element}")]
    UnknownElement { zone: ZoneId, element: ElementId },

    /// An element's id does not match its position in the task.
    #[error("element at position {position} carries id {id}")]
    MisnumberedElement { position: usize, id: ElementId },

    /// A drop zone's id does not match its position in the task.
    #[error("drop zone at position {position} carries id {id}")]
    MisnumberedDropZone { position: usize, id: ZoneId },

    /// An element declared static also lists drop zones.
    #[error("element {0} is declared static but lists drop zones")]
    StaticWithDropZones(ElementId),

    /// An index could not be read as a non-negative integer.
    #[error("invalid index {value:?} in {field}")]
    InvalidIndex { field: String, value: String },

    /// The design size of the task is not a positive area.
    #[error("invalid task size {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
}

impl TaskError {
    /// Returns `true` if the error points at a dangling reference.
    pub fn is_dangling_reference(&self) -> bool {
        matches!(
            self,
            TaskError::UnknownDropZone { .. } | TaskError::UnknownElement { .. }
        )
    }
}
