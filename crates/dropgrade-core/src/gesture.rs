//! Drag gesture state machine.
//!
//! A gesture moves through `Idle → Dragging → {Accepted, Reverted}`. Idle is
//! the absence of a [`DragGesture`]; a session hands one out when a drag
//! starts, the shell reports which zone the pointer is over while it moves,
//! and finishing the drag consumes the gesture and yields a final
//! [`GestureOutcome`]. The session turns that outcome into a single
//! `place` or `remove` on its placement store.

use serde::{Deserialize, Serialize};

use crate::model::{ElementId, Position, ZoneId};
use crate::session::InstanceId;

/// Phase of a drag as seen from the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GesturePhase {
    Idle,
    Dragging,
    Accepted,
    Reverted,
}

impl GesturePhase {
    /// Phase of a possibly absent in-flight gesture.
    pub fn of(gesture: Option<&DragGesture>) -> Self {
        gesture.map_or(GesturePhase::Idle, DragGesture::phase)
    }
}

/// An element that is being dragged.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    instance: InstanceId,
    element: ElementId,
    origin: Option<ZoneId>,
    over: Option<ZoneId>,
}

impl DragGesture {
    pub(crate) fn start(instance: InstanceId, element: ElementId, origin: Option<ZoneId>) -> Self {
        Self {
            instance,
            element,
            origin,
            over: None,
        }
    }

    /// Session that started this gesture.
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Zone the element sat in when the drag started.
    pub fn origin(&self) -> Option<ZoneId> {
        self.origin
    }

    /// Zone the pointer is currently over, if any.
    pub fn hovered(&self) -> Option<ZoneId> {
        self.over
    }

    pub fn phase(&self) -> GesturePhase {
        GesturePhase::Dragging
    }

    /// Pointer entered `zone`.
    pub fn enter(&mut self, zone: ZoneId) {
        self.over = Some(zone);
    }

    /// Pointer left `zone`. Leaving a zone other than the hovered one is ignored.
    pub fn leave(&mut self, zone: ZoneId) {
        if self.over == Some(zone) {
            self.over = None;
        }
    }
}

/// Final state of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum GestureOutcome {
    /// Dropped on an acceptable zone; the element now sits there.
    Accepted {
        element: ElementId,
        zone: ZoneId,
        #[serde(default)]
        position: Option<Position>,
    },
    /// Dropped anywhere else; the element is back at its home position and
    /// no longer in any zone. A session showing solutions, or a session the
    /// gesture did not start in, leaves its placements as they were.
    Reverted {
        element: ElementId,
        from: Option<ZoneId>,
    },
}

impl GestureOutcome {
    pub fn element(&self) -> ElementId {
        match self {
            GestureOutcome::Accepted { element, .. } | GestureOutcome::Reverted { element, .. } => {
                *element
            }
        }
    }

    pub fn phase(&self) -> GesturePhase {
        match self {
            GestureOutcome::Accepted { .. } => GesturePhase::Accepted,
            GestureOutcome::Reverted { .. } => GesturePhase::Reverted,
        }
    }
}
