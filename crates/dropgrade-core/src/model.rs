//! Core data model types for dropgrade.
//!
//! A [`TaskDefinition`] describes one drag-and-drop question: the elements the
//! learner sees, the drop zones they can be placed on, and which elements are
//! correct in which zone. It is validated once and immutable afterwards.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TaskError;

/// Positional identifier of a task element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positional identifier of a drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub usize);

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Width and height, in whatever unit the caller works in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: 620.0,
            height: 310.0,
        }
    }
}

/// Placement of an element or zone inside the task area.
///
/// `x` and `y` are percentages of the container, `width` and `height` are in
/// em so the box scales with the container font size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

/// Position of a dropped element, as percentages of the container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

/// Whether an element can be moved by the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ElementKind {
    /// Rendered in place, never moved and never scored.
    Static,
    /// Can be dropped on any of `allowed_zones`, and is scored.
    Draggable { allowed_zones: BTreeSet<ZoneId> },
}

/// A single element of the task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskElement {
    pub id: ElementId,
    #[serde(flatten)]
    pub kind: ElementKind,
    #[serde(default)]
    pub rect: Rect,
}

impl TaskElement {
    /// Static and draggable elements share geometry; only draggables are graded.
    pub fn is_gradeable(&self) -> bool {
        matches!(self.kind, ElementKind::Draggable { .. })
    }

    /// Zones this element may be dropped on. `None` for static elements.
    pub fn allowed_zones(&self) -> Option<&BTreeSet<ZoneId>> {
        match &self.kind {
            ElementKind::Static => None,
            ElementKind::Draggable { allowed_zones } => Some(allowed_zones),
        }
    }

    pub fn allows(&self, zone: ZoneId) -> bool {
        self.allowed_zones()
            .is_some_and(|zones| zones.contains(&zone))
    }
}

/// A region elements can be dropped on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropZone {
    pub id: ZoneId,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub show_label: bool,
    /// Elements that are correctly placed here. Empty means nothing belongs here.
    #[serde(default)]
    pub correct_elements: BTreeSet<ElementId>,
    #[serde(default)]
    pub rect: Rect,
}

/// Display settings carried with the task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Design size in pixels; the container keeps this aspect ratio.
    #[serde(default)]
    pub size: Size,
    /// Background image path, relative to the content folder or absolute URL.
    #[serde(default)]
    pub background: Option<String>,
}

/// How the check button and retries behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Behaviour {
    /// Offer "try again" after grading. When false the check button disappears.
    #[serde(default = "default_true")]
    pub try_again: bool,
    /// Clear every placement on "try again" instead of resuming in place.
    #[serde(default)]
    pub reset_placements_on_retry: bool,
}

impl Default for Behaviour {
    fn default() -> Self {
        Self {
            try_again: true,
            reset_placements_on_retry: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// An immutable, validated drag-and-drop task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskDefinition {
    title: String,
    elements: Vec<TaskElement>,
    drop_zones: Vec<DropZone>,
    settings: Settings,
    behaviour: Behaviour,
}

impl TaskDefinition {
    /// Build a task, rejecting misnumbered ids and dangling references.
    pub fn new(
        title: impl Into<String>,
        elements: Vec<TaskElement>,
        drop_zones: Vec<DropZone>,
        settings: Settings,
        behaviour: Behaviour,
    ) -> Result<Self, TaskError> {
        for (position, element) in elements.iter().enumerate() {
            if element.id.0 != position {
                return Err(TaskError::MisnumberedElement {
                    position,
                    id: element.id,
                });
            }
            if let Some(zones) = element.allowed_zones() {
                if let Some(zone) = zones.iter().find(|z| z.0 >= drop_zones.len()) {
                    return Err(TaskError::UnknownDropZone {
                        element: element.id,
                        zone: *zone,
                    });
                }
            }
        }

        for (position, zone) in drop_zones.iter().enumerate() {
            if zone.id.0 != position {
                return Err(TaskError::MisnumberedDropZone {
                    position,
                    id: zone.id,
                });
            }
            if let Some(element) = zone.correct_elements.iter().find(|e| e.0 >= elements.len()) {
                return Err(TaskError::UnknownElement {
                    zone: zone.id,
                    element: *element,
                });
            }
        }

        let size = settings.size;
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !(valid(size.width) && valid(size.height)) {
            return Err(TaskError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }

        Ok(Self {
            title: title.into(),
            elements,
            drop_zones,
            settings,
            behaviour,
        })
    }

    /// Start building a task with positional ids.
    pub fn builder() -> TaskBuilder {
        TaskBuilder::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn elements(&self) -> &[TaskElement] {
        &self.elements
    }

    pub fn drop_zones(&self) -> &[DropZone] {
        &self.drop_zones
    }

    pub fn element(&self, id: ElementId) -> Option<&TaskElement> {
        self.elements.get(id.0)
    }

    pub fn drop_zone(&self, id: ZoneId) -> Option<&DropZone> {
        self.drop_zones.get(id.0)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn behaviour(&self) -> &Behaviour {
        &self.behaviour
    }

    /// Elements that take part in grading, in id order.
    pub fn gradeable_elements(&self) -> impl Iterator<Item = &TaskElement> + '_ {
        self.elements.iter().filter(|e| e.is_gradeable())
    }

    /// Number of gradeable elements. Independent of any placement state.
    pub fn max_score(&self) -> u32 {
        self.gradeable_elements().count() as u32
    }
}

/// Incremental construction of a [`TaskDefinition`].
///
/// Elements and drop zones receive ids in the order they are added.
#[derive(Debug, Clone, Default)]
pub struct TaskBuilder {
    title: String,
    elements: Vec<TaskElement>,
    drop_zones: Vec<DropZone>,
    settings: Settings,
    behaviour: Behaviour,
}

impl TaskBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Add a draggable element that may be dropped on `allowed_zones`.
    pub fn draggable<I: IntoIterator<Item = usize>>(mut self, allowed_zones: I) -> Self {
        let id = ElementId(self.elements.len());
        self.elements.push(TaskElement {
            id,
            kind: ElementKind::Draggable {
                allowed_zones: allowed_zones.into_iter().map(ZoneId).collect(),
            },
            rect: Rect::default(),
        });
        self
    }

    /// Add a static element.
    pub fn static_element(mut self) -> Self {
        let id = ElementId(self.elements.len());
        self.elements.push(TaskElement {
            id,
            kind: ElementKind::Static,
            rect: Rect::default(),
        });
        self
    }

    /// Add a drop zone where `correct_elements` belong.
    pub fn drop_zone<I: IntoIterator<Item = usize>>(mut self, correct_elements: I) -> Self {
        let id = ZoneId(self.drop_zones.len());
        self.drop_zones.push(DropZone {
            id,
            label: String::new(),
            show_label: false,
            correct_elements: correct_elements.into_iter().map(ElementId).collect(),
            rect: Rect::default(),
        });
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn behaviour(mut self, behaviour: Behaviour) -> Self {
        self.behaviour = behaviour;
        self
    }

    pub fn build(self) -> Result<TaskDefinition, TaskError> {
        TaskDefinition::new(
            self.title,
            self.elements,
            self.drop_zones,
            self.settings,
            self.behaviour,
        )
    }
}
