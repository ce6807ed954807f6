//! Structural legality of a drop, independent of correctness.

use crate::model::{ElementId, TaskDefinition, ZoneId};

/// Decides whether an element may be dropped on a zone of one task.
///
/// The resolver borrows a single [`TaskDefinition`], so its answers never
/// depend on any other question instance.
#[derive(Debug, Clone, Copy)]
pub struct AcceptanceResolver<'a> {
    task: &'a TaskDefinition,
}

impl<'a> AcceptanceResolver<'a> {
    pub fn new(task: &'a TaskDefinition) -> Self {
        Self { task }
    }

    /// `false` for unknown elements or zones, static elements, and zones the
    /// element does not list.
    pub fn is_acceptable(&self, element: ElementId, zone: ZoneId) -> bool {
        if self.task.drop_zone(zone).is_none() {
            return false;
        }
        self.task
            .element(element)
            .is_some_and(|e| e.allows(zone))
    }

    /// Zones `element` may be dropped on, in id order.
    pub fn acceptable_zones(&self, element: ElementId) -> Vec<ZoneId> {
        self.task
            .element(element)
            .and_then(|e| e.allowed_zones())
            .map(|zones| zones.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> TaskDefinition {
        TaskDefinition::builder()
            .drop_zone([0])
            .drop_zone([1])
            .draggable([0])
            .draggable([0, 1])
            .static_element()
            .build()
            .unwrap()
    }

    #[test]
    fn accepts_listed_zone() {
        let task = task();
        let resolver = AcceptanceResolver::new(&task);
        assert!(resolver.is_acceptable(ElementId(0), ZoneId(0)));
        assert!(resolver.is_acceptable(ElementId(1), ZoneId(1)));
    }

    #[test]
    fn rejects_unlisted_zone() {
        let task = task();
        let resolver = AcceptanceResolver::new(&task);
        assert!(!resolver.is_acceptable(ElementId(0), ZoneId(1)));
    }

    #[test]
    fn rejects_static_and_unknown() {
        let task = task();
        let resolver = AcceptanceResolver::new(&task);
        assert!(!resolver.is_acceptable(ElementId(2), ZoneId(0)));
        assert!(!resolver.is_acceptable(ElementId(9), ZoneId(0)));
        assert!(!resolver.is_acceptable(ElementId(0), ZoneId(9)));
    }

    #[test]
    fn lists_acceptable_zones() {
        let task = task();
        let resolver = AcceptanceResolver::new(&task);
        assert_eq!(resolver.acceptable_zones(ElementId(1)), vec![ZoneId(0), ZoneId(1)]);
        assert!(resolver.acceptable_zones(ElementId(2)).is_empty());
    }
}
