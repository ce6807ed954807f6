//! Per-session record of where each draggable currently sits.
//!
//! The store is a plain map keyed by element: an element is in at most one
//! drop zone, and placing it somewhere new replaces the old entry. It does
//! not check acceptance; callers ask the [`AcceptanceResolver`] first.
//!
//! [`AcceptanceResolver`]: crate::acceptance::AcceptanceResolver

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ElementId, Position, ZoneId};

/// Where one element has been dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub zone: ZoneId,
    /// Drop position inside the container, if the shell reported one.
    #[serde(default)]
    pub position: Option<Position>,
}

/// Mapping from draggable to its current drop zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementStore {
    placements: BTreeMap<ElementId, Placement>,
}

impl PlacementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `element` as sitting in `zone`, replacing any prior placement.
    pub fn place(&mut self, element: ElementId, zone: ZoneId) {
        self.insert(element, Placement { zone, position: None });
    }

    /// Like [`place`](Self::place), also remembering where it was dropped.
    pub fn place_at(&mut self, element: ElementId, zone: ZoneId, position: Position) {
        self.insert(
            element,
            Placement {
                zone,
                position: Some(position),
            },
        );
    }

    fn insert(&mut self, element: ElementId, placement: Placement) {
        if let Some(prior) = self.placements.insert(element, placement) {
            if prior.zone != placement.zone {
                tracing::debug!(
                    "element {element} moved from zone {} to zone {}",
                    prior.zone,
                    placement.zone
                );
            }
        } else {
            tracing::debug!("element {element} placed in zone {}", placement.zone);
        }
    }

    /// Forget where `element` is. Unknown elements are ignored.
    pub fn remove(&mut self, element: ElementId) -> Option<Placement> {
        let removed = self.placements.remove(&element);
        if let Some(p) = &removed {
            tracing::debug!("element {element} removed from zone {}", p.zone);
        }
        removed
    }

    pub fn zone_of(&self, element: ElementId) -> Option<ZoneId> {
        self.placements.get(&element).map(|p| p.zone)
    }

    pub fn get(&self, element: ElementId) -> Option<&Placement> {
        self.placements.get(&element)
    }

    /// Elements currently in `zone`, in id order.
    pub fn occupants(&self, zone: ZoneId) -> Vec<ElementId> {
        self.placements
            .iter()
            .filter(|(_, p)| p.zone == zone)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn clear_all(&mut self) {
        self.placements.clear();
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Placement)> + '_ {
        self.placements.iter().map(|(id, p)| (*id, p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_then_remove_leaves_unplaced() {
        let mut store = PlacementStore::new();
        store.place(ElementId(0), ZoneId(1));
        assert_eq!(store.zone_of(ElementId(0)), Some(ZoneId(1)));

        store.remove(ElementId(0));
        assert_eq!(store.zone_of(ElementId(0)), None);
        assert!(store.is_empty());
    }

    #[test]
    fn second_zone_replaces_first() {
        let mut store = PlacementStore::new();
        store.place(ElementId(2), ZoneId(0));
        store.place(ElementId(2), ZoneId(1));

        assert_eq!(store.zone_of(ElementId(2)), Some(ZoneId(1)));
        assert!(store.occupants(ZoneId(0)).is_empty());
        assert_eq!(store.occupants(ZoneId(1)), vec![ElementId(2)]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut store = PlacementStore::new();
        store.place(ElementId(0), ZoneId(0));
        assert!(store.remove(ElementId(7)).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn place_at_keeps_position() {
        let mut store = PlacementStore::new();
        let position = Position {
            top: 12.5,
            left: 40.0,
        };
        store.place_at(ElementId(1), ZoneId(0), position);
        assert_eq!(store.get(ElementId(1)).unwrap().position, Some(position));

        // A plain place drops the stale position.
        store.place(ElementId(1), ZoneId(0));
        assert_eq!(store.get(ElementId(1)).unwrap().position, None);
    }

    #[test]
    fn occupants_are_sorted() {
        let mut store = PlacementStore::new();
        store.place(ElementId(3), ZoneId(0));
        store.place(ElementId(1), ZoneId(0));
        store.place(ElementId(2), ZoneId(1));
        assert_eq!(store.occupants(ZoneId(0)), vec![ElementId(1), ElementId(3)]);
    }

    #[test]
    fn clear_all_empties_store() {
        let mut store = PlacementStore::new();
        store.place(ElementId(0), ZoneId(0));
        store.place(ElementId(1), ZoneId(1));
        store.clear_all();
        assert!(store.is_empty());
        assert_eq!(store.zone_of(ElementId(1)), None);
    }
}
