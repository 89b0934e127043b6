//! Location registry: slot identifier → anchor position.
//!
//! Populated once while the scene is built (directly via `register`, or through a
//! `PositionResolver` that stands in for the scene's world-position lookup), then
//! read-only apart from the highlight.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};
use crate::highlight::HighlightController;
use crate::math::Vec3;

/// One storage slot.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: String,
    /// Slot marker position in world space (before shelf clearance).
    pub anchor: Vec3,
    /// Owning sector, e.g. `WH_2`.
    pub sector: String,
}

/// Looks up the world position of a slot marker in the host scene.
/// Adapters implement this and pass it into `Registry::bind_locations`.
pub trait PositionResolver {
    fn world_position(&mut self, location_id: &str) -> Option<Vec3>;
}

#[derive(Debug, Default)]
pub struct Registry {
    slots: HashMap<String, Location>,
    highlight: HighlightController,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) one slot.
    pub fn register(&mut self, id: &str, anchor: Vec3, sector: &str) {
        self.slots.insert(
            id.to_string(),
            Location {
                id: id.to_string(),
                anchor,
                sector: sector.to_string(),
            },
        );
    }

    /// Register every `(id, sector)` pair the resolver can place. Returns how many were bound.
    pub fn bind_locations<I, S>(&mut self, slots: I, resolver: &mut dyn PositionResolver) -> usize
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut bound = 0;
        for (id, sector) in slots {
            let id = id.as_ref();
            match resolver.world_position(id) {
                Some(anchor) => {
                    self.register(id, anchor, sector.as_ref());
                    bound += 1;
                }
                None => tracing::warn!(location = id, "no world position for slot; skipped"),
            }
        }
        bound
    }

    pub fn resolve(&self, id: &str) -> Result<Vec3> {
        self.slots
            .get(id)
            .map(|l| l.anchor)
            .ok_or_else(|| MotionError::UnknownLocation { id: id.to_string() })
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.slots.get(id)
    }

    /// Highlight `id` and clear every other slot. Unknown ids clear the highlight
    /// and return false.
    pub fn set_highlighted(&mut self, id: &str) -> bool {
        if self.slots.contains_key(id) {
            self.highlight.set(id);
            true
        } else {
            self.highlight.clear();
            false
        }
    }

    pub fn is_highlighted(&self, id: &str) -> bool {
        self.highlight.is(id)
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlight.current()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.slots.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MapResolver(std::collections::HashMap<&'static str, Vec3>);
    impl PositionResolver for MapResolver {
        fn world_position(&mut self, location_id: &str) -> Option<Vec3> {
            self.0.get(location_id).copied()
        }
    }

    #[test]
    fn resolve_known_and_unknown() {
        let mut reg = Registry::new();
        reg.register("WH_2-A-1-0", Vec3::new(-20.0, 0.15, 14.0), "WH_2");
        assert_eq!(reg.resolve("WH_2-A-1-0"), Ok(Vec3::new(-20.0, 0.15, 14.0)));
        assert_eq!(
            reg.resolve("WH_9-Z-9-9"),
            Err(MotionError::UnknownLocation {
                id: "WH_9-Z-9-9".into()
            })
        );
        assert_eq!(reg.get("WH_2-A-1-0").map(|l| l.sector.as_str()), Some("WH_2"));
    }

    #[test]
    fn highlight_is_exclusive() {
        let mut reg = Registry::new();
        for id in ["a", "b", "c"] {
            reg.register(id, Vec3::default(), "WH_1");
        }
        assert!(reg.set_highlighted("a"));
        assert!(reg.set_highlighted("c"));
        assert!(reg.set_highlighted("b"));
        let lit: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .filter(|id| reg.is_highlighted(id))
            .collect();
        assert_eq!(lit, vec!["b"]);

        assert!(!reg.set_highlighted("missing"));
        assert_eq!(reg.highlighted(), None);
    }

    #[test]
    fn bind_locations_skips_unplaced_slots() {
        let mut resolver = MapResolver(
            [("WH_1-A-1-0", Vec3::new(-46.8, 0.75, 5.0))]
                .into_iter()
                .collect(),
        );
        let mut reg = Registry::new();
        let bound = reg.bind_locations(
            [("WH_1-A-1-0", "WH_1"), ("WH_1-A-1-1", "WH_1")],
            &mut resolver,
        );
        assert_eq!(bound, 1);
        assert_eq!(reg.len(), 1);
        assert!(reg.resolve("WH_1-A-1-1").is_err());
    }
}
