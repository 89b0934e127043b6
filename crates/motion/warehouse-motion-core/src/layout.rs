//! Default slot layout of the five-sector complex.
//!
//! Only slot anchors are produced here; walls, racks and belts belong to the
//! host's scene builder. Slot ids follow `WH_<n>-<rack>-<level>-<slot>`, e.g.
//! `WH_2-C-3-0`.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;
use crate::registry::{Location, PositionResolver, Registry};

/// One rack position relative to its sector centre.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RackSpec {
    pub label: char,
    pub dx: f32,
    pub dz: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComplexLayout {
    /// Lateral centre of each sector; sector n+1 sits at index n.
    pub sector_centres: Vec<f32>,
    /// Depth of every sector centre.
    pub sector_z: f32,
    pub racks: Vec<RackSpec>,
    pub levels: u32,
    pub slots_per_level: u32,
    /// Lateral distance between neighbouring slots on a shelf.
    pub slot_spacing: f32,
    /// Vertical distance between shelves.
    pub level_height: f32,
    /// Slot marker height above its shelf.
    pub marker_lift: f32,
}

impl Default for ComplexLayout {
    fn default() -> Self {
        let rack = |label, dx, dz| RackSpec { label, dx, dz };
        Self {
            sector_centres: vec![-40.0, -20.0, 0.0, 20.0, 40.0],
            sector_z: 0.0,
            racks: vec![
                rack('A', -6.0, 5.0),
                rack('B', 6.0, 5.0),
                rack('C', -6.0, -5.0),
                rack('D', 6.0, -5.0),
                rack('E', -6.0, -11.0),
                rack('F', 6.0, -11.0),
            ],
            levels: 3,
            slots_per_level: 3,
            slot_spacing: 0.8,
            level_height: 1.2,
            marker_lift: 0.15,
        }
    }
}

impl ComplexLayout {
    pub fn sector_id(index: usize) -> String {
        format!("WH_{}", index + 1)
    }

    pub fn sector_ids(&self) -> Vec<String> {
        (0..self.sector_centres.len()).map(Self::sector_id).collect()
    }

    fn anchor(&self, centre_x: f32, rack: &RackSpec, level: u32, slot: u32) -> Vec3 {
        let middle = (self.slots_per_level.saturating_sub(1)) as f32 / 2.0;
        let shelf_y = level as f32 * self.level_height - self.level_height / 2.0;
        Vec3::new(
            centre_x + rack.dx + (slot as f32 - middle) * self.slot_spacing,
            shelf_y + self.marker_lift,
            self.sector_z + rack.dz,
        )
    }

    /// Every slot in the complex, sector by sector.
    pub fn slots(&self) -> Vec<Location> {
        let mut out = Vec::new();
        for (index, centre_x) in self.sector_centres.iter().enumerate() {
            let sector = Self::sector_id(index);
            for rack in &self.racks {
                for level in 1..=self.levels {
                    for slot in 0..self.slots_per_level {
                        out.push(Location {
                            id: format!("{sector}-{}-{level}-{slot}", rack.label),
                            anchor: self.anchor(*centre_x, rack, level, slot),
                            sector: sector.clone(),
                        });
                    }
                }
            }
        }
        out
    }

    /// Register every slot. Returns the number registered.
    pub fn populate(&self, registry: &mut Registry) -> usize {
        let slots = self.slots();
        for loc in &slots {
            registry.register(&loc.id, loc.anchor, &loc.sector);
        }
        slots.len()
    }
}

impl PositionResolver for ComplexLayout {
    fn world_position(&mut self, location_id: &str) -> Option<Vec3> {
        let mut parts = location_id.split('-');
        let sector = parts.next()?;
        let index: usize = sector.strip_prefix("WH_")?.parse().ok()?;
        let label = parts.next()?;
        let level: u32 = parts.next()?.parse().ok()?;
        let slot: u32 = parts.next()?.parse().ok()?;
        if parts.next().is_some() || index == 0 {
            return None;
        }
        let mut chars = label.chars();
        let label = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let centre_x = *self.sector_centres.get(index - 1)?;
        let rack = self.racks.iter().find(|r| r.label == label)?;
        if !(1..=self.levels).contains(&level) || slot >= self.slots_per_level {
            return None;
        }
        Some(self.anchor(centre_x, rack, level, slot))
    }
}
