//! Core configuration for warehouse-motion-core.
//!
//! The timings and distance scale below are tuning values carried over from the
//! visualizer as-is. They have no derivation beyond "looks right" and can be
//! changed freely.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Engine configuration. Every section defaults, so hosts may pass partial JSON.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub route: RouteConfig,
    pub motion: MotionConfig,
    pub lifecycle: LifecycleConfig,
    /// Slot used when a scan carries no assigned location and the assigner is the fallback one.
    pub fallback_location: String,
}

/// Geometry and timing of the fixed route template.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RouteConfig {
    /// Receiving dock anchor.
    pub dock: Vec3,
    /// Height added to the dock anchor where boxes rest before departing.
    pub dock_rest_offset: f32,
    /// Depth (z) of the shared trunk conveyor.
    pub highway_z: f32,
    /// Lateral spacing between sector centres.
    pub sector_pitch: f32,
    /// Height added to a slot anchor so a box sits above the shelf.
    pub shelf_clearance: f32,
    /// Travel time per unit of distance on distance-scaled segments.
    pub ms_per_unit: f32,
    /// Floor for distance-scaled segments.
    pub min_travel_ms: f32,
    /// Dock departure (outbound first) / dock arrival (inbound last).
    pub dock_segment_ms: f32,
    /// Shelf lift (outbound last) / shelf descent (inbound first).
    pub lift_segment_ms: f32,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            dock: Vec3::new(-60.0, 0.5, 25.0),
            dock_rest_offset: 0.5,
            highway_z: 15.0,
            sector_pitch: 20.0,
            shelf_clearance: 0.8,
            ms_per_unit: 60.0,
            min_travel_ms: 1000.0,
            dock_segment_ms: 1000.0,
            lift_segment_ms: 1500.0,
        }
    }
}

impl RouteConfig {
    /// Where boxes sit at the dock.
    #[inline]
    pub fn dock_rest(&self) -> Vec3 {
        self.dock.raised(self.dock_rest_offset)
    }
}

/// Per-frame cosmetic motion.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Conveyor rattle amplitude (vertical).
    pub rattle_amplitude: f32,
    /// Rattle phase speed, radians per millisecond of engine time.
    pub rattle_frequency: f32,
    /// Peak height of the arc during lift/descent.
    pub lift_arc_height: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            rattle_amplitude: 0.02,
            rattle_frequency: 0.05,
            lift_arc_height: 2.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Shrink-and-fade window before a retired box is detached.
    pub fade_ms: f32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self { fade_ms: 800.0 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            route: RouteConfig::default(),
            motion: MotionConfig::default(),
            lifecycle: LifecycleConfig::default(),
            fallback_location: "WH_1-A-1-1".to_string(),
        }
    }
}
