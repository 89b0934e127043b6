//! Path planner: fixed route template between the dock and a storage slot.
//!
//! Every route runs dock → trunk conveyor → sector bay → slot, or the reverse:
//!
//! ```text
//!   W0 dock rest      (dock.x, y, dock.z)
//!   W1 trunk entry    (dock.x, y, highway_z)
//!   W2 sector bay     (centre_x, y, highway_z)
//!   W3 below slot     (centre_x, y, slot.z)
//!   W4 slot           (slot anchor + shelf clearance)
//! ```
//!
//! `centre_x` is the slot's lateral coordinate snapped to the sector pitch. The
//! inbound route is the same five points reversed, with reversed durations.

use std::f32::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::config::RouteConfig;
use crate::error::Result;
use crate::math::{round_to_pitch, Vec3};
use crate::registry::Registry;

/// Outbound = dock → slot (stock-in, return). Inbound = slot → dock (stock-out).
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    Outbound,
    Inbound,
}

impl Direction {
    /// Heading used when a belt segment has zero length.
    fn default_heading(self) -> f32 {
        match self {
            Direction::Outbound => 0.0,
            Direction::Inbound => PI,
        }
    }
}

/// How a box moves along one segment.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum SegmentMotion {
    /// Conveyor travel: linear, fixed yaw, rattle.
    Belt { heading: f32 },
    /// Robotic arm placement or retrieval: eased, arcing, spinning.
    Lift,
}

/// Waypoints plus per-segment timing. Immutable once planned.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Path {
    pub direction: Direction,
    pub waypoints: Vec<Vec3>,
    /// One entry per segment (waypoints.len() - 1), milliseconds.
    pub durations_ms: Vec<f32>,
    /// One entry per segment.
    pub motions: Vec<SegmentMotion>,
}

impl Path {
    pub fn segment_count(&self) -> usize {
        self.durations_ms.len()
    }

    pub fn total_duration_ms(&self) -> f32 {
        self.durations_ms.iter().sum()
    }

    pub fn start(&self) -> Vec3 {
        self.waypoints[0]
    }

    pub fn end(&self) -> Vec3 {
        self.waypoints[self.waypoints.len() - 1]
    }
}

/// Yaw for a belt segment, from its dominant axis:
/// -z → 0, +z → π, +x → -π/2, -x → π/2.
fn belt_heading(from: Vec3, to: Vec3, fallback: f32) -> f32 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    if dx == 0.0 && dz == 0.0 {
        return fallback;
    }
    if dz.abs() >= dx.abs() {
        if dz < 0.0 {
            0.0
        } else {
            PI
        }
    } else if dx > 0.0 {
        -FRAC_PI_2
    } else {
        FRAC_PI_2
    }
}

#[inline]
fn scaled_ms(cfg: &RouteConfig, distance: f32) -> f32 {
    (distance.abs() * cfg.ms_per_unit).max(cfg.min_travel_ms)
}

/// Dock → slot. `start` is where the box currently sits; `target` is the slot
/// anchor already raised by the shelf clearance.
pub fn outbound(cfg: &RouteConfig, start: Vec3, target: Vec3) -> Path {
    let centre_x = round_to_pitch(target.x, cfg.sector_pitch);
    let waypoints = vec![
        start,
        Vec3::new(cfg.dock.x, start.y, cfg.highway_z),
        Vec3::new(centre_x, start.y, cfg.highway_z),
        Vec3::new(centre_x, start.y, target.z),
        target,
    ];
    let durations_ms = vec![
        cfg.dock_segment_ms,
        scaled_ms(cfg, centre_x - cfg.dock.x),
        scaled_ms(cfg, target.z - cfg.highway_z),
        cfg.lift_segment_ms,
    ];
    let fallback = Direction::Outbound.default_heading();
    let motions = vec![
        SegmentMotion::Belt {
            heading: belt_heading(waypoints[0], waypoints[1], fallback),
        },
        SegmentMotion::Belt {
            heading: belt_heading(waypoints[1], waypoints[2], fallback),
        },
        SegmentMotion::Belt {
            heading: belt_heading(waypoints[2], waypoints[3], fallback),
        },
        SegmentMotion::Lift,
    ];
    Path {
        direction: Direction::Outbound,
        waypoints,
        durations_ms,
        motions,
    }
}

/// Slot → dock. `target` is the raised slot anchor the box starts from; `dock`
/// is where it comes to rest.
pub fn inbound(cfg: &RouteConfig, target: Vec3, dock: Vec3) -> Path {
    let centre_x = round_to_pitch(target.x, cfg.sector_pitch);
    let waypoints = vec![
        target,
        Vec3::new(centre_x, dock.y, target.z),
        Vec3::new(centre_x, dock.y, cfg.highway_z),
        Vec3::new(cfg.dock.x, dock.y, cfg.highway_z),
        dock,
    ];
    let durations_ms = vec![
        cfg.lift_segment_ms,
        scaled_ms(cfg, target.z - cfg.highway_z),
        scaled_ms(cfg, centre_x - cfg.dock.x),
        cfg.dock_segment_ms,
    ];
    let fallback = Direction::Inbound.default_heading();
    let motions = vec![
        SegmentMotion::Lift,
        SegmentMotion::Belt {
            heading: belt_heading(waypoints[1], waypoints[2], fallback),
        },
        SegmentMotion::Belt {
            heading: belt_heading(waypoints[2], waypoints[3], fallback),
        },
        SegmentMotion::Belt {
            heading: belt_heading(waypoints[3], waypoints[4], fallback),
        },
    ];
    Path {
        direction: Direction::Inbound,
        waypoints,
        durations_ms,
        motions,
    }
}

/// Resolve `location_id` and plan between it and the dock rest position.
/// Fails with `UnknownLocation` when the slot is not registered.
pub fn plan(
    cfg: &RouteConfig,
    registry: &Registry,
    location_id: &str,
    direction: Direction,
) -> Result<Path> {
    let target = registry.resolve(location_id)?.raised(cfg.shelf_clearance);
    let dock = cfg.dock_rest();
    Ok(match direction {
        Direction::Outbound => outbound(cfg, dock, target),
        Direction::Inbound => inbound(cfg, target, dock),
    })
}
