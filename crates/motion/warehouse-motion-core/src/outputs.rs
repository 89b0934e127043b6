//! Output contracts from the motion engine.
//!
//! Outputs carry the per-tick pose changes of every animating box, keyed by
//! EntityId, and a separate list of discrete events. Adapters (WASM, or any
//! `SceneGraph`) apply the changes to the host scene and surface the events.

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;
use crate::math::Vec3;
use crate::planner::Direction;
use crate::scan::ScanMode;

/// Full visual state of one box this tick.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Change {
    pub entity: EntityId,
    pub position: Vec3,
    pub yaw: f32,
    pub scale: f32,
    pub opacity: f32,
}

/// Payload for the status panel once a box arrives.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ArrivalStatus {
    pub location_id: String,
    pub mode: ScanMode,
    pub label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum MotionEvent {
    /// Host should create and attach a box.
    Spawned {
        entity: EntityId,
        item_id: String,
        color: u32,
        position: Vec3,
    },
    /// Box reached the end of its path.
    Arrived {
        entity: EntityId,
        direction: Direction,
        status: ArrivalStatus,
    },
    /// Slot highlight moved. `previous` should go back to the idle emissive.
    HighlightChanged {
        previous: Option<String>,
        current: Option<String>,
    },
    /// Destination could not be resolved; the box fades where it stands.
    Unroutable {
        entity: EntityId,
        location_id: String,
    },
    FadeStarted {
        entity: EntityId,
    },
    /// Host should detach the box; it is gone from the engine.
    Detached {
        entity: EntityId,
    },
}

/// Outputs returned by Engine::update().
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<MotionEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: MotionEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// Status payloads raised this tick, in order.
    pub fn statuses(&self) -> impl Iterator<Item = &ArrivalStatus> {
        self.events.iter().filter_map(|e| match e {
            MotionEvent::Arrived { status, .. } => Some(status),
            _ => None,
        })
    }

    pub fn detached(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.events.iter().filter_map(|e| match e {
            MotionEvent::Detached { entity } => Some(*entity),
            _ => None,
        })
    }
}
