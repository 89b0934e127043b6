//! Scene-graph seam.
//!
//! The engine never touches a renderer. A host that prefers callbacks over
//! reading `Outputs` implements `SceneGraph` and hands each tick's outputs to
//! `apply_outputs`.

use crate::highlight::{SLOT_ACTIVE_EMISSIVE, SLOT_IDLE_EMISSIVE};
use crate::ids::EntityId;
use crate::math::Vec3;
use crate::outputs::{Change, MotionEvent, Outputs};

pub trait SceneGraph {
    /// Build the visual for a new box (not yet in the scene).
    fn create_entity(&mut self, entity: EntityId, color: u32, item_id: &str);
    fn attach(&mut self, entity: EntityId, position: Vec3);
    fn detach(&mut self, entity: EntityId);
    fn set_pose(&mut self, change: &Change);
    /// Recolour a slot marker. Hosts without slot markers can ignore this.
    fn set_slot_emissive(&mut self, _location_id: &str, _color: u32) {}
}

/// Replay one tick of outputs: spawns and highlights first, then poses, then detaches.
pub fn apply_outputs(outputs: &Outputs, scene: &mut dyn SceneGraph) {
    for event in &outputs.events {
        match event {
            MotionEvent::Spawned {
                entity,
                item_id,
                color,
                position,
            } => {
                scene.create_entity(*entity, *color, item_id);
                scene.attach(*entity, *position);
            }
            MotionEvent::HighlightChanged { previous, current } => {
                if let Some(prev) = previous {
                    scene.set_slot_emissive(prev, SLOT_IDLE_EMISSIVE);
                }
                if let Some(cur) = current {
                    scene.set_slot_emissive(cur, SLOT_ACTIVE_EMISSIVE);
                }
            }
            _ => {}
        }
    }
    for change in &outputs.changes {
        scene.set_pose(change);
    }
    for entity in outputs.detached() {
        scene.detach(entity);
    }
}
