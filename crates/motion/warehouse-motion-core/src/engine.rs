//! Engine: owns the registry, the live boxes and the clock.
//!
//! Single-threaded and frame-driven. The host calls `update(dt_ms)` once per
//! frame; every box's task (travel or fade) is advanced against the same clock
//! inside that call. Scans and highlight requests made between frames queue
//! their events for the next `update`.
//!
//! Boxes that finish an outbound trip leave the active set and are kept aside
//! as shelved: they are no longer stepped, but `retire` can still reach them.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::animator::TravelTask;
use crate::assign::{FallbackAssigner, LocationAssigner};
use crate::config::Config;
use crate::error::Result;
use crate::ids::{EntityId, IdAllocator};
use crate::lifecycle::FadeTask;
use crate::math::Vec3;
use crate::outputs::{ArrivalStatus, Change, MotionEvent, Outputs};
use crate::planner::{self, Direction};
use crate::registry::Registry;
use crate::scan::{ScanItem, ScanMode};

/// What a box is currently doing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Task {
    Travel(TravelTask),
    Fade(FadeTask),
    /// Shelved after an outbound trip; static until retired.
    Parked,
}

/// Where a box belongs after one step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Settle {
    Active,
    Shelve,
    Detach,
}

/// One box in the scene.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub item_id: String,
    pub name: Option<String>,
    pub mode: ScanMode,
    pub color: u32,
    pub location_id: String,
    pub position: Vec3,
    pub yaw: f32,
    pub scale: f32,
    pub opacity: f32,
    pub arrived: bool,
    task: Task,
}

impl Entity {
    pub fn task(&self) -> &Task {
        &self.task
    }

    fn change(&self) -> Change {
        Change {
            entity: self.id,
            position: self.position,
            yaw: self.yaw,
            scale: self.scale,
            opacity: self.opacity,
        }
    }
}

pub struct Engine {
    cfg: Config,
    ids: IdAllocator,
    registry: Registry,
    entities: IndexMap<EntityId, Entity>,
    shelved: IndexMap<EntityId, Entity>,
    assigner: Box<dyn LocationAssigner>,
    now_ms: f64,

    // Events raised between ticks, flushed by the next update.
    pending: Vec<MotionEvent>,
    outputs: Outputs,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("cfg", &self.cfg)
            .field("registry", &self.registry)
            .field("entities", &self.entities)
            .field("shelved", &self.shelved.len())
            .field("now_ms", &self.now_ms)
            .finish_non_exhaustive()
    }
}

/// Move the highlight to `location_id`, queueing an event when it actually moves.
fn highlight_slot(
    registry: &mut Registry,
    location_id: &str,
    events: &mut Vec<MotionEvent>,
) -> bool {
    let previous = registry.highlighted().map(str::to_string);
    if previous.as_deref() == Some(location_id) {
        return true;
    }
    let lit = registry.set_highlighted(location_id);
    let current = registry.highlighted().map(str::to_string);
    if previous != current {
        events.push(MotionEvent::HighlightChanged { previous, current });
    }
    lit
}

/// Advance one box to `now_ms`.
fn advance(
    entity: &mut Entity,
    now_ms: f64,
    cfg: &Config,
    registry: &mut Registry,
    out: &mut Outputs,
) -> Settle {
    loop {
        match &mut entity.task {
            Task::Parked => return Settle::Shelve,
            Task::Travel(travel) => {
                let step = travel.step(now_ms, &cfg.motion);
                let direction = travel.path().direction;
                entity.position = step.pose.position;
                entity.yaw = step.pose.yaw;

                let Some(arrived_at) = step.arrived_at_ms else {
                    out.push_change(entity.change());
                    return Settle::Active;
                };

                entity.arrived = true;
                debug!(entity = entity.id.0, location = %entity.location_id, ?direction, "arrived");
                out.push_event(MotionEvent::Arrived {
                    entity: entity.id,
                    direction,
                    status: ArrivalStatus {
                        location_id: entity.location_id.clone(),
                        mode: entity.mode,
                        label: entity.mode.status_label().to_string(),
                    },
                });
                match direction {
                    Direction::Outbound => {
                        highlight_slot(registry, &entity.location_id, &mut out.events);
                        entity.task = Task::Parked;
                        out.push_change(entity.change());
                        return Settle::Shelve;
                    }
                    Direction::Inbound => {
                        // Back at the dock: fade from the arrival instant.
                        let fade = FadeTask::new(arrived_at, cfg.lifecycle.fade_ms);
                        entity.task = Task::Fade(fade);
                        out.push_event(MotionEvent::FadeStarted { entity: entity.id });
                    }
                }
            }
            Task::Fade(fade) => {
                let step = fade.step(now_ms);
                entity.scale = step.scale;
                entity.opacity = step.opacity;
                out.push_change(entity.change());
                return if step.done {
                    Settle::Detach
                } else {
                    Settle::Active
                };
            }
        }
    }
}

impl Engine {
    /// Create an engine with an empty registry and the fallback assigner.
    pub fn new(cfg: Config) -> Self {
        let assigner = Box::new(FallbackAssigner::new(&cfg.fallback_location));
        Self {
            cfg,
            ids: IdAllocator::new(),
            registry: Registry::new(),
            entities: IndexMap::new(),
            shelved: IndexMap::new(),
            assigner,
            now_ms: 0.0,
            pending: Vec::new(),
            outputs: Outputs::default(),
        }
    }

    /// Replace the policy used for scans without an assigned location.
    pub fn with_assigner(mut self, assigner: Box<dyn LocationAssigner>) -> Self {
        self.set_assigner(assigner);
        self
    }

    pub fn set_assigner(&mut self, assigner: Box<dyn LocationAssigner>) {
        self.assigner = assigner;
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable registry access for scene builders.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn register_location(&mut self, id: &str, anchor: Vec3, sector: &str) {
        self.registry.register(id, anchor, sector);
    }

    /// Engine time in milliseconds (sum of all `dt_ms` passed to update).
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Look up a box, active or shelved.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id).or_else(|| self.shelved.get(&id))
    }

    /// Active boxes (travelling or fading), in spawn order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Boxes resting on a shelf, in arrival order.
    pub fn shelved(&self) -> impl Iterator<Item = &Entity> {
        self.shelved.values()
    }

    pub fn in_flight(&self) -> usize {
        self.entities.len()
    }

    /// Highlight one slot, clearing any other. Returns false for unknown slots
    /// (which leaves nothing highlighted).
    pub fn set_highlighted(&mut self, location_id: &str) -> bool {
        highlight_slot(&mut self.registry, location_id, &mut self.pending)
    }

    /// Spawn a box for a scan and start its trip.
    ///
    /// Only a malformed payload is an error. A destination missing from the
    /// registry still spawns the box, which then fades out at the dock.
    pub fn on_scan(&mut self, item: ScanItem, mode: ScanMode) -> Result<EntityId> {
        item.validate()?;

        let location_id = match item.assigned_location.as_deref() {
            Some(loc) if !loc.trim().is_empty() => loc.to_string(),
            _ => self.assigner.assign(&item),
        };
        let id = self.ids.alloc_entity();
        let planned = planner::plan(
            &self.cfg.route,
            &self.registry,
            &location_id,
            mode.direction(),
        );

        let (position, task) = match planned {
            Ok(path) => (path.start(), Task::Travel(TravelTask::new(path, self.now_ms))),
            Err(err) => {
                warn!(entity = id.0, item = %item.id, %err, "unroutable scan; fading at dock");
                (
                    self.cfg.route.dock_rest(),
                    Task::Fade(FadeTask::new(self.now_ms, self.cfg.lifecycle.fade_ms)),
                )
            }
        };
        let routed = matches!(task, Task::Travel(_));

        self.pending.push(MotionEvent::Spawned {
            entity: id,
            item_id: item.id.clone(),
            color: mode.color(),
            position,
        });
        // An unknown slot clears whatever was lit before.
        highlight_slot(&mut self.registry, &location_id, &mut self.pending);
        if !routed {
            self.pending.push(MotionEvent::Unroutable {
                entity: id,
                location_id: location_id.clone(),
            });
            self.pending.push(MotionEvent::FadeStarted { entity: id });
        }

        debug!(entity = id.0, item = %item.label(), %mode, location = %location_id, "spawned");
        self.entities.insert(
            id,
            Entity {
                id,
                item_id: item.id,
                name: item.name,
                mode,
                color: mode.color(),
                location_id,
                position,
                yaw: 0.0,
                scale: 1.0,
                opacity: 1.0,
                arrived: false,
                task,
            },
        );
        Ok(id)
    }

    /// Send a box to the fade lifecycle now. Nothing inside the engine calls
    /// this; trips otherwise always run to completion. Returns false if the box
    /// is unknown or already fading.
    pub fn retire(&mut self, id: EntityId) -> bool {
        let fade = Task::Fade(FadeTask::new(self.now_ms, self.cfg.lifecycle.fade_ms));
        if let Some(mut entity) = self.shelved.shift_remove(&id) {
            entity.task = fade;
            self.entities.insert(id, entity);
        } else {
            let Some(entity) = self.entities.get_mut(&id) else {
                return false;
            };
            if matches!(entity.task, Task::Fade(_)) {
                return false;
            }
            entity.task = fade;
        }
        self.pending.push(MotionEvent::FadeStarted { entity: id });
        true
    }

    /// Advance the clock by `dt_ms` and step every box. Returns this tick's outputs.
    pub fn update(&mut self, dt_ms: f64) -> &Outputs {
        self.outputs.clear();
        self.outputs.events.append(&mut self.pending);
        self.now_ms += dt_ms.max(0.0);

        let mut settled = Vec::new();
        for (id, entity) in self.entities.iter_mut() {
            let settle = advance(
                entity,
                self.now_ms,
                &self.cfg,
                &mut self.registry,
                &mut self.outputs,
            );
            if settle != Settle::Active {
                settled.push((*id, settle));
            }
        }
        for (id, settle) in settled {
            let Some(entity) = self.entities.shift_remove(&id) else {
                continue;
            };
            if settle == Settle::Shelve {
                self.shelved.insert(id, entity);
            } else {
                debug!(entity = id.0, "detached");
                self.outputs.push_event(MotionEvent::Detached { entity: id });
            }
        }

        &self.outputs
    }
}
