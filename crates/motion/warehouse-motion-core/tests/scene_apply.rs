use std::collections::{HashMap, HashSet};

use warehouse_motion_core::{
    apply_outputs, highlight::SLOT_ACTIVE_EMISSIVE, highlight::SLOT_IDLE_EMISSIVE, Change,
    ComplexLayout, Config, Engine, EntityId, ScanItem, ScanMode, SceneGraph, Vec3,
};

fn init_tracing() {
    let default_filter = "warehouse_motion_core=debug";
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Minimal host scene that records what the engine asked for.
#[derive(Default)]
struct RecordingScene {
    created: Vec<(EntityId, u32, String)>,
    attached: HashSet<EntityId>,
    detached: Vec<EntityId>,
    poses: HashMap<EntityId, Change>,
    emissive: HashMap<String, u32>,
}

impl SceneGraph for RecordingScene {
    fn create_entity(&mut self, entity: EntityId, color: u32, item_id: &str) {
        self.created.push((entity, color, item_id.to_string()));
    }
    fn attach(&mut self, entity: EntityId, _position: Vec3) {
        self.attached.insert(entity);
    }
    fn detach(&mut self, entity: EntityId) {
        assert!(self.attached.remove(&entity), "detach of unattached {entity:?}");
        self.detached.push(entity);
    }
    fn set_pose(&mut self, change: &Change) {
        assert!(self.attached.contains(&change.entity));
        self.poses.insert(change.entity, change.clone());
    }
    fn set_slot_emissive(&mut self, location_id: &str, color: u32) {
        self.emissive.insert(location_id.to_string(), color);
    }
}

fn engine_with_complex() -> Engine {
    let mut eng = Engine::new(Config::default());
    let mut layout = ComplexLayout::default();
    let slots: Vec<(String, String)> = layout
        .slots()
        .into_iter()
        .map(|l| (l.id, l.sector))
        .collect();
    let bound = eng.registry_mut().bind_locations(slots, &mut layout);
    assert_eq!(bound, 270);
    eng
}

/// it should drive a host scene through spawn, motion, highlight and detach
#[test]
fn replay_outputs_onto_scene() {
    init_tracing();
    let mut eng = engine_with_complex();
    let mut scene = RecordingScene::default();

    let shelved = eng
        .on_scan(
            ScanItem::new("PROD-001").with_location("WH_3-C-2-1"),
            ScanMode::StockIn,
        )
        .unwrap();
    let picked = eng
        .on_scan(
            ScanItem::new("PROD-005").with_location("WH_1-A-1-0"),
            ScanMode::StockOut,
        )
        .unwrap();
    let lost = eng
        .on_scan(
            ScanItem::new("PROD-009").with_location("WH_7-A-1-0"),
            ScanMode::Return,
        )
        .unwrap();

    // ~20s of 60fps frames covers every trip plus fades.
    for _ in 0..1200 {
        let out = eng.update(1000.0 / 60.0);
        apply_outputs(out, &mut scene);
    }

    assert_eq!(scene.created.len(), 3);
    assert_eq!(scene.created[1], (picked, 0xff3333, "PROD-005".to_string()));
    assert!(scene.attached.contains(&shelved));
    assert_eq!(scene.detached, vec![lost, picked]);

    let rest = &scene.poses[&shelved];
    assert_eq!(rest.opacity, 1.0);
    assert_eq!(rest.yaw, 0.0);
    assert_eq!(scene.poses[&picked].scale, 0.0);

    // Last highlight came from the stock-in arrival.
    assert_eq!(scene.emissive["WH_3-C-2-1"], SLOT_ACTIVE_EMISSIVE);
    assert_eq!(scene.emissive["WH_1-A-1-0"], SLOT_IDLE_EMISSIVE);
    assert_eq!(eng.entities().count(), 0);
    assert_eq!(eng.shelved().map(|e| e.id).collect::<Vec<_>>(), vec![shelved]);
}
