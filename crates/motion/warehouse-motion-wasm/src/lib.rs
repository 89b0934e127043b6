use js_sys::{Array, Function};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use warehouse_motion_core::{
    ComplexLayout, Config, DemandZoneAssigner, Engine, EntityId, Outputs, PositionResolver,
    ScanItem, ScanMode, Vec3,
};

#[wasm_bindgen]
pub struct WarehouseMotion {
    core: Engine,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Adapts a JS `worldPosition(id)` callback. Accepts `[x, y, z]` or `{x, y, z}`.
struct JsResolver {
    f: Function,
}

impl PositionResolver for JsResolver {
    fn world_position(&mut self, location_id: &str) -> Option<Vec3> {
        let arg = JsValue::from_str(location_id);
        match self.f.call1(&JsValue::UNDEFINED, &arg) {
            Ok(val) => {
                if jsvalue_is_undefined_or_null(&val) {
                    return None;
                }
                if let Ok(arr) = swb::from_value::<[f32; 3]>(val.clone()) {
                    return Some(Vec3::from(arr));
                }
                swb::from_value::<Vec3>(val).ok()
            }
            Err(_) => None,
        }
    }
}

#[wasm_bindgen]
impl WarehouseMotion {
    /// Create a new engine. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new WarehouseMotion({ lifecycle: { fade_ms: 600 } })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WarehouseMotion, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        Ok(WarehouseMotion {
            core: Engine::new(cfg),
        })
    }

    /// Assign unplaced items by demand tier with a reproducible random sequence.
    #[wasm_bindgen(js_name = use_seeded_assigner)]
    pub fn use_seeded_assigner(&mut self, seed: u32) {
        self.core
            .set_assigner(Box::new(DemandZoneAssigner::seeded(u64::from(seed))));
    }

    /// Register one slot anchor.
    #[wasm_bindgen(js_name = register_location)]
    pub fn register_location(&mut self, id: String, x: f32, y: f32, z: f32, sector: String) {
        self.core
            .register_location(&id, Vec3::new(x, y, z), &sector);
    }

    /// Register every slot of the default five-sector complex. Returns the slot count.
    #[wasm_bindgen(js_name = load_default_layout)]
    pub fn load_default_layout(&mut self) -> u32 {
        ComplexLayout::default().populate(self.core.registry_mut()) as u32
    }

    /// Register slots whose positions live in the host scene.
    /// `slots` is an array of `[id, sector]` pairs; `resolver(id)` returns
    /// `[x, y, z]`, `{x, y, z}` or null. Returns how many slots were bound.
    #[wasm_bindgen(js_name = bind_locations)]
    pub fn bind_locations(&mut self, slots: JsValue, resolver: Function) -> Result<u32, JsError> {
        let pairs: Vec<(String, String)> = swb::from_value(slots)
            .map_err(|e| JsError::new(&format!("bind_locations slots error: {e}")))?;
        let mut js_resolver = JsResolver { f: resolver };
        Ok(self
            .core
            .registry_mut()
            .bind_locations(pairs, &mut js_resolver) as u32)
    }

    /// Handle a scan. `item` is `{ id, name?, assigned_location?, demand? }`;
    /// `mode` is "add", "remove" or "return". Returns the new box id.
    #[wasm_bindgen(js_name = on_scan)]
    pub fn on_scan(&mut self, item: JsValue, mode: String) -> Result<u32, JsError> {
        if jsvalue_is_undefined_or_null(&item) {
            return Err(JsError::new("on_scan: item is null/undefined"));
        }
        let item: ScanItem =
            swb::from_value(item).map_err(|e| JsError::new(&format!("scan item error: {e}")))?;
        let mode: ScanMode = mode
            .parse()
            .map_err(|e| JsError::new(&format!("scan mode error: {e}")))?;
        let id = self
            .core
            .on_scan(item, mode)
            .map_err(|e| JsError::new(&format!("on_scan error: {e}")))?;
        Ok(id.0)
    }

    /// Step every box by dt (milliseconds). Returns Outputs JSON `{ changes, events }`.
    #[wasm_bindgen]
    pub fn update(&mut self, dt_ms: f64) -> Result<JsValue, JsError> {
        let out: &Outputs = self.core.update(dt_ms);
        swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    #[wasm_bindgen(js_name = set_highlighted)]
    pub fn set_highlighted(&mut self, location_id: String) -> bool {
        self.core.set_highlighted(&location_id)
    }

    #[wasm_bindgen(js_name = highlighted)]
    pub fn highlighted(&self) -> Option<String> {
        self.core.registry().highlighted().map(str::to_string)
    }

    /// Start fading a box now.
    #[wasm_bindgen]
    pub fn retire(&mut self, entity: u32) -> bool {
        self.core.retire(EntityId(entity))
    }

    /// Number of boxes still travelling or fading.
    #[wasm_bindgen(js_name = in_flight)]
    pub fn in_flight(&self) -> u32 {
        self.core.in_flight() as u32
    }

    /// Ids of boxes still travelling or fading.
    #[wasm_bindgen(js_name = entity_ids)]
    pub fn entity_ids(&self) -> Array {
        self.core
            .entities()
            .map(|e| JsValue::from(e.id.0))
            .collect()
    }

    /// Ids of boxes resting on a shelf.
    #[wasm_bindgen(js_name = shelved_ids)]
    pub fn shelved_ids(&self) -> Array {
        self.core
            .shelved()
            .map(|e| JsValue::from(e.id.0))
            .collect()
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
