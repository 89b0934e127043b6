#![cfg(target_arch = "wasm32")]
use serde::Serialize;
use serde_json::json;
use serde_wasm_bindgen as swb;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use warehouse_motion_wasm::{abi_version, WarehouseMotion};

wasm_bindgen_test_configure!(run_in_browser);

// Plain JS objects rather than Maps, as a host page would pass.
fn js(v: serde_json::Value) -> JsValue {
    v.serialize(&swb::Serializer::json_compatible()).unwrap()
}

fn events(outputs: &JsValue) -> js_sys::Array {
    let obj = js_sys::Object::from(outputs.clone());
    js_sys::Array::from(&js_sys::Reflect::get(&obj, &JsValue::from_str("events")).unwrap())
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_defaults_and_partial_config() {
    assert!(WarehouseMotion::new(JsValue::UNDEFINED).is_ok());
    assert!(WarehouseMotion::new(js(json!({ "lifecycle": { "fade_ms": 400.0 } }))).is_ok());
    assert!(WarehouseMotion::new(js(json!({ "lifecycle": { "fade_ms": "slow" } }))).is_err());
}

#[wasm_bindgen_test]
fn scan_and_update_round_trip() {
    let mut eng = WarehouseMotion::new(JsValue::NULL).unwrap();
    assert_eq!(eng.load_default_layout(), 270);

    let id = eng
        .on_scan(js(json!({ "id": "PROD-001", "assignedLocation": "WH_2-A-1-0" })), "add".into())
        .unwrap();
    assert_eq!(id, 0);
    assert_eq!(eng.highlighted().as_deref(), Some("WH_2-A-1-0"));

    let out = eng.update(16.0).unwrap();
    assert!(events(&out).length() >= 1);
    assert_eq!(eng.in_flight(), 1);

    eng.update(60_000.0).unwrap();
    assert_eq!(eng.in_flight(), 0);
    assert_eq!(eng.entity_ids().length(), 0);
    assert_eq!(eng.shelved_ids().length(), 1);
}

#[wasm_bindgen_test]
fn bad_mode_and_missing_item_are_errors() {
    let mut eng = WarehouseMotion::new(JsValue::NULL).unwrap();
    assert!(eng
        .on_scan(js(json!({ "id": "PROD-001" })), "transfer".into())
        .is_err());
    assert!(eng.on_scan(JsValue::UNDEFINED, "add".into()).is_err());
    assert!(eng.on_scan(js(json!({ "id": "" })), "add".into()).is_err());
}

#[wasm_bindgen_test]
fn bind_locations_with_js_resolver() {
    let mut eng = WarehouseMotion::new(JsValue::NULL).unwrap();
    let resolver = js_sys::Function::new_with_args(
        "id",
        "return id === 'WH_1-A-1-1' ? [-46, 0.75, 5] : null;",
    );
    let bound = eng
        .bind_locations(js(json!([["WH_1-A-1-1", "WH_1"], ["WH_1-A-1-2", "WH_1"]])), resolver)
        .unwrap();
    assert_eq!(bound, 1);
    assert!(eng.set_highlighted("WH_1-A-1-1".into()));
    assert!(!eng.set_highlighted("WH_1-A-1-2".into()));
}
