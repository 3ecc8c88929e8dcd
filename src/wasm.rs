#![cfg(target_arch = "wasm32")]

use crate::config::SimulationConfig;
use crate::engine::Engine;
use crate::models::scenarios::{scenario_catalog, scenario_config, ScenarioInfo, SCENARIO_THREE_BODY};
use crate::output::TrajectoryDocument;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn available_scenarios() -> js_sys::Array {
    let out = js_sys::Array::new();
    for info in scenario_catalog() {
        out.push(&scenario_info_to_js(info));
    }
    out
}

/// Config object of a built-in scenario, to edit and feed back into `newFromConfig`.
#[wasm_bindgen]
pub fn scenario_defaults(id: &str) -> Result<JsValue, JsValue> {
    let cfg = scenario_config(id).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&cfg).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn scenario_info_to_js(info: &ScenarioInfo) -> JsValue {
    let obj = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&obj, &JsValue::from_str("id"), &JsValue::from_str(info.id));
    let _ = js_sys::Reflect::set(&obj, &JsValue::from_str("name"), &JsValue::from_str(info.name));
    let _ = js_sys::Reflect::set(
        &obj,
        &JsValue::from_str("description"),
        &JsValue::from_str(info.description),
    );
    JsValue::from(obj)
}

#[wasm_bindgen]
pub struct WasmSim {
    engine: Engine,
}

#[wasm_bindgen]
impl WasmSim {
    #[wasm_bindgen(constructor)]
    pub fn new(scenario_id: &str) -> Result<WasmSim, JsValue> {
        let engine = Engine::new_builtin(scenario_id).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmSim { engine })
    }

    pub fn new_demo() -> Result<WasmSim, JsValue> {
        WasmSim::new(SCENARIO_THREE_BODY)
    }

    /// Build simulation from a config object:
    /// {
    ///   G?: number, dt?: number, steps?: number, softening?: number,
    ///   bodies: [{ name: string, mass: f64, position: [f64;3], velocity: [f64;3], color?: string }]
    /// }
    #[wasm_bindgen(js_name = "newFromConfig")]
    pub fn new_from_config(config: JsValue) -> Result<WasmSim, JsValue> {
        let cfg: SimulationConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("invalid config: {}", e)))?;
        let engine = Engine::from_config(cfg).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmSim { engine })
    }

    pub fn len(&self) -> usize { self.engine.len() }

    pub fn dt(&self) -> f64 { self.engine.dt() }

    pub fn steps(&self) -> usize { self.engine.steps() }

    #[wasm_bindgen(js_name = "completedSteps")]
    pub fn completed_steps(&self) -> usize { self.engine.completed_steps() }

    /// Advance one step; `false` once the run is complete.
    pub fn step(&mut self) -> Result<bool, JsValue> {
        self.engine.tick().map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Run all remaining steps.
    pub fn run(&mut self) -> Result<(), JsValue> {
        self.engine
            .run()
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn positions(&self) -> Vec<f32> { self.engine.positions_flat() }

    /// Recorded path of body `index` as [x0, y0, z0, x1, ...].
    pub fn trajectory(&self, index: usize) -> Vec<f32> {
        self.engine.trajectories().path_flat_f32(index)
    }

    pub fn names(&self) -> js_sys::Array {
        let out = js_sys::Array::new();
        for name in self.engine.trajectories().names() {
            out.push(&JsValue::from_str(name));
        }
        out
    }

    pub fn colors(&self) -> js_sys::Array {
        let out = js_sys::Array::new();
        for color in self.engine.trajectories().colors() {
            out.push(&JsValue::from_str(color));
        }
        out
    }

    /// Everything recorded so far as a `{ dt, steps, bodies }` object.
    pub fn document(&self) -> JsValue {
        let doc = TrajectoryDocument::from(self.engine.trajectories());
        serde_wasm_bindgen::to_value(&doc).unwrap_or(JsValue::NULL)
    }

    pub fn energy(&self) -> f64 { self.engine.energy().total() }
}
