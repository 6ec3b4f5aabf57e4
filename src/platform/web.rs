//! JS bridge for the browser host
//!
//! The page renders from `snapshot()` and forwards clicks and a
//! `setInterval` timer to the engine.

use wasm_bindgen::prelude::*;

use crate::engine::Engine;
use crate::persistence::LocalStore;
use crate::sim::Signal;

#[wasm_bindgen]
pub struct WebGame {
    engine: Engine<LocalStore>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        super::init_logging();
        WebGame {
            engine: Engine::new(LocalStore::new(), super::initial_seed()),
        }
    }

    /// Start or restart; returns false while a game is running
    pub fn start(&mut self) -> bool {
        self.engine.start()
    }

    /// Submit a colour by name ("red", "blue", ...). Unknown names are ignored.
    #[wasm_bindgen(js_name = submitColor)]
    pub fn submit_color(&mut self, name: &str) {
        match Signal::from_str(name) {
            Some(signal) => {
                self.engine.submit_color(signal);
            }
            None => log::warn!("Unknown colour {:?}", name),
        }
    }

    pub fn tick(&mut self, dt_ms: f64) {
        self.engine.tick(dt_ms.max(0.0) as u64);
    }

    /// Current snapshot as JSON
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.engine.snapshot()).unwrap_or_default()
    }

    /// Drained events as a JSON array
    pub fn events(&mut self) -> String {
        serde_json::to_string(&self.engine.drain_events()).unwrap_or_default()
    }

    /// Palette names in display order
    pub fn palette() -> Vec<JsValue> {
        Signal::ALL
            .iter()
            .map(|s| JsValue::from_str(s.as_str()))
            .collect()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
