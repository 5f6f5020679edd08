//! WASM exports for JavaScript interop.
//!
//! `#[wasm_bindgen]` wrapper for mounting a studio of visualizations on an
//! HTML canvas. Only compiled when targeting wasm32.

#![cfg(target_arch = "wasm32")]

use parking_lot::Mutex;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

use crate::core::Studio;
use crate::runtime::run_studio;

/// JavaScript-accessible studio wrapper
#[wasm_bindgen]
pub struct JsStudio {
    studio: Arc<Mutex<Studio>>,
    /// Canvas ID for rendering
    canvas_id: String,
    /// Whether the Bevy app has started
    started: bool,
}

#[wasm_bindgen]
impl JsStudio {
    /// Create a new JsStudio from JSON
    ///
    /// # Arguments
    /// * `json` - JSON string representing the Studio
    /// * `canvas_id` - HTML canvas element ID (without #)
    #[wasm_bindgen(constructor)]
    pub fn new(json: &str, canvas_id: &str) -> Result<JsStudio, JsValue> {
        let studio = Studio::from_json(json)
            .map_err(|e| JsValue::from_str(&format!("failed to parse studio JSON: {e:?}")))?;

        Ok(JsStudio {
            studio: Arc::new(Mutex::new(studio)),
            canvas_id: canvas_id.to_string(),
            started: false,
        })
    }

    /// Start the Bevy render loop.
    ///
    /// Call once; the embedded controls take over afterwards.
    #[wasm_bindgen]
    pub fn start(&mut self) {
        if self.started {
            web_sys::console::warn_1(&"studio already started".into());
            return;
        }

        let studio = self.studio.lock().clone();
        self.started = true;

        run_studio(studio, &self.canvas_id);
    }

    /// Replace the studio configuration.
    ///
    /// Takes effect on the next `start`; a running app keeps its state
    /// (each tile owns its controls once mounted).
    #[wasm_bindgen]
    pub fn set_studio(&mut self, json: &str) -> Result<(), JsValue> {
        let studio = Studio::from_json(json)
            .map_err(|e| JsValue::from_str(&format!("failed to parse studio JSON: {e:?}")))?;

        *self.studio.lock() = studio;
        Ok(())
    }

    /// Get the current studio configuration as JSON
    #[wasm_bindgen]
    pub fn to_json(&self) -> Result<String, JsValue> {
        let studio = self.studio.lock();
        studio
            .to_json()
            .map_err(|e| JsValue::from_str(&format!("failed to serialize studio: {e:?}")))
    }

    /// Get the canvas ID
    #[wasm_bindgen(getter)]
    pub fn canvas_id(&self) -> String {
        self.canvas_id.clone()
    }

    /// Check if the studio has been started
    #[wasm_bindgen(getter)]
    pub fn is_started(&self) -> bool {
        self.started
    }
}
