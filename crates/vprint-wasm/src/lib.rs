//! WebAssembly bindings for printf variable rendering.
//!
//! The host plugin exports its local variables and the candidate text nodes
//! as JSON; the engine returns the text to write into each node.
//!
//! ## Example
//!
//! ```js
//! import { PrintfEngine } from 'vprint-wasm';
//!
//! const engine = new PrintfEngine();
//! engine.loadVariables({
//!   variables: await figma.variables.getLocalVariablesAsync(),
//!   collections: await figma.variables.getLocalVariableCollectionsAsync(),
//! });
//!
//! const result = engine.renderAll(textNodes.map(n => ({
//!   id: n.id,
//!   name: n.name,
//!   fontName: n.fontName,
//!   resolvedVariableModes: n.resolvedVariableModes,
//! })));
//!
//! for (const w of result.writes) {
//!   await figma.loadFontAsync(w.fontName);
//!   figma.getNodeById(w.nodeId).characters = w.text;
//! }
//! if (result.error) throw new Error(result.error);
//! figma.notify(result.summary);
//! ```

use indexmap::IndexMap;
use vprint_parser::parse_printf_name;
use vprint_resolver::{Candidate, RenderOptions, Renderer, VariableDirectory};
use wasm_bindgen::prelude::*;

mod types;

pub use types::*;

/// Initialize panic hook and logging for the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();
}

/// The printf rendering engine for JavaScript.
#[wasm_bindgen]
pub struct PrintfEngine {
    directory: VariableDirectory,
    options: RenderOptions,
}

#[wasm_bindgen]
impl PrintfEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            directory: VariableDirectory::default(),
            options: RenderOptions::default(),
        }
    }

    /// Get the version of the engine.
    #[wasm_bindgen(js_name = version)]
    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Load variables from a `{ variables, collections }` object.
    #[wasm_bindgen(js_name = loadVariables)]
    pub fn load_variables(&mut self, snapshot: JsValue) -> Result<(), JsError> {
        let snapshot: VariableSnapshotJs = serde_wasm_bindgen::from_value(snapshot)
            .map_err(|e| JsError::new(&format!("Invalid variables: {}", e)))?;
        self.install(snapshot)
    }

    /// Load variables from a JSON string.
    #[wasm_bindgen(js_name = loadVariablesFromString)]
    pub fn load_variables_from_string(&mut self, json: &str) -> Result<(), JsError> {
        let snapshot: VariableSnapshotJs = serde_json::from_str(json)
            .map_err(|e| JsError::new(&format!("Invalid JSON: {}", e)))?;
        self.install(snapshot)
    }

    /// Clear all loaded variables.
    #[wasm_bindgen(js_name = clearVariables)]
    pub fn clear_variables(&mut self) {
        self.directory = VariableDirectory::default();
    }

    /// Number of loaded variables.
    #[wasm_bindgen(js_name = variableCount)]
    pub fn variable_count(&self) -> usize {
        self.directory.len()
    }

    /// Set render options, e.g. `{ failurePolicy: "isolate", notify: true }`.
    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&mut self, options: JsValue) -> Result<(), JsError> {
        self.options = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::new(&format!("Invalid render options: {}", e)))?;
        Ok(())
    }

    /// Parse a node name. Returns `undefined` for non-printf names.
    #[wasm_bindgen(js_name = parseName)]
    pub fn parse_name(&self, name: &str) -> Result<JsValue, JsError> {
        match parse_printf_name(name) {
            Some(call) => serde_wasm_bindgen::to_value(&PrintfCallJs::from(call))
                .map_err(|e| JsError::new(&format!("Serialization error: {}", e))),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Render a single node name with its resolved modes
    /// (`{ [collectionId]: modeId }`). Returns `undefined` for non-printf names.
    #[wasm_bindgen(js_name = renderName)]
    pub fn render_name(&self, name: &str, resolved_modes: JsValue) -> Result<Option<String>, JsError> {
        let modes: Option<IndexMap<String, String>> = serde_wasm_bindgen::from_value(resolved_modes)
            .map_err(|e| JsError::new(&format!("Invalid modes: {}", e)))?;

        let mut candidate = Candidate::new("", name);
        for (collection, mode) in modes.unwrap_or_default() {
            candidate = candidate.with_mode(collection, mode);
        }

        Renderer::new(&self.directory)
            .render_one(&candidate)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Render a batch of candidate nodes.
    #[wasm_bindgen(js_name = renderAll)]
    pub fn render_all(&self, candidates: JsValue) -> Result<JsValue, JsError> {
        let candidates: Vec<CandidateJs> = serde_wasm_bindgen::from_value(candidates)
            .map_err(|e| JsError::new(&format!("Invalid candidates: {}", e)))?;

        let result = render_batch(&self.directory, &self.options, candidates);

        serde_wasm_bindgen::to_value(&result)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }
}

impl PrintfEngine {
    fn install(&mut self, snapshot: VariableSnapshotJs) -> Result<(), JsError> {
        self.directory = VariableDirectory::from_source(&snapshot.into_source())
            .map_err(|e| JsError::new(&e.to_string()))?;
        tracing::info!(variables = self.directory.len(), "loaded variables");
        Ok(())
    }
}

impl Default for PrintfEngine {
    fn default() -> Self {
        Self::new()
    }
}
