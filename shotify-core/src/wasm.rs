//! WebAssembly bindings for shotify-core.
//!
//! Every function takes and returns JSON strings so the editor can pass its
//! stored documents through unchanged. Errors surface as strings.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::gradient::to_css_gradient;
use crate::normalize::normalize_properties;
use crate::{
    place_for_editing, place_for_export, Canvas, ExportPlan, ExportSize, Layer, LayerId, Slide,
    TemplateConfig,
};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Normalize a raw property payload (map or `{Key, Value}` list).
///
/// # Errors
///
/// Returns an error string if the input is not JSON.
#[wasm_bindgen(js_name = normalizeProperties)]
pub fn normalize_properties_json(raw: &str) -> Result<String, String> {
    let value: serde_json::Value = parse(raw)?;
    to_json(&normalize_properties(&value))
}

/// Editor placement of a layer on a canvas.
///
/// # Errors
///
/// Returns an error string if either document fails to parse.
#[wasm_bindgen(js_name = placeForEditing)]
pub fn place_for_editing_json(layer: &str, canvas: &str) -> Result<String, String> {
    let layer: Layer = parse(layer)?;
    let canvas: Canvas = parse(canvas)?;
    to_json(&place_for_editing(&layer, &canvas, &layer.layout_config()))
}

/// Export pixel box of a layer.
///
/// # Errors
///
/// Returns an error string if any document fails to parse.
#[wasm_bindgen(js_name = placeForExport)]
pub fn place_for_export_json(layer: &str, canvas: &str, export: &str) -> Result<String, String> {
    let layer: Layer = parse(layer)?;
    let canvas: Canvas = parse(canvas)?;
    let export: ExportSize = parse(export)?;
    to_json(&place_for_export(
        &layer,
        &canvas,
        &export,
        &layer.layout_config(),
    ))
}

/// CSS `background` value for a gradient property payload.
///
/// # Errors
///
/// Returns an error string if the input is not JSON.
#[wasm_bindgen(js_name = gradientCss)]
pub fn gradient_css(raw: &str) -> Result<String, String> {
    let value: serde_json::Value = parse(raw)?;
    Ok(to_css_gradient(&normalize_properties(&value)))
}

/// A slide held on the Rust side between calls.
#[wasm_bindgen]
pub struct WasmSlide {
    slide: Slide,
}

#[wasm_bindgen]
impl WasmSlide {
    /// Load the base slide of a template document.
    ///
    /// # Errors
    ///
    /// Returns an error string if the document is malformed.
    #[wasm_bindgen(constructor)]
    pub fn new(template: &str) -> Result<WasmSlide, String> {
        let template = TemplateConfig::from_json(template).map_err(|e| e.to_string())?;
        let slide = template.base_slide().map_err(|e| e.to_string())?;
        Ok(Self { slide })
    }

    /// Number of layers.
    #[wasm_bindgen(js_name = layerCount)]
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.slide.layer_count()
    }

    /// Editor placement of one layer.
    ///
    /// # Errors
    ///
    /// Returns an error string if the layer does not exist.
    #[wasm_bindgen(js_name = placeLayer)]
    pub fn place_layer(&self, id: &str) -> Result<String, String> {
        let layer = self
            .slide
            .get_layer(&LayerId::from(id))
            .ok_or_else(|| format!("Layer not found: {id}"))?;
        to_json(&place_for_editing(
            layer,
            &self.slide.canvas,
            &layer.layout_config(),
        ))
    }

    /// Export plan at the given size.
    ///
    /// # Errors
    ///
    /// Returns an error string if the size is malformed or invalid.
    #[wasm_bindgen(js_name = planFor)]
    pub fn plan_for(&self, export: &str) -> Result<String, String> {
        let export: ExportSize = parse(export)?;
        export.validate().map_err(|e| e.to_string())?;
        to_json(&ExportPlan::build(&self.slide, &export))
    }
}

fn parse<T: DeserializeOwned>(json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}
