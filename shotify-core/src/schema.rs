//! Stored document shapes for templates and projects.
//!
//! Layers inside these documents are normalized while deserializing, so a
//! loaded document is already in canonical form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::normalize::null_as_default;
use crate::{Canvas, ExportSize, Layer, LayoutError, LayoutResult, Slide};

/// Slide id used for the base canvas of a template or project.
pub const BASE_SLIDE_ID: &str = "base";

/// One slide as stored inside a device configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideData {
    /// Slide identifier.
    pub id: String,
    /// Design-space canvas.
    pub canvas: Canvas,
    /// Layers in stored order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub layers: Vec<Layer>,
}

impl SlideData {
    /// Convert to a runtime slide.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas is invalid or layer ids collide.
    pub fn into_slide(self) -> LayoutResult<Slide> {
        Slide::from_layers(self.id, self.canvas, self.layers)
    }
}

/// Per-device slide set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfig {
    /// Target raster size for this device.
    pub export_size: ExportSize,
    /// Slides designed for this device.
    #[serde(default, deserialize_with = "null_as_default")]
    pub slides: Vec<SlideData>,
    /// Whether the device diverged from the shared design.
    #[serde(default)]
    pub is_modified: bool,
}

/// Device configurations keyed by [`ExportSize::device_key`].
pub type DeviceConfigMap = BTreeMap<String, DeviceConfig>;

/// An uploaded image referenced by a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Asset identifier.
    pub id: String,
    /// Public URL.
    pub url: String,
    /// Original file name.
    #[serde(default)]
    pub name: String,
}

/// A template's design document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    /// Base canvas.
    pub canvas: Canvas,
    /// Base layers.
    #[serde(default, deserialize_with = "null_as_default")]
    pub layers: Vec<Layer>,
    /// Export sizes offered for this template.
    #[serde(default, deserialize_with = "null_as_default")]
    pub exports: Vec<ExportSize>,
    /// Per-device overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_configs: Option<DeviceConfigMap>,
}

impl TemplateConfig {
    /// Parse a template document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the document shape.
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        serde_json::from_str(json).map_err(LayoutError::Serialization)
    }

    /// Serialize the document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> LayoutResult<String> {
        serde_json::to_string(self).map_err(LayoutError::Serialization)
    }

    /// The base slide.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas is invalid or layer ids collide.
    pub fn base_slide(&self) -> LayoutResult<Slide> {
        Slide::from_layers(BASE_SLIDE_ID, self.canvas.clone(), self.layers.clone())
    }

    /// Slides to export for `size`: the device's own slides when configured,
    /// otherwise the base slide.
    ///
    /// # Errors
    ///
    /// Returns an error if any slide fails validation.
    pub fn slides_for(&self, size: &ExportSize) -> LayoutResult<Vec<Slide>> {
        slides_for(
            &self.canvas,
            &self.layers,
            self.device_configs.as_ref(),
            size,
        )
    }

    /// Every slide in the document: the base slide, then each device's
    /// slides in device-key order.
    ///
    /// # Errors
    ///
    /// Returns an error if any slide fails validation.
    pub fn into_slides(self) -> LayoutResult<Vec<Slide>> {
        let mut slides = vec![Slide::from_layers(
            BASE_SLIDE_ID,
            self.canvas,
            self.layers,
        )?];
        for device in self.device_configs.into_iter().flat_map(BTreeMap::into_values) {
            for data in device.slides {
                slides.push(data.into_slide()?);
            }
        }
        Ok(slides)
    }
}

/// A user project's design document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Base canvas.
    pub canvas: Canvas,
    /// Base layers.
    #[serde(default, deserialize_with = "null_as_default")]
    pub layers: Vec<Layer>,
    /// Uploaded images.
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ImageAsset>,
    /// Export sizes chosen for this project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exports: Option<Vec<ExportSize>>,
    /// Per-device overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_configs: Option<DeviceConfigMap>,
}

impl ProjectConfig {
    /// Parse a project document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the document shape.
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        serde_json::from_str(json).map_err(LayoutError::Serialization)
    }

    /// Slides to export for `size`; see [`TemplateConfig::slides_for`].
    ///
    /// # Errors
    ///
    /// Returns an error if any slide fails validation.
    pub fn slides_for(&self, size: &ExportSize) -> LayoutResult<Vec<Slide>> {
        slides_for(
            &self.canvas,
            &self.layers,
            self.device_configs.as_ref(),
            size,
        )
    }
}

impl From<ProjectConfig> for TemplateConfig {
    fn from(project: ProjectConfig) -> Self {
        Self {
            canvas: project.canvas,
            layers: project.layers,
            exports: project.exports.unwrap_or_default(),
            device_configs: project.device_configs,
        }
    }
}

fn slides_for(
    canvas: &Canvas,
    layers: &[Layer],
    devices: Option<&DeviceConfigMap>,
    size: &ExportSize,
) -> LayoutResult<Vec<Slide>> {
    size.validate()?;
    match devices
        .and_then(|map| map.get(&size.device_key()))
        .filter(|device| !device.slides.is_empty())
    {
        Some(device) => device
            .slides
            .iter()
            .cloned()
            .map(SlideData::into_slide)
            .collect(),
        None => Ok(vec![Slide::from_layers(
            BASE_SLIDE_ID,
            canvas.clone(),
            layers.to_vec(),
        )?]),
    }
}
