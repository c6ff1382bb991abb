//! Slide data model: canvases, layers, export sizes and pixel geometry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LayerProperties, LayoutConfig, LayoutError, LayoutResult};

/// Canonical property bag of a layer, after normalization.
pub type PropertyMap = serde_json::Map<String, serde_json::Value>;

/// Design-space coordinate system of a slide.
///
/// All layer geometry is expressed relative to this box. A canvas is replaced
/// wholesale on resize, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    /// Width in design pixels.
    pub width: f64,
    /// Height in design pixels.
    pub height: f64,
    /// Background fill as a CSS color.
    #[serde(default = "Canvas::default_background")]
    pub background_color: String,
}

impl Canvas {
    /// Create a canvas with a white background.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background_color: Self::default_background(),
        }
    }

    /// Set the background color.
    #[must_use]
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    /// Check the precondition every placement function relies on.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidCanvas`] if either side is not a finite,
    /// positive number.
    pub fn validate(&self) -> LayoutResult<()> {
        if positive(self.width) && positive(self.height) {
            Ok(())
        } else {
            Err(LayoutError::InvalidCanvas {
                width: self.width,
                height: self.height,
            })
        }
    }

    fn default_background() -> String {
        "#ffffff".to_string()
    }
}

/// Unique identifier of a layer within a slide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    /// Wrap an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The closed set of layer variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    /// Text block with intrinsic height.
    Text,
    /// Image or device screenshot.
    #[serde(alias = "screenshot")]
    Image,
    /// Filled rectangle, rounded rectangle or circle.
    Shape,
    /// Full-bleed gradient fill.
    Gradient,
}

impl LayerType {
    /// Lowercase name as stored in documents.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Shape => "shape",
            Self::Gradient => "gradient",
        }
    }
}

/// A positioned element on a slide.
///
/// `properties` is normalized while deserializing, so a loaded layer always
/// carries a plain map regardless of how storage encoded it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Unique identifier.
    pub id: LayerId,
    /// Display name in the layer list.
    #[serde(default)]
    pub name: String,
    /// Variant of the layer.
    #[serde(rename = "type")]
    pub kind: LayerType,
    /// Design-space X of the box.
    #[serde(default)]
    pub x: f64,
    /// Design-space Y of the box.
    #[serde(default)]
    pub y: f64,
    /// Design-space width.
    #[serde(default)]
    pub width: f64,
    /// Design-space height.
    #[serde(default)]
    pub height: f64,
    /// Rotation in degrees, clockwise.
    #[serde(default)]
    pub rotation: f64,
    /// Hidden layers are skipped when painting.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Locked layers ignore pointer interaction.
    #[serde(default)]
    pub locked: bool,
    /// Opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Paint order, ascending.
    #[serde(default)]
    pub z_index: i64,
    /// Variant-specific properties.
    #[serde(default, deserialize_with = "crate::normalize::deserialize_properties")]
    pub properties: PropertyMap,
}

impl Layer {
    /// Create a new visible layer with a generated id.
    #[must_use]
    pub fn new(kind: LayerType, width: f64, height: f64) -> Self {
        Self {
            id: LayerId::generate(),
            name: String::new(),
            kind,
            x: 0.0,
            y: 0.0,
            width,
            height,
            rotation: 0.0,
            visible: true,
            locked: false,
            opacity: 1.0,
            z_index: 0,
            properties: PropertyMap::new(),
        }
    }

    /// Set the id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<LayerId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the design-space origin.
    #[must_use]
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the paint order.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = z_index;
        self
    }

    /// Set the rotation in degrees.
    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Replace the property bag.
    #[must_use]
    pub fn with_properties(mut self, properties: PropertyMap) -> Self {
        self.properties = properties;
        self
    }

    /// Check whether this is a text layer.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.kind == LayerType::Text
    }

    /// Resolve the layout configuration from the property bag.
    #[must_use]
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig::from_properties(&self.properties, self.kind)
    }

    /// Resolve the typed, defaulted properties for this layer's variant.
    #[must_use]
    pub fn typed_properties(&self) -> LayerProperties {
        LayerProperties::from_map(self.kind, &self.properties)
    }

    /// Check if a design-space point falls within the layer's stored box.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

impl From<String> for LayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

const fn default_true() -> bool {
    true
}

const fn default_opacity() -> f64 {
    1.0
}

/// A target raster resolution for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSize {
    /// Human-readable device name.
    pub name: String,
    /// Store platform (`ios`, `android`).
    #[serde(default)]
    pub platform: String,
    /// Output width in pixels.
    pub width: f64,
    /// Output height in pixels.
    pub height: f64,
}

impl ExportSize {
    /// Create an export size.
    #[must_use]
    pub fn new(name: impl Into<String>, platform: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            platform: platform.into(),
            width,
            height,
        }
    }

    /// Key identifying a device configuration, e.g. `Android Phone-1080x1920`.
    #[must_use]
    pub fn device_key(&self) -> String {
        format!("{}-{}x{}", self.name, self.width, self.height)
    }

    /// Heuristic used to group tablets apart from phones.
    #[must_use]
    pub fn is_tablet(&self) -> bool {
        let name = self.name.to_lowercase();
        let min_side = self.width.min(self.height);
        let aspect = self.width.max(self.height) / min_side.max(1.0);
        name.contains("ipad") || name.contains("tablet") || aspect < 1.65
    }

    /// Check that both sides are finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidExportSize`] otherwise.
    pub fn validate(&self) -> LayoutResult<()> {
        if positive(self.width) && positive(self.height) {
            Ok(())
        } else {
            Err(LayoutError::InvalidExportSize {
                name: self.name.clone(),
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// A point in some pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box in absolute pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl PixelRect {
    /// Create a rect.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center of the rect.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
