//! Typed, defaulted views of a layer's property bag.
//!
//! The bag itself stays a plain [`PropertyMap`]; these types are read out of it
//! at the boundary so rendering code can match exhaustively on the variant.

use serde::{Deserialize, Serialize};

use crate::gradient::GradientProperties;
use crate::{LayerType, PropertyMap};

/// Inset applied around text content, in design pixels.
///
/// Shared by the editor preview and the export pass so both inset text by the
/// same amount after scaling.
pub const TEXT_RENDER_PADDING: f64 = 12.0;

/// Variant-specific properties, keyed by [`LayerType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerProperties {
    /// Text layer properties.
    Text(TextProperties),
    /// Image layer properties.
    Image(ImageProperties),
    /// Shape layer properties.
    Shape(ShapeProperties),
    /// Gradient layer properties.
    Gradient(GradientProperties),
}

impl LayerProperties {
    /// Read the typed properties for `kind` out of a normalized bag.
    #[must_use]
    pub fn from_map(kind: LayerType, props: &PropertyMap) -> Self {
        match kind {
            LayerType::Text => Self::Text(TextProperties::from_map(props)),
            LayerType::Image => Self::Image(ImageProperties::from_map(props)),
            LayerType::Shape => Self::Shape(ShapeProperties::from_map(props)),
            LayerType::Gradient => Self::Gradient(GradientProperties::from_map(props)),
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

impl TextAlign {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Text layer properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProperties {
    /// Text content, newlines preserved.
    pub content: String,
    /// Font family name.
    pub font_family: String,
    /// Font size in design pixels.
    pub font_size: f64,
    /// CSS font weight.
    pub font_weight: String,
    /// Text color.
    pub color: String,
    /// Alignment within the box.
    pub align: TextAlign,
    /// Line height multiplier.
    pub line_height: f64,
}

impl TextProperties {
    /// Read from a normalized bag, applying defaults.
    #[must_use]
    pub fn from_map(props: &PropertyMap) -> Self {
        Self {
            content: string(props, "content").unwrap_or_default().to_string(),
            font_family: non_empty(props, "fontFamily").unwrap_or("Inter").to_string(),
            font_size: positive(props, "fontSize").unwrap_or(16.0),
            font_weight: font_weight(props).unwrap_or_else(|| "400".to_string()),
            color: non_empty(props, "color").unwrap_or("#000000").to_string(),
            align: string(props, "align")
                .and_then(TextAlign::parse)
                .unwrap_or_default(),
            line_height: positive(props, "lineHeight").unwrap_or(1.5),
        }
    }
}

/// Image layer properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProperties {
    /// Image URL; empty shows the placeholder.
    pub src: String,
    /// Placeholder label.
    pub placeholder: String,
    /// Corner radius in design pixels.
    pub border_radius: f64,
    /// Whether a drop shadow is drawn.
    pub shadow: bool,
    /// Shadow blur radius.
    pub shadow_blur: f64,
    /// Shadow color.
    pub shadow_color: String,
    /// Shadow X offset.
    pub shadow_offset_x: f64,
    /// Shadow Y offset.
    pub shadow_offset_y: f64,
    /// Device frame border, if enabled with a positive width.
    pub frame_border: Option<FrameBorder>,
}

/// Device frame drawn around an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameBorder {
    /// Stroke width.
    pub width: f64,
    /// Stroke color.
    pub color: String,
    /// Corner radii: top-left, top-right, bottom-right, bottom-left.
    pub radii: [f64; 4],
}

impl ImageProperties {
    /// Read from a normalized bag, applying defaults.
    #[must_use]
    pub fn from_map(props: &PropertyMap) -> Self {
        let border_radius = number(props, "borderRadius").unwrap_or(0.0);
        let frame_width = number(props, "frameBorderWidth").unwrap_or(0.0);
        let frame_border = (boolean(props, "frameBorder") && frame_width > 0.0).then(|| {
            let corner = |key| number(props, key).unwrap_or(border_radius);
            FrameBorder {
                width: frame_width,
                color: non_empty(props, "frameBorderColor")
                    .unwrap_or("#1a1a1a")
                    .to_string(),
                radii: [
                    corner("frameBorderRadiusTL"),
                    corner("frameBorderRadiusTR"),
                    corner("frameBorderRadiusBR"),
                    corner("frameBorderRadiusBL"),
                ],
            }
        });

        Self {
            src: string(props, "src").unwrap_or_default().to_string(),
            placeholder: string(props, "placeholder").unwrap_or_default().to_string(),
            border_radius,
            shadow: boolean(props, "shadow"),
            shadow_blur: number(props, "shadowBlur").filter(|b| *b != 0.0).unwrap_or(20.0),
            shadow_color: non_empty(props, "shadowColor")
                .unwrap_or("rgba(0,0,0,0.3)")
                .to_string(),
            shadow_offset_x: number(props, "shadowOffsetX").unwrap_or(0.0),
            shadow_offset_y: number(props, "shadowOffsetY")
                .filter(|o| *o != 0.0)
                .unwrap_or(4.0),
            frame_border,
        }
    }
}

/// Geometry of a shape layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    /// Plain rectangle.
    #[default]
    Rect,
    /// Ellipse inscribed in the box.
    Circle,
    /// Rectangle with `corner_radius`.
    Rounded,
}

/// Shape layer properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProperties {
    /// Fill color.
    pub fill: String,
    /// Stroke color, `None` for no border.
    pub stroke: Option<String>,
    /// Stroke width in design pixels.
    pub stroke_width: f64,
    /// Corner radius in design pixels.
    pub corner_radius: f64,
    /// Geometry.
    pub shape_type: ShapeType,
}

impl ShapeProperties {
    /// Read from a normalized bag, applying defaults.
    #[must_use]
    pub fn from_map(props: &PropertyMap) -> Self {
        Self {
            fill: non_empty(props, "fill").unwrap_or("transparent").to_string(),
            stroke: non_empty(props, "stroke").map(str::to_string),
            stroke_width: number(props, "strokeWidth").unwrap_or(0.0),
            corner_radius: number(props, "cornerRadius").unwrap_or(0.0),
            shape_type: match string(props, "shapeType") {
                Some("circle") => ShapeType::Circle,
                Some("rounded") => ShapeType::Rounded,
                _ => ShapeType::Rect,
            },
        }
    }
}

/// Finite number stored under `key`.
pub(crate) fn number(props: &PropertyMap, key: &str) -> Option<f64> {
    props
        .get(key)
        .and_then(serde_json::Value::as_f64)
        .filter(|v| v.is_finite())
}

/// String stored under `key`.
pub(crate) fn string<'a>(props: &'a PropertyMap, key: &str) -> Option<&'a str> {
    props.get(key).and_then(serde_json::Value::as_str)
}

fn non_empty<'a>(props: &'a PropertyMap, key: &str) -> Option<&'a str> {
    string(props, key).filter(|s| !s.is_empty())
}

fn positive(props: &PropertyMap, key: &str) -> Option<f64> {
    number(props, key).filter(|v| *v > 0.0)
}

fn boolean(props: &PropertyMap, key: &str) -> bool {
    props
        .get(key)
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false)
}

// Weights are stored as either "700" or 700.
fn font_weight(props: &PropertyMap) -> Option<String> {
    match props.get("fontWeight")? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
