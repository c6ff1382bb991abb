//! Export plans: everything a rasterizer needs to paint one slide at one size.
//!
//! A plan is a flat list of positioned paint instructions in paint order.
//! Geometry comes from [`place_for_export`]; style values given in design
//! pixels are scaled into export pixels here so rasterizers never see the
//! design canvas.

use serde::{Deserialize, Serialize};

use crate::export::{place_for_export, scale_factors};
use crate::gradient::{linear_points, to_device_stops, DeviceStop, GradientKind};
use crate::placement::is_full_background;
use crate::properties::{ShapeType, TextAlign, TEXT_RENDER_PADDING};
use crate::{ExportSize, Layer, LayerId, LayerProperties, LayerType, PixelRect, Point, Slide};

/// Paint instructions for one slide at one export size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPlan {
    /// Slide the plan was built from.
    pub slide_id: String,
    /// Target raster.
    pub size: ExportSize,
    /// Fill painted before any layer.
    pub background_color: String,
    /// Visible layers in paint order.
    pub items: Vec<PlannedLayer>,
}

/// One layer resolved into export pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedLayer {
    /// Source layer id.
    pub id: LayerId,
    /// Source layer type.
    #[serde(rename = "type")]
    pub kind: LayerType,
    /// Box in export pixels.
    pub rect: PixelRect,
    /// Rotation in degrees about the box center.
    pub rotation: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// What to paint inside the box.
    pub paint: Paint,
}

/// Variant-specific paint instructions, already scaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Paint {
    /// Text laid out inside the box, top-aligned.
    #[serde(rename_all = "camelCase")]
    Text {
        /// Text content.
        content: String,
        /// Font family.
        font_family: String,
        /// Font size in export pixels.
        font_size: f64,
        /// CSS font weight.
        font_weight: String,
        /// Inset on every side, in export pixels.
        padding: f64,
        /// Text color.
        color: String,
        /// Alignment.
        align: TextAlign,
        /// Line height multiplier.
        line_height: f64,
    },
    /// Image drawn to fill the box.
    #[serde(rename_all = "camelCase")]
    Image {
        /// Image URL; empty for the placeholder.
        src: String,
        /// Corner radius in export pixels.
        border_radius: f64,
        /// Frame stroke width in export pixels, zero without a frame.
        frame_width: f64,
        /// Frame stroke color.
        frame_color: Option<String>,
    },
    /// Filled rectangle or ellipse.
    #[serde(rename_all = "camelCase")]
    Shape {
        /// Fill color.
        fill: String,
        /// Stroke color.
        stroke: Option<String>,
        /// Stroke width in export pixels.
        stroke_width: f64,
        /// Corner radius in export pixels.
        corner_radius: f64,
        /// Draw an ellipse inscribed in the box.
        circle: bool,
    },
    /// Gradient fill.
    #[serde(rename_all = "camelCase")]
    Gradient {
        /// Linear or radial.
        gradient_type: GradientKind,
        /// Stops with `0..=1` offsets.
        stops: Vec<DeviceStop>,
        /// Linear start point relative to the box origin.
        start: Point,
        /// Linear end point relative to the box origin.
        end: Point,
    },
}

impl ExportPlan {
    /// Build the plan for `slide` rendered at `size`.
    #[must_use]
    pub fn build(slide: &Slide, size: &ExportSize) -> Self {
        let (scale_x, scale_y) = scale_factors(&slide.canvas, size);
        let uniform = scale_x.min(scale_y);

        let items: Vec<PlannedLayer> = slide
            .visible_layers()
            .into_iter()
            .map(|layer| plan_layer(layer, slide, size, scale_x, uniform))
            .collect();

        tracing::debug!(
            slide = %slide.id,
            device = %size.name,
            layers = slide.layer_count(),
            planned = items.len(),
            "Built export plan"
        );

        Self {
            slide_id: slide.id.clone(),
            size: size.clone(),
            background_color: slide.canvas.background_color.clone(),
            items,
        }
    }

    /// Number of planned layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing will be painted over the background.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn plan_layer(
    layer: &Layer,
    slide: &Slide,
    size: &ExportSize,
    scale_x: f64,
    uniform: f64,
) -> PlannedLayer {
    let rect = place_for_export(layer, &slide.canvas, size, &layer.layout_config());

    let paint = match layer.typed_properties() {
        LayerProperties::Text(text) => Paint::Text {
            content: text.content,
            font_family: text.font_family,
            font_size: text.font_size * scale_x,
            font_weight: text.font_weight,
            padding: TEXT_RENDER_PADDING * scale_x,
            color: text.color,
            align: text.align,
            line_height: text.line_height,
        },
        LayerProperties::Image(image) => {
            let (frame_width, frame_color) = image
                .frame_border
                .map_or((0.0, None), |frame| (frame.width * uniform, Some(frame.color)));
            Paint::Image {
                src: image.src,
                border_radius: image.border_radius * uniform,
                frame_width,
                frame_color,
            }
        }
        LayerProperties::Shape(shape) => Paint::Shape {
            fill: shape.fill,
            stroke: shape.stroke,
            stroke_width: shape.stroke_width * uniform,
            corner_radius: match shape.shape_type {
                ShapeType::Rounded => shape.corner_radius * uniform,
                ShapeType::Rect | ShapeType::Circle => 0.0,
            },
            circle: shape.shape_type == ShapeType::Circle,
        },
        LayerProperties::Gradient(gradient) => {
            let (start, end) = linear_points(gradient.angle, rect.width, rect.height);
            Paint::Gradient {
                gradient_type: gradient.gradient_type,
                stops: to_device_stops(&gradient.colors),
                start,
                end,
            }
        }
    };

    PlannedLayer {
        id: layer.id.clone(),
        kind: layer.kind,
        rect,
        rotation: if is_full_background(layer, &slide.canvas) {
            0.0
        } else {
            layer.rotation
        },
        opacity: layer.opacity.clamp(0.0, 1.0),
        paint,
    }
}
