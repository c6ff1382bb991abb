//! Editor-space placement.
//!
//! Everything is expressed as a percentage of the canvas box, plus a
//! percentage translation of the element's own size, so the editor can render
//! at any zoom without recomputing. [`crate::export`] mirrors these rules in
//! absolute pixels for the export pass.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::layout::finite_or;
use crate::{AnchorX, AnchorY, Canvas, Layer, LayerType, LayoutConfig, PixelRect, Position};

/// Height of a placed box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum BoxHeight {
    /// Fixed percentage of the canvas height.
    Percent {
        /// Percentage of the canvas height.
        value: f64,
    },
    /// Intrinsic content height (text). `nominal` is the stored box height as a
    /// percentage, used when a concrete number is required.
    Auto {
        /// Stored height as a percentage of the canvas height.
        nominal: f64,
    },
}

impl BoxHeight {
    /// Percentage to use when a concrete height is needed.
    #[must_use]
    pub fn percent(&self) -> f64 {
        match *self {
            Self::Percent { value } => value,
            Self::Auto { nominal } => nominal,
        }
    }

    /// Whether the height is intrinsic.
    #[must_use]
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto { .. })
    }
}

/// Placement of a layer in the editor, relative to the canvas box.
///
/// `left`/`top`/`width`/height are percentages of the canvas; `translate_x`
/// and `translate_y` are percentages of the element's own size, applied
/// before `rotation` about the element's center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorPlacement {
    /// Left edge, percent of canvas width.
    pub left: f64,
    /// Top edge, percent of canvas height.
    pub top: f64,
    /// Horizontal shift, percent of own width.
    pub translate_x: f64,
    /// Vertical shift, percent of own height.
    pub translate_y: f64,
    /// Width, percent of canvas width.
    pub width: f64,
    /// Height, percent of canvas height or intrinsic.
    pub height: BoxHeight,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Opacity.
    pub opacity: f64,
    /// Paint order.
    pub z_index: i64,
    /// Whether the full-bleed background shortcut applied.
    pub full_background: bool,
    /// Whether pointer interaction is allowed.
    pub interactive: bool,
}

impl EditorPlacement {
    /// Resolve into absolute pixels for a frame of the given size.
    ///
    /// Translations are applied against the resolved element size, which is
    /// what the browser does after layout. Rotation is not applied.
    #[must_use]
    pub fn resolve(&self, frame_width: f64, frame_height: f64) -> PixelRect {
        let width = self.width / 100.0 * frame_width;
        let height = self.height.percent() / 100.0 * frame_height;
        PixelRect {
            x: self.left / 100.0 * frame_width + self.translate_x / 100.0 * width,
            y: self.top / 100.0 * frame_height + self.translate_y / 100.0 * height,
            width,
            height,
        }
    }

    /// CSS `transform` value, e.g. `translate(-50%, 0) rotate(15deg)`.
    ///
    /// `None` for full-bleed backgrounds, which are never transformed.
    #[must_use]
    pub fn transform_css(&self) -> Option<String> {
        if self.full_background {
            return None;
        }
        Some(format!(
            "translate({}, {}) rotate({}deg)",
            css_percent(self.translate_x),
            css_percent(self.translate_y),
            self.rotation
        ))
    }

    /// Inline CSS declarations for an absolutely positioned element.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::with_capacity(160);
        let _ = write!(
            css,
            "position: absolute; left: {}; top: {}; width: {}; height: {};",
            css_percent(self.left),
            css_percent(self.top),
            css_percent(self.width),
            match self.height {
                BoxHeight::Auto { .. } => "auto".to_string(),
                BoxHeight::Percent { value } => css_percent(value),
            },
        );
        if let Some(transform) = self.transform_css() {
            let _ = write!(css, " transform: {transform};");
        }
        let _ = write!(css, " opacity: {}; z-index: {};", self.opacity, self.z_index);
        if !self.full_background {
            let cursor = if self.interactive { "pointer" } else { "default" };
            let _ = write!(css, " cursor: {cursor};");
        }
        css
    }
}

/// Whether a layer paints as a full-bleed background.
///
/// Gradients always do; shapes do when they exactly cover the canvas.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_full_background(layer: &Layer, canvas: &Canvas) -> bool {
    match layer.kind {
        LayerType::Gradient => true,
        LayerType::Shape => {
            layer.x == 0.0
                && layer.y == 0.0
                && layer.width == canvas.width
                && layer.height == canvas.height
        }
        LayerType::Text | LayerType::Image => false,
    }
}

/// Compute the editor placement of `layer` on `canvas`.
///
/// `canvas` must have positive dimensions; see [`Canvas::validate`].
#[must_use]
pub fn place_for_editing(layer: &Layer, canvas: &Canvas, config: &LayoutConfig) -> EditorPlacement {
    if is_full_background(layer, canvas) {
        return EditorPlacement {
            left: 0.0,
            top: 0.0,
            translate_x: 0.0,
            translate_y: 0.0,
            width: 100.0,
            height: BoxHeight::Percent { value: 100.0 },
            rotation: 0.0,
            opacity: layer.opacity,
            z_index: layer.z_index,
            full_background: true,
            interactive: !layer.locked,
        };
    }

    let config = config.sanitized();
    let is_text = layer.is_text();

    let width = finite_or(layer.width, 0.0) / canvas.width * 100.0 * config.scale;
    let height_percent = finite_or(layer.height, 0.0) / canvas.height * 100.0 * config.scale;

    let offset_x_percent = config.offset_x / canvas.width * 100.0;
    let (left, translate_x) = match config.anchor_x {
        AnchorX::Left => (offset_x_percent, 0.0),
        AnchorX::Right => (100.0 - offset_x_percent, -100.0),
        AnchorX::Center => (50.0 + offset_x_percent, -50.0),
    };

    let offset_y_percent = config.offset_y / canvas.height * 100.0;
    let (top, mut translate_y) = match config.position {
        Position::Top => (
            offset_y_percent,
            match config.anchor_y {
                AnchorY::Center => -50.0,
                AnchorY::Bottom => -100.0,
                AnchorY::Top => 0.0,
            },
        ),
        Position::Bottom => (100.0 - offset_y_percent, -100.0),
        Position::TopOverflow => (
            offset_y_percent,
            if config.anchor_y == AnchorY::Bottom {
                -100.0
            } else {
                0.0
            },
        ),
        Position::BottomOverflow => (offset_y_percent, 0.0),
        Position::Center => (offset_y_percent, -50.0),
    };

    // Text grows downward from its line; its height is intrinsic.
    if is_text {
        translate_y = 0.0;
    }

    EditorPlacement {
        left,
        top,
        translate_x,
        translate_y,
        width,
        height: if is_text {
            BoxHeight::Auto {
                nominal: height_percent,
            }
        } else {
            BoxHeight::Percent {
                value: height_percent,
            }
        },
        rotation: finite_or(layer.rotation, 0.0),
        opacity: layer.opacity,
        z_index: layer.z_index,
        full_background: false,
        interactive: !layer.locked,
    }
}

fn css_percent(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}%")
    }
}
