//! Semantic layout configuration: where a layer is anchored on its slide.

use serde::{Deserialize, Serialize};

use crate::properties::{number, string};
use crate::{LayerType, PropertyMap};

/// Vertical placement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    /// Offset measured from the top, element centered on the line.
    #[default]
    Center,
    /// Offset measured from the top edge.
    Top,
    /// Offset measured up from the bottom edge.
    Bottom,
    /// Top-anchored, allowed to bleed past the top edge.
    TopOverflow,
    /// Top-anchored, allowed to bleed past the bottom edge.
    BottomOverflow,
}

impl Position {
    /// Parse the stored name, `None` if unknown.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "center" => Some(Self::Center),
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "top-overflow" => Some(Self::TopOverflow),
            "bottom-overflow" => Some(Self::BottomOverflow),
            _ => None,
        }
    }
}

/// Horizontal anchor of the element relative to its offset line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorX {
    /// Left edge on the line.
    Left,
    /// Centered on the line.
    #[default]
    Center,
    /// Right edge on the line, offset measured from the right.
    Right,
}

impl AnchorX {
    /// Parse the stored name, `None` if unknown.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Vertical anchor of the element relative to its offset line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorY {
    /// Top edge on the line.
    Top,
    /// Centered on the line.
    #[default]
    Center,
    /// Bottom edge on the line.
    Bottom,
}

impl AnchorY {
    /// Parse the stored name, `None` if unknown.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "top" => Some(Self::Top),
            "center" => Some(Self::Center),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    /// Default anchor for a layer variant: text hangs from its line.
    #[must_use]
    pub fn default_for(kind: LayerType) -> Self {
        if kind == LayerType::Text {
            Self::Top
        } else {
            Self::Center
        }
    }
}

/// Resolved layout of a layer, derived from its properties.
///
/// Every field is always defined; [`LayoutConfig::from_properties`] applies
/// the defaults for anything missing or malformed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Vertical mode.
    pub position: Position,
    /// Horizontal anchor.
    pub anchor_x: AnchorX,
    /// Vertical anchor.
    pub anchor_y: AnchorY,
    /// Horizontal offset in design pixels.
    pub offset_x: f64,
    /// Vertical offset in design pixels.
    pub offset_y: f64,
    /// Uniform size multiplier, always positive.
    pub scale: f64,
}

impl LayoutConfig {
    /// Defaults for a layer variant.
    #[must_use]
    pub fn for_layer_type(kind: LayerType) -> Self {
        Self {
            position: Position::default(),
            anchor_x: AnchorX::default(),
            anchor_y: AnchorY::default_for(kind),
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }

    /// Read the layout fields out of a normalized property bag.
    #[must_use]
    pub fn from_properties(props: &PropertyMap, kind: LayerType) -> Self {
        let defaults = Self::for_layer_type(kind);
        Self {
            position: string(props, "position")
                .and_then(Position::parse)
                .unwrap_or(defaults.position),
            anchor_x: string(props, "anchorX")
                .and_then(AnchorX::parse)
                .unwrap_or(defaults.anchor_x),
            anchor_y: string(props, "anchorY")
                .and_then(AnchorY::parse)
                .unwrap_or(defaults.anchor_y),
            offset_x: number(props, "offsetX").unwrap_or(defaults.offset_x),
            offset_y: number(props, "offsetY").unwrap_or(defaults.offset_y),
            scale: number(props, "scale")
                .filter(|s| *s > 0.0)
                .unwrap_or(defaults.scale),
        }
    }

    /// Replace non-finite values with their defaults.
    ///
    /// Configs built through [`LayoutConfig::from_properties`] are already
    /// clean; this guards hand-built ones before they reach the geometry.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            offset_x: finite_or(self.offset_x, 0.0),
            offset_y: finite_or(self.offset_y, 0.0),
            scale: if self.scale.is_finite() && self.scale > 0.0 {
                self.scale
            } else {
                1.0
            },
            ..self
        }
    }

    /// Set the anchors.
    #[must_use]
    pub fn with_anchor(mut self, anchor_x: AnchorX, anchor_y: AnchorY) -> Self {
        self.anchor_x = anchor_x;
        self.anchor_y = anchor_y;
        self
    }

    /// Set the vertical mode.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set the offsets.
    #[must_use]
    pub fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    /// Set the scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::for_layer_type(LayerType::Image)
    }
}

pub(crate) fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
