//! Gradient stop resolution and conversion for CSS and graphics APIs.
//!
//! A gradient layer always paints exactly two stops. Stored documents may be
//! missing stops, carry extras, or hold malformed entries; everything here
//! resolves to the fixed default pair by index rather than failing.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::properties::{number, string};
use crate::{Point, PropertyMap};

/// Angle used when none (or a non-finite one) is stored.
pub const DEFAULT_ANGLE: f64 = 180.0;

const FALLBACK_STOP_COLOR: &str = "#000000";

/// A color stop; `position` is a percentage along the gradient line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// CSS color.
    pub color: String,
    /// Position in `0..=100`.
    pub position: f64,
}

impl GradientStop {
    /// Create a stop.
    #[must_use]
    pub fn new(color: impl Into<String>, position: f64) -> Self {
        Self {
            color: color.into(),
            position,
        }
    }
}

/// The default stop pair, `#667eea` at 0% to `#764ba2` at 100%.
#[must_use]
pub fn default_stops() -> [GradientStop; 2] {
    [
        GradientStop::new("#667eea", 0.0),
        GradientStop::new("#764ba2", 100.0),
    ]
}

/// Linear or radial gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    /// Straight gradient line at `angle`.
    #[default]
    Linear,
    /// Circle from the center outward.
    Radial,
}

/// Resolved gradient layer properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientProperties {
    /// Linear or radial.
    pub gradient_type: GradientKind,
    /// CSS angle in degrees (0 = up, clockwise).
    pub angle: f64,
    /// Exactly two stops.
    pub colors: [GradientStop; 2],
}

impl GradientProperties {
    /// Read from a normalized bag, applying defaults.
    #[must_use]
    pub fn from_map(props: &PropertyMap) -> Self {
        Self {
            gradient_type: resolve_kind(props),
            angle: resolve_angle(props),
            colors: resolve_colors(props),
        }
    }
}

/// Resolve exactly two stops from `props.colors`.
///
/// The stored array is truncated to its first two entries; each missing or
/// malformed entry is replaced by the default stop at the same index.
#[must_use]
pub fn resolve_colors(props: &PropertyMap) -> [GradientStop; 2] {
    let stored = props.get("colors").and_then(Value::as_array);
    let [first, second] = default_stops();
    let pick = |index: usize, fallback: GradientStop| {
        stored
            .and_then(|items| items.get(index))
            .and_then(|entry| parse_stop(entry, fallback.position))
            .unwrap_or(fallback)
    };
    [pick(0, first), pick(1, second)]
}

/// Resolve `props.angle`, falling back to [`DEFAULT_ANGLE`].
#[must_use]
pub fn resolve_angle(props: &PropertyMap) -> f64 {
    number(props, "angle").unwrap_or(DEFAULT_ANGLE)
}

/// Resolve `props.gradientType`, defaulting to linear.
#[must_use]
pub fn resolve_kind(props: &PropertyMap) -> GradientKind {
    match string(props, "gradientType") {
        Some("radial") => GradientKind::Radial,
        _ => GradientKind::Linear,
    }
}

/// Format the gradient as a CSS `background` value.
#[must_use]
pub fn to_css_gradient(props: &PropertyMap) -> String {
    let stops = resolve_colors(props)
        .iter()
        .map(|stop| format!("{} {}%", stop.color, stop.position.clamp(0.0, 100.0)))
        .collect::<Vec<_>>()
        .join(", ");

    match resolve_kind(props) {
        GradientKind::Radial => format!("radial-gradient(circle, {stops})"),
        GradientKind::Linear => format!("linear-gradient({}deg, {stops})", resolve_angle(props)),
    }
}

/// A stop in graphics-API form: offset in `0..=1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceStop {
    /// Offset along the gradient, `0..=1`.
    pub offset: f64,
    /// Color, never empty.
    pub color: String,
}

/// Convert stops to graphics-API offsets.
#[must_use]
pub fn to_device_stops(colors: &[GradientStop]) -> Vec<DeviceStop> {
    colors
        .iter()
        .map(|stop| DeviceStop {
            offset: if stop.position.is_finite() {
                (stop.position / 100.0).clamp(0.0, 1.0)
            } else {
                0.0
            },
            color: if stop.color.is_empty() {
                FALLBACK_STOP_COLOR.to_string()
            } else {
                stop.color.clone()
            },
        })
        .collect()
}

/// Flatten device stops into `[offset0, color0, offset1, color1, ..]`.
#[must_use]
pub fn flatten_device_stops(stops: &[DeviceStop]) -> Vec<Value> {
    stops
        .iter()
        .flat_map(|stop| [Value::from(stop.offset), Value::from(stop.color.as_str())])
        .collect()
}

/// Start and end points of a linear gradient inside a `width` x `height` box.
///
/// Reproduces CSS `linear-gradient(<angle>deg, ..)` direction for APIs that
/// take explicit endpoints: `center ± (cos(r)·w/2, sin(r)·h/2)` with
/// `r = angle - 90°`.
#[must_use]
pub fn linear_points(angle: f64, width: f64, height: f64) -> (Point, Point) {
    let rad = (angle - 90.0) * PI / 180.0;
    let dx = rad.cos() * width / 2.0;
    let dy = rad.sin() * height / 2.0;
    let cx = width / 2.0;
    let cy = height / 2.0;
    (Point::new(cx - dx, cy - dy), Point::new(cx + dx, cy + dy))
}

fn parse_stop(entry: &Value, fallback_position: f64) -> Option<GradientStop> {
    let obj = entry.as_object()?;
    let color = obj.get("color")?.as_str()?;
    let position = obj
        .get("position")
        .and_then(Value::as_f64)
        .filter(|p| p.is_finite())
        .unwrap_or(fallback_position);
    Some(GradientStop::new(color, position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> PropertyMap {
        match value {
            Value::Object(map) => map,
            _ => PropertyMap::new(),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_props_use_default_pair() {
        assert_eq!(resolve_colors(&PropertyMap::new()), default_stops());
    }

    #[test]
    fn single_stop_is_completed_from_defaults() {
        let colors = resolve_colors(&props(json!({"colors": [{"color": "#fff", "position": 10}]})));
        assert_eq!(colors[0], GradientStop::new("#fff", 10.0));
        assert_eq!(colors[1], GradientStop::new("#764ba2", 100.0));
    }

    #[test]
    fn extra_stops_are_truncated() {
        let colors = resolve_colors(&props(json!({"colors": [
            {"color": "#111", "position": 0},
            {"color": "#222", "position": 50},
            {"color": "#333", "position": 100}
        ]})));
        assert_eq!(colors[1], GradientStop::new("#222", 50.0));
    }

    #[test]
    fn malformed_entries_fall_back_by_index() {
        let colors = resolve_colors(&props(json!({"colors": [42, {"color": "#abc"}]})));
        assert_eq!(colors[0], GradientStop::new("#667eea", 0.0));
        assert_eq!(colors[1], GradientStop::new("#abc", 100.0));

        let colors = resolve_colors(&props(json!({"colors": "red"})));
        assert_eq!(colors, default_stops());
    }

    #[test]
    fn angle_defaults_to_180() {
        assert!(close(resolve_angle(&PropertyMap::new()), 180.0));
        assert!(close(resolve_angle(&props(json!({"angle": "45"}))), 180.0));
        assert!(close(resolve_angle(&props(json!({"angle": 45}))), 45.0));
    }

    #[test]
    fn css_linear_clamps_positions() {
        let css = to_css_gradient(&props(json!({
            "angle": 135,
            "colors": [{"color": "#000", "position": -20}, {"color": "#fff", "position": 140}]
        })));
        assert_eq!(css, "linear-gradient(135deg, #000 0%, #fff 100%)");
    }

    #[test]
    fn css_radial() {
        let css = to_css_gradient(&props(json!({"gradientType": "radial"})));
        assert_eq!(css, "radial-gradient(circle, #667eea 0%, #764ba2 100%)");
    }

    #[test]
    fn device_stops_clamp_and_fill() {
        let stops = to_device_stops(&[
            GradientStop::new("", 150.0),
            GradientStop::new("#fff", f64::NAN),
        ]);
        assert!(close(stops[0].offset, 1.0));
        assert_eq!(stops[0].color, "#000000");
        assert!(close(stops[1].offset, 0.0));

        let flat = flatten_device_stops(&to_device_stops(&default_stops()));
        assert_eq!(flat, vec![json!(0.0), json!("#667eea"), json!(1.0), json!("#764ba2")]);
    }

    #[test]
    fn linear_points_follow_css_direction() {
        // 180deg runs top to bottom.
        let (start, end) = linear_points(180.0, 100.0, 200.0);
        assert!(close(start.x, 50.0) && close(start.y, 0.0));
        assert!(close(end.x, 50.0) && close(end.y, 200.0));

        // 90deg runs left to right.
        let (start, end) = linear_points(90.0, 100.0, 200.0);
        assert!(close(start.x, 0.0) && close(start.y, 100.0));
        assert!(close(end.x, 100.0) && close(end.y, 100.0));
    }
}
