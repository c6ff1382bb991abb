//! SVG wireframe rendering of export plans.
//!
//! The wireframe shows where every layer lands at the export size: shapes and
//! gradients are filled, text is drawn with its scaled font size, and images
//! are drawn as labelled outlines.

use std::fmt::Write;

use shotify_core::{ExportPlan, GradientKind, Paint, PixelRect, PlannedLayer, TextAlign};

const IMAGE_OUTLINE: &str = "#94a3b8";

/// Render a plan as a standalone SVG document sized to the export.
#[must_use]
pub fn render_svg(plan: &ExportPlan) -> String {
    let (width, height) = (plan.size.width, plan.size.height);
    let mut svg = String::with_capacity(4096);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    );

    let defs = plan
        .items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| gradient_def(index, item))
        .collect::<String>();
    if !defs.is_empty() {
        let _ = write!(svg, "<defs>{defs}</defs>");
    }

    let _ = write!(
        svg,
        "<rect width=\"{width}\" height=\"{height}\" fill=\"{}\"/>",
        escape_xml(&plan.background_color),
    );

    for (index, item) in plan.items.iter().enumerate() {
        render_item(&mut svg, index, item);
    }

    svg.push_str("</svg>");
    svg
}

fn gradient_def(index: usize, item: &PlannedLayer) -> Option<String> {
    let Paint::Gradient {
        gradient_type,
        stops,
        start,
        end,
    } = &item.paint
    else {
        return None;
    };

    let stops = stops
        .iter()
        .map(|stop| {
            format!(
                "<stop offset=\"{}\" stop-color=\"{}\"/>",
                stop.offset,
                escape_xml(&stop.color)
            )
        })
        .collect::<String>();

    let rect = item.rect;
    Some(match gradient_type {
        GradientKind::Linear => format!(
            "<linearGradient id=\"g{index}\" gradientUnits=\"userSpaceOnUse\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\">{stops}</linearGradient>",
            rect.x + start.x,
            rect.y + start.y,
            rect.x + end.x,
            rect.y + end.y,
        ),
        GradientKind::Radial => {
            format!("<radialGradient id=\"g{index}\">{stops}</radialGradient>")
        }
    })
}

fn render_item(svg: &mut String, index: usize, item: &PlannedLayer) {
    let PixelRect {
        x,
        y,
        width,
        height,
    } = item.rect;
    let center = item.rect.center();

    let _ = write!(svg, "<g opacity=\"{}\"", item.opacity);
    if item.rotation != 0.0 {
        let _ = write!(
            svg,
            " transform=\"rotate({} {} {})\"",
            item.rotation, center.x, center.y
        );
    }
    let _ = write!(svg, " data-layer=\"{}\">", escape_xml(item.id.as_str()));

    match &item.paint {
        Paint::Text {
            content,
            font_family,
            font_size,
            font_weight,
            padding,
            color,
            align,
            line_height,
        } => {
            let (anchor, text_x) = match align {
                TextAlign::Left => ("start", x + padding),
                TextAlign::Center => ("middle", center.x),
                TextAlign::Right => ("end", x + width - padding),
            };
            let _ = write!(
                svg,
                "<text x=\"{text_x}\" y=\"{}\" font-family=\"{}\" font-size=\"{font_size}\" font-weight=\"{}\" fill=\"{}\" text-anchor=\"{anchor}\">",
                y + padding,
                escape_xml(font_family),
                escape_xml(font_weight),
                escape_xml(color),
            );
            for (line, text) in content.lines().enumerate() {
                let dy = if line == 0 {
                    *font_size
                } else {
                    font_size * line_height
                };
                let _ = write!(
                    svg,
                    "<tspan x=\"{text_x}\" dy=\"{dy}\">{}</tspan>",
                    escape_xml(text)
                );
            }
            svg.push_str("</text>");
        }

        Paint::Image {
            src,
            border_radius,
            frame_width,
            frame_color,
        } => {
            let stroke = frame_color.as_deref().unwrap_or(IMAGE_OUTLINE);
            let stroke_width = if *frame_width > 0.0 { *frame_width } else { 2.0 };
            let _ = write!(
                svg,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" rx=\"{border_radius}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{stroke_width}\" stroke-dasharray=\"8 4\"/>",
                escape_xml(stroke),
            );
            let label = if src.is_empty() { "image" } else { src.as_str() };
            let _ = write!(
                svg,
                "<text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"{IMAGE_OUTLINE}\" font-family=\"sans-serif\" text-anchor=\"middle\">{}</text>",
                center.x,
                center.y,
                escape_xml(label),
            );
        }

        Paint::Shape {
            fill,
            stroke,
            stroke_width,
            corner_radius,
            circle,
        } => {
            let stroke_attrs = stroke.as_deref().map_or_else(String::new, |stroke| {
                format!(
                    " stroke=\"{}\" stroke-width=\"{stroke_width}\"",
                    escape_xml(stroke)
                )
            });
            if *circle {
                let _ = write!(
                    svg,
                    "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" fill=\"{}\"{stroke_attrs}/>",
                    center.x,
                    center.y,
                    width / 2.0,
                    height / 2.0,
                    escape_xml(fill),
                );
            } else {
                let _ = write!(
                    svg,
                    "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" rx=\"{corner_radius}\" fill=\"{}\"{stroke_attrs}/>",
                    escape_xml(fill),
                );
            }
        }

        Paint::Gradient { .. } => {
            let _ = write!(
                svg,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" fill=\"url(#g{index})\"/>",
            );
        }
    }

    svg.push_str("</g>");
}

/// Escape special XML characters in a string.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shotify_core::{Canvas, ExportSize, Layer, LayerType, PropertyMap, Slide};

    fn props(value: serde_json::Value) -> PropertyMap {
        match value {
            serde_json::Value::Object(map) => map,
            _ => PropertyMap::new(),
        }
    }

    fn plan(layers: Vec<Layer>) -> ExportPlan {
        let slide = Slide::from_layers("s", Canvas::new(1080.0, 1920.0), layers).expect("slide");
        ExportPlan::build(&slide, &ExportSize::new("Android Phone", "android", 1080.0, 1920.0))
    }

    #[test]
    fn empty_plan_has_background_only() {
        let svg = render_svg(&plan(Vec::new()));
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("fill=\"#ffffff\""));
        assert!(!svg.contains("<defs>"));
    }

    #[test]
    fn gradient_gets_a_definition() {
        let svg = render_svg(&plan(vec![Layer::new(LayerType::Gradient, 1080.0, 1920.0)]));
        assert!(svg.contains("<linearGradient id=\"g0\""));
        assert!(svg.contains("stop-color=\"#667eea\""));
        assert!(svg.contains("fill=\"url(#g0)\""));
    }

    #[test]
    fn text_is_escaped_and_split_into_lines() {
        let text = Layer::new(LayerType::Text, 800.0, 200.0).with_properties(props(serde_json::json!({
            "content": "Tom & Jerry\n<Season 2>",
            "align": "center"
        })));
        let svg = render_svg(&plan(vec![text]));
        assert!(svg.contains("Tom &amp; Jerry"));
        assert!(svg.contains("&lt;Season 2&gt;"));
        assert_eq!(svg.matches("<tspan").count(), 2);
        assert!(svg.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn rotated_circle_uses_ellipse() {
        let shape = Layer::new(LayerType::Shape, 200.0, 100.0)
            .with_rotation(15.0)
            .with_properties(props(serde_json::json!({"shapeType": "circle", "fill": "#f00"})));
        let svg = render_svg(&plan(vec![shape]));
        assert!(svg.contains("<ellipse"));
        assert!(svg.contains("rx=\"100\""));
        assert!(svg.contains("rotate(15"));
    }

    #[test]
    fn escape_xml_handles_quotes() {
        assert_eq!(escape_xml(r#"a"b'c"#), "a&quot;b&apos;c");
    }
}
