//! Integration tests for the layout engine (shotify-core).
//!
//! Drives the public API from stored JSON documents the way the editor and
//! the export pipeline do.

use serde_json::json;
use shotify_core::gradient::{resolve_colors, to_css_gradient, to_device_stops};
use shotify_core::{
    normalize_properties, place_for_editing, place_for_export, BoxHeight, Canvas, ExportPlan,
    ExportSize, GradientStop, Layer, LayerType, PropertyMap, Slide, TemplateConfig,
};

fn rel_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * b.abs().max(1.0)
}

fn canvas() -> Canvas {
    Canvas::new(1080.0, 1920.0)
}

fn iphone() -> ExportSize {
    ExportSize::new("iPhone 6.7\"", "ios", 1290.0, 2796.0)
}

/// Build a layer from its stored JSON form, normalizing properties on load.
fn layer(value: serde_json::Value) -> Layer {
    serde_json::from_value(value).expect("layer json")
}

#[test]
fn normalization_is_idempotent_for_stored_documents() {
    let stored = json!([
        {"Key": "content", "Value": "Stay on track"},
        {"Key": "colors", "Value": [
            [{"Key": "Key", "Value": "color"}, {"Key": "Value", "Value": "#fff"}],
            [{"Key": "Key", "Value": "position"}, {"Key": "Value", "Value": 0}]
        ]},
        {"Key": "nested", "Value": {"inner": [{"Key": "a", "Value": [1, 2]}]}}
    ]);
    let once = normalize_properties(&stored);
    let twice = normalize_properties(&serde_json::Value::Object(once.clone()));
    assert_eq!(once, twice);
}

#[test]
fn key_value_lists_are_recovered() {
    let flat = normalize_properties(&json!([
        {"Key": "a", "Value": 1},
        {"Key": "b", "Value": 2}
    ]));
    assert_eq!(serde_json::Value::Object(flat), json!({"a": 1, "b": 2}));

    let wrapped = normalize_properties(&json!({
        "stop": [
            [{"Key": "Key", "Value": "color"}, {"Key": "Value", "Value": "#fff"}],
            [{"Key": "Key", "Value": "position"}, {"Key": "Value", "Value": 0}]
        ]
    }));
    assert_eq!(wrapped["stop"], json!({"color": "#fff", "position": 0}));
}

#[test]
fn gradient_stops_default_by_index() {
    assert_eq!(
        resolve_colors(&PropertyMap::new()),
        [
            GradientStop::new("#667eea", 0.0),
            GradientStop::new("#764ba2", 100.0)
        ]
    );

    let gradient = layer(json!({
        "id": "bg", "type": "gradient",
        "properties": [{"Key": "colors", "Value": [{"color": "#fff", "position": 10}]}]
    }));
    assert_eq!(
        resolve_colors(&gradient.properties),
        [
            GradientStop::new("#fff", 10.0),
            GradientStop::new("#764ba2", 100.0)
        ]
    );
    assert_eq!(
        to_css_gradient(&gradient.properties),
        "linear-gradient(180deg, #fff 10%, #764ba2 100%)"
    );
    let stops = to_device_stops(&resolve_colors(&gradient.properties));
    assert!(rel_close(stops[0].offset, 0.1));
}

#[test]
fn covering_shape_ignores_layout_in_both_spaces() {
    let shape = layer(json!({
        "id": "backdrop", "type": "shape",
        "x": 0, "y": 0, "width": 1080, "height": 1920,
        "properties": {"offsetX": 300, "offsetY": -200, "anchorX": "right", "position": "bottom"}
    }));
    let config = shape.layout_config();

    let editor = place_for_editing(&shape, &canvas(), &config);
    assert!(editor.full_background);
    assert!(rel_close(editor.left, 0.0) && rel_close(editor.top, 0.0));
    assert!(rel_close(editor.width, 100.0));
    assert_eq!(editor.height, BoxHeight::Percent { value: 100.0 });
    assert!(editor.transform_css().is_none());

    let export = place_for_export(&shape, &canvas(), &iphone(), &config);
    assert!(rel_close(export.x, 0.0) && rel_close(export.y, 0.0));
    assert!(rel_close(export.width, 1290.0) && rel_close(export.height, 2796.0));
}

#[test]
fn scale_correspondence_for_centered_image() {
    let image = layer(json!({
        "id": "shot", "type": "image", "width": 400, "height": 300,
        "properties": {"anchorX": "center", "position": "center", "offsetX": 0, "offsetY": 0}
    }));
    let config = image.layout_config();

    let editor = place_for_editing(&image, &canvas(), &config);
    assert!(rel_close(editor.left, 50.0));
    assert!(rel_close(editor.top, 0.0));
    assert!(rel_close(editor.translate_x, -50.0));
    assert!(rel_close(editor.translate_y, -50.0));
    assert!(rel_close(editor.width, 400.0 / 1080.0 * 100.0));
    assert!(rel_close(editor.height.percent(), 15.625));

    let export = place_for_export(&image, &canvas(), &iphone(), &config);
    let width = 400.0 * 1290.0 / 1080.0;
    let height = 300.0 * 2796.0 / 1920.0;
    assert!(rel_close(export.width, width));
    assert!(rel_close(export.height, height));
    assert!(rel_close(export.x, (1290.0 - width) / 2.0));
    assert!(rel_close(export.y, -height / 2.0));
}

#[test]
fn text_and_image_differ_by_scaled_height_at_bottom() {
    let props = json!({"position": "bottom", "offsetY": 50});
    let text = layer(json!({"id": "t", "type": "text", "width": 800, "height": 100, "properties": props.clone()}));
    let image = layer(json!({"id": "i", "type": "image", "width": 800, "height": 100, "properties": props}));

    let text_rect = place_for_export(&text, &canvas(), &iphone(), &text.layout_config());
    let image_rect = place_for_export(&image, &canvas(), &iphone(), &image.layout_config());

    let scale_y = 2796.0 / 1920.0;
    assert!(rel_close(text_rect.y, 2796.0 - 50.0 * scale_y));
    assert!(rel_close(image_rect.y, 2796.0 - 50.0 * scale_y - 100.0 * scale_y));
    assert!(rel_close(text_rect.y - image_rect.y, 100.0 * scale_y));
}

#[test]
fn paint_order_sorts_by_z_index_and_keeps_ties() {
    let layers = [("c", 3), ("a", 1), ("b", 2), ("b2", 2)]
        .into_iter()
        .map(|(id, z)| Layer::new(LayerType::Shape, 10.0, 10.0).with_id(id).with_z_index(z));
    let slide = Slide::from_layers("s", canvas(), layers).expect("slide");
    let order: Vec<_> = slide.paint_order().iter().map(|l| l.id.to_string()).collect();
    assert_eq!(order, vec!["a", "b", "b2", "c"]);
}

#[test]
fn template_document_to_export_plans() {
    let template = TemplateConfig::from_json(
        r##"{
            "canvas": {"width": 1080, "height": 1920, "backgroundColor": "#000"},
            "layers": [
                {"id": "bg", "type": "gradient", "width": 1080, "height": 1920,
                 "properties": [{"Key": "gradientType", "Value": "radial"}]},
                {"id": "headline", "type": "text", "width": 900, "height": 160, "zIndex": 2,
                 "properties": [{"Key": "content", "Value": "Ship faster"},
                                {"Key": "position", "Value": "top"},
                                {"Key": "offsetY", "Value": 140}]},
                {"id": "phone", "type": "screenshot", "width": 700, "height": 1400, "zIndex": 1,
                 "visible": false}
            ],
            "exports": [
                {"name": "Android Phone", "platform": "android", "width": 1080, "height": 1920},
                {"name": "iPad 11\"", "platform": "ios", "width": 1668, "height": 2388}
            ]
        }"##,
    )
    .expect("template");

    for size in &template.exports {
        for slide in template.slides_for(size).expect("slides") {
            let plan = ExportPlan::build(&slide, size);
            let ids: Vec<_> = plan.items.iter().map(|i| i.id.as_str()).collect();
            assert_eq!(ids, vec!["bg", "headline"], "{}", size.name);
            assert_eq!(plan.items[0].rect.width, size.width);
            assert_eq!(plan.background_color, "#000");
        }
    }
}
