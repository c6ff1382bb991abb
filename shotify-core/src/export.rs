//! Export-space placement in absolute pixels.
//!
//! Mirrors [`crate::placement::place_for_editing`] branch for branch, with the
//! percentage translations resolved into explicit subtractions, so a render
//! at any [`ExportSize`] is proportional to the editor preview.

use crate::layout::finite_or;
use crate::placement::is_full_background;
use crate::{AnchorX, AnchorY, Canvas, ExportSize, Layer, LayoutConfig, PixelRect, Position};

/// Compute the pixel box of `layer` inside an `export` raster.
///
/// Horizontal and vertical scale factors are independent; canvas and export
/// aspect ratios need not match.
///
/// Text layers never subtract their height: their rendered height is measured
/// by the rasterizer, and the box's top edge sits on the computed line. For
/// `Position::Bottom` this means text hangs *below* `height - offset_y`, unlike
/// other layers whose bottom edge sits on that line.
#[must_use]
pub fn place_for_export(
    layer: &Layer,
    canvas: &Canvas,
    export: &ExportSize,
    config: &LayoutConfig,
) -> PixelRect {
    if is_full_background(layer, canvas) {
        return PixelRect::new(0.0, 0.0, export.width, export.height);
    }

    let config = config.sanitized();
    let (scale_x, scale_y) = scale_factors(canvas, export);
    let is_text = layer.is_text();

    let width = finite_or(layer.width, 0.0) * scale_x * config.scale;
    let height = finite_or(layer.height, 0.0) * scale_y * config.scale;
    let offset_x = config.offset_x * scale_x;
    let offset_y = config.offset_y * scale_y;

    let x = match config.anchor_x {
        AnchorX::Left => offset_x,
        AnchorX::Right => export.width - offset_x - width,
        AnchorX::Center => (export.width - width) / 2.0 + offset_x,
    };

    let y = match config.position {
        Position::Top if is_text => offset_y,
        Position::Top => match config.anchor_y {
            AnchorY::Center => offset_y - height / 2.0,
            AnchorY::Bottom => offset_y - height,
            AnchorY::Top => offset_y,
        },
        Position::Bottom if is_text => export.height - offset_y,
        Position::Bottom => export.height - offset_y - height,
        Position::TopOverflow | Position::BottomOverflow => offset_y,
        Position::Center if is_text => offset_y,
        Position::Center => offset_y - height / 2.0,
    };

    PixelRect::new(x, y, width, height)
}

/// Per-axis scale from design space to export space.
#[must_use]
pub fn scale_factors(canvas: &Canvas, export: &ExportSize) -> (f64, f64) {
    (export.width / canvas.width, export.height / canvas.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LayerType;

    fn rel_close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * b.abs().max(1.0)
    }

    fn canvas() -> Canvas {
        Canvas::new(1080.0, 1920.0)
    }

    fn iphone() -> ExportSize {
        ExportSize::new("iPhone 6.7\"", "ios", 1290.0, 2796.0)
    }

    #[test]
    fn background_fills_export() {
        let shape = Layer::new(LayerType::Shape, 1080.0, 1920.0);
        let config = LayoutConfig::default()
            .with_anchor(AnchorX::Left, AnchorY::Top)
            .with_offset(300.0, 300.0);
        let rect = place_for_export(&shape, &canvas(), &iphone(), &config);
        assert_eq!(rect, PixelRect::new(0.0, 0.0, 1290.0, 2796.0));
    }

    #[test]
    fn centered_image_scales_per_axis() {
        let layer = Layer::new(LayerType::Image, 400.0, 300.0);
        let rect = place_for_export(&layer, &canvas(), &iphone(), &LayoutConfig::default());
        let width = 400.0 * 1290.0 / 1080.0;
        let height = 300.0 * 2796.0 / 1920.0;
        assert!(rel_close(rect.width, width));
        assert!(rel_close(rect.height, height));
        assert!(rel_close(rect.x, (1290.0 - width) / 2.0));
        assert!(rel_close(rect.y, -height / 2.0));
        assert!(rel_close(rect.y, -218.4375));
    }

    #[test]
    fn horizontal_anchors() {
        let layer = Layer::new(LayerType::Image, 108.0, 100.0);
        let config = LayoutConfig::default().with_offset(54.0, 0.0);
        let export = ExportSize::new("2x", "", 2160.0, 3840.0);

        let left = place_for_export(&layer, &canvas(), &export, &config.with_anchor(AnchorX::Left, AnchorY::Center));
        assert!(rel_close(left.x, 108.0));

        let right = place_for_export(&layer, &canvas(), &export, &config.with_anchor(AnchorX::Right, AnchorY::Center));
        assert!(rel_close(right.x, 2160.0 - 108.0 - 216.0));

        let center = place_for_export(&layer, &canvas(), &export, &config);
        assert!(rel_close(center.x, (2160.0 - 216.0) / 2.0 + 108.0));
    }

    #[test]
    fn text_bottom_does_not_subtract_height() {
        let config = LayoutConfig::default()
            .with_position(Position::Bottom)
            .with_offset(0.0, 50.0);
        let text = Layer::new(LayerType::Text, 800.0, 100.0);
        let image = Layer::new(LayerType::Image, 800.0, 100.0);

        let text_rect = place_for_export(&text, &canvas(), &iphone(), &config);
        let image_rect = place_for_export(&image, &canvas(), &iphone(), &config);

        let scale_y = 2796.0 / 1920.0;
        assert!(rel_close(text_rect.y, 2796.0 - 50.0 * scale_y));
        assert!(rel_close(text_rect.y, 2723.1875));
        assert!(rel_close(image_rect.y, 2796.0 - 50.0 * scale_y - 100.0 * scale_y));
        assert!(rel_close(text_rect.y - image_rect.y, image_rect.height));
    }

    #[test]
    fn non_text_top_respects_anchor_y() {
        let layer = Layer::new(LayerType::Shape, 100.0, 192.0);
        let export = ExportSize::new("1x", "", 1080.0, 1920.0);
        let base = LayoutConfig::default()
            .with_position(Position::Top)
            .with_offset(0.0, 400.0);

        let top = place_for_export(&layer, &canvas(), &export, &base.with_anchor(AnchorX::Center, AnchorY::Top));
        assert!(rel_close(top.y, 400.0));
        let center = place_for_export(&layer, &canvas(), &export, &base.with_anchor(AnchorX::Center, AnchorY::Center));
        assert!(rel_close(center.y, 304.0));
        let bottom = place_for_export(&layer, &canvas(), &export, &base.with_anchor(AnchorX::Center, AnchorY::Bottom));
        assert!(rel_close(bottom.y, 208.0));
    }

    #[test]
    fn overflow_positions_use_raw_offset() {
        let layer = Layer::new(LayerType::Image, 100.0, 500.0);
        let export = ExportSize::new("1x", "", 1080.0, 1920.0);
        for position in [Position::TopOverflow, Position::BottomOverflow] {
            let config = LayoutConfig::default()
                .with_position(position)
                .with_anchor(AnchorX::Center, AnchorY::Bottom)
                .with_offset(0.0, 1500.0);
            let rect = place_for_export(&layer, &canvas(), &export, &config);
            assert!(rel_close(rect.y, 1500.0), "{position:?}");
        }
    }

    #[test]
    fn text_ignores_anchor_y_and_center() {
        let layer = Layer::new(LayerType::Text, 800.0, 300.0);
        let export = ExportSize::new("1x", "", 1080.0, 1920.0);
        for position in [Position::Top, Position::Center, Position::TopOverflow] {
            let config = LayoutConfig::for_layer_type(LayerType::Text)
                .with_position(position)
                .with_anchor(AnchorX::Center, AnchorY::Bottom)
                .with_offset(0.0, 120.0);
            let rect = place_for_export(&layer, &canvas(), &export, &config);
            assert!(rel_close(rect.y, 120.0), "{position:?}");
        }
    }

    #[test]
    fn non_finite_inputs_use_defaults() {
        let layer = Layer::new(LayerType::Image, 100.0, 100.0);
        let export = ExportSize::new("1x", "", 1080.0, 1920.0);
        let config = LayoutConfig::default()
            .with_offset(f64::NAN, f64::INFINITY)
            .with_scale(f64::NAN);
        let rect = place_for_export(&layer, &canvas(), &export, &config);
        assert!(rel_close(rect.x, 490.0));
        assert!(rel_close(rect.y, -50.0));
        assert!(rel_close(rect.width, 100.0));
    }
}
