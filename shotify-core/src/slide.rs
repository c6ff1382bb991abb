//! A slide: one canvas and its ordered layers.

use serde::{Deserialize, Serialize};

use crate::{Canvas, Layer, LayerId, LayoutError, LayoutResult, Point};

/// A slide owning a canvas and a list of layers with unique ids.
///
/// Layers keep insertion order; paint order is derived from `z_index` with
/// ties broken by insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Slide identifier.
    pub id: String,
    /// Design-space canvas.
    pub canvas: Canvas,
    layers: Vec<Layer>,
}

impl Slide {
    /// Create an empty slide.
    #[must_use]
    pub fn new(id: impl Into<String>, canvas: Canvas) -> Self {
        Self {
            id: id.into(),
            canvas,
            layers: Vec::new(),
        }
    }

    /// Build a slide from loaded layers, validating the canvas and id uniqueness.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas is invalid or two layers share an id.
    pub fn from_layers(
        id: impl Into<String>,
        canvas: Canvas,
        layers: impl IntoIterator<Item = Layer>,
    ) -> LayoutResult<Self> {
        canvas.validate()?;
        let mut slide = Self::new(id, canvas);
        for layer in layers {
            slide.add_layer(layer)?;
        }
        Ok(slide)
    }

    /// Add a layer on top of the insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DuplicateLayer`] if the id is already used.
    pub fn add_layer(&mut self, layer: Layer) -> LayoutResult<LayerId> {
        if self.layers.iter().any(|l| l.id == layer.id) {
            tracing::warn!(layer = %layer.id, slide = %self.id, "Rejected duplicate layer id");
            return Err(LayoutError::DuplicateLayer(layer.id.to_string()));
        }
        let id = layer.id.clone();
        self.layers.push(layer);
        Ok(id)
    }

    /// Remove a layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer is not found.
    pub fn remove_layer(&mut self, id: &LayerId) -> LayoutResult<Layer> {
        let index = self
            .layers
            .iter()
            .position(|l| &l.id == id)
            .ok_or_else(|| LayoutError::LayerNotFound(id.to_string()))?;
        Ok(self.layers.remove(index))
    }

    /// Get a layer by id.
    #[must_use]
    pub fn get_layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| &l.id == id)
    }

    /// Get a mutable reference to a layer by id.
    pub fn get_layer_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| &l.id == id)
    }

    /// Layers in insertion order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Layers in paint order: ascending `z_index`, stable for ties.
    #[must_use]
    pub fn paint_order(&self) -> Vec<&Layer> {
        let mut ordered: Vec<&Layer> = self.layers.iter().collect();
        ordered.sort_by_key(|l| l.z_index);
        ordered
    }

    /// Visible layers in paint order.
    #[must_use]
    pub fn visible_layers(&self) -> Vec<&Layer> {
        let mut ordered = self.paint_order();
        ordered.retain(|l| l.visible);
        ordered
    }

    /// Topmost visible layer whose stored box contains a design-space point.
    #[must_use]
    pub fn layer_at(&self, point: Point) -> Option<&Layer> {
        self.visible_layers()
            .into_iter()
            .rev()
            .find(|l| l.contains_point(point))
    }

    /// Number of layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Check if the slide has no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LayerType;

    fn slide() -> Slide {
        Slide::new("s1", Canvas::new(1080.0, 1920.0))
    }

    #[test]
    fn add_and_remove() {
        let mut slide = slide();
        assert!(slide.is_empty());

        let id = slide
            .add_layer(Layer::new(LayerType::Text, 800.0, 200.0))
            .expect("should add");
        assert_eq!(slide.layer_count(), 1);
        assert!(slide.get_layer(&id).is_some());

        slide.remove_layer(&id).expect("should remove");
        assert!(slide.is_empty());
        assert!(matches!(
            slide.remove_layer(&id),
            Err(LayoutError::LayerNotFound(_))
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut slide = slide();
        slide
            .add_layer(Layer::new(LayerType::Shape, 10.0, 10.0).with_id("a"))
            .expect("first");
        let result = slide.add_layer(Layer::new(LayerType::Image, 10.0, 10.0).with_id("a"));
        assert!(matches!(result, Err(LayoutError::DuplicateLayer(id)) if id == "a"));
        assert_eq!(slide.layer_count(), 1);
    }

    #[test]
    fn paint_order_sorts_by_z_index() {
        let mut slide = slide();
        for (id, z) in [("three", 3), ("one", 1), ("two", 2)] {
            slide
                .add_layer(Layer::new(LayerType::Shape, 10.0, 10.0).with_id(id).with_z_index(z))
                .expect("add");
        }
        let order: Vec<_> = slide.paint_order().iter().map(|l| l.z_index).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn paint_order_is_stable_for_ties() {
        let mut slide = slide();
        for id in ["first", "second", "third"] {
            slide
                .add_layer(Layer::new(LayerType::Shape, 10.0, 10.0).with_id(id).with_z_index(5))
                .expect("add");
        }
        slide
            .add_layer(Layer::new(LayerType::Shape, 10.0, 10.0).with_id("under").with_z_index(0))
            .expect("add");
        let order: Vec<_> = slide.paint_order().iter().map(|l| l.id.to_string()).collect();
        assert_eq!(order, vec!["under", "first", "second", "third"]);
    }

    #[test]
    fn hidden_layers_are_skipped() {
        let mut slide = slide();
        let mut hidden = Layer::new(LayerType::Image, 10.0, 10.0).with_id("hidden");
        hidden.visible = false;
        slide.add_layer(hidden).expect("add");
        slide
            .add_layer(Layer::new(LayerType::Image, 10.0, 10.0).with_id("shown"))
            .expect("add");
        let visible: Vec<_> = slide.visible_layers().iter().map(|l| l.id.to_string()).collect();
        assert_eq!(visible, vec!["shown"]);
    }

    #[test]
    fn layer_at_returns_topmost() {
        let mut slide = slide();
        slide
            .add_layer(
                Layer::new(LayerType::Shape, 200.0, 200.0)
                    .with_id("top")
                    .with_position(100.0, 100.0)
                    .with_z_index(2),
            )
            .expect("add");
        slide
            .add_layer(
                Layer::new(LayerType::Shape, 500.0, 500.0)
                    .with_id("bottom")
                    .with_z_index(1),
            )
            .expect("add");

        let hit = slide.layer_at(Point::new(150.0, 150.0)).expect("hit");
        assert_eq!(hit.id.as_str(), "top");
        let hit = slide.layer_at(Point::new(400.0, 400.0)).expect("hit");
        assert_eq!(hit.id.as_str(), "bottom");
        assert!(slide.layer_at(Point::new(900.0, 900.0)).is_none());
    }

    #[test]
    fn from_layers_validates_canvas() {
        let result = Slide::from_layers("bad", Canvas::new(0.0, 100.0), Vec::new());
        assert!(matches!(result, Err(LayoutError::InvalidCanvas { .. })));
    }
}
