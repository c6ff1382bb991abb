//! Pointer interaction math for moving and resizing layers in the editor.
//!
//! Converts pointer deltas (in design pixels) back into the semantic layout
//! fields stored on a layer. Event wiring, selection and undo history belong
//! to the caller; a [`DragSession`] only remembers where the gesture started.

use serde::{Deserialize, Serialize};

use crate::{
    AnchorX, Canvas, Layer, LayerId, LayoutConfig, LayoutError, LayoutResult, Point, Position,
};

/// Smallest width or height a resize can produce, in design pixels.
pub const MIN_LAYER_SIZE: f64 = 20.0;

/// Ratio of on-screen pixels to design pixels for an editor frame.
#[must_use]
pub fn editor_scale(container_width: f64, canvas: &Canvas) -> f64 {
    container_width / canvas.width
}

/// Convert a client-space pointer into design-space coordinates.
///
/// `frame_origin` is the top-left of the rendered canvas in client space.
/// A non-positive or non-finite `scale` is treated as `1`.
#[must_use]
pub fn client_to_canvas(client: Point, frame_origin: Point, scale: f64) -> Point {
    let scale = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    };
    Point::new(
        (client.x - frame_origin.x) / scale,
        (client.y - frame_origin.y) / scale,
    )
}

/// Design-space center of a `width` x `height` layer with the given offsets.
#[must_use]
pub fn compute_center(
    width: f64,
    height: f64,
    canvas: &Canvas,
    anchor_x: AnchorX,
    position: Position,
    offset_x: f64,
    offset_y: f64,
) -> Point {
    let x = match anchor_x {
        AnchorX::Left => offset_x + width / 2.0,
        AnchorX::Right => canvas.width - offset_x - width / 2.0,
        AnchorX::Center => canvas.width / 2.0 + offset_x,
    };
    let y = if position == Position::Bottom {
        canvas.height - offset_y - height / 2.0
    } else {
        offset_y
    };
    Point::new(x, y)
}

/// Inverse of [`compute_center`]: the offsets that put a layer's center at
/// `center`. Returns `(offset_x, offset_y)`.
#[must_use]
pub fn center_to_offsets(
    center: Point,
    width: f64,
    height: f64,
    canvas: &Canvas,
    anchor_x: AnchorX,
    position: Position,
) -> (f64, f64) {
    let offset_x = match anchor_x {
        AnchorX::Left => center.x - width / 2.0,
        AnchorX::Right => canvas.width - center.x - width / 2.0,
        AnchorX::Center => center.x - canvas.width / 2.0,
    };
    let offset_y = if position == Position::Bottom {
        canvas.height - center.y - height / 2.0
    } else {
        center.y
    };
    (offset_x, offset_y)
}

/// One of the eight resize handles around a selected layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    /// Top edge.
    N,
    /// Top-right corner.
    Ne,
    /// Right edge.
    E,
    /// Bottom-right corner.
    Se,
    /// Bottom edge.
    S,
    /// Bottom-left corner.
    Sw,
    /// Left edge.
    W,
    /// Top-left corner.
    Nw,
}

impl ResizeHandle {
    /// All handles, clockwise from the top.
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::Ne,
        Self::E,
        Self::Se,
        Self::S,
        Self::Sw,
        Self::W,
        Self::Nw,
    ];

    fn north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    fn south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    fn east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    fn west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }
}

/// What a pointer gesture does to the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "handle", rename_all = "lowercase")]
pub enum DragMode {
    /// Translate the layer.
    Move,
    /// Resize from a handle.
    Resize(ResizeHandle),
}

/// New layout values produced by a pointer move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerUpdate {
    /// Layer being edited.
    pub layer_id: LayerId,
    /// New width, set only when resizing.
    pub width: Option<f64>,
    /// New height, set only when resizing.
    pub height: Option<f64>,
    /// New horizontal offset.
    pub offset_x: f64,
    /// New vertical offset.
    pub offset_y: f64,
}

impl LayerUpdate {
    /// Write the update into a layer, keeping every other property.
    pub fn apply(&self, layer: &mut Layer) {
        if let Some(width) = self.width {
            layer.width = width;
        }
        if let Some(height) = self.height {
            layer.height = height;
        }
        layer
            .properties
            .insert("offsetX".to_string(), self.offset_x.into());
        layer
            .properties
            .insert("offsetY".to_string(), self.offset_y.into());
    }
}

/// State captured when a move or resize gesture starts.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    layer_id: LayerId,
    mode: DragMode,
    canvas: Canvas,
    anchor_x: AnchorX,
    position: Position,
    start_pointer: Point,
    start_center: Point,
    start_width: f64,
    start_height: f64,
}

impl DragSession {
    /// Start a gesture on `layer` with the pointer at `pointer` (design space).
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::LayerLocked`] if the layer is locked.
    pub fn begin(
        layer: &Layer,
        canvas: &Canvas,
        config: &LayoutConfig,
        pointer: Point,
        mode: DragMode,
    ) -> LayoutResult<Self> {
        if layer.locked {
            return Err(LayoutError::LayerLocked(layer.id.to_string()));
        }
        let config = config.sanitized();
        let start_center = compute_center(
            layer.width,
            layer.height,
            canvas,
            config.anchor_x,
            config.position,
            config.offset_x,
            config.offset_y,
        );
        tracing::trace!(layer = %layer.id, ?mode, "Drag session started");
        Ok(Self {
            layer_id: layer.id.clone(),
            mode,
            canvas: canvas.clone(),
            anchor_x: config.anchor_x,
            position: config.position,
            start_pointer: pointer,
            start_center,
            start_width: layer.width,
            start_height: layer.height,
        })
    }

    /// The layer this gesture edits.
    #[must_use]
    pub fn layer_id(&self) -> &LayerId {
        &self.layer_id
    }

    /// The gesture mode.
    #[must_use]
    pub fn mode(&self) -> DragMode {
        self.mode
    }

    /// Compute the layer update for the pointer's current position.
    ///
    /// Outputs are rounded to two decimals, matching what the editor stores.
    #[must_use]
    pub fn update(&self, pointer: Point) -> LayerUpdate {
        let dx = pointer.x - self.start_pointer.x;
        let dy = pointer.y - self.start_pointer.y;

        match self.mode {
            DragMode::Move => {
                let center = Point::new(self.start_center.x + dx, self.start_center.y + dy);
                let (offset_x, offset_y) = self.offsets(center, self.start_width, self.start_height);
                LayerUpdate {
                    layer_id: self.layer_id.clone(),
                    width: None,
                    height: None,
                    offset_x: round2(offset_x),
                    offset_y: round2(offset_y),
                }
            }
            DragMode::Resize(handle) => {
                let mut left = self.start_center.x - self.start_width / 2.0;
                let mut top = self.start_center.y - self.start_height / 2.0;
                let mut width = self.start_width;
                let mut height = self.start_height;

                if handle.east() {
                    width = (self.start_width + dx).max(MIN_LAYER_SIZE);
                }
                if handle.west() {
                    width = (self.start_width - dx).max(MIN_LAYER_SIZE);
                    left += dx;
                }
                if handle.south() {
                    height = (self.start_height + dy).max(MIN_LAYER_SIZE);
                }
                if handle.north() {
                    height = (self.start_height - dy).max(MIN_LAYER_SIZE);
                    top += dy;
                }

                let center = Point::new(left + width / 2.0, top + height / 2.0);
                let (offset_x, offset_y) = self.offsets(center, width, height);
                LayerUpdate {
                    layer_id: self.layer_id.clone(),
                    width: Some(round2(width)),
                    height: Some(round2(height)),
                    offset_x: round2(offset_x),
                    offset_y: round2(offset_y),
                }
            }
        }
    }

    fn offsets(&self, center: Point, width: f64, height: f64) -> (f64, f64) {
        center_to_offsets(center, width, height, &self.canvas, self.anchor_x, self.position)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
