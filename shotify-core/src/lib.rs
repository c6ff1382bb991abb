//! # Shotify Core
//!
//! Layer layout and coordinate engine for store screenshot templates.
//! Compiles to WASM so the editor and the export pipeline share one
//! implementation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              shotify-core.wasm              │
//! ├─────────────────────────────────────────────┤
//! │  Documents       │  Normalizer              │
//! │  - Templates     │  - {Key, Value} lists    │
//! │  - Projects      │  - Typed properties      │
//! │  - Device slides │  - Layout config         │
//! ├─────────────────────────────────────────────┤
//! │  Editor Space    │  Export Space            │
//! │  - % placement   │  - Pixel placement       │
//! │  - Drag/resize   │  - Gradients, plans      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Placement is a pure function of a layer, its canvas and a
//! [`LayoutConfig`]; the editor and export sides agree on where a layer
//! lands, proportionally, for every export size.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod devices;
pub mod error;
pub mod export;
pub mod gradient;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod normalize;
pub mod placement;
pub mod plan;
pub mod properties;
pub mod schema;
pub mod slide;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use devices::{find_preset, preset_devices};
pub use error::{LayoutError, LayoutResult};
pub use export::{place_for_export, scale_factors};
pub use gradient::{DeviceStop, GradientKind, GradientProperties, GradientStop};
pub use interaction::{DragMode, DragSession, LayerUpdate, ResizeHandle, MIN_LAYER_SIZE};
pub use layout::{AnchorX, AnchorY, LayoutConfig, Position};
pub use model::{Canvas, ExportSize, Layer, LayerId, LayerType, PixelRect, Point, PropertyMap};
pub use normalize::{normalize_layer, normalize_layers, normalize_properties};
pub use placement::{is_full_background, place_for_editing, BoxHeight, EditorPlacement};
pub use plan::{ExportPlan, Paint, PlannedLayer};
pub use properties::{
    ImageProperties, LayerProperties, ShapeProperties, ShapeType, TextAlign, TextProperties,
    TEXT_RENDER_PADDING,
};
pub use schema::{DeviceConfig, ImageAsset, ProjectConfig, SlideData, TemplateConfig};
pub use slide::Slide;

/// Shotify core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
