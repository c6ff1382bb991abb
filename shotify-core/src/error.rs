//! Error types for layout document handling.
//!
//! Placement and normalization never fail; these errors cover the caller-side
//! checks around them (document loading, slide bookkeeping, drag sessions).

use thiserror::Error;

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors that can occur around the layout engine.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Canvas dimensions are not finite and positive.
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvas {
        /// Offending width.
        width: f64,
        /// Offending height.
        height: f64,
    },

    /// Export size dimensions are not finite and positive.
    #[error("Invalid export size {name:?}: {width}x{height}")]
    InvalidExportSize {
        /// Export size name.
        name: String,
        /// Offending width.
        width: f64,
        /// Offending height.
        height: f64,
    },

    /// A layer with this id already exists on the slide.
    #[error("Duplicate layer id: {0}")]
    DuplicateLayer(String),

    /// Layer not found on the slide.
    #[error("Layer not found: {0}")]
    LayerNotFound(String),

    /// Locked layers cannot be moved or resized.
    #[error("Layer is locked: {0}")]
    LayerLocked(String),

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
