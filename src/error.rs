//! Error types for projection setup, rendering and scene loading.

use thiserror::Error;

/// Rejected frustum parameters.
///
/// Every variant corresponds to a parameter combination that would make one
/// of the projection divisors zero or flip the depth range.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProjectionError {
    #[error("frustum parameters must be finite")]
    NonFinite,
    #[error("frustum has zero width (left = right = {left})")]
    ZeroWidth { left: f32, right: f32 },
    #[error("frustum has zero height (top = bottom = {top})")]
    ZeroHeight { top: f32, bottom: f32 },
    #[error("depth range requires 0 < near < far, got near = {near}, far = {far}")]
    InvalidDepthRange { near: f32, far: f32 },
}

/// Errors raised while building buffers or rendering a scene.
///
/// A render that fails leaves the buffers as they were at the moment of the
/// failure. Call [`Pipeline::clear`](crate::Pipeline::clear) to reset them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("buffer dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error(
        "triangle {triangle} corner {corner} references vertex {index}, \
         but the scene has {vertex_count} vertices"
    )]
    VertexIndexOutOfRange {
        triangle: usize,
        corner: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("pixel (row {row}, col {col}) is outside the {width}x{height} buffer")]
    PixelOutOfBounds {
        row: i64,
        col: i64,
        width: usize,
        height: usize,
    },

    #[error("vertex {index} projects to non-finite coordinates (object-space z = 0?)")]
    NonFiniteVertex { index: usize },
}

/// Errors raised while loading a [`Scene`](crate::Scene) from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load OBJ file: {0}")]
    Obj(#[from] tobj::LoadError),
}
