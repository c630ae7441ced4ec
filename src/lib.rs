//! A CPU-based perspective rasterizer with z-buffering.
//!
//! This crate projects a scene of indexed triangles through a view frustum,
//! fills each triangle into a fixed-size grid, resolves overlaps with a depth
//! buffer and shades every accepted pixel through a swappable fragment shader.
//! The output cell type is generic, so a frame can be a grid of characters or
//! of small integers.
//!
//! # Quick Start
//!
//! ```
//! use zraster::prelude::*;
//!
//! let projection = Projection::new(-1.0, 1.0, -1.0, 1.0, 1.0, 2.0)?;
//! let mut pipeline = Pipeline::<char>::new(4, 4, projection, DepthBandShader)?;
//!
//! let scene = Scene::from_raw(
//!     [[0.0, -1.0, 1.5], [1.0, 1.0, 1.5], [-1.0, 1.0, 1.5]],
//!     [[0, 1, 2]],
//! );
//! pipeline.render(&scene)?;
//! assert_eq!(pipeline.frame_buffer().get(3, 0)?, '6');
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod math;
pub mod output;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod scene;

// Re-export commonly needed types at crate root for convenience
pub use error::{LoadError, ProjectionError, RenderError};
pub use pipeline::{Pipeline, RenderStats};
pub use projection::Projection;
pub use scene::{Scene, Triangle, Vertex};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use zraster::prelude::*;
/// ```
pub mod prelude {
    // Errors
    pub use crate::error::{LoadError, ProjectionError, RenderError};

    // Pipeline
    pub use crate::pipeline::{Pipeline, RenderStats};

    // Projection
    pub use crate::projection::Projection;

    // Scene
    pub use crate::scene::{Scene, Triangle, Vertex};

    // Math
    pub use crate::math::vec3::Vec3;

    // Rendering
    pub use crate::render::{
        DepthBandShader, DepthBuffer, FlatShader, Fragment, FragmentShader, FrameBuffer, Pixel,
        ShaderFn,
    };
}
