//! Render pipeline orchestration.
//!
//! The [`Pipeline`] struct is the main entry point. It owns a frame buffer and
//! a depth buffer of fixed dimensions, one [`Projection`] and one active
//! [`FragmentShader`], and runs a render pass in four stages:
//!
//! 1. Project every scene vertex into a per-pass NDC table
//! 2. Map each triangle, in scene order, onto the pixel grid
//! 3. Area-sum inside test over the triangle's bounding box
//! 4. Perspective-correct interpolation, depth test, shade and write
//!
//! # Buffer Lifetime
//!
//! `render` never clears. Successive renders accumulate into the same buffers
//! until [`Pipeline::clear`] is called, so several scenes can be composited
//! into one frame and a shader swapped between them.

use log::{debug, trace};

use crate::error::RenderError;
use crate::math::vec3::Vec3;
use crate::projection::Projection;
use crate::render::{
    fill_triangle, DepthBuffer, FrameBuffer, FragmentShader, Pixel, RenderTarget, ScreenTriangle,
};
use crate::scene::Scene;

/// Counters for the most recent render call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Triangles reached, including degenerate ones and the one that failed.
    pub triangles: usize,
    /// Zero-area triangles that covered no pixel.
    pub degenerate: usize,
    /// Depth-accepted pixels written to the frame buffer.
    pub pixels_written: usize,
}

pub struct Pipeline<T: Pixel> {
    frame: FrameBuffer<T>,
    depth: DepthBuffer,
    projection: Projection,
    shader: Box<dyn FragmentShader<T>>,
    stats: RenderStats,
    dirty: bool,
}

impl<T: Pixel> Pipeline<T> {
    /// Create a pipeline rendering into a `width x height` grid.
    ///
    /// # Errors
    /// [`RenderError::InvalidDimensions`] if either dimension is zero.
    pub fn new(
        width: usize,
        height: usize,
        projection: Projection,
        shader: impl FragmentShader<T> + 'static,
    ) -> Result<Self, RenderError> {
        Ok(Self {
            frame: FrameBuffer::new(width, height)?,
            depth: DepthBuffer::new(width, height)?,
            projection,
            shader: Box::new(shader),
            stats: RenderStats::default(),
            dirty: false,
        })
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn frame_buffer(&self) -> &FrameBuffer<T> {
        &self.frame
    }

    /// Read-only view of the depth buffer, for inspection and export.
    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth
    }

    pub fn last_stats(&self) -> RenderStats {
        self.stats
    }

    /// True until a render writes a pixel, and again after [`clear`](Self::clear).
    pub fn is_clean(&self) -> bool {
        !self.dirty
    }

    /// Replace the active shader. Already rendered pixels are kept.
    pub fn set_shader(&mut self, shader: impl FragmentShader<T> + 'static) -> &mut Self {
        self.set_boxed_shader(Box::new(shader))
    }

    pub fn set_boxed_shader(&mut self, shader: Box<dyn FragmentShader<T>>) -> &mut Self {
        debug!("shader swapped");
        self.shader = shader;
        self
    }

    /// Reset the frame buffer to blank and the depth buffer to `+inf`.
    pub fn clear(&mut self) -> &mut Self {
        self.frame.clear();
        self.depth.clear();
        self.dirty = false;
        debug!("cleared {}x{} buffers", self.width(), self.height());
        self
    }

    /// Render `scene` into the buffers.
    ///
    /// The scene is only read. Its triangles are drawn in stored order; at a
    /// pixel where two triangles have exactly the same depth, the one drawn
    /// first is kept.
    ///
    /// # Errors
    /// - [`RenderError::VertexIndexOutOfRange`] for a triangle naming a missing vertex
    /// - [`RenderError::NonFiniteVertex`] for a triangle using a vertex with `z = 0`
    /// - [`RenderError::PixelOutOfBounds`] for a triangle with a corner off the grid
    ///
    /// The render stops at the failing triangle, before any of its pixels are
    /// written. Earlier triangles stay drawn.
    pub fn render(&mut self, scene: &Scene) -> Result<&mut Self, RenderError> {
        let ndc = self.projection.project_all(scene.vertices());
        let mut stats = RenderStats::default();

        let result = {
            let mut target = RenderTarget::new(&mut self.frame, &mut self.depth);
            rasterize_scene(
                scene,
                &ndc,
                &self.projection,
                &mut target,
                &*self.shader,
                &mut stats,
            )
        };

        self.dirty |= stats.pixels_written > 0;
        self.stats = stats;

        match result {
            Ok(()) => {
                debug!(
                    "rendered {} triangles ({} degenerate), {} pixels written",
                    stats.triangles, stats.degenerate, stats.pixels_written
                );
                Ok(self)
            }
            Err(err) => {
                debug!("render aborted after {} triangles: {err}", stats.triangles);
                Err(err)
            }
        }
    }
}

fn rasterize_scene<T: Pixel>(
    scene: &Scene,
    ndc: &[Vec3],
    projection: &Projection,
    target: &mut RenderTarget<'_, T>,
    shader: &dyn FragmentShader<T>,
    stats: &mut RenderStats,
) -> Result<(), RenderError> {
    let (width, height) = (target.width(), target.height());

    for index in 0..scene.triangles().len() {
        stats.triangles += 1;

        let corners = scene.triangle_indices(index)?;
        if let Some(&bad) = corners.iter().find(|&&i| !ndc[i].is_finite()) {
            return Err(RenderError::NonFiniteVertex { index: bad });
        }

        let triangle = ScreenTriangle::new(corners.map(|i| ndc[i]), projection, width, height);
        triangle.ensure_on_grid(width, height)?;
        if triangle.is_degenerate() {
            stats.degenerate += 1;
            trace!("triangle {index} has zero screen area, skipped");
            continue;
        }

        stats.pixels_written += fill_triangle(&triangle, target, shader)?;
    }

    Ok(())
}
