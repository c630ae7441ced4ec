//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for the view
//! frustum. It maps object-space vertices to normalized device coordinates
//! and NDC to integer pixel coordinates of a target grid.
//!
//! The transform is a shortcut of the full 4x4 perspective matrix: the
//! homogeneous `w` is taken straight from the object-space `z`, so only the
//! first three rows of the matrix are evaluated.
//!
//! ```text
//! x' = x * (2n / (r - l)) + z * (-(r + l) / (r - l))
//! y' = y * (2n / (b - t)) + z * (-(b + t) / (b - t))
//! z' = z * ((f + n) / (f - n)) - 2nf / (f - n)
//! ndc = (x' / z, y' / z, (z' / z + 1) / 2)
//! ```

use crate::error::ProjectionError;
use crate::math::vec3::Vec3;
use crate::scene::Vertex;

/// A view frustum given by its six bounding planes.
///
/// `bottom` is usually numerically greater than `top` so that screen rows grow
/// downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    near: f32,
    far: f32,
}

impl Projection {
    /// Creates a projection, rejecting frustums that would divide by zero.
    ///
    /// # Errors
    /// - [`ProjectionError::NonFinite`] if any parameter is NaN or infinite
    /// - [`ProjectionError::ZeroWidth`] if `left == right`
    /// - [`ProjectionError::ZeroHeight`] if `top == bottom`
    /// - [`ProjectionError::InvalidDepthRange`] unless `0 < near < far`
    pub fn new(
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        near: f32,
        far: f32,
    ) -> Result<Self, ProjectionError> {
        if ![left, right, top, bottom, near, far]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(ProjectionError::NonFinite);
        }
        if left == right {
            return Err(ProjectionError::ZeroWidth { left, right });
        }
        if top == bottom {
            return Err(ProjectionError::ZeroHeight { top, bottom });
        }
        if !(near > 0.0 && near < far) {
            return Err(ProjectionError::InvalidDepthRange { near, far });
        }

        Ok(Self {
            left,
            right,
            top,
            bottom,
            near,
            far,
        })
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    /// Projects one object-space point into normalized device coordinates.
    ///
    /// The result is non-finite when `z == 0`.
    pub fn project(&self, position: Vec3) -> Vec3 {
        let (l, r, t, b, n, f) = (
            self.left,
            self.right,
            self.top,
            self.bottom,
            self.near,
            self.far,
        );
        let Vec3 { x, y, z } = position;

        let x_clip = x * ((2.0 * n) / (r - l)) + z * (-(r + l) / (r - l));
        let y_clip = y * ((2.0 * n) / (b - t)) + z * (-(b + t) / (b - t));
        let z_clip = z * ((f + n) / (f - n)) + (-2.0 * n * f) / (f - n);
        let w = z;

        // Depth is remapped from [-1, 1] to [0, 1].
        Vec3::new(x_clip / w, y_clip / w, (z_clip / w + 1.0) * 0.5)
    }

    /// Projects every vertex, returning a table indexed like `vertices`.
    pub fn project_all(&self, vertices: &[Vertex]) -> Vec<Vec3> {
        vertices.iter().map(|v| self.project(v.position())).collect()
    }

    /// Maps an NDC x coordinate to a pixel column of a grid `width` wide.
    ///
    /// No clamping: points outside `[left, right]` give columns outside
    /// `0..width`.
    #[inline]
    pub fn screen_x(&self, ndx: f32, width: usize) -> i64 {
        ((ndx - self.left) * width as f32 / (self.right - self.left)).floor() as i64
    }

    /// Maps an NDC y coordinate to a pixel row of a grid `height` tall.
    #[inline]
    pub fn screen_y(&self, ndy: f32, height: usize) -> i64 {
        ((ndy - self.top) * height as f32 / (self.bottom - self.top)).floor() as i64
    }
}
