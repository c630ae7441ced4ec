//! Triangle rasterization.
//!
//! Triangles are filled by bounding-box iteration: every pixel of the
//! screen-space box around the triangle is tested with the area-sum rule of
//! [`edgefunction`], and each inside pixel gets perspective-correct
//! interpolated NDC coordinates before it is depth-tested and shaded.
//!
//! There is no scanline or edge-walk optimization, and no clipping: a
//! triangle whose inside reaches past the grid is reported as
//! [`RenderError::PixelOutOfBounds`]. A corner's own pixel is always inside a
//! non-degenerate triangle, so checking the three corners before the scan
//! catches every such triangle and keeps edge function arithmetic within the
//! grid's range.

pub mod edgefunction;
pub mod shader;

pub use edgefunction::{barycentric, edge_function};
pub use shader::{DepthBandShader, FlatShader, Fragment, FragmentShader, ShaderFn};

use super::framebuffer::{Pixel, RenderTarget};
use crate::error::RenderError;
use crate::math::vec3::Vec3;
use crate::projection::Projection;

/// An integer pixel position; `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i64,
    pub y: i64,
}

impl ScreenPoint {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn is_on_grid(&self, width: usize, height: usize) -> bool {
        let extent = |len: usize| 0..i64::try_from(len).unwrap_or(i64::MAX);
        extent(width).contains(&self.x) && extent(height).contains(&self.y)
    }
}

/// Inclusive pixel bounds of a triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min: ScreenPoint,
    pub max: ScreenPoint,
}

impl BoundingBox {
    pub fn of(points: &[ScreenPoint; 3]) -> Self {
        let [a, b, c] = *points;
        Self {
            min: ScreenPoint::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y)),
            max: ScreenPoint::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y)),
        }
    }

    /// Every pixel in the box, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = ScreenPoint> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| ScreenPoint::new(x, y)))
    }
}

/// A triangle ready for rasterization: NDC corners plus their pixel positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTriangle {
    pub ndc: [Vec3; 3],
    pub points: [ScreenPoint; 3],
}

impl ScreenTriangle {
    /// Map NDC corners onto a `width x height` grid.
    pub fn new(ndc: [Vec3; 3], projection: &Projection, width: usize, height: usize) -> Self {
        let points = ndc.map(|v| {
            ScreenPoint::new(
                projection.screen_x(v.x, width),
                projection.screen_y(v.y, height),
            )
        });
        Self { ndc, points }
    }

    /// True when the three pixel positions are collinear.
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.points;
        edge_function(a, b, c) == 0
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::of(&self.points)
    }

    /// Fails with the first corner that lies off a `width x height` grid.
    pub fn ensure_on_grid(&self, width: usize, height: usize) -> Result<(), RenderError> {
        match self.points.iter().find(|p| !p.is_on_grid(width, height)) {
            Some(p) => Err(RenderError::PixelOutOfBounds {
                row: p.y,
                col: p.x,
                width,
                height,
            }),
            None => Ok(()),
        }
    }
}

/// Interpolate the NDC corners with screen-space `weights`, correcting for
/// perspective.
///
/// Each corner is weighted by `w_i / z_i`, with `z_i` the corner's own NDC
/// depth:
///
/// ```text
/// A = (w0/z0 * A0 + w1/z1 * A1 + w2/z2 * A2) / (w0/z0 + w1/z1 + w2/z2)
/// ```
///
/// A corner at NDC depth 0 (on the near plane) makes the result non-finite.
#[inline]
pub fn perspective_correct(weights: [f32; 3], ndc: &[Vec3; 3]) -> Vec3 {
    let r = [
        weights[0] / ndc[0].z,
        weights[1] / ndc[1].z,
        weights[2] / ndc[2].z,
    ];
    let sum = r[0] + r[1] + r[2];
    (ndc[0] * r[0] + ndc[1] * r[1] + ndc[2] * r[2]) / sum
}

/// Fill one triangle into the render target.
///
/// The shader is called once for every inside pixel that passes the depth
/// test. Returns the number of pixels written.
///
/// # Errors
/// [`RenderError::PixelOutOfBounds`] for the first corner off the grid,
/// before any pixel is visited.
pub fn fill_triangle<T: Pixel, S: FragmentShader<T> + ?Sized>(
    triangle: &ScreenTriangle,
    target: &mut RenderTarget<'_, T>,
    shader: &S,
) -> Result<usize, RenderError> {
    triangle.ensure_on_grid(target.width(), target.height())?;
    let mut written = 0;

    for p in triangle.bounding_box().pixels() {
        let Some(weights) = barycentric(&triangle.points, p) else {
            continue;
        };

        let position = perspective_correct(weights, &triangle.ndc);
        let fragment = Fragment::new(position);
        if target.set_pixel_with_depth(p.y, p.x, position.z, || shader.shade(&fragment))? {
            written += 1;
        }
    }

    Ok(written)
}
