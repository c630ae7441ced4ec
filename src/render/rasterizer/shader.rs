//! Fragment shaders for triangle rasterization.
//!
//! The rasterizer handles:
//! - Bounding box computation
//! - Inside/outside testing
//! - Perspective-correct interpolation
//! - Depth testing
//!
//! The shader only turns an accepted [`Fragment`] into the value stored in the
//! frame buffer. Shaders are plain values behind the [`FragmentShader`] trait
//! and can be swapped on a live pipeline.

use crate::math::vec3::Vec3;

/// Interpolated data for one covered, depth-accepted pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    /// Perspective-correct NDC position; `position.z` is the stored depth.
    pub position: Vec3,
    /// Reserved. Always zero, no stage produces normals yet.
    pub normal: Vec3,
    /// Reserved. Always zero, no stage produces texture coordinates yet.
    pub uv: [f32; 2],
}

impl Fragment {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            normal: Vec3::ZERO,
            uv: [0.0; 2],
        }
    }

    pub fn depth(&self) -> f32 {
        self.position.z
    }
}

/// Trait for per-fragment shading computations.
///
/// The pipeline calls `shade()` exactly once for every pixel that is inside a
/// triangle and passes the depth test.
pub trait FragmentShader<T> {
    fn shade(&self, fragment: &Fragment) -> T;
}

impl<T, S: FragmentShader<T> + ?Sized> FragmentShader<T> for Box<S> {
    #[inline]
    fn shade(&self, fragment: &Fragment) -> T {
        (**self).shade(fragment)
    }
}

/// Depth banding shader - the first decimal digit of the fragment depth.
///
/// `band = floor((z - floor(z)) * 10)`, clamped to `0..=9`. As a `char` or
/// `u8` the band is offset to its ASCII digit, as an `i32` it is the bare
/// number.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepthBandShader;

impl DepthBandShader {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    pub fn band(depth: f32) -> u8 {
        // A fraction just below 1.0 can round up to 10 after the multiply.
        ((depth - depth.floor()) * 10.0).floor().clamp(0.0, 9.0) as u8
    }
}

impl FragmentShader<char> for DepthBandShader {
    #[inline]
    fn shade(&self, fragment: &Fragment) -> char {
        char::from(b'0' + Self::band(fragment.depth()))
    }
}

impl FragmentShader<u8> for DepthBandShader {
    #[inline]
    fn shade(&self, fragment: &Fragment) -> u8 {
        b'0' + Self::band(fragment.depth())
    }
}

impl FragmentShader<i32> for DepthBandShader {
    #[inline]
    fn shade(&self, fragment: &Fragment) -> i32 {
        i32::from(Self::band(fragment.depth()))
    }
}

/// Flat shader - returns a constant value for all fragments.
#[derive(Clone, Copy, Debug)]
pub struct FlatShader<T> {
    value: T,
}

impl<T: Copy> FlatShader<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: Copy> FragmentShader<T> for FlatShader<T> {
    #[inline]
    fn shade(&self, _fragment: &Fragment) -> T {
        self.value
    }
}

/// Adapts a closure into a shader.
///
/// ```
/// use zraster::prelude::*;
///
/// let near_far = ShaderFn(|f: &Fragment| if f.depth() < 0.5 { 'n' } else { 'f' });
/// assert_eq!(near_far.shade(&Fragment::new(Vec3::new(0.0, 0.0, 0.2))), 'n');
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ShaderFn<F>(pub F);

impl<T, F: Fn(&Fragment) -> T> FragmentShader<T> for ShaderFn<F> {
    #[inline]
    fn shade(&self, fragment: &Fragment) -> T {
        (self.0)(fragment)
    }
}
