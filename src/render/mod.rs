//! Rendering internals: buffers, rasterization and shading.

pub mod framebuffer;
pub mod rasterizer;

pub use framebuffer::{DepthBuffer, FrameBuffer, Grid, Pixel, RenderTarget};
pub use rasterizer::{
    fill_triangle, perspective_correct, BoundingBox, DepthBandShader, FlatShader, Fragment,
    FragmentShader, ScreenPoint, ScreenTriangle, ShaderFn,
};
