//! Scene data model: vertices, index triangles, and OBJ loading.
//!
//! A [`Scene`] owns its vertices in a single arena. Triangles refer to them by
//! index, so vertices shared between several triangles are stored once and
//! copying or moving a scene never leaves a triangle pointing at stale data.
//!
//! Index triples are not validated when a scene is built. A triangle that
//! names a vertex beyond the end of the arena is reported by
//! [`Scene::vertex`] and therefore by the first render that reaches it.

use std::fmt::Debug;
use std::path::Path;

use log::debug;

use crate::error::{LoadError, RenderError};
use crate::math::vec3::Vec3;

/// An object-space point.
///
/// Vertices are immutable. Projected coordinates are computed per render by
/// [`Projection::project_all`](crate::Projection::project_all) and kept in a
/// table owned by the render call, never written back here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    position: Vec3,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }
}

impl From<Vec3> for Vertex {
    fn from(position: Vec3) -> Self {
        Self { position }
    }
}

impl From<[f32; 3]> for Vertex {
    fn from(xyz: [f32; 3]) -> Self {
        Self {
            position: xyz.into(),
        }
    }
}

impl From<(f32, f32, f32)> for Vertex {
    fn from(xyz: (f32, f32, f32)) -> Self {
        Self {
            position: xyz.into(),
        }
    }
}

// The members are indices into the vertex arena of the owning scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self { indices: [a, b, c] }
    }
}

impl From<[usize; 3]> for Triangle {
    fn from(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// An ordered set of vertices and the triangles built from them.
///
/// Triangle order matters: it is the order the pipeline rasterizes in, which
/// decides the winner when two triangles reach a pixel at exactly the same
/// depth.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
}

impl Scene {
    pub fn new(vertices: Vec<Vertex>, triangles: Vec<Triangle>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// Build a scene from raw coordinate and index triples.
    pub fn from_raw<V, T>(vertices: V, triangles: T) -> Self
    where
        V: IntoIterator<Item = [f32; 3]>,
        T: IntoIterator<Item = [usize; 3]>,
    {
        Self {
            vertices: vertices.into_iter().map(Vertex::from).collect(),
            triangles: triangles.into_iter().map(Triangle::from).collect(),
        }
    }

    /// Load every model of a Wavefront OBJ file into one scene.
    ///
    /// Faces are triangulated on load. When the file holds several objects,
    /// their index triples are offset so they keep pointing at their own
    /// vertices in the merged arena.
    pub fn from_obj<P: AsRef<Path> + Debug>(path: P) -> Result<Self, LoadError> {
        let options = tobj::LoadOptions {
            triangulate: true,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(&path, &options)?;

        let mut scene = Scene::default();
        for model in &models {
            let base = scene.vertices.len();
            scene.vertices.extend(
                model
                    .mesh
                    .positions
                    .chunks_exact(3)
                    .map(|p| Vertex::new(p[0], p[1], p[2])),
            );
            scene
                .triangles
                .extend(model.mesh.indices.chunks_exact(3).map(|face| {
                    Triangle::new(
                        base + face[0] as usize,
                        base + face[1] as usize,
                        base + face[2] as usize,
                    )
                }));
        }

        debug!(
            "loaded {:?}: {} models, {} vertices, {} triangles",
            path,
            models.len(),
            scene.vertices.len(),
            scene.triangles.len()
        );
        Ok(scene)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, vertex: impl Into<Vertex>) -> usize {
        self.vertices.push(vertex.into());
        self.vertices.len() - 1
    }

    /// Append a triangle and return its position in draw order.
    pub fn push_triangle(&mut self, triangle: impl Into<Triangle>) -> usize {
        self.triangles.push(triangle.into());
        self.triangles.len() - 1
    }

    /// Resolve corner `corner` (0..3) of triangle `triangle` to the arena
    /// index it names, checking both lookups.
    pub fn vertex_index(&self, triangle: usize, corner: usize) -> Result<usize, RenderError> {
        let out_of_range = |index| RenderError::VertexIndexOutOfRange {
            triangle,
            corner,
            index,
            vertex_count: self.vertices.len(),
        };

        let tri = self.triangles.get(triangle).ok_or(out_of_range(usize::MAX))?;
        let index = *tri.indices.get(corner).ok_or(out_of_range(usize::MAX))?;
        if index >= self.vertices.len() {
            return Err(out_of_range(index));
        }
        Ok(index)
    }

    /// The vertex at corner `corner` of triangle `triangle`.
    pub fn vertex(&self, triangle: usize, corner: usize) -> Result<&Vertex, RenderError> {
        let index = self.vertex_index(triangle, corner)?;
        Ok(&self.vertices[index])
    }

    /// All three arena indices of a triangle, validated.
    pub fn triangle_indices(&self, triangle: usize) -> Result<[usize; 3], RenderError> {
        Ok([
            self.vertex_index(triangle, 0)?,
            self.vertex_index(triangle, 1)?,
            self.vertex_index(triangle, 2)?,
        ])
    }
}
