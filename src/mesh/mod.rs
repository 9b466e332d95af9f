//! # Global Mesh
//!
//! The single welded triangle mesh for one model, plus the per-face and
//! per-edge records pointing into it.

pub mod records;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshStitchError;

pub use records::{EdgeMesh, FaceMesh};

/// A triangle mesh with vertices in discovery order and triangles in
/// acceptance order.
///
/// # Example
///
/// ```rust
/// use brep_stitch::mesh::GlobalMesh;
/// use glam::DVec3;
///
/// let mut mesh = GlobalMesh::new();
/// let first = mesh.append_vertices([DVec3::ZERO, DVec3::X, DVec3::Y]).unwrap();
/// assert_eq!(first, 0);
/// mesh.append_triangle([0, 1, 2]).unwrap();
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalMesh {
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
}

impl GlobalMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mesh from raw arrays without validation.
    pub fn from_parts(vertices: Vec<DVec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// Splits the mesh into its raw arrays.
    pub fn into_parts(self) -> (Vec<DVec3>, Vec<[u32; 3]>) {
        (self.vertices, self.triangles)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Appends a block of vertices and returns the global index of the first.
    pub fn append_vertices<I>(&mut self, points: I) -> Result<u32, MeshStitchError>
    where
        I: IntoIterator<Item = DVec3>,
    {
        let first = index_of(self.vertices.len())?;
        self.vertices.extend(points);
        index_of(self.vertices.len())?;
        Ok(first)
    }

    /// Appends one triangle and returns its global index.
    pub fn append_triangle(&mut self, triangle: [u32; 3]) -> Result<u32, MeshStitchError> {
        let index = index_of(self.triangles.len())?;
        self.triangles.push(triangle);
        Ok(index)
    }

    /// Appends a block of triangles and returns the global index of the first.
    pub fn append_triangles(&mut self, triangles: &[[u32; 3]]) -> Result<u32, MeshStitchError> {
        let first = index_of(self.triangles.len())?;
        self.triangles.extend_from_slice(triangles);
        index_of(self.triangles.len())?;
        Ok(first)
    }

    /// Axis-aligned bounds, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }

    /// Corner positions of triangle `index`.
    pub fn triangle_positions(&self, index: usize) -> Option<[DVec3; 3]> {
        let [a, b, c] = *self.triangles.get(index)?;
        Some([
            *self.vertices.get(a as usize)?,
            *self.vertices.get(b as usize)?,
            *self.vertices.get(c as usize)?,
        ])
    }

    /// Triangles of one face record.
    pub fn face_triangles<'a>(&'a self, face: &'a FaceMesh) -> impl Iterator<Item = [u32; 3]> + 'a {
        face.triangle_indices
            .iter()
            .filter_map(|&t| self.triangles.get(t as usize).copied())
    }

    pub(crate) fn replace(&mut self, vertices: Vec<DVec3>, triangles: Vec<[u32; 3]>) {
        self.vertices = vertices;
        self.triangles = triangles;
    }
}

fn index_of(len: usize) -> Result<u32, MeshStitchError> {
    u32::try_from(len).map_err(|_| MeshStitchError::IndexOverflow(len))
}

impl DebugInvariants for GlobalMesh {
    fn validate_invariants(&self) -> Result<(), MeshStitchError> {
        let len = self.vertices.len();
        for (triangle, &[a, b, c]) in self.triangles.iter().enumerate() {
            for vertex in [a, b, c] {
                if vertex as usize >= len {
                    return Err(MeshStitchError::TriangleIndexOutOfRange {
                        triangle,
                        vertex,
                        len,
                    });
                }
            }
            if a == b || b == c || a == c {
                return Err(MeshStitchError::DegenerateTriangle {
                    triangle,
                    indices: [a, b, c],
                });
            }
        }
        Ok(())
    }
}
