//! Orphan compaction: drop vertices no triangle uses and renumber the rest.
//!
//! Survivors keep their relative order. Face and edge records are remapped
//! through the same table; their entries for removed vertices are dropped
//! together with the matching parameter entries.

use crate::debug_invariants::DebugInvariants;
use crate::mesh::{EdgeMesh, FaceMesh, GlobalMesh};
use crate::mesh_error::MeshStitchError;

/// Outcome of one compaction pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompactionStats {
    /// Vertices kept.
    pub kept: usize,
    /// Orphan vertices removed.
    pub removed: usize,
}

/// Old → new vertex table; `None` marks a removed vertex.
pub fn orphan_renumbering(mesh: &GlobalMesh) -> Result<Vec<Option<u32>>, MeshStitchError> {
    let len = mesh.vertex_count();
    let mut referenced = vec![false; len];
    for (triangle, tri) in mesh.triangles().iter().enumerate() {
        for &vertex in tri {
            match referenced.get_mut(vertex as usize) {
                Some(flag) => *flag = true,
                None => {
                    return Err(MeshStitchError::TriangleIndexOutOfRange {
                        triangle,
                        vertex,
                        len,
                    });
                }
            }
        }
    }

    let mut next = 0u32;
    Ok(referenced
        .into_iter()
        .map(|used| {
            used.then(|| {
                let new = next;
                next += 1;
                new
            })
        })
        .collect())
}

/// Removes orphan vertices from `mesh` and renumbers every reference in
/// `faces` and `edges`.
pub fn compact(
    mesh: &mut GlobalMesh,
    faces: &mut [FaceMesh],
    edges: &mut [EdgeMesh],
) -> Result<CompactionStats, MeshStitchError> {
    let remap = orphan_renumbering(mesh)?;
    let kept = remap.iter().flatten().count();
    let removed = remap.len() - kept;
    if removed == 0 {
        return Ok(CompactionStats { kept, removed });
    }

    let mut triangles = Vec::with_capacity(mesh.triangle_count());
    for (triangle, tri) in mesh.triangles().iter().enumerate() {
        let mut out = [0u32; 3];
        for (dst, &vertex) in out.iter_mut().zip(tri) {
            *dst = remap[vertex as usize]
                .ok_or(MeshStitchError::DanglingTriangleReference { triangle, vertex })?;
        }
        triangles.push(out);
    }
    let vertices = mesh
        .vertices()
        .iter()
        .zip(&remap)
        .filter_map(|(&v, new)| new.map(|_| v))
        .collect();
    mesh.replace(vertices, triangles);
    mesh.debug_assert_invariants();

    for face in faces.iter_mut() {
        face.retain_remapped(&remap);
    }
    for edge in edges.iter_mut() {
        edge.retain_remapped(&remap);
    }

    log::debug!("compaction removed {removed} orphan vertices, kept {kept}");
    Ok(CompactionStats { kept, removed })
}
