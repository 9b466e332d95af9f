//! Per-entity result records.
//!
//! Each topological face and edge gets one record listing the global
//! vertices (and, for faces, triangles) that belong to it. Records are
//! indexed by [`FaceId`](crate::topology::FaceId) /
//! [`EdgeId`](crate::topology::EdgeId) in the stitched model and stay valid
//! against the compacted [`GlobalMesh`](super::GlobalMesh).

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Global mesh subset owned by one face.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceMesh {
    /// Global vertex per local tessellation vertex, in local order.
    /// Local vertices removed by compaction are dropped.
    pub vertex_indices: Vec<u32>,
    /// Surface `(u, v)` per entry of `vertex_indices`; empty when the kernel
    /// supplied none.
    pub parameters: Vec<DVec2>,
    /// Global triangles contributed by this face.
    pub triangle_indices: Vec<u32>,
}

impl FaceMesh {
    /// `true` for faces whose tessellation failed or contributed nothing.
    pub fn is_empty(&self) -> bool {
        self.vertex_indices.is_empty() && self.triangle_indices.is_empty()
    }

    /// Keeps only entries whose vertex survives `remap`, renumbering them.
    pub(crate) fn retain_remapped(&mut self, remap: &[Option<u32>]) {
        let keep_params = self.parameters.len() == self.vertex_indices.len();
        let mut params = std::mem::take(&mut self.parameters).into_iter();
        let mut indices = Vec::with_capacity(self.vertex_indices.len());
        let mut kept_params = Vec::with_capacity(if keep_params { indices.capacity() } else { 0 });
        for &old in &self.vertex_indices {
            let param = if keep_params { params.next() } else { None };
            if let Some(new) = remap.get(old as usize).copied().flatten() {
                indices.push(new);
                kept_params.extend(param);
            }
        }
        self.vertex_indices = indices;
        self.parameters = kept_params;
    }
}

/// Global mesh vertices along one edge, in curve-parameter order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeMesh {
    pub vertex_indices: Vec<u32>,
    /// Strictly increasing curve parameters, parallel to `vertex_indices`.
    pub parameters: Vec<f64>,
}

impl EdgeMesh {
    pub fn len(&self) -> usize {
        self.vertex_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_indices.is_empty()
    }

    /// Iterates `(global_vertex, parameter)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.vertex_indices
            .iter()
            .copied()
            .zip(self.parameters.iter().copied())
    }

    pub(crate) fn retain_remapped(&mut self, remap: &[Option<u32>]) {
        let (indices, parameters): (Vec<u32>, Vec<f64>) = self
            .iter()
            .filter_map(|(old, t)| remap.get(old as usize).copied().flatten().map(|new| (new, t)))
            .unzip();
        self.vertex_indices = indices;
        self.parameters = parameters;
    }
}
