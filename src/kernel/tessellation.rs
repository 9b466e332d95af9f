//! Per-face tessellation data and edge overlays as delivered by a kernel.
//!
//! Both are checked here before they reach the assembler. A defect in either
//! is recoverable: a defective tessellation drops the face, a defective
//! overlay is treated as absent. The defect enums exist so the caller can log
//! and count what happened.

use glam::{DAffine3, DVec2, DVec3};
use thiserror::Error;

use crate::options::OverlayOrder;
use crate::topology::orientation::FaceOrientation;

/// One face's triangulated patch with indices local to the face.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceTessellation {
    /// Local vertex positions, in the face's own frame.
    pub points: Vec<DVec3>,
    /// Surface parameters `(u, v)` per local vertex. Empty if the kernel
    /// does not provide them.
    pub uv: Vec<DVec2>,
    /// Local triangles.
    pub triangles: Vec<[u32; 3]>,
    /// Winding of `triangles` relative to the outward normal.
    pub orientation: FaceOrientation,
    /// Local frame → model frame.
    pub placement: DAffine3,
}

/// Why a tessellation was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TessellationDefect {
    #[error("tessellation has no vertices")]
    NoVertices,
    #[error("tessellation has no triangles")]
    NoTriangles,
    #[error("triangle {triangle} references local vertex {index} (only {len} vertices)")]
    TriangleIndexOutOfRange {
        triangle: usize,
        index: u32,
        len: usize,
    },
    #[error("{uv} surface parameters for {points} vertices")]
    ParameterCountMismatch { uv: usize, points: usize },
    #[error("local vertex {0} is not finite")]
    NonFiniteVertex(usize),
}

impl FaceTessellation {
    /// Tessellation in the model frame with forward orientation.
    pub fn new(points: Vec<DVec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            points,
            uv: Vec::new(),
            triangles,
            orientation: FaceOrientation::Forward,
            placement: DAffine3::IDENTITY,
        }
    }

    /// Sets surface parameters.
    pub fn with_uv(mut self, uv: Vec<DVec2>) -> Self {
        self.uv = uv;
        self
    }

    /// Sets the orientation flag.
    pub fn with_orientation(mut self, orientation: FaceOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the placement transform.
    pub fn with_placement(mut self, placement: DAffine3) -> Self {
        self.placement = placement;
        self
    }

    /// Number of local vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Local point `local` mapped into the model frame.
    #[inline]
    pub fn placed_point(&self, local: usize) -> DVec3 {
        self.placement.transform_point3(self.points[local])
    }

    /// Structural checks; the assembler only sees tessellations that pass.
    pub fn validate(&self) -> Result<(), TessellationDefect> {
        let len = self.points.len();
        if len == 0 {
            return Err(TessellationDefect::NoVertices);
        }
        if self.triangles.is_empty() {
            return Err(TessellationDefect::NoTriangles);
        }
        if !self.uv.is_empty() && self.uv.len() != len {
            return Err(TessellationDefect::ParameterCountMismatch {
                uv: self.uv.len(),
                points: len,
            });
        }
        if let Some(i) = self.points.iter().position(|p| !p.is_finite()) {
            return Err(TessellationDefect::NonFiniteVertex(i));
        }
        for (triangle, tri) in self.triangles.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= len) {
                return Err(TessellationDefect::TriangleIndexOutOfRange {
                    triangle,
                    index,
                    len,
                });
            }
        }
        Ok(())
    }
}

/// A face-local vertex lying on an edge, at `parameter` along the edge curve.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayNode {
    pub local: u32,
    pub parameter: f64,
}

impl OverlayNode {
    pub fn new(local: u32, parameter: f64) -> Self {
        Self { local, parameter }
    }
}

/// Why an overlay was discarded.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OverlayDefect {
    #[error("overlay node {position} has non-finite parameter")]
    NonFiniteParameter { position: usize },
    #[error("overlay node {position} references local vertex {local} (only {len} vertices)")]
    LocalIndexOutOfRange {
        position: usize,
        local: u32,
        len: usize,
    },
    #[error("overlay not ascending in parameter at node {position}")]
    NotAscending { position: usize },
}

/// Checks an overlay against the face's vertex count and brings it into
/// ascending parameter order according to `order`.
///
/// Ties keep their kernel order.
pub fn normalize_overlay(
    mut nodes: Vec<OverlayNode>,
    vertex_count: usize,
    order: OverlayOrder,
) -> Result<Vec<OverlayNode>, OverlayDefect> {
    for (position, node) in nodes.iter().enumerate() {
        if !node.parameter.is_finite() {
            return Err(OverlayDefect::NonFiniteParameter { position });
        }
        if node.local as usize >= vertex_count {
            return Err(OverlayDefect::LocalIndexOutOfRange {
                position,
                local: node.local,
                len: vertex_count,
            });
        }
    }
    match order {
        OverlayOrder::SortByParameter => {
            nodes.sort_by(|a, b| a.parameter.total_cmp(&b.parameter));
        }
        OverlayOrder::Trust => {
            if let Some(position) = nodes
                .windows(2)
                .position(|w| w[1].parameter < w[0].parameter)
            {
                return Err(OverlayDefect::NotAscending {
                    position: position + 1,
                });
            }
        }
    }
    Ok(nodes)
}
