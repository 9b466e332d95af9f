#![cfg_attr(docsrs, feature(doc_cfg))]
//! # brep-stitch
//!
//! brep-stitch turns the per-face tessellations of a boundary-representation
//! solid into one watertight triangle mesh. Faces that share a topological
//! edge share the vertices along it, so the result has no cracks or
//! duplicated seam vertices.
//!
//! ## Features
//! - Entity identity over kernel handles (hash bucket + exact predicate)
//! - Two-pointer merge of per-face edge overlays into one stream per edge
//! - Global mesh assembly with placement, orientation and degenerate-triangle
//!   rejection
//! - Orphan vertex compaction with consistent renumbering of all records
//! - Optional parallel assembly (`rayon` feature)
//!
//! ## Usage
//!
//! ```rust
//! use brep_stitch::prelude::*;
//! use glam::DVec3;
//!
//! let mut kernel = InMemoryKernel::new();
//! let model = kernel.add_model();
//! let face = kernel.add_face(
//!     model,
//!     Some(FaceTessellation::new(
//!         vec![DVec3::ZERO, DVec3::X, DVec3::Y],
//!         vec![[0, 1, 2]],
//!     )),
//! );
//! let edge = kernel.add_edge(model);
//! kernel.link_edge(model, face, edge, vec![OverlayNode::new(0, 0.0), OverlayNode::new(1, 1.0)]);
//!
//! let stitched = stitch_model(&kernel, &model, &StitchOptions::default()).unwrap();
//! assert_eq!(stitched.mesh.vertex_count(), 3);
//! assert_eq!(stitched.edges[0].vertex_indices, vec![0, 1]);
//! ```
//!
//! ## Determinism
//!
//! Serial stitching is deterministic: vertices are numbered in discovery
//! order and triangles in acceptance order. Different face orders produce
//! the same mesh up to renumbering.

pub mod algs;
pub mod debug_invariants;
pub mod kernel;
pub mod mesh;
pub mod mesh_error;
pub mod options;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::compact::{CompactionStats, compact};
    pub use crate::algs::stitch::{
        GatheredModel, StitchReport, StitchedModel, gather, stitch_batch, stitch_gathered,
        stitch_model,
    };
    #[cfg(feature = "rayon")]
    pub use crate::algs::stitch::{stitch_gathered_parallel, stitch_model_parallel};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::kernel::{
        FaceTessellation, GeometryKernel, InMemoryKernel, ModelKey, OverlayNode,
    };
    pub use crate::mesh::{EdgeMesh, FaceMesh, GlobalMesh};
    pub use crate::mesh_error::MeshStitchError;
    pub use crate::options::{DegenerateHandling, OverlayOrder, StitchOptions};
    pub use crate::topology::{EdgeId, EntityIndex, FaceId, FaceOrientation};
}
