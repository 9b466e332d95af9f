//! Geometry kernel collaborator: the only source of topology and
//! tessellation data.
//!
//! The stitcher never talks to a concrete CAD kernel. It consumes this trait,
//! which exposes exactly what the welding algorithm needs: face/edge
//! enumeration, per-face tessellation, per-(face, edge) overlays, and the
//! hash + exact-identity pair used by the
//! [`EntityIndex`](crate::topology::EntityIndex).
//!
//! All calls are synchronous. The stitcher calls the kernel from one thread
//! only, so implementations need not be `Sync`.

pub mod memory;
pub mod tessellation;

pub use memory::{InMemoryKernel, MemoryEdge, MemoryFace, ModelKey};
pub use tessellation::{
    FaceTessellation, OverlayDefect, OverlayNode, TessellationDefect, normalize_overlay,
};

/// Read-only access to a B-rep model held by a geometry kernel.
pub trait GeometryKernel {
    /// Whole-solid handle.
    type Model: ?Sized;
    /// Face handle. Two handles may denote the same face.
    type Face: Clone;
    /// Edge handle. Two handles may denote the same edge.
    type Edge: Clone;

    /// All faces of `model`.
    fn faces(&self, model: &Self::Model) -> Vec<Self::Face>;

    /// All edges of `model`.
    fn edges(&self, model: &Self::Model) -> Vec<Self::Edge>;

    /// Edges bounding `face`, in wire order. A seam edge appears twice.
    fn edges_of(&self, face: &Self::Face) -> Vec<Self::Edge>;

    /// Triangulated patch of `face`, or `None` if the kernel cannot produce
    /// one (degenerate or invalid face).
    fn tessellate(&self, face: &Self::Face) -> Option<FaceTessellation>;

    /// Local vertices of `face`'s tessellation lying on `edge`, with their
    /// edge-curve parameters. Empty if the kernel cannot correlate the two.
    fn edge_overlay(&self, face: &Self::Face, edge: &Self::Edge) -> Vec<OverlayNode>;

    /// Bucket hash of a face. Equal for handles of one face.
    fn face_hash(&self, face: &Self::Face) -> u64;

    /// Bucket hash of an edge. Equal for handles of one edge.
    fn edge_hash(&self, edge: &Self::Edge) -> u64;

    /// Exact identity of two face handles.
    fn is_same_face(&self, a: &Self::Face, b: &Self::Face) -> bool;

    /// Exact identity of two edge handles.
    fn is_same_edge(&self, a: &Self::Edge, b: &Self::Edge) -> bool;
}
