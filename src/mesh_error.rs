//! MeshStitchError: Unified error type for brep-stitch public APIs
//!
//! Only internal-consistency failures are errors. Recoverable kernel
//! degradations (missing tessellations, absent overlays, degenerate
//! triangles) are logged and counted in the [`StitchReport`] instead.
//!
//! [`StitchReport`]: crate::algs::stitch::StitchReport

use thiserror::Error;

use crate::topology::entity::{EdgeId, FaceId};

/// Unified error type for mesh stitching operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshStitchError {
    /// An edge stream still holds a pending local index when it is frozen.
    #[error("edge {edge}: vertex at parameter {parameter} was never assigned a global index")]
    UnresolvedEdgeVertex { edge: EdgeId, parameter: f64 },
    /// A face tried to merge its overlay into an edge that was already frozen.
    #[error("edge {edge} is frozen; face {face} cannot contribute to it")]
    EdgeFrozen { edge: EdgeId, face: FaceId },
    /// A face reached an edge that still holds another face's pending entries.
    #[error("edge {edge}: face {face} arrived while face {owner} still has pending vertices")]
    ForeignPendingVertex {
        edge: EdgeId,
        owner: FaceId,
        face: FaceId,
    },
    /// A face refers to an edge the edge arena does not hold.
    #[error("face {face} refers to unknown edge {edge}")]
    UnknownEdge { edge: EdgeId, face: FaceId },
    /// An overlay names a local vertex outside the face tessellation.
    #[error("face {face}, edge {edge}: overlay vertex {local} out of range ({len} vertices)")]
    OverlayIndexOutOfRange {
        face: FaceId,
        edge: EdgeId,
        local: u32,
        len: usize,
    },
    /// A local index could not be resolved while remapping a face.
    #[error("face {face}: local vertex {local} has no global index after minting")]
    UnassignedLocalVertex { face: FaceId, local: u32 },
    /// A triangle references a vertex removed by compaction.
    #[error("triangle {triangle} references removed vertex {vertex}")]
    DanglingTriangleReference { triangle: usize, vertex: u32 },
    /// A triangle references a vertex index past the end of the vertex array.
    #[error("triangle {triangle} references vertex {vertex}, but mesh has {len} vertices")]
    TriangleIndexOutOfRange {
        triangle: usize,
        vertex: u32,
        len: usize,
    },
    /// A triangle repeats a vertex index.
    #[error("triangle {triangle} is degenerate: {indices:?}")]
    DegenerateTriangle { triangle: usize, indices: [u32; 3] },
    /// An edge stream is not strictly increasing in parameter.
    #[error("edge {edge}: parameters not strictly increasing at position {position}")]
    EdgeStreamOrder { edge: EdgeId, position: usize },
    /// A face or edge record has index and parameter arrays of different lengths.
    #[error("{entity}: {indices} vertex indices but {parameters} parameters")]
    RecordLengthMismatch {
        entity: String,
        indices: usize,
        parameters: usize,
    },
    /// A face or edge record references a vertex past the end of the vertex array.
    #[error("{entity}: vertex {vertex} out of range ({len} vertices)")]
    RecordIndexOutOfRange {
        entity: String,
        vertex: u32,
        len: usize,
    },
    /// The global mesh outgrew the 32-bit index space.
    #[error("global mesh exceeds u32 index space ({0} entries)")]
    IndexOverflow(usize),
}
