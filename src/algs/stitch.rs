//! Model-level stitching driver.
//!
//! A run has two phases. [`gather`] walks the kernel on the calling thread:
//! it identifies every face and edge, fetches and validates tessellations and
//! overlays, and counts incident faces per edge. [`stitch_gathered`] then
//! assembles the global mesh, freezes and finalises the edges, removes
//! orphans and validates the result. Only the first phase touches the kernel.

use serde::{Deserialize, Serialize};

use crate::algs::assembly::{self, Assembly, EdgeUse, FaceInput};
use crate::algs::compact::compact;
use crate::algs::edge_merge::EdgeArena;
use crate::debug_invariants::DebugInvariants;
use crate::kernel::GeometryKernel;
use crate::kernel::tessellation::normalize_overlay;
use crate::mesh::{EdgeMesh, FaceMesh, GlobalMesh};
use crate::mesh_error::MeshStitchError;
use crate::options::StitchOptions;
use crate::topology::entity::{EdgeId, FaceId};
use crate::topology::identity::EntityIndex;

/// Counters for one stitched model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StitchReport {
    /// Distinct faces.
    pub faces: usize,
    /// Distinct edges.
    pub edges: usize,
    /// Faces without a usable tessellation.
    pub failed_faces: usize,
    /// `(face, edge)` pairs for which the kernel returned no overlay.
    pub absent_overlays: usize,
    /// Overlays rejected during normalisation.
    pub invalid_overlays: usize,
    /// Triangles dropped for collapsing onto fewer than three vertices.
    pub degenerate_triangles: usize,
    /// Local vertices bound to two different global vertices, welded
    /// after assembly.
    pub seam_conflicts: usize,
    /// Vertices removed by compaction.
    pub orphans_removed: usize,
}

/// Stitched output for one model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StitchedModel {
    pub mesh: GlobalMesh,
    /// Indexed by [`FaceId`].
    pub faces: Vec<FaceMesh>,
    /// Indexed by [`EdgeId`].
    pub edges: Vec<EdgeMesh>,
    pub report: StitchReport,
}

impl StitchedModel {
    pub fn face(&self, id: FaceId) -> Option<&FaceMesh> {
        self.faces.get(id.index())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&EdgeMesh> {
        self.edges.get(id.index())
    }
}

fn check_indices(entity: String, indices: &[u32], len: usize) -> Result<(), MeshStitchError> {
    match indices.iter().find(|&&v| v as usize >= len) {
        Some(&vertex) => Err(MeshStitchError::RecordIndexOutOfRange {
            entity,
            vertex,
            len,
        }),
        None => Ok(()),
    }
}

impl DebugInvariants for StitchedModel {
    fn validate_invariants(&self) -> Result<(), MeshStitchError> {
        self.mesh.validate_invariants()?;
        let vertices = self.mesh.vertex_count();
        let triangles = self.mesh.triangle_count();

        for (i, face) in self.faces.iter().enumerate() {
            let id = FaceId::new(i as u32);
            check_indices(id.to_string(), &face.vertex_indices, vertices)?;
            if !face.parameters.is_empty() && face.parameters.len() != face.vertex_indices.len() {
                return Err(MeshStitchError::RecordLengthMismatch {
                    entity: id.to_string(),
                    indices: face.vertex_indices.len(),
                    parameters: face.parameters.len(),
                });
            }
            if let Some(&t) = face.triangle_indices.iter().find(|&&t| t as usize >= triangles) {
                return Err(MeshStitchError::RecordIndexOutOfRange {
                    entity: format!("{id} triangles"),
                    vertex: t,
                    len: triangles,
                });
            }
        }

        for (i, edge) in self.edges.iter().enumerate() {
            let id = EdgeId::new(i as u32);
            check_indices(id.to_string(), &edge.vertex_indices, vertices)?;
            if edge.parameters.len() != edge.vertex_indices.len() {
                return Err(MeshStitchError::RecordLengthMismatch {
                    entity: id.to_string(),
                    indices: edge.vertex_indices.len(),
                    parameters: edge.parameters.len(),
                });
            }
            if let Some(position) = edge.parameters.windows(2).position(|w| w[0] >= w[1]) {
                return Err(MeshStitchError::EdgeStreamOrder {
                    edge: id,
                    position: position + 1,
                });
            }
        }
        Ok(())
    }
}

/// Kernel data for one model, detached from the kernel.
#[derive(Clone, Debug, Default)]
pub struct GatheredModel {
    /// One input per distinct face, in discovery order. Assembly accepts
    /// them in any order.
    pub faces: Vec<FaceInput>,
    /// Distinct incident faces per edge, indexed by [`EdgeId`].
    pub incident: Vec<u32>,
    pub report: StitchReport,
}

/// Walks `model` through `kernel` and collects everything assembly needs.
///
/// Edges get ids in the kernel's `edges(model)` order, then any edge first
/// met through `edges_of`. Duplicate face handles are skipped.
pub fn gather<K>(
    kernel: &K,
    model: &K::Model,
    options: &StitchOptions,
) -> Result<GatheredModel, MeshStitchError>
where
    K: GeometryKernel + ?Sized,
{
    let mut edge_ids: EntityIndex<K::Edge, EdgeId> = EntityIndex::new();
    let mut face_ids: EntityIndex<K::Face, FaceId> = EntityIndex::new();
    let same_edge = |a: &K::Edge, b: &K::Edge| kernel.is_same_edge(a, b);
    let same_face = |a: &K::Face, b: &K::Face| kernel.is_same_face(a, b);

    for edge in kernel.edges(model) {
        edge_ids.identify(&edge, kernel.edge_hash(&edge), same_edge)?;
    }

    let mut out = GatheredModel::default();
    for face in kernel.faces(model) {
        let id = face_ids.identify(&face, kernel.face_hash(&face), same_face)?;
        if id.index() < out.faces.len() {
            log::debug!("skipping duplicate handle for {id}");
            continue;
        }

        let tessellation = match kernel.tessellate(&face) {
            None => {
                log::warn!("{id}: kernel produced no tessellation");
                None
            }
            Some(t) => match t.validate() {
                Ok(()) => Some(t),
                Err(defect) => {
                    log::warn!("{id}: unusable tessellation: {defect}");
                    None
                }
            },
        };
        if tessellation.is_none() {
            out.report.failed_faces += 1;
        }

        let mut uses = Vec::new();
        for edge in kernel.edges_of(&face) {
            let edge_id = edge_ids.identify(&edge, kernel.edge_hash(&edge), same_edge)?;
            let overlay = match &tessellation {
                None => Vec::new(),
                Some(t) => {
                    let nodes = kernel.edge_overlay(&face, &edge);
                    if nodes.is_empty() {
                        log::debug!("{id}: no overlay on {edge_id}");
                        out.report.absent_overlays += 1;
                        Vec::new()
                    } else {
                        match normalize_overlay(nodes, t.vertex_count(), options.overlay_order) {
                            Ok(nodes) => nodes,
                            Err(defect) => {
                                log::warn!("{id}: rejected overlay on {edge_id}: {defect}");
                                out.report.invalid_overlays += 1;
                                Vec::new()
                            }
                        }
                    }
                }
            };
            uses.push(EdgeUse {
                edge: edge_id,
                overlay,
            });
        }
        out.faces.push(FaceInput::new(id, tessellation, uses));
    }

    out.incident = vec![0; edge_ids.len()];
    for input in &out.faces {
        for edge in &input.edges {
            out.incident[edge.index()] += 1;
        }
    }
    out.report.faces = out.faces.len();
    out.report.edges = edge_ids.len();
    Ok(out)
}

/// Assembles, finalises, compacts and validates a gathered model.
pub fn stitch_gathered(
    gathered: GatheredModel,
    options: &StitchOptions,
) -> Result<StitchedModel, MeshStitchError> {
    let mut arena = EdgeArena::new(&gathered.incident);
    let assembled = assembly::assemble(&gathered.faces, &mut arena, options)?;
    finish(assembled, arena, gathered.report, options)
}

/// [`stitch_gathered`] with faces assembled in parallel. The result matches
/// the serial one up to vertex and triangle numbering.
#[cfg(feature = "rayon")]
pub fn stitch_gathered_parallel(
    gathered: GatheredModel,
    options: &StitchOptions,
) -> Result<StitchedModel, MeshStitchError> {
    let arena = EdgeArena::new(&gathered.incident);
    let (assembled, arena) = assembly::assemble_parallel(&gathered.faces, arena, options)?;
    finish(assembled, arena, gathered.report, options)
}

fn finish(
    mut assembled: Assembly,
    mut arena: EdgeArena,
    mut report: StitchReport,
    options: &StitchOptions,
) -> Result<StitchedModel, MeshStitchError> {
    arena.freeze_all()?;
    let mut edges = arena.edge_meshes()?;
    assembled.weld_aliases(&mut edges);
    let Assembly {
        mut mesh,
        mut faces,
        stats,
        ..
    } = assembled;
    report.degenerate_triangles = stats.degenerate_triangles;
    report.seam_conflicts = stats.seam_conflicts;

    if options.remove_orphans {
        report.orphans_removed = compact(&mut mesh, &mut faces, &mut edges)?.removed;
    }

    let model = StitchedModel {
        mesh,
        faces,
        edges,
        report,
    };
    if options.check_invariants {
        model.validate_invariants()?;
    }
    log::debug!(
        "stitched {} faces, {} edges into {} vertices, {} triangles ({} failed faces, {} degenerate triangles, {} orphans removed)",
        report.faces,
        report.edges,
        model.mesh.vertex_count(),
        model.mesh.triangle_count(),
        report.failed_faces,
        report.degenerate_triangles,
        report.orphans_removed,
    );
    Ok(model)
}

/// Stitches one model into a single welded mesh.
pub fn stitch_model<K>(
    kernel: &K,
    model: &K::Model,
    options: &StitchOptions,
) -> Result<StitchedModel, MeshStitchError>
where
    K: GeometryKernel + ?Sized,
{
    stitch_gathered(gather(kernel, model, options)?, options)
}

/// [`stitch_model`] with parallel assembly. Kernel access stays on the
/// calling thread.
#[cfg(feature = "rayon")]
pub fn stitch_model_parallel<K>(
    kernel: &K,
    model: &K::Model,
    options: &StitchOptions,
) -> Result<StitchedModel, MeshStitchError>
where
    K: GeometryKernel + ?Sized,
{
    stitch_gathered_parallel(gather(kernel, model, options)?, options)
}

/// Stitches each model independently. A fatal error in one model is logged
/// and returned in its slot; the others still run.
pub fn stitch_batch<'m, K, I>(
    kernel: &K,
    models: I,
    options: &StitchOptions,
) -> Vec<Result<StitchedModel, MeshStitchError>>
where
    K: GeometryKernel + ?Sized,
    K::Model: 'm,
    I: IntoIterator<Item = &'m K::Model>,
{
    models
        .into_iter()
        .enumerate()
        .map(|(i, model)| {
            let result = stitch_model(kernel, model, options);
            if let Err(e) = &result {
                log::warn!("model {i} failed to stitch: {e}");
            }
            result
        })
        .collect()
}
