//! InMemoryKernel: deterministic kernel double built from plain data.
//!
//! Holds any number of models. Every face/edge handle returned carries a
//! fresh serial number, so the stitcher sees distinct handle objects for one
//! logical entity exactly as it would with a real kernel. Hashes can be
//! folded with [`InMemoryKernel::with_hash_modulus`] to force bucket
//! collisions.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::kernel::GeometryKernel;
use crate::kernel::tessellation::{FaceTessellation, OverlayNode};

/// Handle to a model stored in an [`InMemoryKernel`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelKey(usize);

/// Face handle.
#[derive(Clone, Debug)]
pub struct MemoryFace {
    model: usize,
    face: usize,
    serial: u32,
}

impl MemoryFace {
    /// Index of the face inside its model.
    pub fn face_index(&self) -> usize {
        self.face
    }

    /// Per-handle serial number; differs between handles of one face.
    pub fn serial(&self) -> u32 {
        self.serial
    }
}

/// Edge handle.
#[derive(Clone, Debug)]
pub struct MemoryEdge {
    model: usize,
    edge: usize,
    /// Position in the owning face's wire when reached through
    /// [`GeometryKernel::edges_of`]; selects one side of a seam.
    occurrence: Option<usize>,
    serial: u32,
}

impl MemoryEdge {
    /// Index of the edge inside its model.
    pub fn edge_index(&self) -> usize {
        self.edge
    }

    pub fn serial(&self) -> u32 {
        self.serial
    }
}

#[derive(Clone, Debug, Default)]
struct StoredFace {
    tessellation: Option<FaceTessellation>,
    /// Bounding edges with this face's overlay on each, in wire order.
    edges: Vec<(usize, Vec<OverlayNode>)>,
}

#[derive(Clone, Debug, Default)]
struct StoredModel {
    faces: Vec<StoredFace>,
    edge_count: usize,
}

/// Plain-data kernel implementation.
#[derive(Debug, Default)]
pub struct InMemoryKernel {
    models: Vec<StoredModel>,
    hash_modulus: Option<u64>,
    next_serial: AtomicU32,
}

impl InMemoryKernel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduces every hash modulo `modulus`, so distinct entities share
    /// buckets.
    pub fn with_hash_modulus(mut self, modulus: u64) -> Self {
        self.hash_modulus = Some(modulus.max(1));
        self
    }

    /// Adds an empty model.
    pub fn add_model(&mut self) -> ModelKey {
        self.models.push(StoredModel::default());
        ModelKey(self.models.len() - 1)
    }

    /// Adds an edge to `model` and returns its index.
    pub fn add_edge(&mut self, model: ModelKey) -> usize {
        let m = &mut self.models[model.0];
        m.edge_count += 1;
        m.edge_count - 1
    }

    /// Adds a face with the given tessellation (or none) and returns its index.
    pub fn add_face(&mut self, model: ModelKey, tessellation: Option<FaceTessellation>) -> usize {
        let m = &mut self.models[model.0];
        m.faces.push(StoredFace {
            tessellation,
            edges: Vec::new(),
        });
        m.faces.len() - 1
    }

    /// Appends `edge` to `face`'s boundary with the face's overlay on it.
    /// Linking the same edge twice models a seam.
    pub fn link_edge(
        &mut self,
        model: ModelKey,
        face: usize,
        edge: usize,
        overlay: Vec<OverlayNode>,
    ) {
        self.models[model.0].faces[face].edges.push((edge, overlay));
    }

    fn serial(&self) -> u32 {
        self.next_serial.fetch_add(1, Ordering::Relaxed)
    }

    fn fold(&self, hash: u64) -> u64 {
        match self.hash_modulus {
            Some(m) => hash % m,
            None => hash,
        }
    }

    fn face_handle(&self, model: usize, face: usize) -> MemoryFace {
        MemoryFace {
            model,
            face,
            serial: self.serial(),
        }
    }

    fn edge_handle(&self, model: usize, edge: usize, occurrence: Option<usize>) -> MemoryEdge {
        MemoryEdge {
            model,
            edge,
            occurrence,
            serial: self.serial(),
        }
    }

    fn stored_face(&self, face: &MemoryFace) -> Option<&StoredFace> {
        self.models.get(face.model)?.faces.get(face.face)
    }
}

impl GeometryKernel for InMemoryKernel {
    type Model = ModelKey;
    type Face = MemoryFace;
    type Edge = MemoryEdge;

    fn faces(&self, model: &ModelKey) -> Vec<MemoryFace> {
        let count = self.models.get(model.0).map_or(0, |m| m.faces.len());
        (0..count).map(|f| self.face_handle(model.0, f)).collect()
    }

    fn edges(&self, model: &ModelKey) -> Vec<MemoryEdge> {
        let count = self.models.get(model.0).map_or(0, |m| m.edge_count);
        (0..count)
            .map(|e| self.edge_handle(model.0, e, None))
            .collect()
    }

    fn edges_of(&self, face: &MemoryFace) -> Vec<MemoryEdge> {
        self.stored_face(face)
            .map(|f| {
                f.edges
                    .iter()
                    .enumerate()
                    .map(|(pos, (e, _))| self.edge_handle(face.model, *e, Some(pos)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn tessellate(&self, face: &MemoryFace) -> Option<FaceTessellation> {
        self.stored_face(face)?.tessellation.clone()
    }

    fn edge_overlay(&self, face: &MemoryFace, edge: &MemoryEdge) -> Vec<OverlayNode> {
        let Some(stored) = self.stored_face(face) else {
            return Vec::new();
        };
        if let Some((e, nodes)) = edge.occurrence.and_then(|pos| stored.edges.get(pos)) {
            if *e == edge.edge {
                return nodes.clone();
            }
        }
        // Handle not tied to a wire position: report every side of the edge.
        stored
            .edges
            .iter()
            .filter(|(e, _)| *e == edge.edge)
            .flat_map(|(_, nodes)| nodes.iter().copied())
            .collect()
    }

    fn face_hash(&self, face: &MemoryFace) -> u64 {
        self.fold(((face.model as u64) << 32) ^ face.face as u64)
    }

    fn edge_hash(&self, edge: &MemoryEdge) -> u64 {
        self.fold(((edge.model as u64) << 32) ^ edge.edge as u64)
    }

    fn is_same_face(&self, a: &MemoryFace, b: &MemoryFace) -> bool {
        a.model == b.model && a.face == b.face
    }

    fn is_same_edge(&self, a: &MemoryEdge, b: &MemoryEdge) -> bool {
        a.model == b.model && a.edge == b.edge
    }
}
