//! Edge overlay merge engine.
//!
//! Every edge owns one canonical vertex stream, sorted by curve parameter.
//! Each incident face contributes its overlay (the local tessellation
//! vertices it places on the edge) and the two are merged by parameter:
//!
//! - a parameter already in the stream binds the face's local vertex to that
//!   entry, so both faces end up sharing one global vertex;
//! - a parameter new to the stream is inserted, pending on the face's local
//!   vertex until the face mints its global vertices.
//!
//! The stream never loses entries, and because the merge key is the
//! parameter its content does not depend on the order faces arrive in.
//! Pending entries belong to exactly one face at a time; that face must
//! [`resolve`](EdgeRecord::resolve) them before any other face touches the
//! edge.
//!
//! ```text
//!  Unseen ──merge──▶ PartiallyResolved ──last incident face──▶ Frozen
//! ```

use std::cmp::Ordering;

use itertools::{EitherOrBoth, Itertools};

use crate::kernel::tessellation::OverlayNode;
use crate::mesh::EdgeMesh;
use crate::mesh_error::MeshStitchError;
use crate::topology::entity::{EdgeId, FaceId};

/// Lifecycle of an edge stream.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EdgeState {
    /// No incident face processed yet.
    #[default]
    Unseen,
    /// At least one face merged; more may follow.
    PartiallyResolved,
    /// All incident faces processed; read-only.
    Frozen,
}

/// Index held by a stream entry, or bound to a face-local vertex.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeSlot {
    /// Global mesh vertex.
    Resolved(u32),
    /// Local vertex of the face currently being assembled.
    Pending(u32),
}

/// One canonical stream entry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeEntry {
    pub parameter: f64,
    pub slot: EdgeSlot,
}

/// Canonical stream and bookkeeping for one edge.
#[derive(Clone, Debug)]
pub struct EdgeRecord {
    id: EdgeId,
    state: EdgeState,
    stream: Vec<EdgeEntry>,
    /// Face whose local indices are pending in `stream`.
    pending_owner: Option<FaceId>,
    /// Incident faces not yet processed.
    remaining_faces: u32,
}

fn cmp_parameter(a: f64, b: f64) -> Ordering {
    // Overlays are checked for finite parameters before they get here.
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

impl EdgeRecord {
    /// Fresh record expecting `incident_faces` contributions.
    pub fn new(id: EdgeId, incident_faces: u32) -> Self {
        Self {
            id,
            state: EdgeState::Unseen,
            stream: Vec::new(),
            pending_owner: None,
            remaining_faces: incident_faces,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn state(&self) -> EdgeState {
        self.state
    }

    pub fn stream(&self) -> &[EdgeEntry] {
        &self.stream
    }

    pub fn remaining_faces(&self) -> u32 {
        self.remaining_faces
    }

    /// Merges `face`'s overlay (ascending by parameter) into the stream.
    ///
    /// Returns, for every overlay node matched to an existing entry (or to an
    /// earlier node of the same overlay at an equal parameter), the node's
    /// local index and the slot it is bound to. Nodes inserted as new entries
    /// are not returned; they are pending on themselves.
    pub fn merge(
        &mut self,
        face: FaceId,
        overlay: &[OverlayNode],
    ) -> Result<Vec<(u32, EdgeSlot)>, MeshStitchError> {
        match self.state {
            EdgeState::Frozen => {
                return Err(MeshStitchError::EdgeFrozen {
                    edge: self.id,
                    face,
                });
            }
            EdgeState::Unseen | EdgeState::PartiallyResolved => {}
        }
        if let Some(owner) = self.pending_owner {
            if owner != face {
                return Err(MeshStitchError::ForeignPendingVertex {
                    edge: self.id,
                    owner,
                    face,
                });
            }
        }

        let canonical = std::mem::take(&mut self.stream);
        let mut merged: Vec<EdgeEntry> = Vec::with_capacity(canonical.len() + overlay.len());
        let mut bindings = Vec::new();
        let mut inserted = false;

        for item in canonical
            .into_iter()
            .merge_join_by(overlay.iter().copied(), |entry, node| {
                cmp_parameter(entry.parameter, node.parameter)
            })
        {
            match item {
                EitherOrBoth::Left(entry) => merged.push(entry),
                EitherOrBoth::Both(entry, node) => {
                    bindings.push((node.local, entry.slot));
                    merged.push(entry);
                }
                EitherOrBoth::Right(node) => match merged.last() {
                    Some(last) if last.parameter == node.parameter => {
                        bindings.push((node.local, last.slot));
                    }
                    _ => {
                        merged.push(EdgeEntry {
                            parameter: node.parameter,
                            slot: EdgeSlot::Pending(node.local),
                        });
                        inserted = true;
                    }
                },
            }
        }

        self.stream = merged;
        if inserted {
            self.pending_owner = Some(face);
        }
        if !overlay.is_empty() {
            self.state = EdgeState::PartiallyResolved;
        }
        Ok(bindings)
    }

    /// Back-patches every pending entry with the global index `resolve`
    /// assigns to its local vertex.
    pub fn resolve<F>(&mut self, face: FaceId, resolve: F) -> Result<(), MeshStitchError>
    where
        F: Fn(u32) -> Option<u32>,
    {
        for entry in &mut self.stream {
            if let EdgeSlot::Pending(local) = entry.slot {
                let global = resolve(local)
                    .ok_or(MeshStitchError::UnassignedLocalVertex { face, local })?;
                entry.slot = EdgeSlot::Resolved(global);
            }
        }
        self.pending_owner = None;
        Ok(())
    }

    /// Marks one incident face as processed; freezes the edge after the last.
    pub fn finish_face(&mut self) -> Result<(), MeshStitchError> {
        self.remaining_faces = self.remaining_faces.saturating_sub(1);
        if self.remaining_faces == 0 {
            self.freeze()?;
        }
        Ok(())
    }

    /// Freezes the stream. Any entry still pending is fatal.
    pub fn freeze(&mut self) -> Result<(), MeshStitchError> {
        if self.state == EdgeState::Frozen {
            return Ok(());
        }
        if let Some(entry) = self
            .stream
            .iter()
            .find(|e| matches!(e.slot, EdgeSlot::Pending(_)))
        {
            return Err(MeshStitchError::UnresolvedEdgeVertex {
                edge: self.id,
                parameter: entry.parameter,
            });
        }
        self.state = EdgeState::Frozen;
        Ok(())
    }

    /// Finished stream as a result record. The edge must be frozen.
    pub fn to_edge_mesh(&self) -> Result<EdgeMesh, MeshStitchError> {
        let mut mesh = EdgeMesh {
            vertex_indices: Vec::with_capacity(self.stream.len()),
            parameters: Vec::with_capacity(self.stream.len()),
        };
        for entry in &self.stream {
            match entry.slot {
                EdgeSlot::Resolved(global) => {
                    mesh.vertex_indices.push(global);
                    mesh.parameters.push(entry.parameter);
                }
                EdgeSlot::Pending(_) => {
                    return Err(MeshStitchError::UnresolvedEdgeVertex {
                        edge: self.id,
                        parameter: entry.parameter,
                    });
                }
            }
        }
        Ok(mesh)
    }
}

/// Arena of edge records indexed by [`EdgeId`].
#[derive(Clone, Debug, Default)]
pub struct EdgeArena {
    records: Vec<EdgeRecord>,
}

impl EdgeArena {
    /// One record per edge; `incident_faces[i]` is the number of distinct
    /// faces bounded by edge `i`.
    pub fn new(incident_faces: &[u32]) -> Self {
        Self {
            records: incident_faces
                .iter()
                .enumerate()
                .map(|(i, &n)| EdgeRecord::new(EdgeId::new(i as u32), n))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: EdgeId) -> Option<&EdgeRecord> {
        self.records.get(id.index())
    }

    pub fn get_mut(&mut self, id: EdgeId) -> Option<&mut EdgeRecord> {
        self.records.get_mut(id.index())
    }

    /// Mutable access to several distinct records at once.
    ///
    /// `ids` must be strictly ascending; ids outside the arena are skipped.
    pub fn select_mut(&mut self, ids: &[EdgeId]) -> Vec<&mut EdgeRecord> {
        debug_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        let mut wanted = ids.iter().peekable();
        let mut out = Vec::with_capacity(ids.len());
        for (i, record) in self.records.iter_mut().enumerate() {
            if wanted.peek().is_none() {
                break;
            }
            if wanted.next_if(|id| id.index() == i).is_some() {
                out.push(record);
            }
        }
        out
    }

    /// Freezes every record not yet frozen (edges whose faces all failed, or
    /// edges reached by no face at all).
    pub fn freeze_all(&mut self) -> Result<(), MeshStitchError> {
        self.records.iter_mut().try_for_each(EdgeRecord::freeze)
    }

    /// Result records in [`EdgeId`] order.
    pub fn edge_meshes(&self) -> Result<Vec<EdgeMesh>, MeshStitchError> {
        self.records.iter().map(EdgeRecord::to_edge_mesh).collect()
    }

    /// Rebuilds an arena from records in [`EdgeId`] order.
    pub fn from_records(records: Vec<EdgeRecord>) -> Self {
        Self { records }
    }

    /// Releases the records, e.g. to wrap each in a lock.
    pub fn into_records(self) -> Vec<EdgeRecord> {
        self.records
    }
}
