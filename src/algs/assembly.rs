//! Global mesh assembly.
//!
//! Faces are welded one at a time. For each face the assembler
//!
//! 1. merges every bounding edge's overlay into that edge's stream, binding
//!    local vertices to global vertices already known on the edge;
//! 2. mints a global vertex (placed into the model frame) for every local
//!    vertex still unbound, and back-patches the edge streams;
//! 3. remaps and orients the local triangles, dropping any whose corners
//!    collapse onto fewer than three global vertices.
//!
//! Local vertices can be bound to each other as well as to global vertices:
//! a seam edge visited twice by one face ties the two copies of each seam
//! vertex together before either has a global index. [`LocalMap`] tracks
//! these ties as a union-find whose roots carry the global index.
//!
//! Two faces that meet only at a topological vertex can each mint that
//! vertex before any face joins them. A later face bound to both copies
//! records them as aliases; [`Assembly::weld_aliases`] folds every alias
//! class into its smallest index once all faces are in.
//!
//! Face order does not matter for the result up to renumbering. With the
//! `rayon` feature, [`assemble_parallel`] runs faces concurrently: each face
//! locks its edges in ascending [`EdgeId`] order for its whole assembly, so
//! faces sharing an edge serialize and all others run in parallel.

use glam::DVec3;

use crate::algs::edge_merge::{EdgeArena, EdgeRecord, EdgeSlot};
use crate::kernel::tessellation::{FaceTessellation, OverlayNode};
use crate::mesh::{EdgeMesh, FaceMesh, GlobalMesh};
use crate::mesh_error::MeshStitchError;
use crate::options::{DegenerateHandling, StitchOptions};
use crate::topology::entity::{EdgeId, FaceId};

/// One bounding-edge occurrence of a face with the face's overlay on it.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeUse {
    pub edge: EdgeId,
    /// Normalised overlay; empty when absent or rejected.
    pub overlay: Vec<OverlayNode>,
}

/// Everything the assembler needs about one face.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceInput {
    pub id: FaceId,
    /// Validated tessellation, or `None` for a failed face.
    pub tessellation: Option<FaceTessellation>,
    /// Edge occurrences in wire order (a seam edge appears twice).
    pub uses: Vec<EdgeUse>,
    /// Distinct bounding edges, ascending.
    pub edges: Vec<EdgeId>,
}

impl FaceInput {
    /// Builds the input, deriving the distinct edge set from `uses`.
    pub fn new(id: FaceId, tessellation: Option<FaceTessellation>, uses: Vec<EdgeUse>) -> Self {
        let mut edges: Vec<EdgeId> = uses.iter().map(|u| u.edge).collect();
        edges.sort_unstable();
        edges.dedup();
        Self {
            id,
            tessellation,
            uses,
            edges,
        }
    }
}

/// Counters collected while assembling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    /// Triangles dropped for repeating a global vertex.
    pub degenerate_triangles: usize,
    /// Local vertices bound to two different global vertices by two edges.
    /// Each such pair is welded by [`Assembly::weld_aliases`].
    pub seam_conflicts: usize,
}

impl AssemblyStats {
    /// Adds `other`'s counters to these.
    pub fn absorb(&mut self, other: AssemblyStats) {
        self.degenerate_triangles += other.degenerate_triangles;
        self.seam_conflicts += other.seam_conflicts;
    }
}

/// Welded mesh and face records before edge finalisation and compaction.
#[derive(Clone, Debug, Default)]
pub struct Assembly {
    pub mesh: GlobalMesh,
    /// Indexed by [`FaceId`].
    pub faces: Vec<FaceMesh>,
    pub stats: AssemblyStats,
    /// Pairs of global vertices found to be the same vertex.
    pub aliases: Vec<(u32, u32)>,
}

impl Assembly {
    /// Merges every alias class into its smallest global index and rewrites
    /// triangles, face records and `edges` to match. Merged-away vertices
    /// are left unreferenced for compaction to remove. Triangles that
    /// collapse are dropped and counted as degenerate.
    ///
    /// Returns the number of vertices merged away.
    pub fn weld_aliases(&mut self, edges: &mut [EdgeMesh]) -> usize {
        if self.aliases.is_empty() {
            return 0;
        }
        let table = canonical_vertices(self.mesh.vertex_count(), &self.aliases);
        let merged = table
            .iter()
            .enumerate()
            .filter(|&(v, &c)| v as u32 != c)
            .count();
        let canon = |v: u32| table.get(v as usize).copied().unwrap_or(v);

        let (vertices, old) = std::mem::take(&mut self.mesh).into_parts();
        let mut triangles = Vec::with_capacity(old.len());
        let mut renumber = Vec::with_capacity(old.len());
        for tri in old {
            let [a, b, c] = tri.map(canon);
            if a == b || b == c || a == c {
                renumber.push(None);
                self.stats.degenerate_triangles += 1;
                continue;
            }
            renumber.push(Some(triangles.len() as u32));
            triangles.push([a, b, c]);
        }
        self.mesh = GlobalMesh::from_parts(vertices, triangles);

        for face in &mut self.faces {
            for v in &mut face.vertex_indices {
                *v = canon(*v);
            }
            face.triangle_indices = face
                .triangle_indices
                .iter()
                .filter_map(|&t| renumber.get(t as usize).copied().flatten())
                .collect();
        }
        for edge in edges.iter_mut() {
            for v in &mut edge.vertex_indices {
                *v = canon(*v);
            }
        }
        self.aliases.clear();
        log::debug!("welded {merged} aliased vertices");
        merged
    }
}

/// Smallest member of each vertex's alias class.
fn canonical_vertices(len: usize, aliases: &[(u32, u32)]) -> Vec<u32> {
    fn root(parent: &mut [u32], mut x: u32) -> u32 {
        while parent[x as usize] != x {
            let grand = parent[parent[x as usize] as usize];
            parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    let mut parent: Vec<u32> = (0..len as u32).collect();
    for &(a, b) in aliases {
        if a as usize >= len || b as usize >= len {
            continue;
        }
        let (ra, rb) = (root(&mut parent, a), root(&mut parent, b));
        if ra != rb {
            parent[ra.max(rb) as usize] = ra.min(rb);
        }
    }
    (0..len as u32).map(|v| root(&mut parent, v)).collect()
}

/// One face's record plus the aliases it discovered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeldedFace {
    pub record: FaceMesh,
    pub aliases: Vec<(u32, u32)>,
}

/// Destination for minted vertices and accepted triangles.
pub trait MeshSink {
    /// Appends vertices; returns the global index of the first.
    fn mint(&mut self, points: &[DVec3]) -> Result<u32, MeshStitchError>;
    /// Appends triangles; returns the global index of the first.
    fn accept(&mut self, triangles: &[[u32; 3]]) -> Result<u32, MeshStitchError>;
}

impl MeshSink for GlobalMesh {
    fn mint(&mut self, points: &[DVec3]) -> Result<u32, MeshStitchError> {
        self.append_vertices(points.iter().copied())
    }

    fn accept(&mut self, triangles: &[[u32; 3]]) -> Result<u32, MeshStitchError> {
        self.append_triangles(triangles)
    }
}

/// Local → global resolution for one face.
///
/// Union-find over local vertices; a root's `global` is the global index
/// shared by its whole class.
#[derive(Debug)]
struct LocalMap {
    parent: Vec<u32>,
    global: Vec<Option<u32>>,
    aliases: Vec<(u32, u32)>,
}

impl LocalMap {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len as u32).collect(),
            global: vec![None; len],
            aliases: Vec::new(),
        }
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    fn bind(&mut self, local: u32, slot: EdgeSlot) {
        match slot {
            EdgeSlot::Resolved(global) => self.assign(local, global),
            EdgeSlot::Pending(other) => self.union(local, other),
        }
    }

    fn assign(&mut self, local: u32, global: u32) {
        let root = self.find(local) as usize;
        match self.global[root] {
            None => self.global[root] = Some(global),
            Some(g) if g == global => {}
            Some(g) => self.aliases.push((g, global)),
        }
    }

    fn union(&mut self, a: u32, b: u32) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match (self.global[ra as usize], self.global[rb as usize]) {
            (Some(g), Some(h)) => {
                if g != h {
                    self.aliases.push((g, h));
                }
                self.parent[rb as usize] = ra;
            }
            (Some(_), None) => self.parent[rb as usize] = ra,
            (None, _) => self.parent[ra as usize] = rb,
        }
    }

    /// Mints a global vertex for every unbound class, in local order of the
    /// class's first member, and returns the complete local → global table
    /// with the aliases met while binding.
    fn mint<S: MeshSink>(
        mut self,
        face: FaceId,
        tessellation: &FaceTessellation,
        sink: &mut S,
    ) -> Result<(Vec<u32>, Vec<(u32, u32)>), MeshStitchError> {
        let len = self.parent.len();
        let mut fresh = Vec::new();
        let mut roots = Vec::new();
        let mut queued = vec![false; len];
        for local in 0..len as u32 {
            let root = self.find(local);
            if self.global[root as usize].is_none() && !queued[root as usize] {
                queued[root as usize] = true;
                roots.push(root);
                fresh.push(tessellation.placed_point(local as usize));
            }
        }
        if !fresh.is_empty() {
            let first = sink.mint(&fresh)?;
            for (offset, root) in roots.into_iter().enumerate() {
                self.global[root as usize] = Some(first + offset as u32);
            }
        }
        let mut table = Vec::with_capacity(len);
        for local in 0..len as u32 {
            let root = self.find(local);
            let global = self.global[root as usize]
                .ok_or(MeshStitchError::UnassignedLocalVertex { face, local })?;
            table.push(global);
        }
        Ok((table, self.aliases))
    }
}

fn record_for<'r, 'e>(
    edges: &'r mut [&'e mut EdgeRecord],
    face: FaceId,
    edge: EdgeId,
) -> Result<&'r mut EdgeRecord, MeshStitchError> {
    match edges.binary_search_by_key(&edge, |r| r.id()) {
        Ok(pos) => Ok(&mut *edges[pos]),
        Err(_) => Err(MeshStitchError::UnknownEdge { edge, face }),
    }
}

/// Welds one face into `sink`.
///
/// `edges` holds the records of `input.edges`, ascending by id. Every record
/// is marked as having seen this face, even when the face has no
/// tessellation.
pub fn assemble_face<S: MeshSink>(
    input: &FaceInput,
    edges: &mut [&mut EdgeRecord],
    sink: &mut S,
    options: &StitchOptions,
    stats: &mut AssemblyStats,
) -> Result<WeldedFace, MeshStitchError> {
    let face = input.id;
    let Some(tessellation) = &input.tessellation else {
        for &edge in &input.edges {
            record_for(edges, face, edge)?.finish_face()?;
        }
        return Ok(WeldedFace::default());
    };

    let len = tessellation.vertex_count();
    let mut map = LocalMap::new(len);
    for edge_use in &input.uses {
        if let Some(node) = edge_use.overlay.iter().find(|n| n.local as usize >= len) {
            return Err(MeshStitchError::OverlayIndexOutOfRange {
                face,
                edge: edge_use.edge,
                local: node.local,
                len,
            });
        }
        let record = record_for(edges, face, edge_use.edge)?;
        for (local, slot) in record.merge(face, &edge_use.overlay)? {
            map.bind(local, slot);
        }
    }

    let (table, aliases) = map.mint(face, tessellation, sink)?;
    if !aliases.is_empty() {
        log::debug!(
            "{face}: {} local vertices bound to two global vertices",
            aliases.len()
        );
        stats.seam_conflicts += aliases.len();
    }

    for &edge in &input.edges {
        let record = record_for(edges, face, edge)?;
        record.resolve(face, |local| table.get(local as usize).copied())?;
        record.finish_face()?;
    }

    let mut accepted = Vec::with_capacity(tessellation.triangles.len());
    for (local_index, &tri) in tessellation.triangles.iter().enumerate() {
        let mut corners = [0u32; 3];
        for (corner, local) in corners.iter_mut().zip(tessellation.orientation.orient(tri)) {
            *corner = *table.get(local as usize).ok_or(
                MeshStitchError::TriangleIndexOutOfRange {
                    triangle: local_index,
                    vertex: local,
                    len: table.len(),
                },
            )?;
        }
        let [a, b, c] = corners;
        if a == b || b == c || a == c {
            stats.degenerate_triangles += 1;
            match options.degenerate_triangles {
                DegenerateHandling::Drop => {
                    log::trace!("{face}: dropped degenerate triangle {local_index}")
                }
                DegenerateHandling::Warn => {
                    log::warn!("{face}: dropped degenerate triangle {local_index} -> [{a}, {b}, {c}]")
                }
            }
            continue;
        }
        accepted.push([a, b, c]);
    }
    let first = if accepted.is_empty() {
        0
    } else {
        sink.accept(&accepted)?
    };

    Ok(WeldedFace {
        record: FaceMesh {
            vertex_indices: table,
            parameters: tessellation.uv.clone(),
            triangle_indices: (first..first + accepted.len() as u32).collect(),
        },
        aliases,
    })
}

/// Serial assembly over `inputs` in the given order.
///
/// Face ids must be dense: `inputs` holds each id in `0..inputs.len()` once.
pub fn assemble(
    inputs: &[FaceInput],
    arena: &mut EdgeArena,
    options: &StitchOptions,
) -> Result<Assembly, MeshStitchError> {
    let mut out = Assembly {
        mesh: GlobalMesh::new(),
        faces: vec![FaceMesh::default(); inputs.len()],
        stats: AssemblyStats::default(),
        aliases: Vec::new(),
    };
    for input in inputs {
        let mut records = arena.select_mut(&input.edges);
        let welded = assemble_face(input, &mut records, &mut out.mesh, options, &mut out.stats)?;
        out.aliases.extend(welded.aliases);
        if let Some(slot) = out.faces.get_mut(input.id.index()) {
            *slot = welded.record;
        }
    }
    Ok(out)
}

#[cfg(feature = "rayon")]
pub use parallel::assemble_parallel;

#[cfg(feature = "rayon")]
mod parallel {
    use super::*;
    use parking_lot::{Mutex, MutexGuard};
    use rayon::prelude::*;

    /// [`MeshSink`] over a mesh shared between worker threads.
    struct SharedMesh<'a>(&'a Mutex<GlobalMesh>);

    impl MeshSink for SharedMesh<'_> {
        fn mint(&mut self, points: &[DVec3]) -> Result<u32, MeshStitchError> {
            self.0.lock().mint(points)
        }

        fn accept(&mut self, triangles: &[[u32; 3]]) -> Result<u32, MeshStitchError> {
            self.0.lock().accept(triangles)
        }
    }

    /// Parallel assembly. The result is isomorphic to [`assemble`] but
    /// vertex and triangle numbering depend on thread scheduling.
    pub fn assemble_parallel(
        inputs: &[FaceInput],
        arena: EdgeArena,
        options: &StitchOptions,
    ) -> Result<(Assembly, EdgeArena), MeshStitchError> {
        let locked: Vec<Mutex<EdgeRecord>> =
            arena.into_records().into_iter().map(|r| Mutex::new(r)).collect();
        let mesh = Mutex::new(GlobalMesh::new());

        let welded: Vec<(FaceId, WeldedFace, AssemblyStats)> = inputs
            .par_iter()
            .map(|input| {
                // Ascending lock order; `input.edges` is sorted.
                let mut guards: Vec<MutexGuard<'_, EdgeRecord>> = input
                    .edges
                    .iter()
                    .filter_map(|id| locked.get(id.index()))
                    .map(|m| m.lock())
                    .collect();
                let mut records: Vec<&mut EdgeRecord> =
                    guards.iter_mut().map(|g| &mut **g).collect();
                let mut stats = AssemblyStats::default();
                let face = assemble_face(
                    input,
                    &mut records,
                    &mut SharedMesh(&mesh),
                    options,
                    &mut stats,
                )?;
                Ok((input.id, face, stats))
            })
            .collect::<Result<_, MeshStitchError>>()?;

        let mut out = Assembly {
            mesh: mesh.into_inner(),
            faces: vec![FaceMesh::default(); inputs.len()],
            stats: AssemblyStats::default(),
            aliases: Vec::new(),
        };
        for (id, face, stats) in welded {
            out.stats.absorb(stats);
            out.aliases.extend(face.aliases);
            if let Some(slot) = out.faces.get_mut(id.index()) {
                *slot = face.record;
            }
        }
        let arena =
            EdgeArena::from_records(locked.into_iter().map(|m| m.into_inner()).collect());
        Ok((out, arena))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::orientation::FaceOrientation;
    use glam::DAffine3;

    fn unit_square(x0: f64) -> FaceTessellation {
        FaceTessellation::new(
            vec![
                DVec3::new(x0, 0.0, 0.0),
                DVec3::new(x0 + 1.0, 0.0, 0.0),
                DVec3::new(x0 + 1.0, 1.0, 0.0),
                DVec3::new(x0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    fn use_of(edge: u32, pairs: &[(u32, f64)]) -> EdgeUse {
        EdgeUse {
            edge: EdgeId::new(edge),
            overlay: pairs.iter().map(|&(l, t)| OverlayNode::new(l, t)).collect(),
        }
    }

    #[test]
    fn single_face_mints_all_vertices() {
        let input = FaceInput::new(FaceId::new(0), Some(unit_square(0.0)), vec![]);
        let mut arena = EdgeArena::new(&[]);
        let out = assemble(&[input], &mut arena, &StitchOptions::default()).unwrap();
        assert_eq!(out.mesh.vertex_count(), 4);
        assert_eq!(out.mesh.triangles(), &[[0, 1, 2], [0, 2, 3]]);
        assert_eq!(out.faces[0].vertex_indices, vec![0, 1, 2, 3]);
        assert_eq!(out.faces[0].triangle_indices, vec![0, 1]);
    }

    #[test]
    fn shared_edge_is_welded() {
        // Right side of the left square (locals 1, 2) meets the left side of
        // the right square (locals 0, 3) along edge 0, parameter = y.
        let left = FaceInput::new(
            FaceId::new(0),
            Some(unit_square(0.0)),
            vec![use_of(0, &[(1, 0.0), (2, 1.0)])],
        );
        let right = FaceInput::new(
            FaceId::new(1),
            Some(unit_square(1.0)),
            vec![use_of(0, &[(0, 0.0), (3, 1.0)])],
        );
        let mut arena = EdgeArena::new(&[2]);
        let out = assemble(&[left, right], &mut arena, &StitchOptions::default()).unwrap();
        assert_eq!(out.mesh.vertex_count(), 6);
        assert_eq!(out.mesh.triangle_count(), 4);
        assert_eq!(out.faces[1].vertex_indices[0], out.faces[0].vertex_indices[1]);
        assert_eq!(out.faces[1].vertex_indices[3], out.faces[0].vertex_indices[2]);
        let edge = arena.get(EdgeId::new(0)).unwrap().to_edge_mesh().unwrap();
        assert_eq!(edge.vertex_indices, vec![1, 2]);
    }

    #[test]
    fn reversed_face_flips_triangles() {
        let t = unit_square(0.0).with_orientation(FaceOrientation::Reversed);
        let input = FaceInput::new(FaceId::new(0), Some(t), vec![]);
        let out = assemble(&[input], &mut EdgeArena::new(&[]), &StitchOptions::default()).unwrap();
        assert_eq!(out.mesh.triangles(), &[[0, 2, 1], [0, 3, 2]]);
    }

    #[test]
    fn placement_moves_minted_vertices() {
        let t = unit_square(0.0)
            .with_placement(DAffine3::from_translation(DVec3::new(0.0, 0.0, 5.0)));
        let input = FaceInput::new(FaceId::new(0), Some(t), vec![]);
        let out = assemble(&[input], &mut EdgeArena::new(&[]), &StitchOptions::default()).unwrap();
        assert!(out.mesh.vertices().iter().all(|v| v.z == 5.0));
    }

    #[test]
    fn degenerate_triangle_is_dropped() {
        let mut t = unit_square(0.0);
        t.triangles.push([1, 1, 2]);
        let input = FaceInput::new(FaceId::new(0), Some(t), vec![]);
        let out = assemble(&[input], &mut EdgeArena::new(&[]), &StitchOptions::default()).unwrap();
        assert_eq!(out.mesh.triangle_count(), 2);
        assert_eq!(out.faces[0].triangle_indices, vec![0, 1]);
        assert_eq!(out.stats.degenerate_triangles, 1);
    }

    #[test]
    fn seam_collapse_makes_triangle_degenerate() {
        // Locals 0 and 3 sit on the same point of a closed edge; welding them
        // collapses triangle [0, 2, 3].
        let input = FaceInput::new(
            FaceId::new(0),
            Some(unit_square(0.0)),
            vec![use_of(0, &[(0, 0.0), (3, 0.0)])],
        );
        let mut arena = EdgeArena::new(&[1]);
        let out = assemble(&[input], &mut arena, &StitchOptions::default()).unwrap();
        assert_eq!(out.mesh.vertex_count(), 3);
        assert_eq!(out.faces[0].vertex_indices, vec![0, 1, 2, 0]);
        assert_eq!(out.mesh.triangle_count(), 1);
        assert_eq!(out.stats.degenerate_triangles, 1);
    }

    #[test]
    fn failed_face_still_counts_for_its_edges() {
        let failed = FaceInput::new(FaceId::new(0), None, vec![use_of(0, &[])]);
        let ok = FaceInput::new(
            FaceId::new(1),
            Some(unit_square(0.0)),
            vec![use_of(0, &[(0, 0.0), (1, 1.0)])],
        );
        let mut arena = EdgeArena::new(&[2]);
        let out = assemble(&[failed, ok], &mut arena, &StitchOptions::default()).unwrap();
        assert!(out.faces[0].is_empty());
        assert_eq!(
            arena.get(EdgeId::new(0)).unwrap().state(),
            crate::algs::edge_merge::EdgeState::Frozen
        );
    }

    #[test]
    fn unknown_edge_is_error() {
        let input = FaceInput::new(
            FaceId::new(0),
            Some(unit_square(0.0)),
            vec![use_of(4, &[(0, 0.0)])],
        );
        let err = assemble(&[input], &mut EdgeArena::new(&[1]), &StitchOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            MeshStitchError::UnknownEdge {
                edge: EdgeId::new(4),
                face: FaceId::new(0)
            }
        );
    }

    #[test]
    fn local_map_union_prefers_resolved_root() {
        let mut map = LocalMap::new(3);
        map.bind(0, EdgeSlot::Resolved(7));
        map.bind(1, EdgeSlot::Pending(0));
        map.bind(2, EdgeSlot::Pending(1));
        let t = FaceTessellation::new(vec![DVec3::ZERO; 3], vec![[0, 1, 2]]);
        let mut mesh = GlobalMesh::new();
        let (table, aliases) = map.mint(FaceId::new(0), &t, &mut mesh).unwrap();
        assert_eq!(table, vec![7, 7, 7]);
        assert!(aliases.is_empty());
        assert!(mesh.is_empty());
    }

    #[test]
    fn local_map_records_aliases() {
        let mut map = LocalMap::new(2);
        map.bind(0, EdgeSlot::Resolved(1));
        map.bind(0, EdgeSlot::Resolved(2));
        let t = FaceTessellation::new(vec![DVec3::ZERO; 2], vec![[0, 1, 1]]);
        let mut mesh = GlobalMesh::new();
        let (table, aliases) = map.mint(FaceId::new(0), &t, &mut mesh).unwrap();
        assert_eq!(table, vec![1, 0]);
        assert_eq!(aliases, vec![(1, 2)]);
    }

    #[test]
    fn canonical_vertex_is_class_minimum() {
        let table = canonical_vertices(6, &[(4, 2), (5, 4), (3, 1)]);
        assert_eq!(table, vec![0, 1, 2, 1, 2, 2]);
    }

    #[test]
    fn corner_minted_twice_is_welded() {
        // 2x2 grid of squares around the centre point (1, 1). Faces 0 and 3
        // touch only at the centre and run first, so both mint it.
        let square = |x0: f64, y0: f64| {
            FaceTessellation::new(
                vec![
                    DVec3::new(x0, y0, 0.0),
                    DVec3::new(x0 + 1.0, y0, 0.0),
                    DVec3::new(x0 + 1.0, y0 + 1.0, 0.0),
                    DVec3::new(x0, y0 + 1.0, 0.0),
                ],
                vec![[0, 1, 2], [0, 2, 3]],
            )
        };
        // Inner edges: 0 = x=1,y∈[0,1]; 1 = x=1,y∈[1,2]; 2 = y=1,x∈[0,1]; 3 = y=1,x∈[1,2].
        let bottom_left = FaceInput::new(
            FaceId::new(0),
            Some(square(0.0, 0.0)),
            vec![use_of(0, &[(1, 0.0), (2, 1.0)]), use_of(2, &[(3, 0.0), (2, 1.0)])],
        );
        let bottom_right = FaceInput::new(
            FaceId::new(1),
            Some(square(1.0, 0.0)),
            vec![use_of(0, &[(0, 0.0), (3, 1.0)]), use_of(3, &[(3, 1.0), (2, 2.0)])],
        );
        let top_left = FaceInput::new(
            FaceId::new(2),
            Some(square(0.0, 1.0)),
            vec![use_of(1, &[(1, 1.0), (2, 2.0)]), use_of(2, &[(0, 0.0), (1, 1.0)])],
        );
        let top_right = FaceInput::new(
            FaceId::new(3),
            Some(square(1.0, 1.0)),
            vec![use_of(1, &[(0, 1.0), (3, 2.0)]), use_of(3, &[(0, 1.0), (1, 2.0)])],
        );
        let mut arena = EdgeArena::new(&[2, 2, 2, 2]);
        let inputs = [bottom_left, top_right, bottom_right, top_left];
        let mut out = assemble(&inputs, &mut arena, &StitchOptions::default()).unwrap();
        assert!(!out.aliases.is_empty());
        arena.freeze_all().unwrap();
        let mut edges = arena.edge_meshes().unwrap();
        assert_eq!(out.weld_aliases(&mut edges), 1);

        let centre = out.faces[0].vertex_indices[2];
        assert_eq!(out.faces[3].vertex_indices[0], centre);
        assert_eq!(out.faces[1].vertex_indices[3], centre);
        assert_eq!(out.faces[2].vertex_indices[1], centre);
        assert_eq!(edges[0].vertex_indices[1], centre);
        let used: std::collections::BTreeSet<u32> =
            out.mesh.triangles().iter().flatten().copied().collect();
        assert_eq!(used.len(), 9);
        assert_eq!(out.mesh.triangle_count(), 8);
    }
}
