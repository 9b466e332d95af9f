#![allow(dead_code)]
use std::collections::BTreeSet;
use std::f64::consts::TAU;

use brep_stitch::prelude::*;
use glam::DVec3;

pub fn square_at(x0: f64, y0: f64) -> FaceTessellation {
    FaceTessellation::new(
        vec![
            DVec3::new(x0, y0, 0.0),
            DVec3::new(x0 + 1.0, y0, 0.0),
            DVec3::new(x0 + 1.0, y0 + 1.0, 0.0),
            DVec3::new(x0, y0 + 1.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 2, 3]],
    )
}

pub fn nodes(pairs: &[(u32, f64)]) -> Vec<OverlayNode> {
    pairs.iter().map(|&(l, t)| OverlayNode::new(l, t)).collect()
}

/// `nx` × `ny` grid of unit squares in the z = 0 plane, one face per square.
///
/// Horizontal edges are parameterised by x, vertical edges by y, so shared
/// overlay parameters are exact integers.
pub fn grid(kernel: &mut InMemoryKernel, nx: usize, ny: usize) -> ModelKey {
    let model = kernel.add_model();
    // h(i, j): y = j, x ∈ [i, i + 1]; v(i, j): x = i, y ∈ [j, j + 1].
    let h: Vec<Vec<usize>> = (0..nx)
        .map(|_| (0..=ny).map(|_| kernel.add_edge(model)).collect())
        .collect();
    let v: Vec<Vec<usize>> = (0..=nx)
        .map(|_| (0..ny).map(|_| kernel.add_edge(model)).collect())
        .collect();
    for j in 0..ny {
        for i in 0..nx {
            let (x, y) = (i as f64, j as f64);
            let face = kernel.add_face(model, Some(square_at(x, y)));
            kernel.link_edge(model, face, h[i][j], nodes(&[(0, x), (1, x + 1.0)]));
            kernel.link_edge(model, face, v[i + 1][j], nodes(&[(1, y), (2, y + 1.0)]));
            // Top and left run against the edge direction.
            kernel.link_edge(model, face, h[i][j + 1], nodes(&[(2, x + 1.0), (3, x)]));
            kernel.link_edge(model, face, v[i][j], nodes(&[(3, y + 1.0), (0, y)]));
        }
    }
    model
}

/// Side of a cylinder of radius 1 and height 1 as one periodic face with
/// `segments` columns. The seam edge bounds the face twice; the first and
/// last columns sit on it.
pub fn cylinder_side(kernel: &mut InMemoryKernel, segments: u32) -> ModelKey {
    let model = kernel.add_model();
    let cols = segments + 1;
    let mut points = Vec::new();
    for z in [0.0, 1.0] {
        for k in 0..cols {
            let angle = TAU * f64::from(k) / f64::from(segments);
            points.push(DVec3::new(angle.cos(), angle.sin(), z));
        }
    }
    let mut triangles = Vec::new();
    for k in 0..segments {
        let (a, b, c, d) = (k, k + 1, cols + k + 1, cols + k);
        triangles.push([a, b, c]);
        triangles.push([a, c, d]);
    }
    let face = kernel.add_face(model, Some(FaceTessellation::new(points, triangles)));
    let bottom = kernel.add_edge(model);
    let seam = kernel.add_edge(model);
    let top = kernel.add_edge(model);
    let circle = |row: u32| -> Vec<OverlayNode> {
        (0..cols)
            .map(|k| OverlayNode::new(row * cols + k, TAU * f64::from(k) / f64::from(segments)))
            .collect()
    };
    kernel.link_edge(model, face, bottom, circle(0));
    kernel.link_edge(model, face, seam, nodes(&[(segments, 0.0), (cols + segments, 1.0)]));
    kernel.link_edge(model, face, top, circle(1));
    kernel.link_edge(model, face, seam, nodes(&[(0, 0.0), (cols, 1.0)]));
    model
}

pub fn key(p: DVec3) -> [u64; 3] {
    [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()]
}

/// Vertex positions as an exact set.
pub fn position_set(mesh: &GlobalMesh) -> BTreeSet<[u64; 3]> {
    mesh.vertices().iter().map(|&p| key(p)).collect()
}

/// Triangles by corner position, rotated so the smallest corner leads.
/// Winding is preserved.
pub fn triangle_set(mesh: &GlobalMesh) -> BTreeSet<[[u64; 3]; 3]> {
    (0..mesh.triangle_count())
        .filter_map(|t| mesh.triangle_positions(t))
        .map(|corners| {
            let mut keys = corners.map(key);
            let lead = (0..3).min_by_key(|&i| keys[i]).unwrap_or(0);
            keys.rotate_left(lead);
            keys
        })
        .collect()
}

/// Every index stored in the model is in range and no vertex is unused.
pub fn assert_compact(model: &StitchedModel) {
    let n = model.mesh.vertex_count() as u32;
    let used: BTreeSet<u32> = model.mesh.triangles().iter().flatten().copied().collect();
    assert_eq!(used.len(), n as usize, "orphan vertices survived");
    for face in &model.faces {
        assert!(face.vertex_indices.iter().all(|&v| v < n));
    }
    for edge in &model.edges {
        assert!(edge.vertex_indices.iter().all(|&v| v < n));
    }
    model.validate_invariants().unwrap();
}
