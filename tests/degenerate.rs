mod util;

use brep_stitch::prelude::*;
use util::{assert_compact, nodes, square_at};

#[test]
fn repeated_local_index_is_dropped() {
    let mut t = square_at(0.0, 0.0);
    t.triangles.push([2, 2, 3]);
    let mut k = InMemoryKernel::new();
    let m = k.add_model();
    k.add_face(m, Some(t));

    let out = stitch_model(&k, &m, &StitchOptions::verbose()).unwrap();
    assert_eq!(out.report.degenerate_triangles, 1);
    assert_eq!(out.mesh.triangle_count(), 2);
    assert_eq!(out.faces[0].triangle_indices, vec![0, 1]);
    assert_compact(&out);
}

#[test]
fn triangle_collapsed_by_welding_is_dropped() {
    // Locals 1 and 2 both sit at parameter 0.5 of the edge, so they weld and
    // triangle [0, 1, 2] collapses.
    let mut t = square_at(0.0, 0.0);
    t.triangles = vec![[0, 1, 2], [0, 2, 3]];
    let mut k = InMemoryKernel::new();
    let m = k.add_model();
    let f = k.add_face(m, Some(t));
    let e = k.add_edge(m);
    k.link_edge(m, f, e, nodes(&[(1, 0.5), (2, 0.5)]));

    let out = stitch_model(&k, &m, &StitchOptions::default()).unwrap();
    assert_eq!(out.report.degenerate_triangles, 1);
    assert_eq!(out.mesh.triangle_count(), 1);
    assert_eq!(out.edges[0].len(), 1);
    assert_eq!(out.faces[0].vertex_indices[1], out.faces[0].vertex_indices[2]);
    assert_compact(&out);
}
