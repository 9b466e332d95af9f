mod util;

use brep_stitch::prelude::*;
use util::{cylinder_side, position_set};

#[test]
fn periodic_face_welds_its_seam() {
    let mut k = InMemoryKernel::new();
    let m = cylinder_side(&mut k, 4);
    let out = stitch_model(&k, &m, &StitchOptions::default()).unwrap();

    assert_eq!(out.mesh.vertex_count(), 8);
    assert_eq!(out.mesh.triangle_count(), 8);
    assert_eq!(out.report.degenerate_triangles, 0);
    assert_eq!(out.report.edges, 3);

    let face = &out.faces[0];
    assert_eq!(face.vertex_indices[4], face.vertex_indices[0]);
    assert_eq!(face.vertex_indices[9], face.vertex_indices[5]);

    let seam = out.edge(EdgeId::new(1)).unwrap();
    assert_eq!(seam.vertex_indices, vec![face.vertex_indices[0], face.vertex_indices[5]]);

    // Both ends of the closed bottom circle are the same vertex.
    let bottom = out.edge(EdgeId::new(0)).unwrap();
    assert_eq!(bottom.len(), 5);
    assert_eq!(bottom.vertex_indices.first(), bottom.vertex_indices.last());
    assert_eq!(position_set(&out.mesh).len(), 8);
}

#[test]
fn seam_welding_scales_with_segments() {
    for segments in [3, 8, 33] {
        let mut k = InMemoryKernel::new();
        let m = cylinder_side(&mut k, segments);
        let out = stitch_model(&k, &m, &StitchOptions::default()).unwrap();
        assert_eq!(out.mesh.vertex_count(), 2 * segments as usize);
        assert_eq!(out.mesh.triangle_count(), 2 * segments as usize);
        out.validate_invariants().unwrap();
    }
}
