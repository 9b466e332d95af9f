use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::DVec3;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use brep_stitch::prelude::*;

// n x n grid of unit squares, each face tessellated with `k` x `k` quads.
fn grid(kernel: &mut InMemoryKernel, n: usize, k: usize) -> ModelKey {
    let model = kernel.add_model();
    let h: Vec<Vec<usize>> = (0..n)
        .map(|_| (0..=n).map(|_| kernel.add_edge(model)).collect())
        .collect();
    let v: Vec<Vec<usize>> = (0..=n)
        .map(|_| (0..n).map(|_| kernel.add_edge(model)).collect())
        .collect();
    let step = 1.0 / k as f64;
    let local = |a: usize, b: usize| (b * (k + 1) + a) as u32;

    for j in 0..n {
        for i in 0..n {
            let (x0, y0) = (i as f64, j as f64);
            let mut points = Vec::with_capacity((k + 1) * (k + 1));
            for b in 0..=k {
                for a in 0..=k {
                    points.push(DVec3::new(x0 + a as f64 * step, y0 + b as f64 * step, 0.0));
                }
            }
            let mut triangles = Vec::with_capacity(2 * k * k);
            for b in 0..k {
                for a in 0..k {
                    let (p, q, r, s) = (local(a, b), local(a + 1, b), local(a + 1, b + 1), local(a, b + 1));
                    triangles.push([p, q, r]);
                    triangles.push([p, r, s]);
                }
            }
            let face = kernel.add_face(model, Some(FaceTessellation::new(points, triangles)));

            let along = |t: usize, origin: f64| origin + t as f64 * step;
            let bottom = (0..=k).map(|a| OverlayNode::new(local(a, 0), along(a, x0))).collect();
            let top = (0..=k).map(|a| OverlayNode::new(local(a, k), along(a, x0))).collect();
            let left = (0..=k).map(|b| OverlayNode::new(local(0, b), along(b, y0))).collect();
            let right = (0..=k).map(|b| OverlayNode::new(local(k, b), along(b, y0))).collect();
            kernel.link_edge(model, face, h[i][j], bottom);
            kernel.link_edge(model, face, v[i + 1][j], right);
            kernel.link_edge(model, face, h[i][j + 1], top);
            kernel.link_edge(model, face, v[i][j], left);
        }
    }
    model
}

fn bench_stitch(c: &mut Criterion) {
    let mut group = c.benchmark_group("stitch");
    for &(n, k) in &[(8, 8), (16, 8), (32, 4)] {
        let mut kernel = InMemoryKernel::new();
        let model = grid(&mut kernel, n, k);
        let options = StitchOptions::default();

        group.bench_with_input(
            BenchmarkId::new("serial", format!("{n}x{n}/{k}")),
            &model,
            |b, m| b.iter(|| stitch_model(&kernel, m, &options).unwrap()),
        );

        let mut gathered = gather(&kernel, &model, &options).unwrap();
        gathered.faces.shuffle(&mut SmallRng::seed_from_u64(42));
        group.bench_with_input(
            BenchmarkId::new("shuffled", format!("{n}x{n}/{k}")),
            &gathered,
            |b, g| b.iter(|| stitch_gathered(g.clone(), &options).unwrap()),
        );

        #[cfg(feature = "rayon")]
        group.bench_with_input(
            BenchmarkId::new("parallel", format!("{n}x{n}/{k}")),
            &model,
            |b, m| b.iter(|| stitch_model_parallel(&kernel, m, &options).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_stitch);
criterion_main!(benches);
