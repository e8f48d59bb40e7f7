//! Benchmarks for the per-frame polling surface: sampling and change
//! detection over trees of varying width.

use std::sync::{Arc, Mutex};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::Vec3;
use sdf_atlas::prelude::*;

struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Inspect for Sphere {
    fn inspect(&self, walker: &mut Walker) {
        walker.visit(&self.center);
        walker.visit(&self.radius);
    }
}

impl SdfCore for Sphere {
    fn eval(&self, point: Vec3) -> f32 {
        (point - self.center).length() - self.radius
    }

    fn aabb(&self) -> Aabb {
        Aabb::from_center_extents(self.center, Vec3::splat(self.radius))
    }

    fn children_root(&self) -> &dyn Inspect {
        self
    }

    fn type_label(&self) -> &'static str {
        "Sphere"
    }
}

struct Union {
    nodes: Vec<SharedCore>,
}

impl Inspect for Union {
    fn inspect(&self, walker: &mut Walker) {
        walker.visit(&self.nodes);
    }
}

impl SdfCore for Union {
    fn eval(&self, point: Vec3) -> f32 {
        self.nodes
            .iter()
            .map(|n| n.lock().unwrap().eval(point))
            .fold(f32::INFINITY, f32::min)
    }

    fn aabb(&self) -> Aabb {
        self.nodes
            .iter()
            .map(|n| n.lock().unwrap().aabb())
            .reduce(|a, b| a.union(&b))
            .unwrap_or(Aabb::ZERO)
    }

    fn children_root(&self) -> &dyn Inspect {
        self
    }

    fn type_label(&self) -> &'static str {
        "Union"
    }
}

fn union_of(width: usize) -> WrappedSdf {
    let nodes: Vec<SharedCore> = (0..width)
        .map(|i| -> SharedCore {
            Arc::new(Mutex::new(Sphere {
                center: Vec3::new(i as f32 * 2.5, 0.0, 0.0),
                radius: 1.0,
            }))
        })
        .collect();
    WrappedSdf::new(Union { nodes }).with_name("bench_union")
}

/// Deterministic pseudo-random probe points
fn generate_points(count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let t = i as f32 / count as f32;
            Vec3::new(
                (t * 123.456).sin() * 8.0,
                (t * 234.567).sin() * 2.0,
                (t * 345.678).sin() * 2.0,
            )
        })
        .collect()
}

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");
    let points = generate_points(256);

    for width in [1usize, 4, 16] {
        group.throughput(Throughput::Elements(points.len() as u64));

        let mut node = union_of(width);
        group.bench_with_input(
            BenchmarkId::new("distance_only", width),
            &width,
            |b, _| {
                b.iter(|| {
                    for p in &points {
                        black_box(node.sample(black_box(*p), true));
                    }
                })
            },
        );

        let mut node = union_of(width);
        // Prime caches so the loop measures steady-state shading.
        node.sample(Vec3::ZERO, false);
        group.bench_with_input(BenchmarkId::new("shaded", width), &width, |b, _| {
            b.iter(|| {
                for p in &points {
                    black_box(node.sample(black_box(*p), false));
                }
            })
        });
    }

    group.finish();
}

fn bench_changed(c: &mut Criterion) {
    let mut group = c.benchmark_group("changed");

    for width in [1usize, 16, 64] {
        let mut node = union_of(width);
        node.children();
        group.bench_with_input(BenchmarkId::new("clean_poll", width), &width, |b, _| {
            b.iter(|| black_box(node.changed()))
        });
    }

    let mut node = union_of(16);
    node.children();
    let region = node.aabb();
    group.bench_function("dirty_poll", |b| {
        b.iter(|| {
            node.mark_changed(region);
            black_box(node.changed())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_sample, bench_changed);
criterion_main!(benches);
