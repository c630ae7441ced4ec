use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use zraster::prelude::*;

const BUFFER_WIDTH: usize = 800;
const BUFFER_HEIGHT: usize = 600;

fn projection() -> Projection {
    Projection::new(-1.0, 1.0, -1.0, 1.0, 1.0, 2.0).unwrap()
}

/// A triangle centred on the view axis spanning `extent` of the NDC square
/// at object depth 1.5.
fn centred_triangle(extent: f32) -> Scene {
    let e = extent * 1.5;
    Scene::from_raw(
        [[0.0, -e, 1.5], [e, e, 1.4], [-e, e, 1.6]],
        [[0, 1, 2]],
    )
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    for (name, scene) in [
        ("small", centred_triangle(0.05)),
        ("medium", centred_triangle(0.3)),
        ("large", centred_triangle(0.9)),
    ] {
        group.bench_with_input(BenchmarkId::new("depth_band", name), &scene, |b, scene| {
            let mut pipeline =
                Pipeline::<char>::new(BUFFER_WIDTH, BUFFER_HEIGHT, projection(), DepthBandShader)
                    .unwrap();
            b.iter(|| {
                pipeline.clear();
                pipeline.render(black_box(scene)).unwrap();
            });
        });

        group.bench_with_input(BenchmarkId::new("flat", name), &scene, |b, scene| {
            let mut pipeline = Pipeline::new(
                BUFFER_WIDTH,
                BUFFER_HEIGHT,
                projection(),
                FlatShader::new('x'),
            )
            .unwrap();
            b.iter(|| {
                pipeline.clear();
                pipeline.render(black_box(scene)).unwrap();
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    // A 20x20 grid of small triangles at staggered depths.
    let mut scene = Scene::default();
    for row in 0..20 {
        for col in 0..20 {
            let z = 1.2 + ((row + col) % 5) as f32 * 0.1;
            let x = (-0.95 + col as f32 * 0.095) * z;
            let y = (-0.95 + row as f32 * 0.095) * z;
            let a = scene.push_vertex([x, y, z]);
            let b = scene.push_vertex([x + 0.08 * z, y, z]);
            let c = scene.push_vertex([x + 0.04 * z, y + 0.08 * z, z]);
            scene.push_triangle([a, b, c]);
        }
    }

    group.bench_function("depth_band_400_triangles", |b| {
        let mut pipeline =
            Pipeline::<char>::new(BUFFER_WIDTH, BUFFER_HEIGHT, projection(), DepthBandShader)
                .unwrap();
        b.iter(|| {
            pipeline.clear();
            pipeline.render(black_box(&scene)).unwrap();
        });
    });

    group.bench_function("accumulate_400_triangles", |b| {
        let mut pipeline =
            Pipeline::<i32>::new(BUFFER_WIDTH, BUFFER_HEIGHT, projection(), DepthBandShader)
                .unwrap();
        b.iter(|| {
            pipeline.render(black_box(&scene)).unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_many_triangles);
criterion_main!(benches);
