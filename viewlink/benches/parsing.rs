//! Benchmarks pour le décodage des messages view et la projection

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use viewlink::{GeoProjector, GeodeticPoint, LocalPoint};

/// Message polygone de `n` sommets sur un cercle de 500 m
fn polygon_message(n: usize) -> String {
    let pairs: Vec<String> = (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            format!("{:.2},{:.2}", 500.0 * angle.cos(), 500.0 * angle.sin())
        })
        .collect();
    format!("active=true,pts=({}),label=survey_area", pairs.join(":"))
}

fn bench_parse_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_view");

    for size in [4usize, 64, 1024] {
        let message = polygon_message(size);
        group.throughput(Throughput::Bytes(message.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &message, |b, msg| {
            b.iter(|| {
                let view = viewlink::parse_view(black_box(msg)).unwrap();
                black_box(view)
            })
        });
    }

    group.finish();
}

fn bench_parse_fields(c: &mut Criterion) {
    let message = "active=true,x=1021.5,y=-388.25,label=waypoint_12,vertex_size=3";
    c.bench_function("parse_fields_scalars", |b| {
        b.iter(|| black_box(viewlink::parse_fields(black_box(message))))
    });
}

fn bench_projection(c: &mut Criterion) {
    let origin = GeodeticPoint::new(43.0718, -70.7626, 0.0);
    let projector = GeoProjector::with_origin(origin);
    let point = GeodeticPoint::new(43.0812, -70.7411, 0.0);
    let local = LocalPoint::new(1742.0, 1044.0);

    let mut group = c.benchmark_group("projection");
    group.bench_function("to_local", |b| {
        b.iter(|| black_box(projector.to_local(black_box(&point)).unwrap()))
    });
    group.bench_function("to_geodetic", |b| {
        b.iter(|| black_box(projector.to_geodetic(black_box(&local)).unwrap()))
    });
    group.finish();
}

fn bench_projection_parallel(c: &mut Criterion) {
    use rayon::prelude::*;

    let frame = GeoProjector::with_origin(GeodeticPoint::new(43.0718, -70.7626, 0.0))
        .frame()
        .unwrap();
    let track: Vec<GeodeticPoint> = (0..10_000)
        .map(|i| GeodeticPoint::new(43.0718 + i as f64 * 1e-5, -70.7626 + i as f64 * 1e-5, 0.0))
        .collect();

    let mut group = c.benchmark_group("projection_batch");
    group.throughput(Throughput::Elements(track.len() as u64));
    group.sample_size(20);

    group.bench_function("sequential", |b| {
        b.iter(|| {
            let local: Vec<LocalPoint> = track.iter().map(|p| frame.to_local(p)).collect();
            black_box(local)
        })
    });
    group.bench_function("parallel", |b| {
        b.iter(|| {
            let local: Vec<LocalPoint> = track.par_iter().map(|p| frame.to_local(p)).collect();
            black_box(local)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_view,
    bench_parse_fields,
    bench_projection,
    bench_projection_parallel
);
criterion_main!(benches);
