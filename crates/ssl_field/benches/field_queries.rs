// Per-tick query cost of both rule versions
// Run with: cargo bench --bench field_queries

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ssl_field::{Field, GeometryMessage, Side, Vector, VectorExt};

fn fields() -> Vec<(&'static str, Field)> {
    vec![
        ("2017", Field::from_message(&GeometryMessage::legacy_2017()).unwrap()),
        ("2018", Field::from_message(&GeometryMessage::division_a()).unwrap()),
    ]
}

fn benchmark_ray_defense_area(c: &mut Criterion) {
    let mut group = c.benchmark_group("intersect_ray_defense_area");
    for (name, field) in fields() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &field, |b, field| {
            b.iter(|| {
                field.rules().intersect_ray_defense_area(
                    black_box(Vector::new(0.7, 0.0)),
                    black_box(Vector::from_angle(1.4)),
                    black_box(0.1),
                    Side::Opponent,
                )
            });
        });
    }
    group.finish();
}

fn benchmark_allowed_line_segments(c: &mut Criterion) {
    let mut group = c.benchmark_group("allowed_line_segments");
    for (name, field) in fields() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &field, |b, field| {
            b.iter(|| {
                field.allowed_line_segments(
                    black_box(Vector::new(-2.5, -3.9)),
                    black_box(Vector::new(1.0, 0.05)),
                    f64::INFINITY,
                )
            });
        });
    }
    group.finish();
}

fn benchmark_limit_to_allowed_field(c: &mut Criterion) {
    let field = Field::from_message(&GeometryMessage::division_a()).unwrap();
    c.bench_function("limit_to_allowed_field", |b| {
        b.iter(|| field.limit_to_allowed_field(black_box(Vector::new(0.3, 5.4)), black_box(0.09), true));
    });
}

criterion_group!(
    benches,
    benchmark_ray_defense_area,
    benchmark_allowed_line_segments,
    benchmark_limit_to_allowed_field
);
criterion_main!(benches);
