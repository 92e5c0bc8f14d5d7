//! # Gait Compiler Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use walk_lib::{
    gait_cmp::{compile_cycle, GaitTable, Geometry},
    kin::LegSolver,
    traj::Point,
};

fn gait_cmp_benchmark(c: &mut Criterion) {
    // ---- Reference walker ----

    let geometry = Geometry {
        femur: 44.0,
        tibia: 74.0,
        height: 110.0,
        step_height: 10.0,
        step_width: 26.0,
    };

    let solver = LegSolver::new(
        geometry.femur,
        geometry.tibia,
        [
            Point::new(10.0, 0.0),
            Point::new(15.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 0.0),
        ],
    );

    let trot = GaitTable::from_codes(&[[1, 2, 3, 4], [2, 3, 4, 1], [3, 4, 1, 2], [4, 1, 2, 3]])
        .expect("Invalid trot table");

    // ---- Benchmarks ----

    c.bench_function("compile trot, granularity 3", |b| {
        b.iter(|| compile_cycle(black_box(&trot), &geometry, &solver, 3))
    });

    c.bench_function("compile trot, granularity 50", |b| {
        b.iter(|| compile_cycle(black_box(&trot), &geometry, &solver, 50))
    });
}

criterion_group!(benches, gait_cmp_benchmark);
criterion_main!(benches);
