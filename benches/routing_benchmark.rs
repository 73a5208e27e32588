//! Grounded on the teacher's `benches/spsn_benchmark.rs`: a `criterion`
//! benchmark group iterating router variants against a fixed plan and
//! request, using `iter_batched` to exclude plan construction from the
//! timed section. Here there is only one search kernel, so the group
//! iterates over plan size instead of router variant.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use cgr_engine::dijkstra::shortest_path;
use cgr_engine::k_yen::k_routes_by_diversification;
use cgr_engine::route::{Filters, RouteRequest};
use cgr_engine::synth::{leo_ring, LeoRingConfig};

fn benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing");

    for satellites in [8u32, 32, 128] {
        group.bench_function(format!("shortest_path/{satellites}_satellites"), |b| {
            b.iter_batched(
                || {
                    let cfg = LeoRingConfig { satellites, seed: 7, ..LeoRingConfig::default() };
                    let dst = cgr_engine::synth::ground_station_id(&cfg);
                    let plan = leo_ring(&cfg);
                    let req = RouteRequest::new(0, dst, 0.0, 1e6);
                    (plan, req)
                },
                |(plan, req)| {
                    black_box(shortest_path(black_box(&plan), black_box(&req), black_box(&Filters::none())));
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("k_yen/{satellites}_satellites"), |b| {
            b.iter_batched(
                || {
                    let cfg = LeoRingConfig { satellites, seed: 7, ..LeoRingConfig::default() };
                    let dst = cgr_engine::synth::ground_station_id(&cfg);
                    let plan = leo_ring(&cfg);
                    let req = RouteRequest::new(0, dst, 0.0, 1e6);
                    (plan, req)
                },
                |(plan, req)| {
                    black_box(k_routes_by_diversification(black_box(&plan), black_box(&req), black_box(&Filters::none()), 3));
                },
                BatchSize::SmallInput,
            );
        });
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(30);
    targets = benchmark
}
criterion_main!(benches);
