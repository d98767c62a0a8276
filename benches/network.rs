//! Criterion benchmarks for the particle network.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use neuronet::config::NetworkConfig;
use neuronet::network::NeuralNetwork;
use neuronet::surface::RecordingSurface;

fn make_network(neuron_count: usize, max_connections: usize, seed: u64) -> NeuralNetwork {
    let cfg = NetworkConfig::hero(1280.0, 720.0)
        .with_neuron_count(neuron_count)
        .with_max_connections(max_connections)
        .with_seed(seed);
    NeuralNetwork::new(cfg).expect("bench config is valid")
}

/// Benchmark a full tick (rewire + draw + move) at varying sizes.
fn bench_tick_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_size");

    for size in [40usize, 100, 250, 500].iter() {
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("idle", size), size, |b, &size| {
            let mut net = make_network(size, 5, 42);
            let mut surface = RecordingSurface::new();
            b.iter(|| {
                net.tick(black_box(&mut surface));
            });
        });

        group.bench_with_input(BenchmarkId::new("pointer", size), size, |b, &size| {
            let mut net = make_network(size, 5, 42);
            net.pointer_moved(640.0, 360.0);
            let mut surface = RecordingSurface::new();
            b.iter(|| {
                net.tick(black_box(&mut surface));
            });
        });
    }

    group.finish();
}

/// Nearest-neighbor rewiring dominates at large sizes; isolate it.
fn bench_refresh_connections(c: &mut Criterion) {
    let mut group = c.benchmark_group("refresh_connections");

    for size in [100usize, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut net = make_network(size, 5, 7);
            b.iter(|| black_box(net.refresh_connections()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick_sizes, bench_refresh_connections);
criterion_main!(benches);
