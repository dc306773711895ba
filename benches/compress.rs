use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};

use lz11_squish::{compress, compress_with, Allocation, Options};

fn criterion_benchmark(c: &mut Criterion) {
    let data_part = include_bytes!("../src/pack.rs");

    let mut data = Vec::new();
    for _ in 0..10 {
        data.extend_from_slice(data_part);
    }
    let zeros = vec![0u8; 1 << 20];

    let mut c = c.benchmark_group("lz11");
    c.measurement_time(Duration::from_secs(20));
    c.bench_function("compress text", |b| b.iter(|| compress(&data).unwrap()));
    c.bench_function("compress text grow", |b| {
        let opts = Options::new().with_allocation(Allocation::Grow);
        b.iter(|| compress_with(&data, &opts).unwrap())
    });
    c.bench_function("compress zeros", |b| b.iter(|| compress(&zeros).unwrap()));
    c.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
