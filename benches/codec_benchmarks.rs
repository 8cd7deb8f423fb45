use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use huffpack::{decode, encode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn generate_test_data(size: usize, alphabet: u32) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..size)
        .map(|_| {
            let r: u32 = rng.gen_range(0..alphabet);
            (r * r / alphabet) as u8
        })
        .collect()
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_codec");

    for &size in &[1024, 65536, 1 << 20] {
        for &alphabet in &[4u32, 64, 256] {
            let data = generate_test_data(size, alphabet);
            let artifact = encode(&data).unwrap();
            let id = format!("{size}_{alphabet}");

            group.bench_with_input(BenchmarkId::new("encode", &id), &data, |b, data| {
                b.iter(|| black_box(encode(data).unwrap()));
            });
            group.bench_with_input(BenchmarkId::new("decode", &id), &artifact, |b, artifact| {
                b.iter(|| black_box(decode(artifact).unwrap()));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
