use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use widelane::{Lane128, NativeLane, SoftLane, WideVector, lane_backend_description};

const BATCH: usize = 256;

fn random_vectors<L: Lane128>(seed: u64) -> Vec<WideVector<L>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..BATCH)
        .map(|_| {
            let mut bytes = [0u8; 64];
            rng.fill(&mut bytes);
            WideVector::from_bytes(&bytes)
        })
        .collect()
}

/// Detect and report the lane backends on this host
fn report_backends() {
    eprintln!("\n=== Lane Backend Detection ===");
    for backend in [NativeLane::BACKEND, SoftLane::BACKEND] {
        eprintln!(
            "{:<6} {:<12} {}",
            backend.name(),
            if backend.is_available() { "available" } else { "unavailable" },
            lane_backend_description(backend)
        );
    }
    eprintln!("==============================\n");
}

fn bench_aes<L: Lane128>(c: &mut Criterion) {
    let backend = L::BACKEND;
    if !backend.is_available() {
        eprintln!("Skipping {} AES benchmarks: extension not available", backend.name());
        return;
    }
    let states = random_vectors::<L>(1);
    let keys = random_vectors::<L>(2);

    let mut group = c.benchmark_group("aes_rounds");
    group.throughput(Throughput::Bytes((BATCH * 64) as u64));

    group.bench_function(BenchmarkId::new("aesenc", backend.name()), |b| {
        b.iter(|| {
            for (s, k) in states.iter().zip(&keys) {
                // Availability checked above.
                black_box(unsafe { s.aesenc(*k) });
            }
        })
    });

    // Ten dependent rounds, the shape of an AES-128 encryption.
    group.bench_function(BenchmarkId::new("aes128_chain", backend.name()), |b| {
        b.iter(|| {
            for (s, k) in states.iter().zip(&keys) {
                let mut x = *s ^ *k;
                for _ in 0..9 {
                    x = unsafe { x.aesenc(*k) };
                }
                black_box(unsafe { x.aesenclast(*k) });
            }
        })
    });

    group.finish();
}

fn bench_lane_moves<L: Lane128>(c: &mut Criterion) {
    let name = L::BACKEND.name();
    let xs = random_vectors::<L>(3);
    let ys = random_vectors::<L>(4);
    let masks: Vec<u16> = {
        let mut rng = StdRng::seed_from_u64(5);
        (0..BATCH).map(|_| rng.gen()).collect()
    };

    let mut group = c.benchmark_group("lane_moves");
    group.throughput(Throughput::Elements(BATCH as u64));

    group.bench_function(BenchmarkId::new("shuffle_i32x4", name), |b| {
        b.iter(|| {
            for (x, y) in xs.iter().zip(&ys) {
                black_box(WideVector::shuffle_i32x4(*x, *y, black_box(0x4E)));
            }
        })
    });

    group.bench_function(BenchmarkId::new("mask_broadcast_i32x4", name), |b| {
        b.iter(|| {
            for ((x, y), &k) in xs.iter().zip(&ys).zip(&masks) {
                black_box(x.mask_broadcast_i32x4(y.c, k));
            }
        })
    });

    group.bench_function(BenchmarkId::new("xor_shift", name), |b| {
        b.iter(|| {
            for (x, y) in xs.iter().zip(&ys) {
                black_box((*x ^ *y).srli_epi32(black_box(7)) | x.slli_epi32(25));
            }
        })
    });

    group.finish();
}

fn bench_backends(c: &mut Criterion) {
    report_backends();
    if NativeLane::BACKEND != SoftLane::BACKEND {
        bench_aes::<NativeLane>(c);
        bench_lane_moves::<NativeLane>(c);
    }
    bench_aes::<SoftLane>(c);
    bench_lane_moves::<SoftLane>(c);
}

criterion_group!(benches, bench_backends);
criterion_main!(benches);
